//! Configuration section definitions.
//!
//! Each module corresponds to a section in `playground.toml`:
//!
//! | Module      | TOML Section   | Purpose                                  |
//! |-------------|----------------|------------------------------------------|
//! | `compiler`  | `[compiler]`   | Target, module kind, JSX mode, paths     |
//! | `libs`      | `[libs]`       | Snapshot roots and inclusion filters     |
//! | `scheduler` | `[scheduler]`  | Recompilation quiescence window          |
//! | `share`     | `[share]`      | Permalink base URL                       |
//! | `sandbox`   | `[sandbox]`    | Output directory, document title, prelude |

mod compiler;
mod libs;
mod sandbox;
mod scheduler;
mod share;

pub use compiler::{CompilerOptions, JsxMode, ModuleKind, Target};
pub use libs::{LibRootConfig, LibsConfig};
pub use sandbox::SandboxConfig;
pub use scheduler::SchedulerConfig;
pub use share::ShareConfig;
