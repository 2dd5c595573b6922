use std::sync::Arc;

use arc_swap::ArcSwap;

/// The live edit buffer.
///
/// Readers (the compiler host) load a snapshot without locking; writers
/// (editor input, permalink navigation) always replace the whole text.
#[derive(Debug, Clone)]
pub struct EditBuffer(Arc<ArcSwap<String>>);

impl EditBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        Self(Arc::new(ArcSwap::from_pointee(text.into())))
    }

    /// Current text.
    #[inline]
    pub fn get(&self) -> Arc<String> {
        self.0.load_full()
    }

    /// Replace the whole text.
    #[inline]
    pub fn set(&self, text: impl Into<String>) {
        self.0.store(Arc::new(text.into()));
    }

    /// Whether the buffer currently holds exactly `text`.
    pub fn is(&self, text: &str) -> bool {
        self.0.load().as_str() == text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_the_value() {
        let buffer = EditBuffer::new("a");
        let reader = buffer.clone();
        let before = reader.get();

        buffer.set("b");
        assert_eq!(reader.get().as_str(), "b");
        assert!(reader.is("b"));
        // snapshots taken earlier are unaffected by later writes
        assert_eq!(before.as_str(), "a");
    }
}
