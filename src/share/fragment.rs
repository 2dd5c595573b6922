use url::Url;

use super::{ShareState, codec};

/// Two-way binding between the session and the location fragment.
///
/// Remembers the fragment it last wrote or accepted so the change
/// notification caused by its own write is not taken for navigation.
#[derive(Debug, Default)]
pub struct FragmentSync {
    current: Option<String>,
}

impl FragmentSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fragment last written or accepted.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Encode `state` and remember it as the current fragment.
    pub fn write(&mut self, state: &ShareState) -> String {
        let fragment = codec::encode(state);
        self.current = Some(fragment.clone());
        fragment
    }

    /// Handle a fragment change reported by the location.
    ///
    /// Returns the decoded state for genuine navigation. Echoes of our own
    /// write and undecodable fragments yield `None`.
    pub fn on_external_change(&mut self, fragment: &str) -> Option<ShareState> {
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
        if self.current.as_deref() == Some(fragment) {
            crate::debug!("share"; "ignoring echo of own fragment");
            return None;
        }
        let state = codec::decode(fragment)?;
        self.current = Some(fragment.to_string());
        Some(state)
    }
}

/// `base_url` with `fragment` attached.
pub fn permalink(base_url: &Url, fragment: &str) -> Url {
    let mut url = base_url.clone();
    url.set_fragment(Some(fragment));
    url
}

/// Extract the fragment from a full URL, a `#fragment` or a bare fragment.
pub fn fragment_of(input: &str) -> Option<String> {
    let input = input.trim();
    if let Ok(url) = Url::parse(input) {
        return url.fragment().filter(|f| !f.is_empty()).map(str::to_string);
    }
    let fragment = input.strip_prefix('#').unwrap_or(input);
    (!fragment.is_empty()).then(|| fragment.to_string())
}
