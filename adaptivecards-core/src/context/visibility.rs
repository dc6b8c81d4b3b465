use std::collections::HashMap;

/// Element id → visible, defaulting to visible
#[derive(Debug, Clone, Default)]
pub struct VisibilityController {
    overrides: HashMap<String, bool>,
}

impl VisibilityController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.overrides.get(id).copied().unwrap_or(true)
    }

    /// Flip every listed id; listing an id twice flips it twice
    pub fn toggle<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for id in ids {
            let id = id.as_ref();
            let next = !self.is_visible(id);
            self.overrides.insert(id.to_string(), next);
        }
    }

    /// Pin an id to a value (`targetElements` entries with `isVisible`)
    pub fn set_visible(&mut self, id: &str, visible: bool) {
        self.overrides.insert(id.to_string(), visible);
    }

    /// Record the schema's `isVisible: false` before the first read.
    /// An id that already has a value keeps it.
    pub fn declare_hidden(&mut self, id: &str) {
        self.overrides.entry(id.to_string()).or_insert(false);
    }

    pub fn hidden_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .overrides
            .iter()
            .filter(|(_, visible)| !**visible)
            .map(|(id, _)| id.as_str())
            .collect();
        ids.sort_unstable();
        ids
    }
}
