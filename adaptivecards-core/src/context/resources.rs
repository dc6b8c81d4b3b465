use serde::{Deserialize, Serialize};

/// A resource referenced by the card; `mime_type` is empty for images
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceEntry {
    pub url: String,
    pub mime_type: String,
}

/// Append-only list of resources seen during a render pass.
/// Empty urls and duplicates are kept; consumers filter.
#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    entries: Vec<ResourceEntry>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_resource(&mut self, url: impl Into<String>, mime_type: impl Into<String>) {
        self.entries.push(ResourceEntry {
            url: url.into(),
            mime_type: mime_type.into(),
        });
    }

    pub fn entries(&self) -> &[ResourceEntry] {
        &self.entries
    }

    /// Non-empty urls in first-seen order, without repeats
    pub fn unique_urls(&self) -> Vec<&str> {
        let mut urls: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !entry.url.is_empty() && !urls.contains(&entry.url.as_str()) {
                urls.push(entry.url.as_str());
            }
        }
        urls
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_kept() {
        let mut registry = ResourceRegistry::new();
        registry.add_resource("http://img", "");
        registry.add_resource("http://img", "");
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.entries()[0], registry.entries()[1]);
    }

    #[test]
    fn test_empty_url_accepted() {
        let mut registry = ResourceRegistry::new();
        registry.add_resource("", "");
        assert_eq!(registry.len(), 1);
        assert!(registry.unique_urls().is_empty());
    }

    #[test]
    fn test_unique_urls_keeps_order() {
        let mut registry = ResourceRegistry::new();
        registry.add_resource("http://b", "");
        registry.add_resource("http://a", "video/mp4");
        registry.add_resource("http://b", "");
        assert_eq!(registry.unique_urls(), vec!["http://b", "http://a"]);
    }
}
