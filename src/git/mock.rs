use std::cell::RefCell;

use crate::error::Result;
use crate::git::SourceControl;

/// Mock source control for testing without an actual git repository
pub struct MockSourceControl {
    tags: Vec<(i64, String)>,
    commits: RefCell<Vec<String>>,
}

impl MockSourceControl {
    /// Create a new empty mock
    pub fn new() -> Self {
        MockSourceControl {
            tags: Vec::new(),
            commits: RefCell::new(Vec::new()),
        }
    }

    /// Add a tag with its creation time (seconds since the epoch)
    pub fn add_tag(&mut self, name: impl Into<String>, time: i64) {
        self.tags.push((time, name.into()));
    }

    /// Messages of the commits created through this mock, oldest first
    pub fn recorded_commits(&self) -> Vec<String> {
        self.commits.borrow().clone()
    }
}

impl Default for MockSourceControl {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceControl for MockSourceControl {
    fn latest_non_dev_tag(&self) -> Result<Option<String>> {
        let mut tags: Vec<_> = self
            .tags
            .iter()
            .filter(|(_, name)| !name.contains("dev"))
            .cloned()
            .collect();
        tags.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(tags.into_iter().next().map(|(_, name)| name))
    }

    fn commit_all_signed(&self, message: &str) -> Result<()> {
        self.commits.borrow_mut().push(message.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_latest_non_dev_tag_skips_dev_tags() {
        let mut scm = MockSourceControl::new();
        scm.add_tag("v1.2.0", 100);
        scm.add_tag("v1.3.0.dev0", 200);

        assert_eq!(
            scm.latest_non_dev_tag().unwrap(),
            Some("v1.2.0".to_string())
        );
    }

    #[test]
    fn test_mock_latest_non_dev_tag_orders_by_time() {
        let mut scm = MockSourceControl::new();
        scm.add_tag("v1.1.0", 300);
        scm.add_tag("v1.2.0", 100);

        // Creation time wins over insertion order and lexical order.
        assert_eq!(
            scm.latest_non_dev_tag().unwrap(),
            Some("v1.1.0".to_string())
        );
    }

    #[test]
    fn test_mock_latest_non_dev_tag_empty() {
        let scm = MockSourceControl::default();
        assert_eq!(scm.latest_non_dev_tag().unwrap(), None);
    }

    #[test]
    fn test_mock_records_commits() {
        let scm = MockSourceControl::new();
        scm.commit_all_signed("Bump version: 1.2.0 → 1.3.0").unwrap();

        assert_eq!(
            scm.recorded_commits(),
            vec!["Bump version: 1.2.0 → 1.3.0".to_string()]
        );
    }
}
