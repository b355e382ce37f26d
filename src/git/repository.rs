use std::path::Path;

use git2::Repository;

use crate::error::Result;
use crate::git::SourceControl;

/// [SourceControl] implementation backed by a real git repository.
pub struct Git2SourceControl {
    repo: Repository,
}

impl Git2SourceControl {
    /// Discovers the git repository at `path` or any of its parents.
    ///
    /// # Arguments
    /// * `path` - Directory inside the working tree (usually the project root)
    ///
    /// # Returns
    /// * `Ok(Git2SourceControl)` - Successfully opened repository
    /// * `Err` - If `path` is not inside a git repository
    pub fn discover(path: impl AsRef<Path>) -> Result<Self> {
        let repo = Repository::discover(path)?;
        Ok(Git2SourceControl { repo })
    }

    /// The creation time of a tag reference, in seconds since the epoch.
    ///
    /// Annotated tags use the tagger date; lightweight tags fall back to the
    /// time of the commit they point at.
    fn tag_time(&self, reference: &git2::Reference<'_>) -> Option<i64> {
        if let Ok(tag) = reference.peel_to_tag() {
            if let Some(tagger) = tag.tagger() {
                return Some(tagger.when().seconds());
            }
        }
        reference
            .peel_to_commit()
            .ok()
            .map(|commit| commit.time().seconds())
    }
}

impl SourceControl for Git2SourceControl {
    fn latest_non_dev_tag(&self) -> Result<Option<String>> {
        let names = self.repo.tag_names(None)?;
        let mut tags: Vec<(i64, String)> = Vec::new();

        for name in names.iter().flatten() {
            if name.contains("dev") {
                continue;
            }
            let reference = match self.repo.find_reference(&format!("refs/tags/{}", name)) {
                Ok(r) => r,
                Err(_) => continue,
            };
            if let Some(time) = self.tag_time(&reference) {
                tags.push((time, name.to_string()));
            }
        }

        tags.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(tags.into_iter().next().map(|(_, name)| name))
    }

    fn commit_all_signed(&self, message: &str) -> Result<()> {
        let mut index = self.repo.index()?;
        // Equivalent of `git commit -a`: restage every tracked path that changed.
        index.update_all(["*"], None)?;
        index.write()?;

        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let signature = self.repo.signature()?;

        let full_message = format!(
            "{}\n\nSigned-off-by: {} <{}>\n",
            message,
            signature.name().unwrap_or(""),
            signature.email().unwrap_or(""),
        );

        let parent = self.repo.head()?.peel_to_commit()?;
        self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            &full_message,
            &tree,
            &[&parent],
        )?;
        Ok(())
    }
}
