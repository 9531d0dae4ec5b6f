//! utterances comment widget
//!
//! The widget is a script element attached to a mount point of a page. It is
//! attached while the page is rendered and detached afterwards; attaching to
//! a mount point that is already occupied is refused.

use std::collections::HashMap;

use crate::config::CommentConfig;
use crate::error::{Error, Result};
use crate::helpers::attr;

/// A configured comment script element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentScript {
    pub src: String,
    pub repo: String,
    pub issue_term: String,
    pub theme: String,
    pub crossorigin: String,
}

impl CommentScript {
    pub fn from_config(config: &CommentConfig) -> Self {
        Self {
            src: config.src.clone(),
            repo: config.repo.clone(),
            issue_term: config.issue_term.clone(),
            theme: config.theme.clone(),
            crossorigin: config.crossorigin.clone(),
        }
    }

    pub fn to_html(&self) -> String {
        format!(
            "<script{}{}{}{}{} async></script>",
            attr("src", &self.src),
            attr("repo", &self.repo),
            attr("issue-term", &self.issue_term),
            attr("theme", &self.theme),
            attr("crossorigin", &self.crossorigin),
        )
    }
}

/// Proof of one attachment, consumed by [`CommentMounts::detach`]
#[derive(Debug, PartialEq, Eq)]
pub struct MountHandle {
    mount_point: String,
    id: u64,
}

impl MountHandle {
    pub fn mount_point(&self) -> &str {
        &self.mount_point
    }
}

/// Scripts currently attached, keyed by mount point id
#[derive(Debug, Default)]
pub struct CommentMounts {
    mounted: HashMap<String, (u64, CommentScript)>,
    next_id: u64,
}

impl CommentMounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, mount_point: &str, config: &CommentConfig) -> Result<MountHandle> {
        if self.mounted.contains_key(mount_point) {
            return Err(Error::MountOccupied(mount_point.to_string()));
        }

        self.next_id += 1;
        let id = self.next_id;
        self.mounted.insert(
            mount_point.to_string(),
            (id, CommentScript::from_config(config)),
        );
        tracing::debug!(mount_point, "comment widget attached");

        Ok(MountHandle {
            mount_point: mount_point.to_string(),
            id,
        })
    }

    /// Remove the script this handle attached.
    ///
    /// Returns `None` if the mount point is already empty or now holds a
    /// script from a different attachment, which is left in place.
    pub fn detach(&mut self, handle: MountHandle) -> Option<CommentScript> {
        match self.mounted.get(&handle.mount_point) {
            Some((id, _)) if *id == handle.id => {
                tracing::debug!(mount_point = %handle.mount_point, "comment widget detached");
                self.mounted.remove(&handle.mount_point).map(|(_, s)| s)
            }
            _ => None,
        }
    }

    /// Markup of whatever is attached at `mount_point`
    pub fn html(&self, mount_point: &str) -> String {
        self.mounted
            .get(mount_point)
            .map(|(_, script)| script.to_html())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.mounted.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_markup() {
        let html = CommentScript::from_config(&CommentConfig::default()).to_html();
        assert_eq!(
            html,
            r#"<script src="https://utteranc.es/client.js" repo="hrafaelalves/spacetraveling-comments" issue-term="pathname" theme="photon-dark" crossorigin="anonymous" async></script>"#
        );
    }

    #[test]
    fn test_attach_then_detach() {
        let config = CommentConfig::default();
        let mut mounts = CommentMounts::new();

        let handle = mounts.attach("comments", &config).unwrap();
        assert_eq!(handle.mount_point(), "comments");
        assert!(mounts.html("comments").contains("utteranc.es"));

        assert!(mounts.detach(handle).is_some());
        assert!(mounts.is_empty());
        assert_eq!(mounts.html("comments"), "");
    }

    #[test]
    fn test_no_duplicate_injection() {
        let config = CommentConfig::default();
        let mut mounts = CommentMounts::new();

        let _handle = mounts.attach("comments", &config).unwrap();
        assert!(matches!(
            mounts.attach("comments", &config),
            Err(Error::MountOccupied(_))
        ));
        assert_eq!(mounts.html("comments").matches("<script").count(), 1);
    }

    #[test]
    fn test_detach_tolerates_empty_mount_point() {
        let config = CommentConfig::default();
        let mut mounts = CommentMounts::new();

        let first = mounts.attach("comments", &config).unwrap();
        let stale = MountHandle {
            mount_point: first.mount_point.clone(),
            id: first.id,
        };
        assert!(mounts.detach(first).is_some());
        assert!(mounts.detach(stale).is_none());
    }

    #[test]
    fn test_stale_handle_keeps_newer_widget() {
        let config = CommentConfig::default();
        let mut mounts = CommentMounts::new();

        let first = mounts.attach("comments", &config).unwrap();
        let stale = MountHandle {
            mount_point: first.mount_point.clone(),
            id: first.id,
        };
        mounts.detach(first);
        let _second = mounts.attach("comments", &config).unwrap();

        assert!(mounts.detach(stale).is_none());
        assert!(!mounts.is_empty());
    }
}
