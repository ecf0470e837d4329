use std::path::{Path, PathBuf};

use gala_core::Topic;

/// All well-known paths under a store root.
#[derive(Debug, Clone)]
pub struct GalaPaths {
    pub root: PathBuf,
    pub events_jsonl: PathBuf,
    pub social_outreach_jsonl: PathBuf,
    pub resources_jsonl: PathBuf,
    pub volunteer_outreach_jsonl: PathBuf,
    pub lock_file: PathBuf,
}

impl GalaPaths {
    /// Derive all paths from a store root. Pure computation, no I/O.
    pub fn discover(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            events_jsonl: root.join("events.jsonl"),
            social_outreach_jsonl: root.join("social_outreach.jsonl"),
            resources_jsonl: root.join("resources.jsonl"),
            volunteer_outreach_jsonl: root.join("volunteer_outreach.jsonl"),
            lock_file: root.join("LOCK"),
            root,
        }
    }

    /// Create the store directory. Idempotent.
    pub fn ensure_layout(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.root)
    }

    /// Resolve the collection file for a topic's facts.
    pub fn collection_file(&self, topic: Topic) -> &Path {
        match topic {
            Topic::SocialOutreach => &self.social_outreach_jsonl,
            Topic::Resources => &self.resources_jsonl,
            Topic::VolunteerOutreach => &self.volunteer_outreach_jsonl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discover_builds_correct_paths() {
        let p = GalaPaths::discover("/tmp/store");
        assert_eq!(p.root, PathBuf::from("/tmp/store"));
        assert_eq!(p.events_jsonl, PathBuf::from("/tmp/store/events.jsonl"));
        assert_eq!(
            p.social_outreach_jsonl,
            PathBuf::from("/tmp/store/social_outreach.jsonl")
        );
        assert_eq!(p.resources_jsonl, PathBuf::from("/tmp/store/resources.jsonl"));
        assert_eq!(
            p.volunteer_outreach_jsonl,
            PathBuf::from("/tmp/store/volunteer_outreach.jsonl")
        );
        assert_eq!(p.lock_file, PathBuf::from("/tmp/store/LOCK"));
    }

    #[test]
    fn collection_file_matches_topic() {
        let p = GalaPaths::discover("/tmp/store");
        assert_eq!(
            p.collection_file(Topic::SocialOutreach),
            p.social_outreach_jsonl.as_path()
        );
        assert_eq!(
            p.collection_file(Topic::Resources),
            p.resources_jsonl.as_path()
        );
        assert_eq!(
            p.collection_file(Topic::VolunteerOutreach),
            p.volunteer_outreach_jsonl.as_path()
        );
    }

    #[test]
    fn ensure_layout_creates_root() {
        let tmp = tempfile::tempdir().unwrap();
        let p = GalaPaths::discover(tmp.path().join("nested").join("store"));
        p.ensure_layout().unwrap();
        assert!(p.root.is_dir());
    }
}
