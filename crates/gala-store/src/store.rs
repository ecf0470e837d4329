use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use gala_core::sink::FactSink;
use gala_core::types::{EmailRow, EventRecord, GroupRow, ResourceRow, VolunteerEmail};
use gala_core::Topic;

use crate::paths::GalaPaths;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store i/o: {0}")]
    Io(#[from] std::io::Error),
    #[error("store row encoding: {0}")]
    Json(#[from] serde_json::Error),
}

/// Append-only collection store backed by one JSONL file per collection.
///
/// Every write is a fresh insert of one serialized row; rows are never
/// updated or deleted. Appends across processes are serialized by an
/// exclusive lock file next to the collections.
pub struct JsonlStore {
    pub paths: GalaPaths,
}

impl JsonlStore {
    /// Open a store at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let paths = GalaPaths::discover(root);
        paths.ensure_layout()?;
        Ok(Self { paths })
    }

    fn append_row(&self, path: &Path, row: &impl Serialize) -> anyhow::Result<()> {
        let _guard = crate::lock_file(&self.paths.lock_file)?;
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(StoreError::Io)?;
        let json = serde_json::to_string(row).map_err(StoreError::Json)?;
        writeln!(file, "{json}").map_err(StoreError::Io)?;
        Ok(())
    }

    /// Read all rows of a collection. Blank and unparseable lines are
    /// skipped rather than failing the whole read.
    fn read_rows<T: DeserializeOwned>(&self, path: &Path) -> Result<Vec<T>, StoreError> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let reader = BufReader::new(std::fs::File::open(path)?);
        let mut rows = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(&line) {
                Ok(row) => rows.push(row),
                Err(_) => continue,
            }
        }
        Ok(rows)
    }

    /// All event rows, in creation order.
    pub fn events(&self) -> Result<Vec<EventRecord>, StoreError> {
        self.read_rows(&self.paths.events_jsonl)
    }

    /// Social-outreach groups belonging to one event.
    pub fn groups_for(&self, event_id: &str) -> Result<Vec<GroupRow>, StoreError> {
        let rows: Vec<GroupRow> = self.read_rows(self.paths.collection_file(Topic::SocialOutreach))?;
        Ok(rows.into_iter().filter(|r| r.event_id == event_id).collect())
    }

    /// Required resources belonging to one event.
    pub fn resources_for(&self, event_id: &str) -> Result<Vec<ResourceRow>, StoreError> {
        let rows: Vec<ResourceRow> = self.read_rows(self.paths.collection_file(Topic::Resources))?;
        Ok(rows.into_iter().filter(|r| r.event_id == event_id).collect())
    }

    /// Volunteer-outreach emails belonging to one event.
    pub fn emails_for(&self, event_id: &str) -> Result<Vec<EmailRow>, StoreError> {
        let rows: Vec<EmailRow> =
            self.read_rows(self.paths.collection_file(Topic::VolunteerOutreach))?;
        Ok(rows.into_iter().filter(|r| r.event_id == event_id).collect())
    }
}

impl FactSink for JsonlStore {
    fn create_event(&self, event: &EventRecord) -> anyhow::Result<()> {
        self.append_row(&self.paths.events_jsonl, event)
    }

    fn add_group(&self, event_id: &str, group_name: &str) -> anyhow::Result<()> {
        let row = GroupRow::new(event_id, group_name);
        self.append_row(self.paths.collection_file(Topic::SocialOutreach), &row)
    }

    fn add_resource(&self, event_id: &str, resource: &str) -> anyhow::Result<()> {
        let row = ResourceRow::new(event_id, resource);
        self.append_row(self.paths.collection_file(Topic::Resources), &row)
    }

    fn add_email(&self, event_id: &str, email: &VolunteerEmail) -> anyhow::Result<()> {
        let row = EmailRow::new(event_id, email);
        self.append_row(self.paths.collection_file(Topic::VolunteerOutreach), &row)
    }
}
