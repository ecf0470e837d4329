use serde::{Deserialize, Serialize};

use crate::id::{new_event_id, new_fact_id, now_rfc3339};

/// Event ID format: `evt_<ulid>`
pub type EventId = String;

/// One logical planning event. Created at most once per transcript, the
/// instant the first topic-bearing record is observed; never updated.
/// Facts reference it by `event_id`, the event holds no back-references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub event_id: EventId,
    pub created_at: String,
}

impl EventRecord {
    /// Mint a new event with a fresh id and the current timestamp.
    pub fn new() -> Self {
        Self {
            event_id: new_event_id(),
            created_at: now_rfc3339(),
        }
    }
}

impl Default for EventRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// A volunteer-outreach email extracted from the transcript.
///
/// When a body was extracted it always ends with the fixed closing line,
/// regardless of how the source text punctuated it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolunteerEmail {
    pub subject: String,
    pub body: String,
}

/// Closing line appended to every extracted email body.
pub const EMAIL_CLOSING: &str = "Best regards, The Event Team.";

impl VolunteerEmail {
    /// True when neither subject nor body carries any text.
    pub fn is_empty(&self) -> bool {
        self.subject.trim().is_empty() && self.body.trim().is_empty()
    }
}

/// One social-outreach group row (`social_outreach` collection).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupRow {
    pub id: String,
    pub event_id: EventId,
    pub group_name: String,
}

impl GroupRow {
    pub fn new(event_id: &str, group_name: &str) -> Self {
        Self {
            id: new_fact_id(),
            event_id: event_id.to_string(),
            group_name: group_name.to_string(),
        }
    }
}

/// One required-resource row (`resources` collection).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceRow {
    pub id: String,
    pub event_id: EventId,
    pub resource: String,
}

impl ResourceRow {
    pub fn new(event_id: &str, resource: &str) -> Self {
        Self {
            id: new_fact_id(),
            event_id: event_id.to_string(),
            resource: resource.to_string(),
        }
    }
}

/// One volunteer-outreach email row (`volunteer_outreach` collection).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailRow {
    pub id: String,
    pub event_id: EventId,
    pub subject: String,
    pub body: String,
}

impl EmailRow {
    pub fn new(event_id: &str, email: &VolunteerEmail) -> Self {
        Self {
            id: new_fact_id(),
            event_id: event_id.to_string(),
            subject: email.subject.clone(),
            body: email.body.clone(),
        }
    }
}
