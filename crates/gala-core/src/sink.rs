use crate::types::{EventRecord, VolunteerEmail};

/// Write side of the persistence boundary.
///
/// Every operation is a fresh insert, never an update, so implementations
/// only need append semantics. The pipeline receives the sink as an
/// injected capability; it never owns or constructs one.
pub trait FactSink {
    /// Record the creation of a new event.
    fn create_event(&self, event: &EventRecord) -> anyhow::Result<()>;

    /// Append one social-outreach group for an event.
    fn add_group(&self, event_id: &str, group_name: &str) -> anyhow::Result<()>;

    /// Append one required resource for an event.
    fn add_resource(&self, event_id: &str, resource: &str) -> anyhow::Result<()>;

    /// Append one volunteer-outreach email for an event.
    fn add_email(&self, event_id: &str, email: &VolunteerEmail) -> anyhow::Result<()>;
}
