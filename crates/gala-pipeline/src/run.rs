use gala_core::sink::FactSink;
use gala_core::types::{EventRecord, VolunteerEmail};
use gala_core::Topic;
use gala_extract::{classify, extract_email, extract_items};

/// Separator emitted after every echoed transcript record.
pub const RECORD_SEPARATOR: &str = "\n----\n";

/// Lifecycle of one agent run over one transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Accumulating,
    Rendering,
    Done,
}

/// Latest extraction per topic. Overwritten, not merged, every time a
/// later record of the same topic appears.
#[derive(Debug, Default)]
struct Slots {
    groups: Vec<String>,
    resources: Vec<String>,
    email: Option<VolunteerEmail>,
}

/// One pass over one transcript: classifies each record, extracts and
/// persists facts under a lazily-created event, and renders the
/// end-of-stream summary.
///
/// Records are fed one at a time through [`AgentRun::ingest`], which
/// returns the echo chunk for that record; [`AgentRun::finish`] returns
/// the summary chunks. The caller decides the pacing, so chunks can be
/// streamed out as they are produced.
pub struct AgentRun<'a, S: FactSink + ?Sized> {
    sink: &'a S,
    phase: Phase,
    slots: Slots,
    event_id: Option<String>,
}

impl<'a, S: FactSink + ?Sized> AgentRun<'a, S> {
    pub fn new(sink: &'a S) -> Self {
        Self {
            sink,
            phase: Phase::Idle,
            slots: Slots::default(),
            event_id: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The event id, once the first topic-bearing record has been seen.
    pub fn event_id(&self) -> Option<&str> {
        self.event_id.as_deref()
    }

    /// Create the event on first call, then hand back the remembered id.
    ///
    /// The event row is written the instant the first topic-bearing
    /// record is observed; a transcript without one never creates an
    /// event.
    fn ensure_event(&mut self) -> anyhow::Result<&str> {
        if self.event_id.is_none() {
            let event = EventRecord::new();
            self.sink.create_event(&event)?;
            self.event_id = Some(event.event_id);
        }
        Ok(self.event_id.as_deref().expect("event id was just set"))
    }

    /// Consume one transcript record and return its echo chunk.
    ///
    /// Every topic the record matches is handled independently: the
    /// extraction result overwrites that topic's slot (even when empty)
    /// and each freshly extracted fact is persisted under the event id.
    pub fn ingest(&mut self, record: &str) -> anyhow::Result<String> {
        if matches!(self.phase, Phase::Rendering | Phase::Done) {
            anyhow::bail!("transcript already exhausted");
        }
        self.phase = Phase::Accumulating;

        for topic in classify(record) {
            let event_id = self.ensure_event()?.to_string();
            match topic {
                Topic::SocialOutreach => {
                    let items = extract_items(record);
                    for group in &items {
                        self.sink.add_group(&event_id, group)?;
                    }
                    self.slots.groups = items;
                }
                Topic::Resources => {
                    let items = extract_items(record);
                    for resource in &items {
                        self.sink.add_resource(&event_id, resource)?;
                    }
                    self.slots.resources = items;
                }
                Topic::VolunteerOutreach => {
                    let email = extract_email(record);
                    if !email.is_empty() {
                        self.sink.add_email(&event_id, &email)?;
                    }
                    self.slots.email = Some(email);
                }
            }
        }

        Ok(format!("{record}{RECORD_SEPARATOR}"))
    }

    /// Render the summary chunks and finish the run.
    ///
    /// Blocks appear in fixed order; a topic that never produced data
    /// yields no block, and without an event there is no summary at all.
    pub fn finish(&mut self) -> Vec<String> {
        if self.phase == Phase::Done {
            return Vec::new();
        }
        self.phase = Phase::Rendering;

        let mut chunks = Vec::new();

        if !self.slots.groups.is_empty() && self.event_id.is_some() {
            chunks.push("\n*Social Outreach Groups*:\n".to_string());
            for group in &self.slots.groups {
                chunks.push(format!("- {group}\n"));
            }
        }

        if !self.slots.resources.is_empty() && self.event_id.is_some() {
            chunks.push("\n*Required Resources*:\n".to_string());
            for resource in &self.slots.resources {
                chunks.push(format!("- {resource}\n"));
            }
        }

        if let Some(email) = &self.slots.email {
            if !email.is_empty() && self.event_id.is_some() {
                chunks.push("\n*Volunteer Outreach Email*:\n".to_string());
                chunks.push(format!("Subject: {}\n", email.subject));
                chunks.push(format!("Body: {}\n", email.body));
            }
        }

        if let Some(event_id) = &self.event_id {
            chunks.push(format!("\n*Event ID*: {event_id}\n"));
        }

        self.phase = Phase::Done;
        chunks
    }
}

/// Drive a fully-materialized transcript through a run and collect every
/// chunk in emission order.
pub fn run_transcript<S: FactSink + ?Sized>(
    records: &[String],
    sink: &S,
) -> anyhow::Result<Vec<String>> {
    let mut run = AgentRun::new(sink);
    let mut chunks = Vec::new();
    for record in records {
        chunks.push(run.ingest(record)?);
    }
    chunks.extend(run.finish());
    Ok(chunks)
}
