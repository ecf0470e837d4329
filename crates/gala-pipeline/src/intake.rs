use serde::{Deserialize, Serialize};

/// Partially-filled event details gathered by the slot-filling dialogue.
///
/// Extraction from the user's free text happens outside this crate; this
/// type only accumulates whatever arrived and decides what to ask next.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventDetails {
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub num_of_people: Option<u64>,
    #[serde(default)]
    pub date: Option<String>,
}

fn filled(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.trim().is_empty())
}

impl EventDetails {
    /// Fold newly extracted details into this record. Only absent fields
    /// are filled; earlier answers are never overwritten.
    pub fn merge(&mut self, update: &EventDetails) {
        if !filled(&self.event) && filled(&update.event) {
            self.event = update.event.clone();
        }
        if !filled(&self.location) && filled(&update.location) {
            self.location = update.location.clone();
        }
        if self.budget.is_none() && update.budget.is_some() {
            self.budget = update.budget;
        }
        if self.num_of_people.is_none() && update.num_of_people.is_some() {
            self.num_of_people = update.num_of_people;
        }
        if !filled(&self.date) && filled(&update.date) {
            self.date = update.date.clone();
        }
    }
}

/// The next question for the user, walking the fields in fixed order, or
/// the completion message once everything essential is known.
pub fn next_prompt(details: &EventDetails) -> String {
    if !filled(&details.event) {
        return "To help plan your event, I need some details. What's the name of your event?"
            .to_string();
    }
    let event = details.event.as_deref().unwrap_or_default();
    if !filled(&details.location) {
        return format!("Great! Where will '{event}' be held?");
    }
    if details.budget.is_none() {
        return "What's your budget for this event?".to_string();
    }
    if details.num_of_people.is_none() {
        return "How many people are you expecting at the event?".to_string();
    }
    if !filled(&details.date) {
        return "What's the date for your event? (Please specify in YYYY-MM-DD format)"
            .to_string();
    }
    "Perfect! I have all the essential details. Would you like to review them or discuss something specific?"
        .to_string()
}
