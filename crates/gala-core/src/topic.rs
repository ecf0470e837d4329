use serde::{Deserialize, Serialize};

/// The three structured facts the upstream planning agent can announce.
///
/// A transcript record is tagged with a topic by embedding the topic's
/// quoted marker somewhere in its text. Marker matching is plain substring
/// presence; the coupling to the upstream format is deliberate and kept in
/// one place (see `gala-extract`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    SocialOutreach,
    Resources,
    VolunteerOutreach,
}

/// All topics, in the fixed order they are classified and rendered.
pub const ALL_TOPICS: [Topic; 3] = [
    Topic::SocialOutreach,
    Topic::Resources,
    Topic::VolunteerOutreach,
];

impl Topic {
    /// The literal marker the upstream agent embeds in a record, quotes
    /// included.
    pub fn marker(&self) -> &'static str {
        match self {
            Topic::SocialOutreach => "'Social_Outreach'",
            Topic::Resources => "'Resources'",
            Topic::VolunteerOutreach => "'Volunteer_Outreach'",
        }
    }

    /// The store collection facts of this topic are appended to.
    pub fn collection(&self) -> &'static str {
        match self {
            Topic::SocialOutreach => "social_outreach",
            Topic::Resources => "resources",
            Topic::VolunteerOutreach => "volunteer_outreach",
        }
    }
}
