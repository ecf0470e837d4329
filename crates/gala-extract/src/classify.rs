use gala_core::topic::{Topic, ALL_TOPICS};

/// Report which topics a transcript record carries, in fixed topic order.
///
/// Matching is literal substring presence of each quoted marker. The
/// upstream planning process embeds these markers in its message dumps;
/// no attempt is made to understand the surrounding text. A record may
/// match zero, one, or several topics, and each match is handled
/// independently downstream.
pub fn classify(text: &str) -> Vec<Topic> {
    ALL_TOPICS
        .iter()
        .copied()
        .filter(|topic| text.contains(topic.marker()))
        .collect()
}
