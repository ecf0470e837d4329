/// Event ID format: `evt_<ulid>`
pub fn new_event_id() -> String {
    format!("evt_{}", ulid::Ulid::new().to_string().to_lowercase())
}

/// Fact row ID format: `fct_<ulid>`
pub fn new_fact_id() -> String {
    format!("fct_{}", ulid::Ulid::new().to_string().to_lowercase())
}

/// Current UTC time as an RFC3339 string.
pub fn now_rfc3339() -> String {
    let now = time::OffsetDateTime::now_utc();
    now.format(&time::format_description::well_known::Rfc3339)
        .expect("RFC3339 formatting should not fail")
}
