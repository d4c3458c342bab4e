use std::sync::LazyLock;

use regex::Regex;

static HOURS: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)(?:\s*[-–]\s*\d+(?:\.\d+)?)?\s*(?:h|hrs?|hours?)\b").ok());
static MINUTES: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)(?:\s*[-–]\s*\d+)?\s*(?:m|mins?|minutes?)\b").ok());
static NUMBER: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(\d+)").ok());

/// Reads a free-text time estimate such as "1 hour 15 minutes" or
/// "25-30 mins". Ranges resolve to their first number.
pub fn parse_cook_time_minutes(estimate: &str) -> Option<i32> {
    let hours = capture_f64(HOURS.as_ref(), estimate);
    let minutes = capture_f64(MINUTES.as_ref(), estimate);

    let total = match (hours, minutes) {
        (None, None) => capture_f64(NUMBER.as_ref(), estimate)?,
        (h, m) => h.unwrap_or(0.0) * 60.0 + m.unwrap_or(0.0),
    };

    if total <= 0.0 || total > f64::from(i32::MAX) {
        return None;
    }
    Some(total.round() as i32)
}

fn capture_f64(regex: Option<&Regex>, text: &str) -> Option<f64> {
    regex?
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// The stored recipe body: short description, blank line, full markdown.
pub fn compose_full_text(description: &str, markdown: &str) -> String {
    let description = description.trim();
    let markdown = markdown.trim();

    match (description.is_empty(), markdown.is_empty()) {
        (true, _) => markdown.to_string(),
        (false, true) => description.to_string(),
        (false, false) => format!("{description}\n\n{markdown}"),
    }
}
