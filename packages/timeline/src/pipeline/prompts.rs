//! Generation prompt and response parsing.

use serde_json::Value;
use tracing::debug;

use crate::error::{Result, TimelineError};
use crate::types::event::Event;

/// Instruction contract sent ahead of the extract.
const TIMELINE_INSTRUCTIONS: &str = r#"You are an expert historian and timeline creator, focused on extracting all historical events.
Please provide ONLY a JSON array of events in this exact format:

[
  { "date": "YYYY", "summary": "Simple 1-3 line summary in plain language that explains the event's importance and key facts." },
  ...
]

Analyze the following text and extract ALL important historical events. For each event, provide the date in one of these formats ONLY:
- "YYYY" (e.g., "2020", "1945")
- "YYYY BC" (e.g., "1000 BC", "44 BC")

STRICT RULES:
- Do NOT use months, centuries, decades, or vague time periods (e.g., "May 2020", "7th century", "1800s", "the 20th century", "the 1990s", "ancient times", etc.).
- Every date must be a specific year, and for BCE use "BC" after the year.
- Do NOT write "AD" for modern dates. Just write "YYYY".
- Use "BC" only if the event happened before the common era.
- The date must always be in one of the formats above.
- The summary must be written in simple, clear language that a high school student could easily understand."#;

/// Build the generation prompt for an extract.
pub fn timeline_prompt(text: &str) -> String {
    format!("{}\n\nText:\"\"\"{}\"\"\"", TIMELINE_INSTRUCTIONS, text)
}

/// Parse a raw model response into events.
///
/// The model may wrap the array in prose, so the payload is taken from the
/// first `[` to the last `]`. Missing brackets or invalid JSON is an error;
/// the caller decides how to degrade.
///
/// Array elements are read leniently: numeric dates are stringified, a
/// missing summary becomes empty, and non-object elements or elements
/// without a date are skipped. Date *format* is not validated here.
pub fn parse_events_response(raw: &str) -> Result<Vec<Event>> {
    let payload = json_array_slice(raw).ok_or_else(|| TimelineError::MalformedResponse {
        reason: "no JSON array in model response".to_string(),
    })?;

    let items: Vec<Value> = serde_json::from_str(payload)?;
    let total = items.len();
    let events: Vec<Event> = items.into_iter().filter_map(event_from_value).collect();

    if events.len() < total {
        debug!(
            total,
            kept = events.len(),
            "Skipped malformed elements in model response"
        );
    }

    Ok(events)
}

fn json_array_slice(raw: &str) -> Option<&str> {
    let start = raw.find('[')?;
    let end = raw.rfind(']')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

fn event_from_value(value: Value) -> Option<Event> {
    let Value::Object(mut fields) = value else {
        return None;
    };

    let date = match fields.remove("date")? {
        Value::String(date) => date,
        Value::Number(year) => year.to_string(),
        _ => return None,
    };

    let summary = match fields.remove("summary") {
        Some(Value::String(summary)) => summary,
        _ => String::new(),
    };

    Some(Event { date, summary })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_text_and_contract() {
        let prompt = timeline_prompt("Rome was founded...");
        assert!(prompt.contains("Text:\"\"\"Rome was founded...\"\"\""));
        assert!(prompt.contains("\"YYYY BC\""));
        assert!(prompt.contains("ONLY a JSON array"));
    }

    #[test]
    fn test_parse_plain_array() {
        let raw = r#"[{"date":"753 BC","summary":"Founded"},{"date":"476","summary":"Fall"}]"#;
        let events = parse_events_response(raw).unwrap();
        assert_eq!(
            events,
            vec![Event::new("753 BC", "Founded"), Event::new("476", "Fall")]
        );
    }

    #[test]
    fn test_parse_array_wrapped_in_prose() {
        let raw = "Sure! Here is the timeline:\n```json\n[{\"date\": \"1945\", \"summary\": \"War ends\"}]\n```\nLet me know [if] you need more.";
        // Last ']' belongs to the trailing prose, so the slice is invalid JSON
        assert!(parse_events_response(raw).is_err());

        let raw = "Here you go:\n```json\n[{\"date\": \"1945\", \"summary\": \"War ends\"}]\n```";
        let events = parse_events_response(raw).unwrap();
        assert_eq!(events, vec![Event::new("1945", "War ends")]);
    }

    #[test]
    fn test_parse_without_brackets_fails() {
        assert!(parse_events_response("I could not find any events.").is_err());
        assert!(parse_events_response("] backwards [").is_err());
        assert!(parse_events_response("").is_err());
    }

    #[test]
    fn test_parse_invalid_json_fails() {
        assert!(parse_events_response("[{date: 1945}]").is_err());
    }

    #[test]
    fn test_parse_is_lenient_per_element() {
        let raw = r#"[{"date": 1066, "summary": "Hastings"}, "noise", {"summary": "no date"}, {"date": "1215"}]"#;
        let events = parse_events_response(raw).unwrap();
        assert_eq!(
            events,
            vec![Event::new("1066", "Hastings"), Event::new("1215", "")]
        );
    }

    #[test]
    fn test_parse_keeps_non_canonical_dates() {
        let raw = r#"[{"date": "7th century", "summary": "Vague"}]"#;
        let events = parse_events_response(raw).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].year(), None);
    }
}
