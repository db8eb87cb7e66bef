//! Input classifier: shape and content drive routing to an encoder

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::envelope::OriginalInput;

static SPEAKER_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?mi)^\s*(agent|customer|caller|rep|user|system)\s*:").expect("static pattern")
});

/// Route decided from the input shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    StructuredData,
    Transcript,
    Prompt,
    Unknown,
}

/// Classify an input.
///
/// Mappings and sequences of mappings are structured data. Text with at
/// least two `speaker:` lines is a transcript; any other non-empty text is
/// a prompt. Everything else is unknown and the caller gets no result.
pub fn classify(input: &OriginalInput) -> InputKind {
    match input {
        OriginalInput::Value(Value::Object(_)) => InputKind::StructuredData,
        OriginalInput::Value(Value::Array(items)) => {
            if !items.is_empty() && items.iter().all(Value::is_object) {
                InputKind::StructuredData
            } else {
                InputKind::Unknown
            }
        }
        OriginalInput::Value(Value::String(s)) => classify_text(s),
        OriginalInput::Value(_) => InputKind::Unknown,
        OriginalInput::Text(s) => classify_text(s),
    }
}

fn classify_text(text: &str) -> InputKind {
    if text.trim().is_empty() {
        return InputKind::Unknown;
    }
    if SPEAKER_LINE.find_iter(text).count() >= 2 {
        return InputKind::Transcript;
    }
    InputKind::Prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn objects_and_object_arrays_are_structured() {
        assert_eq!(
            classify(&OriginalInput::from(json!({"id": 1}))),
            InputKind::StructuredData
        );
        assert_eq!(
            classify(&OriginalInput::from(json!([{"id": 1}, {"id": 2}]))),
            InputKind::StructuredData
        );
    }

    #[test]
    fn two_speaker_lines_make_a_transcript() {
        let text = "Agent: hello\nCustomer: my internet is down";
        assert_eq!(classify(&OriginalInput::from(text)), InputKind::Transcript);
    }

    #[test]
    fn one_speaker_line_is_still_a_prompt() {
        let text = "Agent: hello there";
        assert_eq!(classify(&OriginalInput::from(text)), InputKind::Prompt);
    }

    #[test]
    fn plain_text_is_a_prompt() {
        assert_eq!(
            classify(&OriginalInput::from("Summarize this call")),
            InputKind::Prompt
        );
    }

    #[test]
    fn empty_and_scalar_inputs_are_unknown() {
        assert_eq!(classify(&OriginalInput::from("   ")), InputKind::Unknown);
        assert_eq!(
            classify(&OriginalInput::from(json!(42))),
            InputKind::Unknown
        );
        assert_eq!(
            classify(&OriginalInput::from(json!([1, 2, 3]))),
            InputKind::Unknown
        );
    }

    #[test]
    fn classification_is_deterministic() {
        let input = OriginalInput::from("agent: hi\ncustomer: hello\nagent: bye");
        assert_eq!(classify(&input), classify(&input));
    }
}
