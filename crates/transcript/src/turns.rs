//! Turn parsing: `speaker: text` lines into normalized turns

use crate::types::{Speaker, Turn};

/// Split a transcript into turns. Lines without a colon are skipped.
/// Speaker names containing "agent"/"rep" map to the agent,
/// "customer"/"caller"/"user" to the customer, anything else to system.
pub fn parse_turns(transcript: &str) -> Vec<Turn> {
    let mut turns = Vec::new();
    for line in transcript.trim().lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((speaker, text)) = line.split_once(':') else {
            continue;
        };
        let speaker = speaker.trim().to_lowercase();
        let speaker = if speaker.contains("agent") || speaker.contains("rep") {
            Speaker::Agent
        } else if speaker.contains("customer")
            || speaker.contains("caller")
            || speaker.contains("user")
        {
            Speaker::Customer
        } else {
            Speaker::System
        };
        turns.push(Turn::new(speaker, text.trim()));
    }
    turns
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speakers_normalize() {
        let turns = parse_turns(
            "Agent: hello\nCustomer: hi\nCaller: me too\nRep: checking\nIVR: press one",
        );
        assert_eq!(turns.len(), 5);
        assert_eq!(turns[0].speaker, Speaker::Agent);
        assert_eq!(turns[1].speaker, Speaker::Customer);
        assert_eq!(turns[2].speaker, Speaker::Customer);
        assert_eq!(turns[3].speaker, Speaker::Agent);
        assert_eq!(turns[4].speaker, Speaker::System);
    }

    #[test]
    fn lines_without_colon_are_skipped() {
        let turns = parse_turns("Agent: hi\n(silence)\nCustomer: hello");
        assert_eq!(turns.len(), 2);
    }

    #[test]
    fn text_keeps_embedded_colons() {
        let turns = parse_turns("Agent: the time is 9:30 right now");
        assert_eq!(turns[0].text, "the time is 9:30 right now");
    }
}
