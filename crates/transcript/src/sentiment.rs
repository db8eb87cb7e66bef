//! Keyword-driven sentiment analysis and trajectory tracking

use clm_language::TranscriptLexicon;

use crate::types::{SentimentTrajectory, Speaker, Turn};

pub struct SentimentAnalyzer<'a> {
    lexicon: &'a TranscriptLexicon,
}

impl<'a> SentimentAnalyzer<'a> {
    pub fn new(lexicon: &'a TranscriptLexicon) -> Self {
        Self { lexicon }
    }

    /// Strongest matching emotion and its intensity; declaration order
    /// breaks intensity ties. No match reads as neutral.
    pub fn analyze_turn(&self, text: &str) -> (String, f64) {
        let lower = text.to_lowercase();
        let mut best: Option<(&str, f64)> = None;

        for emotion in &self.lexicon.emotions {
            if emotion.keywords.iter().any(|kw| lower.contains(kw)) {
                let stronger = best.map(|(_, i)| emotion.intensity > i).unwrap_or(true);
                if stronger {
                    best = Some((emotion.name, emotion.intensity));
                }
            }
        }

        match best {
            Some((name, intensity)) => (name.to_string(), intensity),
            None => ("NEUTRAL".to_string(), 0.5),
        }
    }

    /// Track customer sentiment across the conversation: start, end, and
    /// every change between consecutive non-neutral readings.
    pub fn track_trajectory(&self, turns: &[Turn]) -> SentimentTrajectory {
        let customer_turns: Vec<&Turn> = turns
            .iter()
            .filter(|t| t.speaker == Speaker::Customer)
            .collect();

        if customer_turns.is_empty() {
            return SentimentTrajectory::default();
        }

        let (start, _) = self.analyze_turn(&customer_turns[0].text);
        let (end, _) = self.analyze_turn(&customer_turns[customer_turns.len() - 1].text);

        let readings: Vec<(usize, String)> = customer_turns
            .iter()
            .enumerate()
            .map(|(i, t)| (i, self.analyze_turn(&t.text).0))
            .filter(|(_, s)| s != "NEUTRAL")
            .collect();

        let mut turning_points = Vec::new();
        for pair in readings.windows(2) {
            if pair[0].1 != pair[1].1 {
                turning_points.push((pair[1].0, pair[1].1.clone()));
            }
        }

        SentimentTrajectory {
            start,
            end,
            turning_points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clm_language::en;

    fn analyzer_fixture() -> TranscriptLexicon {
        en::transcript()
    }

    #[test]
    fn strongest_emotion_wins() {
        let lexicon = analyzer_fixture();
        let analyzer = SentimentAnalyzer::new(&lexicon);
        // Both FRUSTRATED (0.7) and ANGRY (0.9) match; ANGRY is stronger
        let (emotion, intensity) =
            analyzer.analyze_turn("I am frustrated and frankly this is unacceptable");
        assert_eq!(emotion, "ANGRY");
        assert_eq!(intensity, 0.9);
    }

    #[test]
    fn no_keywords_is_neutral() {
        let lexicon = analyzer_fixture();
        let analyzer = SentimentAnalyzer::new(&lexicon);
        assert_eq!(analyzer.analyze_turn("my account number is 12345").0, "NEUTRAL");
    }

    #[test]
    fn trajectory_tracks_changes() {
        let lexicon = analyzer_fixture();
        let analyzer = SentimentAnalyzer::new(&lexicon);
        let turns = vec![
            Turn::new(Speaker::Customer, "this is ridiculous, I am furious"),
            Turn::new(Speaker::Agent, "let me help"),
            Turn::new(Speaker::Customer, "okay, checking now"),
            Turn::new(Speaker::Customer, "thank you so much, that worked"),
        ];
        let trajectory = analyzer.track_trajectory(&turns);
        assert_eq!(trajectory.start, "ANGRY");
        assert_eq!(trajectory.end, "GRATEFUL");
        assert!(!trajectory.turning_points.is_empty());
    }

    #[test]
    fn empty_conversation_is_neutral() {
        let lexicon = analyzer_fixture();
        let analyzer = SentimentAnalyzer::new(&lexicon);
        let trajectory = analyzer.track_trajectory(&[]);
        assert_eq!(trajectory.start, "NEUTRAL");
        assert_eq!(trajectory.end, "NEUTRAL");
    }
}
