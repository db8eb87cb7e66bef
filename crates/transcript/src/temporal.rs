//! Temporal pattern extraction
//!
//! Distills a text segment into days, times, duration, frequency, and a
//! `+`-joined time pattern.

use clm_language::TranscriptLexicon;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::TemporalPattern;

static TIME: Lazy<Regex> = Lazy::new(|| {
    // Requires a real time marker (minutes or am/pm); bare numbers are not times
    Regex::new(r"\b(\d{1,2}):(\d{2})\s?(am|pm)?\b|\b(\d{1,2})\s?(am|pm)\b").expect("static pattern")
});
static DURATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:for|past|last|over|around)?\s*(\d+|one|two|three|four|five|six|seven|couple)\s+(day|week|month)s?")
        .expect("static pattern")
});
static RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:from|between)\s+(.{1,40}?)\s+(?:to|and)\s+(.{1,40})").expect("static pattern")
});
static DURATION_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)([dwmh])$").expect("static pattern"));

const DAY_ORDER: &[&str] = &["MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"];

pub struct TemporalAnalyzer<'a> {
    lexicon: &'a TranscriptLexicon,
}

impl<'a> TemporalAnalyzer<'a> {
    pub fn new(lexicon: &'a TranscriptLexicon) -> Self {
        Self { lexicon }
    }

    pub fn extract(&self, text: &str) -> TemporalPattern {
        let lower = text.to_lowercase();

        let days = self.extract_days(&lower);
        let times = extract_times(&lower);
        let duration = self
            .extract_duration(&lower, &days)
            .or_else(|| self.extract_range(&lower));
        let frequency = calculate_frequency(&times, duration.as_deref(), &lower);
        let pattern = (!times.is_empty()).then(|| times.join("+"));

        TemporalPattern {
            days,
            times,
            duration,
            frequency,
            pattern,
        }
    }

    fn extract_days(&self, lower: &str) -> Vec<String> {
        let mut found = Vec::new();
        for (name, code) in &self.lexicon.day_names {
            if lower.contains(name) && !found.iter().any(|c| c == code) {
                found.push((*code).to_string());
            }
        }
        found
    }

    fn extract_duration(&self, lower: &str, days: &[String]) -> Option<String> {
        if let Some(caps) = DURATION.captures(lower) {
            let quantity = caps[1].to_string();
            let n = quantity
                .parse::<i64>()
                .ok()
                .or_else(|| self.lexicon.word_number(&quantity))?;
            let unit = &caps[2][..1];
            return Some(format!("{n}{unit}"));
        }

        // "since Monday" style: the named days themselves carry the span
        if lower.contains("since") && !days.is_empty() {
            return Some(format!("{}d", days.len()));
        }
        None
    }

    /// "from X to Y" ranges: two weekdays give a day span, two times an
    /// hour span.
    fn extract_range(&self, lower: &str) -> Option<String> {
        let caps = RANGE.captures(lower)?;
        let span = format!("{} {}", &caps[1], &caps[2]);

        let days: Vec<&str> = self
            .lexicon
            .day_names
            .iter()
            .filter(|(name, _)| span.contains(name))
            .map(|(_, code)| *code)
            .collect();
        if days.len() >= 2 {
            return Some(format!("{}d", day_range_length(days[0], days[1])));
        }

        let times: Vec<f64> = TIME
            .captures_iter(&span)
            .filter_map(|c| to_24h(&c))
            .collect();
        if times.len() >= 2 {
            let hours = (times[1] - times[0]).max(0.0) as i64;
            return Some(format!("{hours}h"));
        }
        None
    }
}

fn extract_times(lower: &str) -> Vec<String> {
    let mut times: Vec<String> = TIME
        .captures_iter(lower)
        .filter_map(|caps| {
            let (hour, minute, period) = parse_time_parts(&caps)?;
            let mut hour = hour;
            match period {
                Some("pm") if hour < 12 => hour += 12,
                Some("am") if hour == 12 => hour = 0,
                _ => {}
            }
            (hour <= 23 && minute <= 59).then(|| format!("{hour:02}:{minute:02}"))
        })
        .collect();
    times.sort();
    times.dedup();
    times
}

fn parse_time_parts<'t>(caps: &'t regex::Captures<'_>) -> Option<(i64, i64, Option<&'t str>)> {
    if let Some(hour) = caps.get(1) {
        let minute = caps.get(2).map(|m| m.as_str().parse().ok())??;
        Some((hour.as_str().parse().ok()?, minute, caps.get(3).map(|m| m.as_str())))
    } else {
        let hour = caps.get(4)?.as_str().parse().ok()?;
        Some((hour, 0, caps.get(5).map(|m| m.as_str())))
    }
}

fn to_24h(caps: &regex::Captures<'_>) -> Option<f64> {
    let (mut hour, minute, period) = parse_time_parts(caps)?;
    match period {
        Some("pm") if hour < 12 => hour += 12,
        Some("am") if hour == 12 => hour = 0,
        _ => {}
    }
    Some(hour as f64 + minute as f64 / 60.0)
}

fn day_range_length(start: &str, end: &str) -> i64 {
    let start_idx = DAY_ORDER.iter().position(|d| *d == start).unwrap_or(0) as i64;
    let end_idx = DAY_ORDER.iter().position(|d| *d == end).unwrap_or(0) as i64;
    let mut delta = end_idx - start_idx;
    if delta < 0 {
        delta += 7;
    }
    delta + 1
}

fn calculate_frequency(times: &[String], duration: Option<&str>, lower: &str) -> Option<String> {
    if lower.contains("twice") {
        return Some("2x_daily".to_string());
    }
    if lower.contains("every") || lower.contains("each") {
        return Some("1x_daily".to_string());
    }

    let occurrences = times.len();
    if let Some(duration) = duration {
        if let Some(caps) = DURATION_CODE.captures(duration) {
            let n: i64 = caps[1].parse().unwrap_or(0);
            match &caps[2] {
                "d" if n == 1 => return Some(format!("{occurrences}x_daily")),
                "w" if n == 1 => return Some(format!("{occurrences}x_weekly")),
                _ => {}
            }
        }
    }

    (occurrences >= 2).then(|| format!("{occurrences}x_daily"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clm_language::en;

    fn analyze(text: &str) -> TemporalPattern {
        let lexicon = en::transcript();
        TemporalAnalyzer::new(&lexicon).extract(text)
    }

    #[test]
    fn days_normalize_to_codes() {
        let pattern = analyze("it drops every Monday and Wednesday");
        assert_eq!(pattern.days, vec!["MON", "WED"]);
    }

    #[test]
    fn times_convert_to_24_hour() {
        let pattern = analyze("it happens at 9am, 1pm and 6pm");
        assert_eq!(pattern.times, vec!["09:00", "13:00", "18:00"]);
        assert_eq!(pattern.pattern.as_deref(), Some("09:00+13:00+18:00"));
    }

    #[test]
    fn bare_numbers_are_not_times() {
        let pattern = analyze("I was charged $29.99 twice");
        assert!(pattern.times.is_empty());
        assert_eq!(pattern.frequency.as_deref(), Some("2x_daily"));
    }

    #[test]
    fn durations_compact() {
        assert_eq!(analyze("for the past 3 days").duration.as_deref(), Some("3d"));
        assert_eq!(analyze("over two weeks now").duration.as_deref(), Some("2w"));
    }

    #[test]
    fn since_with_days_counts_them() {
        let pattern = analyze("since Monday and Tuesday it drops");
        assert_eq!(pattern.duration.as_deref(), Some("2d"));
    }

    #[test]
    fn weekday_range_spans_inclusive() {
        let pattern = analyze("down from Monday to Friday");
        assert_eq!(pattern.duration.as_deref(), Some("5d"));
    }

    #[test]
    fn frequency_from_daily_duration() {
        let pattern = analyze("at 9am and 6pm for the last 1 day");
        assert_eq!(pattern.frequency.as_deref(), Some("2x_daily"));
    }
}
