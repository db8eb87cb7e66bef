//! English transcript keyword tables

use crate::transcript::{ActionFamily, Emotion, TranscriptLexicon};

pub fn transcript() -> TranscriptLexicon {
    TranscriptLexicon {
        issue_type_keywords: vec![
            (
                "BILLING_DISPUTE",
                vec![
                    "charged twice", "duplicate charge", "double billing", "overcharge",
                    "incorrect amount", "billing", "charge", "charged",
                ],
            ),
            (
                "UNEXPECTED_CHARGE",
                vec!["unexpected charge", "unknown charge", "didn't authorize"],
            ),
            (
                "REFUND_REQUEST",
                vec!["want a refund", "refund not received", "waiting for refund", "refund"],
            ),
            (
                "INTERNET_OUTAGE",
                vec![
                    "internet keeps dropping", "connection drops", "no signal", "outage",
                    "disconnect", "internet down", "keeps dropping",
                ],
            ),
            (
                "SLOW_INTERNET",
                vec!["slow internet", "lagging", "buffering", "low speed", "latency"],
            ),
            ("WIFI_ISSUE", vec!["wifi", "router", "modem", "ssid"]),
            (
                "CONNECTIVITY",
                vec!["can't connect", "cannot connect", "connection issue", "connectivity"],
            ),
            (
                "LOGIN_FAILURE",
                vec!["can't log in", "cannot log in", "password reset", "locked out", "login"],
            ),
            (
                "APP_CRASH",
                vec!["app crashes", "app crash", "application stopped", "keeps freezing"],
            ),
            (
                "DELIVERY_DELAY",
                vec!["hasn't arrived", "not arrived", "delivery late", "shipping delayed"],
            ),
            (
                "LOST_PACKAGE",
                vec!["lost package", "missing order", "never received my order"],
            ),
            (
                "DAMAGED_PACKAGE",
                vec!["arrived damaged", "broken item", "damaged"],
            ),
            ("WRONG_ITEM", vec!["wrong item", "incorrect order", "wrong product"]),
            (
                "PRODUCT_DEFECT",
                vec!["defective", "not working", "stopped working", "faulty", "broken"],
            ),
            (
                "SUBSCRIPTION_CANCELLATION",
                vec!["cancel my subscription", "cancel subscription", "stop renewal"],
            ),
            (
                "ACCOUNT_LOCKED",
                vec!["account locked", "account suspended", "cannot access my account"],
            ),
            (
                "ACCOUNT_HACKED",
                vec!["unauthorized access", "account compromised", "security breach"],
            ),
            (
                "PAYMENT_FAILED",
                vec!["payment failed", "card declined", "transaction failed"],
            ),
            (
                "TECHNICAL",
                vec!["technical issue", "technical problem", "error message", "not loading"],
            ),
            (
                "ESCALATION_REQUEST",
                vec!["speak to a supervisor", "speak to a manager", "file a complaint"],
            ),
            ("LONG_WAIT_TIME", vec!["on hold", "waiting too long", "been waiting"]),
        ],
        severity_keywords: vec![
            (
                "CRITICAL",
                vec![
                    "completely down", "can't work", "cannot work", "emergency", "critical",
                    "losing money", "unusable",
                ],
            ),
            (
                "HIGH",
                vec![
                    "urgent", "asap", "immediately", "very frustrating", "unacceptable",
                    "every day", "constantly",
                ],
            ),
            ("MEDIUM", vec!["annoying", "inconvenient", "several times", "keeps happening"]),
            ("LOW", vec!["minor", "small issue", "when you get a chance"]),
        ],
        resolution_keywords: vec![
            (
                "RESOLVED",
                vec![
                    "issue is resolved", "problem is resolved", "fixed now", "working now",
                    "all set", "has been resolved", "is resolved", "that fixes",
                ],
            ),
            (
                "PENDING_REPLACEMENT",
                vec!["send a replacement", "sending a replacement", "ship a new"],
            ),
            (
                "ESCALATED",
                vec![
                    "escalated to", "transferred to", "forwarded to our", "escalate this to",
                ],
            ),
            (
                "PENDING",
                vec![
                    "within 24", "within 48", "business days", "follow up", "get back to you",
                    "pending", "scheduled",
                ],
            ),
        ],
        billing_cause_keywords: vec![
            (
                "DUPLICATE_CHARGE",
                vec!["processed twice", "duplicate", "charged twice", "system error charged"],
            ),
            (
                "MID_CYCLE_UPGRADE",
                vec!["upgraded mid", "upgrade took effect", "prorated upgrade", "upgrade from"],
            ),
            (
                "MID_CYCLE_DOWNGRADE",
                vec!["downgraded mid", "downgrade took effect", "downgrade from"],
            ),
            ("PRORATION", vec!["prorated", "proration", "partial month"]),
            ("PLAN_RENEWAL", vec!["annual renewal", "renewal charge", "auto-renew"]),
            ("SYSTEM_ERROR", vec!["billing error", "system glitch", "our mistake"]),
        ],
        technical_issue_map: vec![
            ("ROUTER_FIRMWARE", vec!["firmware", "router software"]),
            ("LINE_SIGNAL", vec!["signal degradation", "line noise", "weak signal"]),
            ("NETWORK_CONGESTION", vec!["congestion", "peak hours", "high traffic"]),
            ("AREA_OUTAGE", vec!["outage in your area", "area outage", "local outage"]),
            ("WIRING", vec!["wiring", "cable damage", "loose cable"]),
        ],
        issue_confirmation_map: vec![
            (
                "ISSUE_CONFIRMED",
                vec![
                    "i can see the", "i do see the", "i can confirm", "i've confirmed",
                    "you're right, there", "i see the problem", "i found the issue",
                ],
            ),
        ],
        troubleshooting_actions: vec![
            (
                "TROUBLESHOOT",
                vec![
                    "restart your", "reboot your", "power cycle", "run a diagnostic",
                    "run diagnostics", "unplug", "reset your",
                ],
            ),
        ],
        action_families: vec![
            ActionFamily {
                family: "TROUBLESHOOT",
                event: "TROUBLESHOOT",
                keywords: vec!["troubleshoot", "diagnose", "diagnostic", "test the line"],
            },
            ActionFamily {
                family: "ESCALATE",
                event: "ESCALATION",
                keywords: vec!["escalate", "escalated", "transfer you", "forward this"],
            },
            ActionFamily {
                family: "REFUND",
                event: "REFUND",
                keywords: vec!["refund", "refunded", "reimburse"],
            },
            ActionFamily {
                family: "CREDIT",
                event: "CREDIT",
                keywords: vec!["account credit", "credited", "apply a credit", "courtesy credit"],
            },
            ActionFamily {
                family: "REPLACE",
                event: "REPLACEMENT",
                keywords: vec!["replacement", "replace the", "exchange it"],
            },
            ActionFamily {
                family: "SCHEDULE",
                event: "SCHEDULE",
                keywords: vec!["schedule", "scheduled", "appointment", "book a"],
            },
            ActionFamily {
                family: "CANCEL",
                event: "CANCELLATION",
                keywords: vec!["cancel", "cancelled", "canceled"],
            },
        ],
        explicit_only_actions: vec!["SCHEDULE", "CANCELLATION"],
        explicit_action_phrases: vec![
            (
                "SCHEDULE",
                vec![
                    "schedule a technician", "scheduled a technician", "book a technician",
                    "set up an appointment", "scheduled an appointment",
                ],
            ),
            (
                "CANCELLATION",
                vec![
                    "cancel your subscription", "cancelled your subscription",
                    "processed the cancellation", "cancel the order", "cancelled the order",
                ],
            ),
        ],
        completion_keywords: vec![
            "processed", "completed", "issued", "applied", "submitted", "resolved", "done",
        ],
        completion_phrases: vec![
            "i've processed", "i have processed", "has been processed", "i've issued",
            "has been issued", "i've applied", "has been applied", "just processed",
            "refund processed",
        ],
        completion_now_patterns: vec![
            r"i(?:'ve| have)? (?:just )?(?:processed|issued|applied|submitted)",
            r"(?:is|are) (?:now )?(?:processed|complete|completed|done)",
            r"right now",
        ],
        positive_customer_confirmations: vec![
            "thank", "great", "perfect", "that worked", "it works", "awesome", "wonderful",
        ],
        agent_confirmation_phrases: vec![
            "you should see", "has been", "all set", "is confirmed", "went through",
        ],
        emotions: vec![
            Emotion {
                name: "FRUSTRATED",
                keywords: vec![
                    "frustrating", "frustrated", "annoying", "annoyed", "irritated",
                    "fed up", "tired of this", "sick of", "can't deal", "bothered",
                ],
                intensity: 0.7,
            },
            Emotion {
                name: "ANGRY",
                keywords: vec![
                    "angry", "furious", "mad", "outraged", "livid", "enraged",
                    "infuriated", "hate this", "unacceptable", "ridiculous",
                ],
                intensity: 0.9,
            },
            Emotion {
                name: "DISAPPOINTED",
                keywords: vec![
                    "disappointed", "let down", "expected better", "not happy",
                    "unsatisfied", "underwhelmed", "poor experience",
                ],
                intensity: 0.7,
            },
            Emotion {
                name: "WORRIED",
                keywords: vec![
                    "worried", "concerned", "anxious", "nervous", "uneasy", "afraid",
                    "scared", "stressed about",
                ],
                intensity: 0.6,
            },
            Emotion {
                name: "CONFUSED",
                keywords: vec![
                    "confused", "unclear", "don't understand", "not sure", "lost",
                    "don't get it", "need clarification", "mixed up",
                ],
                intensity: 0.5,
            },
            Emotion {
                name: "GRATEFUL",
                keywords: vec![
                    "thank", "thanks", "thankful", "appreciate", "grateful",
                    "means a lot", "really helpful", "so kind", "great support",
                ],
                intensity: 0.6,
            },
            Emotion {
                name: "SATISFIED",
                keywords: vec![
                    "satisfied", "happy", "pleased", "great", "perfect", "wonderful",
                    "excellent", "awesome", "amazing", "fantastic", "love it",
                ],
                intensity: 0.8,
            },
            Emotion {
                name: "RELIEVED",
                keywords: vec![
                    "relieved", "finally", "good to know", "glad it's fixed",
                    "that helps", "phew", "thank goodness", "much better now",
                ],
                intensity: 0.6,
            },
            Emotion {
                name: "IMPATIENT",
                keywords: vec![
                    "waiting too long", "still waiting", "hurry up", "been waiting",
                    "slow response", "why is this taking", "taking forever",
                ],
                intensity: 0.65,
            },
            Emotion {
                name: "HOPEFUL",
                keywords: vec![
                    "hopeful", "optimistic", "looking forward", "can't wait",
                    "excited to see",
                ],
                intensity: 0.5,
            },
            Emotion {
                name: "CALM",
                keywords: vec![
                    "calm", "relaxed", "no rush", "take your time", "no worries",
                    "it's okay", "that's alright",
                ],
                intensity: 0.4,
            },
            Emotion {
                name: "APOLOGETIC",
                keywords: vec![
                    "sorry", "apologize", "my bad", "forgive me", "didn't mean to",
                    "please excuse", "didn't realize",
                ],
                intensity: 0.5,
            },
            Emotion {
                name: "RESENTFUL",
                keywords: vec![
                    "resent", "fed up with", "done with this", "sick of dealing with",
                    "can't stand", "this always happens", "same issue again", "every time",
                ],
                intensity: 0.75,
            },
            Emotion {
                name: "SURPRISED",
                keywords: vec![
                    "surprised", "shocked", "didn't expect", "wow", "unbelievable",
                ],
                intensity: 0.6,
            },
            Emotion {
                name: "APATHETIC",
                keywords: vec![
                    "whatever", "doesn't matter", "don't care", "meh", "not a big deal",
                ],
                intensity: 0.3,
            },
        ],
        day_names: vec![
            ("monday", "MON"),
            ("tuesday", "TUE"),
            ("wednesday", "WED"),
            ("thursday", "THU"),
            ("friday", "FRI"),
            ("saturday", "SAT"),
            ("sunday", "SUN"),
        ],
        word_to_num: vec![
            ("one", 1),
            ("two", 2),
            ("three", 3),
            ("four", 4),
            ("five", 5),
            ("six", 6),
            ("seven", 7),
            ("couple", 2),
        ],
        address_abbreviations: vec![
            ("Street", "St"),
            ("Avenue", "Ave"),
            ("Boulevard", "Blvd"),
            ("Drive", "Dr"),
            ("Lane", "Ln"),
            ("Road", "Rd"),
            ("Court", "Ct"),
            ("Place", "Pl"),
            ("Apartment", "Apt"),
            ("Suite", "Ste"),
        ],
    }
}
