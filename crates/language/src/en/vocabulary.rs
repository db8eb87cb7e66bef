//! English vocabulary data

use crate::vocabulary::{EpistemicKeywords, ImperativePattern, ModifierSet, Vocabulary};

pub fn vocabulary() -> Vocabulary {
    Vocabulary {
        req_tokens: vec![
            (
                "ANALYZE",
                vec![
                    "analyze", "review", "examine", "evaluate", "inspect", "audit",
                    "investigate", "assess",
                ],
            ),
            (
                "EXTRACT",
                vec![
                    "extract", "pull", "identify", "find", "locate", "retrieve", "return",
                    "select", "pick out", "pull out",
                ],
            ),
            (
                "GENERATE",
                vec![
                    "generate", "create", "write", "draft", "compose", "produce", "build",
                    "develop", "design", "make", "suggest", "propose", "formulate", "provide",
                ],
            ),
            (
                "SUMMARIZE",
                vec!["summarize", "condense", "synthesize", "recap", "sum up", "abbreviate"],
            ),
            (
                "TRANSFORM",
                vec![
                    "convert", "transform", "rewrite", "translate", "modify", "adapt",
                    "adjust", "rephrase", "paraphrase", "edit", "turn into", "fill in",
                ],
            ),
            (
                "EXPLAIN",
                vec![
                    "explain", "describe", "clarify", "elaborate", "illustrate", "define",
                    "discuss", "tell me about", "talk about", "walk me through",
                ],
            ),
            (
                "COMPARE",
                vec![
                    "compare", "contrast", "versus", "difference between", "differentiate",
                    "distinguish",
                ],
            ),
            (
                "CLASSIFY",
                vec!["classify", "categorize", "group", "label", "segment", "triage"],
            ),
            (
                "DEBUG",
                vec![
                    "debug", "diagnose", "troubleshoot", "fix the bug", "find the bug",
                    "trace the error",
                ],
            ),
            (
                "OPTIMIZE",
                vec![
                    "optimize", "improve", "enhance", "refactor", "speed up", "simplify",
                    "streamline", "tune",
                ],
            ),
            (
                "VALIDATE",
                vec![
                    "validate", "verify", "check", "confirm", "ensure", "certify",
                    "check compliance",
                ],
            ),
            ("SEARCH", vec!["search", "look up", "look for", "find all", "query for"]),
            (
                "RANK",
                vec!["rank", "prioritize", "order by", "sort by", "score", "rate"],
            ),
            (
                "PREDICT",
                vec![
                    "predict", "forecast", "estimate", "anticipate", "project", "extrapolate",
                ],
            ),
            ("FORMAT", vec!["format", "reformat", "structure", "lay out", "arrange"]),
            (
                "CALCULATE",
                vec!["calculate", "compute", "quantify", "measure", "count", "total"],
            ),
            ("EXECUTE", vec!["apply", "implement", "execute", "run", "perform"]),
            ("LIST", vec!["list", "enumerate", "itemize", "outline"]),
        ],
        target_tokens: vec![
            (
                "CODE",
                vec!["code", "script", "program", "function", "method", "class", "snippet"],
            ),
            (
                "DATA",
                vec!["data", "dataset", "database", "spreadsheet", "table", "csv", "records"],
            ),
            ("QUERY", vec!["query", "sql", "sql query", "database query"]),
            ("DOCUMENT", vec!["document", "doc", "file", "article", "paper", "manual"]),
            ("EMAIL", vec!["email", "e-mail", "inbox message"]),
            ("REPORT", vec!["report", "findings", "assessment"]),
            ("TICKET", vec!["ticket", "support ticket", "support case"]),
            (
                "TRANSCRIPT",
                vec!["transcript", "conversation", "dialogue", "chat history", "chat log"],
            ),
            ("CALL", vec!["call", "phone call"]),
            ("COMPLAINT", vec!["complaint", "grievance"]),
            ("FEEDBACK", vec!["feedback", "review comment"]),
            ("SUMMARY", vec!["summary", "overview"]),
            ("PLAN", vec!["plan", "roadmap"]),
            ("ITEMS", vec!["items", "things", "elements", "options", "choices"]),
            ("CONCEPT", vec!["concept", "idea", "notion", "principle", "theory"]),
            ("PROCEDURE", vec!["procedure", "process", "steps", "technique", "workflow"]),
            ("FACT", vec!["fact", "facts", "information", "details"]),
            ("RESULT", vec!["result", "outcome"]),
            ("ANSWER", vec!["answer", "solution"]),
            ("CONTENT", vec!["content", "copy", "text"]),
        ],
        noise_verbs: vec![
            "be", "have", "do", "get", "go", "come", "take", "put", "want", "need", "like",
            "know", "think", "see", "say", "keep", "let", "seem", "start", "begin", "become",
            "remain", "continue", "follow", "base", "give", "show", "help", "work", "call",
        ],
        context_filters: vec![
            ("give", vec!["given", "giving that"]),
            ("follow", vec!["following", "as follows"]),
            ("base", vec!["based on"]),
            ("apply", vec!["applicable", "applies to"]),
        ],
        extract_fields: vec![
            "ISSUE", "SENTIMENT", "ACTIONS", "NEXT_STEPS", "URGENCY", "PRIORITY", "NAMES",
            "DATES", "AMOUNTS", "EMAILS", "PHONES", "ADDRESSES", "BUGS", "SECURITY",
            "PERFORMANCE", "STYLE", "ERRORS", "WARNINGS", "KEYWORDS", "TOPICS", "ENTITIES",
            "FACTS", "DECISIONS", "DEADLINES", "REQUIREMENTS", "FEATURES", "PROBLEMS",
            "SOLUTIONS", "RISKS", "METRICS", "SCORES", "RATINGS", "FEEDBACK", "COMPLAINTS",
            "OWNERS", "PARTICIPANTS", "TIMESTAMPS", "DURATIONS", "QUANTITIES", "CATEGORIES",
            "TAGS", "LABELS", "STATUS", "TYPE",
        ],
        imperative_patterns: vec![
            ImperativePattern {
                triggers: vec!["list", "enumerate", "itemize"],
                req_family: "GENERATE",
                target: "ITEMS",
            },
            ImperativePattern {
                triggers: vec!["name", "identify"],
                req_family: "GENERATE",
                target: "ITEMS",
            },
            ImperativePattern {
                triggers: vec!["give", "provide", "suggest", "offer"],
                req_family: "GENERATE",
                target: "ITEMS",
            },
            ImperativePattern {
                triggers: vec!["tell", "explain", "describe", "clarify", "illustrate"],
                req_family: "EXPLAIN",
                target: "CONCEPT",
            },
        ],
        question_words: vec![
            "what", "who", "where", "when", "why", "how", "which", "whose", "whom",
        ],
        demonstratives: vec!["this", "that", "these", "those"],
        pronouns: vec!["i", "we", "you", "they", "he", "she", "it"],
        modals: vec![
            "should", "could", "would", "can", "may", "might", "must", "will", "shall",
        ],
        action_verbs: vec![
            "reduce", "increase", "improve", "explain", "describe", "write", "create",
            "generate", "analyze", "summarize",
        ],
        stopwords: vec![
            "the", "a", "an", "this", "that", "these", "those", "it", "i", "you", "we",
            "they", "me", "my", "your",
        ],
        code_indicators: vec![
            "code", "script", "function", "program", "class", "method", "api",
            "application", "software",
        ],
        quantifier_words: vec!["all", "every", "each", "entire", "complete", "whole"],
        meeting_words: vec!["meeting", "conference", "standup", "session"],
        proposal_words: vec!["proposal", "proposition"],
        compound_phrases: vec![
            ("support ticket", "TICKET"),
            ("customer support ticket", "TICKET"),
            ("email message", "EMAIL"),
            ("chat transcript", "TRANSCRIPT"),
            ("call transcript", "TRANSCRIPT"),
            ("phone call", "CALL"),
            ("source code", "CODE"),
            ("business plan", "PLAN"),
            ("sales report", "REPORT"),
        ],
        domain_candidates: vec![
            ("CODE", vec!["bug", "error", "security", "performance"]),
            (
                "ENTITIES",
                vec!["names", "dates", "amounts", "addresses", "emails", "phones"],
            ),
            (
                "QA",
                vec![
                    "verification", "policy", "soft skills", "accuracy", "compliance",
                    "disclosures",
                ],
            ),
            (
                "SUPPORT",
                vec![
                    "issue", "problem", "sentiment", "urgency", "ticket", "case", "customer",
                    "support", "call", "complaint", "agent", "caller", "chat", "inquiry",
                    "troubleshooting",
                ],
            ),
            (
                "TECHNICAL",
                vec![
                    "error", "bug", "stacktrace", "exception", "api", "server", "log",
                    "debug", "trace", "crash", "deployment", "backend",
                ],
            ),
            (
                "DOCUMENT",
                vec![
                    "document", "article", "manual", "guide", "doc", "transcript", "notes",
                    "instructions",
                ],
            ),
            (
                "BUSINESS",
                vec![
                    "report", "briefing", "executive", "management", "dashboard", "kpi",
                    "roi", "funnel", "quarterly", "presentation",
                ],
            ),
            (
                "LEGAL",
                vec![
                    "contract", "policy", "compliance", "gdpr", "clause", "lawyer",
                    "agreement", "terms", "privacy",
                ],
            ),
            (
                "FINANCE",
                vec![
                    "invoice", "billing", "payment", "transaction", "refund", "expense",
                    "balance", "statement",
                ],
            ),
            (
                "SECURITY",
                vec![
                    "breach", "risk", "threat", "alert", "malware", "phishing",
                    "permissions", "access control", "vulnerability",
                ],
            ),
            (
                "MEDICAL",
                vec![
                    "patient", "diagnosis", "prescription", "clinical", "symptoms",
                    "treatment",
                ],
            ),
            (
                "SALES",
                vec!["lead", "crm", "opportunity", "pipeline", "prospect", "deal", "quote"],
            ),
            (
                "EDUCATION",
                vec!["lesson", "curriculum", "teacher", "student", "course", "learning"],
            ),
        ],
        domains_priority: vec![
            "SUPPORT", "TECHNICAL", "FINANCE", "SECURITY", "LEGAL", "BUSINESS", "DOCUMENT",
            "SALES", "EDUCATION", "MEDICAL",
        ],
        technical_lemmas: vec!["debug", "deploy", "refactor", "compile", "crash"],
        finance_lemmas: vec!["invoice", "bill", "refund", "charge", "pay"],
        support_lemmas: vec!["escalate", "troubleshoot", "resolve", "assist"],
        epistemic: EpistemicKeywords {
            future: vec![
                "will", "tomorrow", "next week", "next month", "next year", "upcoming",
                "future", "later",
            ],
            uncertainty: vec![
                "probability", "odds", "chance", "likelihood", "likely", "unlikely",
                "uncertain",
            ],
            real_world: vec![
                "weather", "market", "election", "game", "match", "stock", "economy",
                "sports", "rain", "team",
            ],
        },
        concept_phrases: vec!["concept of", "idea of", "notion of", "principle of"],
        technical_concepts: vec![
            "recursion", "polymorphism", "inheritance", "encapsulation", "abstraction",
            "machine learning", "neural network", "blockchain", "microservices",
            "dependency injection", "garbage collection", "concurrency", "multithreading",
            "rest api", "oauth", "object-oriented programming", "functional programming",
            "binary search", "hash table",
            // Support-analytics vocabulary
            "churn rate", "first call resolution", "average handle time",
            "customer lifetime value", "service level agreement", "escalation matrix",
        ],
        modifiers: vec![
            ModifierSet {
                family: "ANALYZE",
                modifiers: vec![
                    ("DEEP", vec!["deep", "thorough", "comprehensive", "detailed"]),
                    ("QUICK", vec!["quick", "brief", "rapid", "fast"]),
                    ("SURFACE", vec!["surface", "high-level", "overview"]),
                ],
            },
            ModifierSet {
                family: "SUMMARIZE",
                modifiers: vec![
                    ("BRIEF", vec!["brief", "short", "quick", "concise"]),
                    ("DETAILED", vec!["detailed", "comprehensive", "thorough"]),
                ],
            },
            ModifierSet {
                family: "EXPLAIN",
                modifiers: vec![
                    ("SIMPLE", vec!["simple", "basic", "easy"]),
                    ("TECHNICAL", vec!["technical", "in-depth"]),
                    ("DEEP", vec!["deep", "thorough", "comprehensive"]),
                ],
            },
            ModifierSet {
                family: "GENERATE",
                modifiers: vec![
                    ("CREATIVE", vec!["creative", "original", "unique"]),
                    ("FORMAL", vec!["formal", "professional"]),
                ],
            },
        ],
        rank_triggers: vec![
            "rank", "sort", "order", "order by", "sort by", "prioritize", "top", "bottom",
            "highest", "lowest", "best", "worst",
        ],
        spec_keywords: vec![
            ("BETTING_ODDS", vec!["odds", "betting", "bookmaker"]),
            ("FORECAST", vec!["forecast", "projection"]),
            ("SUMMARY", vec!["summary", "recap", "overview"]),
            ("REPORT", vec!["report", "analysis document"]),
            ("SUPPORT_RESPONSE", vec!["support", "ticket", "issue", "incident"]),
            (
                "TROUBLESHOOTING_GUIDE",
                vec!["troubleshoot", "troubleshooting", "steps"],
            ),
        ],
    }
}
