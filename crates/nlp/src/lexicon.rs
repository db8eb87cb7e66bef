//! Word lists backing the rule-based tagger

/// Base-form verbs. Inflected forms are resolved through the lemmatizer
/// before lookup.
pub const VERBS: &[&str] = &[
    "analyze", "review", "examine", "evaluate", "inspect", "audit", "investigate", "assess",
    "extract", "pull", "identify", "find", "locate", "retrieve", "return", "select", "fetch",
    "generate", "create", "write", "draft", "compose", "produce", "build", "develop", "design",
    "make", "suggest", "name", "propose", "formulate", "summarize", "condense", "synthesize",
    "recap", "abbreviate", "transform", "convert", "change", "rewrite", "translate", "modify",
    "adapt", "adjust", "rephrase", "paraphrase", "edit", "replace", "remove", "explain",
    "describe", "clarify", "elaborate", "detail", "illustrate", "define", "discuss", "tell",
    "compare", "contrast", "differentiate", "distinguish", "classify", "categorize", "group",
    "label", "organize", "sort", "segment", "debug", "diagnose", "troubleshoot", "fix",
    "resolve", "optimize", "improve", "enhance", "refactor", "simplify", "streamline",
    "validate", "verify", "confirm", "test", "ensure", "certify", "guarantee", "search",
    "look", "discover", "query", "rank", "prioritize", "order", "score", "rate", "predict",
    "forecast", "estimate", "anticipate", "project", "extrapolate", "format", "structure",
    "arrange", "calculate", "compute", "determine", "quantify", "count", "measure", "total",
    "list", "enumerate", "itemize", "outline", "use", "apply", "implement", "execute", "run",
    "perform", "give", "provide", "show", "display", "highlight", "keep", "need", "want",
    "help", "work", "send", "get", "go", "come", "take", "put", "check", "call", "process",
    "schedule", "escalate", "refund", "credit", "transfer", "cancel", "upgrade", "downgrade",
    "reset", "restart", "reboot", "waive", "issue", "recommend", "choose", "include",
    "contain", "mention", "charge", "bill",
];

pub const DETERMINERS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "some", "any", "each", "every", "no",
    "all", "both", "either", "neither",
];

pub const PRONOUNS: &[&str] = &[
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them", "my", "your",
    "his", "its", "our", "their", "mine", "yours", "myself", "yourself", "who", "whom", "whose",
    "which", "what", "something", "anything", "everything", "nothing",
];

pub const PREPOSITIONS: &[&str] = &[
    "in", "on", "at", "for", "with", "from", "to", "of", "by", "about", "over", "under",
    "between", "into", "through", "during", "before", "after", "above", "below", "against",
    "within", "without", "per", "via", "as",
];

pub const AUXILIARIES: &[&str] = &[
    "be", "is", "are", "was", "were", "been", "being", "am", "do", "does", "did", "have", "has",
    "had", "having", "can", "could", "should", "would", "will", "shall", "may", "might", "must",
    "ought",
];

pub const CONJUNCTIONS: &[&str] = &["and", "or", "but", "nor", "so", "yet", "if", "because",
    "while", "when", "where", "how", "why", "whether", "than", "then", "please"];

pub const ADVERBS: &[&str] = &[
    "very", "really", "quite", "too", "also", "just", "only", "not", "never", "always",
    "often", "sometimes", "now", "here", "there", "again", "still", "already", "soon",
    "twice", "once", "daily", "weekly",
];

pub const ADJECTIVES: &[&str] = &[
    "good", "bad", "new", "old", "big", "small", "long", "short", "brief", "quick", "slow",
    "fast", "high", "low", "deep", "simple", "easy", "hard", "technical", "detailed",
    "comprehensive", "thorough", "concise", "formal", "casual", "professional", "creative",
    "original", "unique", "main", "key", "best", "worst", "top", "bottom", "urgent",
    "critical", "severe", "minor", "major", "basic", "advanced", "premium", "unexpected",
    "incorrect", "wrong", "duplicate", "disputed", "frustrated", "angry", "happy",
    "satisfied", "sorry", "intermittent",
];

/// Irregular lemma lookups applied before the suffix rules.
pub const IRREGULAR_LEMMAS: &[(&str, &str)] = &[
    ("is", "be"),
    ("are", "be"),
    ("was", "be"),
    ("were", "be"),
    ("been", "be"),
    ("being", "be"),
    ("am", "be"),
    ("has", "have"),
    ("had", "have"),
    ("having", "have"),
    ("does", "do"),
    ("did", "do"),
    ("done", "do"),
    ("said", "say"),
    ("found", "find"),
    ("gave", "give"),
    ("given", "give"),
    ("took", "take"),
    ("taken", "take"),
    ("made", "make"),
    ("wrote", "write"),
    ("written", "write"),
    ("ran", "run"),
    ("went", "go"),
    ("gone", "go"),
    ("came", "come"),
    ("got", "get"),
    ("gotten", "get"),
    ("sent", "send"),
    ("kept", "keep"),
    ("chose", "choose"),
    ("chosen", "choose"),
    ("showed", "show"),
    ("shown", "show"),
    ("told", "tell"),
    ("men", "man"),
    ("women", "woman"),
    ("people", "person"),
    ("children", "child"),
];
