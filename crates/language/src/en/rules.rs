//! English pattern rules

use clm_core::Aspect;

use crate::rules::{DurationUnit, RuleSet};

pub fn rules() -> RuleSet {
    RuleSet {
        comparison_map: vec![
            (r"\bdifferences?\b", "DIFFERENCES"),
            (r"\bdistinguish\b", "DIFFERENCES"),
            (r"\bcontrast\b", "DIFFERENCES"),
            (r"\bsimilarit(?:y|ies)\b", "SIMILARITIES"),
            (r"\bin common\b", "SIMILARITIES"),
            (r"\bpros\s*(?:and|&)?\s*cons\b", "PROS_CONS"),
            (r"\badvantages\s*(?:and|&)?\s*disadvantages\b", "PROS_CONS"),
            (r"\bbenefits\s*(?:and|&)?\s*drawbacks\b", "PROS_CONS"),
            (r"\btrade-?offs?\b", "TRADEOFFS"),
        ],
        domain_regex: vec![
            (r"\b(call|ticket|case|customer|support|complaint|helpdesk)\b", "SUPPORT"),
            (r"\b(error|bug|crash|stacktrace|api|debug|server|exception)\b", "TECHNICAL"),
            (r"\b(document|article|manual|transcript|guide)\b", "DOCUMENT"),
            (r"\b(report|executive|analysis|kpi|dashboard)\b", "BUSINESS"),
            (r"\b(contract|policy|compliance|clause|gdpr)\b", "LEGAL"),
            (r"\b(invoice|billing|payment|refund|transaction)\b", "FINANCE"),
            (r"\b(breach|threat|risk|malware|audit|vulnerability)\b", "SECURITY"),
            (r"\b(patient|clinical|diagnosis|treatment)\b", "MEDICAL"),
            (r"\b(lead|crm|opportunity|prospect)\b", "SALES"),
            (r"\b(lesson|teacher|student|curriculum)\b", "EDUCATION"),
        ],
        duration_patterns: vec![
            (r"(\d+)[\s-]*(?:minute|min)s?", DurationUnit::Minutes),
            (r"(\d+)[\s-]*(?:hour|hr)s?", DurationUnit::Hours),
        ],
        standard_field_keywords: vec![
            (r"\bissues?\b", "ISSUE"),
            (r"\bproblems?\b", "PROBLEM"),
            (r"\berrors?\b", "ERROR"),
            (r"\bbugs?\b", "BUG"),
            (r"\bnames?\b", "NAMES"),
            (r"\bdates?\b", "DATES"),
            (r"\bamounts?\b", "AMOUNTS"),
            (r"\bemails?\b", "EMAILS"),
            (r"\bphones?\b", "PHONES"),
            (r"\baddress(?:es)?\b", "ADDRESSES"),
            (r"\bsentiment\b", "SENTIMENT"),
            (r"\burgency\b", "URGENCY"),
            (r"\bpriority\b", "PRIORITY"),
            (r"\bcategor(?:y|ies)\b", "CATEGORY"),
            (r"\baction items?\b", "ACTIONS"),
            (r"\bactions?\b", "ACTIONS"),
            (r"\bnext steps?\b", "NEXT_STEPS"),
            (r"\bdeadlines?\b", "DEADLINES"),
            (r"\bsecurity\b", "SECURITY"),
            (r"\bperformance\b", "PERFORMANCE"),
        ],
        audience_map: vec![
            (r"\bnon[- ]?technical\b", "NON_TECHNICAL"),
            (r"\b(beginners?|children|kids|newcomers|general audience)\b", "BEGINNER"),
            (r"\b(experts?|advanced|specialists?|professionals)\b", "EXPERT"),
            (r"\btechnical\b", "TECHNICAL"),
            (r"\b(business|executives?|management|leadership)\b", "BUSINESS"),
        ],
        length_map: vec![
            (r"\b(brief|short|concise|quick)\b", "BRIEF"),
            (r"\b(detailed|comprehensive|exhaustive|in-depth|thorough)\b", "DETAILED"),
        ],
        style_map: vec![
            (r"\b(simple|easy|plain)\b", "SIMPLE"),
            (r"\b(formal|business-like|professional)\b", "FORMAL"),
        ],
        tone_map: vec![
            (r"\bprofessional\b", "PROFESSIONAL"),
            (r"\bformal\b", "PROFESSIONAL"),
            (r"\bbusinesslike\b", "PROFESSIONAL"),
            (r"\bcasual\b", "CASUAL"),
            (r"\binformal\b", "CASUAL"),
            (r"\bfriendly\b", "CASUAL"),
            (r"\bempathetic\b", "EMPATHETIC"),
            (r"\bcompassionate\b", "EMPATHETIC"),
            (r"\bunderstanding tone\b", "EMPATHETIC"),
        ],
        number_words: vec![
            ("one", 1),
            ("two", 2),
            ("couple", 2),
            ("three", 3),
            ("four", 4),
            ("five", 5),
            ("six", 6),
            ("seven", 7),
            ("eight", 8),
            ("nine", 9),
            ("ten", 10),
            ("few", -1),
            ("several", -2),
            ("many", -3),
        ],
        spec_patterns: vec![
            (r"(\d+)\s*lines?\b", "LINES"),
            (r"(\d+)\s*words?\b", "WORDS"),
            (r"(\d+)\s*(?:items?|things?|elements?)\b", "ITEMS"),
            (r"(\d+)\s*(?:tips?|suggestions?)\b", "COUNT"),
            (r"(\d+)\s*(?:examples?|instances?)\b", "COUNT"),
            (r"(\d+)\s*(?:steps?|stages?)\b", "STEPS"),
            (r"(\d+)\s*(?:ways?|methods?)\b", "COUNT"),
        ],
        programming_language_patterns: vec![
            (r"\bpython\b", "PYTHON"),
            (r"\bdjango\b", "PYTHON"),
            (r"\bflask\b", "PYTHON"),
            (r"\bpandas\b", "PYTHON"),
            (r"\b\.py\b", "PYTHON"),
            (r"\bjavascript\b", "JAVASCRIPT"),
            (r"\bnode\.?js\b", "JAVASCRIPT"),
            (r"\breact\b", "JAVASCRIPT"),
            (r"\bvue\b", "JAVASCRIPT"),
            (r"\bangular\b", "JAVASCRIPT"),
            (r"\b\.js\b", "JAVASCRIPT"),
            (r"\btypescript\b", "TYPESCRIPT"),
            (r"\b\.ts\b", "TYPESCRIPT"),
            (r"\bjava\b(?:[^s]|$)", "JAVA"),
            (r"\bspring\b", "JAVA"),
            (r"\bmaven\b", "JAVA"),
            (r"\bc\+\+", "CPP"),
            (r"\bcpp\b", "CPP"),
            (r"\bgolang\b", "GO"),
            (r"\bgo\s+(?:code|program|script)", "GO"),
            (r"\brust\b", "RUST"),
            (r"\bsql\b", "SQL"),
        ],
        extraction_indicators: vec![
            r"\bextract\b",
            r"\bidentify\b",
            r"\bfind\b",
            r"\bretrieve\b",
            r"\bpull out\b",
            r"\bhighlight\b",
            r"\blist\b",
            r"\bwhat are\b",
            r"\bwhich are\b",
        ],
        qa_criteria: vec![
            (r"\b(?:verification|verify|verified)\b", "VERIFICATION"),
            (r"\b(?:policy adherence|policy|policies)\b", "POLICY"),
            (r"\b(?:soft skills|empathy|clarity|ownership)\b", "SOFT_SKILLS"),
            (r"\b(?:accuracy|accurate)\b", "ACCURACY"),
            (r"\b(?:compliance|compliant|violations?)\b", "COMPLIANCE"),
            (r"\b(?:sentiment|emotion|mood)\b", "SENTIMENT"),
            (r"\bdisclosures?\b", "DISCLOSURES"),
        ],
        qa_indicators: vec![
            r"\bscore\b",
            r"\bscoring\b",
            r"\bqa\b",
            r"\bquality assurance\b",
            r"\bcompliance\b",
            r"\baudit\b",
        ],
        question_patterns: vec![
            (r"what (?:is|are|does) (?:the |a |an )?([\w\s-]+?)(?:\?|$)", 1),
            (r"how (?:does|do|can) ([\w\s-]+?)(?:\s+work|\?|$)", 1),
            (r"why (?:is|are|do|does) ([\w\s-]+?)(?:\?|$)", 1),
            (r"where (?:is|are|can) ([\w\s-]+?)(?:\?|$)", 1),
            (r"when (?:is|was|will) ([\w\s-]+?)(?:\?|$)", 1),
            (r"who (?:is|are|was|were) (?:the )?([\w\s-]+?)(?:\?|$)", 1),
        ],
        explain_patterns: vec![
            (r"(?:explain|describe) how ([\w\s-]+?)(?:\s+works?|$)", 1),
            (
                r"(?:explain|describe|clarify|define) (?:the |a |an )?([\w\s-]+?)(?:\s+in\b|\s+with\b|\s+for\b|\s+to\b|\.|\?|$)",
                1,
            ),
            (r"(?:tell me|talk) about ([\w\s-]+?)(?:\s+in\b|\s+with\b|\.|\?|$)", 1),
        ],
        concept_pattern: (
            r"(?:concept|idea|notion|principle|theory) of ([\w\s-]+?)(?:\s+in\b|\.|\?|$)",
            1,
        ),
        procedure_pattern: (r"how (?:to|do i|can i) ([\w\s-]+?)(?:\s+in\b|\s+with\b|\.|\?|$)", 1),
        cleanup_tail: r"\s+(?:of|in|for|with|about|from|to|at|by|detail|details|technical|specific)$",
        subject_patterns: vec![
            (r"\bverbs?\b", "VERB"),
            (r"\bnouns?\b", "NOUN"),
            (r"\badjectives?\b", "ADJECTIVE"),
            (r"\badverbs?\b", "ADVERB"),
            (r"\bpronouns?\b", "PRONOUN"),
            (r"\btips?\b", "TIP"),
            (r"\bsuggestions?\b", "TIP"),
            (r"\bmethods?\b", "METHOD"),
            (r"\btechniques?\b", "TECHNIQUE"),
            (r"\bstrateg(?:y|ies)\b", "STRATEGY"),
            (r"\bapproach(?:es)?\b", "APPROACH"),
            (r"\bpractices?\b", "PRACTICE"),
            (r"\balgorithms?\b", "ALGORITHM"),
            (r"\bfunctions?\b", "FUNCTION"),
            (r"\bformulas?\b", "FORMULA"),
            (r"\bequations?\b", "EQUATION"),
            (r"\btheorems?\b", "THEOREM"),
            (r"\bexamples?\b", "EXAMPLE"),
            (r"\bideas?\b", "IDEA"),
            (r"\bways?\b", "METHOD"),
            (r"\bsteps?\b", "STEP"),
            (r"\bfactors?\b", "FACTOR"),
            (r"\breasons?\b", "REASON"),
            (r"\bbenefits?\b", "BENEFIT"),
            (r"\badvantages?\b", "ADVANTAGE"),
            (r"\bdisadvantages?\b", "DISADVANTAGE"),
            (r"\bfeatures?\b", "FEATURE"),
            (r"\bmetrics?\b", "METRIC"),
            (r"\bindicators?\b", "INDICATOR"),
            (r"\binsights?\b", "INSIGHT"),
            (r"\bfindings?\b", "FINDING"),
        ],
        type_map: vec![
            ("phone call", "CALL"),
            ("call", "CALL"),
            ("meeting", "MEETING"),
            ("chat", "CHAT"),
            ("conversation", "CONVERSATION"),
            ("report", "REPORT"),
            ("article", "ARTICLE"),
        ],
        context_map: vec![
            ("customer", "CUSTOMER"),
            ("support", "SUPPORT"),
            ("sales", "SALES"),
            ("technical", "TECHNICAL"),
        ],
        issue_patterns: vec![
            r"about\s+([\w\s-]+?)(?:\s+and\b|\.|$)",
            r"regarding\s+([\w\s-]+?)(?:\s+and\b|\.|$)",
            r"concerning\s+([\w\s-]+?)(?:\s+and\b|\.|$)",
            r"related to\s+([\w\s-]+?)(?:\s+and\b|\.|$)",
        ],
        ctx_patterns: vec![
            (
                Aspect::Language,
                vec![
                    (r"\benglish\b", "ENGLISH"),
                    (r"\bspanish\b", "SPANISH"),
                    (r"\bfrench\b", "FRENCH"),
                    (r"\bgerman\b", "GERMAN"),
                    (r"\bchinese\b", "CHINESE"),
                    (r"\bjapanese\b", "JAPANESE"),
                ],
            ),
            (
                Aspect::Region,
                vec![
                    (r"\b(us|usa|american)\b", "US"),
                    (r"\b(uk|british|england)\b", "UK"),
                    (r"\b(europe|eu)\b", "EU"),
                    (r"\b(apac|asia pacific)\b", "APAC"),
                    (r"\b(canada|canadian)\b", "CA"),
                ],
            ),
            (
                Aspect::Priority,
                vec![
                    (r"\burgent\b", "URGENT"),
                    (r"\basap\b", "URGENT"),
                    (r"\bimmediately\b", "URGENT"),
                    (r"\bhigh priority\b", "HIGH_PRIORITY"),
                ],
            ),
            (
                Aspect::Sla,
                vec![
                    (r"\bwithin\s+\d+\s*(?:hours|hrs|h)\b", "SLA_HOURS"),
                    (r"\brespond by\b", "SLA_DEADLINE"),
                ],
            ),
            (
                Aspect::Format,
                vec![
                    (r"\bbullets?\b", "BULLET_POINTS"),
                    (r"\bbullet points?\b", "BULLET_POINTS"),
                    (r"\bnumbered\b", "NUMBERED_LIST"),
                    (r"\btable\b", "TABLE"),
                    (r"\bparagraphs?\b", "PARAGRAPH"),
                ],
            ),
        ],
    }
}
