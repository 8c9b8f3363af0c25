//! Immutable keyword tables driving category detection, query expansion,
//! and the hash-embedding domain weights.
//!
//! All tables are static configuration, loaded once and never mutated, so
//! the scoring and detection algorithms stay testable independent of the
//! taxonomy's size. Category order matters: detection takes the first
//! matching entry, so more specific categories must precede broader ones.

use once_cell::sync::Lazy;
use regex::Regex;

/// One category in the detection table.
pub struct Category {
    /// Stable key returned by category detection.
    pub key: &'static str,
    /// Labels a candidate may carry in its own `category` field to pass the
    /// category gate.
    pub labels: &'static [&'static str],
    /// Keywords that mark a query or a candidate text as belonging here.
    pub keywords: &'static [&'static str],
    /// Tokens that hard-exclude a candidate even if it matched a keyword.
    pub exclusions: &'static [&'static str],
}

/// Ordered category table. First match wins during detection — ambiguous
/// queries are decided by table order, a documented limitation.
pub static CATEGORIES: &[Category] = &[
    Category {
        key: "banking",
        labels: &["fintech", "banking", "finance", "insurtech", "payments"],
        keywords: &[
            "bank", "banking", "finance", "financial", "fintech", "payment",
            "payments", "lending", "loan", "loans", "credit", "invest",
            "investment", "investing", "insurance", "wallet", "remittance",
            "savings", "budgeting", "trading", "crypto", "currency",
        ],
        exclusions: &["farm", "farming", "crop", "harvest", "mobility", "scooter"],
    },
    Category {
        key: "farming",
        labels: &["agritech", "farming", "agriculture", "foodtech"],
        keywords: &[
            "farm", "farming", "agriculture", "agricultural", "crop", "crops",
            "harvest", "soil", "irrigation", "livestock", "organic", "seed",
            "seeds", "greenhouse", "agronomy", "yield",
        ],
        exclusions: &["bank", "banking", "fintech", "gaming"],
    },
    Category {
        key: "health",
        labels: &["healthtech", "health", "medtech", "biotech", "telemedicine"],
        keywords: &[
            "health", "healthcare", "medical", "medicine", "clinic", "clinical",
            "patient", "patients", "doctor", "doctors", "hospital", "diagnosis",
            "diagnostic", "therapy", "pharma", "telehealth", "telemedicine",
            "wellness", "mental",
        ],
        exclusions: &["gaming", "esports"],
    },
    Category {
        key: "fitness",
        labels: &["fitness", "sporttech", "wellness"],
        keywords: &[
            "fitness", "workout", "workouts", "gym", "exercise", "training",
            "yoga", "running", "athlete", "athletes", "sport", "sports",
            "nutrition", "coaching",
        ],
        exclusions: &[],
    },
    Category {
        key: "education",
        labels: &["edtech", "education", "learning"],
        keywords: &[
            "education", "educational", "learning", "school", "schools",
            "student", "students", "teacher", "teachers", "course", "courses",
            "tutoring", "curriculum", "classroom", "university", "studying",
        ],
        exclusions: &[],
    },
    Category {
        key: "design",
        labels: &["design", "creative", "designtech"],
        keywords: &[
            "design", "designer", "designers", "creative", "branding", "logo",
            "typography", "illustration", "prototyping", "mockup", "figma",
        ],
        exclusions: &[],
    },
    Category {
        key: "gaming",
        labels: &["gaming", "games", "esports"],
        keywords: &[
            "game", "games", "gaming", "gamer", "gamers", "esports",
            "multiplayer", "console", "arcade", "streamer", "twitch",
        ],
        exclusions: &["health", "medical"],
    },
    Category {
        key: "ecommerce",
        labels: &["ecommerce", "retail", "marketplace", "commerce"],
        keywords: &[
            "ecommerce", "commerce", "shop", "shopping", "store", "retail",
            "marketplace", "checkout", "merchant", "merchants", "storefront",
            "dropshipping", "fulfillment",
        ],
        exclusions: &[],
    },
    Category {
        key: "social",
        labels: &["social", "community", "media"],
        keywords: &[
            "social", "community", "communities", "network", "networking",
            "messaging", "chat", "creator", "creators", "influencer",
            "followers", "feed",
        ],
        exclusions: &[],
    },
    Category {
        key: "mobility",
        labels: &["mobility", "transport", "automotive", "logistics"],
        keywords: &[
            "mobility", "transport", "transportation", "ride", "rides",
            "scooter", "scooters", "bike", "bikes", "vehicle", "vehicles",
            "logistics", "delivery", "fleet", "shipping", "freight",
        ],
        exclusions: &["bank", "banking"],
    },
    Category {
        key: "travel",
        labels: &["travel", "traveltech", "hospitality"],
        keywords: &[
            "travel", "trip", "trips", "hotel", "hotels", "booking", "flight",
            "flights", "tourism", "vacation", "hospitality", "itinerary",
        ],
        exclusions: &[],
    },
    Category {
        key: "realestate",
        labels: &["proptech", "realestate", "housing"],
        keywords: &[
            "realestate", "property", "properties", "housing", "rent",
            "rental", "rentals", "mortgage", "landlord", "tenant", "tenants",
            "apartment", "apartments",
        ],
        exclusions: &[],
    },
    Category {
        key: "energy",
        labels: &["cleantech", "energy", "climatetech", "greentech"],
        keywords: &[
            "energy", "solar", "wind", "battery", "batteries", "renewable",
            "renewables", "carbon", "climate", "emissions", "grid",
            "sustainability", "sustainable",
        ],
        exclusions: &[],
    },
    Category {
        key: "security",
        labels: &["cybersecurity", "security", "privacy"],
        keywords: &[
            "security", "cybersecurity", "encryption", "privacy", "breach",
            "phishing", "malware", "firewall", "authentication", "compliance",
        ],
        exclusions: &[],
    },
    Category {
        key: "hr",
        labels: &["hrtech", "hr", "recruiting", "worktech"],
        keywords: &[
            "hiring", "recruiting", "recruitment", "payroll", "onboarding",
            "employee", "employees", "talent", "workforce", "resume",
        ],
        exclusions: &[],
    },
    Category {
        key: "food",
        labels: &["foodtech", "food", "restaurant"],
        keywords: &[
            "food", "restaurant", "restaurants", "meal", "meals", "recipe",
            "recipes", "grocery", "groceries", "kitchen", "chef", "dining",
        ],
        exclusions: &[],
    },
    Category {
        key: "legal",
        labels: &["legaltech", "legal", "law"],
        keywords: &[
            "legal", "law", "lawyer", "lawyers", "contract", "contracts",
            "litigation", "paralegal", "notary",
        ],
        exclusions: &[],
    },
];

/// Synonym expansions applied to query tokens and 2-word phrases.
pub static SYNONYMS: &[(&str, &[&str])] = &[
    ("ai", &["artificial intelligence", "machine learning", "automation"]),
    ("artificial intelligence", &["ai", "machine learning"]),
    ("ml", &["machine learning", "ai"]),
    ("machine learning", &["ai", "deep learning"]),
    ("crypto", &["cryptocurrency", "blockchain", "web3"]),
    ("blockchain", &["crypto", "web3", "ledger"]),
    ("fintech", &["finance", "banking", "payments"]),
    ("bank", &["banking", "finance", "fintech"]),
    ("banking", &["finance", "fintech", "payments"]),
    ("healthcare", &["health", "medical", "medicine"]),
    ("health", &["healthcare", "medical", "wellness"]),
    ("medical", &["healthcare", "medicine", "clinical"]),
    ("farming", &["agriculture", "agritech", "crops"]),
    ("agriculture", &["farming", "agritech", "crops"]),
    ("education", &["learning", "edtech", "teaching"]),
    ("learning", &["education", "training"]),
    ("ecommerce", &["online shopping", "retail", "marketplace"]),
    ("shopping", &["ecommerce", "retail", "commerce"]),
    ("delivery", &["logistics", "shipping", "courier"]),
    ("logistics", &["delivery", "shipping", "supply chain"]),
    ("saas", &["software", "subscription", "cloud"]),
    ("cloud", &["saas", "infrastructure", "hosting"]),
    ("green", &["sustainable", "climate", "renewable"]),
    ("sustainable", &["green", "climate", "renewable"]),
    ("remote", &["distributed", "virtual", "online"]),
    ("mobile", &["app", "smartphone", "ios", "android"]),
    ("app", &["mobile", "application", "platform"]),
    ("fitness", &["workout", "exercise", "wellness"]),
    ("gaming", &["games", "esports", "entertainment"]),
    ("security", &["cybersecurity", "privacy", "protection"]),
    ("travel", &["tourism", "trips", "booking"]),
    ("real estate", &["property", "housing", "proptech"]),
    ("food", &["restaurants", "meals", "foodtech"]),
    ("hiring", &["recruiting", "talent", "hr"]),
];

/// Stopwords stripped during preprocessing and token-overlap matching.
pub static STOPWORDS: &[&str] = &[
    "a", "an", "and", "any", "are", "as", "at", "be", "best", "but", "by",
    "can", "do", "does", "find", "for", "from", "get", "good", "has", "have",
    "how", "i", "in", "into", "is", "it", "its", "just", "like", "me", "my",
    "need", "new", "of", "on", "or", "our", "show", "some", "something",
    "startup", "startups", "that", "the", "their", "them", "there", "these",
    "they", "this", "to", "top", "up", "us", "want", "was", "we", "what",
    "which", "who", "will", "with", "would", "you", "your",
];

/// Filler phrases removed before tokenization.
pub static FILLER_PHRASES: &[&str] = &[
    "show me",
    "looking for",
    "i want",
    "i am looking for",
    "can you find",
    "search for",
    "find me",
];

/// Contraction expansions applied after lowercasing.
pub static CONTRACTIONS: &[(&str, &str)] = &[
    ("can't", "cannot"),
    ("won't", "will not"),
    ("don't", "do not"),
    ("doesn't", "does not"),
    ("didn't", "did not"),
    ("isn't", "is not"),
    ("aren't", "are not"),
    ("wasn't", "was not"),
    ("weren't", "were not"),
    ("haven't", "have not"),
    ("hasn't", "has not"),
    ("shouldn't", "should not"),
    ("couldn't", "could not"),
    ("wouldn't", "would not"),
    ("it's", "it is"),
    ("that's", "that is"),
    ("there's", "there is"),
    ("what's", "what is"),
    ("let's", "let us"),
    ("i'm", "i am"),
    ("i've", "i have"),
    ("i'll", "i will"),
    ("we're", "we are"),
    ("we've", "we have"),
    ("they're", "they are"),
    ("you're", "you are"),
];

/// Domain keyword multipliers for the hash embedding. A token found here has
/// its dimension contributions scaled, compensating for the non-learned
/// fallback's weak signal on domain terms.
pub static DOMAIN_WEIGHTS: &[(&str, f32)] = &[
    // finance
    ("bank", 5.0),
    ("banking", 5.0),
    ("fintech", 5.0),
    ("finance", 4.0),
    ("payment", 4.0),
    ("payments", 4.0),
    ("lending", 3.0),
    ("credit", 3.0),
    ("insurance", 3.0),
    ("invest", 3.0),
    ("investment", 3.0),
    ("crypto", 2.0),
    // agriculture
    ("farm", 5.0),
    ("farming", 5.0),
    ("agriculture", 5.0),
    ("crop", 4.0),
    ("crops", 4.0),
    ("soil", 3.0),
    ("harvest", 3.0),
    ("irrigation", 3.0),
    ("livestock", 2.0),
    // health
    ("health", 5.0),
    ("healthcare", 5.0),
    ("medical", 5.0),
    ("clinic", 4.0),
    ("patient", 4.0),
    ("doctor", 3.0),
    ("diagnosis", 3.0),
    ("therapy", 3.0),
    ("pharma", 2.0),
    // technology
    ("ai", 4.0),
    ("software", 3.0),
    ("platform", 2.0),
    ("automation", 3.0),
    ("robotics", 3.0),
    ("blockchain", 3.0),
    ("analytics", 2.0),
];

/// A broad semantic context detected over the whole text, mapped to a
/// reserved dimension range in the hash embedding.
pub struct SemanticContext {
    pub name: &'static str,
    pub pattern: &'static Lazy<Regex>,
    /// First reserved dimension.
    pub dim_start: usize,
    /// Number of reserved dimensions.
    pub dim_span: usize,
}

static FINANCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(bank|banking|fintech|finance|financial|payment|lending|insurance|invest)\w*\b")
        .expect("finance context regex")
});
static AGRICULTURE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(farm|agricultur|crop|soil|harvest|irrigat|livestock|agronom)\w*\b")
        .expect("agriculture context regex")
});
static HEALTH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(health|medic|clinic|patient|doctor|diagnos|therap|pharma|telehealth)\w*\b")
        .expect("health context regex")
});
static TECHNOLOGY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(software|saas|platform|automation|robotic|blockchain|cloud)\w*\b|\bai\b|machine learning|artificial intelligence",
    )
    .expect("technology context regex")
});

/// Context table for the hash embedding's reserved dimension ranges.
pub static SEMANTIC_CONTEXTS: &[SemanticContext] = &[
    SemanticContext {
        name: "finance",
        pattern: &FINANCE_RE,
        dim_start: 0,
        dim_span: 8,
    },
    SemanticContext {
        name: "agriculture",
        pattern: &AGRICULTURE_RE,
        dim_start: 8,
        dim_span: 8,
    },
    SemanticContext {
        name: "health",
        pattern: &HEALTH_RE,
        dim_start: 16,
        dim_span: 8,
    },
    SemanticContext {
        name: "technology",
        pattern: &TECHNOLOGY_RE,
        dim_start: 24,
        dim_span: 8,
    },
];

/// Business-model indicator phrases appended to embedding documents when the
/// record's text mentions the trigger.
pub static BUSINESS_MODELS: &[(&str, &str)] = &[
    ("subscription", "recurring subscription revenue model"),
    ("saas", "software as a service business"),
    ("marketplace", "two-sided marketplace business"),
    ("b2b", "business to business sales"),
    ("b2c", "consumer facing product"),
    ("freemium", "freemium monetization model"),
    ("advertising", "advertising supported business"),
    ("on-demand", "on demand service business"),
];

/// Look up a category by its stable key.
pub fn category_by_key(key: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.key == key)
}

/// Synonym list for a token or phrase, if any.
pub fn synonyms_for(term: &str) -> Option<&'static [&'static str]> {
    SYNONYMS
        .iter()
        .find(|(key, _)| *key == term)
        .map(|(_, expansions)| *expansions)
}

/// Multiplier for a domain keyword; 1.0 for everything else.
pub fn domain_weight(token: &str) -> f32 {
    DOMAIN_WEIGHTS
        .iter()
        .find(|(key, _)| *key == token)
        .map(|(_, w)| *w)
        .unwrap_or(1.0)
}

pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

/// Whole-word containment check (substring match would let "art" hit "startup").
pub fn contains_word(text: &str, word: &str) -> bool {
    text.split(|c: char| !c.is_alphanumeric())
        .any(|t| t == word)
}
