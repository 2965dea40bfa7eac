//! Curated, read-only phrase and domain tables.
//!
//! All entries are lower-case; matching is plain substring containment against
//! lower-cased input.

/// Suspicious phrases scanned by the lexical detector, in canonical order.
pub const SUSPICIOUS_PHRASES: &[&str] = &[
    // Financial scams
    "free money",
    "win cash",
    "guaranteed income",
    "no investment required",
    "get rich quick",
    "earn $1000 daily",
    "work from home scam",
    // Health scams
    "miracle cure",
    "doctors hate",
    "one weird trick",
    "lose weight fast",
    "cure all diseases",
    "secret remedy",
    "pharmaceutical companies hide",
    // Clickbait
    "click here",
    "you won't believe",
    "shocking truth",
    "they don't want you to know",
    "secret government",
    "breaking: you won't believe",
    "viral",
    "share before deleted",
    "this will shock you",
    "number one trick",
    "instant results",
    // Urgency and manipulation
    "urgent",
    "act now",
    "limited time",
    "exclusive offer",
    "no questions asked",
    "guaranteed",
    "100% proven",
    "scientifically proven (without citation)",
    // Conspiracy
    "mainstream media lies",
    "cover-up",
    "hidden truth",
    "they're hiding",
    "wake up",
    "sheeple",
    "deep state",
    "illuminati",
    // Emotional manipulation
    "outrageous",
    "disgusting",
    "you'll be shocked",
    "prepare to be amazed",
    "mind-blowing",
    "unbelievable",
    "incredible discovery",
];

pub const TRUSTED_DOMAINS: &[&str] = &[
    "bbc.com",
    "reuters.com",
    "ap.org",
    "apnews.com",
    "nytimes.com",
    "theguardian.com",
    "washingtonpost.com",
    "wsj.com",
    "cnn.com",
    "npr.org",
    "economist.com",
    "bloomberg.com",
    "ft.com",
    "usatoday.com",
    "abcnews.go.com",
    "cbsnews.com",
    "nbcnews.com",
    "abc.net.au",
    "theage.com.au",
    "smh.com.au",
    "independent.co.uk",
    "telegraph.co.uk",
    "thetimes.co.uk",
    "scmp.com",
    "straitstimes.com",
];

pub const UNTRUSTED_DOMAINS: &[&str] = &[
    "fake-news.com",
    "hoax-site.com",
    "clickbait-news.com",
    "conspiracy-theory.com",
    "satire-news.com",
];

/// Host substrings that earn a finding (but no tier change) for unlisted domains.
pub const SUSPICIOUS_HOST_PATTERNS: &[&str] = &["free", "click", "win", "prize", "lottery"];

/// Phrases that mark a checkable factual claim.
pub const CLAIM_PHRASES: &[&str] = &[
    "study shows",
    "research proves",
    "scientists say",
    "according to",
    "official data",
    "statistics show",
];

/// Known fake-narrative fragments for the similarity matcher.
pub const KNOWN_FAKE_PATTERNS: &[&str] = &[
    "covid vaccine causes",
    "5g causes",
    "flat earth",
    "moon landing fake",
    "chemtrails",
    "illuminati controls",
];
