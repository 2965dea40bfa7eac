//! # Source Reliability
//!
//! Maps a URL's host to a trust tier.
//!
//! - Host is extracted with `url`, a leading `www.` is stripped, and it is lower-cased.
//! - Trusted list first (substring containment) → `high`, one finding, stop.
//! - Untrusted list next → `low`, one finding, stop.
//! - Otherwise `medium`, plus one finding per suspicious host substring.
//! - No URL, or a URL that does not parse → `medium` with no findings.

use serde::Serialize;
use url::Url;

use super::phrases::{SUSPICIOUS_HOST_PATTERNS, TRUSTED_DOMAINS, UNTRUSTED_DOMAINS};
use crate::decision::SourceTier;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceSignal {
    pub tier: SourceTier,
    pub findings: Vec<String>,
}

impl SourceSignal {
    fn neutral() -> Self {
        Self {
            tier: SourceTier::Medium,
            findings: Vec::new(),
        }
    }
}

/// Domain tables used by the classifier. `Default` uses the built-in lists.
#[derive(Debug, Clone, Copy)]
pub struct DomainLists {
    pub trusted: &'static [&'static str],
    pub untrusted: &'static [&'static str],
    pub suspicious: &'static [&'static str],
}

impl Default for DomainLists {
    fn default() -> Self {
        Self {
            trusted: TRUSTED_DOMAINS,
            untrusted: UNTRUSTED_DOMAINS,
            suspicious: SUSPICIOUS_HOST_PATTERNS,
        }
    }
}

pub fn classify_source(url: Option<&str>, lists: &DomainLists) -> SourceSignal {
    let Some(raw) = url.map(str::trim).filter(|u| !u.is_empty()) else {
        return SourceSignal::neutral();
    };
    let Some(host) = normalized_host(raw) else {
        return SourceSignal::neutral();
    };

    if let Some(d) = lists.trusted.iter().find(|d| host.contains(**d)) {
        return SourceSignal {
            tier: SourceTier::High,
            findings: vec![format!("Source is from trusted domain: {d}")],
        };
    }

    if let Some(d) = lists.untrusted.iter().find(|d| host.contains(**d)) {
        return SourceSignal {
            tier: SourceTier::Low,
            findings: vec![format!("Source is from known untrusted domain: {d}")],
        };
    }

    let findings = lists
        .suspicious
        .iter()
        .filter(|p| host.contains(**p))
        .map(|p| format!("Suspicious domain pattern detected: {p}"))
        .collect();

    SourceSignal {
        tier: SourceTier::Medium,
        findings,
    }
}

/// Lower-cased host without a leading `www.`; `None` when the URL has no usable host.
fn normalized_host(raw: &str) -> Option<String> {
    let parsed = Url::parse(raw).ok()?;
    let host = parsed.host_str()?.to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host).to_string();
    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}
