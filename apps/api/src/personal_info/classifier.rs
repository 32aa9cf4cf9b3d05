//! Line classifier — splits a free-text personal-info block into labeled
//! contact fields via an ordered rule table.
//!
//! Best-effort heuristics, not validation: malformed input produces a
//! deterministic but unchecked categorization, and absent fields are simply
//! omitted. There are no error conditions.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Structured contact record derived from one multi-line text block.
/// Derived on demand, never persisted; absent fields are omitted from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedPersonalInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

/// Categories a line can be filed under, in rule order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Email,
    Phone,
    Linkedin,
    Github,
    Address,
    Name,
}

/// Fixed rule table, tried top to bottom; the first match claims the line.
/// Name is not in the table: it is the fallback in `classify_line` and only
/// fires while no name has been assigned.
const RULES: &[(FieldKind, fn(&str) -> bool)] = &[
    (FieldKind::Email, is_email),
    (FieldKind::Phone, is_phone),
    (FieldKind::Linkedin, is_linkedin),
    (FieldKind::Github, is_github),
    (FieldKind::Address, is_address),
];

/// CJK administrative-division markers that flag a line as an address.
const ADDRESS_MARKERS: &[char] = &['省', '市', '区', '县'];

fn is_email(line: &str) -> bool {
    line.contains('@') && line.contains('.')
}

/// Mainland-mobile shape: 11 digits, `1` then 3-9, after dropping hyphens
/// and whitespace.
fn is_phone(line: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| Regex::new(r"^1[3-9]\d{9}$").expect("valid phone regex"));

    let digits: String = line
        .chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .collect();
    pattern.is_match(&digits)
}

fn is_linkedin(line: &str) -> bool {
    line.contains("linkedin.com")
}

fn is_github(line: &str) -> bool {
    line.contains("github.com")
}

fn is_address(line: &str) -> bool {
    line.chars().any(|c| ADDRESS_MARKERS.contains(&c))
}

/// Classifies a whole block. Lines are trimmed, blanks skipped, order
/// preserved. Rules 1-5 assign unconditionally (last write per category
/// wins); name is first-write-wins; a line matching nothing after the name
/// is set is dropped.
pub fn classify_personal_info(text: &str) -> ParsedPersonalInfo {
    let mut info = ParsedPersonalInfo::default();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match classify_line(line, info.name.is_some()) {
            Some(FieldKind::Email) => info.email = Some(line.to_string()),
            Some(FieldKind::Phone) => info.phone = Some(line.to_string()),
            Some(FieldKind::Linkedin) => info.linkedin = Some(line.to_string()),
            Some(FieldKind::Github) => info.github = Some(line.to_string()),
            Some(FieldKind::Address) => info.address = Some(line.to_string()),
            Some(FieldKind::Name) => info.name = Some(line.to_string()),
            None => {}
        }
    }

    info
}

/// Applies the rule table to one line.
fn classify_line(line: &str, name_taken: bool) -> Option<FieldKind> {
    for (kind, matches) in RULES {
        if matches(line) {
            return Some(*kind);
        }
    }
    if name_taken {
        None
    } else {
        Some(FieldKind::Name)
    }
}
