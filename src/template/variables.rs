use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A placeholder key the sending backend knows how to fill in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableKey {
    Name,
    FirstName,
    Email,
    Company,
    Position,
}

/// Alternative spellings seen in user-written templates, mapped onto the
/// canonical key.
const ALIASES: &[(&str, VariableKey)] = &[
    ("firstName", VariableKey::FirstName),
    ("first-name", VariableKey::FirstName),
    ("firstname", VariableKey::FirstName),
    ("fullName", VariableKey::Name),
    ("full_name", VariableKey::Name),
    ("emailAddress", VariableKey::Email),
    ("email_address", VariableKey::Email),
    ("companyName", VariableKey::Company),
    ("company_name", VariableKey::Company),
    ("jobTitle", VariableKey::Position),
    ("job_title", VariableKey::Position),
    ("title", VariableKey::Position),
];

impl VariableKey {
    /// The allow-list, in canonical order.
    pub const ALL: [VariableKey; 5] = [
        VariableKey::Name,
        VariableKey::FirstName,
        VariableKey::Email,
        VariableKey::Company,
        VariableKey::Position,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VariableKey::Name => "name",
            VariableKey::FirstName => "first_name",
            VariableKey::Email => "email",
            VariableKey::Company => "company",
            VariableKey::Position => "position",
        }
    }

    /// Resolves an identifier written between braces, following aliases.
    /// Returns `None` for anything outside the allow-list.
    pub fn resolve(identifier: &str) -> Option<VariableKey> {
        Self::ALL
            .iter()
            .find(|key| key.as_str() == identifier)
            .or_else(|| {
                ALIASES
                    .iter()
                    .find(|(alias, _)| *alias == identifier)
                    .map(|(_, key)| key)
            })
            .copied()
    }

    /// The literal text inserted into a template, e.g. `{{first_name}}`.
    pub fn placeholder(&self) -> String {
        format!("{{{{{}}}}}", self.as_str())
    }
}

impl fmt::Display for VariableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VariableKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s).ok_or_else(|| format!("'{}' is not an allowed variable", s))
    }
}

/// Collects every allow-listed variable referenced as `{{identifier}}` in `text`.
///
/// Identifiers are trimmed and passed through the alias table. Anything that
/// does not resolve is treated as literal text and ignored.
pub fn extract_variables(text: &str) -> BTreeSet<VariableKey> {
    placeholders(text).filter_map(VariableKey::resolve).collect()
}

/// Yields the trimmed identifier of every well-formed `{{...}}` in `text`.
fn placeholders(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        loop {
            let start = rest.find("{{")?;
            let after_open = &rest[start + 2..];
            let end = after_open.find("}}")?;
            // The last opening pair wins, and stray braces in front of the
            // name (`{{{x}}`) are surrounding text.
            let inner = after_open[..end]
                .rsplit("{{")
                .next()
                .unwrap_or_default()
                .trim_start_matches('{')
                .trim();
            rest = &after_open[end + 2..];
            if is_identifier(inner) {
                return Some(inner);
            }
        }
    })
}

fn is_identifier(candidate: &str) -> bool {
    !candidate.is_empty()
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
