//! # ScaffRS Preference Hints
//!
//! File: cli/src/analysis/preferences.rs
//!
//! Preference hints are free-text tokens that state an explicit structural
//! wish, e.g. `"fork, include docker"`. They are parsed once into a closed set
//! of `Preference` values. Unknown tokens are logged and dropped so that
//! classification never fails because of an unexpected hint.
//!
use crate::core::error::ScaffError;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// A recognised preference token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preference {
    /// Contributors work from personal forks.
    Fork,
    /// Outside contributors submit changes.
    ExternalContributors,
    /// The project is developed in the open.
    OpenSource,
    /// A Dockerfile should be generated.
    IncludeDocker,
    /// A CI pipeline should be generated.
    IncludeCi,
    /// A tests folder is planned even if the layout lacks one.
    IncludeTests,
    /// A docs folder is planned even if the layout lacks one.
    IncludeDocs,
}

impl Preference {
    /// The canonical token for this preference.
    pub fn token(self) -> &'static str {
        match self {
            Preference::Fork => "fork",
            Preference::ExternalContributors => "external-contributors",
            Preference::OpenSource => "open-source",
            Preference::IncludeDocker => "include-docker",
            Preference::IncludeCi => "include-ci",
            Preference::IncludeTests => "include-tests",
            Preference::IncludeDocs => "include-docs",
        }
    }

    /// Tokens that put the Forking workflow first regardless of layout.
    pub fn forces_forking(self) -> bool {
        matches!(
            self,
            Preference::Fork | Preference::ExternalContributors | Preference::OpenSource
        )
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Preference {
    type Err = ScaffError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let token = normalize_token(raw);
        let preference = match token.as_str() {
            "fork" | "forking" => Preference::Fork,
            "external-contributors" => Preference::ExternalContributors,
            "open-source" | "opensource" | "oss" => Preference::OpenSource,
            "include-docker" | "docker" => Preference::IncludeDocker,
            "include-ci" | "ci" => Preference::IncludeCi,
            "include-tests" => Preference::IncludeTests,
            "include-docs" => Preference::IncludeDocs,
            _ => return Err(ScaffError::UnknownPreferenceToken { token }),
        };
        Ok(preference)
    }
}

/// Lower-cases a token and joins its words with `-`, so `"Include  Docker"`
/// and `"include_docker"` both become `"include-docker"`.
pub fn normalize_token(raw: &str) -> String {
    raw.split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// The set of recognised preferences for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Preferences {
    tokens: BTreeSet<Preference>,
}

impl Preferences {
    /// Parses a free-text preference string. Fragments are separated by
    /// commas, semicolons or newlines. A fragment that is not a token as a
    /// whole is scanned word by word, so `"fork include-docker"` yields both
    /// hints. Words that match nothing are ignored with a warning.
    pub fn parse(raw: &str) -> Self {
        let mut preferences = Preferences::default();
        for fragment in raw.split([',', ';', '\n']) {
            preferences.add_fragment(fragment);
        }
        preferences
    }

    fn add_fragment(&mut self, fragment: &str) {
        if fragment.trim().is_empty() {
            return;
        }
        let whole = match fragment.parse::<Preference>() {
            Ok(p) => {
                self.tokens.insert(p);
                return;
            }
            Err(e) => e,
        };

        let normalized = normalize_token(fragment);
        let words: Vec<&str> = normalized.split('-').collect();
        let mut unmatched = Vec::new();
        let mut matched = false;
        let mut i = 0;
        while i < words.len() {
            // Two-word tokens first, so "include docker" is not read as "docker" alone.
            if let Some(pair) = words.get(i..i + 2) {
                if let Ok(p) = pair.join("-").parse::<Preference>() {
                    self.tokens.insert(p);
                    matched = true;
                    i += 2;
                    continue;
                }
            }
            match words[i].parse::<Preference>() {
                Ok(p) => {
                    self.tokens.insert(p);
                    matched = true;
                }
                Err(_) => unmatched.push(words[i]),
            }
            i += 1;
        }

        if !matched {
            warn!("{}", whole);
        } else if !unmatched.is_empty() {
            warn!(
                "{}",
                ScaffError::UnknownPreferenceToken {
                    token: unmatched.join("-"),
                }
            );
        }
    }

    /// Merges two sets (used to layer CLI hints over configured ones).
    pub fn union(&self, other: &Preferences) -> Preferences {
        Preferences {
            tokens: self.tokens.union(&other.tokens).copied().collect(),
        }
    }

    pub fn contains(&self, preference: Preference) -> bool {
        self.tokens.contains(&preference)
    }

    /// The first token that forces the Forking workflow, if any.
    pub fn forcing_token(&self) -> Option<Preference> {
        self.tokens.iter().copied().find(|p| p.forces_forking())
    }
}
