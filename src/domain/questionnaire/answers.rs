//! Answer values, the unordered answer map, and the canonical payload.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

use super::catalog::QuestionCatalog;

/// A single answer: a number for numeric questions, text for choices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Integer(i64),
    Decimal(f64),
    Text(String),
}

impl AnswerValue {
    /// Returns the value as an integer if it is whole-valued.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            AnswerValue::Integer(n) => Some(*n),
            AnswerValue::Decimal(f)
                if f.is_finite() && f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 =>
            {
                Some(*f as i64)
            }
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Integer(n) => write!(f, "{}", n),
            AnswerValue::Decimal(d) => write!(f, "{}", d),
            AnswerValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for AnswerValue {
    fn from(n: i64) -> Self {
        AnswerValue::Integer(n)
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        AnswerValue::Text(s.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        AnswerValue::Text(s)
    }
}

/// Answers keyed by question id.
///
/// Insertion order carries no meaning. Use [`CanonicalPayload`] for anything
/// observable outside the flow engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerMap(HashMap<String, AnswerValue>);

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, value: impl Into<AnswerValue>) {
        self.0.insert(id.into(), value.into());
    }

    pub fn remove(&mut self, id: &str) -> Option<AnswerValue> {
        self.0.remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&AnswerValue> {
        self.0.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<AnswerValue>> FromIterator<(K, V)> for AnswerMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Answer map does not line up with the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("answers do not match the catalog (missing: [{}], unexpected: [{}])", .missing.join(", "), .unexpected.join(", "))]
pub struct IncompleteAnswers {
    pub missing: Vec<String>,
    pub unexpected: Vec<String>,
}

/// Answers flattened into catalog order for the scoring service.
///
/// Serializes as a JSON object whose key order equals catalog order.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalPayload {
    entries: Vec<(String, AnswerValue)>,
}

impl CanonicalPayload {
    /// Re-derives catalog order from an unordered answer map.
    ///
    /// Every catalog question must be answered and no extra keys may be
    /// present.
    pub fn from_answers(
        catalog: &QuestionCatalog,
        answers: &AnswerMap,
    ) -> Result<Self, IncompleteAnswers> {
        let mut entries = Vec::with_capacity(catalog.len());
        let mut missing = Vec::new();

        for id in catalog.ids() {
            match answers.get(id) {
                Some(value) => entries.push((id.to_string(), value.clone())),
                None => missing.push(id.to_string()),
            }
        }

        let mut unexpected: Vec<String> = answers
            .keys()
            .filter(|k| !catalog.contains(k))
            .map(str::to_string)
            .collect();
        unexpected.sort();

        if !missing.is_empty() || !unexpected.is_empty() {
            return Err(IncompleteAnswers { missing, unexpected });
        }

        Ok(Self { entries })
    }

    /// Keys in payload order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn entries(&self) -> &[(String, AnswerValue)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Compact JSON body with keys in catalog order.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Hex SHA-256 of the canonical JSON body.
    pub fn fingerprint(&self) -> Result<String, serde_json::Error> {
        let body = self.to_json()?;
        let digest = Sha256::digest(body.as_bytes());
        Ok(format!("{:x}", digest))
    }
}

impl Serialize for CanonicalPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
