//! Question catalog - the ordered, immutable list of screening questions.
//!
//! The catalog is the single source of truth for question ordering. Anything
//! that leaves the flow engine (the scoring payload in particular) is ordered
//! by catalog position, never by the order answers were collected in.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use super::answers::AnswerValue;
use crate::domain::foundation::ValidationError;

/// Input kind with its validation constraints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestionKind {
    /// Integer answer within `[min, max]` inclusive.
    Numeric { min: i64, max: i64 },
    /// Answer must be one of the listed options (exact match).
    Choice { options: Vec<String> },
}

/// A single question in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDescriptor {
    /// Stable identifier, also the key sent to the scoring service.
    pub id: String,
    /// Human-readable prompt.
    pub prompt: String,
    #[serde(flatten)]
    pub kind: QuestionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl QuestionDescriptor {
    /// Creates a numeric question.
    pub fn numeric(id: impl Into<String>, prompt: impl Into<String>, min: i64, max: i64) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            kind: QuestionKind::Numeric { min, max },
            category: None,
        }
    }

    /// Creates a choice question.
    pub fn choice<I, S>(id: impl Into<String>, prompt: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            kind: QuestionKind::Choice {
                options: options.into_iter().map(Into::into).collect(),
            },
            category: None,
        }
    }

    /// Tags the question with a category.
    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Validates a candidate answer, returning the normalized value to store.
    ///
    /// Whole-valued decimals (`35.0`) are accepted for numeric questions and
    /// stored as integers.
    pub fn validate(&self, value: &AnswerValue) -> Result<AnswerValue, ValidationError> {
        match &self.kind {
            QuestionKind::Numeric { min, max } => {
                let n = value.as_integer().ok_or_else(|| {
                    ValidationError::invalid_format(&self.id, format!("expected an integer, got {}", value))
                })?;
                if n < *min || n > *max {
                    return Err(ValidationError::out_of_range(&self.id, *min, *max, n));
                }
                Ok(AnswerValue::Integer(n))
            }
            QuestionKind::Choice { options } => match value {
                AnswerValue::Text(s) if options.iter().any(|o| o == s) => Ok(value.clone()),
                other => Err(ValidationError::not_an_option(
                    &self.id,
                    options,
                    other.to_string(),
                )),
            },
        }
    }
}

/// Errors raised while building or loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog must contain at least one question")]
    Empty,

    #[error("duplicate question id '{0}'")]
    DuplicateId(String),

    #[error("question '{0}' is a choice question without options")]
    NoOptions(String),

    #[error("question '{id}' has min {min} greater than max {max}")]
    InvalidBounds { id: String, min: i64, max: i64 },

    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Ordered, validated list of questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QuestionCatalog {
    questions: Vec<QuestionDescriptor>,
}

impl QuestionCatalog {
    /// Builds a catalog, checking ids are unique and constraints are sane.
    pub fn new(questions: Vec<QuestionDescriptor>) -> Result<Self, CatalogError> {
        if questions.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for q in &questions {
            if !seen.insert(q.id.as_str()) {
                return Err(CatalogError::DuplicateId(q.id.clone()));
            }
            match &q.kind {
                QuestionKind::Numeric { min, max } if min > max => {
                    return Err(CatalogError::InvalidBounds {
                        id: q.id.clone(),
                        min: *min,
                        max: *max,
                    });
                }
                QuestionKind::Choice { options } if options.is_empty() => {
                    return Err(CatalogError::NoOptions(q.id.clone()));
                }
                _ => {}
            }
        }

        Ok(Self { questions })
    }

    /// Parses a catalog from a YAML sequence of question descriptors.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let questions: Vec<QuestionDescriptor> = serde_yaml::from_str(yaml)?;
        Self::new(questions)
    }

    /// Loads a catalog from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&raw)
    }

    /// The built-in screening questionnaire.
    pub fn standard() -> Arc<QuestionCatalog> {
        STANDARD_CATALOG.clone()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Question at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&QuestionDescriptor> {
        self.questions.get(index)
    }

    /// Looks a question up by id.
    pub fn find(&self, id: &str) -> Option<&QuestionDescriptor> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Questions in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &QuestionDescriptor> {
        self.questions.iter()
    }

    /// Question ids in canonical order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.questions.iter().map(|q| q.id.as_str())
    }
}

const YES_NO: [&str; 2] = ["Yes", "No"];
const HIGH_NORMAL_LOW: [&str; 3] = ["High", "Normal", "Low"];
const HIGH_LOW_MODERATE: [&str; 3] = ["High", "Low", "Moderate"];

static STANDARD_CATALOG: Lazy<Arc<QuestionCatalog>> = Lazy::new(|| {
    use QuestionDescriptor as Q;

    let questions = vec![
        Q::numeric("age", "Age", 18, 99).in_category("demographics"),
        Q::choice("Alcohol", "Do you consume Alcohol?", YES_NO).in_category("lifestyle"),
        Q::choice("BloodPressure", "Blood Pressure Level", HIGH_NORMAL_LOW).in_category("vitals"),
        Q::choice("Breathlessness", "Do you experience Breathlessness?", YES_NO)
            .in_category("symptoms"),
        Q::choice("ChestPain", "Do you have Chest Pain?", YES_NO).in_category("symptoms"),
        Q::choice("Cough", "Do you have a persistent Cough?", YES_NO).in_category("symptoms"),
        Q::choice("DietQuality", "Diet Quality", ["Good", "Poor"]).in_category("lifestyle"),
        Q::choice("Dizziness", "Do you experience Dizziness?", YES_NO).in_category("symptoms"),
        Q::choice("ExcessiveThirst", "Excessive Thirst?", YES_NO).in_category("symptoms"),
        Q::choice("FamilyHistoryDiabetes", "Family History: Diabetes", YES_NO)
            .in_category("family_history"),
        Q::choice("FamilyHistoryHeart", "Family History: Heart Disease", YES_NO)
            .in_category("family_history"),
        Q::choice("Fatigue", "Do you feel Fatigued?", YES_NO).in_category("symptoms"),
        Q::choice("FrequentUrination", "Frequent Urination?", YES_NO).in_category("symptoms"),
        Q::choice("Headache", "Frequent Headaches?", YES_NO).in_category("symptoms"),
        Q::choice("LossOfAppetite", "Loss of Appetite?", YES_NO).in_category("symptoms"),
        Q::choice("PaleSkin", "Pale Skin?", YES_NO).in_category("symptoms"),
        Q::choice("PhysicalActivity", "Physical Activity Level", HIGH_LOW_MODERATE)
            .in_category("lifestyle"),
        Q::choice("SaltIntake", "Salt Intake Level", HIGH_LOW_MODERATE).in_category("lifestyle"),
        Q::choice("Smoking", "Do you Smoke?", YES_NO).in_category("lifestyle"),
        Q::choice("StressLevel", "Stress Level", HIGH_LOW_MODERATE).in_category("lifestyle"),
        Q::choice("SugarLevel", "Sugar/Glucose Level", HIGH_NORMAL_LOW).in_category("vitals"),
        Q::choice("SwellingAnkles", "Swelling in Ankles?", YES_NO).in_category("symptoms"),
        Q::choice("WeightLoss", "Unexplained Weight Loss?", YES_NO).in_category("symptoms"),
        Q::choice("Wheezing", "Wheezing?", YES_NO).in_category("symptoms"),
    ];

    Arc::new(QuestionCatalog { questions })
});
