use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::fmt;
use std::str::FromStr;

use crate::error::{PayloadError, Result};

/// Moderation categories reported by the Moderations API.
///
/// The wire keys contain `/` and `-`, so they are never derived from the
/// variant names; `WIRE_KEYS` is the single table both the flag and the
/// score sets are checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModerationCategory {
    Hate,
    HateThreatening,
    Harassment,
    HarassmentThreatening,
    SelfHarm,
    SelfHarmIntent,
    SelfHarmInstructions,
    Sexual,
    SexualMinors,
    Violence,
    ViolenceGraphic,
}

const WIRE_KEYS: [(ModerationCategory, &str); 11] = [
    (ModerationCategory::Hate, "hate"),
    (ModerationCategory::HateThreatening, "hate/threatening"),
    (ModerationCategory::Harassment, "harassment"),
    (
        ModerationCategory::HarassmentThreatening,
        "harassment/threatening",
    ),
    (ModerationCategory::SelfHarm, "self-harm"),
    (ModerationCategory::SelfHarmIntent, "self-harm/intent"),
    (
        ModerationCategory::SelfHarmInstructions,
        "self-harm/instructions",
    ),
    (ModerationCategory::Sexual, "sexual"),
    (ModerationCategory::SexualMinors, "sexual/minors"),
    (ModerationCategory::Violence, "violence"),
    (ModerationCategory::ViolenceGraphic, "violence/graphic"),
];

impl ModerationCategory {
    /// All categories in wire order.
    pub const ALL: [ModerationCategory; 11] = [
        ModerationCategory::Hate,
        ModerationCategory::HateThreatening,
        ModerationCategory::Harassment,
        ModerationCategory::HarassmentThreatening,
        ModerationCategory::SelfHarm,
        ModerationCategory::SelfHarmIntent,
        ModerationCategory::SelfHarmInstructions,
        ModerationCategory::Sexual,
        ModerationCategory::SexualMinors,
        ModerationCategory::Violence,
        ModerationCategory::ViolenceGraphic,
    ];

    /// JSON key used for this category in both `categories` and `category_scores`.
    pub fn as_str(self) -> &'static str {
        WIRE_KEYS[self as usize].1
    }
}

impl fmt::Display for ModerationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown moderation category: {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for ModerationCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        WIRE_KEYS
            .iter()
            .find(|(_, key)| *key == s)
            .map(|(category, _)| *category)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// The fixed category taxonomy, one value per category.
///
/// Used as `CategorySet<bool>` for flags and `CategorySet<f64>` for scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySet<T> {
    /// Hateful content based on a protected attribute.
    pub hate: T,
    /// Hateful content that also includes violence or serious harm.
    #[serde(rename = "hate/threatening")]
    pub hate_threatening: T,
    pub harassment: T,
    #[serde(rename = "harassment/threatening")]
    pub harassment_threatening: T,
    #[serde(rename = "self-harm")]
    pub self_harm: T,
    #[serde(rename = "self-harm/intent")]
    pub self_harm_intent: T,
    #[serde(rename = "self-harm/instructions")]
    pub self_harm_instructions: T,
    pub sexual: T,
    /// Sexual content involving an individual under 18.
    #[serde(rename = "sexual/minors")]
    pub sexual_minors: T,
    pub violence: T,
    #[serde(rename = "violence/graphic")]
    pub violence_graphic: T,
}

impl<T> CategorySet<T> {
    pub fn get(&self, category: ModerationCategory) -> &T {
        match category {
            ModerationCategory::Hate => &self.hate,
            ModerationCategory::HateThreatening => &self.hate_threatening,
            ModerationCategory::Harassment => &self.harassment,
            ModerationCategory::HarassmentThreatening => &self.harassment_threatening,
            ModerationCategory::SelfHarm => &self.self_harm,
            ModerationCategory::SelfHarmIntent => &self.self_harm_intent,
            ModerationCategory::SelfHarmInstructions => &self.self_harm_instructions,
            ModerationCategory::Sexual => &self.sexual,
            ModerationCategory::SexualMinors => &self.sexual_minors,
            ModerationCategory::Violence => &self.violence,
            ModerationCategory::ViolenceGraphic => &self.violence_graphic,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ModerationCategory, &T)> + '_ {
        ModerationCategory::ALL
            .into_iter()
            .map(move |category| (category, self.get(category)))
    }
}

/// Verdict for one moderated input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModerationResult {
    /// Whether the input violates the usage policies.
    pub flagged: bool,
    pub categories: CategorySet<bool>,
    pub category_scores: CategorySet<f64>,
}

impl ModerationResult {
    /// Categories whose flag is set, in wire order.
    pub fn flagged_categories(&self) -> Vec<ModerationCategory> {
        self.categories
            .iter()
            .filter(|(_, flagged)| **flagged)
            .map(|(category, _)| category)
            .collect()
    }

    /// Highest-scoring category. Ties resolve to the earlier category.
    pub fn top_category(&self) -> (ModerationCategory, f64) {
        let first = (ModerationCategory::Hate, self.category_scores.hate);
        self.category_scores
            .iter()
            .skip(1)
            .fold(first, |best, (category, score)| {
                if *score > best.1 {
                    (category, *score)
                } else {
                    best
                }
            })
    }
}

/// Response of `POST /moderations`.
///
/// Decoding is all-or-nothing: a missing key, a wrongly typed value or a
/// non-list `results` yields `PayloadError::SchemaMismatch`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModerationReport {
    pub id: String,
    pub model: String,
    /// One entry per input, in input order.
    pub results: Vec<ModerationResult>,
}

impl ModerationReport {
    pub fn from_json(s: &str) -> Result<Self> {
        let report: Self =
            serde_json::from_str(s).map_err(|e| PayloadError::mismatch("moderation report", e))?;
        report.trace_decoded();
        Ok(report)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let report: Self = serde_json::from_slice(bytes)
            .map_err(|e| PayloadError::mismatch("moderation report", e))?;
        report.trace_decoded();
        Ok(report)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let report: Self = serde_json::from_value(value)
            .map_err(|e| PayloadError::mismatch("moderation report", e))?;
        report.trace_decoded();
        Ok(report)
    }

    /// True if any result is flagged; false for an empty report.
    pub fn is_flagged(&self) -> bool {
        self.results.iter().any(|r| r.flagged)
    }

    /// Flagged results with their input index.
    pub fn flagged_results(&self) -> impl Iterator<Item = (usize, &ModerationResult)> + '_ {
        self.results.iter().enumerate().filter(|(_, r)| r.flagged)
    }

    fn trace_decoded(&self) {
        tracing::debug!(
            id = %self.id,
            model = %self.model,
            results = self.results.len(),
            flagged = self.is_flagged(),
            "decoded moderation report"
        );
    }
}

/// Text to classify: a single string or a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModerationInput {
    Text(String),
    Batch(Vec<String>),
}

/// Request body for `POST /moderations`. `model` is omitted when unset.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationRequest {
    pub input: ModerationInput,
    #[serde(default)]
    pub model: Option<String>,
}

impl ModerationRequest {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: ModerationInput::Text(input.into()),
            model: None,
        }
    }

    pub fn batch<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: ModerationInput::Batch(inputs.into_iter().map(Into::into).collect()),
            model: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Number of inputs, and therefore of results expected back.
    pub fn input_len(&self) -> usize {
        match &self.input {
            ModerationInput::Text(_) => 1,
            ModerationInput::Batch(items) => items.len(),
        }
    }
}
