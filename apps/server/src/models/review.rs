//! Review domain models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::review;
use crate::error::{AppError, AppResult};

/// Why a result failed, as decided by the reviewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewReason {
    EnvIssue,
    TestScriptIssue,
    NewRequirement,
    FlakyTest,
    DataIssue,
    ExternalDependency,
    /// Explicit catch-all.
    Other,
}

impl ReviewReason {
    pub const ALL: [ReviewReason; 7] = [
        Self::EnvIssue,
        Self::TestScriptIssue,
        Self::NewRequirement,
        Self::FlakyTest,
        Self::DataIssue,
        Self::ExternalDependency,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EnvIssue => "ENV_ISSUE",
            Self::TestScriptIssue => "TEST_SCRIPT_ISSUE",
            Self::NewRequirement => "NEW_REQUIREMENT",
            Self::FlakyTest => "FLAKY_TEST",
            Self::DataIssue => "DATA_ISSUE",
            Self::ExternalDependency => "EXTERNAL_DEPENDENCY",
            Self::Other => "OTHER",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ENV_ISSUE" => Some(Self::EnvIssue),
            "TEST_SCRIPT_ISSUE" => Some(Self::TestScriptIssue),
            "NEW_REQUIREMENT" => Some(Self::NewRequirement),
            "FLAKY_TEST" => Some(Self::FlakyTest),
            "DATA_ISSUE" => Some(Self::DataIssue),
            "EXTERNAL_DEPENDENCY" => Some(Self::ExternalDependency),
            "OTHER" => Some(Self::Other),
            _ => None,
        }
    }

    /// Decode a reason read back from storage.
    ///
    /// Rows written before the reason set was closed may hold free text;
    /// those read as `Other`.
    pub fn from_stored(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|| {
            tracing::warn!(stored = %s, "Unknown stored review reason, reading as OTHER");
            Self::Other
        })
    }
}

impl std::fmt::Display for ReviewReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request body for creating or replacing a review.
///
/// Fields are optional so that a missing field is reported as a validation
/// error naming the field rather than a generic deserialization failure.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertReviewRequest {
    /// One of the closed reason codes, e.g. `FLAKY_TEST`.
    pub reason: Option<String>,
    pub comments: Option<String>,
    /// Reviewer user id.
    pub qa_id: Option<i64>,
}

/// A review write that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedReview {
    pub test_result_id: i32,
    pub reason: ReviewReason,
    pub comments: Option<String>,
    pub qa_id: i32,
}

impl UpsertReviewRequest {
    pub fn validate(&self, test_result_id: Option<i32>) -> AppResult<ValidatedReview> {
        let test_result_id = test_result_id
            .filter(|id| *id > 0)
            .ok_or_else(|| AppError::Validation("testResultId is required".to_string()))?;

        let raw_reason = self
            .reason
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .ok_or_else(|| AppError::Validation("reason is required".to_string()))?;

        let reason = ReviewReason::parse(raw_reason).ok_or_else(|| {
            AppError::Validation(format!(
                "reason must be one of {}",
                ReviewReason::ALL.map(|r| r.as_str()).join(", ")
            ))
        })?;

        let qa_id = self
            .qa_id
            .ok_or_else(|| AppError::Validation("qaId is required".to_string()))?;
        let qa_id = i32::try_from(qa_id)
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| AppError::Validation("qaId must be a positive integer".to_string()))?;

        let comments = self
            .comments
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        Ok(ValidatedReview {
            test_result_id,
            reason,
            comments,
            qa_id,
        })
    }
}

/// Review as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: i32,
    pub reason: ReviewReason,
    pub comments: Option<String>,
    pub reviewed_at: DateTime<Utc>,
}

impl From<review::Model> for ReviewResponse {
    fn from(model: review::Model) -> Self {
        ReviewResponse {
            id: model.id,
            reason: ReviewReason::from_stored(&model.reason),
            comments: model.comments,
            reviewed_at: model.reviewed_at,
        }
    }
}
