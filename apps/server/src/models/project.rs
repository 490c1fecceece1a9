//! Project DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::project;
use crate::error::{AppError, AppResult};

/// Project row in the catalog listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// Number of results with status `failed` across all report files.
    pub failed_count: u64,
}

/// Request body for creating a project.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateProjectRequest {
    pub name: Option<String>,
}

impl CreateProjectRequest {
    /// Trimmed, non-empty project name.
    pub fn validated_name(&self) -> AppResult<String> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("name is required".to_string()))
    }
}

/// A single project.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<project::Model> for ProjectResponse {
    fn from(model: project::Model) -> Self {
        ProjectResponse {
            id: model.id,
            name: model.name,
            created_at: model.created_at,
        }
    }
}
