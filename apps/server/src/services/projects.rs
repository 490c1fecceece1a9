//! Project catalog.

use tracing::info;

use crate::db::DbPool;
use crate::db::projects::ProjectDeletion;
use crate::error::{AppError, AppResult};
use crate::models::{CreateProjectRequest, ProjectResponse, ProjectSummary};

/// List projects with their failed result counts.
pub async fn list_projects(pool: &DbPool) -> AppResult<Vec<ProjectSummary>> {
    let rows = pool.list_projects_with_failed_counts().await?;

    Ok(rows
        .into_iter()
        .map(|(project, failed_count)| ProjectSummary {
            id: project.id,
            name: project.name,
            created_at: project.created_at,
            failed_count,
        })
        .collect())
}

/// Create a project.
pub async fn create_project(
    pool: &DbPool,
    request: &CreateProjectRequest,
) -> AppResult<ProjectResponse> {
    let name = request.validated_name()?;
    let project = pool.insert_project(&name).await?;

    info!(project_id = project.id, name = %project.name, "Project created");

    Ok(project.into())
}

/// Delete a project and all of its files, results and reviews.
pub async fn delete_project(pool: &DbPool, id: i32) -> AppResult<ProjectDeletion> {
    pool.delete_project_cascade(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project {}", id)))
}
