//! Database queries for projects.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use tracing::info;

use crate::entity::project::{self, ActiveModel, Entity as Project};
use crate::entity::{report_file, test_result};
use crate::error::{AppError, AppResult};

use super::DbPool;
use super::test_results::delete_project_results;

/// Rows removed by a project delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectDeletion {
    pub reviews: u64,
    pub test_results: u64,
    pub report_files: u64,
}

/// Whether a project row exists.
pub async fn project_exists<C: ConnectionTrait>(db: &C, id: i32) -> AppResult<bool> {
    let found = Project::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to get project: {}", e)))?;

    Ok(found.is_some())
}

impl DbPool {
    /// Insert a new project.
    pub async fn insert_project(&self, name: &str) -> AppResult<project::Model> {
        let model = ActiveModel {
            name: Set(name.to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let result = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert project: {}", e)))?;

        Ok(result)
    }

    /// Get a project by ID.
    pub async fn get_project(&self, id: i32) -> AppResult<Option<project::Model>> {
        let result = Project::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get project: {}", e)))?;

        Ok(result)
    }

    /// List all projects, newest first, with their failed result counts.
    pub async fn list_projects_with_failed_counts(
        &self,
    ) -> AppResult<Vec<(project::Model, u64)>> {
        let projects = Project::find()
            .order_by_desc(project::Column::CreatedAt)
            .order_by_desc(project::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list projects: {}", e)))?;

        let failed: HashMap<i32, i64> = test_result::Entity::find()
            .select_only()
            .column(test_result::Column::ProjectId)
            .column_as(test_result::Column::Id.count(), "count")
            .filter(test_result::Column::Status.eq("failed"))
            .group_by(test_result::Column::ProjectId)
            .into_tuple::<(i32, i64)>()
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count failed results: {}", e)))?
            .into_iter()
            .collect();

        Ok(projects
            .into_iter()
            .map(|p| {
                let count = failed.get(&p.id).copied().unwrap_or(0).max(0) as u64;
                (p, count)
            })
            .collect())
    }

    /// Delete a project and everything that hangs off it.
    ///
    /// Deletes reviews, then results, then report files, then the project, in
    /// one transaction. Returns `None` when the project does not exist.
    pub async fn delete_project_cascade(&self, id: i32) -> AppResult<Option<ProjectDeletion>> {
        let txn = self.begin().await?;

        if !project_exists(&txn, id).await? {
            return Ok(None);
        }

        let (reviews, test_results) = delete_project_results(&txn, id).await?;

        let report_files = report_file::Entity::delete_many()
            .filter(report_file::Column::ProjectId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete report files: {}", e)))?
            .rows_affected;

        Project::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete project: {}", e)))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(format!("Failed to commit project delete: {}", e)))?;

        info!(
            project_id = id,
            reviews, test_results, report_files, "Project deleted"
        );

        Ok(Some(ProjectDeletion {
            reviews,
            test_results,
            report_files,
        }))
    }
}
