//! Database queries for report files.

use chrono::Utc;
use sea_orm::sea_query::{Expr, ExprTrait, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbBackend, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entity::report_file::{self, ActiveModel, Entity as ReportFile};
use crate::error::{AppError, AppResult};
use crate::models::{PageRequest, ReportFileFilter};

use super::DbPool;

const LIKE_ESCAPE: char = '\\';

/// Escape LIKE metacharacters so user input only matches literally.
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// Lowercase a search term the way the backend's `LOWER()` folds the column.
///
/// SQLite only folds ASCII, Postgres folds Unicode. On SQLite a non-ASCII
/// term therefore matches case-sensitively.
fn fold_case(backend: DbBackend, raw: &str) -> String {
    match backend {
        DbBackend::Sqlite => raw.to_ascii_lowercase(),
        _ => raw.to_lowercase(),
    }
}

/// Insert a report file row. Names are not unique; every call inserts.
pub async fn insert_report_file<C: ConnectionTrait>(
    db: &C,
    project_id: i32,
    name: &str,
) -> AppResult<report_file::Model> {
    let model = ActiveModel {
        project_id: Set(project_id),
        name: Set(name.to_string()),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let result = model
        .insert(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to insert report file: {}", e)))?;

    Ok(result)
}

impl DbPool {
    /// List a project's report files, newest first.
    pub async fn list_report_files(
        &self,
        project_id: i32,
        filter: &ReportFileFilter,
        page: PageRequest,
    ) -> AppResult<(Vec<report_file::Model>, u64)> {
        let mut select = ReportFile::find().filter(report_file::Column::ProjectId.eq(project_id));

        if let Some(ref name) = filter.name {
            let backend = self.connection().get_database_backend();
            let pattern = format!("%{}%", escape_like(&fold_case(backend, name)));
            select = select.filter(
                Expr::expr(Func::lower(Expr::col((
                    report_file::Entity,
                    report_file::Column::Name,
                ))))
                .like(LikeExpr::new(pattern).escape(LIKE_ESCAPE)),
            );
        }

        if let Some(from) = filter.range.from {
            select = select.filter(report_file::Column::CreatedAt.gte(from));
        }

        if let Some(until) = filter.range.until {
            select = select.filter(report_file::Column::CreatedAt.lt(until));
        }

        // Count total before pagination
        let total = select
            .clone()
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count report files: {}", e)))?;

        let files = select
            .order_by_desc(report_file::Column::CreatedAt)
            .order_by_desc(report_file::Column::Id)
            .offset(page.offset())
            .limit(page.page_size)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list report files: {}", e)))?;

        Ok((files, total))
    }
}
