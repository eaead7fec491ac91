//! Center repository.

use sqlx::PgPool;

use hemo_core::error::{AppError, ErrorKind};
use hemo_core::result::AppResult;
use hemo_core::types::{CenterId, PageRequest, PageResponse};
use hemo_entity::center::{Center, CreateCenter};

/// Repository for center lookups and creation.
#[derive(Debug, Clone)]
pub struct CenterRepository {
    pool: PgPool,
}

impl CenterRepository {
    /// Create a new center repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a center by its normalized slug.
    pub async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Center>> {
        sqlx::query_as::<_, Center>("SELECT * FROM centers WHERE sub_domain = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find center by slug", e)
            })
    }

    /// Find a center by primary key.
    pub async fn find_by_id(&self, id: CenterId) -> AppResult<Option<Center>> {
        sqlx::query_as::<_, Center>("SELECT * FROM centers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find center", e))
    }

    /// List centers ordered by label, optionally filtered by a label fragment.
    pub async fn list(
        &self,
        label: Option<&str>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Center>> {
        let pattern = label.map(|l| format!("%{l}%"));

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM centers WHERE $1::TEXT IS NULL OR label ILIKE $1",
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count centers", e))?;

        let centers = sqlx::query_as::<_, Center>(
            "SELECT * FROM centers WHERE $1::TEXT IS NULL OR label ILIKE $1 \
             ORDER BY label ASC, sub_domain ASC LIMIT $2 OFFSET $3",
        )
        .bind(&pattern)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list centers", e))?;

        Ok(PageResponse::new(centers, page, total as u64))
    }

    /// Insert a center. A duplicate slug is a conflict.
    pub async fn create(&self, data: &CreateCenter) -> AppResult<Center> {
        sqlx::query_as::<_, Center>(
            "INSERT INTO centers (sub_domain, label, tel, mail, address) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(&data.sub_domain)
        .bind(&data.label)
        .bind(&data.tel)
        .bind(&data.mail)
        .bind(&data.address)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("centers_sub_domain_key") =>
            {
                AppError::conflict(format!("Subdomain '{}' is already taken", data.sub_domain))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create center", e),
        })
    }
}
