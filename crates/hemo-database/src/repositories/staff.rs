//! Staff repository across the five category tables.
//!
//! Table and column names come from [`StaffCategory`], never from input, so
//! the formatted SQL below is closed over a fixed set of identifiers.

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};

use hemo_core::error::{AppError, ErrorKind};
use hemo_core::result::AppResult;
use hemo_core::types::{CenterId, StaffId, UserId};
use hemo_entity::staff::{
    AdministrativeStaff, MedicalStaff, NewStaff, ParamedicalStaff, StaffAssignment, StaffCategory,
    StaffRecord, TechnicalStaff, WorkerStaff,
};

/// Every row bound to one identity, in probe order.
const ASSIGNMENT_PROBE_SQL: &str = "\
    SELECT id AS staff_id, user_id, center_id, role, 'administrative'::staff_category AS category \
      FROM administrative_staff WHERE user_id = $1 \
    UNION ALL \
    SELECT id, user_id, center_id, role, 'medical'::staff_category \
      FROM medical_staff WHERE user_id = $1 \
    UNION ALL \
    SELECT id, user_id, center_id, role, 'paramedical'::staff_category \
      FROM paramedical_staff WHERE user_id = $1 \
    UNION ALL \
    SELECT id, user_id, center_id, role, 'technical'::staff_category \
      FROM technical_staff WHERE user_id = $1 \
    UNION ALL \
    SELECT id, user_id, center_id, role, 'worker'::staff_category \
      FROM worker_staff WHERE user_id = $1 \
    ORDER BY category";

/// Category-specific column of each table.
fn detail_column(category: StaffCategory) -> &'static str {
    match category {
        StaffCategory::Administrative | StaffCategory::Worker => "job_title",
        StaffCategory::Medical => "council_number",
        StaffCategory::Paramedical | StaffCategory::Technical => "qualification",
    }
}

/// Repository for staff rows.
#[derive(Debug, Clone)]
pub struct StaffRepository {
    pool: PgPool,
}

impl StaffRepository {
    /// Create a new staff repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Probe all category tables for rows bound to `user_id`.
    ///
    /// Returns every match in probe order; callers decide what to do with
    /// more than one.
    pub async fn find_assignments(&self, user_id: UserId) -> AppResult<Vec<StaffAssignment>> {
        sqlx::query_as::<_, StaffAssignment>(ASSIGNMENT_PROBE_SQL)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to probe staff assignment", e)
            })
    }

    /// Insert a staff row into the table of its category.
    pub async fn create(&self, data: &NewStaff) -> AppResult<StaffRecord> {
        let category = data.details.category();
        let sql = format!(
            "INSERT INTO {table} (user_id, center_id, last_name, first_name, national_id, role, {column}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
            table = category.table(),
            column = detail_column(category),
        );

        let row = sqlx::query(&sql)
            .bind(data.user_id)
            .bind(data.center_id)
            .bind(&data.last_name)
            .bind(&data.first_name)
            .bind(&data.national_id)
            .bind(data.role)
            .bind(data.details.value())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err)
                    if db_err
                        .constraint()
                        .is_some_and(|c| c.ends_with("_national_id_key")) =>
                {
                    AppError::conflict(format!(
                        "National id '{}' is already registered",
                        data.national_id
                    ))
                }
                _ => AppError::with_source(ErrorKind::Database, "Failed to create staff", e),
            })?;

        decode_record(category, &row)
    }

    /// List the rows of one category that belong to `center_id`.
    pub async fn list_by_center(
        &self,
        category: StaffCategory,
        center_id: CenterId,
    ) -> AppResult<Vec<StaffRecord>> {
        let sql = format!(
            "SELECT * FROM {} WHERE center_id = $1 ORDER BY last_name ASC, first_name ASC",
            category.table()
        );
        let rows = sqlx::query(&sql)
            .bind(center_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list staff", e))?;

        rows.iter().map(|row| decode_record(category, row)).collect()
    }

    /// Fetch one row, only if it belongs to `center_id`.
    pub async fn find_in_center(
        &self,
        category: StaffCategory,
        id: StaffId,
        center_id: CenterId,
    ) -> AppResult<Option<StaffRecord>> {
        let sql = format!(
            "SELECT * FROM {} WHERE id = $1 AND center_id = $2",
            category.table()
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(center_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find staff", e))?;

        row.map(|row| decode_record(category, &row)).transpose()
    }
}

fn decode_record(category: StaffCategory, row: &PgRow) -> AppResult<StaffRecord> {
    let record = match category {
        StaffCategory::Administrative => {
            AdministrativeStaff::from_row(row).map(StaffRecord::Administrative)
        }
        StaffCategory::Medical => MedicalStaff::from_row(row).map(StaffRecord::Medical),
        StaffCategory::Paramedical => {
            ParamedicalStaff::from_row(row).map(StaffRecord::Paramedical)
        }
        StaffCategory::Technical => TechnicalStaff::from_row(row).map(StaffRecord::Technical),
        StaffCategory::Worker => WorkerStaff::from_row(row).map(StaffRecord::Worker),
    };
    record.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to decode {category} staff row"),
            e,
        )
    })
}
