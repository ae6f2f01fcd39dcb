//! Job resource: records and storage operations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;
use tracing::debug;

use crate::client::GenericClient;
use crate::error::{BoardError, BoardResult};
use crate::filter::JobFilter;
use crate::fragment::Fragment;
use crate::query::{Query, query};
use crate::row::{FromRow, RowExt};
use crate::update::{ColumnMap, FieldSet, set_clause};

const JOB_COLUMNS: &str = "id, title, salary, equity, company_handle";

/// A job row.
///
/// `equity` is a Postgres `NUMERIC` share in `[0, 1]`; it maps to
/// [`Decimal`] so no precision is lost.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

impl FromRow for Job {
    fn from_row(row: &Row) -> BoardResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            title: row.try_get_column("title")?,
            salary: row.try_get_column("salary")?,
            equity: row.try_get_column("equity")?,
            company_handle: row.try_get_column("company_handle")?,
        })
    }
}

/// Input record for creating a job.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub salary: Option<i32>,
    #[serde(default)]
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// Partial-update input: only present fields are written.
///
/// `id` and `companyHandle` are not patchable; a job stays with the company
/// it was posted under.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobPatch {
    pub title: Option<String>,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
}

impl JobPatch {
    /// Collect present fields in declaration order. Job wire names already
    /// match their columns, so the identity mapping applies.
    fn field_set(&self) -> FieldSet {
        FieldSet::new()
            .set_opt("title", self.title.clone())
            .set_opt("salary", self.salary)
            .set_opt("equity", self.equity)
    }
}

impl Job {
    /// Insert a job and return the stored row.
    ///
    /// An unknown company handle surfaces as
    /// [`BoardError::ForeignKeyViolation`].
    pub async fn create(conn: &impl GenericClient, job: &NewJob) -> BoardResult<Job> {
        debug!(company = %job.company_handle, "creating job");
        query(format!(
            "INSERT INTO jobs (title, salary, equity, company_handle) \
             VALUES ($1, $2, $3, $4) RETURNING {JOB_COLUMNS}"
        ))
        .bind(job.title.clone())
        .bind(job.salary)
        .bind(job.equity)
        .bind(job.company_handle.clone())
        .fetch_one_as(conn)
        .await
    }

    /// Build the filtered listing statement without executing it.
    pub fn build_find_all(filter: &JobFilter) -> Fragment {
        let clause = filter.where_clause();
        let (where_sql, params) = clause.into_parts();

        let mut sql = format!("SELECT {JOB_COLUMNS} FROM jobs");
        if !where_sql.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&where_sql);
        }
        sql.push_str(" ORDER BY title");
        Fragment::new(sql, params)
    }

    /// List jobs matching the filter, ordered by title.
    pub async fn find_all(conn: &impl GenericClient, filter: &JobFilter) -> BoardResult<Vec<Job>> {
        let fragment = Self::build_find_all(filter);
        debug!(filters = fragment.params().len(), "listing jobs");
        Query::from(fragment).fetch_all_as(conn).await
    }

    /// Fetch a single job by id.
    pub async fn get(conn: &impl GenericClient, id: i64) -> BoardResult<Job> {
        query(format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"))
            .bind(id)
            .fetch_opt_as(conn)
            .await?
            .ok_or_else(|| BoardError::not_found(format!("No job: {id}")))
    }

    /// Build the partial-update statement without executing it.
    pub fn build_update(id: i64, patch: &JobPatch) -> BoardResult<Fragment> {
        let set = set_clause(&patch.field_set(), &ColumnMap::empty())?;
        let (set_sql, mut params) = set.into_parts();
        let key = params.push(id);
        let sql = format!("UPDATE jobs SET {set_sql} WHERE id = ${key} RETURNING {JOB_COLUMNS}");
        Ok(Fragment::new(sql, params))
    }

    /// Apply a partial update and return the stored row.
    pub async fn update(
        conn: &impl GenericClient,
        id: i64,
        patch: &JobPatch,
    ) -> BoardResult<Job> {
        let fragment = Self::build_update(id, patch)?;
        debug!(id, fields = fragment.params().len() - 1, "updating job");
        Query::from(fragment)
            .fetch_opt_as(conn)
            .await?
            .ok_or_else(|| BoardError::not_found(format!("No job: {id}")))
    }

    /// Delete a job by id.
    pub async fn remove(conn: &impl GenericClient, id: i64) -> BoardResult<()> {
        debug!(id, "deleting job");
        let affected = query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        if affected == 0 {
            return Err(BoardError::not_found(format!("No job: {id}")));
        }
        Ok(())
    }
}
