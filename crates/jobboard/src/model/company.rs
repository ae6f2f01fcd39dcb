//! Company resource: records and storage operations.

use serde::{Deserialize, Serialize};
use tokio_postgres::Row;
use tracing::debug;

use crate::client::GenericClient;
use crate::error::{BoardError, BoardResult};
use crate::filter::CompanyFilter;
use crate::fragment::Fragment;
use crate::query::{Query, query};
use crate::row::{FromRow, RowExt};
use crate::update::{ColumnMap, FieldSet, set_clause};

const COMPANY_COLUMNS: &str = "handle, name, description, num_employees, logo_url";

/// Wire-name to column-name mapping for patch input.
const PATCH_COLUMNS: ColumnMap<'static> = ColumnMap::new(&[
    ("numEmployees", "num_employees"),
    ("logoUrl", "logo_url"),
]);

/// A company row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl FromRow for Company {
    fn from_row(row: &Row) -> BoardResult<Self> {
        Ok(Self {
            handle: row.try_get_column("handle")?,
            name: row.try_get_column("name")?,
            description: row.try_get_column("description")?,
            num_employees: row.try_get_column("num_employees")?,
            logo_url: row.try_get_column("logo_url")?,
        })
    }
}

/// Input record for creating a company.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub num_employees: Option<i32>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// Partial-update input: only present fields are written.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl CompanyPatch {
    /// Collect present fields, in declaration order, under their wire names.
    fn field_set(&self) -> FieldSet {
        FieldSet::new()
            .set_opt("name", self.name.clone())
            .set_opt("description", self.description.clone())
            .set_opt("numEmployees", self.num_employees)
            .set_opt("logoUrl", self.logo_url.clone())
    }
}

impl Company {
    /// Insert a company and return the stored row.
    ///
    /// A duplicate handle surfaces as [`BoardError::UniqueViolation`].
    pub async fn create(conn: &impl GenericClient, company: &NewCompany) -> BoardResult<Company> {
        debug!(handle = %company.handle, "creating company");
        query(format!(
            "INSERT INTO companies (handle, name, description, num_employees, logo_url) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {COMPANY_COLUMNS}"
        ))
        .bind(company.handle.clone())
        .bind(company.name.clone())
        .bind(company.description.clone())
        .bind(company.num_employees)
        .bind(company.logo_url.clone())
        .fetch_one_as(conn)
        .await
    }

    /// Build the filtered listing statement without executing it.
    pub fn build_find_all(filter: &CompanyFilter) -> BoardResult<Fragment> {
        filter.validate()?;
        let clause = filter.where_clause();
        let (where_sql, params) = clause.into_parts();

        let mut sql = format!("SELECT {COMPANY_COLUMNS} FROM companies");
        if !where_sql.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&where_sql);
        }
        sql.push_str(" ORDER BY name");
        Ok(Fragment::new(sql, params))
    }

    /// List companies matching the filter, ordered by name.
    pub async fn find_all(
        conn: &impl GenericClient,
        filter: &CompanyFilter,
    ) -> BoardResult<Vec<Company>> {
        let fragment = Self::build_find_all(filter)?;
        debug!(filters = fragment.params().len(), "listing companies");
        Query::from(fragment).fetch_all_as(conn).await
    }

    /// Fetch a single company by handle.
    pub async fn get(conn: &impl GenericClient, handle: &str) -> BoardResult<Company> {
        query(format!(
            "SELECT {COMPANY_COLUMNS} FROM companies WHERE handle = $1"
        ))
        .bind(handle.to_string())
        .fetch_opt_as(conn)
        .await?
        .ok_or_else(|| BoardError::not_found(format!("No company: {handle}")))
    }

    /// Build the partial-update statement without executing it.
    ///
    /// The WHERE key takes the placeholder after the SET fields, so the
    /// clause composes without renumbering.
    pub fn build_update(handle: &str, patch: &CompanyPatch) -> BoardResult<Fragment> {
        let set = set_clause(&patch.field_set(), &PATCH_COLUMNS)?;
        let (set_sql, mut params) = set.into_parts();
        let key = params.push(handle.to_string());
        let sql = format!(
            "UPDATE companies SET {set_sql} WHERE handle = ${key} RETURNING {COMPANY_COLUMNS}"
        );
        Ok(Fragment::new(sql, params))
    }

    /// Apply a partial update and return the stored row.
    ///
    /// An empty patch fails with [`BoardError::InvalidArgument`]; an unknown
    /// handle with [`BoardError::NotFound`].
    pub async fn update(
        conn: &impl GenericClient,
        handle: &str,
        patch: &CompanyPatch,
    ) -> BoardResult<Company> {
        let fragment = Self::build_update(handle, patch)?;
        debug!(handle, fields = fragment.params().len() - 1, "updating company");
        Query::from(fragment)
            .fetch_opt_as(conn)
            .await?
            .ok_or_else(|| BoardError::not_found(format!("No company: {handle}")))
    }

    /// Delete a company by handle.
    pub async fn remove(conn: &impl GenericClient, handle: &str) -> BoardResult<()> {
        debug!(handle, "deleting company");
        let affected = query("DELETE FROM companies WHERE handle = $1")
            .bind(handle.to_string())
            .execute(conn)
            .await?;
        if affected == 0 {
            return Err(BoardError::not_found(format!("No company: {handle}")));
        }
        Ok(())
    }
}
