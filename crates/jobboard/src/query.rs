//! Lightweight query runner for hand-written and composed SQL.

use crate::client::GenericClient;
use crate::error::BoardResult;
use crate::fragment::{Fragment, ParamList};
use crate::row::FromRow;
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// A SQL statement with bound positional parameters, ready to execute.
///
/// For fixed statements, bind values one by one:
///
/// ```ignore
/// use jobboard::query;
///
/// let company: Company = query("SELECT * FROM companies WHERE handle = $1")
///     .bind("acme".to_string())
///     .fetch_one_as(&conn)
///     .await?;
/// ```
///
/// Dynamically built statements arrive as a [`Fragment`] and convert
/// directly: `Query::from(fragment)`.
pub struct Query {
    sql: String,
    params: ParamList,
}

/// Create a new query with the given SQL
pub fn query(sql: impl Into<String>) -> Query {
    Query {
        sql: sql.into(),
        params: ParamList::new(),
    }
}

impl From<Fragment> for Query {
    fn from(fragment: Fragment) -> Self {
        let (sql, params) = fragment.into_parts();
        Query { sql, params }
    }
}

impl Query {
    /// Bind a parameter to the query
    pub fn bind<T: ToSql + Sync + Send + 'static>(mut self, value: T) -> Self {
        self.params.push(value);
        self
    }

    /// Execute the query and return all rows
    pub async fn fetch_all(&self, conn: &impl GenericClient) -> BoardResult<Vec<Row>> {
        conn.query(&self.sql, &self.params.as_refs()).await
    }

    /// Execute the query and return all rows mapped to type T
    pub async fn fetch_all_as<T: FromRow>(&self, conn: &impl GenericClient) -> BoardResult<Vec<T>> {
        let rows = self.fetch_all(conn).await?;
        rows.iter().map(T::from_row).collect()
    }

    /// Execute the query and return the first row
    pub async fn fetch_one(&self, conn: &impl GenericClient) -> BoardResult<Row> {
        conn.query_one(&self.sql, &self.params.as_refs()).await
    }

    /// Execute the query and return the first row mapped to type T
    pub async fn fetch_one_as<T: FromRow>(&self, conn: &impl GenericClient) -> BoardResult<T> {
        let row = self.fetch_one(conn).await?;
        T::from_row(&row)
    }

    /// Execute the query and return at most one row
    pub async fn fetch_opt(&self, conn: &impl GenericClient) -> BoardResult<Option<Row>> {
        conn.query_opt(&self.sql, &self.params.as_refs()).await
    }

    /// Execute the query and return at most one row mapped to type T
    pub async fn fetch_opt_as<T: FromRow>(
        &self,
        conn: &impl GenericClient,
    ) -> BoardResult<Option<T>> {
        let row = self.fetch_opt(conn).await?;
        row.as_ref().map(T::from_row).transpose()
    }

    /// Execute the query and return the number of affected rows
    pub async fn execute(&self, conn: &impl GenericClient) -> BoardResult<u64> {
        conn.execute(&self.sql, &self.params.as_refs()).await
    }
}
