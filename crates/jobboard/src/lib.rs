//! # jobboard
//!
//! The PostgreSQL data layer for a job-board service.
//!
//! ## Features
//!
//! - **Dynamic statement construction**: partial-update `SET` clauses and
//!   per-resource `WHERE` filters built as parameterized fragments with
//!   deterministic placeholder numbering (never string concatenation)
//! - **Resource operations**: company and job CRUD in repository style,
//!   generic over direct connections, pooled clients, and transactions
//! - **Type-safe mapping**: Row → struct via the `FromRow` trait
//! - **Safe defaults**: empty partial updates are rejected, listings carry a
//!   deterministic ordering
//!
//! ## Partial updates
//!
//! ```ignore
//! use jobboard::{Company, CompanyPatch};
//!
//! let patch = CompanyPatch {
//!     num_employees: Some(42),
//!     ..Default::default()
//! };
//! let company = Company::update(&client, "acme", &patch).await?;
//! ```
//!
//! ## Filtered listings
//!
//! ```ignore
//! use jobboard::{Job, JobFilter};
//!
//! let filter = JobFilter {
//!     title: Some("engineer".into()),
//!     min_salary: Some(90_000),
//!     has_equity: Some(true),
//! };
//! let jobs = Job::find_all(&client, &filter).await?;
//! ```

pub mod client;
pub mod error;
pub mod filter;
pub mod fragment;
pub mod model;
pub mod query;
pub mod row;
pub mod update;

pub use client::GenericClient;
pub use error::{BoardError, BoardResult};
pub use filter::{CompanyFilter, JobFilter};
pub use fragment::{Fragment, Param, ParamList, quote_ident};
pub use model::{Company, CompanyPatch, Job, JobPatch, NewCompany, NewJob};
pub use query::{Query, query};
pub use row::{FromRow, RowExt};
pub use update::{ColumnMap, FieldSet, set_clause, set_clause_from};

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(feature = "pool")]
pub use pool::{create_pool, create_pool_with_config, create_pool_with_manager_config};

#[cfg(feature = "migrate")]
pub mod migrate;
