//! SQL migrations via [`refinery`].
//!
//! Schema definitions live as plain SQL under `migrations/` and are embedded
//! into the application binary:
//!
//! ```ignore
//! use jobboard::{create_pool, migrate};
//!
//! mod embedded {
//!     use jobboard::migrate::embed_migrations;
//!     embed_migrations!("./migrations");
//! }
//!
//! # async fn main_impl() -> jobboard::BoardResult<()> {
//! let pool = create_pool(&std::env::var("DATABASE_URL").unwrap())?;
//! migrate::run_pool(&pool, embedded::migrations::runner()).await?;
//! # Ok(()) }
//! ```

use crate::error::BoardResult;

pub use refinery::{Report, Runner, embed_migrations};

/// Run migrations on a single PostgreSQL connection.
pub async fn run(client: &mut tokio_postgres::Client, runner: Runner) -> BoardResult<Report> {
    Ok(runner.run_async(client).await?)
}

/// Acquire a connection from a pool and run migrations on it.
#[cfg(feature = "pool")]
pub async fn run_pool(pool: &deadpool_postgres::Pool, runner: Runner) -> BoardResult<Report> {
    let mut client = pool.get().await?;
    run(&mut client, runner).await
}
