//! Resource records and their storage operations.
//!
//! Each resource module owns its row type, its insert/patch input records,
//! and the operations that embed dynamically built fragments into full
//! statements and execute them through a [`GenericClient`](crate::GenericClient).

pub mod company;
pub mod job;

pub use company::{Company, CompanyPatch, NewCompany};
pub use job::{Job, JobPatch, NewJob};
