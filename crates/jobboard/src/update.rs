//! SET-clause construction for partial updates.
//!
//! A partial update writes only the fields the caller supplied. The caller
//! collects those fields into a [`FieldSet`] (already validated and typed by
//! the request layer), names the storage columns through a [`ColumnMap`],
//! and [`set_clause`] turns the pair into a parameterized fragment:
//!
//! ```ignore
//! use jobboard::update::{set_clause, ColumnMap, FieldSet};
//!
//! let fields = FieldSet::new()
//!     .set("firstName", "Aliya")
//!     .set("age", 32i32);
//! let columns = ColumnMap::new(&[("firstName", "first_name")]);
//!
//! let frag = set_clause(&fields, &columns)?;
//! assert_eq!(frag.sql(), r#""first_name"=$1, "age"=$2"#);
//! # Ok::<(), jobboard::BoardError>(())
//! ```
//!
//! The caller embeds the fragment into a full `UPDATE ... SET <fragment>
//! WHERE ...` statement; any further placeholders it appends continue from
//! `fields.len() + 1`.

use crate::error::{BoardError, BoardResult};
use crate::fragment::{Fragment, Param, ParamList, quote_ident};
use tokio_postgres::types::ToSql;

/// An ordered set of `(field name, new value)` pairs for a partial update.
///
/// Fields keep their insertion order; that order decides placeholder
/// numbering. Keys are expected to be unique (the request layer decodes them
/// from a JSON object) but the builder does not deduplicate.
#[derive(Clone, Debug, Default)]
pub struct FieldSet {
    fields: Vec<(String, Param)>,
}

impl FieldSet {
    /// Create an empty field set.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add a field value.
    pub fn set<T: ToSql + Send + Sync + 'static>(mut self, field: &str, value: T) -> Self {
        self.fields.push((field.to_string(), Param::new(value)));
        self
    }

    /// Add an optional field value (None => skip).
    pub fn set_opt<T: ToSql + Send + Sync + 'static>(self, field: &str, value: Option<T>) -> Self {
        if let Some(v) = value {
            self.set(field, v)
        } else {
            self
        }
    }

    /// Number of fields in the set.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the set holds no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A field-name to column-name mapping for [`set_clause`].
///
/// Fields absent from the map use their own name as the column name. The map
/// is pure lookup metadata and is never mutated.
#[derive(Clone, Copy, Debug)]
pub struct ColumnMap<'a> {
    entries: &'a [(&'a str, &'a str)],
}

impl<'a> ColumnMap<'a> {
    /// Create a mapping from `(field, column)` pairs.
    pub const fn new(entries: &'a [(&'a str, &'a str)]) -> Self {
        Self { entries }
    }

    /// A mapping with no entries: every field maps to itself.
    pub const fn empty() -> Self {
        Self { entries: &[] }
    }

    /// Resolve a field name to its storage column name.
    pub fn resolve<'f>(&'f self, field: &'f str) -> &'f str {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, col)| *col)
            .unwrap_or(field)
    }
}

/// Build a `SET` clause fragment for a partial update, placeholders from `$1`.
///
/// See [`set_clause_from`] for the offset-aware variant.
pub fn set_clause(fields: &FieldSet, columns: &ColumnMap<'_>) -> BoardResult<Fragment> {
    set_clause_from(fields, columns, 0)
}

/// Build a `SET` clause fragment with placeholders starting at `$offset + 1`.
///
/// `offset` is the number of placeholders the caller has already emitted in
/// the surrounding statement. Fields are rendered in their given order as
/// `"column"=$n` pairs joined by `, `; values pass through untouched.
///
/// Fails with [`BoardError::InvalidArgument`] when `fields` is empty: an
/// update that writes nothing is a usage error, and the builder re-asserts
/// what the request layer should already have rejected.
pub fn set_clause_from(
    fields: &FieldSet,
    columns: &ColumnMap<'_>,
    offset: usize,
) -> BoardResult<Fragment> {
    if fields.is_empty() {
        return Err(BoardError::invalid_argument("no fields to update"));
    }

    let mut params = ParamList::new();
    let mut parts = Vec::with_capacity(fields.len());
    for (field, value) in &fields.fields {
        let idx = params.push_param(value.clone()) + offset;
        parts.push(format!("{}=${}", quote_ident(columns.resolve(field)), idx));
    }

    Ok(Fragment::new(parts.join(", "), params))
}
