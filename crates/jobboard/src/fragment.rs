//! Positional-parameter bookkeeping for dynamically built SQL.
//!
//! Everything that assembles SQL at runtime goes through the types in this
//! module: parameters are collected into a [`ParamList`] whose indices match
//! the `$1, $2, ...` placeholders embedded in the statement text, and the
//! finished pair travels as a [`Fragment`] so text and parameters cannot
//! drift apart.

use std::sync::Arc;
use tokio_postgres::types::ToSql;

/// A clone-friendly parameter wrapper using Arc.
///
/// Builders hand parameter values around (and fragments get composed into
/// larger statements), so values are reference-counted rather than copied.
#[derive(Clone)]
pub struct Param(Arc<dyn ToSql + Send + Sync>);

impl Param {
    /// Create a new parameter from any ToSql value.
    pub fn new<T: ToSql + Send + Sync + 'static>(value: T) -> Self {
        Param(Arc::new(value))
    }

    /// Get a reference to the inner value as a ToSql trait object.
    pub fn as_ref(&self) -> &(dyn ToSql + Sync) {
        // Arc<dyn ToSql + Send + Sync> -> &(dyn ToSql + Sync)
        // This is safe because we're just removing Send from the trait bounds
        &*self.0 as &(dyn ToSql + Sync)
    }
}

impl std::fmt::Debug for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Param").field(&"<dyn ToSql>").finish()
    }
}

/// An ordered collection of parameters that can be built into references.
///
/// Parameter `i` (1-based) corresponds to placeholder `$i` in the statement
/// the list was built for.
#[derive(Clone, Debug, Default)]
pub struct ParamList {
    params: Vec<Param>,
}

impl ParamList {
    /// Create a new empty parameter list.
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Add a parameter and return its 1-based index.
    pub fn push<T: ToSql + Send + Sync + 'static>(&mut self, value: T) -> usize {
        self.params.push(Param::new(value));
        self.params.len()
    }

    /// Add a pre-wrapped [`Param`] and return its 1-based index.
    pub fn push_param(&mut self, param: Param) -> usize {
        self.params.push(param);
        self.params.len()
    }

    /// Get the current parameter count.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Get all parameters as references for tokio-postgres.
    pub fn as_refs(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.iter().map(|p| p.as_ref()).collect()
    }

    /// Extend this list with another list's parameters.
    pub fn extend(&mut self, other: &ParamList) {
        self.params.extend(other.params.iter().cloned());
    }
}

/// An immutable pair of SQL text and the parameters its placeholders bind.
///
/// Invariant: the number of placeholders in `sql` equals `params.len()`, and
/// placeholders are numbered contiguously from the offset the fragment was
/// built at (offset 0 means the first placeholder is `$1`).
#[derive(Clone, Debug)]
pub struct Fragment {
    sql: String,
    params: ParamList,
}

impl Fragment {
    pub(crate) fn new(sql: impl Into<String>, params: ParamList) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// An empty fragment: no text, no parameters.
    pub fn empty() -> Self {
        Self::new(String::new(), ParamList::new())
    }

    /// The SQL text of this fragment.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// The parameters bound by this fragment's placeholders.
    pub fn params(&self) -> &ParamList {
        &self.params
    }

    /// Whether the fragment carries no SQL text (and thus no parameters).
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// Decompose into SQL text and parameters for further composition.
    pub fn into_parts(self) -> (String, ParamList) {
        (self.sql, self.params)
    }
}

/// Render a column name as a double-quoted SQL identifier.
///
/// Embedded `"` characters are escaped as `""`, so the result is safe to
/// splice into statement text even when the name originates from a
/// caller-supplied mapping.
pub fn quote_ident(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    out.push('"');
    for ch in name.chars() {
        if ch == '"' {
            out.push('"');
            out.push('"');
        } else {
            out.push(ch);
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_ident_simple() {
        assert_eq!(quote_ident("num_employees"), r#""num_employees""#);
    }

    #[test]
    fn quote_ident_escapes_quotes() {
        assert_eq!(quote_ident(r#"has"quote"#), r#""has""quote""#);
    }

    #[test]
    fn param_list_indices_are_one_based() {
        let mut params = ParamList::new();
        assert_eq!(params.push("a"), 1);
        assert_eq!(params.push(2i32), 2);
        assert_eq!(params.len(), 2);
        assert_eq!(params.as_refs().len(), 2);
    }

    #[test]
    fn param_list_extend_preserves_order() {
        let mut a = ParamList::new();
        a.push("x");
        let mut b = ParamList::new();
        b.push("y");
        b.push("z");
        a.extend(&b);
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn empty_fragment() {
        let frag = Fragment::empty();
        assert!(frag.is_empty());
        assert_eq!(frag.sql(), "");
        assert!(frag.params().is_empty());
    }
}
