//! WHERE-clause construction for listing filters.
//!
//! One filter record per resource, every field optional. The request layer
//! decodes query input into these records (serde handles the camelCase wire
//! names and type checking); the builders here turn whatever subset of
//! filters is present into a parameterized predicate fragment.
//!
//! Filter keys are evaluated in a fixed order per resource, never in input
//! order, so identical filter sets always produce byte-identical SQL. A
//! returned fragment never includes the `WHERE ` keyword itself: callers
//! prefix it when the fragment is non-empty and omit the clause entirely
//! otherwise.

use serde::Deserialize;

use crate::error::{BoardError, BoardResult};
use crate::fragment::{Fragment, ParamList};

/// Search criteria for listing companies.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyFilter {
    /// Case-insensitive substring match on the company name.
    pub name: Option<String>,
    /// Lower bound on employee count.
    pub min_employees: Option<i32>,
    /// Upper bound on employee count.
    pub max_employees: Option<i32>,
}

impl CompanyFilter {
    /// Reject bound combinations that cannot match anything.
    ///
    /// This is resource-level business validation and runs in the listing
    /// operation, before clause construction; the clause builder itself
    /// assumes its input has already been accepted.
    pub fn validate(&self) -> BoardResult<()> {
        if let (Some(min), Some(max)) = (self.min_employees, self.max_employees) {
            if min > max {
                return Err(BoardError::validation(format!(
                    "minEmployees {min} cannot be greater than maxEmployees {max}"
                )));
            }
        }
        Ok(())
    }

    /// Build the WHERE predicates for this filter, placeholders from `$1`.
    pub fn where_clause(&self) -> Fragment {
        self.where_clause_from(0)
    }

    /// Build the WHERE predicates with placeholders starting at `$offset + 1`.
    ///
    /// Key order is fixed: name, then minEmployees, then maxEmployees.
    pub fn where_clause_from(&self, offset: usize) -> Fragment {
        let mut params = ParamList::new();
        let mut predicates = Vec::new();

        if let Some(name) = &self.name {
            let idx = params.push(format!("%{name}%")) + offset;
            predicates.push(format!("name ILIKE ${idx}"));
        }
        if let Some(min) = self.min_employees {
            let idx = params.push(min) + offset;
            predicates.push(format!("num_employees >= ${idx}"));
        }
        if let Some(max) = self.max_employees {
            let idx = params.push(max) + offset;
            predicates.push(format!("num_employees <= ${idx}"));
        }

        Fragment::new(predicates.join(" AND "), params)
    }
}

/// Search criteria for listing jobs.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobFilter {
    /// Case-insensitive substring match on the job title.
    pub title: Option<String>,
    /// Lower bound on salary.
    pub min_salary: Option<i32>,
    /// When `true`, only jobs with a non-zero equity share match.
    ///
    /// `false` means the same as absent: no equity predicate at all. Only an
    /// explicit `true` activates the filter.
    pub has_equity: Option<bool>,
}

impl JobFilter {
    /// Build the WHERE predicates for this filter, placeholders from `$1`.
    pub fn where_clause(&self) -> Fragment {
        self.where_clause_from(0)
    }

    /// Build the WHERE predicates with placeholders starting at `$offset + 1`.
    ///
    /// Key order is fixed: title, then minSalary, then hasEquity. The equity
    /// predicate binds no parameter.
    pub fn where_clause_from(&self, offset: usize) -> Fragment {
        let mut params = ParamList::new();
        let mut predicates = Vec::new();

        if let Some(title) = &self.title {
            let idx = params.push(format!("%{title}%")) + offset;
            predicates.push(format!("title ILIKE ${idx}"));
        }
        if let Some(min) = self.min_salary {
            let idx = params.push(min) + offset;
            predicates.push(format!("salary >= ${idx}"));
        }
        if self.has_equity == Some(true) {
            predicates.push("equity > 0".to_string());
        }

        Fragment::new(predicates.join(" AND "), params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;
    use tokio_postgres::types::{ToSql, Type};

    fn encoded(param: &(dyn ToSql + Sync), ty: &Type) -> Vec<u8> {
        let mut buf = BytesMut::new();
        param.to_sql_checked(ty, &mut buf).unwrap();
        buf.to_vec()
    }

    #[test]
    fn company_no_filters_is_empty() {
        let frag = CompanyFilter::default().where_clause();
        assert!(frag.is_empty());
        assert!(frag.params().is_empty());
    }

    #[test]
    fn company_name_only() {
        let filter = CompanyFilter {
            name: Some("net".to_string()),
            ..Default::default()
        };
        let frag = filter.where_clause();
        assert_eq!(frag.sql(), "name ILIKE $1");
        assert_eq!(encoded(frag.params().as_refs()[0], &Type::TEXT), b"%net%".to_vec());
    }

    #[test]
    fn company_all_filters_in_fixed_order() {
        let filter = CompanyFilter {
            name: Some("c".to_string()),
            min_employees: Some(2),
            max_employees: Some(10),
        };
        let frag = filter.where_clause();
        assert_eq!(
            frag.sql(),
            "name ILIKE $1 AND num_employees >= $2 AND num_employees <= $3"
        );
        assert_eq!(frag.params().len(), 3);
    }

    #[test]
    fn company_bounds_without_name() {
        let filter = CompanyFilter {
            min_employees: Some(2),
            max_employees: Some(10),
            ..Default::default()
        };
        let frag = filter.where_clause();
        assert_eq!(frag.sql(), "num_employees >= $1 AND num_employees <= $2");
    }

    #[test]
    fn company_validate_rejects_inverted_bounds() {
        let filter = CompanyFilter {
            min_employees: Some(10),
            max_employees: Some(2),
            ..Default::default()
        };
        assert!(matches!(
            filter.validate(),
            Err(BoardError::Validation(_))
        ));

        // A single bound is always fine.
        let filter = CompanyFilter {
            min_employees: Some(10),
            ..Default::default()
        };
        assert!(filter.validate().is_ok());
    }

    #[test]
    fn company_offset_shifts_placeholders() {
        let filter = CompanyFilter {
            name: Some("c".to_string()),
            min_employees: Some(2),
            ..Default::default()
        };
        let frag = filter.where_clause_from(3);
        assert_eq!(frag.sql(), "name ILIKE $4 AND num_employees >= $5");
        assert_eq!(frag.params().len(), 2);
    }

    #[test]
    fn job_title_and_min_salary() {
        let filter = JobFilter {
            title: Some("en".to_string()),
            min_salary: Some(2),
            ..Default::default()
        };
        let frag = filter.where_clause();
        assert_eq!(frag.sql(), "title ILIKE $1 AND salary >= $2");

        let refs = frag.params().as_refs();
        assert_eq!(encoded(refs[0], &Type::TEXT), b"%en%".to_vec());
        assert_eq!(encoded(refs[1], &Type::INT4), 2i32.to_be_bytes().to_vec());
    }

    #[test]
    fn job_equity_binds_no_parameter() {
        let filter = JobFilter {
            has_equity: Some(true),
            ..Default::default()
        };
        let frag = filter.where_clause();
        assert_eq!(frag.sql(), "equity > 0");
        assert!(frag.params().is_empty());
    }

    #[test]
    fn job_equity_false_means_absent() {
        let explicit_false = JobFilter {
            has_equity: Some(false),
            ..Default::default()
        };
        let absent = JobFilter::default();
        assert_eq!(explicit_false.where_clause().sql(), "");
        assert_eq!(absent.where_clause().sql(), "");
    }

    #[test]
    fn job_all_filters() {
        let filter = JobFilter {
            title: Some("dev".to_string()),
            min_salary: Some(50_000),
            has_equity: Some(true),
        };
        let frag = filter.where_clause();
        assert_eq!(frag.sql(), "title ILIKE $1 AND salary >= $2 AND equity > 0");
        assert_eq!(frag.params().len(), 2);
    }

    #[test]
    fn builders_are_idempotent() {
        let filter = JobFilter {
            title: Some("en".to_string()),
            min_salary: Some(2),
            has_equity: Some(true),
        };
        let a = filter.where_clause();
        let b = filter.where_clause();
        assert_eq!(a.sql(), b.sql());
        assert_eq!(a.params().len(), b.params().len());
    }

    #[test]
    fn filters_decode_from_camel_case() {
        let filter: CompanyFilter =
            serde_json::from_str(r#"{"name":"net","minEmployees":2,"maxEmployees":9}"#).unwrap();
        assert_eq!(filter.name.as_deref(), Some("net"));
        assert_eq!(filter.min_employees, Some(2));
        assert_eq!(filter.max_employees, Some(9));

        let filter: JobFilter = serde_json::from_str(r#"{"hasEquity":true}"#).unwrap();
        assert_eq!(filter.has_equity, Some(true));
    }
}
