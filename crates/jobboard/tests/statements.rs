//! Statement-construction tests over the public API.
//!
//! Everything here is pure: fragments are built and inspected, never
//! executed, so these tests run without a database.

use jobboard::{
    BoardError, ColumnMap, Company, CompanyFilter, CompanyPatch, FieldSet, Job, JobFilter,
    JobPatch, set_clause, set_clause_from,
};

#[test]
fn set_clause_maps_and_falls_back() {
    let fields = FieldSet::new().set("firstName", "Aliya").set("age", 32i32);
    let columns = ColumnMap::new(&[("firstName", "first_name")]);

    let frag = set_clause(&fields, &columns).unwrap();
    assert_eq!(frag.sql(), r#""first_name"=$1, "age"=$2"#);
    assert_eq!(frag.params().len(), 2);
}

#[test]
fn set_clause_requires_fields() {
    let err = set_clause(&FieldSet::new(), &ColumnMap::empty()).unwrap_err();
    assert!(err.is_invalid_argument());
}

#[test]
fn filters_compose_with_appended_predicates() {
    // A caller can put its own placeholder first and number the filter
    // clause after it, then keep appending.
    let filter = JobFilter {
        title: Some("en".to_string()),
        min_salary: Some(2),
        ..Default::default()
    };
    let clause = filter.where_clause_from(1);
    let sql = format!(
        "SELECT id FROM jobs WHERE company_handle = $1 AND {} AND salary <= $4",
        clause.sql()
    );
    assert_eq!(
        sql,
        "SELECT id FROM jobs WHERE company_handle = $1 \
         AND title ILIKE $2 AND salary >= $3 AND salary <= $4"
    );
    assert_eq!(clause.params().len(), 2);
}

#[test]
fn company_listing_statement() {
    let filter = CompanyFilter {
        name: Some("net".to_string()),
        min_employees: Some(1),
        max_employees: Some(500),
    };
    let frag = Company::build_find_all(&filter).unwrap();
    assert_eq!(
        frag.sql(),
        "SELECT handle, name, description, num_employees, logo_url FROM companies \
         WHERE name ILIKE $1 AND num_employees >= $2 AND num_employees <= $3 \
         ORDER BY name"
    );
    assert_eq!(frag.params().len(), 3);
}

#[test]
fn company_listing_rejects_inverted_bounds() {
    let filter = CompanyFilter {
        min_employees: Some(500),
        max_employees: Some(1),
        ..Default::default()
    };
    assert!(matches!(
        Company::build_find_all(&filter),
        Err(BoardError::Validation(_))
    ));
}

#[test]
fn company_update_statement_from_json_patch() {
    let patch: CompanyPatch =
        serde_json::from_str(r#"{"name":"NewName","numEmployees":3}"#).unwrap();
    let frag = Company::build_update("acme", &patch).unwrap();
    assert_eq!(
        frag.sql(),
        "UPDATE companies SET \"name\"=$1, \"num_employees\"=$2 WHERE handle = $3 \
         RETURNING handle, name, description, num_employees, logo_url"
    );
    assert_eq!(frag.params().len(), 3);
}

#[test]
fn job_update_statement() {
    let patch: JobPatch = serde_json::from_str(r#"{"salary":95000,"equity":"0.1"}"#).unwrap();
    let frag = Job::build_update(42, &patch).unwrap();
    assert_eq!(
        frag.sql(),
        "UPDATE jobs SET \"salary\"=$1, \"equity\"=$2 WHERE id = $3 \
         RETURNING id, title, salary, equity, company_handle"
    );
    assert_eq!(frag.params().len(), 3);
}

#[test]
fn job_listing_only_activates_equity_on_true() {
    let on = Job::build_find_all(&JobFilter {
        has_equity: Some(true),
        ..Default::default()
    });
    assert_eq!(
        on.sql(),
        "SELECT id, title, salary, equity, company_handle FROM jobs \
         WHERE equity > 0 ORDER BY title"
    );
    assert!(on.params().is_empty());

    let off = Job::build_find_all(&JobFilter {
        has_equity: Some(false),
        ..Default::default()
    });
    assert_eq!(
        off.sql(),
        "SELECT id, title, salary, equity, company_handle FROM jobs ORDER BY title"
    );
}

#[test]
fn offset_aware_set_clause_for_later_placeholders() {
    let fields = FieldSet::new().set("title", "Engineer");
    let frag = set_clause_from(&fields, &ColumnMap::empty(), 5).unwrap();
    assert_eq!(frag.sql(), r#""title"=$6"#);
}
