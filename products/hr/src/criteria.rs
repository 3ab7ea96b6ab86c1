use entity::employees;
use sea_orm::{
    ColumnTrait, EntityTrait, QueryFilter, Select,
    sea_query::{Expr, Func, LikeExpr},
};
use serde::Deserialize;
use tracing::debug;

use crate::ids::parse_employee_id;

const LIKE_ESCAPE: char = '\\';

/// Optional filters for an employee search. Both absent means "match all".
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct EmployeeSearchCriteria {
    pub id: Option<String>,
    pub name: Option<String>,
}

impl EmployeeSearchCriteria {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: None,
        }
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Composes the search into a select over `employees` without running it.
///
/// A malformed id filter is dropped rather than rejected, so it behaves like no
/// id filter at all. The name filter is a case-insensitive literal substring match;
/// whitespace only decides blankness and otherwise takes part in the match.
pub fn build_query(criteria: &EmployeeSearchCriteria) -> Select<employees::Entity> {
    let mut query = employees::Entity::find();

    if let Some(raw) = non_blank(criteria.id.as_deref()) {
        match parse_employee_id(raw) {
            Some(id) => query = query.filter(employees::Column::Id.eq(id)),
            None => debug!(id = raw, "ignoring malformed id filter"),
        }
    }

    if let Some(name) = non_blank(criteria.name.as_deref()) {
        let pattern = format!("%{}%", escape_like(&name.to_lowercase()));
        let name_expr = Expr::expr(Func::lower(Expr::col(employees::Column::Name)));
        query = query.filter(name_expr.like(LikeExpr::new(pattern).escape(LIKE_ESCAPE)));
    }

    query
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait, Value};
    use uuid::Uuid;

    fn bound_values(criteria: &EmployeeSearchCriteria) -> Vec<Value> {
        build_query(criteria)
            .build(DbBackend::Postgres)
            .values
            .map(|values| values.0)
            .unwrap_or_default()
    }

    fn sql(criteria: &EmployeeSearchCriteria) -> String {
        build_query(criteria).build(DbBackend::Postgres).sql
    }

    #[test]
    fn empty_criteria_is_unconstrained() {
        assert!(!sql(&EmployeeSearchCriteria::all()).contains("WHERE"));
        assert!(bound_values(&EmployeeSearchCriteria::all()).is_empty());
    }

    #[test]
    fn blank_fields_count_as_absent() {
        let criteria = EmployeeSearchCriteria {
            id: Some("   ".into()),
            name: Some("\t".into()),
        };
        assert!(!sql(&criteria).contains("WHERE"));
    }

    #[test]
    fn valid_id_adds_equality() {
        let id = Uuid::new_v4();
        let criteria = EmployeeSearchCriteria::by_id(id.to_string());
        assert!(sql(&criteria).contains(r#""employees"."id" = $1"#));
        assert_eq!(bound_values(&criteria), vec![Value::from(id)]);
    }

    #[test]
    fn malformed_id_is_skipped() {
        let criteria = EmployeeSearchCriteria::by_id("not-a-uuid");
        assert!(!sql(&criteria).contains("WHERE"));
    }

    #[test]
    fn name_filter_is_lowercased_substring() {
        let criteria = EmployeeSearchCriteria::by_name("JoHn");
        let statement = sql(&criteria);
        assert!(statement.contains(r#"LOWER("name") LIKE $1"#), "{statement}");
        assert_eq!(bound_values(&criteria), vec![Value::from("%john%")]);
    }

    #[test]
    fn surrounding_spaces_are_part_of_the_needle() {
        let criteria = EmployeeSearchCriteria::by_name(" DoE ");
        assert_eq!(bound_values(&criteria), vec![Value::from("% doe %")]);
    }

    #[test]
    fn both_filters_are_anded() {
        let id = Uuid::new_v4();
        let criteria = EmployeeSearchCriteria::by_id(id.to_string()).with_name("doe");
        let statement = sql(&criteria);
        assert!(statement.contains(" AND "), "{statement}");
        assert_eq!(
            bound_values(&criteria),
            vec![Value::from(id), Value::from("%doe%")]
        );
    }

    #[test]
    fn wildcards_in_name_are_literal() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        let criteria = EmployeeSearchCriteria::by_name("a_b");
        assert_eq!(bound_values(&criteria), vec![Value::from("%a\\_b%")]);
    }
}
