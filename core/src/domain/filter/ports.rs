use crate::domain::filter::{
    coercion::TypedValue,
    resolver::{Join, ResolvedAttribute},
    schema::EntityDef,
    value_objects::{PageSpec, SortDirection},
};

/// Escape character used by every `LIKE` the compiler emits.
pub const LIKE_ESCAPE: char = '\\';

/// Literal text matched with `LIKE`; wildcards in the input never leak into the pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LikePattern {
    /// `%text%`
    Contains(String),
    /// `text%`
    Prefix(String),
}

impl LikePattern {
    pub fn pattern(&self) -> String {
        match self {
            LikePattern::Contains(text) => format!("%{}%", escape_like(text)),
            LikePattern::Prefix(text) => format!("{}%", escape_like(text)),
        }
    }
}

fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// One `ORDER BY` term.
#[derive(Debug, Clone)]
pub struct SortKey<E> {
    pub expr: E,
    pub direction: SortDirection,
    /// Read from a joined table. A `DISTINCT` select has to project it.
    pub joined: bool,
}

/// Everything a backend needs to render the final query.
#[derive(Debug, Clone)]
pub struct Selection<E, P> {
    pub root: &'static EntityDef,
    pub root_alias: &'static str,
    pub joins: Vec<Join>,
    pub distinct: bool,
    pub predicate: P,
    pub order: Vec<SortKey<E>>,
    pub page: PageSpec,
}

/// A compiled query that knows the page it selects.
pub trait PagedPlan {
    fn page(&self) -> PageSpec;
}

/// Capability set the compiler renders predicates with.
///
/// The compiler only ever talks to this trait; each persistence backend
/// provides one implementation.
pub trait PredicateBackend {
    type Expr: Clone;
    type Predicate;
    type Plan: PagedPlan;

    /// Column reference for a resolved attribute.
    fn get(&self, attribute: &ResolvedAttribute) -> Self::Expr;
    fn lower(&self, expr: Self::Expr) -> Self::Expr;
    /// Text rendering of a non-text column, used by `LIKE` and keyword search.
    fn as_text(&self, expr: Self::Expr) -> Self::Expr;

    fn equal(&self, expr: Self::Expr, value: TypedValue) -> Self::Predicate;
    fn not_equal(&self, expr: Self::Expr, value: TypedValue) -> Self::Predicate;
    fn less_than(&self, expr: Self::Expr, value: TypedValue) -> Self::Predicate;
    fn less_than_or_equal(&self, expr: Self::Expr, value: TypedValue) -> Self::Predicate;
    fn greater_than(&self, expr: Self::Expr, value: TypedValue) -> Self::Predicate;
    fn greater_than_or_equal(&self, expr: Self::Expr, value: TypedValue) -> Self::Predicate;
    fn is_in(&self, expr: Self::Expr, values: Vec<TypedValue>) -> Self::Predicate;
    fn like(&self, expr: Self::Expr, pattern: &LikePattern) -> Self::Predicate;

    fn conjunction(&self, predicates: Vec<Self::Predicate>) -> Self::Predicate;
    fn disjunction(&self, predicates: Vec<Self::Predicate>) -> Self::Predicate;
    /// Always-true predicate, neutral under conjunction.
    fn identity(&self) -> Self::Predicate;

    /// Builds the plan: root table, `LEFT JOIN`s in order, predicate, sort and page.
    fn select(&self, selection: Selection<Self::Expr, Self::Predicate>) -> Self::Plan;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(LikePattern::Contains("ab".into()).pattern(), "%ab%");
        assert_eq!(LikePattern::Prefix("ab".into()).pattern(), "ab%");
        assert_eq!(
            LikePattern::Contains("50%_off\\".into()).pattern(),
            "%50\\%\\_off\\\\%"
        );
    }
}
