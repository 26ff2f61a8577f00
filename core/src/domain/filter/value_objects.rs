use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;

use crate::domain::filter::errors::FilterError;

/// Upper bound for any page size, whatever the endpoint or configuration asks for.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Filter operator for query parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOperator {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    In,
    Like,
}

impl FilterOperator {
    pub fn token(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "eq",
            FilterOperator::Ne => "ne",
            FilterOperator::Lt => "lt",
            FilterOperator::Lte => "lte",
            FilterOperator::Gt => "gt",
            FilterOperator::Gte => "gte",
            FilterOperator::In => "in",
            FilterOperator::Like => "like",
        }
    }

    /// Upper-bound comparisons pick the end of a day when a bare date is lifted.
    pub fn is_upper_bound(&self) -> bool {
        matches!(self, FilterOperator::Lt | FilterOperator::Lte)
    }
}

impl FromStr for FilterOperator {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "eq" => Ok(FilterOperator::Eq),
            "ne" => Ok(FilterOperator::Ne),
            "lt" => Ok(FilterOperator::Lt),
            "lte" => Ok(FilterOperator::Lte),
            "gt" => Ok(FilterOperator::Gt),
            "gte" => Ok(FilterOperator::Gte),
            "in" => Ok(FilterOperator::In),
            "like" => Ok(FilterOperator::Like),
            _ => Err(FilterError::UnsupportedOperator(s.to_string())),
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Dotted attribute path: every segment but the last names an association.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributePath(Vec<String>);

impl AttributePath {
    /// Splits on `.` and drops empty segments. `None` when nothing is left.
    pub fn parse(dotted: &str) -> Option<Self> {
        Self::from_segments(dotted.split('.'))
    }

    pub fn from_segments<I, S>(segments: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let segments: Vec<String> = segments
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if segments.is_empty() {
            None
        } else {
            Some(Self(segments))
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn terminal(&self) -> &str {
        // never empty, see constructors
        self.0.last().map(String::as_str).unwrap_or_default()
    }

    pub fn associations(&self) -> &[String] {
        &self.0[..self.0.len() - 1]
    }

    /// The first `len` segments joined with `.`; used as the join key.
    pub fn prefix(&self, len: usize) -> String {
        self.0[..len.min(self.0.len())].join(".")
    }

    pub fn is_nested(&self) -> bool {
        self.0.len() > 1
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// Trimmed, non-blank parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawValue(String);

impl RawValue {
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Comma-separated items, trimmed, empties discarded.
    pub fn list_items(&self) -> Vec<&str> {
        self.0
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Filter condition for a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCondition {
    pub path: AttributePath,
    pub operator: FilterOperator,
    pub value: RawValue,
}

/// Complex filters grouped by path, then by operator, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplexFilters(IndexMap<AttributePath, IndexMap<FilterOperator, RawValue>>);

impl ComplexFilters {
    /// A repeated `(path, operator)` keeps its first position and takes the latest value.
    pub fn insert(&mut self, path: AttributePath, operator: FilterOperator, value: RawValue) {
        self.0.entry(path).or_default().insert(operator, value);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn conditions(&self) -> Vec<FilterCondition> {
        self.0
            .iter()
            .flat_map(|(path, ops)| {
                ops.iter().map(|(operator, value)| FilterCondition {
                    path: path.clone(),
                    operator: *operator,
                    value: value.clone(),
                })
            })
            .collect()
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Sort specification for a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub path: AttributePath,
    pub direction: SortDirection,
}

/// Parsed sort parameters, never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortParams {
    pub sorts: Vec<SortSpec>,
}

impl Default for SortParams {
    fn default() -> Self {
        Self {
            sorts: vec![SortSpec {
                path: AttributePath(vec!["id".to_string()]),
                direction: SortDirection::Asc,
            }],
        }
    }
}

impl SortParams {
    /// Parse sort string like "field" or "field,desc"
    pub fn from_string(s: &str) -> Self {
        let mut parts = s.split(',');
        let Some(path) = parts.next().and_then(AttributePath::parse) else {
            return Self::default();
        };

        let direction = match parts.next() {
            Some(dir) if dir.trim().eq_ignore_ascii_case("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        };

        Self {
            sorts: vec![SortSpec { path, direction }],
        }
    }
}

/// Per-endpoint pagination defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageDefaults {
    pub size: u64,
}

impl PageDefaults {
    pub const ORDERS: PageDefaults = PageDefaults { size: 12 };
    pub const USERS: PageDefaults = PageDefaults { size: 20 };
}

/// Zero-based page index and a page size within `[1, MAX_PAGE_SIZE]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec {
    pub index: u64,
    pub size: u64,
}

impl PageSpec {
    /// `page` is 1-based on the wire. Unparseable or non-positive sizes fall
    /// back to the endpoint default.
    pub fn from_raw(
        page: Option<&str>,
        per_page: Option<&str>,
        defaults: PageDefaults,
        max_size: u64,
    ) -> Self {
        let max_size = max_size.clamp(1, MAX_PAGE_SIZE);

        let index = page
            .and_then(|p| p.trim().parse::<i64>().ok())
            .map(|p| p.saturating_sub(1).max(0) as u64)
            .unwrap_or(0);

        let size = per_page
            .and_then(|s| s.trim().parse::<i64>().ok())
            .filter(|s| *s > 0)
            .map(|s| s as u64)
            .unwrap_or(defaults.size)
            .clamp(1, max_size);

        Self { index, size }
    }

    pub fn offset(&self) -> u64 {
        self.index.saturating_mul(self.size)
    }
}

/// Everything the normalizer extracted from one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pub keyword: Option<String>,
    pub simple: IndexMap<String, RawValue>,
    pub complex: ComplexFilters,
    pub sort: SortParams,
    pub page: PageSpec,
}

impl QueryParams {
    pub fn filter_plan(&self, search_fields: &[AttributePath]) -> FilterPlan {
        FilterPlan {
            keyword: self.keyword.clone(),
            search_fields: search_fields.to_vec(),
            simple: self
                .simple
                .iter()
                .filter_map(|(key, value)| {
                    AttributePath::parse(key).map(|path| (path, value.clone()))
                })
                .collect(),
            complex: self.complex.conditions(),
        }
    }
}

/// Schema-independent filter description handed to the predicate builder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPlan {
    pub keyword: Option<String>,
    pub search_fields: Vec<AttributePath>,
    pub simple: IndexMap<AttributePath, RawValue>,
    pub complex: Vec<FilterCondition>,
}

/// A page of results that only knows whether another page follows.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice<T> {
    pub content: Vec<T>,
    pub page: PageSpec,
    pub has_next: bool,
}

impl<T> Slice<T> {
    /// `rows` come from a query limited to `page.size + 1`; the extra row only
    /// signals that a next page exists.
    pub fn from_lookahead(mut rows: Vec<T>, page: PageSpec) -> Self {
        let has_next = rows.len() as u64 > page.size;
        rows.truncate(page.size as usize);

        Self {
            content: rows,
            page,
            has_next,
        }
    }
}
