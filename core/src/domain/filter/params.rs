use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use tracing::debug;

use crate::domain::filter::value_objects::{
    AttributePath, ComplexFilters, FilterOperator, PageDefaults, PageSpec, QueryParams, RawValue,
    SortParams,
};

static DOT_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.{2,}").expect("valid regex"));

/// Raw query parameters as a multi-map, keys in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterMap(IndexMap<String, Vec<String>>);

impl ParameterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `value` to the values of `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for ParameterMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReservedKey {
    Page,
    PerPage,
    Size,
    Sort,
    Keyword,
}

impl ReservedKey {
    fn classify(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "page" => Some(ReservedKey::Page),
            "perpage" => Some(ReservedKey::PerPage),
            "size" => Some(ReservedKey::Size),
            "sort" => Some(ReservedKey::Sort),
            "keyword" => Some(ReservedKey::Keyword),
            _ => None,
        }
    }
}

/// Splits a raw parameter map into keyword, simple filters, complex filters,
/// sort and pagination.
#[derive(Debug, Clone)]
pub struct ParameterNormalizer {
    max_page_size: u64,
    ignored_keys: Vec<String>,
}

impl ParameterNormalizer {
    pub fn new(max_page_size: u64, ignored_keys: &[String]) -> Self {
        Self {
            max_page_size,
            ignored_keys: ignored_keys.to_vec(),
        }
    }

    fn is_ignored(&self, key: &str) -> bool {
        self.ignored_keys
            .iter()
            .any(|ignored| ignored.eq_ignore_ascii_case(key))
    }

    /// Handles formats like:
    /// - status=PAID (simple equality)
    /// - company[slug]=acme, company.slug=acme (defaults to eq)
    /// - salary.min[gte]=100, salary.min.gte=100
    /// - sort=field or sort=field,desc
    /// - page=1, perPage=20 (alias size)
    ///
    /// Only the first value of every key is read.
    pub fn normalize(&self, params: &ParameterMap, defaults: PageDefaults) -> QueryParams {
        let mut keyword = None;
        let mut simple = IndexMap::new();
        let mut complex = ComplexFilters::default();
        let mut page = None;
        let mut per_page = None;
        let mut size = None;
        let mut sort = None;

        for (key, values) in params.iter() {
            let Some(first) = values.first() else {
                continue;
            };

            match ReservedKey::classify(key) {
                Some(ReservedKey::Page) => {
                    page.get_or_insert(first.as_str());
                    continue;
                }
                Some(ReservedKey::PerPage) => {
                    per_page.get_or_insert(first.as_str());
                    continue;
                }
                Some(ReservedKey::Size) => {
                    size.get_or_insert(first.as_str());
                    continue;
                }
                Some(ReservedKey::Sort) => {
                    sort.get_or_insert(first.as_str());
                    continue;
                }
                Some(ReservedKey::Keyword) => {
                    keyword.get_or_insert_with(|| first.clone());
                    continue;
                }
                None => {}
            }

            if self.is_ignored(key) {
                debug!(key, "ignoring auxiliary query parameter");
                continue;
            }

            let Some(value) = RawValue::new(first) else {
                debug!(key, "skipping blank query parameter");
                continue;
            };

            if !key.contains(['[', '.']) {
                simple.insert(key.to_string(), value);
                continue;
            }

            match normalize_key(key) {
                Some((path, operator)) => complex.insert(path, operator, value),
                None => debug!(key, "skipping filter key without attribute path"),
            }
        }

        QueryParams {
            keyword,
            simple,
            complex,
            sort: sort.map(SortParams::from_string).unwrap_or_default(),
            page: PageSpec::from_raw(page, per_page.or(size), defaults, self.max_page_size),
        }
    }
}

/// Rewrites bracketed and dotted keys into `(path, operator)`:
///
/// - `company[slug]` -> `company.slug`, eq
/// - `company[slug][eq]` -> `company.slug`, eq
/// - `salary.min[gte]` -> `salary.min`, gte
///
/// Keys with fewer than two segments are not filters.
pub fn normalize_key(key: &str) -> Option<(AttributePath, FilterOperator)> {
    let canonical = key.replace('[', ".").replace(']', "");
    let canonical = DOT_RUNS.replace_all(&canonical, ".");

    let parts: Vec<&str> = canonical.split('.').filter(|p| !p.is_empty()).collect();
    if parts.len() < 2 {
        return None;
    }

    let (last, init) = parts.split_last()?;
    match last.parse::<FilterOperator>() {
        Ok(operator) => AttributePath::from_segments(init).map(|path| (path, operator)),
        Err(_) => AttributePath::from_segments(&parts).map(|path| (path, FilterOperator::Eq)),
    }
}
