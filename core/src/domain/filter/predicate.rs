use indexmap::IndexMap;

use crate::domain::filter::{
    coercion::{TypedValue, ValueCoercer},
    errors::FilterError,
    ports::{LikePattern, PredicateBackend},
    resolver::{PathResolver, ResolvedAttribute},
    schema::DeclaredType,
    value_objects::{AttributePath, FilterCondition, FilterOperator, RawValue},
};

/// Search fields matched by prefix so their indexes stay usable.
const PREFIX_FIELDS: [&str; 2] = ["phone", "email"];

/// Turns filter conditions into backend predicates, installing joins through
/// the resolver as paths are met.
pub struct PredicateBuilder<'r, 'a, B: PredicateBackend> {
    resolver: &'r mut PathResolver<'a>,
    coercer: &'r ValueCoercer,
    backend: &'r B,
}

impl<'r, 'a, B: PredicateBackend> PredicateBuilder<'r, 'a, B> {
    pub fn new(
        resolver: &'r mut PathResolver<'a>,
        coercer: &'r ValueCoercer,
        backend: &'r B,
    ) -> Self {
        Self {
            resolver,
            coercer,
            backend,
        }
    }

    /// Disjunction of one `LIKE` per search field. A blank keyword or an empty
    /// field list is the identity.
    pub fn keyword(
        &mut self,
        keyword: Option<&str>,
        fields: &[AttributePath],
    ) -> Result<B::Predicate, FilterError> {
        let Some(keyword) = keyword.map(str::trim).filter(|k| !k.is_empty()) else {
            return Ok(self.backend.identity());
        };
        if fields.is_empty() {
            return Ok(self.backend.identity());
        }

        let keyword = keyword.to_lowercase();
        let mut predicates = Vec::with_capacity(fields.len());

        for field in fields {
            let attribute = self.resolver.resolve(field)?;
            let pattern = if PREFIX_FIELDS
                .iter()
                .any(|f| f.eq_ignore_ascii_case(field.terminal()))
            {
                LikePattern::Prefix(keyword.clone())
            } else {
                LikePattern::Contains(keyword.clone())
            };

            let expr = self.backend.lower(self.text(&attribute));
            predicates.push(self.backend.like(expr, &pattern));
        }

        Ok(self.backend.disjunction(predicates))
    }

    /// Equality on every bare key.
    pub fn simple(
        &mut self,
        filters: &IndexMap<AttributePath, RawValue>,
    ) -> Result<B::Predicate, FilterError> {
        let mut predicates = Vec::with_capacity(filters.len());
        for (path, value) in filters {
            predicates.push(self.condition(path, FilterOperator::Eq, value)?);
        }
        Ok(self.all(predicates))
    }

    pub fn complex(&mut self, conditions: &[FilterCondition]) -> Result<B::Predicate, FilterError> {
        let mut predicates = Vec::with_capacity(conditions.len());
        for condition in conditions {
            predicates.push(self.condition(
                &condition.path,
                condition.operator,
                &condition.value,
            )?);
        }
        Ok(self.all(predicates))
    }

    pub fn all(&self, predicates: Vec<B::Predicate>) -> B::Predicate {
        if predicates.is_empty() {
            self.backend.identity()
        } else {
            self.backend.conjunction(predicates)
        }
    }

    pub fn condition(
        &mut self,
        path: &AttributePath,
        operator: FilterOperator,
        raw: &RawValue,
    ) -> Result<B::Predicate, FilterError> {
        let attribute = self.resolver.resolve(path)?;
        let declared_type = attribute.declared_type;

        match operator {
            FilterOperator::Like => {
                let expr = self.backend.lower(self.text(&attribute));
                let pattern = LikePattern::Contains(raw.as_str().to_lowercase());
                Ok(self.backend.like(expr, &pattern))
            }
            FilterOperator::In => {
                let items = raw.list_items();
                if items.is_empty() {
                    return Err(FilterError::EmptyList {
                        path: path.to_string(),
                    });
                }

                let values = items
                    .into_iter()
                    .map(|item| self.coerce(path, operator, item, declared_type))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(self.backend.is_in(self.backend.get(&attribute), values))
            }
            FilterOperator::Eq | FilterOperator::Ne => {
                let value = self.coerce(path, operator, raw.as_str(), declared_type)?;
                let expr = self.backend.get(&attribute);
                Ok(match operator {
                    FilterOperator::Eq => self.backend.equal(expr, value),
                    _ => self.backend.not_equal(expr, value),
                })
            }
            FilterOperator::Lt | FilterOperator::Lte | FilterOperator::Gt | FilterOperator::Gte => {
                if declared_type == DeclaredType::Bool {
                    return Err(FilterError::UnsupportedComparison {
                        declared_type,
                        operator,
                    });
                }

                let value = self.ordered_value(path, operator, raw.as_str(), declared_type)?;
                let expr = self.backend.get(&attribute);
                Ok(match operator {
                    FilterOperator::Lt => self.backend.less_than(expr, value),
                    FilterOperator::Lte => self.backend.less_than_or_equal(expr, value),
                    FilterOperator::Gt => self.backend.greater_than(expr, value),
                    _ => self.backend.greater_than_or_equal(expr, value),
                })
            }
        }
    }

    /// Right-hand side of an ordered comparison: bare dates against datetime
    /// columns become day bounds, everything else is coerced as is.
    fn ordered_value(
        &self,
        path: &AttributePath,
        operator: FilterOperator,
        raw: &str,
        declared_type: DeclaredType,
    ) -> Result<TypedValue, FilterError> {
        if let DeclaredType::Temporal(kind) = declared_type
            && let Some(bound) = self.coercer.day_bound(raw, kind, operator)
        {
            return Ok(TypedValue::Temporal(bound));
        }
        self.coerce(path, operator, raw, declared_type)
    }

    fn coerce(
        &self,
        path: &AttributePath,
        operator: FilterOperator,
        raw: &str,
        target: DeclaredType,
    ) -> Result<TypedValue, FilterError> {
        self.coercer
            .coerce(raw, target)
            .ok_or_else(|| FilterError::Coercion {
                path: path.to_string(),
                operator,
                raw: raw.to_string(),
                target,
            })
    }

    fn text(&self, attribute: &ResolvedAttribute) -> B::Expr {
        let expr = self.backend.get(attribute);
        match attribute.declared_type {
            DeclaredType::String => expr,
            _ => self.backend.as_text(expr),
        }
    }
}
