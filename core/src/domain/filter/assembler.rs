use tracing::{debug, warn};

use crate::domain::{
    common::FilterConfig,
    filter::{
        coercion::ValueCoercer,
        errors::FilterError,
        params::{ParameterMap, ParameterNormalizer},
        ports::{PredicateBackend, Selection, SortKey},
        predicate::PredicateBuilder,
        resolver::PathResolver,
        schema::{Cardinality, EntityDef, Schema},
        value_objects::{AttributePath, FilterPlan, PageDefaults, PageSpec, SortParams},
    },
};

/// Combines predicate, sort and page into one backend plan.
pub struct QueryAssembler<'a> {
    schema: &'a dyn Schema,
    root: &'static EntityDef,
    coercer: ValueCoercer,
}

impl<'a> QueryAssembler<'a> {
    pub fn new(schema: &'a dyn Schema, root: &'static EntityDef) -> Self {
        Self {
            schema,
            root,
            coercer: ValueCoercer::new(),
        }
    }

    pub fn with_coercer(mut self, coercer: ValueCoercer) -> Self {
        self.coercer = coercer;
        self
    }

    /// The predicate is `keyword AND simple AND complex`. Either the whole
    /// plan is built or the first error is returned.
    pub fn assemble<B: PredicateBackend>(
        &self,
        plan: &FilterPlan,
        sort: &SortParams,
        page: PageSpec,
        backend: &B,
    ) -> Result<B::Plan, FilterError> {
        let mut resolver = PathResolver::new(self.schema, self.root);

        let predicate = {
            let mut builder = PredicateBuilder::new(&mut resolver, &self.coercer, backend);
            let keyword = builder.keyword(plan.keyword.as_deref(), &plan.search_fields)?;
            let simple = builder.simple(&plan.simple)?;
            let complex = builder.complex(&plan.complex)?;
            builder.all(vec![keyword, simple, complex])
        };

        let root_alias = resolver.root_alias();

        let mut order = Vec::with_capacity(sort.sorts.len());
        for spec in &sort.sorts {
            let attribute = resolver.resolve(&spec.path)?;
            if resolver.crosses_to_many(&attribute) {
                return Err(FilterError::UnsupportedSort {
                    path: spec.path.to_string(),
                });
            }
            order.push(SortKey {
                expr: backend.get(&attribute),
                direction: spec.direction,
                joined: attribute.is_joined(root_alias),
            });
        }

        let joins = resolver.into_joins();
        let distinct = joins.iter().any(|j| j.cardinality == Cardinality::ToMany);

        debug!(
            entity = self.root.name,
            joins = joins.len(),
            distinct,
            page = page.index,
            size = page.size,
            "assembled filter plan"
        );

        Ok(backend.select(Selection {
            root: self.root,
            root_alias,
            joins,
            distinct,
            predicate,
            order,
            page,
        }))
    }
}

/// Static description of a list endpoint.
#[derive(Debug, Clone, Copy)]
pub struct EndpointSpec {
    pub entity: &'static str,
    pub search_fields: &'static [&'static str],
    pub page_defaults: PageDefaults,
}

impl EndpointSpec {
    pub fn search_paths(&self) -> Vec<AttributePath> {
        self.search_fields
            .iter()
            .filter_map(|f| AttributePath::parse(f))
            .collect()
    }
}

/// Entry point: raw query parameters in, backend plan out.
#[derive(Clone)]
pub struct FilterCompiler {
    schema: &'static dyn Schema,
    normalizer: ParameterNormalizer,
}

impl FilterCompiler {
    pub fn new(schema: &'static dyn Schema, config: &FilterConfig) -> Self {
        Self {
            schema,
            normalizer: ParameterNormalizer::new(config.max_page_size, &config.ignored_params),
        }
    }

    pub fn compile<B: PredicateBackend>(
        &self,
        params: &ParameterMap,
        endpoint: &EndpointSpec,
        backend: &B,
    ) -> Result<B::Plan, FilterError> {
        self.compile_with(params, endpoint, backend, ValueCoercer::new())
    }

    /// Same as [`FilterCompiler::compile`] with an explicit clock for `now`/`today`.
    pub fn compile_with<B: PredicateBackend>(
        &self,
        params: &ParameterMap,
        endpoint: &EndpointSpec,
        backend: &B,
        coercer: ValueCoercer,
    ) -> Result<B::Plan, FilterError> {
        let root = self
            .schema
            .entity(endpoint.entity)
            .ok_or_else(|| FilterError::UnknownEntity(endpoint.entity.to_string()))?;

        let query = self.normalizer.normalize(params, endpoint.page_defaults);
        let plan = query.filter_plan(&endpoint.search_paths());

        QueryAssembler::new(self.schema, root)
            .with_coercer(coercer)
            .assemble(&plan, &query.sort, query.page, backend)
            .inspect_err(|e| warn!(entity = endpoint.entity, error = %e, "rejected filter"))
    }
}
