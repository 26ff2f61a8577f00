use std::sync::Arc;

use tracing::{debug, instrument};

use crate::domain::{
    common::entities::app_errors::CoreError,
    filter::{
        assembler::{EndpointSpec, FilterCompiler},
        params::ParameterMap,
        ports::{PagedPlan, PredicateBackend},
        value_objects::{PageDefaults, Slice},
    },
    order::{entities::Order, ports::OrderRepository},
};

pub const ORDERS_ENDPOINT: EndpointSpec = EndpointSpec {
    entity: "Order",
    search_fields: &["status", "user.name"],
    page_defaults: PageDefaults::ORDERS,
};

pub struct OrderService<R, B> {
    repository: Arc<R>,
    backend: B,
    compiler: FilterCompiler,
}

impl<R, B: Clone> Clone for OrderService<R, B> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            backend: self.backend.clone(),
            compiler: self.compiler.clone(),
        }
    }
}

impl<R, B> OrderService<R, B>
where
    B: PredicateBackend,
    B::Plan: Send + Sync + 'static,
    R: OrderRepository<B::Plan>,
{
    pub fn new(repository: Arc<R>, backend: B, compiler: FilterCompiler) -> Self {
        Self {
            repository,
            backend,
            compiler,
        }
    }

    #[instrument(skip_all)]
    pub async fn pagination(&self, params: &ParameterMap) -> Result<Slice<Order>, CoreError> {
        let plan = self
            .compiler
            .compile(params, &ORDERS_ENDPOINT, &self.backend)?;
        let page = plan.page();

        let rows = self.repository.fetch_orders(plan).await?;
        debug!(rows = rows.len(), page = page.index, "fetched orders");

        Ok(Slice::from_lookahead(rows, page))
    }
}
