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
    user::{entities::User, ports::UserRepository},
};

pub const USERS_ENDPOINT: EndpointSpec = EndpointSpec {
    entity: "User",
    search_fields: &["name", "email", "phone"],
    page_defaults: PageDefaults::USERS,
};

pub struct UserService<R, B> {
    repository: Arc<R>,
    backend: B,
    compiler: FilterCompiler,
}

impl<R, B: Clone> Clone for UserService<R, B> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            backend: self.backend.clone(),
            compiler: self.compiler.clone(),
        }
    }
}

impl<R, B> UserService<R, B>
where
    B: PredicateBackend,
    B::Plan: Send + Sync + 'static,
    R: UserRepository<B::Plan>,
{
    pub fn new(repository: Arc<R>, backend: B, compiler: FilterCompiler) -> Self {
        Self {
            repository,
            backend,
            compiler,
        }
    }

    #[instrument(skip_all)]
    pub async fn pagination(&self, params: &ParameterMap) -> Result<Slice<User>, CoreError> {
        let plan = self
            .compiler
            .compile(params, &USERS_ENDPOINT, &self.backend)?;
        let page = plan.page();

        let rows = self.repository.fetch_users(plan).await?;
        debug!(rows = rows.len(), page = page.index, "fetched users");

        Ok(Slice::from_lookahead(rows, page))
    }
}
