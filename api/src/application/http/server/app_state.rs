use std::sync::Arc;

use oms_core::{
    domain::{
        common::OmsConfig,
        filter::assembler::FilterCompiler,
        order::{OrderRepository, OrderService},
        user::{UserRepository, UserService},
    },
    entity::SCHEMA,
    infrastructure::filter::{SeaQueryBackend, SeaQueryPlan},
};

use crate::args::Args;

pub struct AppState<O, U> {
    pub args: Arc<Args>,
    pub order_service: OrderService<O, SeaQueryBackend>,
    pub user_service: UserService<U, SeaQueryBackend>,
}

impl<O, U> Clone for AppState<O, U> {
    fn clone(&self) -> Self {
        Self {
            args: Arc::clone(&self.args),
            order_service: self.order_service.clone(),
            user_service: self.user_service.clone(),
        }
    }
}

impl<O, U> AppState<O, U>
where
    O: OrderRepository<SeaQueryPlan>,
    U: UserRepository<SeaQueryPlan>,
{
    pub fn new(args: Arc<Args>, order_repository: O, user_repository: U) -> Self {
        let config = OmsConfig::from(args.as_ref().clone());
        let compiler = FilterCompiler::new(&SCHEMA, &config.filter);

        Self {
            args,
            order_service: OrderService::new(
                Arc::new(order_repository),
                SeaQueryBackend,
                compiler.clone(),
            ),
            user_service: UserService::new(Arc::new(user_repository), SeaQueryBackend, compiler),
        }
    }
}
