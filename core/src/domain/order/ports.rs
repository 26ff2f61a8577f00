use std::future::Future;

use crate::domain::{common::entities::app_errors::CoreError, order::entities::Order};

/// Reads orders for a compiled filter plan `P`.
#[cfg_attr(test, mockall::automock)]
pub trait OrderRepository<P: Send + Sync + 'static>: Send + Sync {
    /// Runs the plan's lookahead query: at most one row more than the page size.
    fn fetch_orders(&self, plan: P) -> impl Future<Output = Result<Vec<Order>, CoreError>> + Send;
}
