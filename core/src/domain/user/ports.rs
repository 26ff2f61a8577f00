use std::future::Future;

use crate::domain::{common::entities::app_errors::CoreError, user::entities::User};

#[cfg_attr(test, mockall::automock)]
pub trait UserRepository<P: Send + Sync + 'static>: Send + Sync {
    /// Runs the plan's lookahead query: at most one row more than the page size.
    fn fetch_users(&self, plan: P) -> impl Future<Output = Result<Vec<User>, CoreError>> + Send;
}
