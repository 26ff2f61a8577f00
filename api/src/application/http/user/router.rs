use super::handlers::get_users::{__path_get_users, get_users};
use crate::application::http::server::app_state::AppState;

use oms_core::{
    domain::{order::OrderRepository, user::UserRepository},
    infrastructure::filter::SeaQueryPlan,
};

use axum::{Router, routing::get};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(get_users))]
pub struct UserApiDoc;

pub fn user_routes<O, U>(state: AppState<O, U>) -> Router<AppState<O, U>>
where
    O: OrderRepository<SeaQueryPlan> + 'static,
    U: UserRepository<SeaQueryPlan> + 'static,
{
    Router::new().route(
        &format!("{}/api/users", state.args.server.root_path),
        get(get_users::<O, U>),
    )
}
