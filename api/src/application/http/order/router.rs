use super::handlers::get_orders::{__path_get_orders, get_orders};
use crate::application::http::server::app_state::AppState;

use oms_core::{
    domain::{order::OrderRepository, user::UserRepository},
    infrastructure::filter::SeaQueryPlan,
};

use axum::{Router, routing::get};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(get_orders))]
pub struct OrderApiDoc;

pub fn order_routes<O, U>(state: AppState<O, U>) -> Router<AppState<O, U>>
where
    O: OrderRepository<SeaQueryPlan> + 'static,
    U: UserRepository<SeaQueryPlan> + 'static,
{
    Router::new().route(
        &format!("{}/api/order/v1", state.args.server.root_path),
        get(get_orders::<O, U>),
    )
}
