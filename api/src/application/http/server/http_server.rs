use axum::{Json, Router, routing::get};
use oms_core::{
    domain::{order::OrderRepository, user::UserRepository},
    infrastructure::filter::SeaQueryPlan,
};
use tracing::info_span;
use utoipa::OpenApi;

use crate::application::http::{
    order::router::order_routes,
    server::{app_state::AppState, openapi::ApiDoc},
    user::router::user_routes,
};

///  Returns the [`Router`] of this application.
pub fn router<O, U>(state: AppState<O, U>) -> Router
where
    O: OrderRepository<SeaQueryPlan> + 'static,
    U: UserRepository<SeaQueryPlan> + 'static,
{
    let trace_layer = tower_http::trace::TraceLayer::new_for_http().make_span_with(
        |request: &axum::extract::Request| {
            let uri: String = request.uri().to_string();
            info_span!("http_request", method = ?request.method(), uri)
        },
    );

    let root_path = state.args.server.root_path.clone();

    let mut openapi = ApiDoc::openapi();
    let mut paths = openapi.paths.clone();
    paths.paths = openapi
        .paths
        .paths
        .into_iter()
        .map(|(path, item)| (format!("{root_path}{path}"), item))
        .collect();
    openapi.paths = paths;

    Router::new()
        .route(
            &format!("{root_path}/api-docs/openapi.json"),
            get(|| async move { Json(openapi) }),
        )
        .merge(order_routes(state.clone()))
        .merge(user_routes(state.clone()))
        .layer(trace_layer)
        .with_state(state)
}
