use axum::extract::State;
use oms_core::{
    domain::{
        order::{OrderRepository, entities::Order},
        user::UserRepository,
    },
    infrastructure::filter::SeaQueryPlan,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    query_extractor::QueryParamsExtractor,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetOrdersResponse {
    pub data: Vec<Order>,
    /// 1-based page number.
    pub page: u64,
    pub size: u64,
    pub has_next: bool,
}

#[utoipa::path(
    get,
    path = "/v1",
    tag = "order",
    summary = "List orders",
    description = "Lists orders with keyword search (status, customer name), attribute filters such as `status=PAID` or `user[email]=...`, operator suffixes (`[gte]`, `[in]`, `[like]`, ...), `sort=field,desc` and `page`/`perPage` pagination.",
    params(
        ("keyword" = Option<String>, Query, description = "Matches status and customer name"),
        ("page" = Option<u64>, Query, description = "1-based page index"),
        ("perPage" = Option<u64>, Query, description = "Page size, at most 100 (alias `size`)"),
        ("sort" = Option<String>, Query, description = "`field` or `field,asc|desc`"),
    ),
    responses(
        (status = 200, body = GetOrdersResponse),
        (status = 400, body = ApiErrorResponse),
    ),
)]
pub async fn get_orders<O, U>(
    State(state): State<AppState<O, U>>,
    QueryParamsExtractor(params): QueryParamsExtractor,
) -> Result<Response<GetOrdersResponse>, ApiError>
where
    O: OrderRepository<SeaQueryPlan>,
    U: UserRepository<SeaQueryPlan>,
{
    let slice = state
        .order_service
        .pagination(&params)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetOrdersResponse {
        page: slice.page.index + 1,
        size: slice.page.size,
        has_next: slice.has_next,
        data: slice.content,
    }))
}
