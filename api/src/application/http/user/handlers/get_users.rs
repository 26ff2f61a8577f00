use axum::extract::State;
use oms_core::{
    domain::{
        order::OrderRepository,
        user::{UserRepository, entities::User},
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
pub struct GetUsersResponse {
    pub data: Vec<User>,
    pub page: u64,
    pub size: u64,
    pub has_next: bool,
}

#[utoipa::path(
    get,
    path = "",
    tag = "user",
    summary = "List users",
    description = "Lists users. `keyword` matches name by substring and email or phone by prefix.",
    params(
        ("keyword" = Option<String>, Query, description = "Search over name, email and phone"),
        ("page" = Option<u64>, Query, description = "1-based page index"),
        ("perPage" = Option<u64>, Query, description = "Page size, at most 100 (alias `size`)"),
        ("sort" = Option<String>, Query, description = "`field` or `field,asc|desc`"),
    ),
    responses(
        (status = 200, body = GetUsersResponse),
        (status = 400, body = ApiErrorResponse),
    ),
)]
pub async fn get_users<O, U>(
    State(state): State<AppState<O, U>>,
    QueryParamsExtractor(params): QueryParamsExtractor,
) -> Result<Response<GetUsersResponse>, ApiError>
where
    O: OrderRepository<SeaQueryPlan>,
    U: UserRepository<SeaQueryPlan>,
{
    let slice = state
        .user_service
        .pagination(&params)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetUsersResponse {
        page: slice.page.index + 1,
        size: slice.page.size,
        has_next: slice.has_next,
        data: slice.content,
    }))
}
