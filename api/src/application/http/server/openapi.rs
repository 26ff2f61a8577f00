use utoipa::OpenApi;

use crate::application::http::{order::router::OrderApiDoc, user::router::UserApiDoc};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "OMS API"
    ),
    nest(
        (path = "/api/order", api = OrderApiDoc),
        (path = "/api/users", api = UserApiDoc),
    )
)]
pub struct ApiDoc;
