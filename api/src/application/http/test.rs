use std::{future::Future, sync::Arc};

use axum_test::TestServer;
use mockall::mock;
use sea_orm::sea_query::PostgresQueryBuilder;

use oms_core::{
    domain::{
        common::entities::app_errors::CoreError,
        filter::ports::PagedPlan,
        order::{Order, OrderRepository, OrderStatus},
        user::{User, UserRepository},
    },
    infrastructure::filter::SeaQueryPlan,
};

use crate::{
    application::http::{
        order::handlers::get_orders::GetOrdersResponse,
        server::{
            api_entities::api_error::ApiErrorResponse, app_state::AppState,
            http_server::router,
        },
        user::handlers::get_users::GetUsersResponse,
    },
    args::{Args, FilterArgs, ServerArgs},
};

mock! {
    Orders {}

    impl OrderRepository<SeaQueryPlan> for Orders {
        fn fetch_orders(
            &self,
            plan: SeaQueryPlan,
        ) -> impl Future<Output = Result<Vec<Order>, CoreError>> + Send;
    }
}

mock! {
    Users {}

    impl UserRepository<SeaQueryPlan> for Users {
        fn fetch_users(
            &self,
            plan: SeaQueryPlan,
        ) -> impl Future<Output = Result<Vec<User>, CoreError>> + Send;
    }
}

fn args(root_path: &str) -> Arc<Args> {
    Arc::new(Args {
        server: ServerArgs {
            root_path: root_path.to_string(),
        },
        filter: FilterArgs {
            max_page_size: 100,
            ignored_params: vec!["benefitIds".to_string()],
        },
    })
}

fn sql(plan: &SeaQueryPlan) -> String {
    plan.to_sql(PostgresQueryBuilder)
}

/// Rows a database holding `count` pending orders returns for the plan's lookahead query.
fn lookahead_rows(count: i64, plan: &SeaQueryPlan) -> Vec<Order> {
    let page = plan.page();
    (1..=count)
        .skip(page.offset() as usize)
        .take(page.size as usize + 1)
        .map(|id| Order {
            id,
            status: OrderStatus::Pending,
            username: Some(format!("customer-{id}")),
            email: None,
            phone: None,
            address: None,
            product_name: None,
        })
        .collect()
}

fn server(root_path: &str, orders: MockOrders, users: MockUsers) -> TestServer {
    let state = AppState::new(args(root_path), orders, users);
    TestServer::new(router(state)).unwrap()
}

#[tokio::test]
async fn test_get_orders_first_page() {
    let mut orders = MockOrders::new();
    orders
        .expect_fetch_orders()
        .withf(|plan| {
            let sql = sql(plan);
            sql.contains(r#""Order"."status" = 'PENDING'"#) && !sql.contains("benefit")
        })
        .times(1)
        .returning(|plan| {
            let rows = lookahead_rows(20, &plan);
            Box::pin(async move { Ok(rows) })
        });
    let server = server("", orders, MockUsers::new());

    let response = server
        .get("/api/order/v1")
        .add_query_param("status", "PENDING")
        .add_query_param("benefitIds", "1,2")
        .await;
    response.assert_status_ok();

    let body = response.json::<GetOrdersResponse>();
    assert_eq!(body.data.len(), 12);
    assert_eq!(body.page, 1);
    assert_eq!(body.size, 12);
    assert!(body.has_next);
}

#[tokio::test]
async fn test_get_orders_bracket_filter_and_paging() {
    let mut orders = MockOrders::new();
    orders
        .expect_fetch_orders()
        .withf(|plan| {
            let sql = sql(plan);
            sql.contains(r#"LEFT JOIN "users" AS "user""#)
                && sql.contains(r#""user"."email" = 'ann@oms.io'"#)
                && sql.contains("LIMIT 15 OFFSET 15")
        })
        .times(1)
        .returning(|plan| {
            let rows = lookahead_rows(20, &plan);
            Box::pin(async move { Ok(rows) })
        });
    let server = server("", orders, MockUsers::new());

    let response = server
        .get("/api/order/v1")
        .add_query_param("user[email]", "ann@oms.io")
        .add_query_param("page", "2")
        .add_query_param("perPage", "15")
        .await;
    response.assert_status_ok();

    let body = response.json::<GetOrdersResponse>();
    assert_eq!(body.page, 2);
    assert_eq!(body.data.len(), 5);
    assert_eq!(body.data[0].id, 16);
    assert!(!body.has_next);
}

#[tokio::test]
async fn test_get_orders_rejects_unknown_attribute() {
    let mut orders = MockOrders::new();
    orders.expect_fetch_orders().never();
    let server = server("", orders, MockUsers::new());

    let response = server
        .get("/api/order/v1")
        .add_query_param("foo[lt]", "1")
        .await;
    response.assert_status_bad_request();

    let body = response.json::<ApiErrorResponse>();
    assert_eq!(body.code, "E_BAD_REQUEST");
    assert_eq!(body.status, 400);
    assert!(body.message.contains("foo"));
}

#[tokio::test]
async fn test_get_orders_rejects_bad_values_and_sorts() {
    let mut orders = MockOrders::new();
    orders.expect_fetch_orders().never();
    let server = server("", orders, MockUsers::new());

    server
        .get("/api/order/v1")
        .add_query_param("status[gte]", "sometime")
        .await
        .assert_status_bad_request();

    server
        .get("/api/order/v1")
        .add_query_param("id", "abc")
        .await
        .assert_status_bad_request();

    server
        .get("/api/order/v1")
        .add_query_param("sort", "items.priceAtOrder,desc")
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_get_orders_distinct_with_joined_sort() {
    let mut orders = MockOrders::new();
    orders
        .expect_fetch_orders()
        .withf(|plan| {
            sql(plan).starts_with(r#"SELECT DISTINCT "Order".*, "user"."name" AS "sort_0""#)
        })
        .times(1)
        .returning(|_| Box::pin(async { Ok(vec![]) }));
    let server = server("", orders, MockUsers::new());

    server
        .get("/api/order/v1")
        .add_query_param("items.product.name[like]", "mug")
        .add_query_param("sort", "user.name,desc")
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_get_users() {
    let user = User {
        id: 7,
        name: "Ann".to_string(),
        email: "ann@oms.io".to_string(),
        phone: Some("0901".to_string()),
        address: None,
    };
    let rows = vec![user.clone()];

    let mut users = MockUsers::new();
    users
        .expect_fetch_users()
        .withf(|plan| sql(plan).contains(r#"ORDER BY "User"."name" DESC"#))
        .times(1)
        .returning(move |_| {
            let rows = rows.clone();
            Box::pin(async move { Ok(rows) })
        });
    let server = server("", MockOrders::new(), users);

    let response = server
        .get("/api/users")
        .add_query_param("keyword", "ann")
        .add_query_param("sort", "name,desc")
        .await;
    response.assert_status_ok();

    let body = response.json::<GetUsersResponse>();
    assert_eq!(body.data, vec![user]);
    assert_eq!(body.size, 20);
    assert!(!body.has_next);
}

#[tokio::test]
async fn test_get_users_repository_failure() {
    let mut users = MockUsers::new();
    users
        .expect_fetch_users()
        .times(1)
        .returning(|_| Box::pin(async { Err(CoreError::InternalServerError) }));
    let server = server("", MockOrders::new(), users);

    let response = server.get("/api/users").await;
    response.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);

    let body = response.json::<ApiErrorResponse>();
    assert_eq!(body.code, "E_INTERNAL_SERVER_ERROR");
}

#[tokio::test]
async fn test_root_path_and_openapi() {
    let mut orders = MockOrders::new();
    orders
        .expect_fetch_orders()
        .times(1)
        .returning(|_| Box::pin(async { Ok(vec![]) }));
    let server = server("/oms", orders, MockUsers::new());

    server.get("/oms/api/order/v1").await.assert_status_ok();
    server.get("/api/order/v1").await.assert_status_not_found();

    let response = server.get("/oms/api-docs/openapi.json").await;
    response.assert_status_ok();

    let doc = response.json::<serde_json::Value>();
    assert!(doc["paths"].get("/oms/api/order/v1").is_some());
    assert!(doc["paths"].get("/oms/api/users").is_some());
}
