//! Transport and service behavior against a live mock server.
//!
//! Each test binds an axum router to an ephemeral port and exercises the
//! real HTTP path: status mapping, detail extraction, timeout-as-status-0,
//! wire transforms and the read retry policy end to end.

use std::{
    net::SocketAddr,
    sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    },
    time::Duration,
};

use axum::{
    Json, Router,
    http::StatusCode,
    routing::{delete, get, post},
};
use serde_json::json;

use comanda_sync::prelude::*;
use comanda_sync::services::{ClientService, FinanceService, ProductService, TableService, UserService};
use comanda_sync::sync::users::UsersQuery;

async fn spawn_server(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock server");
    });
    addr
}

fn client_for(addr: SocketAddr) -> Arc<ApiClient> {
    Arc::new(ApiClient::new(format!("http://{addr}")).expect("client"))
}

#[tokio::test(flavor = "multi_thread")]
async fn parses_wire_payloads_including_money_strings() {
    let app = Router::new().route(
        "/products",
        get(|| async {
            Json(json!([
                {
                    "id": 1,
                    "name": "Completo",
                    "price": "3200.00",
                    "managesInventory": true,
                    "stock": 4,
                    "agregados": [
                        {"id": 2, "nombre": "Palta", "precio": "800", "activo": true}
                    ]
                },
                {
                    "id": 2,
                    "name": "Cortado",
                    "price": "not-a-price",
                    "managesInventory": false
                }
            ]))
        }),
    );
    let addr = spawn_server(app).await;

    let service = ProductService::new(client_for(addr));
    let products = service.get_all().await.expect("fetch products");

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].price, 3200.0);
    assert_eq!(products[0].additions[0].name, "Palta");
    assert_eq!(stock_status(&products[0]), StockStatus::LowStock);
    // a bad money string is NaN, never silently zero
    assert!(products[1].price.is_nan());
    assert_eq!(stock_status(&products[1]), StockStatus::InStock);
}

#[tokio::test(flavor = "multi_thread")]
async fn non_2xx_maps_to_status_error_with_detail() {
    let app = Router::new().route(
        "/clients/{id}",
        get(|| async {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({"message": "Client is archived", "code": "client_archived"})),
            )
        }),
    );
    let addr = spawn_server(app).await;

    let service = ClientService::new(client_for(addr));
    let err = service.get_by_id(7).await.expect_err("must fail");

    assert_eq!(err.status(), 422);
    let detail = err.detail().expect("detail payload");
    assert_eq!(detail.message.as_deref(), Some("Client is archived"));
    assert_eq!(detail.code.as_deref(), Some("client_archived"));
    // the notification surfaces the server's message, not the fallback
    assert_eq!(err.notification(), "Client is archived");
}

#[tokio::test(flavor = "multi_thread")]
async fn error_bodies_without_detail_fall_back() {
    let app = Router::new().route(
        "/tables",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let addr = spawn_server(app).await;

    let service = TableService::new(client_for(addr));
    let err = service.get_all().await.expect_err("must fail");

    assert_eq!(err.status(), 500);
    assert!(err.detail().is_none());
    assert_eq!(
        err.notification(),
        comanda_sync::error::FALLBACK_NOTIFICATION
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn slow_responses_time_out_as_status_zero() {
    let app = Router::new().route(
        "/ventas/subtotal",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(json!({"subtotal": "0"}))
        }),
    );
    let addr = spawn_server(app).await;

    let api = Arc::new(
        ApiClient::with_timeout(format!("http://{addr}"), Duration::from_millis(200))
            .expect("client"),
    );
    let service = FinanceService::new(api);
    let err = service.sales_subtotal().await.expect_err("must time out");

    assert_eq!(err, ApiError::Timeout);
    assert_eq!(err.status(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn connection_failures_report_status_zero() {
    // nothing listens on port 9; expect a connect failure, not a hang
    let api = Arc::new(
        ApiClient::with_timeout("http://127.0.0.1:9", Duration::from_millis(500)).expect("client"),
    );
    let service = TableService::new(api);
    let err = service.get_all().await.expect_err("must fail");

    assert_eq!(err.status(), 0);
    assert!(matches!(err, ApiError::Network(_) | ApiError::Timeout));
}

#[tokio::test(flavor = "multi_thread")]
async fn read_retry_policy_against_a_live_server() {
    let unauthorized_hits = Arc::new(AtomicU32::new(0));
    let hits = unauthorized_hits.clone();
    let app = Router::new().route(
        "/users",
        get(move || {
            let hits = hits.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"message": "session expired"})),
                )
            }
        }),
    );
    let addr = spawn_server(app).await;

    let runtime = SyncRuntime::new(RuntimeConfig::new().with_retry_delay(Duration::ZERO));
    let query = UsersQuery::new(UserService::new(client_for(addr)));
    let state = runtime.fetch(&query).await;

    let error = state.error().expect("auth failure surfaces as state");
    assert_eq!(error.status(), 401);
    assert_eq!(
        unauthorized_hits.load(Ordering::SeqCst),
        1,
        "401 must not be retried"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_discards_the_response_body() {
    let app = Router::new().route(
        "/tables/{id}",
        delete(|| async { StatusCode::NO_CONTENT }),
    );
    let addr = spawn_server(app).await;

    let service = TableService::new(client_for(addr));
    service.delete(4).await.expect("delete succeeds");
}

#[tokio::test(flavor = "multi_thread")]
async fn create_round_trips_the_request_payload() {
    let app = Router::new().route(
        "/tables",
        post(|Json(body): Json<serde_json::Value>| async move {
            (
                StatusCode::CREATED,
                Json(json!({
                    "id": 11,
                    "name": body["name"],
                    "isActive": true,
                    "isOccupied": false
                })),
            )
        }),
    );
    let addr = spawn_server(app).await;

    let service = TableService::new(client_for(addr));
    let table = service
        .create(&NewTable {
            name: "Terraza 2".to_string(),
        })
        .await
        .expect("create table");

    assert_eq!(table.id, 11);
    assert_eq!(table.name, "Terraza 2");
    assert!(table.is_active);
    assert!(!table.is_occupied);
}

#[tokio::test(flavor = "multi_thread")]
async fn finance_summary_sends_the_start_date_param() {
    let app = Router::new().route(
        "/finance/summary",
        get(
            |axum::extract::Query(params): axum::extract::Query<std::collections::HashMap<String, String>>| async move {
                assert_eq!(params.get("fecha_inicio").map(String::as_str), Some("2026-08-01"));
                Json(json!({
                    "grossSales": "1250000",
                    "expenseTotal": "430000.50",
                    "netTotal": "819999.50",
                    "orderCount": 87
                }))
            },
        ),
    );
    let addr = spawn_server(app).await;

    let service = FinanceService::new(client_for(addr));
    let summary = service
        .summary(chrono::NaiveDate::from_ymd_opt(2026, 8, 1).expect("valid date"))
        .await
        .expect("summary");

    assert_eq!(summary.gross_sales, 1_250_000.0);
    assert_eq!(summary.expense_total, 430_000.5);
    assert_eq!(summary.order_count, 87);
}
