use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{HeaderName, HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use platform_api::{ApiError, ApiResult};
use platform_db::DbPool;
use products_hr::{Employee, EmployeeInput, EmployeeSearchCriteria, EmployeeService, HrError};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{debug, info};

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub employees: EmployeeService,
    pub config: Arc<AppConfig>,
}

#[derive(Clone, Debug)]
pub struct ServeConfig {
    addr: SocketAddr,
}

impl ServeConfig {
    pub fn new(host: IpAddr, port: u16) -> Self {
        Self {
            addr: SocketAddr::from((host, port)),
        }
    }
}

pub async fn serve(config: ServeConfig, state: AppState) -> anyhow::Result<()> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    info!(%config.addr, "employee server listening");
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;
    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed = origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();
    let layer = CorsLayer::new()
        .allow_headers([header::CONTENT_TYPE])
        .allow_methods([Method::GET, Method::POST, Method::DELETE]);
    if allowed.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(allowed))
    }
}

pub fn build_router(state: AppState) -> Router {
    let request_id = MakeRequestUuid;
    let header_name = HeaderName::from_static("x-request-id");
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/v1/employees",
            get(list_employees).post(create_employee),
        )
        .route("/api/v1/employees/search/{name}", get(search_by_name))
        .route("/api/v1/employees/highestSalary", get(highest_salary))
        .route(
            "/api/v1/employees/topTenHighestEarningEmployeeNames",
            get(top_earning_names),
        )
        .route(
            "/api/v1/employees/{id}",
            get(get_employee).delete(delete_employee),
        )
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(header_name.clone(), request_id))
                .layer(PropagateRequestIdLayer::new(header_name))
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.config.cors_allowed_origins)),
        )
        .with_state(state)
}

fn api_error(err: HrError) -> ApiError {
    match err {
        HrError::InvalidArgument(_) => ApiError::InvalidInput(err.to_string()),
        HrError::NotFound(_) => ApiError::NotFound(err.to_string()),
        HrError::Validation(fields) => ApiError::Validation(fields.into_inner()),
        HrError::Storage(db) => ApiError::internal(db.into()),
    }
}

async fn list_employees(
    State(state): State<AppState>,
    Query(criteria): Query<EmployeeSearchCriteria>,
) -> ApiResult<Json<Vec<Employee>>> {
    let rows = state
        .employees
        .search_employees(&criteria)
        .await
        .map_err(api_error)?;
    Ok(Json(rows))
}

async fn search_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<Vec<Employee>>> {
    let rows = state
        .employees
        .search_employees(&EmployeeSearchCriteria::by_name(name))
        .await
        .map_err(api_error)?;
    Ok(Json(rows))
}

/// Misses answer 200 with an empty object rather than 404.
async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let found = state
        .employees
        .get_employee_by_id(&id)
        .await
        .map_err(api_error)?;
    Ok(match found {
        Some(employee) => Json(employee).into_response(),
        None => {
            debug!(%id, "employee lookup matched nothing");
            Json(serde_json::json!({})).into_response()
        }
    })
}

async fn highest_salary(State(state): State<AppState>) -> ApiResult<Json<i32>> {
    let salary = state.employees.highest_salary().await.map_err(api_error)?;
    Ok(Json(salary))
}

async fn top_earning_names(State(state): State<AppState>) -> ApiResult<Json<Vec<String>>> {
    let names = state
        .employees
        .top_earning_names()
        .await
        .map_err(api_error)?;
    Ok(Json(names))
}

async fn create_employee(
    State(state): State<AppState>,
    payload: Result<Json<EmployeeInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Employee>)> {
    let Json(input) = payload.map_err(|rejection| ApiError::InvalidInput(rejection.body_text()))?;
    let created = state
        .employees
        .create_employee(input)
        .await
        .map_err(api_error)?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<String>> {
    let name = state
        .employees
        .delete_employee(&id)
        .await
        .map_err(api_error)?;
    Ok(Json(name))
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let db_ok = platform_db::is_healthy(&state.pool).await;
    Json(HealthResponse {
        ok: db_ok,
        db_ok,
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    db_ok: bool,
    version: &'static str,
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        signal(SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
