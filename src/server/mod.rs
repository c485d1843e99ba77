//! HTTP surface: serves render specs as JSON and the coefficient export.
//!
//! Endpoints:
//!   GET  /                         page shell
//!   GET  /api/health               liveness
//!   GET  /api/dashboard?session=   full render for a session
//!   POST /api/events               apply inputs, return recomputed regions
//!   GET  /api/coefficients.csv     export of the session's coefficient view

use anyhow::{Context, Result};
use axum::extract::{Query, Request, State};
use axum::http::header;
use axum::middleware::{self, Next};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::config::DashConfig;
use crate::controller::{coefficient_view, dispatch, render_all, Input, Update};
use crate::error::ApiError;
use crate::logging::{log, log_dispatch, log_request, obj, v_str, Domain, Level};
use crate::session::{valid_session_id, SessionState, SessionStore};
use crate::table::Dataset;
use crate::views::coefficients::{filter_rows, sort_rows};
use crate::views::{export_csv, ColumnRef, SortKey};

const INDEX_HTML: &str = include_str!("index.html");

#[derive(Clone)]
pub struct AppState {
    pub data: Arc<Dataset>,
    pub sessions: Arc<Mutex<SessionStore>>,
}

impl AppState {
    pub fn new(data: Dataset, config: &DashConfig) -> Self {
        Self {
            data: Arc::new(data),
            sessions: Arc::new(Mutex::new(SessionStore::new(
                Duration::from_secs(config.session_ttl_secs),
                config.max_sessions,
            ))),
        }
    }

    fn lock_store(&self) -> Result<MutexGuard<'_, SessionStore>, ApiError> {
        self.sessions
            .lock()
            .map_err(|_| ApiError::Internal("session store lock poisoned".to_string()))
    }

    /// Read-only access; the lock is released before rendering.
    fn load_session(&self, id: &str) -> Result<SessionState, ApiError> {
        check_session_id(id)?;
        let now = Instant::now();
        let mut store = self.lock_store()?;
        prune_logged(&mut store, now);
        Ok(store.get_or_create(id, now))
    }

    /// Load, dispatch and commit under one lock so that concurrent batches
    /// for a session apply in sequence.
    pub fn apply_events(&self, id: &str, events: &[Input]) -> Result<Update, ApiError> {
        check_session_id(id)?;
        let now = Instant::now();
        let mut store = self.lock_store()?;
        prune_logged(&mut store, now);
        let current = store.get_or_create(id, now);
        let update = dispatch(&current, events, &self.data);
        store.commit(id, update.state.clone(), now);
        Ok(update)
    }
}

fn check_session_id(id: &str) -> Result<(), ApiError> {
    if valid_session_id(id) {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!("invalid session id {:?}", id)))
    }
}

fn prune_logged(store: &mut SessionStore, now: Instant) {
    let pruned = store.prune(now);
    if pruned > 0 {
        log(
            Level::Debug,
            Domain::Session,
            "sessions_pruned",
            obj(&[("count", json!(pruned)), ("live", json!(store.len()))]),
        );
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/health", get(health))
        .route("/api/dashboard", get(dashboard))
        .route("/api/events", post(events))
        .route("/api/coefficients.csv", get(export_coefficients))
        .layer(middleware::from_fn(log_requests))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until ctrl-c.
pub async fn serve(config: &DashConfig, data: Dataset) -> Result<()> {
    let app = router(AppState::new(data, config));
    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    log(
        Level::Info,
        Domain::System,
        "listening",
        obj(&[("addr", v_str(&config.bind_addr))]),
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("dashboard server failed")?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available: run until killed.
        std::future::pending::<()>().await;
    }
    log(Level::Info, Domain::System, "shutdown", obj(&[]));
}

async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let started = Instant::now();
    let response = next.run(req).await;
    log_request(
        &method,
        &path,
        response.status().as_u16(),
        started.elapsed().as_secs_f64() * 1000.0,
    );
    response
}

// =============================================================================
// Handlers
// =============================================================================

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    pub session: String,
}

async fn dashboard(
    State(app): State<AppState>,
    Query(q): Query<SessionQuery>,
) -> Result<Json<Update>, ApiError> {
    let state = app.load_session(&q.session)?;
    Ok(Json(render_all(&state, &app.data)))
}

#[derive(Debug, Deserialize)]
pub struct EventsRequest {
    pub session: String,
    pub events: Vec<Input>,
}

async fn events(
    State(app): State<AppState>,
    Json(req): Json<EventsRequest>,
) -> Result<Json<Update>, ApiError> {
    let update = app.apply_events(&req.session, &req.events)?;

    let changed: Vec<&str> = update.changed.iter().map(|f| f.as_str()).collect();
    let regions: Vec<&str> = update.regions().iter().map(|r| r.as_str()).collect();
    log_dispatch(&req.session, req.events.len(), &changed, &regions);
    Ok(Json(update))
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub session: String,
    pub sort: Option<String>,
    #[serde(default)]
    pub desc: bool,
    pub filter_column: Option<String>,
    pub filter: Option<String>,
}

fn parse_column(raw: &str) -> Result<ColumnRef, ApiError> {
    ColumnRef::parse(raw).ok_or_else(|| ApiError::BadRequest(format!("unknown column {:?}", raw)))
}

async fn export_coefficients(
    State(app): State<AppState>,
    Query(q): Query<ExportQuery>,
) -> Result<Response, ApiError> {
    let state = app.load_session(&q.session)?;
    let mut table = coefficient_view(&state, &app.data);

    if let Some(raw) = q.filter.as_deref() {
        let column = parse_column(q.filter_column.as_deref().unwrap_or("stock"))?;
        table = filter_rows(&table, column, raw);
    }
    if let Some(raw) = q.sort.as_deref() {
        let key = SortKey {
            column: parse_column(raw)?,
            descending: q.desc,
        };
        table = sort_rows(&table, key);
    }

    let body = export_csv(&table)?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"coefficients.csv\""),
        ],
        body,
    )
        .into_response())
}
