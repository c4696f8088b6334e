//! HTTP API Layer
//!
//! REST API for submitting claims and running triage on them, built on Axum.
//!
//! # Architecture
//!
//! - **Handlers**: claim intake and triage endpoints
//! - **Middleware**: bearer-token authentication, request ids, audit logging
//! - **DTOs**: request/response bodies
//! - **Error Handling**: consistent JSON error bodies
//!
//! Every `/api/v1` route is scoped to the authenticated user: a claim owned
//! by someone else answers 404, exactly like a claim that does not exist.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let store = Arc::new(PostgresClaimAdapter::new(pool));
//! let app = create_router(AppState::new(store, config));
//! axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    http::HeaderValue,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use core_kernel::HealthCheckable;
use domain_claims::{ClaimIntakeService, ClaimRecordPort, ProcessingLogPort, TriageService};

use crate::config::ApiConfig;
use crate::handlers::{ai, claims, health};
use crate::middleware::{audit_middleware, auth_middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub intake: Arc<ClaimIntakeService>,
    pub triage: Arc<TriageService>,
    /// Probed by the readiness check
    pub storage: Arc<dyn HealthCheckable>,
}

impl AppState {
    /// Wires both services to one store that holds claims and their logs
    pub fn new<S>(store: Arc<S>, config: ApiConfig) -> Self
    where
        S: ClaimRecordPort + ProcessingLogPort,
    {
        let claims: Arc<dyn ClaimRecordPort> = store.clone();
        let logs: Arc<dyn ProcessingLogPort> = store.clone();

        Self {
            config,
            intake: Arc::new(ClaimIntakeService::new(claims.clone())),
            triage: Arc::new(TriageService::new(claims, logs)),
            storage: store,
        }
    }
}

fn cors_layer(config: &ApiConfig) -> CorsLayer {
    let origin = match config.allowed_origins() {
        None => AllowOrigin::any(),
        Some(origins) => AllowOrigin::list(
            origins
                .iter()
                .filter_map(|o| o.parse::<HeaderValue>().ok()),
        ),
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Creates the main API router
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let claims_routes = Router::new()
        .route("/", post(claims::create_claim).get(claims::list_claims))
        .route("/:id", get(claims::get_claim).put(claims::update_claim))
        .route("/:id/history", get(claims::claim_history));

    let ai_routes = Router::new()
        .route("/process-claim/:id", post(ai::process_claim))
        .route("/analysis/:id", get(ai::get_analysis))
        .route("/classify-document", post(ai::classify_document))
        .route("/fraud-check/:id", get(ai::fraud_check));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/claims", claims_routes)
        .nest("/ai", ai_routes)
        .layer(axum_middleware::from_fn_with_state(state.clone(), audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    let cors = cors_layer(&state.config);

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(cors),
        )
        .with_state(state)
}
