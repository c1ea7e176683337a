use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    init_metrics, metrics_handler, metrics_middleware, security_headers_middleware, trace_id,
};
use crate::rate_limit::LoginRateLimiter;
use crate::routes::{auth, bookings, dashboard, health, services, staff, wizard};
use crate::services::auth::DashboardSession;
use domain::wizard::WizardState;
use persistence::repositories::{
    BookingRepository, CustomerRepository, PaymentRepository, ServiceRepository, SettingRepository,
    StaffRepository, WorkingHoursRepository,
};
use shared::session::SessionStore;
use shared::token::TokenSigner;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub wizard_sessions: Arc<SessionStore<WizardState>>,
    pub dashboard_sessions: Arc<SessionStore<DashboardSession>>,
    pub login_limiter: Arc<LoginRateLimiter>,
    pub token_signer: TokenSigner,
}

impl AppState {
    pub fn new(config: Config, pool: PgPool) -> Self {
        let config = Arc::new(config);
        Self {
            pool,
            wizard_sessions: Arc::new(SessionStore::new(config.session.timeout_secs)),
            dashboard_sessions: Arc::new(SessionStore::new(config.session.timeout_secs)),
            login_limiter: Arc::new(LoginRateLimiter::new(
                config.security.login_rate_limit_max,
                config.security.login_rate_limit_window_secs,
            )),
            token_signer: TokenSigner::new(
                &config.auth.token_secret,
                config.auth.access_token_expiry_secs,
                config.auth.refresh_token_expiry_secs,
            ),
            config,
        }
    }

    pub fn services(&self) -> ServiceRepository {
        ServiceRepository::new(self.pool.clone())
    }

    pub fn staff(&self) -> StaffRepository {
        StaffRepository::new(self.pool.clone())
    }

    pub fn customers(&self) -> CustomerRepository {
        CustomerRepository::new(self.pool.clone())
    }

    pub fn bookings(&self) -> BookingRepository {
        BookingRepository::new(self.pool.clone())
    }

    pub fn payments(&self) -> PaymentRepository {
        PaymentRepository::new(self.pool.clone())
    }

    pub fn working_hours(&self) -> WorkingHoursRepository {
        WorkingHoursRepository::new(self.pool.clone())
    }

    pub fn settings(&self) -> SettingRepository {
        SettingRepository::new(self.pool.clone())
    }
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    init_metrics();

    let request_timeout = config.server.request_timeout_secs;
    let cors = build_cors(&config);
    let state = AppState::new(config, pool);

    // Public booking wizard and checkout
    let wizard_routes = Router::new()
        .route("/api/v1/services", get(services::list_services))
        .route("/api/v1/service/select", post(services::select_service))
        .route("/api/v1/staff", get(staff::list_for_service))
        .route(
            "/api/v1/staff/:staff_id/working-hours",
            get(staff::working_hours),
        )
        .route(
            "/api/v1/wizard/session",
            get(wizard::get_session).post(wizard::update_session),
        )
        .route("/api/v1/bookings", post(bookings::create_booking));

    // Token-issuing login, rate limited per client IP
    let auth_routes = Router::new().route("/api/v1/auth/login", post(auth::login));

    // Staff dashboard behind the cookie session
    let dashboard_routes = Router::new()
        .route("/api/v1/dashboard/login", post(dashboard::login))
        .route("/api/v1/dashboard/logout", post(dashboard::logout))
        .route("/api/v1/dashboard/me", get(dashboard::me))
        .route("/api/v1/dashboard/bookings", get(dashboard::bookings))
        .route("/api/v1/dashboard/settings", get(dashboard::settings));

    // Probes and metrics
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(wizard_routes)
        .merge(auth_routes)
        .merge(dashboard_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(request_timeout)))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}

fn build_cors(config: &Config) -> CorsLayer {
    if config.security.cors_origins.is_empty() {
        // Development default: any origin
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
