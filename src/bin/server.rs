use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use video_seo_engine::{
    EngineConfig, ProcessReport, RankedKeyword, SeoEngine, SeoEngineError, VideoAnalytics,
};

#[derive(Clone)]
struct AppState {
    engine: Arc<SeoEngine>,
}

#[derive(Debug, Deserialize)]
struct RankRequest {
    keywords: Vec<String>,
    #[serde(default)]
    max_results: Option<u32>,
}

#[derive(Debug, Serialize)]
struct RankResponse {
    rankings: Vec<RankedKeyword>,
    logs: String,
}

#[derive(Debug, Deserialize)]
struct AnalyticsRequest {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ProcessRequest {
    path: PathBuf,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    transcriber: String,
    api_key: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seo_engine_server=debug,video_seo_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8090);

    let config = EngineConfig::from_env();

    tracing::info!("🚀 Starting Video SEO Engine Server");
    tracing::info!("⚙️ Config: {}", config);
    tracing::info!("🔌 Port: {}", port);

    let state = AppState {
        engine: Arc::new(SeoEngine::new(config).await?),
    };

    // Build router
    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/v1/rankings", post(rank_handler))
        .route("/v1/analytics", post(analytics_handler))
        .route("/v1/process", post(process_handler))
        .layer(CorsLayer::permissive())
        .with_state(state);

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    tracing::info!("📈 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: video_seo_engine::VERSION.to_string(),
        transcriber: state.engine.transcriber_name().to_string(),
        api_key: state.engine.config().has_api_key(),
    })
}

async fn rank_handler(
    State(state): State<AppState>,
    Json(req): Json<RankRequest>,
) -> Result<Json<RankResponse>, AppError> {
    tracing::debug!("Rank request: {:?}", req);

    // Missing credentials yield an empty list, not an error
    let report = state.engine.rank_keywords(&req.keywords, req.max_results).await;

    Ok(Json(RankResponse {
        rankings: report.rankings,
        logs: report.log.render(),
    }))
}

async fn analytics_handler(
    State(state): State<AppState>,
    Json(req): Json<AnalyticsRequest>,
) -> Result<Json<VideoAnalytics>, AppError> {
    let analytics = state.engine.analyze(&req.url).await?;
    Ok(Json(analytics))
}

async fn process_handler(
    State(state): State<AppState>,
    Json(req): Json<ProcessRequest>,
) -> Result<Json<ProcessReport>, AppError> {
    let report = state.engine.process_video(&req.path).await?;

    tracing::info!(
        "✅ {} → {} keywords ranked ({:.0}ms)",
        req.path.display(),
        report.rankings.len(),
        report.latency_ms
    );

    Ok(Json(report))
}

// Error handling
struct AppError(SeoEngineError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            e if e.is_not_found() => StatusCode::BAD_REQUEST,
            SeoEngineError::InvalidMediaFormat(_) => StatusCode::BAD_REQUEST,
            SeoEngineError::Configuration(_) => StatusCode::SERVICE_UNAVAILABLE,
            SeoEngineError::RateLimited { .. } | SeoEngineError::Provider { .. } => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = self.0.to_string();

        tracing::error!("❌ Error: {} - {}", status, message);

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<SeoEngineError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
