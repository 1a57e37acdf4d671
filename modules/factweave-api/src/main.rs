use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ai_client::Claude;
use factweave_common::{Config, KagResponse};
use factweave_graph::{GraphClient, KnowledgeReader};
use factweave_kag::{AnswerGenerator, EntityRecognizer, KagPipeline, KnowledgeQueries};
use ner_client::NerClient;

struct AppState {
    pipeline: KagPipeline,
}

#[derive(Deserialize)]
struct QueryRequest {
    query: String,
}

async fn process_query(
    State(state): State<Arc<AppState>>,
    Json(body): Json<QueryRequest>,
) -> impl IntoResponse {
    answer_query(&state, body.query).await
}

async fn process_query_get(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QueryRequest>,
) -> impl IntoResponse {
    answer_query(&state, params.query).await
}

async fn answer_query(state: &AppState, query: String) -> axum::response::Response {
    if query.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(KagResponse::failure(query, "Query cannot be empty")),
        )
            .into_response();
    }

    let response = state.pipeline.process_query(&query).await;

    if response.has_error() {
        error!(query = %response.user_query, error = ?response.error, "KAG processing error");
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response();
    }

    info!(
        query = %response.user_query,
        entities = response.entity_count(),
        citations = response.citations.len(),
        "query processed"
    );
    Json(response).into_response()
}

async fn health() -> &'static str {
    "OK"
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("factweave=info".parse()?))
        .init();

    let config = Config::from_env();

    let client =
        GraphClient::connect(&config.neo4j_uri, &config.neo4j_user, &config.neo4j_password)
            .await?;
    let knowledge: Arc<dyn KnowledgeQueries> = Arc::new(KnowledgeReader::new(client));

    let generator: Arc<dyn AnswerGenerator> =
        Arc::new(Claude::new(&config.anthropic_api_key, &config.anthropic_model));

    // The recognizer is built once here and shared by every query for the
    // lifetime of the process.
    let recognizer: Option<Arc<dyn EntityRecognizer>> = config
        .ner_service_url
        .as_deref()
        .map(|url| Arc::new(NerClient::new(url)) as Arc<dyn EntityRecognizer>);
    if recognizer.is_none() {
        info!("NER_SERVICE_URL unset, extraction runs keyword-only");
    }

    let pipeline = KagPipeline::new(knowledge, generator, recognizer);
    let state = Arc::new(AppState { pipeline });

    let app = Router::new()
        .route("/api/kag/query", post(process_query).get(process_query_get))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("{}:{}", config.api_host, config.api_port);
    info!(addr = %addr, "factweave api listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
