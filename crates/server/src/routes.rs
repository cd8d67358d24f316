use axum::extract::{Path, State};
use axum::http::{HeaderValue, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use peekr_core::error::ApiError;
use peekr_core::types::TitleQuery;
use peekr_metadata::cache::CachePolicy;
use peekr_metadata::{DisplayMetadata, TitleProvider, derive_metadata};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;
use url::Url;

use crate::error::AppError;
use crate::render::{PreviewPage, render_page};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/title/{media_type}/{id}", get(title_page))
        .nest("/api/v1", api_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_router() -> Router<AppState> {
    Router::new()
        .route("/titles/{media_type}/{id}", get(title_metadata))
        .layer(CorsLayer::permissive())
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

// ---------------------------------------------------------------------------
// Title preview
// ---------------------------------------------------------------------------

/// Parse the path segments. Unknown media types never reach the provider.
fn parse_query(media_type: &str, id: &str) -> Option<TitleQuery> {
    match TitleQuery::parse(media_type, id) {
        Ok(query) => Some(query),
        Err(e) => {
            debug!(error = %e, id = %id, "rejecting title lookup");
            None
        }
    }
}

/// Public link to a title page, each path segment percent-encoded on its own.
fn canonical_url(base: &Url, query: &TitleQuery) -> Option<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .ok()?
        .pop_if_empty()
        .extend(["title", query.media_type.as_str(), query.id.as_str()]);
    Some(url)
}

async fn title_page(
    State(state): State<AppState>,
    Path((media_type, id)): Path<(String, String)>,
) -> Response {
    let query = parse_query(&media_type, &id);
    let record = match &query {
        Some(query) => state.provider.fetch_record(query).await,
        None => None,
    };

    let card = derive_metadata(record.as_ref(), state.render.card_image_size);
    let page = derive_metadata(record.as_ref(), state.render.page_image_size);

    // Fallback pages are not canonical for anything.
    let canonical_url = match (&state.render.public_url, &query) {
        (Some(base), Some(query)) if card.found => canonical_url(base, query),
        _ => None,
    };

    let html = render_page(&PreviewPage {
        card: &card,
        page: &page,
        canonical_url: canonical_url.as_ref().map(Url::as_str),
    });

    let cache_control = if card.found {
        cache_control(state.cache_policy)
    } else {
        HeaderValue::from_static("no-store")
    };

    ([(header::CACHE_CONTROL, cache_control)], Html(html)).into_response()
}

fn cache_control(policy: CachePolicy) -> HeaderValue {
    match policy.max_age() {
        Some(age) => HeaderValue::from_str(&format!("public, max-age={}", age.as_secs()))
            .unwrap_or_else(|_| HeaderValue::from_static("no-store")),
        None => HeaderValue::from_static("no-store"),
    }
}

async fn title_metadata(
    State(state): State<AppState>,
    Path((media_type, id)): Path<(String, String)>,
) -> Result<Json<DisplayMetadata>, AppError> {
    let query = TitleQuery::parse(&media_type, &id)?;
    let record = state
        .provider
        .fetch_record(&query)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("title {query} not found")))?;

    Ok(Json(derive_metadata(
        Some(&record),
        state.render.card_image_size,
    )))
}
