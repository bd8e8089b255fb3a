//! HTTP API for track ingestion and lookup.
//!
//! All state the handlers share is injected through [`ApiState`]: the store,
//! the parser, the identifier counter, and the process start time. There are
//! no process-wide globals.

use crate::core::{
    format_uptime, geo, millis_since_epoch, Config, IdGenerator, Result, ServiceMeta, Ticker,
    TrackError, TrackField, TrackRecord, UrlRequest,
};
use crate::parser::TrackParser;
use crate::storage::TrackStore;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Redirect, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Static service description served by the metadata endpoint.
const SERVICE_INFO: &str = "Service for paragliding track info.";
/// API version served by the metadata endpoint.
const SERVICE_VERSION: &str = "v1";

/// Shared handler state.
#[derive(Clone)]
pub struct ApiState {
    store: Arc<dyn TrackStore>,
    parser: Arc<dyn TrackParser>,
    ids: Arc<IdGenerator>,
    started: Instant,
}

impl ApiState {
    pub fn new(store: Arc<dyn TrackStore>, parser: Arc<dyn TrackParser>) -> Self {
        Self {
            store,
            parser,
            ids: Arc::new(IdGenerator::new()),
            started: Instant::now(),
        }
    }
}

/// Error response envelope. Status codes follow the error taxonomy; the
/// envelope itself is an additive convenience.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    code: u16,
}

fn error_response(err: TrackError) -> Response {
    let status = match &err {
        TrackError::NotFound(_) => StatusCode::NOT_FOUND,
        e if e.is_client_error() => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        tracing::error!(category = err.category(), error = %err, "request failed");
    } else {
        tracing::debug!(category = err.category(), error = %err, "request rejected");
    }
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            code: status.as_u16(),
        }),
    )
        .into_response()
}

/// Builds the service router. Separated from [`start_server`] so tests can
/// drive it without binding a socket.
pub fn router(state: ApiState) -> Router {
    let track_collection = get(list_tracks_handler)
        .post(ingest_handler)
        .fallback(method_guard);

    Router::new()
        .route("/paragliding", get(redirect_handler))
        .route("/paragliding/", get(redirect_handler))
        .route("/paragliding/api", get(meta_handler))
        .route("/paragliding/api/", get(meta_handler))
        .route("/paragliding/api/track", track_collection.clone())
        .route("/paragliding/api/track/", track_collection)
        .route(
            "/paragliding/api/track/:id",
            get(get_track_handler).fallback(method_guard),
        )
        .route(
            "/paragliding/api/track/:id/:field",
            get(get_field_handler).fallback(method_guard),
        )
        .route("/paragliding/api/ticker", get(ticker_handler))
        .route("/paragliding/api/ticker/", get(ticker_handler))
        .fallback(not_found_handler)
        .with_state(state)
}

/// Start the API server.
pub async fn start_server(state: ApiState, config: &Config) -> Result<()> {
    let mut app = router(state).layer(TraceLayer::new_for_http());
    if config.server.enable_cors {
        app = app.layer(CorsLayer::permissive());
    }

    let addr = format!("{}:{}", config.server.bind_address, config.server.port);
    tracing::info!("serving paragliding track API on http://{}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// GET /paragliding[/] - redirect the bare root to the metadata endpoint.
async fn redirect_handler() -> Redirect {
    Redirect::to("/paragliding/api/")
}

/// Unmatched paths get a plain 404 with an error envelope.
async fn not_found_handler() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Not Found".to_string(),
            code: 404,
        }),
    )
        .into_response()
}

/// Methods other than GET/POST on the track resource are a client error,
/// not a 405.
async fn method_guard() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: "Bad Request".to_string(),
            code: 400,
        }),
    )
        .into_response()
}

/// GET /paragliding/api[/] - static metadata plus computed uptime.
async fn meta_handler(State(state): State<ApiState>) -> Json<ServiceMeta> {
    Json(ServiceMeta {
        uptime: format_uptime(state.started.elapsed()),
        info: SERVICE_INFO.to_string(),
        version: SERVICE_VERSION.to_string(),
    })
}

/// POST /paragliding/api/track[/] - ingest one track by URL.
///
/// The body is decoded leniently; a missing or malformed `url` surfaces as a
/// parse failure from the parser, not as a decoder crash. No identifier is
/// claimed and nothing is stored unless the parse succeeds.
async fn ingest_handler(State(state): State<ApiState>, body: Bytes) -> Response {
    let request: UrlRequest = serde_json::from_slice(&body).unwrap_or_default();

    let parsed = match state.parser.parse_url(&request.url).await {
        Ok(parsed) => parsed,
        Err(e) => return error_response(e),
    };

    let id = state.ids.next_id();
    let record = TrackRecord {
        id,
        h_date: parsed.date,
        pilot: parsed.pilot,
        glider: parsed.glider,
        glider_id: parsed.glider_id,
        track_length: geo::format_distance(geo::total_distance(&parsed.points)),
        track_src_url: request.url,
    };

    match state.store.add(record).await {
        Ok(()) => {
            tracing::info!(id, "track ingested");
            Json(id).into_response()
        },
        Err(e) => error_response(e),
    }
}

/// GET /paragliding/api/track[/] - all stored identifiers in insertion order.
async fn list_tracks_handler(State(state): State<ApiState>) -> Response {
    match state.store.get_all().await {
        Ok(records) => {
            let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
            Json(ids).into_response()
        },
        Err(e) => error_response(e),
    }
}

/// GET /paragliding/api/track/:id - one full track record.
async fn get_track_handler(State(state): State<ApiState>, Path(id): Path<String>) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return error_response(e),
    };
    match state.store.get(id).await {
        Ok(record) => Json(record).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /paragliding/api/track/:id/:field - one field as plain text.
async fn get_field_handler(
    State(state): State<ApiState>,
    Path((id, field)): Path<(String, String)>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return error_response(e),
    };
    // The track existing but the field name being unknown is a bad request,
    // so validate the field before the lookup.
    let field = match field.parse::<TrackField>() {
        Ok(field) => field,
        Err(e) => return error_response(e),
    };
    match state.store.get(id).await {
        Ok(record) => field.value_of(&record).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /paragliding/api/ticker[/] - a bounded page of recent identifiers.
async fn ticker_handler(State(state): State<ApiState>) -> Response {
    let started = millis_since_epoch();
    let records = match state.store.get_all().await {
        Ok(records) => records,
        Err(e) => return error_response(e),
    };
    let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
    let ticker = ticker_from_ids(&ids, millis_since_epoch() - started);
    Json(ticker).into_response()
}

/// Derives a ticker page from the ordered id sequence. Every access is
/// bounded by the actual record count; an empty store produces a zero-valued
/// ticker with an empty page.
fn ticker_from_ids(ids: &[i64], processing: i64) -> Ticker {
    let page_start = ids.len().saturating_sub(Ticker::PAGE_SIZE);
    let page = &ids[page_start..];
    Ticker {
        t_latest: ids.last().copied().unwrap_or(0),
        t_start: page.first().copied().unwrap_or(0),
        t_stop: page.last().copied().unwrap_or(0),
        tracks: page.to_vec(),
        processing,
    }
}

/// A non-empty id segment must be a non-negative integer.
fn parse_id(segment: &str) -> Result<i64> {
    let id: i64 = segment
        .parse()
        .map_err(|_| TrackError::InvalidId(segment.to_string()))?;
    if id < 0 {
        return Err(TrackError::InvalidId(segment.to_string()));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("0").unwrap(), 0);
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(matches!(parse_id("abc"), Err(TrackError::InvalidId(_))));
        assert!(matches!(parse_id("12abc"), Err(TrackError::InvalidId(_))));
        assert!(matches!(parse_id("-1"), Err(TrackError::InvalidId(_))));
        assert!(matches!(parse_id(""), Err(TrackError::InvalidId(_))));
    }

    #[test]
    fn test_ticker_empty_store() {
        let ticker = ticker_from_ids(&[], 0);
        assert_eq!(ticker.t_latest, 0);
        assert_eq!(ticker.t_start, 0);
        assert_eq!(ticker.t_stop, 0);
        assert!(ticker.tracks.is_empty());
    }

    #[test]
    fn test_ticker_under_page_size() {
        let ticker = ticker_from_ids(&[0, 1, 2], 1);
        assert_eq!(ticker.tracks, vec![0, 1, 2]);
        assert_eq!(ticker.t_latest, 2);
        assert_eq!(ticker.t_start, 0);
        assert_eq!(ticker.t_stop, 2);
    }

    #[test]
    fn test_ticker_truncates_to_most_recent_page() {
        let ids: Vec<i64> = (0..8).collect();
        let ticker = ticker_from_ids(&ids, 1);
        assert_eq!(ticker.tracks, vec![3, 4, 5, 6, 7]);
        assert_eq!(ticker.t_latest, 7);
        assert_eq!(ticker.t_start, 3);
        assert_eq!(ticker.t_stop, 7);
    }
}
