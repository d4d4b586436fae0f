// API module entry
// Movie CRUD over JSON: routing, body limits and handler dispatch

mod error;
mod handlers;
mod response;

use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::{Arc, OnceLock};

use crate::config::AppState;
use crate::logger;
use crate::routing::{Endpoint, PathParams, Resolution, Router};

pub use error::ApiError;
pub use response::*;

static ROUTER: OnceLock<Router> = OnceLock::new();

fn router() -> &'static Router {
    ROUTER.get_or_init(Router::movies)
}

/// API route handler
///
/// Generic over the request body so the same path serves hyper connections
/// and in-memory requests.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let http = &state.config.http;
    let content_type = http.content_type.as_str();

    let response = if method == Method::OPTIONS {
        let allowed = router().allowed_methods(&path);
        if allowed.is_empty() {
            route_not_found(&path, &router().patterns(), content_type)
        } else {
            options_response(&allowed)
        }
    } else {
        match router().resolve(&method, &path) {
            Resolution::Matched { endpoint, params } => {
                dispatch(endpoint, &params, req, &state)
                    .await
                    .unwrap_or_else(|e| {
                        if e.status().is_server_error() {
                            logger::log_error(&format!("[API] {method} {path}: {e}"));
                        } else {
                            logger::log_debug(&format!("[API] {method} {path}: {e}"));
                        }
                        api_error_response(&e, content_type)
                    })
            }
            Resolution::MethodNotAllowed { allowed } => {
                logger::log_warning(&format!("Method not allowed: {method} {path}"));
                method_not_allowed(&method, &allowed, content_type)
            }
            Resolution::NotFound => route_not_found(&path, &router().patterns(), content_type),
        }
    };

    Ok(finalize(response, http))
}

async fn dispatch<B>(
    endpoint: Endpoint,
    params: &PathParams,
    req: Request<B>,
    state: &AppState,
) -> Result<Response<Full<Bytes>>, ApiError>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let id = params.get("id").unwrap_or_default();
    match endpoint {
        Endpoint::ListMovies => handlers::list_movies(state).await,
        Endpoint::GetMovie => handlers::get_movie(state, id).await,
        Endpoint::CreateMovie => {
            let body = read_body(req, state.config.http.max_body_size).await?;
            handlers::create_movie(state, &body).await
        }
        Endpoint::UpdateMovie => {
            let body = read_body(req, state.config.http.max_body_size).await?;
            handlers::update_movie(state, id, &body).await
        }
        Endpoint::DeleteMovie => handlers::delete_movie(state, id).await,
        Endpoint::Health => handlers::health(state).await,
    }
}

/// Collect the request body, enforcing `max_body_size`
///
/// A declared `Content-Length` over the limit is rejected before reading;
/// bodies without one are cut off once they pass the limit.
async fn read_body<B>(req: Request<B>, max_body_size: u64) -> Result<Bytes, ApiError>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    if let Some(size) = declared_length(&req) {
        if size > max_body_size {
            return Err(ApiError::PayloadTooLarge {
                limit: max_body_size,
            });
        }
    }

    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    match Limited::new(req.into_body(), limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.is::<LengthLimitError>() => Err(ApiError::PayloadTooLarge {
            limit: max_body_size,
        }),
        Err(e) => Err(ApiError::BodyRead(e.to_string())),
    }
}

/// Parsed `Content-Length`, ignoring malformed values
fn declared_length<B>(req: &Request<B>) -> Option<u64> {
    let value = req.headers().get(hyper::header::CONTENT_LENGTH)?;
    match value.to_str().ok().and_then(|v| v.parse::<u64>().ok()) {
        Some(size) => Some(size),
        None => {
            logger::log_warning(&format!(
                "Invalid Content-Length value: {value:?}, skipping size check"
            ));
            None
        }
    }
}
