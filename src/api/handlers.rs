// Movie resource handlers
// Each handler runs one store operation and serializes the outcome

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use super::error::ApiError;
use super::response::{empty_response, json_response};
use crate::config::AppState;
use crate::logger;
use crate::movies::Movie;

type HandlerResult = Result<Response<Full<Bytes>>, ApiError>;

/// GET /movies
pub async fn list_movies(state: &AppState) -> HandlerResult {
    let movies = state.store.list().await;
    Ok(json_response(StatusCode::OK, &movies, content_type(state)))
}

/// GET /movies/{id}
///
/// Unknown ids get a bodiless 404.
pub async fn get_movie(state: &AppState, id: &str) -> HandlerResult {
    match state.store.find_by_id(id).await {
        Some(movie) => Ok(json_response(StatusCode::OK, &movie, content_type(state))),
        None => {
            logger::log_debug(&format!("[API] Movie {id} not found"));
            Ok(empty_response(StatusCode::NOT_FOUND, content_type(state)))
        }
    }
}

/// POST /movies
///
/// The server assigns the id; one sent by the client is discarded.
pub async fn create_movie(state: &AppState, body: &Bytes) -> HandlerResult {
    let movie = decode_movie(body)?;
    let created = state.store.create(movie).await?;
    Ok(json_response(StatusCode::OK, &created, content_type(state)))
}

/// PUT /movies/{id}
///
/// Responds with the whole list after the update. Unknown ids are a no-op.
pub async fn update_movie(state: &AppState, id: &str, body: &Bytes) -> HandlerResult {
    let movie = decode_movie(body)?;
    let (replaced, movies) = state.store.replace_by_id(id, movie).await;
    if !replaced {
        logger::log_debug(&format!("[API] Update of unknown movie {id} ignored"));
    }
    Ok(json_response(StatusCode::OK, &movies, content_type(state)))
}

/// DELETE /movies/{id}
///
/// Responds with the whole list after the delete. Unknown ids are a no-op.
pub async fn delete_movie(state: &AppState, id: &str) -> HandlerResult {
    let (removed, movies) = state.store.delete_by_id(id).await;
    if !removed {
        logger::log_debug(&format!("[API] Delete of unknown movie {id} ignored"));
    }
    Ok(json_response(StatusCode::OK, &movies, content_type(state)))
}

/// GET /healthz
pub async fn health(state: &AppState) -> HandlerResult {
    let body = serde_json::json!({
        "status": "ok",
        "movies": state.store.len().await
    });
    Ok(json_response(StatusCode::OK, &body, content_type(state)))
}

fn decode_movie(body: &[u8]) -> Result<Movie, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::InvalidBody(e.to_string()))
}

fn content_type(state: &AppState) -> &str {
    &state.config.http.content_type
}
