// API response utility functions module

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, ALLOW, CONTENT_TYPE, SERVER};
use hyper::{Method, Response, StatusCode};
use serde::Serialize;

use super::error::ApiError;
use crate::config::HttpConfig;
use crate::logger;

/// Build JSON response
pub fn json_response<T: Serialize>(
    status: StatusCode,
    body: &T,
    content_type: &str,
) -> Response<Full<Bytes>> {
    let json = match serde_json::to_vec(body) {
        Ok(j) => j,
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            return build(
                StatusCode::INTERNAL_SERVER_ERROR,
                content_type,
                Bytes::from_static(br#"{"error":{"code":500,"message":"Internal server error"}}"#),
            );
        }
    };

    build(status, content_type, Bytes::from(json))
}

/// Status-only response with no body
pub fn empty_response(status: StatusCode, content_type: &str) -> Response<Full<Bytes>> {
    build(status, content_type, Bytes::new())
}

/// Error body: `{"error": {"code": <status>, "message": <text>}}`
pub fn error_response(status: StatusCode, message: &str, content_type: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({
        "error": {
            "code": status.as_u16(),
            "message": message
        }
    });
    json_response(status, &body, content_type)
}

pub fn api_error_response(err: &ApiError, content_type: &str) -> Response<Full<Bytes>> {
    error_response(err.status(), &err.to_string(), content_type)
}

/// 404 for paths outside the route table
pub fn route_not_found(path: &str, endpoints: &[&str], content_type: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({
        "error": {
            "code": 404,
            "message": format!("No route for {path}")
        },
        "available_endpoints": endpoints
    });
    json_response(StatusCode::NOT_FOUND, &body, content_type)
}

/// 405 with the methods the path does support
pub fn method_not_allowed(
    method: &Method,
    allowed: &[Method],
    content_type: &str,
) -> Response<Full<Bytes>> {
    let mut response = error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        &format!("Method {method} not allowed"),
        content_type,
    );
    set_allow(&mut response, allowed);
    response
}

/// 204 reply to `OPTIONS`
pub fn options_response(allowed: &[Method]) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::new()));
    *response.status_mut() = StatusCode::NO_CONTENT;
    set_allow(&mut response, allowed);
    response
}

/// Add headers common to every response
pub fn finalize(mut response: Response<Full<Bytes>>, http: &HttpConfig) -> Response<Full<Bytes>> {
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&http.server_name) {
        headers.insert(SERVER, value);
    }
    if http.enable_cors {
        headers.insert(
            "Access-Control-Allow-Origin",
            HeaderValue::from_static("*"),
        );
        headers.insert(
            "Access-Control-Allow-Methods",
            HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS"),
        );
        headers.insert(
            "Access-Control-Allow-Headers",
            HeaderValue::from_static("Content-Type"),
        );
        headers.insert("Access-Control-Max-Age", HeaderValue::from_static("86400"));
    }
    response
}

fn set_allow(response: &mut Response<Full<Bytes>>, allowed: &[Method]) {
    let mut methods: Vec<&str> = allowed.iter().map(Method::as_str).collect();
    methods.push(Method::OPTIONS.as_str());
    if let Ok(value) = HeaderValue::from_str(&methods.join(", ")) {
        response.headers_mut().insert(ALLOW, value);
    }
}

fn build(status: StatusCode, content_type: &str, body: Bytes) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, content_type)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            logger::log_error(&format!("Failed to build {status} response: {e}"));
            let mut fallback = Response::new(Full::new(Bytes::new()));
            *fallback.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            fallback
        })
}
