//! Routing module
//!
//! Maps `(method, path)` pairs onto endpoints, extracting path parameters.

mod matcher;

pub use matcher::{match_pattern, PathParams};

use hyper::Method;

/// Every operation the API exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    ListMovies,
    GetMovie,
    CreateMovie,
    UpdateMovie,
    DeleteMovie,
    Health,
}

#[derive(Debug, Clone)]
pub struct Route {
    pub method: Method,
    pub pattern: &'static str,
    pub endpoint: Endpoint,
}

/// Result of resolving a request against the route table
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution {
    Matched {
        endpoint: Endpoint,
        params: PathParams,
    },
    /// The path exists but not for this method
    MethodNotAllowed { allowed: Vec<Method> },
    NotFound,
}

/// Ordered route table; the first matching entry wins
#[derive(Debug, Clone, Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn route(mut self, method: Method, pattern: &'static str, endpoint: Endpoint) -> Self {
        self.routes.push(Route {
            method,
            pattern,
            endpoint,
        });
        self
    }

    /// The movie API route table
    pub fn movies() -> Self {
        Self::new()
            .route(Method::GET, "/movies", Endpoint::ListMovies)
            .route(Method::GET, "/movies/{id}", Endpoint::GetMovie)
            .route(Method::POST, "/movies", Endpoint::CreateMovie)
            .route(Method::PUT, "/movies/{id}", Endpoint::UpdateMovie)
            .route(Method::DELETE, "/movies/{id}", Endpoint::DeleteMovie)
            .route(Method::GET, "/healthz", Endpoint::Health)
    }

    pub fn resolve(&self, method: &Method, path: &str) -> Resolution {
        let mut allowed = Vec::new();
        for route in &self.routes {
            let Some(params) = match_pattern(route.pattern, path) else {
                continue;
            };
            if route.method == *method {
                return Resolution::Matched {
                    endpoint: route.endpoint,
                    params,
                };
            }
            if !allowed.contains(&route.method) {
                allowed.push(route.method.clone());
            }
        }

        if allowed.is_empty() {
            Resolution::NotFound
        } else {
            Resolution::MethodNotAllowed { allowed }
        }
    }

    /// Methods registered for `path`, empty when the path is unknown
    pub fn allowed_methods(&self, path: &str) -> Vec<Method> {
        let mut allowed: Vec<Method> = Vec::new();
        for route in &self.routes {
            if match_pattern(route.pattern, path).is_some() && !allowed.contains(&route.method) {
                allowed.push(route.method.clone());
            }
        }
        allowed
    }

    /// Distinct patterns, for error bodies
    pub fn patterns(&self) -> Vec<&'static str> {
        let mut patterns: Vec<&'static str> = Vec::new();
        for route in &self.routes {
            if !patterns.contains(&route.pattern) {
                patterns.push(route.pattern);
            }
        }
        patterns
    }
}
