//! Request dispatch
//!
//! Two routes, tried in order:
//! 1. `GET /` (and `HEAD /`, which mirrors it) answers 200 with the configured
//!    home page.
//! 2. Everything else answers 404 `Page Not Found`.
//!
//! Only the method and path are looked at. Headers, body and query string never
//! influence the outcome.

use crate::core::config::{HomeMode, ServerConfig};
use axum::http::{Method, StatusCode};

/// Body of the catch-all response
pub const NOT_FOUND_BODY: &str = "Page Not Found";

/// What the root route answers with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomePage {
    /// Fixed plain-text body
    PlainText(String),
    /// Named view, rendered by the host
    Template(String),
}

impl Default for HomePage {
    fn default() -> Self {
        HomePage::PlainText("hello".to_string())
    }
}

impl HomePage {
    pub fn from_config(config: &ServerConfig) -> Self {
        match config.home {
            HomeMode::Text => HomePage::PlainText(config.home_text.clone()),
            HomeMode::Template => HomePage::Template(config.home_view.clone()),
        }
    }
}

/// Body selected by the dispatcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Text(String),
    View(String),
}

/// Outcome of routing one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub status: StatusCode,
    pub body: Body,
}

/// Stateless router over the two fixed routes
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    home: HomePage,
}

impl Dispatcher {
    pub fn new(home: HomePage) -> Self {
        Self { home }
    }

    pub fn home(&self) -> &HomePage {
        &self.home
    }

    pub fn dispatch(&self, method: &Method, path: &str) -> Dispatch {
        let read = *method == Method::GET || *method == Method::HEAD;
        if read && path == "/" {
            return self.home_response();
        }
        Self::not_found()
    }

    fn home_response(&self) -> Dispatch {
        let body = match &self.home {
            HomePage::PlainText(text) => Body::Text(text.clone()),
            HomePage::Template(view) => Body::View(view.clone()),
        };
        Dispatch {
            status: StatusCode::OK,
            body,
        }
    }

    fn not_found() -> Dispatch {
        Dispatch {
            status: StatusCode::NOT_FOUND,
            body: Body::Text(NOT_FOUND_BODY.to_string()),
        }
    }
}
