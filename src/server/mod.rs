//! Page server: request dispatch and its axum host

pub mod dispatch;
pub mod http;
pub mod views;

pub use dispatch::{Body, Dispatch, Dispatcher, HomePage, NOT_FOUND_BODY};
pub use http::{HttpServer, ServerError, serve};
pub use views::{FileViewRenderer, ViewError, ViewRenderer};
