use std::future::Future;
use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use super::{
    dispatch::{Body, Dispatcher},
    views::{ViewError, ViewRenderer},
};

/// Host-side failures surfaced as 500s
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    View(#[from] ViewError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        error!("{}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

struct AppState<V> {
    dispatcher: Dispatcher,
    renderer: Arc<V>,
}

/// HTTP service builder.
pub struct HttpServer<V> {
    dispatcher: Dispatcher,
    renderer: Arc<V>,
}

impl<V> HttpServer<V>
where
    V: ViewRenderer + 'static,
{
    pub fn new(dispatcher: Dispatcher, renderer: Arc<V>) -> Self {
        Self {
            dispatcher,
            renderer,
        }
    }

    /// Build the axum router.
    ///
    /// There are no axum routes: a single fallback hands every request to the
    /// dispatcher, which owns route order. This also keeps `POST /` a 404
    /// rather than axum's 405.
    pub fn router(self) -> Router {
        let state = Arc::new(AppState {
            dispatcher: self.dispatcher,
            renderer: self.renderer,
        });
        Router::new().fallback(handle::<V>).with_state(state)
    }
}

async fn handle<V>(State(state): State<Arc<AppState<V>>>, method: Method, uri: Uri) -> Response
where
    V: ViewRenderer + 'static,
{
    let dispatch = state.dispatcher.dispatch(&method, uri.path());
    debug!("{} {} -> {}", method, uri.path(), dispatch.status);

    match dispatch.body {
        Body::Text(text) => (dispatch.status, text).into_response(),
        Body::View(view) => match state.renderer.render(&view).await {
            Ok(html) => (dispatch.status, Html(html)).into_response(),
            Err(e) => ServerError::from(e).into_response(),
        },
    }
}

/// Serve `router` on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!("Listening on http://{}", addr);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("Server on {} stopped", addr);
    Ok(())
}
