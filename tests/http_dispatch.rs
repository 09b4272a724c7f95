//! HTTP tests against a live server bound to an ephemeral port

use burrito::server::{self, Dispatcher, FileViewRenderer, HomePage, HttpServer, NOT_FOUND_BODY};
use reqwest::StatusCode;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;

struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    _views: tempfile::TempDir,
}

impl TestServer {
    async fn start(home: HomePage) -> Self {
        let views = tempfile::tempdir().unwrap();
        std::fs::write(views.path().join("index.html"), "<h1>Burrito</h1>").unwrap();

        let renderer = Arc::new(FileViewRenderer::new(views.path()));
        let router = HttpServer::new(Dispatcher::new(home), renderer).router();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            server::serve(listener, router, async {
                let _ = rx.await;
            })
            .await
            .unwrap();
        });

        Self {
            addr,
            shutdown: Some(tx),
            _views: views,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

#[tokio::test]
async fn test_get_root_returns_home_text() {
    let server = TestServer::start(HomePage::default()).await;

    let response = reqwest::get(server.url("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/plain"));
    assert_eq!(response.text().await.unwrap(), "hello");
}

#[tokio::test]
async fn test_query_string_does_not_change_route() {
    let server = TestServer::start(HomePage::default()).await;

    let response = reqwest::get(server.url("/?theme=Taco")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "hello");
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let server = TestServer::start(HomePage::default()).await;

    for path in ["/anything-else", "/index.html", "/api/v1/tasks"] {
        let response = reqwest::get(server.url(path)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "path {}", path);
        assert_eq!(response.text().await.unwrap(), NOT_FOUND_BODY);
    }
}

#[tokio::test]
async fn test_post_root_is_not_found() {
    let server = TestServer::start(HomePage::default()).await;
    let client = reqwest::Client::new();

    let response = client.post(server.url("/")).body("x=1").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.text().await.unwrap(), "Page Not Found");

    let response = client.delete(server.url("/")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_template_home_renders_view() {
    let server = TestServer::start(HomePage::Template("index".to_string())).await;

    let response = reqwest::get(server.url("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));
    assert_eq!(response.text().await.unwrap(), "<h1>Burrito</h1>");
}

#[tokio::test]
async fn test_missing_view_is_server_error() {
    let server = TestServer::start(HomePage::Template("missing".to_string())).await;

    let response = reqwest::get(server.url("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // The catch-all is unaffected by the broken home page
    let response = reqwest::get(server.url("/elsewhere")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_head_root_mirrors_get_without_body() {
    let server = TestServer::start(HomePage::default()).await;
    let client = reqwest::Client::new();

    let response = client.head(server.url("/")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/plain"));
    assert!(response.bytes().await.unwrap().is_empty());

    let response = client.head(server.url("/missing")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
