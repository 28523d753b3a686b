//! `HttpFetcher` against a throwaway local HTTP server.

use std::sync::{Arc, Mutex};

use autocomplete_lib::fetch::{Fetcher, HttpFetcher};
use autocomplete_lib::{Autocomplete, RemoteSource, ResolveError, ResultItem, WidgetConfig};
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serves one canned response per connection and records request lines.
async fn serve(status: &'static str, body: &'static str) -> (String, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&seen);

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                match socket.read(&mut chunk).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => buf.extend_from_slice(&chunk[..n]),
                }
            }
            let request = String::from_utf8_lossy(&buf);
            if let Some(line) = request.lines().next() {
                recorded.lock().unwrap().push(line.to_string());
            }
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    (format!("http://{addr}"), seen)
}

#[tokio::test]
async fn test_get_returns_body() {
    let (base, _) = serve("200 OK", r#"{"ok":true}"#).await;
    let body = HttpFetcher::new().get(&format!("{base}/ping")).await.unwrap();
    assert_eq!(body, r#"{"ok":true}"#);
}

#[tokio::test]
async fn test_with_client_uses_given_client() {
    let (base, seen) = serve("200 OK", "[]").await;
    let fetcher = HttpFetcher::with_client(reqwest::Client::new());
    assert_eq!(fetcher.get(&format!("{base}/shared")).await.unwrap(), "[]");
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let (base, _) = serve("500 Internal Server Error", "oops").await;
    let err = HttpFetcher::new().get(&format!("{base}/ping")).await.unwrap_err();
    assert!(matches!(err, ResolveError::Status { status: 500 }));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = HttpFetcher::new().get(&format!("http://{addr}/")).await.unwrap_err();
    assert!(matches!(err, ResolveError::Transport(_)));
}

#[tokio::test]
async fn test_widget_queries_endpoint() {
    let (base, seen) = serve("200 OK", r#"{"items":[{"login":"abby"},{"login":"zed"}]}"#).await;

    let source = RemoteSource::new(format!("{base}/search/users"), "q=", |raw: Value| {
        Ok(raw["items"]
            .as_array()
            .ok_or_else(|| ResolveError::adapter("missing items"))?
            .iter()
            .filter_map(|user| user["login"].as_str())
            .map(ResultItem::text)
            .collect())
    })
    .query_trailer("+in:login")
    .page_size_param("&per_page=");
    let config = WidgetConfig::builder()
        .max_results(5)
        .remote(source)
        .build()
        .unwrap();
    let widget = Autocomplete::attach(config);

    widget.submit_query("ab").await;

    assert_eq!(
        *seen.lock().unwrap(),
        ["GET /search/users?q=ab+in:login&per_page=5 HTTP/1.1"]
    );
    assert_eq!(widget.visible_results(), vec![ResultItem::text("abby")]);
}
