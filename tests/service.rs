use ecg_feed::{
    client::ArticleService,
    error::{ClientError, ResponseError},
    models::{Article, ArticleId, Category},
    shell::{Shell, LOAD_FAILED},
};
use reqwest::{StatusCode, Url};
use serde_json::{json, Value};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
    task::JoinHandle,
};

/// Answers exactly one request, handing back what was received.
async fn serve_once(status: &'static str, body: &'static str) -> (Url, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.expect("write");
        let _ = socket.shutdown().await;
        request
    });
    let url = Url::parse(&format!("http://{addr}/exec")).expect("url");
    (url, handle)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.expect("read");
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_string();
            let length = head
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).to_string()
}

fn request_body(request: &str) -> Value {
    let (_, body) = request.split_once("\r\n\r\n").expect("request body");
    serde_json::from_str(body).expect("json body")
}

fn service(endpoint: Url) -> ArticleService {
    let http_client = reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("http client");
    ArticleService::builder()
        .endpoint(endpoint)
        .http_client(http_client)
        .build()
}

fn article() -> Article {
    Article {
        id: Some(ArticleId::from(1_736_000_000_000)),
        title: "Weekly tips".into(),
        author: "Kairi".into(),
        category: Category::EnglishTips,
        content: "Say hello.".into(),
        tags: vec!["English".into(), "tips".into()],
        date: "2025-01-04".into(),
        image: None,
    }
}

#[tokio::test]
async fn lists_bare_array_with_json_content_type() {
    let (url, server) = serve_once(
        "200 OK",
        r#"[{"id":1,"title":"Hello World","content":"intro","tags":["intro"]}]"#,
    )
    .await;

    let articles = service(url).articles().await.expect("listing");
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].title, "Hello World");

    let request = server.await.expect("server");
    assert!(request.starts_with("GET /exec"));
    assert!(request
        .to_ascii_lowercase()
        .contains("content-type: application/json"));
}

#[tokio::test]
async fn lists_wrapped_data() {
    let (url, server) = serve_once(
        "200 OK",
        r#"{"data":[{"id":"a","title":"A"},{"id":"b","title":"B"}]}"#,
    )
    .await;

    let articles = service(url).articles().await.expect("listing");
    let ids = articles
        .iter()
        .filter_map(|a| a.id.as_ref().map(ToString::to_string))
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["a", "b"]);
    server.await.expect("server");
}

#[tokio::test]
async fn unrecognized_shape_is_empty_not_an_error() {
    let (url, server) = serve_once("200 OK", r#"{"result":"ok"}"#).await;
    let articles = service(url).articles().await.expect("listing");
    assert!(articles.is_empty());
    server.await.expect("server");
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let (url, server) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#).await;
    let service = service(url);

    let err = service.articles().await.expect_err("status error");
    match err {
        ClientError::ResponseError(ResponseError::HttpStatus { status, body }) => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert!(body.contains("boom"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    let health = service.health_status();
    assert_eq!(health.total_requests, 1);
    assert_eq!(health.failed_requests, 1);
    server.await.expect("server");
}

#[tokio::test]
async fn create_posts_method_and_article() {
    let (url, server) = serve_once("200 OK", "not even json").await;

    service(url).create(&article()).await.expect("create");

    let request = server.await.expect("server");
    assert!(request.starts_with("POST /exec"));
    let body = request_body(&request);
    assert_eq!(body["method"], json!("create"));
    assert_eq!(body["article"]["id"], json!(1_736_000_000_000_i64));
    assert_eq!(body["article"]["category"], json!("English Tips"));
    assert_eq!(body["article"]["tags"], json!(["English", "tips"]));
    assert_eq!(body["article"]["image"], json!(""));
}

#[tokio::test]
async fn delete_posts_method_and_id() {
    let (url, server) = serve_once("200 OK", "{}").await;

    service(url)
        .delete(&ArticleId::from("row-7"))
        .await
        .expect("delete");

    let body = request_body(&server.await.expect("server"));
    assert_eq!(body, json!({ "method": "delete", "id": "row-7" }));
}

#[tokio::test]
async fn shell_empties_store_when_listing_fails() {
    let (url, server) = serve_once("503 Service Unavailable", "").await;
    let shell = Shell::new(service(url));

    assert!(!shell.load_articles().await);
    let state = shell.state();
    assert!(state.articles.is_empty());
    assert_eq!(state.error.as_deref(), Some(LOAD_FAILED));
    assert!(!state.is_loading());
    server.await.expect("server");
}

#[tokio::test]
async fn shell_reports_malformed_json() {
    let (url, server) = serve_once("200 OK", "<html>sign in</html>").await;
    let shell = Shell::new(service(url));

    assert!(!shell.load_articles().await);
    assert_eq!(shell.state().error.as_deref(), Some(LOAD_FAILED));
    server.await.expect("server");
}

#[tokio::test]
async fn unreachable_service_is_a_request_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let url = Url::parse(&format!("http://{addr}/exec")).expect("url");
    let err = service(url).articles().await.expect_err("connection refused");
    assert!(matches!(err, ClientError::RequestError(_)));
}
