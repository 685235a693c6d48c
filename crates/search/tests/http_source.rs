use std::collections::HashMap;

use axum::Router;
use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use bundlepick_search::{CatalogSource, HttpCatalogSource, PageQuery, SearchConfig, SearchError};

const API_KEY: &str = "test-key";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        let app = Router::new().route("/task/products/search", get(search));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}/task", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn source(&self, api_key: &str) -> HttpCatalogSource {
        HttpCatalogSource::new(&SearchConfig::new(self.base_url.clone(), api_key))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// Serves a tiny catalog; the search term selects canned bodies.
async fn search(headers: HeaderMap, Query(params): Query<HashMap<String, String>>) -> Response {
    if headers.get("x-api-key").and_then(|v| v.to_str().ok()) != Some(API_KEY) {
        return (StatusCode::UNAUTHORIZED, "invalid api key").into_response();
    }

    let page: u32 = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let limit: u32 = params.get("limit").and_then(|p| p.parse().ok()).unwrap_or(10);
    let search = params.get("search").cloned().unwrap_or_default();

    let body = match search.as_str() {
        "broken" => "{\"not\": \"a list\"}".to_string(),
        "nothing" => "null".to_string(),
        _ if page > 1 => "null".to_string(),
        _ => {
            let products: Vec<serde_json::Value> = (1..=limit.min(3))
                .map(|id| {
                    serde_json::json!({
                        "id": id,
                        "title": format!("{search} #{id}"),
                        "variants": [
                            { "id": id * 100 + 1, "product_id": id, "title": "Small", "price": "10.00" },
                            { "id": id * 100 + 2, "product_id": id, "title": "Large", "price": 12 }
                        ]
                    })
                })
                .collect();
            serde_json::Value::Array(products).to_string()
        }
    };

    (StatusCode::OK, [("content-type", "application/json")], body).into_response()
}

fn query(search: &str, page: u32) -> PageQuery {
    PageQuery {
        search: search.to_string(),
        page,
        limit: 10,
    }
}

#[tokio::test]
async fn fetches_and_normalizes_a_page() {
    let server = TestServer::spawn().await;
    let source = server.source(API_KEY);

    let products = source.search(&query("towel", 1)).await.unwrap();
    assert_eq!(products.len(), 3);
    assert_eq!(products[0].title(), "towel #1");
    assert_eq!(products[0].variants().len(), 2);
    assert_eq!(products[0].variants()[1].price().display(), "₹12");
    assert!(products.iter().all(|p| !p.has_selection()));
}

#[tokio::test]
async fn search_text_is_url_encoded() {
    let server = TestServer::spawn().await;
    let source = server.source(API_KEY);

    let products = source.search(&query("linen & co", 1)).await.unwrap();
    assert_eq!(products[0].title(), "linen & co #1");
}

#[tokio::test]
async fn null_page_is_empty() {
    let server = TestServer::spawn().await;
    let source = server.source(API_KEY);

    assert!(source.search(&query("nothing", 1)).await.unwrap().is_empty());
    assert!(source.search(&query("towel", 2)).await.unwrap().is_empty());
}

#[tokio::test]
async fn wrong_api_key_is_an_api_error() {
    let server = TestServer::spawn().await;
    let source = server.source("wrong");

    let err = source.search(&query("towel", 1)).await.unwrap_err();
    assert_eq!(err, SearchError::Api(401, "invalid api key".to_string()));
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let server = TestServer::spawn().await;
    let source = server.source(API_KEY);

    let err = source.search(&query("broken", 1)).await.unwrap_err();
    assert!(matches!(err, SearchError::Parse(_)));
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = HttpCatalogSource::new(&SearchConfig::new(format!("http://{addr}"), API_KEY));
    let err = source.search(&query("towel", 1)).await.unwrap_err();
    assert!(matches!(err, SearchError::Network(_)));
}
