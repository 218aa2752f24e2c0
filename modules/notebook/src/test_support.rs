//! Local stand-in for the encyclopedia's opensearch endpoint.

use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use std::collections::HashMap;
use std::time::Duration;

/// Serve a fake opensearch API on a random local port and return its URL.
///
/// Terms with special behavior: `slow` (answers after 2s), `broken` (not JSON),
/// `error` (HTTP 500), `odd` (links field is not an array), `short` (fewer than
/// four fields), `nothing` (no results). Any other term is found.
pub async fn spawn_fake_encyclopedia() -> String {
    let app = axum::Router::new().route("/w/api.php", axum::routing::get(opensearch));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/w/api.php", addr)
}

/// A URL nothing is listening on.
pub async fn unreachable_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/w/api.php", addr)
}

async fn opensearch(Query(params): Query<HashMap<String, String>>) -> Response {
    let expected = [
        ("action", "opensearch"),
        ("limit", "1"),
        ("namespace", "0"),
        ("format", "json"),
    ];
    if expected
        .iter()
        .any(|(k, v)| params.get(*k).map(String::as_str) != Some(*v))
    {
        return (StatusCode::BAD_REQUEST, "unexpected query").into_response();
    }

    let term = params.get("search").cloned().unwrap_or_default();
    match term.as_str() {
        "slow" => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(json!([term, [], [], []])).into_response()
        }
        "broken" => "<html>oops</html>".into_response(),
        "error" => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        "odd" => Json(json!([term, [], [], "not-a-list"])).into_response(),
        "short" => Json(json!([term, []])).into_response(),
        "nothing" => Json(json!([term, [], [], []])).into_response(),
        _ => {
            let link = format!("https://en.wikipedia.org/wiki/{}", term.replace(' ', "_"));
            Json(json!([term, [term], [""], [link]])).into_response()
        }
    }
}
