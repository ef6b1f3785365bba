//! Shared fixtures for integration tests.
//!
//! [`MockTransport`] answers requests from canned routes and records every
//! request it receives, so tests can assert both on decoded results and on
//! what was sent over the wire.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mixcloud_api::clients::{HttpError, HttpMethod, HttpRequest, HttpResponse, Transport};
use mixcloud_api::{AccessToken, Mixcloud, MixcloudConfig};
use serde_json::json;

/// The access token used by authorized test clients.
pub const TOKEN: &str = "test-token";

#[derive(Debug)]
struct Route {
    method: HttpMethod,
    path: String,
    query: Vec<(String, String)>,
    response: HttpResponse,
}

/// A transport answering from canned routes.
///
/// A route matches a request with the same method and URL path whose query
/// contains every pair of the route. Among matching routes the one with the
/// most query pairs wins. Unmatched requests get a 404 error body.
#[derive(Debug, Default)]
pub struct MockTransport {
    routes: Mutex<Vec<Route>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Answers GET `path` with a 200 JSON `body`.
    pub fn get(&self, path: &str, body: serde_json::Value) -> &Self {
        self.respond(HttpMethod::Get, path, &[], HttpResponse::from_json(200, &body))
    }

    /// Answers GET `path` with `query` pairs with a 200 JSON `body`.
    pub fn get_with(&self, path: &str, query: &[(&str, &str)], body: serde_json::Value) -> &Self {
        self.respond(HttpMethod::Get, path, query, HttpResponse::from_json(200, &body))
    }

    /// Answers `method` on `path` with a 200 JSON `body`.
    pub fn on(&self, method: HttpMethod, path: &str, body: serde_json::Value) -> &Self {
        self.respond(method, path, &[], HttpResponse::from_json(200, &body))
    }

    pub fn respond(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(&str, &str)],
        response: HttpResponse,
    ) -> &Self {
        self.routes.lock().unwrap().push(Route {
            method,
            path: path.to_string(),
            query: query
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            response,
        });
        self
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// The last request received.
    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let url = request.full_url()?;
        self.requests.lock().unwrap().push(request.clone());

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        let routes = self.routes.lock().unwrap();
        let response = routes
            .iter()
            .filter(|route| route.method == request.http_method && route.path == url.path())
            .filter(|route| route.query.iter().all(|pair| pairs.contains(pair)))
            .max_by_key(|route| route.query.len())
            .map_or_else(
                || {
                    HttpResponse::from_json(
                        404,
                        &json!({"error": {"type": "NotFoundException", "message": "Not found"}}),
                    )
                },
                |route| route.response.clone(),
            );

        Ok(response)
    }
}

/// A client without an access token.
pub fn client(mock: &Arc<MockTransport>) -> Mixcloud {
    Mixcloud::with_transport(MixcloudConfig::default(), Arc::clone(mock) as Arc<dyn Transport>)
}

/// A client authorized with [`TOKEN`].
pub fn authorized_client(mock: &Arc<MockTransport>) -> Mixcloud {
    let config = MixcloudConfig::builder()
        .access_token(AccessToken::new(TOKEN).unwrap())
        .build()
        .unwrap();
    Mixcloud::with_transport(config, Arc::clone(mock) as Arc<dyn Transport>)
}

/// A user body as returned with `metadata=1`.
pub fn user_body(username: &str) -> serde_json::Value {
    json!({
        "key": format!("/{username}/"),
        "type": "user",
        "username": username,
        "name": username.to_uppercase(),
        "city": "Athens",
        "follower_count": 42,
        "created_time": "2013-05-21T09:34:12Z",
        "metadata": {
            "type": "user",
            "connections": {
                "followers": format!("https://api.mixcloud.com/{username}/followers/"),
                "cloudcasts": format!("https://api.mixcloud.com/{username}/cloudcasts/"),
            }
        }
    })
}

/// A partial user as embedded in list pages.
pub fn user_item(username: &str) -> serde_json::Value {
    json!({
        "key": format!("/{username}/"),
        "type": "user",
        "username": username,
    })
}

/// A list page of `items` linking to `next`.
pub fn page(items: Vec<serde_json::Value>, next: Option<&str>) -> serde_json::Value {
    match next {
        Some(next) => json!({"data": items, "paging": {"next": next}}),
        None => json!({"data": items, "paging": {}}),
    }
}
