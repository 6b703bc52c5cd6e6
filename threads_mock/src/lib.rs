//! A local stand-in for the Threads API: the OAuth dialog and token exchange, plus profile and
//! thread lookups over a small fixed data set.

pub mod config;
pub mod error;
pub mod fixtures;
pub mod graph;
pub mod oauth;
pub mod state;

use std::{io, net::SocketAddr, sync::Arc};

use axum::{
    routing::{get, post},
    Router,
};
use tokio::{net::TcpListener, task::JoinHandle};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub use config::MockConfig;
pub use state::AppState;

pub const API_VERSION: &str = "v1.0";

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/oauth/authorize", get(oauth::authorize))
        .route("/oauth/access_token", post(oauth::access_token))
        .route(&format!("/{}/:id", API_VERSION), get(graph::get_object))
        .route(
            &format!("/{}/:id/threads", API_VERSION),
            get(graph::get_user_threads),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves the mock API on an already-bound listener until the task is cancelled.
pub async fn serve(listener: TcpListener, config: MockConfig) -> io::Result<()> {
    let app = router(Arc::new(AppState::new(config)));
    axum::serve(listener, app).await
}

/// A mock server running in the background on an ephemeral local port. The server is shut
/// down when this is dropped.
#[derive(Debug)]
pub struct MockServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl MockServer {
    pub async fn start(config: MockConfig) -> io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        info!(%addr, "mock Threads API listening");

        let handle = tokio::spawn(async move {
            if let Err(err) = serve(listener, config).await {
                error!(error = %err, "mock server stopped");
            }
        });

        Ok(Self { addr, handle })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// The base URL of the server, e.g. `http://127.0.0.1:49152`.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use url::Url;

    use super::router;
    use crate::{
        config::{MockConfig, DEFAULT_CLIENT_ID, DEFAULT_CLIENT_SECRET, DEFAULT_REDIRECT_URI},
        state::AppState,
    };

    fn app() -> (Router, Arc<AppState>) {
        let state = Arc::new(AppState::new(MockConfig::new()));
        (router(state.clone()), state)
    }

    async fn body_json(resp: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    async fn body_text(resp: axum::response::Response) -> String {
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    fn authorize_uri(pairs: &[(&str, &str)]) -> String {
        let mut url = Url::parse("http://mock/oauth/authorize").unwrap();
        url.query_pairs_mut().extend_pairs(pairs);
        format!("/oauth/authorize?{}", url.query().unwrap_or_default())
    }

    fn token_request(body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/oauth/access_token")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    fn token_body(code: &str) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .append_pair("client_id", DEFAULT_CLIENT_ID)
            .append_pair("client_secret", DEFAULT_CLIENT_SECRET)
            .append_pair("grant_type", "authorization_code")
            .append_pair("redirect_uri", DEFAULT_REDIRECT_URI)
            .append_pair("code", code)
            .finish()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_authorize_redirects_with_code() {
        let (app, _) = app();

        let resp = app
            .oneshot(get(&authorize_uri(&[
                ("client_id", DEFAULT_CLIENT_ID),
                ("redirect_uri", DEFAULT_REDIRECT_URI),
                ("scope", "threads_basic,threads_content_publish"),
                ("response_type", "code"),
                ("state", "xyz"),
            ])))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::FOUND);
        let location = resp.headers()[header::LOCATION].to_str().unwrap();
        let location = Url::parse(location).unwrap();
        assert!(location.as_str().starts_with(DEFAULT_REDIRECT_URI));

        let pairs = location.query_pairs().into_owned().collect::<Vec<_>>();
        assert_eq!(pairs[0].0, "code");
        assert!(pairs[0].1.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(pairs[1], ("state".to_owned(), "xyz".to_owned()));
    }

    #[tokio::test]
    async fn test_authorize_rejections() {
        let cases: &[&[(&str, &str)]] = &[
            &[
                ("redirect_uri", DEFAULT_REDIRECT_URI),
                ("scope", "threads_basic"),
                ("response_type", "code"),
            ],
            &[
                ("client_id", "000"),
                ("redirect_uri", DEFAULT_REDIRECT_URI),
                ("scope", "threads_basic"),
                ("response_type", "code"),
            ],
            &[
                ("client_id", DEFAULT_CLIENT_ID),
                ("redirect_uri", "https://evil.example.com/"),
                ("scope", "threads_basic"),
                ("response_type", "code"),
            ],
            &[
                ("client_id", DEFAULT_CLIENT_ID),
                ("redirect_uri", DEFAULT_REDIRECT_URI),
                ("scope", "threads_basic"),
                ("response_type", "token"),
            ],
            &[
                ("client_id", DEFAULT_CLIENT_ID),
                ("redirect_uri", DEFAULT_REDIRECT_URI),
                ("response_type", "code"),
            ],
            &[
                ("client_id", DEFAULT_CLIENT_ID),
                ("redirect_uri", DEFAULT_REDIRECT_URI),
                ("scope", "threads_basic,<script>"),
                ("response_type", "code"),
            ],
        ];

        for pairs in cases {
            let (app, _) = app();
            let resp = app.oneshot(get(&authorize_uri(pairs))).await.unwrap();
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{:?}", pairs);

            let content_type = resp.headers()[header::CONTENT_TYPE].to_str().unwrap();
            assert!(content_type.starts_with("text/html"));

            let page = body_text(resp).await;
            assert!(!page.contains("<script>"));
        }
    }

    #[tokio::test]
    async fn test_token_exchange() {
        let (app, state) = app();
        let code = state.issue_code(DEFAULT_CLIENT_ID, DEFAULT_REDIRECT_URI).await;

        let resp = app
            .clone()
            .oneshot(token_request(token_body(&code)))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body["user_id"], json!(1234567));
        let token = body["access_token"].as_str().unwrap();
        assert_eq!(state.token_user(token).await.as_deref(), Some("1234567"));

        // Codes are single-use.
        let resp = app.oneshot(token_request(token_body(&code))).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        assert_eq!(body["error"]["type"], "OAuthException");
        assert_eq!(body["error"]["code"], 100);
        assert!(body["error"]["fbtrace_id"].is_string());
    }

    #[tokio::test]
    async fn test_token_exchange_rejections() {
        let (app, state) = app();
        let code = state.issue_code(DEFAULT_CLIENT_ID, DEFAULT_REDIRECT_URI).await;

        let bad_secret = token_body(&code).replace(DEFAULT_CLIENT_SECRET, "wrong");
        let resp = app.clone().oneshot(token_request(bad_secret)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["error"]["code"], 101);

        let bad_grant = token_body(&code).replace("authorization_code", "client_credentials");
        let resp = app.clone().oneshot(token_request(bad_grant)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let missing = format!("client_id={}", DEFAULT_CLIENT_ID);
        let resp = app.clone().oneshot(token_request(missing)).await.unwrap();
        let body = body_json(resp).await;
        assert_eq!(body["error"]["message"], "Missing parameter: client_secret");

        // The failed attempts above did not consume the code.
        let resp = app.oneshot(token_request(token_body(&code))).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_graph_requires_token() {
        let (app, _) = app();

        let resp = app.clone().oneshot(get("/v1.0/me")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["error"]["code"], 104);

        let resp = app.oneshot(get("/v1.0/me?access_token=nope")).await.unwrap();
        assert_eq!(body_json(resp).await["error"]["code"], 190);
    }

    #[tokio::test]
    async fn test_get_objects() {
        let (app, state) = app();
        let token = state.issue_token("1234567").await;

        let resp = app
            .clone()
            .oneshot(get(&format!("/v1.0/me?access_token={}", token)))
            .await
            .unwrap();
        assert_eq!(body_json(resp).await, json!({"id": "1234567"}));

        let resp = app
            .clone()
            .oneshot(get(&format!(
                "/v1.0/7654321?access_token={}&fields=id,username,threads_biography",
                token
            )))
            .await
            .unwrap();
        assert_eq!(
            body_json(resp).await,
            json!({"id": "7654321", "username": "quietmockuser"})
        );

        let resp = app
            .clone()
            .oneshot(get(&format!(
                "/v1.0/18050206876707110?access_token={}&fields=text,media_type",
                token
            )))
            .await
            .unwrap();
        assert_eq!(
            body_json(resp).await,
            json!({"text": "Hello from the mock server", "media_type": "TEXT_POST"})
        );

        let resp = app
            .clone()
            .oneshot(get(&format!("/v1.0/me?access_token={}&fields=id,bogus", token)))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        assert_eq!(body["error"]["code"], 100);
        assert_eq!(
            body["error"]["message"],
            "(#100) Tried accessing nonexisting field (bogus) on node type (ThreadsUser)"
        );

        let resp = app
            .oneshot(get(&format!("/v1.0/999?access_token={}", token)))
            .await
            .unwrap();
        assert_eq!(body_json(resp).await["error"]["type"], "GraphMethodException");
    }

    #[tokio::test]
    async fn test_user_threads_paging() {
        let (app, state) = app();
        let token = state.issue_token("1234567").await;

        let resp = app
            .clone()
            .oneshot(get(&format!(
                "/v1.0/me/threads?access_token={}&fields=id,text&limit=1",
                token
            )))
            .await
            .unwrap();
        let body = body_json(resp).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["id"], "18050206876707110");
        assert_eq!(body["paging"]["cursors"]["after"], "18050206876707110");

        let resp = app
            .clone()
            .oneshot(get(&format!(
                "/v1.0/me/threads?access_token={}&after=18050206876707110",
                token
            )))
            .await
            .unwrap();
        let body = body_json(resp).await;
        assert_eq!(body["data"], json!([]));
        assert_eq!(body["paging"], json!({"cursors": {}}));

        let resp = app
            .oneshot(get(&format!(
                "/v1.0/me/threads?access_token={}&limit=lots",
                token
            )))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
