use std::{error, fmt, sync::Arc, time::Duration};

use enumscribe::ScribeStaticStr;
use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::{
    auth::{Auth, UserAuth},
    config::ClientConfig,
    insights::{AccountMetric, MediaMetric, MetricValue},
    limit::PublishingLimit,
    media::{MediaId, MediaObject},
    publish::{CreateMediaContainer, ManageReply, Publish},
    reply::Reply,
    request::{
        AccountInsights, Conversation, Endpoint, MediaInsights, MediaLookup, ProfileLookup,
        PublishingLimitLookup, Replies, UserThreads,
    },
    request_data::{join_comma_separated, FormData, Params, QueryData, RequestData},
    request_options::Scope,
    response::{AccessTokenResponse, ErrorEnvelope, ErrorResponse, Page},
    user::{UserId, UserProfile},
};

/// An asynchronous client for the Threads API.
///
/// The type parameter is the credentials the client sends with its requests. A client holding
/// [`Unauthenticated`](crate::auth::Unauthenticated) can only perform the OAuth handshake; once an
/// authorization code has been exchanged for an [`AccessToken`](crate::auth::AccessToken), use
/// [`reauthenticate`](Self::reauthenticate) to obtain a client which can call the rest of the API.
///
/// Cloning a client is cheap, and the clones share a connection pool.
#[derive(Clone)]
pub struct AsyncClient<A> {
    http_client: reqwest::Client,
    config: Arc<ClientConfig>,
    auth: Arc<A>,
}

impl<A: Auth> AsyncClient<A> {
    /// Returns a new client for the production Threads API.
    pub fn new(auth: A, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let config = match timeout {
            Some(timeout) => ClientConfig::new().timeout(timeout),
            None => ClientConfig::new(),
        };

        Self::with_config(auth, config)
    }

    pub fn with_config(auth: A, config: ClientConfig) -> Result<Self, reqwest::Error> {
        let builder = reqwest::Client::builder().https_only(config.is_https_only());

        let builder = if config.is_https_only() {
            builder.min_tls_version(reqwest::tls::Version::TLS_1_2)
        } else {
            builder
        };

        let builder = match config.get_timeout() {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        };

        let http_client = builder.build()?;

        Ok(Self {
            http_client,
            config: Arc::new(config),
            auth: Arc::new(auth),
        })
    }

    pub fn auth(&self) -> &A {
        &self.auth
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Consumes this client and returns a new client using the given authentication credentials.
    pub fn reauthenticate<T: Auth>(self, auth: T) -> AsyncClient<T> {
        AsyncClient {
            http_client: self.http_client,
            config: self.config,
            auth: Arc::new(auth),
        }
    }

    /// Create a new client which uses different authentication credentials, but uses the same HTTP
    /// connection pool as this client.
    pub fn clone_reauthenticate<T: Auth>(&self, auth: T) -> AsyncClient<T> {
        AsyncClient {
            http_client: self.http_client.clone(),
            config: self.config.clone(),
            auth: Arc::new(auth),
        }
    }

    /// Returns the URL to send a user to so that they can authorize an app. Once they do, they
    /// are redirected to `redirect_uri` with a `code` query parameter, which can be passed to
    /// [`exchange_authorization_code`](Self::exchange_authorization_code).
    pub fn authorization_url<I>(
        &self,
        client_id: &str,
        redirect_uri: &str,
        scopes: I,
        state: Option<&str>,
    ) -> Url
    where
        I: IntoIterator<Item = Scope>,
    {
        let mut url = self.config.get_authorize_base_url().clone();

        let path = format!("{}/oauth/authorize", url.path().trim_end_matches('/'));
        url.set_path(&path);

        let scope = join_comma_separated(scopes.into_iter().map(|scope| scope.scribe()));

        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("client_id", client_id)
                .append_pair("redirect_uri", redirect_uri)
                .append_pair("scope", &scope)
                .append_pair("response_type", "code");

            if let Some(state) = state.filter(|state| !state.is_empty()) {
                query.append_pair("state", state);
            }
        }

        url
    }

    /// Exchanges the authorization code a user was redirected with for a short-lived access token.
    pub async fn exchange_authorization_code(
        &self,
        client_id: &str,
        client_secret: &str,
        redirect_uri: &str,
        code: &str,
    ) -> Result<AccessTokenResponse, Error> {
        let mut params = Params::new();
        params.push("client_id", client_id);
        params.push("client_secret", client_secret);
        params.push("grant_type", "authorization_code");
        params.push("redirect_uri", redirect_uri);
        params.push("code", code);

        self.api_request(Request::new_with_data(
            Method::Post,
            self.config.api_url("oauth/access_token"),
            FormData::new(params),
        ))
        .await
    }

    async fn raw_request<ReqData>(
        &self,
        request: Request<ReqData>,
    ) -> Result<reqwest::Response, Error>
    where
        ReqData: RequestData,
    {
        // Only log the parameter names; the values include the access token.
        debug!(
            method = request.method.as_str(),
            url = %request.url,
            params = ?request.data.params().keys().collect::<Vec<_>>(),
            "sending request"
        );

        let http_request = {
            let builder = self
                .http_client
                .request(request.method.to_reqwest_method(), request.url.as_str());

            request
                .data
                .build_http_request(builder)
                .map_err(|err| ErrorRepr {
                    kind: ErrorKind::Transfer(err.without_url()),
                    status: None,
                }.boxed())?
        };

        self.http_client
            .execute(http_request)
            .await
            .map_err(|err| ErrorRepr {
                kind: ErrorKind::Transfer(err.without_url()),
                status: None,
            }.boxed())
    }

    pub(crate) async fn api_request<ReqData, RespData>(
        &self,
        request: Request<ReqData>,
    ) -> Result<RespData, Error>
    where
        ReqData: RequestData,
        RespData: DeserializeOwned,
    {
        let resp = self.raw_request(request).await?;

        let status = resp.status();
        debug!(status = status.as_u16(), "received response");

        let body = resp
            .bytes()
            .await
            .map_err(|err| ErrorRepr {
                kind: ErrorKind::Transfer(err.without_url()),
                status: Some(status),
            }.boxed())?;

        parse_response(status, &body)
    }
}

impl<A: UserAuth> AsyncClient<A> {
    /// The id of the user this client makes requests on behalf of.
    pub fn user_id(&self) -> &UserId {
        self.auth.user_id()
    }

    /// Sends a request to an authenticated endpoint. The access token is added to the query
    /// string of `GET` requests and to the body of `POST` requests.
    pub async fn execute<E>(&self, endpoint: &E) -> Result<E::Response, Error>
    where
        E: Endpoint,
    {
        let url = self.config.versioned_api_url(&endpoint.path());

        let mut params = endpoint.params();
        self.auth.apply(&mut params);

        match E::METHOD {
            Method::Get => {
                self.api_request(Request::new_with_data(Method::Get, url, QueryData::new(params)))
                    .await
            }
            Method::Post => {
                self.api_request(Request::new_with_data(Method::Post, url, FormData::new(params)))
                    .await
            }
        }
    }

    /// Creates an unpublished media container, returning its id. Publish it with
    /// [`publish`](Self::publish).
    pub async fn create_media_container(
        &self,
        container: &CreateMediaContainer,
    ) -> Result<MediaId, Error> {
        self.execute(container).await.map(|created| created.id)
    }

    /// Publishes a media container, returning the id of the published media object.
    pub async fn publish(&self, creation_id: &MediaId) -> Result<MediaId, Error> {
        self.execute(&Publish::new(creation_id))
            .await
            .map(|created| created.id)
    }

    pub async fn get_user_threads(&self, request: &UserThreads) -> Result<Page<MediaObject>, Error> {
        self.execute(request).await
    }

    pub async fn get_media_object(&self, request: &MediaLookup) -> Result<MediaObject, Error> {
        self.execute(request).await
    }

    pub async fn get_user_profile(&self, request: &ProfileLookup) -> Result<UserProfile, Error> {
        self.execute(request).await
    }

    pub async fn get_user_threads_publishing_limit(
        &self,
        request: &PublishingLimitLookup,
    ) -> Result<Vec<PublishingLimit>, Error> {
        self.execute(request).await.map(|list| list.data)
    }

    pub async fn get_replies(&self, request: &Replies) -> Result<Page<Reply>, Error> {
        self.execute(request).await
    }

    pub async fn get_conversation(&self, request: &Conversation) -> Result<Page<Reply>, Error> {
        self.execute(request).await
    }

    /// Hides or unhides a reply to one of the user's posts. Returns whether the API reported
    /// success.
    pub async fn manage_reply(&self, reply_id: &MediaId, hide: bool) -> Result<bool, Error> {
        self.execute(&ManageReply::new(reply_id, hide))
            .await
            .map(|success| success.success)
    }

    pub async fn hide_reply(&self, reply_id: &MediaId) -> Result<bool, Error> {
        self.manage_reply(reply_id, true).await
    }

    pub async fn unhide_reply(&self, reply_id: &MediaId) -> Result<bool, Error> {
        self.manage_reply(reply_id, false).await
    }

    pub async fn get_media_metrics(
        &self,
        request: &MediaInsights,
    ) -> Result<Vec<MetricValue<MediaMetric>>, Error> {
        self.execute(request).await.map(|list| list.data)
    }

    pub async fn get_account_metrics(
        &self,
        request: &AccountInsights,
    ) -> Result<Vec<MetricValue<AccountMetric>>, Error> {
        self.execute(request).await.map(|list| list.data)
    }
}

/// Validates a response body. A body with a truthy `error` field is an error reported by the API,
/// regardless of the HTTP status; anything else must match the expected response type.
fn parse_response<T>(status: StatusCode, body: &[u8]) -> Result<T, Error>
where
    T: DeserializeOwned,
{
    let json = serde_json::from_slice::<Value>(body).map_err(|err| ErrorRepr {
        kind: ErrorKind::InvalidResponse(err),
        status: Some(status),
    }.boxed())?;

    if json.get("error").map_or(false, is_truthy) {
        let envelope = ErrorResponse::deserialize(&json)
            .ok()
            .map(|resp| resp.error);

        let api_error = ApiError::new(envelope, json);

        warn!(
            status = status.as_u16(),
            code = ?api_error.code(),
            fbtrace_id = ?api_error.threads_error().and_then(|err| err.fbtrace_id.as_deref()),
            "API reported an error: {}",
            api_error.message()
        );

        return Err(ErrorRepr {
            kind: ErrorKind::Api(api_error),
            status: Some(status),
        }.boxed());
    }

    serde_json::from_slice::<T>(body).map_err(|err| ErrorRepr {
        kind: ErrorKind::InvalidResponse(err),
        status: Some(status),
    }.boxed())
}

fn is_truthy(val: &Value) -> bool {
    match val {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[derive(ScribeStaticStr, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Method {
    #[enumscribe(str = "GET")]
    Get,
    #[enumscribe(str = "POST")]
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        self.scribe()
    }

    fn to_reqwest_method(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        }
    }
}

#[derive(Debug)]
pub struct Error {
    repr: Box<ErrorRepr>,
}

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        &self.repr.kind
    }

    pub fn into_kind(self) -> ErrorKind {
        self.repr.kind
    }

    /// The HTTP status of the response, if one was received.
    pub fn status(&self) -> Option<StatusCode> {
        self.repr.status
    }

    /// The error reported by the API, if this error was caused by one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match &self.repr.kind {
            ErrorKind::Api(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_invalid_response(&self) -> bool {
        matches!(self.repr.kind, ErrorKind::InvalidResponse(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.repr.kind, f)
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        error::Error::source(&self.repr.kind)
    }
}

#[derive(Debug)]
pub(crate) struct ErrorRepr {
    pub kind: ErrorKind,
    pub status: Option<StatusCode>,
}

impl ErrorRepr {
    pub(crate) fn boxed(self) -> Error {
        Error { repr: Box::new(self) }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ErrorKind {
    /// The request could not be sent, or the response body could not be read.
    #[error("failed to send request: {0}")]
    Transfer(#[source] reqwest::Error),
    /// The response was not JSON, or did not have the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(#[source] serde_json::Error),
    /// The API reported an error.
    #[error("{0}")]
    Api(ApiError),
}

/// An error reported by the Threads API in the body of a response.
#[derive(Clone, Debug)]
pub struct ApiError {
    envelope: Option<ErrorEnvelope>,
    body: Value,
}

impl ApiError {
    pub(crate) fn new(envelope: Option<ErrorEnvelope>, body: Value) -> Self {
        Self { envelope, body }
    }

    /// The parsed error details, or `None` if the error body did not have the expected shape. The
    /// raw body is always available from [`body`](Self::body).
    pub fn threads_error(&self) -> Option<&ErrorEnvelope> {
        self.envelope.as_ref()
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn message(&self) -> &str {
        self.envelope
            .as_ref()
            .and_then(|envelope| envelope.message.as_deref())
            .unwrap_or("An unknown error occurred")
    }

    pub fn code(&self) -> Option<i64> {
        self.envelope.as_ref().and_then(|envelope| envelope.code)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code() {
            Some(code) => write!(f, "Threads API error {}: {}", code, self.message()),
            None => write!(f, "Threads API error: {}", self.message()),
        }
    }
}

impl error::Error for ApiError {}

pub(crate) struct Request<D> {
    method: Method,
    url: String,
    data: D,
}

impl<D> Request<D> {
    pub(crate) fn new_with_data(method: Method, url: String, data: D) -> Self {
        Self { method, url, data }
    }
}
