//! Helpers for driving the client through the OAuth flow against a running mock server.

use anyhow::{anyhow, Context};
use reqwest::{header::LOCATION, redirect::Policy};
use threads_api::{
    request_options::Scope, AccessToken, AsyncClient, ClientConfig, Unauthenticated,
};
use threads_mock::config::{DEFAULT_CLIENT_ID, DEFAULT_CLIENT_SECRET, DEFAULT_REDIRECT_URI};
use url::Url;

pub const ALL_SCOPES: [Scope; 5] = [
    Scope::Basic,
    Scope::ContentPublish,
    Scope::ManageInsights,
    Scope::ManageReplies,
    Scope::ReadReplies,
];

/// A client configuration pointing both base URLs at a mock server.
pub fn mock_config(base_url: &str) -> anyhow::Result<ClientConfig> {
    let url = Url::parse(base_url).with_context(|| format!("invalid base URL {}", base_url))?;

    Ok(ClientConfig::new()
        .api_base_url(url.clone())
        .authorize_base_url(url)
        .https_only(false))
}

/// Opens an authorization URL the way a browser would, without following the redirect, and
/// returns the code the app was redirected with.
pub async fn follow_authorization(url: &Url) -> anyhow::Result<String> {
    let browser = reqwest::Client::builder().redirect(Policy::none()).build()?;

    let resp = browser.get(url.as_str()).send().await?;
    let status = resp.status();
    if !status.is_redirection() {
        let page = resp.text().await.unwrap_or_default();
        return Err(anyhow!("authorization failed with {}: {}", status, page));
    }

    let location = resp
        .headers()
        .get(LOCATION)
        .ok_or_else(|| anyhow!("redirect without a location"))?
        .to_str()?;

    let location = Url::parse(location)?;

    location
        .query_pairs()
        .find(|(key, _)| key == "code")
        .map(|(_, code)| code.into_owned())
        .ok_or_else(|| anyhow!("redirected without a code: {}", location))
}

/// Runs the whole authorization flow with the mock server's default app registration and
/// returns an authenticated client.
pub async fn sign_in(
    client: AsyncClient<Unauthenticated>,
) -> anyhow::Result<AsyncClient<AccessToken>> {
    let url = client.authorization_url(
        DEFAULT_CLIENT_ID,
        DEFAULT_REDIRECT_URI,
        ALL_SCOPES,
        Some("demo-state"),
    );

    let code = follow_authorization(&url).await?;

    let token = client
        .exchange_authorization_code(
            DEFAULT_CLIENT_ID,
            DEFAULT_CLIENT_SECRET,
            DEFAULT_REDIRECT_URI,
            &code,
        )
        .await?;

    Ok(client.reauthenticate(token.into_auth()))
}
