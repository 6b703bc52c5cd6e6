use std::collections::HashMap;

use rand::{distributions::Alphanumeric, CryptoRng, Rng};
use tokio::sync::Mutex;

use crate::config::MockConfig;

const CODE_LEN: usize = 16;
const TOKEN_LEN: usize = 64;
const TRACE_ID_LEN: usize = 23;

#[derive(Clone, Debug)]
struct IssuedCode {
    client_id: String,
    redirect_uri: String,
    user_id: String,
}

/// The server's only mutable state: the authorization codes and access tokens it has issued.
#[derive(Debug)]
pub struct AppState {
    config: MockConfig,
    codes: Mutex<HashMap<String, IssuedCode>>,
    tokens: Mutex<HashMap<String, String>>,
}

impl AppState {
    pub fn new(config: MockConfig) -> Self {
        Self {
            config,
            codes: Mutex::new(HashMap::new()),
            tokens: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &MockConfig {
        &self.config
    }

    /// Issues an authorization code for the signed-in user.
    pub async fn issue_code(&self, client_id: &str, redirect_uri: &str) -> String {
        let code = gen_numeric(&mut rand::thread_rng(), CODE_LEN);

        self.codes.lock().await.insert(
            code.clone(),
            IssuedCode {
                client_id: client_id.to_owned(),
                redirect_uri: redirect_uri.to_owned(),
                user_id: self.config.get_signed_in_user().to_owned(),
            },
        );

        code
    }

    /// Consumes an authorization code, returning the id of the user it was issued for. The code
    /// is left in place if it was issued to a different client or redirect URI.
    pub async fn redeem_code(
        &self,
        code: &str,
        client_id: &str,
        redirect_uri: &str,
    ) -> Option<String> {
        let mut codes = self.codes.lock().await;

        let issued = codes.get(code)?;
        if issued.client_id != client_id || issued.redirect_uri != redirect_uri {
            return None;
        }

        codes.remove(code).map(|issued| issued.user_id)
    }

    pub async fn issue_token(&self, user_id: &str) -> String {
        let token = format!("THQVJ{}", gen_alphanumeric(&mut rand::thread_rng(), TOKEN_LEN));
        self.tokens
            .lock()
            .await
            .insert(token.clone(), user_id.to_owned());
        token
    }

    /// Returns the id of the user an access token was issued for.
    pub async fn token_user(&self, token: &str) -> Option<String> {
        self.tokens.lock().await.get(token).cloned()
    }
}

pub(crate) fn gen_trace_id() -> String {
    gen_alphanumeric(&mut rand::thread_rng(), TRACE_ID_LEN)
}

fn gen_alphanumeric<R>(rng: &mut R, len: usize) -> String
where
    R: Rng + CryptoRng + ?Sized,
{
    (0..len).map(|_| char::from(rng.sample(Alphanumeric))).collect()
}

fn gen_numeric<R>(rng: &mut R, len: usize) -> String
where
    R: Rng + CryptoRng + ?Sized,
{
    (0..len)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::AppState;
    use crate::config::MockConfig;

    #[tokio::test]
    async fn test_codes_are_single_use() {
        let state = AppState::new(MockConfig::new());
        let code = state.issue_code("app", "https://example.com/cb").await;
        assert!(code.chars().all(|c| c.is_ascii_digit()));

        assert_eq!(state.redeem_code(&code, "other", "https://example.com/cb").await, None);
        assert_eq!(
            state.redeem_code(&code, "app", "https://example.com/cb").await.as_deref(),
            Some("1234567")
        );
        assert_eq!(state.redeem_code(&code, "app", "https://example.com/cb").await, None);
    }

    #[tokio::test]
    async fn test_tokens() {
        let state = AppState::new(MockConfig::new());
        let token = state.issue_token("7654321").await;
        assert_eq!(state.token_user(&token).await.as_deref(), Some("7654321"));
        assert_eq!(state.token_user("nope").await, None);
    }
}
