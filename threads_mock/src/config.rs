use crate::fixtures;

pub const DEFAULT_CLIENT_ID: &str = "990602627938098";
pub const DEFAULT_CLIENT_SECRET: &str = "mock-client-secret";
pub const DEFAULT_REDIRECT_URI: &str = "https://localhost/callback";

/// The app registered with the mock server, and the user who is signed in when it is asked to
/// authorize that app.
#[derive(Clone, Debug)]
pub struct MockConfig {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    signed_in_user: String,
}

impl MockConfig {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn client_id<S: Into<String>>(self, client_id: S) -> Self {
        Self {
            client_id: client_id.into(),
            ..self
        }
    }

    #[inline]
    #[must_use]
    pub fn client_secret<S: Into<String>>(self, client_secret: S) -> Self {
        Self {
            client_secret: client_secret.into(),
            ..self
        }
    }

    #[inline]
    #[must_use]
    pub fn redirect_uri<S: Into<String>>(self, redirect_uri: S) -> Self {
        Self {
            redirect_uri: redirect_uri.into(),
            ..self
        }
    }

    /// The id of the fixture user that authorization codes are issued for.
    #[inline]
    #[must_use]
    pub fn signed_in_user<S: Into<String>>(self, user_id: S) -> Self {
        Self {
            signed_in_user: user_id.into(),
            ..self
        }
    }

    pub fn get_client_id(&self) -> &str {
        &self.client_id
    }

    pub fn get_client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn get_redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    pub fn get_signed_in_user(&self) -> &str {
        &self.signed_in_user
    }
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            client_id: DEFAULT_CLIENT_ID.to_owned(),
            client_secret: DEFAULT_CLIENT_SECRET.to_owned(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_owned(),
            signed_in_user: fixtures::USERS[0].id.to_owned(),
        }
    }
}
