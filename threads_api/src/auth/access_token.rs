use std::fmt;

use crate::{request_data::Params, user::UserId};

use super::{Auth, UserAuth};

/// A user access token, obtained by exchanging an authorization code with
/// [`AsyncClient::exchange_authorization_code`](crate::AsyncClient::exchange_authorization_code).
/// The token is sent as the `access_token` parameter of every request.
#[derive(Clone)]
pub struct AccessToken {
    token: Box<str>,
    user_id: UserId,
}

impl AccessToken {
    /// Returns a new `AccessToken` for the user with the given id.
    pub fn new<S, U>(token: S, user_id: U) -> Self
    where
        S: Into<Box<str>>,
        U: Into<UserId>,
    {
        Self {
            token: token.into(),
            user_id: user_id.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

// The token is a secret, so keep it out of logs.
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"<redacted>")
            .field("user_id", &self.user_id)
            .finish()
    }
}

impl Auth for AccessToken {
    fn apply<'a>(&'a self, params: &mut Params<'a>) {
        params.push("access_token", &*self.token);
    }
}

impl UserAuth for AccessToken {
    fn user_id(&self) -> &UserId {
        &self.user_id
    }
}
