pub mod access_token;

pub use access_token::AccessToken;

use crate::{request_data::Params, user::UserId};

/// Credentials which an [`AsyncClient`](crate::AsyncClient) attaches to the requests it sends.
pub trait Auth: sealed::Sealed {
    /// Adds the credentials to a request's parameters.
    fn apply<'a>(&'a self, params: &mut Params<'a>);
}

/// A trait for credentials that can be used to make requests on behalf of a specific Threads
/// user.
pub trait UserAuth: Auth {
    fn user_id(&self) -> &UserId;
}

/// The credentials of a client which has not been authorized by any user yet. Such a client can
/// only build authorization URLs and exchange authorization codes for access tokens.
#[derive(Clone, Copy, Default, Debug)]
pub struct Unauthenticated;

impl Auth for Unauthenticated {
    fn apply<'a>(&'a self, _params: &mut Params<'a>) {}
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Unauthenticated {}
    impl Sealed for super::access_token::AccessToken {}
}
