use serde::Deserialize;

use crate::{auth::AccessToken, media::MediaId, user::UserId};

/// A page of results from a list endpoint.
#[derive(Deserialize, Clone, Debug)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub paging: Paging,
}

impl<T> Page<T> {
    /// The cursor pointing to the start of this page.
    pub fn before(&self) -> Option<&str> {
        self.paging.cursors.before.as_deref()
    }

    /// The cursor pointing to the end of this page; pass it to
    /// [`CursorPagination::after`](crate::request_options::CursorPagination::after) to get the
    /// next page.
    pub fn after(&self) -> Option<&str> {
        self.paging.cursors.after.as_deref()
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct Paging {
    pub cursors: Cursors,
}

#[derive(Deserialize, Clone, Default, Debug)]
pub struct Cursors {
    pub before: Option<Box<str>>,
    pub after: Option<Box<str>>,
}

/// A bare `{"data": [...]}` list, used by endpoints which do not paginate.
#[derive(Deserialize, Clone, Debug)]
pub struct DataList<T> {
    pub data: Vec<T>,
}

#[derive(Deserialize, Clone, Copy, Debug)]
pub struct Success {
    pub success: bool,
}

/// The response to creating or publishing a media container.
#[derive(Deserialize, Clone, Debug)]
pub struct Created {
    pub id: MediaId,
}

/// The response to exchanging an authorization code.
#[derive(Deserialize, Clone)]
pub struct AccessTokenResponse {
    pub access_token: Box<str>,
    pub user_id: UserId,
}

impl AccessTokenResponse {
    /// Converts the response into credentials for an authenticated client.
    pub fn into_auth(self) -> AccessToken {
        AccessToken::new(self.access_token, self.user_id)
    }
}

/// The body of a response reporting an error.
#[derive(Deserialize, Clone, Debug)]
pub struct ErrorResponse {
    pub error: ErrorEnvelope,
}

/// The details of an error reported by the API.
#[derive(Deserialize, Clone, Default, Debug)]
pub struct ErrorEnvelope {
    pub code: Option<i64>,
    pub error_subcode: Option<i64>,
    pub fbtrace_id: Option<Box<str>>,
    pub message: Option<Box<str>>,
    #[serde(rename = "type")]
    pub error_type: Option<Box<str>>,
}

#[cfg(test)]
mod tests {
    use super::{AccessTokenResponse, ErrorResponse, Page};
    use crate::{auth::UserAuth, media::MediaObject, user::UserId};

    #[test]
    fn test_access_token_user_id_coercion() {
        let resp: AccessTokenResponse =
            serde_json::from_str(r#"{"access_token": "THQVJ...", "user_id": 17841400008460056}"#)
                .unwrap();
        let auth = resp.into_auth();
        assert_eq!(auth.user_id(), &UserId::new("17841400008460056"));
        assert_eq!(auth.token(), "THQVJ...");
    }

    #[test]
    fn test_page_requires_paging() {
        let page: Page<MediaObject> = serde_json::from_str(
            r#"{"data": [{"id": "1"}, {"id": "2"}], "paging": {"cursors": {"after": "QVFI"}}}"#,
        )
        .unwrap();
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.after(), Some("QVFI"));
        assert_eq!(page.before(), None);

        assert!(serde_json::from_str::<Page<MediaObject>>(r#"{"data": []}"#).is_err());
        assert!(
            serde_json::from_str::<Page<MediaObject>>(r#"{"data": [], "paging": {}}"#).is_err()
        );
    }

    #[test]
    fn test_error_envelope() {
        let resp: ErrorResponse = serde_json::from_str(
            r#"{"error": {"message": "Invalid OAuth access token - Cannot parse access token", "type": "OAuthException", "code": 190, "fbtrace_id": "Abc123"}}"#,
        )
        .unwrap();
        assert_eq!(resp.error.code, Some(190));
        assert_eq!(resp.error.error_type.as_deref(), Some("OAuthException"));
        assert_eq!(resp.error.fbtrace_id.as_deref(), Some("Abc123"));
        assert_eq!(resp.error.error_subcode, None);
    }
}
