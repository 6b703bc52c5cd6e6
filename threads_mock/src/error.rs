use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::state::gen_trace_id;

/// An error from a Graph API endpoint, rendered as a JSON error envelope.
#[derive(thiserror::Error, Debug)]
pub enum GraphError {
    #[error("An access token is required to request this resource.")]
    MissingToken,
    #[error("Invalid OAuth access token - Cannot parse access token")]
    InvalidToken,
    #[error("Unsupported get request. Object with ID '{0}' does not exist, cannot be loaded due to missing permissions, or does not support this operation")]
    UnknownObject(String),
    #[error("(#100) Tried accessing nonexisting field ({field}) on node type ({node_type})")]
    UnknownField {
        field: String,
        node_type: &'static str,
    },
    #[error("(#100) {0}")]
    InvalidParameter(String),
    #[error("Missing parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Unsupported grant_type: {0}")]
    UnsupportedGrantType(String),
    #[error("Error validating client secret.")]
    InvalidClient,
    #[error("Error validating verification code. Please make sure your redirect_uri is identical to the one you used in the OAuth dialog request")]
    InvalidCode,
    #[error("An unexpected error has occurred. Please retry your request later.")]
    Internal(#[from] serde_json::Error),
}

impl GraphError {
    pub fn code(&self) -> u32 {
        match self {
            GraphError::MissingToken => 104,
            GraphError::InvalidToken => 190,
            GraphError::InvalidClient => 101,
            GraphError::Internal(_) => 2,
            _ => 100,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            GraphError::UnknownObject(_) => "GraphMethodException",
            _ => "OAuthException",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            GraphError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for GraphError {
    fn into_response(self) -> Response {
        if let GraphError::Internal(err) = &self {
            error!(error = %err, "failed to render fixture");
        }

        let body = json!({
            "error": {
                "message": self.to_string(),
                "type": self.error_type(),
                "code": self.code(),
                "fbtrace_id": gen_trace_id(),
            }
        });

        (self.status(), Json(body)).into_response()
    }
}

/// An error from the authorization dialog, rendered as an HTML page.
#[derive(thiserror::Error, Debug)]
pub enum AuthorizeError {
    #[error("Missing parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid App ID: {0}")]
    UnknownClient(String),
    #[error("URL blocked: the redirect_uri is not whitelisted in the app's client OAuth settings")]
    RedirectUriMismatch,
    #[error("Unsupported response_type: {0}")]
    UnsupportedResponseType(String),
    #[error("Invalid scope: {0}")]
    InvalidScope(String),
}

impl IntoResponse for AuthorizeError {
    fn into_response(self) -> Response {
        let page = format!(
            "<!DOCTYPE html>\n<html><head><title>Error</title></head>\
             <body><h1>Error</h1><p>{}</p></body></html>\n",
            escape_html(&self.to_string())
        );

        (StatusCode::BAD_REQUEST, Html(page)).into_response()
    }
}

fn escape_html(s: &str) -> String {
    let mut buf = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => buf.push_str("&amp;"),
            '<' => buf.push_str("&lt;"),
            '>' => buf.push_str("&gt;"),
            '"' => buf.push_str("&quot;"),
            '\'' => buf.push_str("&#39;"),
            c => buf.push(c),
        }
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::{escape_html, GraphError};

    #[test]
    fn test_codes() {
        assert_eq!(GraphError::MissingToken.code(), 104);
        assert_eq!(GraphError::InvalidToken.code(), 190);
        assert_eq!(GraphError::UnknownObject("1".to_owned()).code(), 100);
        assert_eq!(
            GraphError::UnknownObject("1".to_owned()).error_type(),
            "GraphMethodException"
        );
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<b>\"x\" & 'y'</b>"), "&lt;b&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/b&gt;");
    }
}
