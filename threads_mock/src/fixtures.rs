use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::GraphError;

/// Fields which can be requested on a user node.
pub const PROFILE_FIELDS: &[&str] = &[
    "id",
    "username",
    "threads_profile_picture_url",
    "threads_biography",
];

/// Fields which can be requested on a media node.
pub const MEDIA_FIELDS: &[&str] = &[
    "id",
    "media_product_type",
    "media_type",
    "media_url",
    "permalink",
    "owner",
    "username",
    "text",
    "timestamp",
    "shortcode",
    "thumbnail_url",
    "children",
    "is_quote_post",
    "is_reply",
    "status_code",
];

#[derive(Serialize, Clone, Copy, Debug)]
pub struct User {
    pub id: &'static str,
    pub username: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads_profile_picture_url: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads_biography: Option<&'static str>,
}

#[derive(Serialize, Clone, Copy, Debug)]
pub struct Thread {
    pub id: &'static str,
    pub media_product_type: &'static str,
    pub media_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<&'static str>,
    pub permalink: &'static str,
    pub owner: &'static str,
    pub username: &'static str,
    pub text: &'static str,
    pub timestamp: &'static str,
    pub shortcode: &'static str,
    pub is_quote_post: bool,
    pub is_reply: bool,
}

pub const USERS: &[User] = &[
    User {
        id: "1234567",
        username: "threadsapitestuser",
        threads_profile_picture_url: Some("https://scontent.cdninstagram.com/v/t51/1234567.jpg"),
        threads_biography: Some("Testing the Threads API"),
    },
    User {
        id: "7654321",
        username: "quietmockuser",
        threads_profile_picture_url: None,
        threads_biography: None,
    },
];

pub const THREADS: &[Thread] = &[
    Thread {
        id: "18050206876707110",
        media_product_type: "THREADS",
        media_type: "TEXT_POST",
        media_url: None,
        permalink: "https://www.threads.net/@threadsapitestuser/post/C8ZbLX2Mz1a",
        owner: "1234567",
        username: "threadsapitestuser",
        text: "Hello from the mock server",
        timestamp: "2024-07-01T10:00:00+0000",
        shortcode: "C8ZbLX2Mz1a",
        is_quote_post: false,
        is_reply: false,
    },
    Thread {
        id: "18050206876707111",
        media_product_type: "THREADS",
        media_type: "IMAGE",
        media_url: Some("https://scontent.cdninstagram.com/v/t51/18050206876707111.jpg"),
        permalink: "https://www.threads.net/@quietmockuser/post/C8ZbLX2Mz1b",
        owner: "7654321",
        username: "quietmockuser",
        text: "A picture",
        timestamp: "2024-07-02T12:30:00+0000",
        shortcode: "C8ZbLX2Mz1b",
        is_quote_post: false,
        is_reply: false,
    },
];

pub fn find_user(id: &str) -> Option<&'static User> {
    USERS.iter().find(|user| user.id == id)
}

pub fn find_thread(id: &str) -> Option<&'static Thread> {
    THREADS.iter().find(|thread| thread.id == id)
}

pub fn threads_owned_by(user_id: &str) -> impl Iterator<Item = &'static Thread> + '_ {
    THREADS.iter().filter(move |thread| thread.owner == user_id)
}

/// Parses a `fields` parameter. Missing or blank selects only the id.
pub fn parse_fields(fields: Option<&str>) -> Vec<&str> {
    let fields = fields
        .map(|fields| {
            fields
                .split(',')
                .map(str::trim)
                .filter(|field| !field.is_empty())
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    if fields.is_empty() {
        vec!["id"]
    } else {
        fields
    }
}

/// Serializes a fixture and keeps only the requested fields. Requesting a field the node type does
/// not have is an error; a field the node has but the fixture leaves unset is omitted.
pub fn select_fields<T: Serialize>(
    object: &T,
    node_type: &'static str,
    known: &[&str],
    fields: &[&str],
) -> Result<Value, GraphError> {
    if let Some(unknown) = fields.iter().find(|field| !known.contains(field)) {
        return Err(GraphError::UnknownField {
            field: (*unknown).to_owned(),
            node_type,
        });
    }

    let full = match serde_json::to_value(object)? {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    let selected = fields
        .iter()
        .filter_map(|field| {
            full.get(*field)
                .map(|value| ((*field).to_owned(), value.clone()))
        })
        .collect::<Map<_, _>>();

    Ok(Value::Object(selected))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{find_user, parse_fields, select_fields, PROFILE_FIELDS, USERS};
    use crate::error::GraphError;

    #[test]
    fn test_parse_fields() {
        assert_eq!(parse_fields(None), vec!["id"]);
        assert_eq!(parse_fields(Some(" , ")), vec!["id"]);
        assert_eq!(parse_fields(Some("id, username")), vec!["id", "username"]);
    }

    #[test]
    fn test_select_fields_omits_unset() {
        let user = find_user("7654321").unwrap();
        let selected = select_fields(
            user,
            "ThreadsUser",
            PROFILE_FIELDS,
            &["id", "threads_biography"],
        )
        .unwrap();
        assert_eq!(selected, json!({"id": "7654321"}));
    }

    #[test]
    fn test_select_unknown_field() {
        let err = select_fields(&USERS[0], "ThreadsUser", PROFILE_FIELDS, &["id", "bogus"])
            .err()
            .unwrap();
        assert!(matches!(err, GraphError::UnknownField { ref field, .. } if field == "bogus"));
    }
}
