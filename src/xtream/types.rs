//! Xtream-specific types and error definitions.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Upstream credentials taken from one inbound request.
///
/// Never stored; the gate builds a fresh value for every request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Base URL of the Xtream panel, e.g. `http://provider.tv:8080`.
    pub host: String,
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Operations of `player_api.php` that the relay invokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    GetVodCategories,
    GetSeriesCategories,
    GetVodStreams,
    GetSeries,
    GetSeriesInfo,
}

impl Action {
    /// Wire name used in the `action` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::GetVodCategories => "get_vod_categories",
            Action::GetSeriesCategories => "get_series_categories",
            Action::GetVodStreams => "get_vod_streams",
            Action::GetSeries => "get_series",
            Action::GetSeriesInfo => "get_series_info",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A movie or series category, reshaped from the upstream record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub id: Value,
    pub name: Value,
}

impl Category {
    /// Build from an upstream record carrying `category_id` / `category_name`.
    pub fn from_upstream(record: &Value) -> Self {
        Self {
            id: record.get("category_id").cloned().unwrap_or(Value::Null),
            name: record.get("category_name").cloned().unwrap_or(Value::Null),
        }
    }
}

/// Both category lists, as returned by `/api/categories`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryListing {
    pub movie_categories: Vec<Category>,
    pub series_categories: Vec<Category>,
}

/// Errors that can occur while talking to the Xtream API.
#[derive(Debug, Error)]
pub enum XtreamError {
    /// Any failure reaching or decoding the upstream for one action.
    #[error("Failed to reach the IPTV server ({action}): {message}")]
    Upstream { action: Action, message: String },

    /// The outbound HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl XtreamError {
    pub fn upstream(action: Action, message: impl Into<String>) -> Self {
        XtreamError::Upstream {
            action,
            message: message.into(),
        }
    }
}

/// Result type for upstream operations.
pub type XtreamResult<T> = Result<T, XtreamError>;

/// Reshape a raw category payload into `{id, name}` pairs.
///
/// The payload must already be normalized (`{}` turned into `[]`).
pub fn reshape_categories(action: Action, raw: &Value) -> XtreamResult<Vec<Category>> {
    let records = raw.as_array().ok_or_else(|| {
        XtreamError::upstream(action, "expected a list of categories")
    })?;
    Ok(records.iter().map(Category::from_upstream).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_wire_names() {
        assert_eq!(Action::GetVodCategories.as_str(), "get_vod_categories");
        assert_eq!(Action::GetSeriesCategories.to_string(), "get_series_categories");
        assert_eq!(Action::GetVodStreams.as_str(), "get_vod_streams");
        assert_eq!(Action::GetSeries.as_str(), "get_series");
        assert_eq!(Action::GetSeriesInfo.as_str(), "get_series_info");
    }

    #[test]
    fn test_reshape_keeps_only_id_and_name() {
        let raw = json!([
            {"category_id": "1", "category_name": "Action", "parent_id": 0},
            {"category_id": 7, "category_name": "Drama"}
        ]);
        let categories = reshape_categories(Action::GetVodCategories, &raw).unwrap();

        assert_eq!(
            serde_json::to_value(&categories).unwrap(),
            json!([{"id": "1", "name": "Action"}, {"id": 7, "name": "Drama"}])
        );
    }

    #[test]
    fn test_reshape_missing_fields_become_null() {
        let categories =
            reshape_categories(Action::GetVodCategories, &json!([{"other": true}])).unwrap();
        assert_eq!(categories[0].id, Value::Null);
        assert_eq!(categories[0].name, Value::Null);
    }

    #[test]
    fn test_reshape_rejects_non_list() {
        let err = reshape_categories(Action::GetSeriesCategories, &json!({"user_info": {}}))
            .unwrap_err();
        match err {
            XtreamError::Upstream { action, .. } => assert_eq!(action, Action::GetSeriesCategories),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_listing_serializes_camel_case() {
        let listing = CategoryListing {
            movie_categories: vec![],
            series_categories: vec![],
        };
        assert_eq!(
            serde_json::to_value(&listing).unwrap(),
            json!({"movieCategories": [], "seriesCategories": []})
        );
    }

    #[test]
    fn test_debug_redacts_password() {
        let creds = Credentials {
            host: "http://x.tv".into(),
            username: "bob".into(),
            password: "hunter2".into(),
        };
        let rendered = format!("{:?}", creds);
        assert!(rendered.contains("bob"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_upstream_error_message_names_action() {
        let err = XtreamError::upstream(Action::GetSeries, "connection refused");
        assert_eq!(
            err.to_string(),
            "Failed to reach the IPTV server (get_series): connection refused"
        );
    }
}
