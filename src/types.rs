//! Common types and data structures

use serde::{Deserialize, Serialize};

/// One shortened link as returned by the remote service. Read-only on this side.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawLinkRecord")]
pub struct LinkRecord {
    pub id: String,
    pub long_url: String,
    pub short_url: String,
    pub code: String,
    pub click_count: u64,
    pub created_at: String,
}

/// Wire shape. Documents may carry `_id`, `id` or both (virtuals enabled).
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLinkRecord {
    #[serde(rename = "_id", default)]
    object_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    long_url: String,
    short_url: String,
    code: String,
    #[serde(default, deserialize_with = "lenient_count")]
    click_count: u64,
    #[serde(default)]
    created_at: String,
}

impl TryFrom<RawLinkRecord> for LinkRecord {
    type Error = String;

    fn try_from(raw: RawLinkRecord) -> Result<Self, Self::Error> {
        let id = raw
            .object_id
            .or(raw.id)
            .ok_or_else(|| "link record has neither `_id` nor `id`".to_string())?;
        Ok(Self {
            id,
            long_url: raw.long_url,
            short_url: raw.short_url,
            code: raw.code,
            click_count: raw.click_count,
            created_at: raw.created_at,
        })
    }
}

/// Counters are display-only, so any number is accepted: negatives become 0,
/// fractions are rounded, null and other junk count as 0.
fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => match (n.as_u64(), n.as_f64()) {
            (Some(count), _) => count,
            (None, Some(f)) if f.is_finite() && f > 0.0 => f.round() as u64,
            _ => 0,
        },
        _ => 0,
    })
}

/// Envelope of `GET /api/links`
#[derive(Debug, Default, Deserialize)]
pub struct LinksResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: Vec<LinkRecord>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<LinkRecord>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<LinkRecord>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `POST /api/links`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest<'a> {
    pub long_url: &'a str,
}

/// Reply of `POST /api/links`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateLinkResponse {
    pub success: bool,
    pub short_url: Option<String>,
    pub message: Option<String>,
}

/// Error bodies only matter for their `message` field
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ErrorBody {
    pub message: Option<String>,
}

/// Top-level views reachable from the navigation bar
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Home,
    Dashboard,
}

impl View {
    pub const ALL: [View; 2] = [View::Home, View::Dashboard];

    pub fn label(self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Dashboard => "Dashboard",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_record_reads_service_field_names() {
        let json = r#"{
            "_id": "665f1c",
            "longUrl": "https://example.com/a/very/long/path",
            "shortUrl": "https://tiny.link/abc123",
            "code": "abc123",
            "clickCount": 7,
            "createdAt": "2024-06-04T12:00:00.000Z",
            "__v": 0
        }"#;
        let link: LinkRecord = serde_json::from_str(json).unwrap();
        assert_eq!(link.id, "665f1c");
        assert_eq!(link.short_url, "https://tiny.link/abc123");
        assert_eq!(link.click_count, 7);
    }

    #[test]
    fn link_record_accepts_plain_id_and_missing_counters() {
        let json = r#"{"id":"1","longUrl":"https://a.b","shortUrl":"https://t/x","code":"x"}"#;
        let link: LinkRecord = serde_json::from_str(json).unwrap();
        assert_eq!(link.id, "1");
        assert_eq!(link.click_count, 0);
        assert!(link.created_at.is_empty());
    }

    #[test]
    fn links_response_tolerates_missing_or_null_data() {
        let missing: LinksResponse = serde_json::from_str("{}").unwrap();
        assert!(missing.data.is_empty());
        let null: LinksResponse = serde_json::from_str(r#"{"data":null}"#).unwrap();
        assert!(null.data.is_empty());
    }

    #[test]
    fn link_record_with_both_id_keys_prefers_object_id() {
        let json = r#"{"data":[{"_id":"664f","id":"664f-virtual","longUrl":"https://a.example","shortUrl":"https://t/a","code":"a","clickCount":1}]}"#;
        let parsed: LinksResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.data.len(), 1);
        assert_eq!(parsed.data[0].id, "664f");
    }

    #[test]
    fn link_record_without_any_id_is_rejected() {
        let json = r#"{"longUrl":"https://a.example","shortUrl":"https://t/a","code":"a"}"#;
        assert!(serde_json::from_str::<LinkRecord>(json).is_err());
    }

    #[test]
    fn odd_click_counts_do_not_fail_the_list() {
        let json = r#"{"data":[
            {"_id":"1","longUrl":"https://a.example","shortUrl":"https://t/1","code":"1","clickCount":-3},
            {"_id":"2","longUrl":"https://b.example","shortUrl":"https://t/2","code":"2","clickCount":2.6},
            {"_id":"3","longUrl":"https://c.example","shortUrl":"https://t/3","code":"3","clickCount":null}
        ]}"#;
        let parsed: LinksResponse = serde_json::from_str(json).unwrap();
        let counts: Vec<u64> = parsed.data.iter().map(|l| l.click_count).collect();
        assert_eq!(counts, [0, 3, 0]);
    }

    #[test]
    fn create_request_uses_camel_case() {
        let body = serde_json::to_value(CreateLinkRequest { long_url: "https://x.y" }).unwrap();
        assert_eq!(body, serde_json::json!({ "longUrl": "https://x.y" }));
    }
}
