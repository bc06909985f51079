//! Envelope-level types shared by every endpoint: the pagination cursor,
//! link references, the tolerant date wrapper, and the wire envelope.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::Error;

/// Map from relation name to the link reference a primary object advertises
/// for it. The names are server-controlled and opaque until matched against
/// the expansion dispatch table.
pub type Uris = HashMap<String, LinkRef>;

/// A reference to a related resource. The server sends either a bare URI
/// string or an object that carries the URI alongside locator metadata.
/// Anything else fails to decode.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum LinkRef {
    /// Bare URI string.
    Plain(String),
    /// Structured reference with locator type and description.
    Described {
        #[serde(rename = "Uri")]
        uri: String,
        #[serde(rename = "Locator", default)]
        locator: String,
        #[serde(rename = "LocatorType", default)]
        locator_type: String,
        #[serde(rename = "UriDescription", default)]
        description: String,
    },
}

impl LinkRef {
    /// The resolvable URI, regardless of wire shape.
    pub fn uri(&self) -> &str {
        match self {
            LinkRef::Plain(uri) => uri,
            LinkRef::Described { uri, .. } => uri,
        }
    }
}

/// Window over a collection resource. Constructed fresh per paginated
/// response; the derived offsets are computed, never stored.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "PascalCase", default)]
pub struct Pages {
    /// Overall matching-item count.
    pub total: i64,
    /// 1-based offset of the first returned item.
    pub start: i64,
    /// Items actually returned.
    pub count: i64,
    /// Items the caller asked for. May differ from `count` near the end of
    /// a collection.
    pub requested_count: i64,
    pub first_page: Option<LinkRef>,
    pub last_page: Option<LinkRef>,
    pub next_page: Option<LinkRef>,
}

impl Pages {
    /// Offset of the next window. Unclamped.
    pub fn next(&self) -> i64 {
        self.start + self.count
    }

    /// Offset of the previous window. Unclamped; may be negative.
    pub fn previous(&self) -> i64 {
        self.start - self.count
    }

    /// Items beyond this window. Unclamped; may be negative.
    pub fn remaining(&self) -> i64 {
        self.total - self.start - self.count
    }
}

/// A datetime as sent by the API. Accepts RFC 3339, a timestamp without
/// timezone (read as UTC), and a bare date, tried in that order. A leading
/// `-` is the server's convention for a backdated/unset date and decodes to
/// absent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ApiDate(Option<DateTime<Utc>>);

impl ApiDate {
    /// The decoded instant, or `None` when the server sent the backdated
    /// sentinel or no value at all.
    pub fn time(&self) -> Option<DateTime<Utc>> {
        self.0
    }

    pub fn is_absent(&self) -> bool {
        self.0.is_none()
    }
}

impl From<DateTime<Utc>> for ApiDate {
    fn from(t: DateTime<Utc>) -> Self {
        ApiDate(Some(t))
    }
}

fn parse_api_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Some(t.with_timezone(&Utc));
    }
    if let Ok(t) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(t.and_utc());
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(d.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

impl<'de> Deserialize<'de> for ApiDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if raw.starts_with('-') {
            return Ok(ApiDate(None));
        }
        match parse_api_date(&raw) {
            Some(t) => Ok(ApiDate(Some(t))),
            None => Err(serde::de::Error::custom(format!(
                "unable to parse '{}'",
                raw
            ))),
        }
    }
}

impl Serialize for ApiDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0 {
            Some(t) => serializer.serialize_str(&t.to_rfc3339()),
            None => serializer.serialize_str("-"),
        }
    }
}

/// Pre-rendered display variants of a text field.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct FormattedValue {
    pub html: String,
    pub text: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct FormattedValues {
    pub caption: FormattedValue,
    pub name: FormattedValue,
    pub description: FormattedValue,
    pub file_name: FormattedValue,
}

/// Raw transport metadata attached to every endpoint result.
#[derive(Debug, Clone)]
pub struct ServerResponse {
    pub status: u16,
    pub headers: reqwest::header::HeaderMap,
}

/// Outer wire envelope. The primary payload and the expansion payloads stay
/// as raw `Value`s until the endpoint assembler and the expansion resolver
/// decode them into their target shapes.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct Envelope {
    pub code: i64,
    pub message: String,
    pub response: ResponseBody,
    pub expansions: HashMap<String, Value>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct ResponseBody {
    pub uri: String,
    pub locator: String,
    pub locator_type: String,
    pub album: Option<Value>,
    pub image: Option<Value>,
    pub node: Option<Value>,
    pub user: Option<Value>,
    pub pages: Option<Value>,
}

/// Decodes a primary-payload field out of the envelope. A missing or
/// malformed field is an envelope decode failure.
pub(crate) fn decode_value<T>(value: Option<Value>) -> Result<T, Error>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_value(value.unwrap_or(Value::Null)).map_err(Error::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn pages_offsets_are_unclamped() {
        for &total in &[-5i64, 0, 1, 7, 436] {
            for &start in &[-3i64, 0, 1, 400] {
                for &count in &[-2i64, 0, 1, 15, 100] {
                    let pages = Pages {
                        total,
                        start,
                        count,
                        requested_count: count,
                        ..Default::default()
                    };
                    assert_eq!(pages.next(), start + count);
                    assert_eq!(pages.previous(), start - count);
                    assert_eq!(pages.remaining(), total - start - count);
                }
            }
        }
    }

    #[test]
    fn pages_near_end_of_collection() {
        let pages = Pages {
            total: 436,
            start: 400,
            count: 0,
            requested_count: 15,
            ..Default::default()
        };
        assert_eq!(pages.next(), 400);
        assert_eq!(pages.remaining(), 36);
        assert_ne!(pages.count, pages.requested_count);
    }

    #[test]
    fn api_date_accepts_rfc3339() {
        let date: ApiDate = serde_json::from_str(r#""2019-11-26T21:08:41+00:00""#).unwrap();
        assert_eq!(
            date.time(),
            Some(Utc.with_ymd_and_hms(2019, 11, 26, 21, 8, 41).unwrap())
        );
    }

    #[test]
    fn api_date_accepts_timestamp_without_timezone() {
        let date: ApiDate = serde_json::from_str(r#""2011-04-13T11:08:09""#).unwrap();
        assert_eq!(
            date.time(),
            Some(Utc.with_ymd_and_hms(2011, 4, 13, 11, 8, 9).unwrap())
        );
    }

    #[test]
    fn api_date_accepts_bare_date() {
        let date: ApiDate = serde_json::from_str(r#""2010-12-10""#).unwrap();
        assert_eq!(
            date.time(),
            Some(Utc.with_ymd_and_hms(2010, 12, 10, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn api_date_layouts_agree_on_the_instant() {
        let with_offset: ApiDate = serde_json::from_str(r#""2015-11-05T10:23:44+00:00""#).unwrap();
        let naive: ApiDate = serde_json::from_str(r#""2015-11-05T10:23:44""#).unwrap();
        assert_eq!(with_offset.time(), naive.time());
    }

    #[test]
    fn api_date_backdated_sentinel_is_absent() {
        let date: ApiDate = serde_json::from_str(r#""-0001-11-30T00:00:00""#).unwrap();
        assert!(date.is_absent());
    }

    #[test]
    fn api_date_rejects_other_literals() {
        let err = serde_json::from_str::<ApiDate>(r#""not-a-date""#).unwrap_err();
        assert!(err.to_string().contains("not-a-date"));
    }

    #[test]
    fn link_ref_decodes_bare_string() {
        let link: LinkRef = serde_json::from_str(r#""/api/v2/node/h22spN""#).unwrap();
        assert_eq!(link.uri(), "/api/v2/node/h22spN");
    }

    #[test]
    fn link_ref_decodes_described_object() {
        let json = r#"{
            "Uri": "/api/v2/node/h22spN",
            "Locator": "Node",
            "LocatorType": "Object",
            "UriDescription": "Node with the given id.",
            "EndpointType": "Node"
        }"#;
        let link: LinkRef = serde_json::from_str(json).unwrap();
        assert_eq!(link.uri(), "/api/v2/node/h22spN");
    }

    #[test]
    fn link_ref_string_and_object_resolve_identically() {
        let plain: LinkRef = serde_json::from_str(r#""/api/v2/user/cmac""#).unwrap();
        let described: LinkRef =
            serde_json::from_str(r#"{"Uri": "/api/v2/user/cmac", "Locator": "User"}"#).unwrap();
        assert_eq!(plain.uri(), described.uri());
    }

    #[test]
    fn link_ref_rejects_object_without_uri() {
        assert!(serde_json::from_str::<LinkRef>(r#"{"Locator": "Node"}"#).is_err());
    }

    #[test]
    fn link_ref_rejects_non_string_non_object() {
        assert!(serde_json::from_str::<LinkRef>("42").is_err());
    }
}
