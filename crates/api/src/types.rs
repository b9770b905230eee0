//! Domain types for the game collection API.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Arbitrary acknowledgement body returned by write endpoints.
///
/// `Value::Null` when the server sent an empty body, `Value::String` with the
/// raw text when a successful body was not JSON.
pub type Ack = serde_json::Value;

/// Edit form fields, serialized as a flat JSON object.
pub type FormFields = BTreeMap<String, String>;

/// Opaque server-assigned game identifier.
///
/// The server emits ids either as plain strings or as MongoDB extended JSON
/// (`{"$oid": "..."}`); both decode to the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for GameId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl<'de> Deserialize<'de> for GameId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Plain(String),
            Number(i64),
            Oid {
                #[serde(rename = "$oid")]
                oid: String,
            },
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Plain(s) => GameId(s),
            RawId::Number(n) => GameId(n.to_string()),
            RawId::Oid { oid } => GameId(oid),
        })
    }
}

/// A game in the collection, as returned by the list and search endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    #[serde(alias = "_id")]
    pub id: GameId,
    pub name: String,
    pub platform: String,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
}

impl GameRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, platform: impl Into<String>) -> Self {
        Self {
            id: GameId::new(id),
            name: name.into(),
            platform: platform.into(),
            image_url: None,
        }
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// The user-supplied image URL, if one is set.
    pub fn explicit_image(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
}

fn blank_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Request body for `POST /add`.
///
/// `image_url` is always serialized, as `null` when absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewGame {
    pub name: String,
    pub platform: String,
    pub image_url: Option<String>,
}

impl NewGame {
    pub fn new(name: impl Into<String>, platform: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            platform: platform.into(),
            image_url: None,
        }
    }

    pub fn with_image_url(mut self, url: Option<String>) -> Self {
        self.image_url = url.filter(|u| !u.trim().is_empty());
        self
    }
}

/// Search criteria. Both fields are optional and combined as AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    pub query: Option<String>,
    pub platform: Option<String>,
}

impl SearchFilter {
    /// Builds a filter from raw input; blank values are dropped.
    pub fn new(query: &str, platform: &str) -> Self {
        Self {
            query: non_blank(query),
            platform: non_blank(platform),
        }
    }

    /// True when neither criterion is set.
    pub fn is_empty(&self) -> bool {
        self.query.is_none() && self.platform.is_none()
    }

    /// Query-string parameters for the search endpoint.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(q) = &self.query {
            params.push(("query", q.clone()));
        }
        if let Some(p) = &self.platform {
            params.push(("platform", p.clone()));
        }
        params
    }
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Body of `GET /game-image`.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ImageAnswer {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub image: Option<String>,
}
