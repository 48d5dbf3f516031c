use serde::{de::IgnoredAny, Deserialize, Deserializer};

/// Value reported for any field the catalog left out
pub const PLACEHOLDER: &str = "N/A";

/// A star entry as returned by the catalog API.
///
/// Every field is optional; absent, `null` and non-string fields read as
/// [`PLACEHOLDER`]. Fields other than these three are ignored.
#[derive(Clone, Eq, PartialEq, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawStarRecord {
    #[serde(deserialize_with = "text_or_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "text_or_none")]
    pub right_ascension: Option<String>,
    #[serde(deserialize_with = "text_or_none")]
    pub declination: Option<String>,
}

fn text_or_none<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Field {
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match Option::<Field>::deserialize(d)? {
        Some(Field::Text(s)) => Some(s),
        Some(Field::Other(_)) | None => None,
    })
}

impl RawStarRecord {
    pub fn new(name: &str, right_ascension: &str, declination: &str) -> Self {
        Self {
            name: Some(name.to_owned()),
            right_ascension: Some(right_ascension.to_owned()),
            declination: Some(declination.to_owned()),
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(PLACEHOLDER)
    }

    pub fn right_ascension(&self) -> &str {
        self.right_ascension.as_deref().unwrap_or(PLACEHOLDER)
    }

    pub fn declination(&self) -> &str {
        self.declination.as_deref().unwrap_or(PLACEHOLDER)
    }
}
