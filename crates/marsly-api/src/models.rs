// Wire types for the Mars real-estate API.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// A property record exactly as the API returns it.
///
/// ```json
/// { "id": "424906", "img_src": "http://...", "type": "rent", "price": 450000 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarsProperty {
    pub id: String,
    /// Image URL. Served over plain http by the upstream API.
    pub img_src: String,
    /// `"rent"` or `"buy"`.
    #[serde(rename = "type")]
    pub property_type: String,
    pub price: f64,
}

/// Which subset of listings to request.
///
/// The string form is the `filter` query token the API expects.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
pub enum FilterKind {
    #[serde(rename = "rent")]
    #[strum(serialize = "rent")]
    ShowRent,
    #[serde(rename = "buy")]
    #[strum(serialize = "buy")]
    ShowBuy,
    #[default]
    #[serde(rename = "all")]
    #[strum(serialize = "all")]
    ShowAll,
}

impl FilterKind {
    /// The `filter` query parameter value.
    pub fn as_query(self) -> &'static str {
        match self {
            Self::ShowRent => "rent",
            Self::ShowBuy => "buy",
            Self::ShowAll => "all",
        }
    }
}
