// ── Listing domain type ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A single real-estate listing.
///
/// Carried through the store unchanged; the accessors below only derive
/// display values from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    /// Image URL as served by the API.
    pub img_src: String,
    /// Raw listing type, `"rent"` or `"buy"`.
    #[serde(rename = "type")]
    pub property_type: String,
    pub price: f64,
}

/// Whether a listing is offered for rent or for sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum ListingKind {
    Rent,
    Sale,
}

impl Listing {
    pub fn is_rental(&self) -> bool {
        self.property_type == "rent"
    }

    /// Anything that is not a rental is shown as a sale.
    pub fn kind(&self) -> ListingKind {
        if self.is_rental() {
            ListingKind::Rent
        } else {
            ListingKind::Sale
        }
    }

    /// `"$450,000"`, or `"$1,200/month"` for rentals.
    pub fn display_price(&self) -> String {
        let amount = fmt_dollars(self.price);
        if self.is_rental() {
            format!("{amount}/month")
        } else {
            amount
        }
    }

    /// `"For Rent"` or `"For Sale"`.
    pub fn display_type(&self) -> String {
        format!("For {}", self.kind())
    }
}

/// View model for the detail screen of the selected listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingDetail {
    pub id: String,
    pub img_src: String,
    pub kind: ListingKind,
    pub price: String,
    pub type_label: String,
}

impl From<&Listing> for ListingDetail {
    fn from(listing: &Listing) -> Self {
        Self {
            id: listing.id.clone(),
            img_src: listing.img_src.clone(),
            kind: listing.kind(),
            price: listing.display_price(),
            type_label: listing.display_type(),
        }
    }
}

/// Whole dollars with thousands separators, rounded half away from zero.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
fn fmt_dollars(amount: f64) -> String {
    let negative = amount < 0.0;
    let whole = amount.abs().round() as u64;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative && whole > 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}
