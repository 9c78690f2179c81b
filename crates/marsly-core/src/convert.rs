// ── API → domain conversion ──
//
// Wire records are copied field for field; the store never reshapes data.

use marsly_api::MarsProperty;

use crate::model::Listing;

impl From<MarsProperty> for Listing {
    fn from(p: MarsProperty) -> Self {
        Self {
            id: p.id,
            img_src: p.img_src,
            property_type: p.property_type,
            price: p.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_fields_carry_over() {
        let listing = Listing::from(MarsProperty {
            id: "424905".into(),
            img_src: "http://mars.jpl.nasa.gov/b.jpg".into(),
            property_type: "buy".into(),
            price: 8_000_000.0,
        });

        assert_eq!(listing.id, "424905");
        assert_eq!(listing.img_src, "http://mars.jpl.nasa.gov/b.jpg");
        assert_eq!(listing.property_type, "buy");
        assert!((listing.price - 8_000_000.0).abs() < f64::EPSILON);
    }
}
