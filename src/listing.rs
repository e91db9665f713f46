//! Turning property records into display cards.
//!
//! [`ListingPanel`] holds what the listings view currently shows.  It is
//! independent of the transcript: a reply without listings leaves it as is,
//! and only an explicit dismissal hides it.

use crate::currency::CurrencyFormat;
use crate::types::PropertyListing;

/// Title shown when a listing has none.
pub const UNTITLED: &str = "Propiedad sin título";

/// District shown when a listing has none.
pub const UNKNOWN_DISTRICT: &str = "Distrito no especificado";

/// Construction status shown when a listing has none.
pub const UNKNOWN_STATUS: &str = "No especificado";

/// Placeholder shown when a render produced no cards.
pub const NO_RESULTS: &str = "No se encontraron propiedades que coincidan con tus criterios.";

/// An amenity flag, in badge display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Amenity {
    PetFriendly,
    Balcony,
    Terrace,
    Furnished,
}

impl Amenity {
    /// All amenities, in the order their badges appear on a card.
    pub const ALL: [Amenity; 4] = [
        Amenity::PetFriendly,
        Amenity::Balcony,
        Amenity::Terrace,
        Amenity::Furnished,
    ];

    /// The badge text.
    pub fn label(self) -> &'static str {
        match self {
            Amenity::PetFriendly => "Pet Friendly",
            Amenity::Balcony => "Balcón",
            Amenity::Terrace => "Terraza",
            Amenity::Furnished => "Amoblado",
        }
    }

    fn is_set(self, listing: &PropertyListing) -> bool {
        match self {
            Amenity::PetFriendly => listing.pet_friendly,
            Amenity::Balcony => listing.balcony,
            Amenity::Terrace => listing.terrace,
            Amenity::Furnished => listing.furnished,
        }
    }
}

/// The display form of one listing.
///
/// Text fields are unescaped; each surface escapes them for its own medium.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingCard {
    pub title: String,
    pub price: String,
    pub area: String,
    pub bedrooms: String,
    pub bathrooms: String,
    pub status: String,
    pub district: String,
    pub badges: Vec<Amenity>,
}

impl ListingCard {
    /// Builds a card, substituting placeholders for absent fields.
    pub fn from_listing(listing: &PropertyListing, currency: &CurrencyFormat) -> Self {
        Self {
            title: text_or(&listing.title, UNTITLED),
            price: currency.format(listing.commercial_value),
            area: format_quantity(listing.area_m2.unwrap_or(0.0)),
            bedrooms: format_quantity(listing.bedrooms.unwrap_or(0.0)),
            bathrooms: format_quantity(listing.bathrooms.unwrap_or(0.0)),
            status: text_or(&listing.status, UNKNOWN_STATUS),
            district: text_or(&listing.district, UNKNOWN_DISTRICT),
            badges: Amenity::ALL
                .into_iter()
                .filter(|amenity| amenity.is_set(listing))
                .collect(),
        }
    }
}

/// What the listing panel displays.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelContent {
    /// One card per listing, in response order.
    Cards(Vec<ListingCard>),
    /// The "no results" placeholder.
    NoResults,
}

/// The listing panel: its content and whether it is showing.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingPanel {
    currency: CurrencyFormat,
    content: PanelContent,
    visible: bool,
}

impl ListingPanel {
    /// Creates a hidden panel with no cards.
    pub fn new(currency: CurrencyFormat) -> Self {
        Self {
            currency,
            content: PanelContent::NoResults,
            visible: false,
        }
    }

    /// Replaces the panel content and shows it.
    pub fn render(&mut self, listings: &[PropertyListing]) {
        self.content = if listings.is_empty() {
            PanelContent::NoResults
        } else {
            PanelContent::Cards(
                listings
                    .iter()
                    .map(|listing| ListingCard::from_listing(listing, &self.currency))
                    .collect(),
            )
        };
        self.visible = true;
    }

    /// Shows the panel again with its current content.
    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Hides the panel, keeping its content.
    pub fn dismiss(&mut self) {
        self.visible = false;
    }

    /// Returns true if the panel is showing.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The current content.
    pub fn content(&self) -> &PanelContent {
        &self.content
    }

    /// The current cards; empty when the placeholder is showing.
    pub fn cards(&self) -> &[ListingCard] {
        match &self.content {
            PanelContent::Cards(cards) => cards,
            PanelContent::NoResults => &[],
        }
    }
}

impl Default for ListingPanel {
    fn default() -> Self {
        Self::new(CurrencyFormat::default())
    }
}

fn text_or(value: &Option<String>, placeholder: &str) -> String {
    value
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(placeholder)
        .to_string()
}

/// Formats a measurement without a trailing `.0` when it is integral.
fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::PRICE_ON_REQUEST;

    fn card(listing: &PropertyListing) -> ListingCard {
        ListingCard::from_listing(listing, &CurrencyFormat::es_ar())
    }

    #[test]
    fn blank_listing_uses_placeholders() {
        let card = card(&PropertyListing::default());
        assert_eq!(card.title, UNTITLED);
        assert_eq!(card.price, PRICE_ON_REQUEST);
        assert_eq!(card.area, "0");
        assert_eq!(card.bedrooms, "0");
        assert_eq!(card.bathrooms, "0");
        assert_eq!(card.status, UNKNOWN_STATUS);
        assert_eq!(card.district, UNKNOWN_DISTRICT);
        assert!(card.badges.is_empty());
    }

    #[test]
    fn empty_strings_count_as_absent() {
        let listing = PropertyListing {
            title: Some(String::new()),
            district: Some(String::new()),
            status: Some(String::new()),
            ..PropertyListing::default()
        };
        let card = card(&listing);
        assert_eq!(card.title, UNTITLED);
        assert_eq!(card.district, UNKNOWN_DISTRICT);
        assert_eq!(card.status, UNKNOWN_STATUS);
    }

    #[test]
    fn zero_price_is_on_request() {
        let listing = PropertyListing::new("Casa").with_commercial_value(0.0);
        assert_eq!(card(&listing).price, PRICE_ON_REQUEST);
        assert!(!card(&listing).price.contains("$"));
    }

    #[test]
    fn populated_card() {
        let listing = PropertyListing {
            title: Some("Depto <nuevo>".to_string()),
            commercial_value: Some(215_000.0),
            district: Some("San Isidro".to_string()),
            area_m2: Some(80.0),
            bedrooms: Some(2.0),
            bathrooms: Some(1.0),
            status: Some("En planos".to_string()),
            ..PropertyListing::default()
        };
        let card = card(&listing);
        assert_eq!(card.title, "Depto <nuevo>");
        assert_eq!(card.price, "$\u{a0}215.000");
        assert_eq!(card.area, "80");
        assert_eq!(card.bedrooms, "2");
        assert_eq!(card.bathrooms, "1");
        assert_eq!(card.status, "En planos");
        assert_eq!(card.district, "San Isidro");
    }

    #[test]
    fn fractional_area_keeps_decimals() {
        let listing = PropertyListing {
            area_m2: Some(72.5),
            ..PropertyListing::default()
        };
        assert_eq!(card(&listing).area, "72.5");
    }

    #[test]
    fn counts_are_shown_as_received() {
        let listing: PropertyListing = serde_json::from_value(serde_json::json!({
            "dormitorios": 2.5,
            "banios": -1
        }))
        .unwrap();
        let card = card(&listing);
        assert_eq!(card.bedrooms, "2.5");
        assert_eq!(card.bathrooms, "-1");
    }

    #[test]
    fn single_pet_friendly_badge() {
        let listing = PropertyListing {
            pet_friendly: true,
            ..PropertyListing::default()
        };
        let card = card(&listing);
        assert_eq!(card.badges, vec![Amenity::PetFriendly]);
        assert_eq!(card.badges[0].label(), "Pet Friendly");
    }

    #[test]
    fn badges_follow_fixed_order() {
        let listing = PropertyListing {
            furnished: true,
            terrace: true,
            balcony: true,
            pet_friendly: true,
            ..PropertyListing::default()
        };
        let labels: Vec<_> = card(&listing).badges.iter().map(|a| a.label()).collect();
        assert_eq!(labels, vec!["Pet Friendly", "Balcón", "Terraza", "Amoblado"]);
    }

    #[test]
    fn panel_render_and_dismiss() {
        let mut panel = ListingPanel::default();
        assert!(!panel.is_visible());
        assert_eq!(panel.content(), &PanelContent::NoResults);

        panel.render(&[PropertyListing::new("A"), PropertyListing::new("B")]);
        assert!(panel.is_visible());
        let titles: Vec<_> = panel.cards().iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);

        panel.dismiss();
        assert!(!panel.is_visible());
        assert_eq!(panel.cards().len(), 2);

        panel.show();
        assert!(panel.is_visible());
    }

    #[test]
    fn panel_render_empty_shows_placeholder() {
        let mut panel = ListingPanel::default();
        panel.render(&[PropertyListing::new("A")]);
        panel.render(&[]);
        assert!(panel.is_visible());
        assert_eq!(panel.content(), &PanelContent::NoResults);
        assert!(panel.cards().is_empty());
    }
}
