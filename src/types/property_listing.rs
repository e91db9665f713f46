use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A property record returned by the agent service.
///
/// Every field is optional and parsed leniently: the service is the only
/// producer, and a malformed field must degrade to a display placeholder
/// rather than fail the whole response.  Numeric fields accept numbers or
/// numeric strings; amenity flags accept anything truthy.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PropertyListing {
    /// Listing headline.
    #[serde(
        rename = "titulo",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,

    /// Asking price.
    #[serde(
        rename = "valor_comercial",
        default,
        deserialize_with = "lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub commercial_value: Option<f64>,

    /// District the property is located in.
    #[serde(
        rename = "distrito",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub district: Option<String>,

    /// Area in square meters.
    #[serde(
        rename = "area_m2",
        default,
        deserialize_with = "lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub area_m2: Option<f64>,

    /// Number of bedrooms.
    #[serde(
        rename = "dormitorios",
        default,
        deserialize_with = "lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub bedrooms: Option<f64>,

    /// Number of bathrooms.
    #[serde(
        rename = "banios",
        default,
        deserialize_with = "lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub bathrooms: Option<f64>,

    /// Construction status, e.g. "Estreno" or "En planos".
    #[serde(
        rename = "estado",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<String>,

    #[serde(default, deserialize_with = "truthy")]
    pub pet_friendly: bool,

    #[serde(rename = "balcon", default, deserialize_with = "truthy")]
    pub balcony: bool,

    #[serde(rename = "terraza", default, deserialize_with = "truthy")]
    pub terrace: bool,

    #[serde(rename = "amoblado", default, deserialize_with = "truthy")]
    pub furnished: bool,
}

impl PropertyListing {
    /// Creates an empty listing with the given title.
    pub fn new<S: Into<String>>(title: S) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Sets the asking price.
    pub fn with_commercial_value(mut self, value: f64) -> Self {
        self.commercial_value = Some(value);
        self
    }

    /// Sets the district.
    pub fn with_district<S: Into<String>>(mut self, district: S) -> Self {
        self.district = Some(district.into());
        self
    }

    /// Interprets one element of a response's `data` array.
    ///
    /// Elements that are not objects become a listing with every field
    /// absent, so they still occupy a card.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            _ => Self::default(),
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number_of(&Value::deserialize(deserializer)?))
}

fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
        Value::Null => false,
    })
}

fn number_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}
