//! Integer-rounded currency formatting for one locale/currency pair.

use std::fmt;

use crate::error::{Error, Result};

/// Shown when a listing has no usable commercial value.
pub const PRICE_ON_REQUEST: &str = "Precio a consultar";

const NO_BREAK_SPACE: &str = "\u{a0}";

/// How to format a whole amount of money.
///
/// Only a fixed table of locale/currency pairs is supported; see
/// [`CurrencyFormat::from_pair`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    locale: &'static str,
    currency: &'static str,
    symbol: &'static str,
    separator: &'static str,
    grouping: char,
}

impl CurrencyFormat {
    /// Argentine pesos, Spanish (Argentina) conventions: `$ 1.234.567`.
    pub const fn es_ar() -> Self {
        Self {
            locale: "es-AR",
            currency: "ARS",
            symbol: "$",
            separator: NO_BREAK_SPACE,
            grouping: '.',
        }
    }

    /// Peruvian soles, Spanish (Peru) conventions: `S/ 1,234,567`.
    pub const fn es_pe() -> Self {
        Self {
            locale: "es-PE",
            currency: "PEN",
            symbol: "S/",
            separator: NO_BREAK_SPACE,
            grouping: ',',
        }
    }

    /// US dollars, English (US) conventions: `$1,234,567`.
    pub const fn en_us() -> Self {
        Self {
            locale: "en-US",
            currency: "USD",
            symbol: "$",
            separator: "",
            grouping: ',',
        }
    }

    /// Looks up the format for a locale tag and ISO currency code.
    pub fn from_pair(locale: &str, currency: &str) -> Result<Self> {
        [Self::es_ar(), Self::es_pe(), Self::en_us()]
            .into_iter()
            .find(|format| {
                format.locale.eq_ignore_ascii_case(locale)
                    && format.currency.eq_ignore_ascii_case(currency)
            })
            .ok_or_else(|| {
                Error::config(format!(
                    "unsupported locale/currency pair {locale}/{currency} \
                     (supported: es-AR/ARS, es-PE/PEN, en-US/USD)"
                ))
            })
    }

    /// The locale tag, e.g. `es-AR`.
    pub fn locale(&self) -> &'static str {
        self.locale
    }

    /// The ISO currency code, e.g. `ARS`.
    pub fn currency(&self) -> &'static str {
        self.currency
    }

    /// Formats `value` rounded to a whole amount.
    ///
    /// Absent, zero and non-finite values yield [`PRICE_ON_REQUEST`].
    pub fn format(&self, value: Option<f64>) -> String {
        let Some(value) = value.filter(|v| v.is_finite() && *v != 0.0) else {
            return PRICE_ON_REQUEST.to_string();
        };
        let rounded = value.round();
        let sign = if rounded < 0.0 { "-" } else { "" };
        let digits = format!("{:.0}", rounded.abs());
        format!(
            "{sign}{}{}{}",
            self.symbol,
            self.separator,
            group_digits(&digits, self.grouping)
        )
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::es_ar()
    }
}

impl fmt::Display for CurrencyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.locale, self.currency)
    }
}

fn group_digits(digits: &str, grouping: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, c) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(grouping);
        }
        grouped.push(c);
    }
    grouped
}
