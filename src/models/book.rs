//! Book model and related types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Serde helpers for the `price` field.
///
/// Prices are stored as NUMERIC(10, 2) and always serialize as a string with
/// exactly two fractional digits ("75.00"), while requests may carry the
/// price as either a JSON string or a number.
pub mod price_serde {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(price: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&render(price))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(f64),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Text(s) => s
                .trim()
                .parse::<Decimal>()
                .map(|d| d.round_dp(2))
                .map_err(serde::de::Error::custom),
            Raw::Number(n) => Decimal::from_f64_retain(n)
                .map(|d| d.round_dp(2))
                .ok_or_else(|| serde::de::Error::custom("price is not a valid number")),
        }
    }

    /// Render a decimal with exactly two fractional digits
    pub fn render(price: &Decimal) -> String {
        let mut rounded = price.round_dp(2);
        rounded.rescale(2);
        rounded.to_string()
    }
}

/// Full book model (DB + API)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub name: String,
    #[serde(with = "price_serde")]
    #[schema(value_type = String, example = "75.00")]
    pub price: Decimal,
    pub author: Option<String>,
    /// User that created the book; never reassigned after creation
    pub owner: Option<i32>,
}

/// Create/update book request.
///
/// `id` and `owner` are server-assigned and ignored if supplied.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BookInput {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[serde(with = "price_serde")]
    #[schema(value_type = String, example = "75.00")]
    pub price: Decimal,
    pub author: Option<String>,
}

/// Book list query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct BookQuery {
    /// Case-insensitive substring match against name or author
    pub search: Option<String>,
    /// Sort field: id, name, price or author, with optional '-' prefix
    pub ordering: Option<String>,
}
