use chrono::{Duration, Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::validation;

/// An offer of one product at a given price over a period of days.
///
/// Only one implicit currency is used. The period granularity is one day and
/// a single timezone is assumed. The id stays unset until the offer is
/// first stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default, with = "ymd")]
    pub start: Option<NaiveDate>,
    #[serde(default, with = "ymd")]
    pub end: Option<NaiveDate>,
}

impl Offer {
    pub fn new(product: impl Into<String>, price: Decimal, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            id: None,
            product: product.into(),
            price: Some(price),
            start: Some(start),
            end: Some(end),
        }
    }

    /// Offer valid for 7 days from today, priced 10.00, with a placeholder product.
    pub fn default_offer() -> Self {
        let start = Local::now().date_naive();
        Self::new(
            "Default product",
            Decimal::new(1000, 2),
            start,
            start + Duration::days(7),
        )
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn is_valid(&self) -> bool {
        validation::is_valid(Some(self))
    }

    pub fn is_period_valid(&self) -> bool {
        validation::is_period_valid(Some(self))
    }

    pub fn is_expired(&self) -> bool {
        validation::is_expired(Some(self))
    }

    pub fn is_storable(&self) -> bool {
        validation::is_storable(Some(self))
    }
}

/// `yyyy-MM-dd` dates, nothing else accepted.
mod ymd {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_str(&d.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| NaiveDate::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom))
            .transpose()
    }
}
