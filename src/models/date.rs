//! Calendar dates stored as BSON dates at midnight UTC
//!
//! Use with `#[serde(with = "date")]`, or `date::optional` for `Option<NaiveDate>`.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use mongodb::bson;
use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};

fn to_bson(date: &NaiveDate) -> bson::DateTime {
    bson::DateTime::from_millis(date.and_time(NaiveTime::MIN).and_utc().timestamp_millis())
}

fn from_bson<E: Error>(value: bson::DateTime) -> Result<NaiveDate, E> {
    DateTime::<Utc>::from_timestamp_millis(value.timestamp_millis())
        .map(|dt| dt.date_naive())
        .ok_or_else(|| E::custom(format!("date out of range: {}", value)))
}

pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    to_bson(date).serialize(serializer)
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    from_bson(bson::DateTime::deserialize(deserializer)?)
}

pub mod optional {
    use super::*;

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
        date.as_ref().map(to_bson).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        Option::<bson::DateTime>::deserialize(deserializer)?
            .map(from_bson)
            .transpose()
    }
}
