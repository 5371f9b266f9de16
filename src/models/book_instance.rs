//! Book instance (physical copy) model

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::date;
use crate::validation::{
    self, escape_in_place, escape_optional, is_object_id, parse_form_date, trim_in_place,
    trim_optional, FormInput, FORM_DATE_FORMAT,
};

/// Medium date, e.g. `Oct 14, 1983`
const MEDIUM_DATE_FORMAT: &str = "%b %-d, %Y";

/// Availability of a copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InstanceStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

impl InstanceStatus {
    pub const ALL: [InstanceStatus; 4] = [
        InstanceStatus::Available,
        InstanceStatus::Maintenance,
        InstanceStatus::Loaned,
        InstanceStatus::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InstanceStatus::Available => "Available",
            InstanceStatus::Maintenance => "Maintenance",
            InstanceStatus::Loaned => "Loaned",
            InstanceStatus::Reserved => "Reserved",
        }
    }
}

impl fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InstanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InstanceStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown status: {}", s))
    }
}

/// BookInstance document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookInstance {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// Book reference; not enforced by the store
    pub book: ObjectId,
    pub imprint: String,
    #[serde(default)]
    pub status: InstanceStatus,
    #[serde(default = "today", with = "date")]
    pub due_back: NaiveDate,
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl BookInstance {
    pub fn url(&self) -> String {
        format!("/catalog/bookinstance/{}", self.id.to_hex())
    }

    pub fn due_back_formatted(&self) -> String {
        self.due_back.format(MEDIUM_DATE_FORMAT).to_string()
    }

    pub fn due_back_yyyy_mm_dd(&self) -> String {
        self.due_back.format(FORM_DATE_FORMAT).to_string()
    }
}

/// Create/update book instance form
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct BookInstanceForm {
    #[validate(custom(function = "book_reference"))]
    pub book: String,
    #[validate(length(min = 1, message = "Imprint must be specified"))]
    pub imprint: String,
    #[validate(custom(function = "status_rules"))]
    pub status: String,
    #[validate(custom(function = "due_back_rules"))]
    pub due_back: Option<String>,
}

impl Default for BookInstanceForm {
    fn default() -> Self {
        Self {
            book: String::new(),
            imprint: String::new(),
            status: InstanceStatus::default().as_str().to_string(),
            due_back: None,
        }
    }
}

impl BookInstanceForm {
    pub fn book_id(&self) -> Option<ObjectId> {
        ObjectId::parse_str(&self.book).ok()
    }

    pub fn status(&self) -> InstanceStatus {
        self.status.parse().unwrap_or_default()
    }

    /// Due date, defaulting to today when the field was left blank
    pub fn due_back(&self) -> NaiveDate {
        self.due_back
            .as_deref()
            .and_then(parse_form_date)
            .unwrap_or_else(today)
    }
}

fn book_reference(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(validation::error("required", "Book must be specified"));
    }
    if !is_object_id(value) {
        return Err(validation::error("reference", "Book must be a valid selection."));
    }
    Ok(())
}

fn status_rules(value: &str) -> Result<(), ValidationError> {
    match value.parse::<InstanceStatus>() {
        Ok(_) => Ok(()),
        Err(_) => Err(validation::error(
            "status",
            "Status must be one of Available, Maintenance, Loaned, Reserved",
        )),
    }
}

fn due_back_rules(value: &str) -> Result<(), ValidationError> {
    match parse_form_date(value) {
        Some(_) => Ok(()),
        None => Err(validation::error("date", "Invalid date")),
    }
}

impl FormInput for BookInstanceForm {
    const FIELDS: &'static [&'static str] = &["book", "imprint", "status", "due_back"];

    fn trim(&mut self) {
        trim_in_place(&mut self.book);
        trim_in_place(&mut self.imprint);
        trim_in_place(&mut self.status);
        trim_optional(&mut self.due_back);
    }

    fn escape(&mut self) {
        escape_in_place(&mut self.book);
        escape_in_place(&mut self.imprint);
        escape_in_place(&mut self.status);
        escape_optional(&mut self.due_back);
    }
}

impl From<&BookInstance> for BookInstanceForm {
    fn from(instance: &BookInstance) -> Self {
        Self {
            book: instance.book.to_hex(),
            imprint: instance.imprint.clone(),
            status: instance.status.as_str().to_string(),
            due_back: Some(instance.due_back_yyyy_mm_dd()),
        }
    }
}
