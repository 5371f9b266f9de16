//! Author model and related types

use chrono::{Datelike, NaiveDate};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::date;
use crate::validation::{
    self, escape_in_place, escape_optional, parse_form_date, trim_in_place, trim_optional,
    FormInput, FORM_DATE_FORMAT,
};

/// Short US date, e.g. `10/14/1983`
const SHORT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Author document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub first_name: String,
    pub family_name: String,
    #[serde(default, with = "date::optional", skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, with = "date::optional", skip_serializing_if = "Option::is_none")]
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// `family_name, first_name`, or empty when either part is missing
    pub fn name(&self) -> String {
        if self.first_name.is_empty() || self.family_name.is_empty() {
            return String::new();
        }
        format!("{}, {}", self.family_name, self.first_name)
    }

    pub fn date_of_birth_formatted(&self) -> String {
        format_short(self.date_of_birth)
    }

    pub fn date_of_death_formatted(&self) -> String {
        format_short(self.date_of_death)
    }

    /// Whole years between birth and death, when both are known
    pub fn lifespan(&self) -> Option<String> {
        match (self.date_of_birth, self.date_of_death) {
            (Some(born), Some(died)) => Some(format!("{} years", died.year() - born.year())),
            _ => None,
        }
    }

    pub fn url(&self) -> String {
        format!("/catalog/author/{}", self.id.to_hex())
    }
}

fn format_short(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(SHORT_DATE_FORMAT).to_string())
        .unwrap_or_else(|| "?".to_string())
}

/// Create/update author form
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct AuthorForm {
    #[validate(
        custom(function = "first_name_rules"),
        length(max = 100, message = "First name must be at most 100 characters.")
    )]
    pub first_name: String,
    #[validate(
        custom(function = "family_name_rules"),
        length(max = 100, message = "Family name must be at most 100 characters.")
    )]
    pub family_name: String,
    #[validate(custom(function = "date_of_birth_rules"))]
    pub date_of_birth: Option<String>,
    #[validate(custom(function = "date_of_death_rules"))]
    pub date_of_death: Option<String>,
}

impl AuthorForm {
    pub fn date_of_birth(&self) -> Option<NaiveDate> {
        self.date_of_birth.as_deref().and_then(parse_form_date)
    }

    pub fn date_of_death(&self) -> Option<NaiveDate> {
        self.date_of_death.as_deref().and_then(parse_form_date)
    }
}

fn name_part(value: &str, missing: &'static str, invalid: &'static str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(validation::error("required", missing));
    }
    if !value.chars().all(char::is_alphanumeric) {
        return Err(validation::error("alphanumeric", invalid));
    }
    Ok(())
}

fn first_name_rules(value: &str) -> Result<(), ValidationError> {
    name_part(
        value,
        "First name must be specified.",
        "First name has non-alphanumeric characters.",
    )
}

fn family_name_rules(value: &str) -> Result<(), ValidationError> {
    name_part(
        value,
        "Family name must be specified.",
        "Family name has non-alphanumeric characters.",
    )
}

fn date_of_birth_rules(value: &str) -> Result<(), ValidationError> {
    match parse_form_date(value) {
        Some(_) => Ok(()),
        None => Err(validation::error("date", "Invalid date of birth")),
    }
}

fn date_of_death_rules(value: &str) -> Result<(), ValidationError> {
    match parse_form_date(value) {
        Some(_) => Ok(()),
        None => Err(validation::error("date", "Invalid date of death")),
    }
}

impl FormInput for AuthorForm {
    const FIELDS: &'static [&'static str] =
        &["first_name", "family_name", "date_of_birth", "date_of_death"];

    fn trim(&mut self) {
        trim_in_place(&mut self.first_name);
        trim_in_place(&mut self.family_name);
        trim_optional(&mut self.date_of_birth);
        trim_optional(&mut self.date_of_death);
    }

    fn escape(&mut self) {
        escape_in_place(&mut self.first_name);
        escape_in_place(&mut self.family_name);
        escape_optional(&mut self.date_of_birth);
        escape_optional(&mut self.date_of_death);
    }
}

impl From<&Author> for AuthorForm {
    fn from(author: &Author) -> Self {
        Self {
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            date_of_birth: author.date_of_birth.map(|d| d.format(FORM_DATE_FORMAT).to_string()),
            date_of_death: author.date_of_death.map(|d| d.format(FORM_DATE_FORMAT).to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::check;

    fn author(first: &str, family: &str) -> Author {
        Author {
            id: ObjectId::new(),
            first_name: first.to_string(),
            family_name: family.to_string(),
            date_of_birth: None,
            date_of_death: None,
        }
    }

    #[test]
    fn test_name() {
        assert_eq!(author("Isaac", "Asimov").name(), "Asimov, Isaac");
        assert_eq!(author("", "Asimov").name(), "");
    }

    #[test]
    fn test_dates_and_lifespan() {
        let mut a = author("Isaac", "Asimov");
        assert_eq!(a.date_of_birth_formatted(), "?");
        assert!(a.lifespan().is_none());

        a.date_of_birth = NaiveDate::from_ymd_opt(1920, 1, 2);
        a.date_of_death = NaiveDate::from_ymd_opt(1992, 4, 6);
        assert_eq!(a.date_of_birth_formatted(), "1/2/1920");
        assert_eq!(a.date_of_death_formatted(), "4/6/1992");
        assert_eq!(a.lifespan().as_deref(), Some("72 years"));
    }

    #[test]
    fn test_form_rules() {
        let rejected = check(AuthorForm {
            first_name: " ".to_string(),
            family_name: "Le-Guin".to_string(),
            date_of_birth: Some("1929-13-40".to_string()),
            date_of_death: Some("  ".to_string()),
        })
        .unwrap_err();

        let messages: Vec<_> = rejected.errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "First name must be specified.",
                "Family name has non-alphanumeric characters.",
                "Invalid date of birth",
            ]
        );
        assert_eq!(rejected.input.date_of_death, None);
    }

    #[test]
    fn test_form_round_trip_dates() {
        let mut a = author("Ursula", "LeGuin");
        a.date_of_birth = NaiveDate::from_ymd_opt(1929, 10, 21);
        let form = AuthorForm::from(&a);
        assert_eq!(form.date_of_birth.as_deref(), Some("1929-10-21"));
        assert_eq!(form.date_of_birth(), a.date_of_birth);
        assert_eq!(form.date_of_death(), None);
    }

    #[test]
    fn test_stored_document_layout() {
        use mongodb::bson::{self, doc, Bson};

        let mut a = author("Isaac", "Asimov");
        a.date_of_birth = NaiveDate::from_ymd_opt(1920, 1, 2);
        let document = bson::to_document(&a).unwrap();
        assert!(matches!(document.get("date_of_birth"), Some(Bson::DateTime(_))));
        assert!(document.get("date_of_death").is_none());

        let stored = doc! {
            "_id": a.id,
            "first_name": "Isaac",
            "family_name": "Asimov",
            "date_of_birth": bson::DateTime::parse_rfc3339_str("1920-01-02T00:00:00Z").unwrap(),
        };
        assert_eq!(bson::from_document::<Author>(stored).unwrap(), a);
    }
}
