//! Genre model

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{escape_in_place, trim_in_place, FormInput};

/// Genre document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
}

impl Genre {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ObjectId::new(),
            name: name.into(),
        }
    }

    pub fn url(&self) -> String {
        format!("/catalog/genre/{}", self.id.to_hex())
    }
}

/// Create/update genre form
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct GenreForm {
    #[validate(length(min = 3, message = "Genre name must contain at least 3 characters"))]
    pub name: String,
}

impl FormInput for GenreForm {
    const FIELDS: &'static [&'static str] = &["name"];

    fn trim(&mut self) {
        trim_in_place(&mut self.name);
    }

    fn escape(&mut self) {
        escape_in_place(&mut self.name);
    }
}

impl From<&Genre> for GenreForm {
    fn from(genre: &Genre) -> Self {
        Self {
            name: genre.name.clone(),
        }
    }
}
