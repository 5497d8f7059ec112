use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    diesel_derive_enum::DbEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::AnimeType"]
#[serde(rename_all = "lowercase")]
pub enum AnimeType {
    Movie,
    Series,
}

impl AnimeType {
    pub fn display_name(&self) -> &'static str {
        match self {
            AnimeType::Movie => "Movie",
            AnimeType::Series => "Series",
        }
    }
}

impl Default for AnimeType {
    fn default() -> Self {
        AnimeType::Series
    }
}

impl fmt::Display for AnimeType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
