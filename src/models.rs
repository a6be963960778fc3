use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Column names of the titles table, in field order.
pub const TITLE_COLUMNS: [&str; 9] = [
    "id",
    "title",
    "description",
    "release_year",
    "age_certification",
    "runtime",
    "genres",
    "production_country",
    "seasons",
];

/// Column names of the credits table, in field order.
pub const CREDIT_COLUMNS: [&str; 5] = ["id", "title_id", "real_name", "character_name", "role"];

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Title {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub release_year: i32,
    pub age_certification: String,
    pub runtime: u16,
    #[serde(
        serialize_with = "serialize_genres",
        deserialize_with = "deserialize_genres"
    )]
    pub genres: Vec<String>,
    pub production_country: String,
    pub seasons: Option<u8>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Credit {
    pub id: Uuid,
    pub title_id: Uuid,
    pub real_name: String,
    pub character_name: String,
    pub role: String,
}

// Genres travel as one comma-joined cell so the tables stay flat.
fn serialize_genres<S: Serializer>(genres: &[String], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&genres.join(","))
}

fn deserialize_genres<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(raw
        .split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect())
}
