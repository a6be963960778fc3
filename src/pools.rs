//! Fixed candidate sets for the categorical fields of generated records.
use crate::error::ConfigurationError;

pub const CERTIFICATIONS: [&str; 11] = [
    "G", "PG", "PG-13", "R", "NC-17", "TV-Y", "TV-Y7", "TV-G", "TV-PG", "TV-14", "TV-MA",
];

pub const COUNTRIES: [&str; 12] = [
    "US", "GB", "CA", "FR", "DE", "ES", "IT", "JP", "KR", "IN", "BR", "MX",
];

pub const GENRES: [&str; 19] = [
    "action",
    "animation",
    "comedy",
    "crime",
    "documentation",
    "drama",
    "european",
    "family",
    "fantasy",
    "history",
    "horror",
    "music",
    "reality",
    "romance",
    "scifi",
    "sport",
    "thriller",
    "war",
    "western",
];

pub const ROLES: [&str; 2] = ["ACTOR", "DIRECTOR"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValuePools {
    certifications: Vec<String>,
    countries: Vec<String>,
    genres: Vec<String>,
    roles: Vec<String>,
}

impl ValuePools {
    /// Validates every pool up front so sampling never has to handle an empty set.
    pub fn new(
        certifications: impl IntoIterator<Item = impl Into<String>>,
        countries: impl IntoIterator<Item = impl Into<String>>,
        genres: impl IntoIterator<Item = impl Into<String>>,
        roles: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self {
            certifications: collect_pool("certifications", certifications)?,
            countries: collect_pool("countries", countries)?,
            genres: collect_pool("genres", genres)?,
            roles: collect_pool("roles", roles)?,
        })
    }

    /// The built-in pools, validated like any caller-supplied set.
    pub fn standard() -> Result<Self, ConfigurationError> {
        Self::new(CERTIFICATIONS, COUNTRIES, GENRES, ROLES)
    }

    pub fn certifications(&self) -> &[String] {
        &self.certifications
    }

    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    pub fn roles(&self) -> &[String] {
        &self.roles
    }
}

fn collect_pool<I, S>(pool: &'static str, values: I) -> Result<Vec<String>, ConfigurationError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out: Vec<String> = Vec::new();
    for value in values {
        let value = value.into();
        if pool == "genres" && !is_genre_cell_safe(&value) {
            return Err(ConfigurationError::InvalidEntry { pool, value });
        }
        // Duplicates would let a genre appear twice in one title.
        if !out.contains(&value) {
            out.push(value);
        }
    }
    if out.is_empty() {
        return Err(ConfigurationError::EmptyPool { pool });
    }
    Ok(out)
}

// Genres share one comma-joined cell, so an entry must survive split-and-trim unchanged.
fn is_genre_cell_safe(value: &str) -> bool {
    !value.is_empty() && !value.contains(',') && value.trim() == value
}
