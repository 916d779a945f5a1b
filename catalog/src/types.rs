//! Data model types for the film catalog.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A film as stored in the master `films.json` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilmRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub directors: Vec<String>,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub countries: Vec<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub runtime_minutes: Option<u32>,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub poster_url: Option<String>,
}

/// A partial update to a film record. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilmPatch {
    pub title: Option<String>,
    pub directors: Option<Vec<String>>,
    pub year: Option<u16>,
    pub countries: Option<Vec<String>>,
    pub genres: Option<Vec<String>>,
    pub runtime_minutes: Option<u32>,
    pub synopsis: Option<String>,
    pub poster_url: Option<String>,
}

impl FilmPatch {
    /// Apply this patch to a record in place.
    pub fn apply(&self, film: &mut FilmRecord) {
        if let Some(title) = &self.title {
            film.title = title.clone();
        }
        if let Some(directors) = &self.directors {
            film.directors = directors.clone();
        }
        if let Some(year) = self.year {
            film.year = Some(year);
        }
        if let Some(countries) = &self.countries {
            film.countries = countries.clone();
        }
        if let Some(genres) = &self.genres {
            film.genres = genres.clone();
        }
        if let Some(runtime) = self.runtime_minutes {
            film.runtime_minutes = Some(runtime);
        }
        if let Some(synopsis) = &self.synopsis {
            film.synopsis = Some(synopsis.clone());
        }
        if let Some(poster_url) = &self.poster_url {
            film.poster_url = Some(poster_url.clone());
        }
    }
}

/// One entry in an appearance file: a reference to a film by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilmRef {
    pub id: String,
}

/// A festival edition: slug plus year, taken from the appearance file name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Edition {
    pub festival: String,
    pub year: u16,
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.festival, self.year)
    }
}

/// A single place a film can be streamed, rented, or bought.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamingOffer {
    pub platform: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// Streaming availability for one film, sourced from an external catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamingInfo {
    #[serde(default)]
    pub found: bool,
    #[serde(default)]
    pub streaming: Vec<StreamingOffer>,
    #[serde(default)]
    pub rent: Vec<StreamingOffer>,
    #[serde(default)]
    pub buy: Vec<StreamingOffer>,
}

/// A film record enriched with its festival appearances and streaming info.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergedFilm {
    #[serde(flatten)]
    pub film: FilmRecord,
    pub appearances: Vec<Edition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streaming: Option<StreamingInfo>,
}

/// Distinct filter values derived from the catalog, each list sorted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterOptions {
    pub festivals: Vec<String>,
    pub years: Vec<u16>,
    pub genres: Vec<String>,
    pub countries: Vec<String>,
    pub platforms: Vec<String>,
}

/// Id/title pair used in festival groupings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilmSummary {
    pub id: String,
    pub title: String,
}

/// One festival edition with the films that played there.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FestivalGroup {
    pub edition: Edition,
    pub films: Vec<FilmSummary>,
}
