//! Flat-file store for the catalog data directory.
//!
//! All reads and rewrites of `films.json`, the per-festival appearance
//! files, `streaming.json`, and the generated cache go through here.
//! Rewrites are write-to-temp-then-rename so a crash never leaves a
//! half-written data file behind.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::editions::{edition_filename, parse_edition_filename};
use crate::merge::Catalog;
use crate::types::{Edition, FilmPatch, FilmRecord, FilmRef, MergedFilm, StreamingInfo};

pub const FILMS_FILE: &str = "films.json";
pub const FESTIVALS_DIR: &str = "festivals";
pub const STREAMING_FILE: &str = "streaming.json";
pub const GENERATED_FILE: &str = "films.generated.json";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("JSON parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("bad appearance file name: {0} (expected <slug>-<year>.json)")]
    BadFestivalFilename(String),
    #[error("no film with id {0}")]
    FilmNotFound(String),
}

/// What a delete touched: the removed record and every appearance file
/// that was rewritten.
#[derive(Debug)]
pub struct DeleteOutcome {
    pub film: FilmRecord,
    pub removed_from: Vec<Edition>,
}

/// Handle on a catalog data directory.
#[derive(Debug, Clone)]
pub struct Store {
    data_dir: PathBuf,
}

impl Store {
    pub fn new<P: Into<PathBuf>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load the whole catalog from its source files.
    pub fn load(&self) -> Result<Catalog, CatalogError> {
        let films = self.load_films()?;
        let appearances = self.load_appearances()?;
        let streaming = self.load_streaming()?;

        Ok(Catalog::new(films, appearances, streaming))
    }

    /// Load the master film file. Missing master file is an error.
    pub fn load_films(&self) -> Result<Vec<FilmRecord>, CatalogError> {
        read_json(&self.data_dir.join(FILMS_FILE))
    }

    /// Load every appearance file under `festivals/`, keyed by edition.
    ///
    /// A missing directory loads as empty. Duplicate ids inside one file
    /// collapse to a single appearance.
    pub fn load_appearances(&self) -> Result<BTreeMap<Edition, Vec<String>>, CatalogError> {
        let dir = self.data_dir.join(FESTIVALS_DIR);
        if !dir.exists() {
            return Ok(BTreeMap::new());
        }

        let mut entries: Vec<_> = fs::read_dir(&dir)
            .map_err(|e| CatalogError::Io {
                path: dir.display().to_string(),
                source: e,
            })?
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
            .collect();
        entries.sort_by_key(|e| e.file_name());

        let mut appearances = BTreeMap::new();
        for entry in entries {
            let file_name = entry.file_name().to_string_lossy().into_owned();
            let edition = parse_edition_filename(&file_name)
                .ok_or_else(|| CatalogError::BadFestivalFilename(file_name.clone()))?;

            let refs: Vec<FilmRef> = read_json(&entry.path())?;

            let mut ids = Vec::new();
            for film_ref in refs {
                if !ids.contains(&film_ref.id) {
                    ids.push(film_ref.id);
                }
            }
            appearances.insert(edition, ids);
        }

        Ok(appearances)
    }

    /// Load the streaming availability file. Missing file loads as empty.
    pub fn load_streaming(&self) -> Result<HashMap<String, StreamingInfo>, CatalogError> {
        let path = self.data_dir.join(STREAMING_FILE);
        if !path.exists() {
            return Ok(HashMap::new());
        }
        read_json(&path)
    }

    /// Read the pre-generated merged cache, if present.
    pub fn load_generated(&self) -> Result<Option<Vec<MergedFilm>>, CatalogError> {
        let path = self.data_dir.join(GENERATED_FILE);
        if !path.exists() {
            return Ok(None);
        }
        read_json(&path).map(Some)
    }

    /// Write the pre-generated merged cache.
    pub fn write_generated(&self, films: &[MergedFilm]) -> Result<(), CatalogError> {
        write_json(&self.data_dir.join(GENERATED_FILE), &films)
    }

    /// Apply a partial edit to one film and rewrite the master file.
    pub fn update_film(&self, id: &str, patch: &FilmPatch) -> Result<FilmRecord, CatalogError> {
        let mut films = self.load_films()?;

        let film = films
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| CatalogError::FilmNotFound(id.to_string()))?;

        patch.apply(film);
        let updated = film.clone();

        write_json(&self.data_dir.join(FILMS_FILE), &films)?;
        Ok(updated)
    }

    /// Delete a film from the master file and strip its refs from every
    /// appearance file that contains it. Only touched files are rewritten;
    /// a merged cache file, when present, is regenerated so it cannot keep
    /// referencing the deleted id.
    pub fn delete_film(&self, id: &str) -> Result<DeleteOutcome, CatalogError> {
        let mut films = self.load_films()?;

        let position = films
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| CatalogError::FilmNotFound(id.to_string()))?;
        let film = films.remove(position);

        write_json(&self.data_dir.join(FILMS_FILE), &films)?;

        let mut removed_from = Vec::new();
        for (edition, ids) in self.load_appearances()? {
            if !ids.iter().any(|i| i == id) {
                continue;
            }

            let remaining: Vec<FilmRef> = ids
                .into_iter()
                .filter(|i| i != id)
                .map(|id| FilmRef { id })
                .collect();

            let path = self
                .data_dir
                .join(FESTIVALS_DIR)
                .join(edition_filename(&edition));
            write_json(&path, &remaining)?;
            removed_from.push(edition);
        }

        // a pre-existing merged cache must not keep the deleted record
        if self.data_dir.join(GENERATED_FILE).exists() {
            let merged = self.load()?.merged();
            self.write_generated(&merged)?;
        }

        Ok(DeleteOutcome { film, removed_from })
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let contents = fs::read_to_string(path).map_err(|e| CatalogError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    serde_json::from_str(&contents).map_err(|e| CatalogError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), CatalogError> {
    let contents = serde_json::to_vec_pretty(value).map_err(|e| CatalogError::Parse {
        path: path.display().to_string(),
        source: e,
    })?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, contents).map_err(|e| CatalogError::Io {
        path: tmp.display().to_string(),
        source: e,
    })?;
    fs::rename(&tmp, path).map_err(|e| CatalogError::Io {
        path: path.display().to_string(),
        source: e,
    })
}
