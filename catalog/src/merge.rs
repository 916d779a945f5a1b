//! The merge step: join films with their festival appearances and
//! streaming availability, and derive filter options and festival
//! groupings from the joined data.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::types::{
    Edition, FestivalGroup, FilmRecord, FilmSummary, FilterOptions, MergedFilm, StreamingInfo,
};

/// The loaded catalog: master records plus the two join sources.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    films: BTreeMap<String, FilmRecord>,
    appearances: BTreeMap<Edition, Vec<String>>,
    streaming: HashMap<String, StreamingInfo>,
}

impl Catalog {
    pub fn new(
        films: Vec<FilmRecord>,
        appearances: BTreeMap<Edition, Vec<String>>,
        streaming: HashMap<String, StreamingInfo>,
    ) -> Self {
        Self {
            films: films.into_iter().map(|f| (f.id.clone(), f)).collect(),
            appearances,
            streaming,
        }
    }

    pub fn len(&self) -> usize {
        self.films.len()
    }

    pub fn is_empty(&self) -> bool {
        self.films.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.films.contains_key(id)
    }

    /// All films, each joined with its appearances and streaming info,
    /// sorted by title then id.
    pub fn merged(&self) -> Vec<MergedFilm> {
        let appearances_by_film = self.appearances_by_film();

        let mut merged: Vec<MergedFilm> = self
            .films
            .values()
            .map(|film| MergedFilm {
                film: film.clone(),
                appearances: appearances_by_film
                    .get(&film.id)
                    .cloned()
                    .unwrap_or_default(),
                streaming: self.streaming.get(&film.id).cloned(),
            })
            .collect();

        merged.sort_by(|a, b| {
            (a.film.title.as_str(), a.film.id.as_str())
                .cmp(&(b.film.title.as_str(), b.film.id.as_str()))
        });
        merged
    }

    /// Join a single film, or `None` for an unknown id.
    pub fn merged_film(&self, id: &str) -> Option<MergedFilm> {
        let film = self.films.get(id)?;

        let mut appearances: Vec<Edition> = self
            .appearances
            .iter()
            .filter(|(_, ids)| ids.iter().any(|i| i == id))
            .map(|(edition, _)| edition.clone())
            .collect();
        sort_appearances(&mut appearances);

        Some(MergedFilm {
            film: film.clone(),
            appearances,
            streaming: self.streaming.get(id).cloned(),
        })
    }

    /// Distinct filter values across the catalog, each list sorted.
    ///
    /// Streaming platforms only count for films that exist in the master
    /// file; a leftover streaming entry for a deleted film is inert.
    pub fn filter_options(&self) -> FilterOptions {
        let mut festivals = BTreeSet::new();
        let mut years = BTreeSet::new();
        for edition in self.appearances.keys() {
            festivals.insert(edition.festival.clone());
            years.insert(edition.year);
        }

        let mut genres = BTreeSet::new();
        let mut countries = BTreeSet::new();
        let mut platforms = BTreeSet::new();
        for film in self.films.values() {
            genres.extend(film.genres.iter().cloned());
            countries.extend(film.countries.iter().cloned());

            if let Some(info) = self.streaming.get(&film.id) {
                for offer in info
                    .streaming
                    .iter()
                    .chain(info.rent.iter())
                    .chain(info.buy.iter())
                {
                    platforms.insert(offer.platform.clone());
                }
            }
        }

        FilterOptions {
            festivals: festivals.into_iter().collect(),
            years: years.into_iter().collect(),
            genres: genres.into_iter().collect(),
            countries: countries.into_iter().collect(),
            platforms: platforms.into_iter().collect(),
        }
    }

    /// Festival groupings for the admin view: every edition with its
    /// films (title-sorted), editions newest first then by slug.
    /// Refs to ids with no film record are skipped.
    pub fn groupings(&self) -> Vec<FestivalGroup> {
        let mut groups: Vec<FestivalGroup> = self
            .appearances
            .iter()
            .map(|(edition, ids)| {
                let mut films: Vec<FilmSummary> = ids
                    .iter()
                    .filter_map(|id| self.films.get(id))
                    .map(|film| FilmSummary {
                        id: film.id.clone(),
                        title: film.title.clone(),
                    })
                    .collect();
                films.sort_by(|a, b| (&a.title, &a.id).cmp(&(&b.title, &b.id)));

                FestivalGroup {
                    edition: edition.clone(),
                    films,
                }
            })
            .collect();

        groups.sort_by(|a, b| {
            (std::cmp::Reverse(a.edition.year), &a.edition.festival)
                .cmp(&(std::cmp::Reverse(b.edition.year), &b.edition.festival))
        });
        groups
    }

    fn appearances_by_film(&self) -> HashMap<String, Vec<Edition>> {
        let mut by_film: HashMap<String, Vec<Edition>> = HashMap::new();
        for (edition, ids) in &self.appearances {
            for id in ids {
                if self.films.contains_key(id) {
                    by_film.entry(id.clone()).or_default().push(edition.clone());
                }
            }
        }

        for appearances in by_film.values_mut() {
            sort_appearances(appearances);
        }
        by_film
    }
}

/// Newest edition first, slug as tiebreak.
fn sort_appearances(appearances: &mut [Edition]) {
    appearances.sort_by(|a, b| {
        (std::cmp::Reverse(a.year), &a.festival).cmp(&(std::cmp::Reverse(b.year), &b.festival))
    });
}
