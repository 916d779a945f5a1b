use std::collections::{BTreeMap, HashMap};

use catalog::{Catalog, Edition, FilmRecord, StreamingInfo, StreamingOffer};

fn film(id: &str, title: &str) -> FilmRecord {
    FilmRecord {
        id: id.to_string(),
        title: title.to_string(),
        directors: Vec::new(),
        year: None,
        countries: Vec::new(),
        genres: Vec::new(),
        runtime_minutes: None,
        synopsis: None,
        poster_url: None,
    }
}

fn edition(festival: &str, year: u16) -> Edition {
    Edition {
        festival: festival.to_string(),
        year,
    }
}

fn offer(platform: &str) -> StreamingOffer {
    StreamingOffer {
        platform: platform.to_string(),
        url: None,
    }
}

fn sample_catalog() -> Catalog {
    let films = vec![
        FilmRecord {
            genres: vec!["Drama".to_string(), "Thriller".to_string()],
            countries: vec!["France".to_string()],
            ..film("b-film", "Zone of Interest")
        },
        FilmRecord {
            genres: vec!["Drama".to_string()],
            countries: vec!["Japan".to_string()],
            ..film("a-film", "Perfect Days")
        },
    ];

    let mut appearances = BTreeMap::new();
    appearances.insert(
        edition("cannes", 2023),
        vec!["a-film".to_string(), "b-film".to_string()],
    );
    appearances.insert(edition("venice", 2024), vec!["b-film".to_string()]);
    appearances.insert(
        edition("rotterdam", 2024),
        vec!["b-film".to_string(), "ghost-film".to_string()],
    );

    let mut streaming = HashMap::new();
    streaming.insert(
        "a-film".to_string(),
        StreamingInfo {
            found: true,
            streaming: vec![offer("hulu")],
            rent: vec![offer("apple-tv")],
            buy: vec![offer("amazon")],
        },
    );
    // entry for a film that is not in the master file
    streaming.insert(
        "ghost-film".to_string(),
        StreamingInfo {
            found: true,
            streaming: vec![offer("netflix")],
            ..Default::default()
        },
    );

    Catalog::new(films, appearances, streaming)
}

#[test]
fn merged_is_title_sorted_and_joined() {
    let merged = sample_catalog().merged();

    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0].film.title, "Perfect Days");
    assert_eq!(merged[1].film.title, "Zone of Interest");

    assert_eq!(merged[0].appearances, vec![edition("cannes", 2023)]);
    assert!(merged[0].streaming.as_ref().unwrap().found);
    assert!(merged[1].streaming.is_none());
}

#[test]
fn appearances_sort_newest_first_then_slug() {
    let merged = sample_catalog().merged();

    let zone = &merged[1];
    assert_eq!(
        zone.appearances,
        vec![
            edition("rotterdam", 2024),
            edition("venice", 2024),
            edition("cannes", 2023),
        ]
    );
}

#[test]
fn merged_film_matches_list_entry() {
    let catalog = sample_catalog();
    let single = catalog.merged_film("b-film").unwrap();
    let listed = catalog
        .merged()
        .into_iter()
        .find(|m| m.film.id == "b-film")
        .unwrap();

    assert_eq!(single.appearances, listed.appearances);
    assert!(catalog.merged_film("ghost-film").is_none());
}

#[test]
fn dangling_refs_are_ignored() {
    let merged = sample_catalog().merged();
    assert!(merged.iter().all(|m| m.film.id != "ghost-film"));
}

#[test]
fn filter_options_are_distinct_and_sorted() {
    let options = sample_catalog().filter_options();

    assert_eq!(options.festivals, vec!["cannes", "rotterdam", "venice"]);
    assert_eq!(options.years, vec![2023, 2024]);
    assert_eq!(options.genres, vec!["Drama", "Thriller"]);
    assert_eq!(options.countries, vec!["France", "Japan"]);
    // ghost-film's netflix entry has no film record behind it
    assert_eq!(options.platforms, vec!["amazon", "apple-tv", "hulu"]);
}

#[test]
fn groupings_sort_editions_and_skip_dangling_refs() {
    let groups = sample_catalog().groupings();

    let order: Vec<String> = groups.iter().map(|g| g.edition.to_string()).collect();
    assert_eq!(order, vec!["rotterdam-2024", "venice-2024", "cannes-2023"]);

    let rotterdam = &groups[0];
    assert_eq!(rotterdam.films.len(), 1);
    assert_eq!(rotterdam.films[0].id, "b-film");

    let cannes = &groups[2];
    let titles: Vec<&str> = cannes.films.iter().map(|f| f.title.as_str()).collect();
    assert_eq!(titles, vec!["Perfect Days", "Zone of Interest"]);
}

#[test]
fn empty_catalog_derives_empty_options() {
    let catalog = Catalog::new(Vec::new(), BTreeMap::new(), HashMap::new());
    assert!(catalog.is_empty());
    assert!(catalog.merged().is_empty());

    let options = catalog.filter_options();
    assert!(options.festivals.is_empty());
    assert!(options.platforms.is_empty());
}
