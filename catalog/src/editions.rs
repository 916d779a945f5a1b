//! Appearance file name handling.
//!
//! Appearance files are named `<festival-slug>-<year>.json`, e.g.
//! `cannes-2024.json` or `new-horizons-2023.json`. The year is always the
//! last dash-separated segment.

use crate::types::Edition;

/// Parse an appearance file name into an [`Edition`].
///
/// Returns `None` for names that are not `<slug>-<year>.json` with a
/// non-empty slug and a four-digit year.
pub fn parse_edition_filename(file_name: &str) -> Option<Edition> {
    let stem = file_name.strip_suffix(".json")?;
    let (festival, year) = stem.rsplit_once('-')?;

    if festival.is_empty() || year.len() != 4 {
        return None;
    }

    let year: u16 = year.parse().ok()?;

    Some(Edition {
        festival: festival.to_string(),
        year,
    })
}

/// File name for an edition's appearance file.
pub fn edition_filename(edition: &Edition) -> String {
    format!("{}-{}.json", edition.festival, edition.year)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_name() {
        let edition = parse_edition_filename("cannes-2024.json").unwrap();
        assert_eq!(edition.festival, "cannes");
        assert_eq!(edition.year, 2024);
    }

    #[test]
    fn test_slug_with_dashes() {
        let edition = parse_edition_filename("new-horizons-2023.json").unwrap();
        assert_eq!(edition.festival, "new-horizons");
        assert_eq!(edition.year, 2023);
    }

    #[test]
    fn test_rejects_bad_names() {
        assert!(parse_edition_filename("cannes.json").is_none());
        assert!(parse_edition_filename("cannes-24.json").is_none());
        assert!(parse_edition_filename("-2024.json").is_none());
        assert!(parse_edition_filename("cannes-2024.yaml").is_none());
        assert!(parse_edition_filename("cannes-abcd.json").is_none());
    }

    #[test]
    fn test_roundtrip() {
        let edition = Edition {
            festival: "venice".to_string(),
            year: 2024,
        };
        assert_eq!(edition_filename(&edition), "venice-2024.json");
        assert_eq!(
            parse_edition_filename(&edition_filename(&edition)).unwrap(),
            edition
        );
    }
}
