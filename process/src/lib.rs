//! Cache pre-generation.
//!
//! Loads the data directory, runs the merge, and writes
//! `films.generated.json` so the server can skip the merge at startup.

use std::path::Path;

use catalog::{CatalogError, Store};
use tracing::info;

/// Merge the data directory and write the generated cache file.
///
/// Returns the number of merged films written.
pub fn generate(data_dir: &Path) -> Result<usize, CatalogError> {
    let store = Store::new(data_dir);
    let catalog = store.load()?;

    info!("Loaded films: {}", catalog.len());

    let merged = catalog.merged();
    store.write_generated(&merged)?;

    info!(
        "Wrote {} merged films to {}",
        merged.len(),
        data_dir.join(catalog::store::GENERATED_FILE).display()
    );

    Ok(merged.len())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_generate_writes_cache() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("films.json"),
            r#"[{"id": "a", "title": "A"}, {"id": "b", "title": "B"}]"#,
        )
        .unwrap();

        let count = generate(tmp.path()).unwrap();
        assert_eq!(count, 2);
        assert!(tmp.path().join("films.generated.json").exists());

        let cached = Store::new(tmp.path()).load_generated().unwrap().unwrap();
        assert_eq!(cached.len(), 2);
    }

    #[test]
    fn test_generate_without_master_fails() {
        let tmp = TempDir::new().unwrap();
        assert!(generate(tmp.path()).is_err());
    }
}
