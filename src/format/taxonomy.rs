//! Taxonomy side file: a JSON array of label names.

use std::path::Path;

use crate::format::FormatError;
use crate::model::Taxonomy;

/// Load the taxonomy from a JSON array file.
///
/// A file that does not exist yet is an empty taxonomy.
pub fn load_taxonomy(path: &Path) -> Result<Taxonomy, FormatError> {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::info!("No taxonomy file at {:?}, starting empty", path);
            return Ok(Taxonomy::new());
        }
        Err(e) => return Err(e.into()),
    };

    let taxonomy = parse_taxonomy(&json)?;
    log::info!("Loaded {} labels from {:?}", taxonomy.len(), path);
    Ok(taxonomy)
}

/// Parse a taxonomy from JSON text.
pub fn parse_taxonomy(json: &str) -> Result<Taxonomy, FormatError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let serde_json::Value::Array(items) = value else {
        return Err(FormatError::invalid_format(
            "taxonomy file must contain a JSON array",
        ));
    };

    let mut labels = Vec::with_capacity(items.len());
    for item in items {
        match item {
            serde_json::Value::String(label) => labels.push(label),
            other => {
                return Err(FormatError::invalid_format(format!(
                    "taxonomy entries must be strings, found {}",
                    other
                )));
            }
        }
    }

    let taxonomy = Taxonomy::from_labels(&labels);
    if taxonomy.len() != labels.len() {
        log::warn!(
            "Dropped {} duplicate taxonomy entries",
            labels.len() - taxonomy.len()
        );
    }
    Ok(taxonomy)
}

/// Overwrite the taxonomy file with the current labels.
pub fn save_taxonomy(path: &Path, taxonomy: &Taxonomy) -> Result<(), FormatError> {
    let json = serde_json::to_string(taxonomy.as_slice())?;
    std::fs::write(path, json)?;
    log::debug!("Saved {} labels to {:?}", taxonomy.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let taxonomy = load_taxonomy(&dir.path().join("absent.json")).unwrap();
        assert!(taxonomy.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labels.json");
        let taxonomy = Taxonomy::from_labels(["cat", "dog", "고양이"]);

        save_taxonomy(&path, &taxonomy).unwrap();
        assert_eq!(load_taxonomy(&path).unwrap(), taxonomy);
    }

    #[test]
    fn test_written_as_plain_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labels.json");
        save_taxonomy(&path, &Taxonomy::from_labels(["a", "b"])).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), r#"["a","b"]"#);
    }

    #[test]
    fn test_rejects_non_array() {
        let err = parse_taxonomy(r#"{"labels": ["a"]}"#).unwrap_err();
        assert!(matches!(err, FormatError::InvalidFormat { .. }));
    }

    #[test]
    fn test_rejects_non_string_entries() {
        let err = parse_taxonomy(r#"["a", 3]"#).unwrap_err();
        assert!(matches!(err, FormatError::InvalidFormat { .. }));
    }

    #[test]
    fn test_duplicates_dropped_on_load() {
        let taxonomy = parse_taxonomy(r#"["a", "b", "a"]"#).unwrap();
        assert_eq!(taxonomy.len(), 2);
    }

    #[test]
    fn test_names_loaded_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labels.json");
        let stored = r#"[" cat",""]"#;
        std::fs::write(&path, stored).unwrap();

        let taxonomy = load_taxonomy(&path).unwrap();
        assert_eq!(taxonomy.as_slice(), &[" cat".to_string(), String::new()]);

        save_taxonomy(&path, &taxonomy).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), stored);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            parse_taxonomy("[\"a\",").unwrap_err(),
            FormatError::Json(_)
        ));
    }
}
