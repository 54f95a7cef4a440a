//! Labelling session: a cursor over the dataset plus the editable taxonomy.
//!
//! Every mutation is written straight back to its file. If the write
//! fails the in-memory change is rolled back so memory and disk agree.

use std::path::{Path, PathBuf};

use crate::constants::TIMESTAMP_FORMAT;
use crate::data::{FetchError, ImageFetcher};
use crate::format::{Dataset, FormatError, load_taxonomy, save_taxonomy};
use crate::model::{DatasetRow, Taxonomy};

/// Result of a previous/next request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The cursor moved
    Moved,
    /// Already on the first row
    AtStart,
    /// Already on the last row
    AtEnd,
    /// The dataset has no rows
    Empty,
}

/// Result of "save & next".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Label saved and the cursor moved to the next row
    Advanced,
    /// Label saved on the last row; there is nothing left to show
    Finished,
    /// No label is selected, nothing was written
    NothingSelected,
    /// The dataset has no rows
    Empty,
}

/// Result of removing the selected label from the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The label was removed and the taxonomy saved
    Removed(String),
    /// The selection is empty or not a taxonomy entry
    NotInTaxonomy,
}

/// State for one labelling run over a dataset file and a taxonomy file.
pub struct LabelingSession {
    dataset_path: PathBuf,
    taxonomy_path: PathBuf,
    dataset: Dataset,
    taxonomy: Taxonomy,
    cursor: usize,
    selected: Option<String>,
    fetcher: Box<dyn ImageFetcher>,
}

impl std::fmt::Debug for LabelingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelingSession")
            .field("dataset_path", &self.dataset_path)
            .field("taxonomy_path", &self.taxonomy_path)
            .field("rows", &self.dataset.len())
            .field("labels", &self.taxonomy.len())
            .field("cursor", &self.cursor)
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}

impl LabelingSession {
    /// Load both files and place the cursor on the first unlabelled row.
    pub fn open(
        dataset_path: impl Into<PathBuf>,
        taxonomy_path: impl Into<PathBuf>,
        fetcher: Box<dyn ImageFetcher>,
    ) -> Result<Self, FormatError> {
        let dataset_path = dataset_path.into();
        let taxonomy_path = taxonomy_path.into();

        let dataset = Dataset::load(&dataset_path)?;
        let taxonomy = load_taxonomy(&taxonomy_path)?;
        let cursor = dataset.first_unlabeled().unwrap_or(0);

        let mut session = Self {
            dataset_path,
            taxonomy_path,
            dataset,
            taxonomy,
            cursor,
            selected: None,
            fetcher,
        };
        session.sync_selection();

        log::info!(
            "Session opened at row {} of {}",
            session.cursor + 1,
            session.len()
        );
        Ok(session)
    }

    /// Path of the dataset file.
    pub fn dataset_path(&self) -> &Path {
        &self.dataset_path
    }

    /// Path of the taxonomy file.
    pub fn taxonomy_path(&self) -> &Path {
        &self.taxonomy_path
    }

    /// The loaded dataset.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// The current taxonomy.
    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Current row index. Always `< len()` unless the dataset is empty.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.dataset.len()
    }

    /// True when the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }

    /// Row under the cursor.
    pub fn current_row(&self) -> Option<&DatasetRow> {
        self.dataset.row(self.cursor)
    }

    /// Label saved on the row under the cursor.
    pub fn current_saved_label(&self) -> Option<&str> {
        self.current_row().and_then(|row| row.label.as_deref())
    }

    /// Label the operator has picked for the current row.
    pub fn selected_label(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Caption like "Image 3 of 10".
    pub fn progress(&self) -> String {
        if self.is_empty() {
            return "No images".to_string();
        }
        format!("Image {} of {}", self.cursor + 1, self.len())
    }

    /// Move to the next row.
    pub fn next(&mut self) -> Navigation {
        if self.is_empty() {
            return Navigation::Empty;
        }
        if self.cursor + 1 >= self.len() {
            log::info!("Already at the last image");
            return Navigation::AtEnd;
        }
        self.cursor += 1;
        self.sync_selection();
        log::info!("Next image: {}", self.progress());
        Navigation::Moved
    }

    /// Move to the previous row.
    pub fn prev(&mut self) -> Navigation {
        if self.is_empty() {
            return Navigation::Empty;
        }
        if self.cursor == 0 {
            return Navigation::AtStart;
        }
        self.cursor -= 1;
        self.sync_selection();
        log::info!("Previous image: {}", self.progress());
        Navigation::Moved
    }

    /// Select a taxonomy label for the current row. Unknown names are ignored.
    pub fn select_label(&mut self, name: &str) -> bool {
        if !self.taxonomy.contains(name) {
            log::warn!("Ignoring selection of unknown label {:?}", name);
            return false;
        }
        self.selected = Some(name.to_string());
        log::debug!("Selected label {:?}", name);
        true
    }

    /// Select the taxonomy label at a position (hotkey path).
    pub fn select_by_index(&mut self, index: usize) -> Option<&str> {
        let name = self.taxonomy.get(index)?.to_string();
        log::debug!("Hotkey selected label {:?} (#{})", name, index + 1);
        self.selected = Some(name);
        self.selected.as_deref()
    }

    /// Write the selected label to the current row, save the dataset and
    /// move to the next row.
    pub fn save_and_next(&mut self) -> Result<SaveOutcome, FormatError> {
        if self.is_empty() {
            return Ok(SaveOutcome::Empty);
        }
        let Some(label) = self.selected.clone() else {
            log::warn!("Save requested with no label selected");
            return Ok(SaveOutcome::NothingSelected);
        };

        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
        self.save_label_at(self.cursor, &label, &timestamp)?;
        log::info!("Labelled row {} as {:?}", self.cursor + 1, label);

        if self.cursor + 1 >= self.len() {
            self.selected = None;
            log::info!("All images have been labelled");
            return Ok(SaveOutcome::Finished);
        }

        self.cursor += 1;
        self.sync_selection();
        Ok(SaveOutcome::Advanced)
    }

    fn save_label_at(
        &mut self,
        index: usize,
        label: &str,
        timestamp: &str,
    ) -> Result<(), FormatError> {
        let edit = self.dataset.apply_label(index, label, timestamp)?;

        if let Err(e) = self.dataset.save(&self.dataset_path) {
            log::error!("Failed to save dataset {:?}: {}", self.dataset_path, e);
            self.dataset.revert(edit);
            return Err(e);
        }
        Ok(())
    }

    /// Add a label to the taxonomy, save it, and select the new label.
    ///
    /// Returns `Ok(false)` for blank or duplicate names; nothing changes.
    pub fn add_label(&mut self, name: &str) -> Result<bool, FormatError> {
        let name = name.trim();
        if !self.taxonomy.add(name) {
            log::debug!("Label {:?} not added (blank or duplicate)", name);
            return Ok(false);
        }

        if let Err(e) = save_taxonomy(&self.taxonomy_path, &self.taxonomy) {
            log::error!("Failed to save taxonomy {:?}: {}", self.taxonomy_path, e);
            self.taxonomy.remove(name);
            return Err(e);
        }

        log::info!("Added label {:?}", name);
        self.selected = Some(name.to_string());
        Ok(true)
    }

    /// Remove the selected label from the taxonomy and clear the selection.
    ///
    /// Rows already carrying the label keep it.
    pub fn remove_selected_label(&mut self) -> Result<RemoveOutcome, FormatError> {
        let Some(name) = self.selected.clone() else {
            return Ok(RemoveOutcome::NotInTaxonomy);
        };
        let Some(position) = self.taxonomy.position(&name) else {
            return Ok(RemoveOutcome::NotInTaxonomy);
        };

        self.taxonomy.remove(&name);
        if let Err(e) = save_taxonomy(&self.taxonomy_path, &self.taxonomy) {
            log::error!("Failed to save taxonomy {:?}: {}", self.taxonomy_path, e);
            self.taxonomy.insert(position, name);
            return Err(e);
        }

        log::info!("Removed label {:?}", name);
        self.selected = None;
        Ok(RemoveOutcome::Removed(name))
    }

    /// Fetch the raw bytes of the current row's image.
    pub fn fetch_current_image(&self) -> Option<Result<Vec<u8>, FetchError>> {
        let row = self.current_row()?;
        Some(self.fetcher.fetch(&row.url))
    }

    fn sync_selection(&mut self) {
        self.selected = self
            .current_saved_label()
            .filter(|label| self.taxonomy.contains(label))
            .map(str::to_string);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct StubFetcher {
        images: HashMap<String, Vec<u8>>,
    }

    impl ImageFetcher for StubFetcher {
        fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
            self.images
                .get(url)
                .cloned()
                .ok_or_else(|| FetchError::http(url, "status code 404"))
        }
    }

    fn stub() -> Box<dyn ImageFetcher> {
        let mut images = HashMap::new();
        images.insert("http://img/1.png".to_string(), vec![1]);
        images.insert("http://img/2.png".to_string(), vec![2]);
        Box::new(StubFetcher { images })
    }

    struct Fixture {
        _dir: tempfile::TempDir,
        dataset: PathBuf,
        taxonomy: PathBuf,
    }

    fn fixture(csv: &str, labels: Option<&str>) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let dataset = dir.path().join("image_urls.csv");
        let taxonomy = dir.path().join("label_classes.json");
        std::fs::write(&dataset, csv).unwrap();
        if let Some(labels) = labels {
            std::fs::write(&taxonomy, labels).unwrap();
        }
        Fixture {
            _dir: dir,
            dataset,
            taxonomy,
        }
    }

    fn open(fx: &Fixture) -> LabelingSession {
        LabelingSession::open(&fx.dataset, &fx.taxonomy, stub()).unwrap()
    }

    const THREE_ROWS: &str = "URL,Label\nhttp://img/1.png,cat\nhttp://img/2.png,\nhttp://img/3.png,\n";

    #[test]
    fn test_cursor_starts_at_first_unlabeled() {
        let fx = fixture(THREE_ROWS, Some(r#"["cat","dog"]"#));
        let session = open(&fx);
        assert_eq!(session.cursor(), 1);
        assert_eq!(session.progress(), "Image 2 of 3");
        assert_eq!(session.selected_label(), None);
    }

    #[test]
    fn test_cursor_starts_at_zero_when_all_labeled() {
        let fx = fixture("URL,Label\nhttp://img/1.png,cat\n", Some(r#"["cat"]"#));
        let session = open(&fx);
        assert_eq!(session.cursor(), 0);
        assert_eq!(session.selected_label(), Some("cat"));
    }

    #[test]
    fn test_missing_taxonomy_file_is_empty() {
        let fx = fixture(THREE_ROWS, None);
        let session = open(&fx);
        assert!(session.taxonomy().is_empty());
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let fx = fixture(THREE_ROWS, Some("[]"));
        let mut session = open(&fx);

        assert_eq!(session.next(), Navigation::Moved);
        assert_eq!(session.next(), Navigation::AtEnd);
        assert_eq!(session.cursor(), 2);

        assert_eq!(session.prev(), Navigation::Moved);
        assert_eq!(session.prev(), Navigation::Moved);
        assert_eq!(session.prev(), Navigation::AtStart);
        assert_eq!(session.cursor(), 0);
    }

    #[test]
    fn test_navigation_loads_saved_label() {
        let fx = fixture(THREE_ROWS, Some(r#"["cat","dog"]"#));
        let mut session = open(&fx);
        session.select_label("dog");
        session.prev();
        assert_eq!(session.selected_label(), Some("cat"));
        session.next();
        assert_eq!(session.selected_label(), None);
    }

    #[test]
    fn test_save_persists_and_advances_by_one() {
        let fx = fixture(THREE_ROWS, Some(r#"["cat","dog"]"#));
        let mut session = open(&fx);
        assert!(session.select_label("dog"));

        assert_eq!(session.save_and_next().unwrap(), SaveOutcome::Advanced);
        assert_eq!(session.cursor(), 2);
        assert_eq!(session.selected_label(), None);

        let saved = Dataset::load(&fx.dataset).unwrap();
        let row = saved.row(1).unwrap();
        assert_eq!(row.label.as_deref(), Some("dog"));
        let stamp = row.modified.as_deref().unwrap();
        assert!(chrono::NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).is_ok());
        assert_eq!(saved.row(0).unwrap().label.as_deref(), Some("cat"));
        assert_eq!(saved.row(2).unwrap().label, None);
    }

    #[test]
    fn test_save_without_selection_writes_nothing() {
        let fx = fixture(THREE_ROWS, Some(r#"["cat"]"#));
        let mut session = open(&fx);
        assert_eq!(session.save_and_next().unwrap(), SaveOutcome::NothingSelected);
        assert_eq!(session.cursor(), 1);
        assert_eq!(std::fs::read_to_string(&fx.dataset).unwrap(), THREE_ROWS);
    }

    #[test]
    fn test_save_on_last_row_finishes() {
        let fx = fixture(THREE_ROWS, Some(r#"["cat"]"#));
        let mut session = open(&fx);
        session.next();
        session.select_label("cat");
        assert_eq!(session.save_and_next().unwrap(), SaveOutcome::Finished);
        assert_eq!(session.cursor(), 2);
        assert!(session.cursor() < session.len());
    }

    #[test]
    fn test_save_failure_rolls_back() {
        let fx = fixture(THREE_ROWS, Some(r#"["cat"]"#));
        let mut session = open(&fx);
        session.select_label("cat");
        session.dataset_path = fx.dataset.parent().unwrap().join("missing").join("x.csv");

        assert!(session.save_and_next().is_err());
        assert_eq!(session.cursor(), 1);
        assert_eq!(session.current_saved_label(), None);
        assert_eq!(session.selected_label(), Some("cat"));
        assert_eq!(
            session.dataset().headers(),
            &["URL".to_string(), "Label".to_string()]
        );

        session.dataset_path = fx.dataset.clone();
        assert_eq!(session.save_and_next().unwrap(), SaveOutcome::Advanced);
        let saved = std::fs::read_to_string(&fx.dataset).unwrap();
        assert!(saved.starts_with("URL,Label,Last Modified Time\n"));
    }

    #[test]
    fn test_add_blank_label_is_noop() {
        let fx = fixture(THREE_ROWS, Some(r#"[" cat"]"#));
        let mut session = open(&fx);
        assert!(!session.add_label("   ").unwrap());
        assert!(session.taxonomy().contains(" cat"));
        assert_eq!(std::fs::read_to_string(&fx.taxonomy).unwrap(), r#"[" cat"]"#);
    }

    #[test]
    fn test_select_unknown_label_ignored() {
        let fx = fixture(THREE_ROWS, Some(r#"["cat"]"#));
        let mut session = open(&fx);
        assert!(!session.select_label("zebra"));
        assert_eq!(session.selected_label(), None);
    }

    #[test]
    fn test_select_by_index() {
        let fx = fixture(THREE_ROWS, Some(r#"["cat","dog"]"#));
        let mut session = open(&fx);
        assert_eq!(session.select_by_index(1), Some("dog"));
        assert_eq!(session.select_by_index(5), None);
        assert_eq!(session.selected_label(), Some("dog"));
    }

    #[test]
    fn test_add_label_saves_and_selects() {
        let fx = fixture(THREE_ROWS, None);
        let mut session = open(&fx);
        assert!(session.add_label(" bird ").unwrap());
        assert_eq!(session.selected_label(), Some("bird"));
        assert_eq!(std::fs::read_to_string(&fx.taxonomy).unwrap(), r#"["bird"]"#);
    }

    #[test]
    fn test_add_duplicate_label_is_noop() {
        let fx = fixture(THREE_ROWS, Some(r#"["cat","dog"]"#));
        let mut session = open(&fx);
        session.select_label("dog");
        assert!(!session.add_label("cat").unwrap());
        assert_eq!(session.taxonomy().len(), 2);
        assert_eq!(session.selected_label(), Some("dog"));
        assert_eq!(
            std::fs::read_to_string(&fx.taxonomy).unwrap(),
            r#"["cat","dog"]"#
        );
    }

    #[test]
    fn test_remove_selected_label() {
        let fx = fixture(THREE_ROWS, Some(r#"["cat","dog"]"#));
        let mut session = open(&fx);
        session.prev();
        assert_eq!(session.selected_label(), Some("cat"));

        let outcome = session.remove_selected_label().unwrap();
        assert_eq!(outcome, RemoveOutcome::Removed("cat".to_string()));
        assert_eq!(session.selected_label(), None);
        assert!(!session.taxonomy().contains("cat"));
        assert_eq!(std::fs::read_to_string(&fx.taxonomy).unwrap(), r#"["dog"]"#);
        assert_eq!(session.current_saved_label(), Some("cat"));
    }

    #[test]
    fn test_remove_without_selection() {
        let fx = fixture(THREE_ROWS, Some(r#"["cat"]"#));
        let mut session = open(&fx);
        assert_eq!(
            session.remove_selected_label().unwrap(),
            RemoveOutcome::NotInTaxonomy
        );
        assert_eq!(session.taxonomy().len(), 1);
    }

    #[test]
    fn test_remove_failure_restores_position() {
        let fx = fixture(THREE_ROWS, Some(r#"["a","b","c"]"#));
        let mut session = open(&fx);
        session.select_label("b");
        session.taxonomy_path = fx.taxonomy.parent().unwrap().join("missing").join("x.json");

        assert!(session.remove_selected_label().is_err());
        assert_eq!(session.taxonomy().position("b"), Some(1));
        assert_eq!(session.selected_label(), Some("b"));
    }

    #[test]
    fn test_fetch_current_image() {
        let fx = fixture(THREE_ROWS, None);
        let mut session = open(&fx);
        assert_eq!(session.fetch_current_image().unwrap().unwrap(), vec![2]);
        session.next();
        assert!(matches!(
            session.fetch_current_image().unwrap(),
            Err(FetchError::Http { .. })
        ));
    }

    #[test]
    fn test_empty_dataset() {
        let fx = fixture("URL,Label\n", Some(r#"["cat"]"#));
        let mut session = open(&fx);
        assert!(session.is_empty());
        assert_eq!(session.next(), Navigation::Empty);
        assert_eq!(session.prev(), Navigation::Empty);
        session.select_label("cat");
        assert_eq!(session.save_and_next().unwrap(), SaveOutcome::Empty);
        assert!(session.fetch_current_image().is_none());
        assert_eq!(session.progress(), "No images");
    }

    #[test]
    fn test_missing_dataset_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = LabelingSession::open(
            dir.path().join("nope.csv"),
            dir.path().join("labels.json"),
            stub(),
        )
        .unwrap_err();
        assert!(matches!(err, FormatError::Io(_)));
    }
}
