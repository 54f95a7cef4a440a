//! CSV dataset: the ordered table of image rows being labelled.
//!
//! The file needs a header row with at least a `URL` column. `Label` and
//! `Last Modified Time` are added when absent, and every other column is
//! carried through untouched. Rows wider than the header are rejected on
//! load, so a save never loses data.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::constants::{LABEL_COLUMN, MODIFIED_COLUMN, URL_COLUMN};
use crate::format::FormatError;
use crate::model::DatasetRow;

/// In-memory copy of the dataset file.
#[derive(Debug, Clone)]
pub struct Dataset {
    headers: Vec<String>,
    url_column: usize,
    label_column: usize,
    modified_column: Option<usize>,
    rows: Vec<DatasetRow>,
}

impl Dataset {
    /// Read a dataset from a CSV file.
    pub fn load(path: &Path) -> Result<Self, FormatError> {
        let file = File::open(path)?;
        let dataset = Self::from_reader(file)?;
        log::info!(
            "Loaded dataset {:?}: {} rows, {} labelled",
            path,
            dataset.len(),
            dataset.labeled_count()
        );
        Ok(dataset)
    }

    /// Parse a dataset from any CSV source.
    pub fn from_reader<R: Read>(source: R) -> Result<Self, FormatError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(source);

        let mut headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let file_columns = headers.len();

        let url_column = headers
            .iter()
            .position(|h| h == URL_COLUMN)
            .ok_or_else(|| FormatError::missing_column(URL_COLUMN))?;

        let label_column = match headers.iter().position(|h| h == LABEL_COLUMN) {
            Some(index) => index,
            None => {
                log::debug!("Dataset has no {:?} column, adding one", LABEL_COLUMN);
                headers.push(LABEL_COLUMN.to_string());
                headers.len() - 1
            }
        };
        let modified_column = headers.iter().position(|h| h == MODIFIED_COLUMN);

        let mut dataset = Self {
            headers,
            url_column,
            label_column,
            modified_column,
            rows: Vec::new(),
        };

        for record in reader.records() {
            let record = record?;
            if record.len() > file_columns {
                let line = record.position().map_or(0, csv::Position::line);
                return Err(FormatError::invalid_format(format!(
                    "line {} has {} fields but the header has {}",
                    line,
                    record.len(),
                    file_columns
                )));
            }
            let row = dataset.row_from_record(&record);
            dataset.rows.push(row);
        }

        Ok(dataset)
    }

    /// Overwrite a CSV file with the current contents.
    pub fn save(&self, path: &Path) -> Result<(), FormatError> {
        let file = File::create(path)?;
        self.to_writer(file)?;
        log::debug!("Saved dataset to {:?}", path);
        Ok(())
    }

    /// Write the dataset as CSV, header first, rows in order.
    pub fn to_writer<W: Write>(&self, sink: W) -> Result<(), FormatError> {
        let mut writer = csv::Writer::from_writer(sink);
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(self.record_for_row(row))?;
        }
        writer.flush()?;
        Ok(())
    }

    fn row_from_record(&self, record: &csv::StringRecord) -> DatasetRow {
        let mut row = DatasetRow::default();
        for index in 0..self.headers.len() {
            let cell = record.get(index).unwrap_or("");
            if index == self.url_column {
                row.url = cell.to_string();
            } else if index == self.label_column {
                row.label = non_empty(cell);
            } else if Some(index) == self.modified_column {
                row.modified = non_empty(cell);
            } else {
                row.extra.push(cell.to_string());
            }
        }
        row
    }

    fn record_for_row<'a>(&self, row: &'a DatasetRow) -> Vec<&'a str> {
        let mut extra = row.extra.iter();
        (0..self.headers.len())
            .map(|index| {
                if index == self.url_column {
                    row.url.as_str()
                } else if index == self.label_column {
                    row.label.as_deref().unwrap_or("")
                } else if Some(index) == self.modified_column {
                    row.modified.as_deref().unwrap_or("")
                } else {
                    extra.next().map(String::as_str).unwrap_or("")
                }
            })
            .collect()
    }

    /// Column names in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Row at an index.
    pub fn row(&self, index: usize) -> Option<&DatasetRow> {
        self.rows.get(index)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the first row without a label.
    pub fn first_unlabeled(&self) -> Option<usize> {
        self.rows.iter().position(DatasetRow::is_unlabeled)
    }

    /// Number of rows carrying a label.
    pub fn labeled_count(&self) -> usize {
        self.rows.iter().filter(|row| !row.is_unlabeled()).count()
    }

    /// Assign a label and its timestamp to a row.
    ///
    /// Adds the `Last Modified Time` column on first use.
    pub fn set_label(
        &mut self,
        index: usize,
        label: &str,
        timestamp: &str,
    ) -> Result<(), FormatError> {
        self.apply_label(index, label, timestamp).map(|_| ())
    }

    /// Like `set_label`, returning what is needed to undo the change.
    pub(crate) fn apply_label(
        &mut self,
        index: usize,
        label: &str,
        timestamp: &str,
    ) -> Result<LabelEdit, FormatError> {
        let len = self.rows.len();
        let Some(row) = self.rows.get_mut(index) else {
            return Err(FormatError::RowOutOfRange { index, len });
        };

        let edit = LabelEdit {
            index,
            previous: row.clone(),
            added_modified_column: self.modified_column.is_none(),
        };
        row.label = Some(label.to_string());
        row.modified = Some(timestamp.to_string());

        if edit.added_modified_column {
            self.headers.push(MODIFIED_COLUMN.to_string());
            self.modified_column = Some(self.headers.len() - 1);
        }
        Ok(edit)
    }

    /// Undo an `apply_label`, including a column it appended.
    pub(crate) fn revert(&mut self, edit: LabelEdit) {
        if let Some(slot) = self.rows.get_mut(edit.index) {
            *slot = edit.previous;
        }
        if edit.added_modified_column {
            if let Some(column) = self.modified_column.take() {
                self.headers.remove(column);
            }
        }
    }
}

/// Undo record for a single label assignment.
#[derive(Debug, Clone)]
pub(crate) struct LabelEdit {
    index: usize,
    previous: DatasetRow,
    added_modified_column: bool,
}

fn non_empty(cell: &str) -> Option<String> {
    if cell.trim().is_empty() {
        None
    } else {
        Some(cell.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(csv: &str) -> Dataset {
        Dataset::from_reader(csv.as_bytes()).unwrap()
    }

    fn render(dataset: &Dataset) -> String {
        let mut out = Vec::new();
        dataset.to_writer(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_missing_url_column() {
        let err = Dataset::from_reader("Link,Label\nhttp://a,\n".as_bytes()).unwrap_err();
        assert!(matches!(err, FormatError::MissingColumn { ref column } if column == "URL"));
    }

    #[test]
    fn test_label_column_added_when_absent() {
        let dataset = parse("URL\nhttp://a/1.png\nhttp://a/2.png\n");
        assert_eq!(dataset.headers(), &["URL".to_string(), "Label".to_string()]);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.first_unlabeled(), Some(0));
        assert_eq!(render(&dataset), "URL,Label\nhttp://a/1.png,\nhttp://a/2.png,\n");
    }

    #[test]
    fn test_existing_labels_are_read() {
        let dataset = parse("URL,Label\nhttp://a/1.png,cat\nhttp://a/2.png,\nhttp://a/3.png,dog\n");
        assert_eq!(dataset.row(0).unwrap().label.as_deref(), Some("cat"));
        assert_eq!(dataset.row(1).unwrap().label, None);
        assert_eq!(dataset.first_unlabeled(), Some(1));
        assert_eq!(dataset.labeled_count(), 2);
    }

    #[test]
    fn test_first_unlabeled_none_when_complete() {
        let dataset = parse("URL,Label\nhttp://a/1.png,cat\n");
        assert_eq!(dataset.first_unlabeled(), None);
    }

    #[test]
    fn test_set_label_adds_modified_column() {
        let mut dataset = parse("URL,Label\nhttp://a/1.png,\nhttp://a/2.png,\n");
        dataset
            .set_label(1, "dog", "2024-01-02 03:04:05")
            .unwrap();
        assert_eq!(
            render(&dataset),
            "URL,Label,Last Modified Time\nhttp://a/1.png,,\nhttp://a/2.png,dog,2024-01-02 03:04:05\n"
        );
    }

    #[test]
    fn test_set_label_out_of_range() {
        let mut dataset = parse("URL\nhttp://a/1.png\n");
        let err = dataset.set_label(3, "cat", "now").unwrap_err();
        assert!(matches!(err, FormatError::RowOutOfRange { index: 3, len: 1 }));
    }

    #[test]
    fn test_other_columns_preserved_in_order() {
        let mut dataset =
            parse("id,URL,note,Label,Last Modified Time\n7,http://a/1.png,\"x, y\",,\n8,http://a/2.png,z,cat,2020-01-01 00:00:00\n");
        dataset.set_label(0, "bird", "2024-05-05 05:05:05").unwrap();
        assert_eq!(
            render(&dataset),
            "id,URL,note,Label,Last Modified Time\n7,http://a/1.png,\"x, y\",bird,2024-05-05 05:05:05\n8,http://a/2.png,z,cat,2020-01-01 00:00:00\n"
        );
    }

    #[test]
    fn test_short_records_padded() {
        let dataset = parse("URL,extra,Label\nhttp://a/1.png\n");
        assert_eq!(render(&dataset), "URL,extra,Label\nhttp://a/1.png,,\n");
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "URL\nhttp://a/1.png\nhttp://a/2.png\n").unwrap();

        let mut dataset = Dataset::load(&path).unwrap();
        dataset.set_label(0, "cat", "2024-01-01 00:00:00").unwrap();
        dataset.save(&path).unwrap();

        let reloaded = Dataset::load(&path).unwrap();
        assert_eq!(reloaded.row(0).unwrap().label.as_deref(), Some("cat"));
        assert_eq!(
            reloaded.row(0).unwrap().modified.as_deref(),
            Some("2024-01-01 00:00:00")
        );
        assert_eq!(reloaded.first_unlabeled(), Some(1));
    }

    #[test]
    fn test_rows_wider_than_header_rejected() {
        let err = Dataset::from_reader("URL,Label\nhttp://a/1.png,,keepme\n".as_bytes()).unwrap_err();
        assert!(matches!(err, FormatError::InvalidFormat { .. }));

        // The appended Label column does not absorb a stray cell either
        let err = Dataset::from_reader("URL\nhttp://a/1.png,cat\n".as_bytes()).unwrap_err();
        assert!(matches!(err, FormatError::InvalidFormat { .. }));
    }

    #[test]
    fn test_revert_removes_added_column() {
        let original = "URL,Label\nhttp://a/1.png,\nhttp://a/2.png,dog\n";
        let mut dataset = parse(original);

        let edit = dataset.apply_label(0, "cat", "2024-01-01 00:00:00").unwrap();
        assert_eq!(dataset.headers().len(), 3);
        dataset.revert(edit);

        assert_eq!(dataset.headers(), &["URL".to_string(), "Label".to_string()]);
        assert_eq!(dataset.row(0).unwrap().label, None);
        assert_eq!(render(&dataset), original);
    }

    #[test]
    fn test_revert_keeps_existing_column() {
        let original = "URL,Label,Last Modified Time\nhttp://a/1.png,cat,2020-01-01 00:00:00\n";
        let mut dataset = parse(original);

        let edit = dataset.apply_label(0, "dog", "2024-01-01 00:00:00").unwrap();
        dataset.revert(edit);
        assert_eq!(render(&dataset), original);
    }
}
