//! Dataset row data model.

/// One row of the dataset: an image reference plus its labelling state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetRow {
    /// URL (or local path) of the image
    pub url: String,
    /// Assigned label, if any
    pub label: Option<String>,
    /// Time the label was last saved, if ever
    pub modified: Option<String>,
    /// Values of any other columns, in header order
    pub extra: Vec<String>,
}

impl DatasetRow {
    /// Whether the row still needs a label.
    pub fn is_unlabeled(&self) -> bool {
        self.label.is_none()
    }
}
