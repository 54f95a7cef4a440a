//! Label taxonomy: the editable, ordered set of valid label names.

/// Ordered set of unique label names.
///
/// Order matters: it decides button placement and which hotkey a label gets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Taxonomy {
    labels: Vec<String>,
}

impl Taxonomy {
    /// Create an empty taxonomy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a taxonomy from stored names, kept exactly as given.
    ///
    /// Only the first occurrence of a duplicate is kept.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut taxonomy = Self::new();
        for label in labels {
            let label = label.as_ref();
            if !taxonomy.contains(label) {
                taxonomy.labels.push(label.to_string());
            }
        }
        taxonomy
    }

    /// Append a label. Returns `false` (and changes nothing) when the name
    /// is empty or already present. Callers trim operator input first.
    pub fn add(&mut self, name: &str) -> bool {
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.labels.push(name.to_string());
        true
    }

    /// Remove a label. Returns `false` if it was not present.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(index) => {
                self.labels.remove(index);
                true
            }
            None => false,
        }
    }

    /// Re-insert a label at a given position, clamped to the end.
    ///
    /// Used to roll back a removal whose save failed.
    pub(crate) fn insert(&mut self, index: usize, name: String) {
        if self.contains(&name) {
            return;
        }
        let index = index.min(self.labels.len());
        self.labels.insert(index, name);
    }

    /// Check whether a label is present.
    pub fn contains(&self, name: &str) -> bool {
        self.labels.iter().any(|label| label == name)
    }

    /// Position of a label, if present.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.labels.iter().position(|label| label == name)
    }

    /// Label at a position.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True when there are no labels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterate labels in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    /// Labels as a slice, in order.
    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }
}
