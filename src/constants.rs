//! Global constants for the imlabel application

/// Dataset file opened when no other path is configured
pub const DEFAULT_DATASET_FILE: &str = "image_urls.csv";

/// Label taxonomy file opened when no other path is configured
pub const DEFAULT_TAXONOMY_FILE: &str = "label_classes.json";

/// Column holding the image URL (required)
pub const URL_COLUMN: &str = "URL";

/// Column holding the assigned label
pub const LABEL_COLUMN: &str = "Label";

/// Column holding the time a label was last saved
pub const MODIFIED_COLUMN: &str = "Last Modified Time";

/// Format of the last-modified timestamp written to the dataset
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Side length of the square the current image is resized to
pub const DEFAULT_DISPLAY_SIZE: u32 = 400;

/// Number of label buttons per grid row
pub const DEFAULT_GRID_COLUMNS: usize = 5;

/// Upper bound on a single downloaded image body
pub const MAX_IMAGE_BYTES: u64 = 64 * 1024 * 1024;
