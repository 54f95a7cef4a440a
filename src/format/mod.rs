//! Persistence for the two labelling files.
//!
//! - **Dataset**: a CSV table with a `URL` column, rewritten in place with
//!   `Label` and `Last Modified Time` filled in as rows are labelled.
//! - **Taxonomy**: a JSON array of label names, rewritten whenever a label
//!   is added or removed.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use imlabel::format::{Dataset, load_taxonomy};
//!
//! let dataset = Dataset::load(Path::new("image_urls.csv"))?;
//! let taxonomy = load_taxonomy(Path::new("label_classes.json"))?;
//! ```

mod dataset;
mod error;
mod taxonomy;

pub use dataset::Dataset;
pub use error::FormatError;
pub use taxonomy::{load_taxonomy, parse_taxonomy, save_taxonomy};
