//! Data models for the imlabel application.

mod row;
mod taxonomy;

pub use row::DatasetRow;
pub use taxonomy::Taxonomy;
