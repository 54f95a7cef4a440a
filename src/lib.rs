//! imlabel - image labelling tool
//!
//! A desktop tool for assigning one class label to each row of a CSV
//! dataset of image URLs. The operator sees one image at a time, picks a
//! label from an editable taxonomy, and every decision is written straight
//! back to the CSV.

mod app;
pub mod config;
pub mod constants;
pub mod data;
pub mod format;
pub mod keybindings;
mod message;
pub mod model;
pub mod state;
mod theme;
mod ui;
pub mod ui_constants;

pub use app::LabelingApp;
pub use message::Message;
