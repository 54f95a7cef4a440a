//! UI building modules for imlabel.
//!
//! Each module contains `impl LabelingApp` blocks that extend the main
//! application struct with UI building methods.

mod central;
mod dialogs;
mod image_panel;
mod keyboard;
mod label_panel;
mod navigation;
mod topbar;

pub use dialogs::Dialog;
