//! Application message types for imlabel.
//!
//! All UI events and actions are represented as messages in the Elm
//! architecture style: the view collects them, `update` applies them.

/// Messages that can be sent to update application state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // TopBar
    /// Pick a different dataset file
    OpenDataset,
    /// Pick a different taxonomy file
    OpenTaxonomy,
    /// Switch between dark and light theme
    ToggleTheme,

    // Navigation
    /// Navigate to previous image
    PrevImage,
    /// Navigate to next image
    NextImage,
    /// Save the selected label and advance
    SaveAndNext,

    // Labels
    /// Label button clicked
    LabelSelected(String),
    /// Label hotkey pressed (taxonomy position)
    LabelHotkey(usize),
    /// Add the text in the new-label entry and select it
    AddLabel,
    /// Remove the selected label (asks first when configured)
    RemoveSelectedLabel,

    // Dialogs
    /// Confirmed removal of a label
    ConfirmRemoveLabel(String),
    /// Close the open dialog
    DismissDialog,
}
