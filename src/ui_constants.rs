//! UI constants for consistent styling across the application.

/// Text size constants.
pub mod text {
    /// Captions, buttons and the label entry
    pub const BODY: f32 = 14.0;
    /// Status line under the top bar
    pub const SMALL: f32 = 12.0;
    /// Placeholder heading when nothing is loaded
    pub const HEADING: f32 = 20.0;
}

/// Spacing constants for consistent layout.
pub mod spacing {
    /// Tight spacing for compact elements
    pub const TIGHT: f32 = 5.0;
    /// Standard spacing between related elements
    pub const STANDARD: f32 = 10.0;
    /// Large spacing between major sections
    pub const LARGE: f32 = 20.0;
}

/// Button dimension constants.
pub mod button {
    /// Navigation buttons (Previous / Next)
    pub const NAV_WIDTH: f32 = 110.0;
    /// Save & Next button
    pub const SAVE_WIDTH: f32 = 160.0;
    /// Height of navigation buttons
    pub const HEIGHT: f32 = 32.0;
    /// Minimum width of a label button in the grid
    pub const LABEL_MIN_WIDTH: f32 = 120.0;
}

/// Text entry constants.
pub mod input {
    /// Width of the new-label entry
    pub const NEW_LABEL_WIDTH: f32 = 200.0;
}

/// Window constants.
pub mod window {
    /// Initial window size
    pub const DEFAULT_SIZE: [f32; 2] = [900.0, 860.0];
    /// Smallest window size
    pub const MIN_SIZE: [f32; 2] = [560.0, 640.0];
    /// Window title
    pub const TITLE: &str = "Labeling Tool";
}
