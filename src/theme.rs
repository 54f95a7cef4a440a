//! Theme system for imlabel.
//!
//! Provides dark and light theme support with the few accent colors the
//! labelling screen uses.

use eframe::egui::{Color32, Visuals};

/// Theme choice - dark or light mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeChoice {
    Dark,
    Light,
}

/// Application theme with color definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub choice: ThemeChoice,
}

impl Theme {
    /// Create a dark theme.
    pub fn dark() -> Self {
        Self {
            choice: ThemeChoice::Dark,
        }
    }

    /// Create a light theme.
    pub fn light() -> Self {
        Self {
            choice: ThemeChoice::Light,
        }
    }

    /// Pick a theme from the dark-theme preference.
    pub fn from_dark(dark: bool) -> Self {
        if dark { Self::dark() } else { Self::light() }
    }

    /// Whether this is the dark theme.
    pub fn is_dark(&self) -> bool {
        self.choice == ThemeChoice::Dark
    }

    /// The other theme.
    pub fn toggled(&self) -> Self {
        Self::from_dark(!self.is_dark())
    }

    /// egui visuals for this theme.
    pub fn visuals(&self) -> Visuals {
        match self.choice {
            ThemeChoice::Dark => Visuals::dark(),
            ThemeChoice::Light => Visuals::light(),
        }
    }

    /// Fill for the label button matching the current selection.
    pub fn selected_fill(&self) -> Color32 {
        match self.choice {
            ThemeChoice::Dark => Color32::from_rgb(40, 90, 140),
            ThemeChoice::Light => Color32::from_rgb(173, 216, 230),
        }
    }

    /// Text color for "Selected Label: None".
    pub fn missing_label_color(&self) -> Color32 {
        match self.choice {
            ThemeChoice::Dark => Color32::from_rgb(255, 100, 100),
            ThemeChoice::Light => Color32::from_rgb(200, 0, 0),
        }
    }

    /// Fill for the Save & Next button (same for both themes).
    pub fn save_fill(&self) -> Color32 {
        Color32::from_rgb(76, 175, 80)
    }

    /// Background behind the image panel.
    pub fn image_panel_fill(&self) -> Color32 {
        match self.choice {
            ThemeChoice::Dark => Color32::from_gray(30),
            ThemeChoice::Light => Color32::WHITE,
        }
    }

    /// Secondary text color (status line, hints).
    pub fn secondary_text_color(&self) -> Color32 {
        match self.choice {
            ThemeChoice::Dark => Color32::from_gray(150),
            ThemeChoice::Light => Color32::from_gray(100),
        }
    }
}
