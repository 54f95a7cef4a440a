//! imlabel application: one image at a time, one label per row.
//!
//! Layout, top to bottom:
//! - Top bar: file pickers, theme toggle, overall progress
//! - Center: image panel, "Image N of M" caption, label entry and
//!   selection controls, label button grid
//! - Bottom: Previous / Save & Next / Next
//!
//! The view collects `Message`s each frame and `handle` applies them after
//! the frame is built. Image fetching is blocking and happens at the start
//! of the frame following a cursor move.

use std::path::PathBuf;

use eframe::egui::{self, ColorImage, TextureHandle, TextureOptions, ViewportCommand};

use crate::config::AppConfig;
use crate::data::{DecodedImage, FetchError, HttpFetcher, ImageLoader};
use crate::keybindings::KeyBindings;
use crate::message::Message;
use crate::state::{LabelingSession, Navigation, RemoveOutcome, SaveOutcome};
use crate::theme::Theme;
use crate::ui::Dialog;

/// Main application state.
pub struct LabelingApp {
    pub(crate) config: AppConfig,
    /// Where config changes are written; None disables persistence
    pub(crate) config_path: Option<PathBuf>,
    pub(crate) keybindings: KeyBindings,
    pub(crate) theme: Theme,
    pub(crate) loader: ImageLoader,

    pub(crate) session: Option<LabelingSession>,

    pub(crate) texture: Option<TextureHandle>,
    pub(crate) image_error: Option<String>,
    pub(crate) pending_image_load: bool,

    pub(crate) new_label_text: String,
    pub(crate) entry_has_focus: bool,
    pub(crate) entry_submitted: bool,

    pub(crate) dialog: Option<Dialog>,
    pub(crate) status: Option<String>,
    pub(crate) visuals_dirty: bool,
    pub(crate) quit_requested: bool,
}

impl LabelingApp {
    /// Create the application and open the configured files.
    pub fn new(config: AppConfig, config_path: Option<PathBuf>) -> Self {
        let mut app = Self::without_session(config, config_path);
        app.open_session();
        app
    }

    pub(crate) fn without_session(config: AppConfig, config_path: Option<PathBuf>) -> Self {
        let keybindings = config.keybindings.to_keybindings();
        let theme = Theme::from_dark(config.preferences.dark_theme);
        let loader = ImageLoader::new(config.preferences.display_size);

        Self {
            config,
            config_path,
            keybindings,
            theme,
            loader,
            session: None,
            texture: None,
            image_error: None,
            pending_image_load: false,
            new_label_text: String::new(),
            entry_has_focus: false,
            entry_submitted: false,
            dialog: None,
            status: None,
            visuals_dirty: true,
            quit_requested: false,
        }
    }

    /// Create the application around an already opened session.
    pub fn with_session(config: AppConfig, session: LabelingSession) -> Self {
        let mut app = Self::without_session(config, None);
        app.session = Some(session);
        app.pending_image_load = true;
        app
    }

    /// (Re)open the session from the configured file paths.
    fn open_session(&mut self) {
        let dataset = self.config.paths.dataset.clone();
        let taxonomy = self.config.paths.taxonomy.clone();

        self.session = None;
        self.texture = None;
        self.image_error = None;

        match LabelingSession::open(&dataset, &taxonomy, Box::new(HttpFetcher)) {
            Ok(session) => {
                self.status = Some(format!(
                    "Opened {} ({} rows, {} labels)",
                    dataset.display(),
                    session.len(),
                    session.taxonomy().len()
                ));
                self.session = Some(session);
                self.pending_image_load = true;
            }
            Err(e) => {
                log::error!("Failed to open dataset {:?}: {}", dataset, e);
                self.report_error(format!("Could not open {}: {}", dataset.display(), e));
            }
        }
    }

    fn report_error(&mut self, message: String) {
        self.status = Some(message.clone());
        self.dialog = Some(Dialog::Error(message));
    }

    fn save_config(&self) {
        let Some(path) = &self.config_path else {
            return;
        };
        if let Err(e) = self.config.save_to(path) {
            log::warn!("Failed to save configuration: {}", e);
        }
    }

    /// Apply a message to the application state.
    pub fn handle(&mut self, message: Message) {
        match message {
            // TopBar
            Message::OpenDataset => {
                log::info!("Open dataset requested");
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("CSV", &["csv"])
                    .pick_file()
                {
                    self.config.paths.dataset = path;
                    self.save_config();
                    self.open_session();
                }
            }
            Message::OpenTaxonomy => {
                log::info!("Open label file requested");
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("JSON", &["json"])
                    .pick_file()
                {
                    self.config.paths.taxonomy = path;
                    self.save_config();
                    self.open_session();
                }
            }
            Message::ToggleTheme => {
                self.theme = self.theme.toggled();
                self.config.preferences.dark_theme = self.theme.is_dark();
                self.visuals_dirty = true;
                self.save_config();
            }

            // Navigation
            Message::PrevImage => {
                if let Some(session) = &mut self.session {
                    if session.prev() == Navigation::Moved {
                        self.pending_image_load = true;
                    }
                }
            }
            Message::NextImage => {
                if let Some(session) = &mut self.session {
                    match session.next() {
                        Navigation::Moved => self.pending_image_load = true,
                        Navigation::AtEnd => self.dialog = Some(Dialog::LastImage),
                        Navigation::AtStart | Navigation::Empty => {}
                    }
                }
            }
            Message::SaveAndNext => {
                let Some(session) = &mut self.session else {
                    return;
                };
                match session.save_and_next() {
                    Ok(SaveOutcome::Advanced) => {
                        self.status = None;
                        self.pending_image_load = true;
                    }
                    Ok(SaveOutcome::Finished) => self.dialog = Some(Dialog::Finished),
                    Ok(SaveOutcome::NothingSelected) => {
                        self.dialog = Some(Dialog::NothingSelected)
                    }
                    Ok(SaveOutcome::Empty) => {}
                    Err(e) => self.report_error(format!("Could not save dataset: {}", e)),
                }
            }

            // Labels
            Message::LabelSelected(name) => {
                if let Some(session) = &mut self.session {
                    session.select_label(&name);
                }
            }
            Message::LabelHotkey(index) => {
                if let Some(session) = &mut self.session {
                    session.select_by_index(index);
                }
            }
            Message::AddLabel => {
                let Some(session) = &mut self.session else {
                    return;
                };
                match session.add_label(&self.new_label_text) {
                    Ok(true) => self.new_label_text.clear(),
                    Ok(false) => {}
                    Err(e) => self.report_error(format!("Could not save labels: {}", e)),
                }
            }
            Message::RemoveSelectedLabel => {
                let Some(session) = &mut self.session else {
                    return;
                };
                let selected = session
                    .selected_label()
                    .filter(|name| session.taxonomy().contains(name))
                    .map(str::to_string);
                match selected {
                    Some(name) if self.config.preferences.confirm_label_removal => {
                        self.dialog = Some(Dialog::ConfirmRemove(name));
                    }
                    Some(name) => self.remove_label(&name),
                    None => self.dialog = Some(Dialog::NotInTaxonomy),
                }
            }

            // Dialogs
            Message::ConfirmRemoveLabel(name) => {
                self.dialog = None;
                self.remove_label(&name);
            }
            Message::DismissDialog => {
                if self.dialog == Some(Dialog::Finished) {
                    self.quit_requested = true;
                }
                self.dialog = None;
            }
        }
    }

    fn remove_label(&mut self, name: &str) {
        let Some(session) = &mut self.session else {
            return;
        };
        if session.selected_label() != Some(name) {
            log::warn!("Selection changed before removing {:?}", name);
            self.dialog = Some(Dialog::NotInTaxonomy);
            return;
        }
        match session.remove_selected_label() {
            Ok(RemoveOutcome::Removed(removed)) => {
                self.status = Some(format!("Removed label '{}'", removed));
            }
            Ok(RemoveOutcome::NotInTaxonomy) => self.dialog = Some(Dialog::NotInTaxonomy),
            Err(e) => self.report_error(format!("Could not save labels: {}", e)),
        }
    }

    /// Fetch and decode the image under the cursor.
    pub(crate) fn decode_current_image(&self) -> Option<Result<DecodedImage, FetchError>> {
        let session = self.session.as_ref()?;
        let fetched = session.fetch_current_image()?;
        Some(fetched.and_then(|bytes| self.loader.load(&bytes)))
    }

    fn load_current_image(&mut self, ctx: &egui::Context) {
        self.pending_image_load = false;
        self.texture = None;
        self.image_error = None;

        match self.decode_current_image() {
            Some(Ok(decoded)) => {
                let size = [decoded.width as usize, decoded.height as usize];
                let color_image = ColorImage::from_rgba_unmultiplied(size, &decoded.rgba);
                self.texture =
                    Some(ctx.load_texture("current-image", color_image, TextureOptions::LINEAR));
            }
            Some(Err(e)) => {
                let url = self
                    .session
                    .as_ref()
                    .and_then(|s| s.current_row())
                    .map(|row| row.url.clone())
                    .unwrap_or_default();
                log::error!("Failed to load image {}: {}", url, e);
                self.image_error = Some(e.to_string());
            }
            None => {}
        }
    }
}

impl eframe::App for LabelingApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.visuals_dirty {
            ctx.set_visuals(self.theme.visuals());
            self.visuals_dirty = false;
        }
        if self.pending_image_load {
            self.load_current_image(ctx);
        }

        let mut messages = Vec::new();
        self.entry_submitted = false;

        self.build_topbar(ctx, &mut messages);
        self.build_navigation(ctx, &mut messages);
        self.build_central(ctx, &mut messages);
        self.build_dialog(ctx, &mut messages);
        self.collect_key_messages(ctx, &mut messages);

        for message in messages {
            log::trace!("Message: {:?}", message);
            self.handle(message);
        }

        if self.quit_requested {
            ctx.send_viewport_cmd(ViewportCommand::Close);
        }
        if self.pending_image_load || self.visuals_dirty {
            ctx.request_repaint();
        }
    }
}
