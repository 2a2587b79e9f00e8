//! Shared types for the mfu upload form.

use serde::{Deserialize, Serialize};

use crate::label::LimitTemplate;
use crate::policy::FileMeta;

/// Default id of the hidden file input element.
pub const DEFAULT_INPUT_ID: &str = "mfu-files";

/// Unit system used when formatting file sizes for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeUnits {
    /// Powers of 1024 (`KB`, `MB`, ...).
    #[default]
    Binary,
    /// Powers of 1000 (`kB`, `MB`, ...).
    Decimal,
}

impl SizeUnits {
    /// Multiplier between consecutive units.
    #[must_use]
    pub const fn base(self) -> u64 {
        match self {
            Self::Binary => 1024,
            Self::Decimal => 1000,
        }
    }

    /// Unit suffixes from bytes upward.
    #[must_use]
    pub const fn suffixes(self) -> &'static [&'static str] {
        match self {
            Self::Binary => &["B", "KB", "MB", "GB", "TB"],
            Self::Decimal => &["B", "kB", "MB", "GB", "TB"],
        }
    }
}

/// Configuration for an upload form.
///
/// Everything here is fixed once the view is built; in particular the
/// max-file-size template is read-only for the lifetime of the view.
/// Missing fields fall back to their defaults when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Label template for the size limit; the first `{filesize}` is
    /// replaced with the formatted limit.
    pub max_file_size_text: String,

    /// Id of the hidden `<input type="file">` element.
    pub input_id: String,

    /// Units used by the default size formatter.
    pub size_units: SizeUnits,

    /// Caption of the "select files" trigger button.
    pub select_files_text: String,

    /// Hint shown inside the drop zone.
    pub drop_hint_text: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            max_file_size_text: LimitTemplate::DEFAULT.to_owned(),
            input_id: DEFAULT_INPUT_ID.to_owned(),
            size_units: SizeUnits::default(),
            select_files_text: "Select files".to_owned(),
            drop_hint_text: "Drag and drop files here or".to_owned(),
        }
    }
}

impl FormConfig {
    /// Check the configuration for values the form cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidConfig`] if `input_id` or
    /// `max_file_size_text` is empty, or if `input_id` contains
    /// whitespace (it is used as a DOM id).
    pub fn validate(&self) -> Result<(), FormError> {
        if self.input_id.is_empty() {
            return Err(FormError::InvalidConfig("input_id must not be empty".into()));
        }
        if self.input_id.chars().any(char::is_whitespace) {
            return Err(FormError::InvalidConfig(format!(
                "input_id must not contain whitespace, got {:?}",
                self.input_id
            )));
        }
        if self.max_file_size_text.is_empty() {
            return Err(FormError::InvalidConfig(
                "max_file_size_text must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Errors produced by the upload form controller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// The drop callback is write-once and was already bound at construction.
    #[error("onDropCallback is write-once and already bound")]
    CallbackAlreadyBound,

    /// The form configuration is invalid.
    #[error("invalid form configuration: {0}")]
    InvalidConfig(String),
}

/// Plain description of a picked file.
///
/// Used by hosts that have no richer file handle, and throughout the
/// tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    /// File name as reported by the browser.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Mime type, if the browser could determine one.
    pub mime_type: Option<String>,
}

impl FileInfo {
    /// Create a new file description.
    #[must_use]
    pub fn new(name: impl Into<String>, size: u64, mime_type: Option<&str>) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: mime_type.map(str::to_owned),
        }
    }
}

impl FileMeta for FileInfo {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn mime_type(&self) -> Option<String> {
        self.mime_type.clone()
    }
}
