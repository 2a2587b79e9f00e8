//! File selection events.

/// Where a [`FileSelection`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntakeSource {
    /// Files dropped on the form container.
    Drop,
    /// `input` event on the file input.
    Input,
    /// `change` event on the file input.
    Change,
    /// Synthesized by host code and passed to `upload_files`.
    Programmatic,
}

/// A transient file-selection event.
///
/// Carries the transfer-object file list (drops) and/or the input
/// element's file list (picker). Generic over the host's file handle
/// type so the controller never touches browser objects.
#[derive(Debug, Clone, PartialEq)]
pub struct FileSelection<F> {
    source: IntakeSource,
    transfer_files: Option<Vec<F>>,
    target_files: Option<Vec<F>>,
}

impl<F> FileSelection<F> {
    /// A drop whose transfer object carries `files`.
    #[must_use]
    pub const fn from_drop(files: Vec<F>) -> Self {
        Self {
            source: IntakeSource::Drop,
            transfer_files: Some(files),
            target_files: None,
        }
    }

    /// An `input` or `change` event whose input element holds `files`.
    #[must_use]
    pub const fn from_input(source: IntakeSource, files: Vec<F>) -> Self {
        Self {
            source,
            transfer_files: None,
            target_files: Some(files),
        }
    }

    /// An event built by host code with both lists spelled out.
    #[must_use]
    pub const fn programmatic(transfer_files: Option<Vec<F>>, target_files: Option<Vec<F>>) -> Self {
        Self {
            source: IntakeSource::Programmatic,
            transfer_files,
            target_files,
        }
    }

    /// An event carrying no file lists at all.
    #[must_use]
    pub const fn empty(source: IntakeSource) -> Self {
        Self {
            source,
            transfer_files: None,
            target_files: None,
        }
    }

    /// The event's origin.
    #[must_use]
    pub const fn source(&self) -> IntakeSource {
        self.source
    }

    /// The files carried by the event.
    ///
    /// A non-empty transfer list wins; otherwise the input element's
    /// list is used. Empty when neither holds anything.
    #[must_use]
    pub fn files(&self) -> &[F] {
        match (&self.transfer_files, &self.target_files) {
            (Some(transfer), _) if !transfer.is_empty() => transfer,
            (_, Some(target)) => target,
            _ => &[],
        }
    }

    /// Whether the event carries at least one file.
    #[must_use]
    pub fn has_file_data(&self) -> bool {
        !self.files().is_empty()
    }

    /// Consume the event, returning its files.
    #[must_use]
    pub fn into_files(self) -> Vec<F> {
        match (self.transfer_files, self.target_files) {
            (Some(transfer), _) if !transfer.is_empty() => transfer,
            (_, Some(target)) => target,
            _ => Vec::new(),
        }
    }
}
