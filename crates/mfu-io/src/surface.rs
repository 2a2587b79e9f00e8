//! Signal-backed form surface and the browser file handle.

use std::fmt;

use dioxus::html::FileData;
use dioxus::logger::tracing::{debug, warn};
use dioxus::prelude::*;
use mfu_form::{FileMeta, FormSurface};

use crate::picker;

/// A file picked or dropped in the browser.
#[derive(Clone)]
pub struct PickedFile(FileData);

impl PickedFile {
    /// Wrap a Dioxus file handle.
    #[must_use]
    pub const fn new(file: FileData) -> Self {
        Self(file)
    }

    /// The underlying handle, for reading the file's contents.
    #[must_use]
    pub const fn file(&self) -> &FileData {
        &self.0
    }

    /// Consume the wrapper.
    #[must_use]
    pub fn into_inner(self) -> FileData {
        self.0
    }
}

impl FileMeta for PickedFile {
    fn name(&self) -> String {
        self.0.name()
    }

    fn size(&self) -> u64 {
        self.0.size()
    }

    fn mime_type(&self) -> Option<String> {
        self.0.content_type()
    }
}

impl fmt::Debug for PickedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickedFile")
            .field("name", &self.0.name())
            .field("size", &self.0.size())
            .finish()
    }
}

/// [`FormSurface`] writing into the signals the form renders from.
///
/// Signals are `Copy` handles, so the surface can be cloned into reply
/// callbacks that fire long after the render that created it.
#[derive(Clone, PartialEq)]
pub struct SignalSurface {
    drag_over: Signal<bool>,
    accept: Signal<Option<String>>,
    limit_label: Signal<String>,
    input_id: String,
}

impl SignalSurface {
    /// Create a surface over the given signals; `input_id` is the id of
    /// the hidden file input.
    #[must_use]
    pub const fn new(
        drag_over: Signal<bool>,
        accept: Signal<Option<String>>,
        limit_label: Signal<String>,
        input_id: String,
    ) -> Self {
        Self {
            drag_over,
            accept,
            limit_label,
            input_id,
        }
    }
}

/// Store `value` in `signal` unless its owning scope is gone.
///
/// Policy replies may arrive after the form unmounted; their writes are
/// dropped.
fn write_if_alive<T: 'static>(mut signal: Signal<T>, what: &str, value: T) {
    match signal.try_write() {
        Ok(mut slot) => *slot = value,
        Err(e) => debug!(what, error = ?e, "upload form surface gone, update ignored"),
    }
}

impl FormSurface for SignalSurface {
    fn set_drag_over(&self, drag_over: bool) {
        // dragover fires continuously; skip writes that change nothing
        // so the form does not re-render on every mouse move.
        let unchanged = self
            .drag_over
            .try_peek()
            .is_ok_and(|current| *current == drag_over);
        if !unchanged {
            write_if_alive(self.drag_over, "drag_over", drag_over);
        }
    }

    fn is_drag_over(&self) -> bool {
        self.drag_over.try_peek().is_ok_and(|current| *current)
    }

    fn set_accept(&self, accept: Option<&str>) {
        write_if_alive(self.accept, "accept", accept.map(str::to_owned));
    }

    fn set_limit_label(&self, text: &str) {
        write_if_alive(self.limit_label, "limit_label", text.to_owned());
    }

    fn open_file_picker(&self) {
        if let Err(e) = picker::open_file_picker(&self.input_id) {
            warn!("cannot open file picker: {e}");
        }
    }
}
