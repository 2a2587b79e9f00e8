//! Static DOM event table for the upload form.
//!
//! Every (target, event kind) pair the form reacts to maps to exactly
//! one [`Handler`]. The table is resolved with a plain lookup; there is
//! no name-based dispatch at runtime.

use std::fmt;

/// Elements of the form that carry event bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// The "select files" button.
    SelectFilesButton,
    /// The hidden `<input type="file">`.
    FileInput,
    /// The drop zone container.
    FormContainer,
}

/// DOM events the form listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomEventKind {
    Tap,
    Input,
    Change,
    DragEnter,
    DragOver,
    DragLeave,
    Drop,
}

impl DomEventKind {
    /// The DOM event name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tap => "tap",
            Self::Input => "input",
            Self::Change => "change",
            Self::DragEnter => "dragenter",
            Self::DragOver => "dragover",
            Self::DragLeave => "dragleave",
            Self::Drop => "drop",
        }
    }
}

impl fmt::Display for DomEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Form operations an event can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handler {
    /// Open the native file picker.
    SelectFiles,
    /// Forward the event's files to the drop callback.
    UploadFiles,
    /// Mark the container as dragged over.
    SetDragState,
    /// Clear the dragged-over mark.
    RemoveDragState,
}

/// The full binding table.
pub const EVENT_TABLE: &[(Target, DomEventKind, Handler)] = &[
    (Target::SelectFilesButton, DomEventKind::Tap, Handler::SelectFiles),
    (Target::FileInput, DomEventKind::Input, Handler::UploadFiles),
    (Target::FileInput, DomEventKind::Change, Handler::UploadFiles),
    (Target::FormContainer, DomEventKind::DragEnter, Handler::SetDragState),
    (Target::FormContainer, DomEventKind::DragOver, Handler::SetDragState),
    (Target::FormContainer, DomEventKind::DragLeave, Handler::RemoveDragState),
    (Target::FormContainer, DomEventKind::Drop, Handler::UploadFiles),
];

/// Look up the handler bound to `kind` on `target`.
#[must_use]
pub fn handler_for(target: Target, kind: DomEventKind) -> Option<Handler> {
    EVENT_TABLE
        .iter()
        .find(|(t, k, _)| *t == target && *k == kind)
        .map(|&(_, _, handler)| handler)
}
