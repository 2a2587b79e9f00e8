//! mfu-form: Upload form controller (sans-IO).
//!
//! Drives a popup upload form: drag-over state, file intake from drops
//! and file-input changes, and the two upload-policy queries (max file
//! size, allowed mime types) issued whenever the popup becomes active.
//!
//! This crate has **no browser dependencies** -- it talks to the page
//! through the [`FormSurface`] trait and to the upload service through
//! [`PolicyProvider`]. All DOM and Dioxus interaction lives in `mfu-io`.

pub mod accept;
pub mod events;
pub mod format;
pub mod label;
pub mod policy;
pub mod selection;
pub mod surface;
pub mod types;
pub mod view;

pub use events::{DomEventKind, Handler, Target};
pub use format::format_file_size;
pub use label::LimitTemplate;
pub use policy::{FileMeta, PolicyProvider, PolicyQuery, PolicySnapshot, PolicyViolation};
pub use selection::{FileSelection, IntakeSource};
pub use surface::FormSurface;
pub use types::{FileInfo, FormConfig, FormError, SizeUnits};
pub use view::{
    ActiveChange, Dispatched, DropCallback, FormTemplate, IntakeOutcome, SizeFormatter,
    UploadFormView, UploadFormViewBuilder,
};
