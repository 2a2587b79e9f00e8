//! mfu-io: Browser I/O and Dioxus component library.
//!
//! Renders the upload form popup, backs the form controller's surface
//! with Dioxus signals, clicks the hidden file input, and keeps the
//! browser from navigating away when files are dropped outside the
//! drop zone.

pub mod components;
pub mod picker;
pub mod policy;
pub mod surface;
pub mod window;

pub use components::{FORM_CSS, UploadForm};
pub use policy::PolicyHandle;
pub use surface::{PickedFile, SignalSurface};
pub use window::DefaultPreventionGuard;
