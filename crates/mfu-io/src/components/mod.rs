//! Dioxus UI components for mfu.
//!
//! Provides the upload form popup and the stylesheet it renders with.

mod upload_form;

pub use upload_form::{UploadForm, container_class};

/// Stylesheet for [`UploadForm`]; hosts inline it with
/// `style { dangerous_inner_html: FORM_CSS }`.
pub const FORM_CSS: &str = include_str!("../../assets/upload_form.css");
