//! The rendering surface driven by the form controller.

/// The DOM subtree owned by one upload form.
///
/// The controller never stores visual state itself: drag-over is
/// whatever the surface says it is (class presence on the container in
/// the browser). Methods take `&self`; implementations use interior
/// mutability, matching the single-threaded event loop they run on.
pub trait FormSurface {
    /// Add (`true`) or remove (`false`) the drag-over state class.
    fn set_drag_over(&self, drag_over: bool);

    /// Whether the drag-over state class is present.
    fn is_drag_over(&self) -> bool;

    /// Set the file input's `accept` attribute, or remove it on `None`.
    fn set_accept(&self, accept: Option<&str>);

    /// Replace the max-file-size info label text.
    fn set_limit_label(&self, text: &str);

    /// Open the native file picker by clicking the hidden file input.
    fn open_file_picker(&self);
}
