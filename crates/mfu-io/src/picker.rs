//! Native file picker trigger.
//!
//! Browsers only open the file dialog from an `<input type="file">`,
//! so the "select files" button clicks the hidden input on the user's
//! behalf. Requires a browser environment and a user-gesture context.

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;

/// Errors that can occur when opening the file picker.
#[derive(Debug, thiserror::Error)]
pub enum PickerError {
    /// A browser API call failed or a required object was missing.
    #[error("file picker error: {0}")]
    JsError(String),
}

impl From<JsValue> for PickerError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Click the element with id `input_id`, opening the file dialog.
///
/// # Errors
///
/// Returns [`PickerError::JsError`] if the window, document or element
/// is unavailable, or if the element is not an `HtmlElement`.
pub fn open_file_picker(input_id: &str) -> Result<(), PickerError> {
    let window = web_sys::window().ok_or_else(|| PickerError::JsError("no global window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| PickerError::JsError("no document".into()))?;

    let input: web_sys::HtmlElement = document
        .get_element_by_id(input_id)
        .ok_or_else(|| PickerError::JsError(format!("no element with id {input_id:?}")))?
        .dyn_into::<web_sys::HtmlElement>()
        .map_err(|e| PickerError::JsError(format!("failed to cast element: {e:?}")))?;

    input.click();
    Ok(())
}
