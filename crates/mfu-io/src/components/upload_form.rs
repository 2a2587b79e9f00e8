//! Upload form popup with drag-and-drop and file picker.

use std::rc::Rc;

use dioxus::html::HasFileData;
use dioxus::logger::tracing::{debug, error, warn};
use dioxus::prelude::*;
use mfu_form::{
    DomEventKind, FileSelection, FormConfig, FormError, IntakeSource, Target, UploadFormView,
};

use crate::policy::PolicyHandle;
use crate::surface::{PickedFile, SignalSurface};
use crate::window::DefaultPreventionGuard;

/// Class of the drop zone container.
const CLASS_FORM: &str = "mfu-form__container";

/// State class added while files are dragged over the container.
const CLASS_DRAGOVER: &str = "mfu-form__container--drag-over";

type FormView = UploadFormView<SignalSurface, PickedFile>;

/// Class list of the drop zone container.
#[must_use]
pub fn container_class(drag_over: bool) -> String {
    if drag_over {
        format!("{CLASS_FORM} {CLASS_DRAGOVER}")
    } else {
        CLASS_FORM.to_owned()
    }
}

/// Props for the [`UploadForm`] component.
#[derive(Props, Clone, PartialEq)]
pub struct UploadFormProps {
    /// Whether the popup is shown. Every change to `true` asks the
    /// policy provider for the size limit and allowed mime types.
    active: bool,

    /// Called with each selection that carries files. Captured on the
    /// first render; later values are ignored. Accepts everything when
    /// absent.
    on_drop: Option<Callback<FileSelection<PickedFile>, bool>>,

    /// Form configuration, fixed on the first render like `on_drop`.
    #[props(default)]
    config: FormConfig,
}

/// The upload form popup.
///
/// Files can be dropped on the dashed zone or picked through the
/// "select files" button. The policy provider is taken from a
/// [`PolicyHandle`] in context; without one the size label stays empty
/// and no accept filter is set.
#[component]
pub fn UploadForm(props: UploadFormProps) -> Element {
    let drag_over = use_signal(|| false);
    let accept = use_signal(|| Option::<String>::None);
    let limit_label = use_signal(String::new);
    let policy = try_use_context::<PolicyHandle>();

    let UploadFormProps {
        active,
        on_drop,
        config,
    } = props;

    let view = use_hook(move || build_view(drag_over, accept, limit_label, config, on_drop));

    // Lives as long as the form; dropping the hook unregisters the
    // window listeners.
    use_hook(|| match DefaultPreventionGuard::install() {
        Ok(guard) => Some(Rc::new(guard)),
        Err(e) => {
            warn!("window drop guard not installed: {e}");
            None
        }
    });

    let effect_view = view.clone();
    use_effect(use_reactive((&active,), move |(active,)| {
        let Ok(view) = &effect_view else {
            return;
        };
        for query in view.set_active(active) {
            match &policy {
                Some(handle) => query.dispatch(handle.provider()),
                None => warn!(
                    event = query.event_name(),
                    "no policy provider in context, query dropped"
                ),
            }
        }
    }));

    let view = match view {
        Ok(view) => view,
        Err(e) => {
            return rsx! {
                p { class: "mfu-form__error", "Upload form unavailable: {e}" }
            };
        }
    };
    let template = view.render();

    rsx! {
        form {
            class: "mfu-form",
            onsubmit: move |evt: FormEvent| evt.prevent_default(),

            div {
                class: container_class(drag_over()),
                ondragenter: bind(&view, Target::FormContainer, DomEventKind::DragEnter, no_files),
                ondragover: bind(&view, Target::FormContainer, DomEventKind::DragOver, no_files),
                ondragleave: bind(&view, Target::FormContainer, DomEventKind::DragLeave, no_files),
                ondrop: bind(&view, Target::FormContainer, DomEventKind::Drop, dropped_files),

                p { class: "mfu-form__hint", "{template.drop_hint_text}" }

                button {
                    r#type: "button",
                    class: "mfu-form___btn--select-files",
                    onclick: bind(&view, Target::SelectFilesButton, DomEventKind::Tap, no_click_files),
                    "{template.select_files_text}"
                }

                // Departs from the event table, which routes both
                // `input` and `change` on the file input to intake.
                // Browsers fire both for one pick, so only `change` is
                // wired and each pick reaches the callback once.
                input {
                    r#type: "file",
                    id: "{template.input_id}",
                    class: "mfu-form__input",
                    multiple: template.multiple,
                    accept: accept(),
                    onchange: bind(&view, Target::FileInput, DomEventKind::Change, picked_files),
                }

                p { class: "mfu-form__limit-info", "{limit_label}" }
            }
        }
    }
}

/// Build the controller on first render.
fn build_view(
    drag_over: Signal<bool>,
    accept: Signal<Option<String>>,
    limit_label: Signal<String>,
    config: FormConfig,
    on_drop: Option<Callback<FileSelection<PickedFile>, bool>>,
) -> Result<Rc<FormView>, FormError> {
    let surface = SignalSurface::new(drag_over, accept, limit_label, config.input_id.clone());
    let mut builder = UploadFormView::builder(surface).config(config);
    if let Some(on_drop) = on_drop {
        builder = builder.on_drop(move |selection: &FileSelection<PickedFile>| {
            on_drop.call(selection.clone())
        });
    }
    builder.build().map(Rc::new).inspect_err(|e| {
        error!("cannot build upload form: {e}");
    })
}

/// Wrap a DOM event so it is routed through the form's event table.
fn bind<T: 'static>(
    view: &Rc<FormView>,
    target: Target,
    kind: DomEventKind,
    selection: fn(&Event<T>) -> FileSelection<PickedFile>,
) -> impl FnMut(Event<T>) + 'static {
    let view = Rc::clone(view);
    move |evt: Event<T>| {
        // Without this the browser refuses the drop or opens the file.
        if matches!(
            kind,
            DomEventKind::DragEnter | DomEventKind::DragOver | DomEventKind::Drop
        ) {
            evt.prevent_default();
        }
        let outcome = view.dispatch(target, kind, &selection(&evt));
        debug!(?target, %kind, ?outcome, "upload form event");
    }
}

fn no_files(_: &DragEvent) -> FileSelection<PickedFile> {
    FileSelection::empty(IntakeSource::Drop)
}

fn no_click_files(_: &MouseEvent) -> FileSelection<PickedFile> {
    FileSelection::empty(IntakeSource::Programmatic)
}

fn dropped_files(evt: &DragEvent) -> FileSelection<PickedFile> {
    FileSelection::from_drop(evt.files().into_iter().map(PickedFile::new).collect())
}

fn picked_files(evt: &FormEvent) -> FileSelection<PickedFile> {
    FileSelection::from_input(
        IntakeSource::Change,
        evt.files().into_iter().map(PickedFile::new).collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_class_tracks_drag_state() {
        assert_eq!(container_class(false), "mfu-form__container");
        assert_eq!(
            container_class(true),
            "mfu-form__container mfu-form__container--drag-over"
        );
    }
}
