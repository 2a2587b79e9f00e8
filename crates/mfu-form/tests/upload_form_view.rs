//! Integration test: drive an upload form through activation, policy
//! replies, drag state and file intake against a recording surface.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use mfu_form::{
    DomEventKind, Dispatched, FileInfo, FileSelection, FormConfig, FormError, FormSurface,
    Handler, IntakeOutcome, IntakeSource, PolicyProvider, PolicyQuery, PolicySnapshot, SizeUnits,
    Target, UploadFormView,
};
use mfu_form::policy::{MimeTypesReply, SizeLimitReply};

/// Surface recording everything the controller does to it.
#[derive(Default)]
struct RecordingSurface {
    drag_over: Cell<bool>,
    accept: RefCell<Option<String>>,
    label: RefCell<String>,
    pickers_opened: Cell<u32>,
}

impl FormSurface for RecordingSurface {
    fn set_drag_over(&self, drag_over: bool) {
        self.drag_over.set(drag_over);
    }

    fn is_drag_over(&self) -> bool {
        self.drag_over.get()
    }

    fn set_accept(&self, accept: Option<&str>) {
        *self.accept.borrow_mut() = accept.map(str::to_owned);
    }

    fn set_limit_label(&self, text: &str) {
        *self.label.borrow_mut() = text.to_owned();
    }

    fn open_file_picker(&self) {
        self.pickers_opened.set(self.pickers_opened.get() + 1);
    }
}

type View = UploadFormView<RecordingSurface, FileInfo>;

/// Build a view whose callback records every selection it receives.
fn recording_view(verdict: bool) -> (View, Rc<RefCell<Vec<FileSelection<FileInfo>>>>) {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);
    let view = UploadFormView::builder(RecordingSurface::default())
        .on_drop(move |selection: &FileSelection<FileInfo>| {
            sink.borrow_mut().push(selection.clone());
            verdict
        })
        .build()
        .unwrap();
    (view, calls)
}

fn png(name: &str) -> FileInfo {
    FileInfo::new(name, 2048, Some("image/png"))
}

fn reply_size(query: PolicyQuery, limit: Option<u64>) {
    match query {
        PolicyQuery::MaxFileSizeLimit { reply } => reply(limit),
        other => panic!("expected a size query, got {other:?}"),
    }
}

fn reply_mimes(query: PolicyQuery, types: Option<Vec<String>>) {
    match query {
        PolicyQuery::AllowedMimeTypes { reply } => reply(types),
        other => panic!("expected a mime query, got {other:?}"),
    }
}

fn take_query(queries: &mut Vec<PolicyQuery>, name: &str) -> PolicyQuery {
    let index = queries
        .iter()
        .position(|q| q.event_name() == name)
        .unwrap_or_else(|| panic!("no {name} query"));
    queries.remove(index)
}

#[test]
fn deactivation_fires_no_queries() {
    let (view, _) = recording_view(true);
    let queries = view.set_active(true);
    assert_eq!(queries.len(), 2);

    assert!(view.set_active(false).is_empty());
    assert!(!view.is_active());
}

#[test]
fn activation_fires_one_query_of_each_kind() {
    let (view, _) = recording_view(true);
    let queries = view.set_active(true);

    let mut names: Vec<_> = queries.iter().map(PolicyQuery::event_name).collect();
    names.sort_unstable();
    assert_eq!(names, ["mfuGetAllowedMimeTypes", "mfuGetMaxFileSizeLimit"]);
}

#[test]
fn repeated_activation_is_not_a_transition() {
    let (view, _) = recording_view(true);
    assert_eq!(view.set_active(true).len(), 2);
    assert!(view.set_active(true).is_empty());

    // Every reopen asks again.
    assert!(view.set_active(false).is_empty());
    assert_eq!(view.set_active(true).len(), 2);
}

#[test]
fn mime_reply_sets_joined_accept_filter() {
    let (view, _) = recording_view(true);
    let mut queries = view.set_active(true);
    let query = take_query(&mut queries, "mfuGetAllowedMimeTypes");

    reply_mimes(
        query,
        Some(vec!["image/png".to_owned(), "image/jpeg".to_owned()]),
    );

    assert_eq!(
        view.surface().accept.borrow().as_deref(),
        Some("image/png,image/jpeg")
    );
    assert_eq!(
        view.policy().allowed_mime_types,
        Some(vec!["image/png".to_owned(), "image/jpeg".to_owned()])
    );
}

#[test]
fn empty_or_absent_mime_reply_removes_filter() {
    let (view, _) = recording_view(true);
    *view.surface().accept.borrow_mut() = Some("image/png".to_owned());

    let mut queries = view.set_active(true);
    reply_mimes(take_query(&mut queries, "mfuGetAllowedMimeTypes"), Some(Vec::new()));
    assert_eq!(*view.surface().accept.borrow(), None);

    assert!(view.set_active(false).is_empty());
    *view.surface().accept.borrow_mut() = Some("image/png".to_owned());
    let mut queries = view.set_active(true);
    reply_mimes(take_query(&mut queries, "mfuGetAllowedMimeTypes"), None);
    assert_eq!(*view.surface().accept.borrow(), None);
}

#[test]
fn size_reply_fills_label_template() {
    let (view, _) = recording_view(true);
    let mut queries = view.set_active(true);

    reply_size(
        take_query(&mut queries, "mfuGetMaxFileSizeLimit"),
        Some(64 * 1024 * 1024),
    );

    assert_eq!(*view.surface().label.borrow(), "(Max file size: 64 MB)");
    assert_eq!(view.policy().max_file_size, Some(64 * 1024 * 1024));
}

#[test]
fn size_reply_uses_injected_formatter() {
    let view: View = UploadFormView::builder(RecordingSurface::default())
        .config(FormConfig {
            max_file_size_text: "Limit: {filesize}".into(),
            ..FormConfig::default()
        })
        .format_size(|limit| format!("<{}>", limit.unwrap_or_default()))
        .build()
        .unwrap();
    let mut queries = view.set_active(true);

    reply_size(take_query(&mut queries, "mfuGetMaxFileSizeLimit"), Some(5));

    assert_eq!(*view.surface().label.borrow(), "Limit: <5>");
}

#[test]
fn absent_size_limit_still_updates_label() {
    let view: View = UploadFormView::builder(RecordingSurface::default())
        .config(FormConfig {
            size_units: SizeUnits::Decimal,
            ..FormConfig::default()
        })
        .build()
        .unwrap();
    let mut queries = view.set_active(true);

    reply_size(take_query(&mut queries, "mfuGetMaxFileSizeLimit"), None);

    assert_eq!(*view.surface().label.borrow(), "(Max file size: )");
    assert_eq!(view.policy().max_file_size, None);
}

#[test]
fn drop_without_files_clears_drag_state_only() {
    let (view, calls) = recording_view(true);
    view.set_drag_state();

    let outcome = view.dispatch(
        Target::FormContainer,
        DomEventKind::Drop,
        &FileSelection::from_drop(Vec::new()),
    );

    assert_eq!(outcome, Dispatched::Intake(IntakeOutcome::NoFiles));
    assert!(!view.is_drag_over());
    assert!(calls.borrow().is_empty());
}

#[test]
fn drop_with_files_invokes_callback_once() {
    let (view, calls) = recording_view(true);
    view.dispatch(
        Target::FormContainer,
        DomEventKind::DragEnter,
        &FileSelection::empty(IntakeSource::Drop),
    );
    assert!(view.is_drag_over());

    let event = FileSelection::from_drop(vec![png("a.png"), png("b.png")]);
    let outcome = view.dispatch(Target::FormContainer, DomEventKind::Drop, &event);

    assert_eq!(outcome, Dispatched::Intake(IntakeOutcome::Accepted));
    assert!(!view.is_drag_over());
    assert_eq!(*calls.borrow(), vec![event]);
}

#[test]
fn change_with_files_invokes_callback_once() {
    let (view, calls) = recording_view(true);
    let event = FileSelection::from_input(IntakeSource::Change, vec![png("pick.png")]);

    let outcome = view.dispatch(Target::FileInput, DomEventKind::Change, &event);

    assert_eq!(outcome, Dispatched::Intake(IntakeOutcome::Accepted));
    assert_eq!(calls.borrow().len(), 1);
    assert_eq!(calls.borrow()[0].files()[0].name, "pick.png");
}

#[test]
fn declining_callback_is_reported_but_changes_nothing_else() {
    let (view, calls) = recording_view(false);
    view.set_drag_state();

    let outcome = view.upload_files(&FileSelection::from_drop(vec![png("a.png")]));

    assert_eq!(outcome, IntakeOutcome::Declined);
    assert_eq!(calls.borrow().len(), 1);
    assert!(!view.is_drag_over());
}

#[test]
fn dragenter_then_dragleave_toggles_state() {
    let (view, _) = recording_view(true);
    let none = FileSelection::empty(IntakeSource::Drop);

    assert_eq!(
        view.dispatch(Target::FormContainer, DomEventKind::DragEnter, &none),
        Dispatched::Handled(Handler::SetDragState)
    );
    assert!(view.is_drag_over());

    assert_eq!(
        view.dispatch(Target::FormContainer, DomEventKind::DragLeave, &none),
        Dispatched::Handled(Handler::RemoveDragState)
    );
    assert!(!view.is_drag_over());
}

#[test]
fn public_upload_files_matches_table_dispatch() {
    let (table_view, table_calls) = recording_view(true);
    let (public_view, public_calls) = recording_view(true);

    for event in [
        FileSelection::from_drop(vec![png("a.png")]),
        FileSelection::from_drop(Vec::new()),
        FileSelection::programmatic(Some(Vec::new()), Some(vec![png("b.png")])),
        FileSelection::empty(IntakeSource::Programmatic),
    ] {
        table_view.set_drag_state();
        public_view.set_drag_state();

        let Dispatched::Intake(via_table) =
            table_view.dispatch(Target::FormContainer, DomEventKind::Drop, &event)
        else {
            panic!("drop must route to intake");
        };
        let via_public = public_view.upload_files(&event);

        assert_eq!(via_table, via_public);
        assert_eq!(table_view.is_drag_over(), public_view.is_drag_over());
    }
    assert_eq!(*table_calls.borrow(), *public_calls.borrow());
    assert_eq!(public_calls.borrow().len(), 2);
}

#[test]
fn tap_opens_file_picker() {
    let (view, _) = recording_view(true);
    let outcome = view.dispatch(
        Target::SelectFilesButton,
        DomEventKind::Tap,
        &FileSelection::empty(IntakeSource::Programmatic),
    );
    assert_eq!(outcome, Dispatched::Handled(Handler::SelectFiles));
    assert_eq!(view.surface().pickers_opened.get(), 1);
}

#[test]
fn drop_callback_is_write_once() {
    let (view, calls) = recording_view(true);

    let result = view.bind_on_drop(Rc::new(|_: &FileSelection<FileInfo>| false));
    assert_eq!(result, Err(FormError::CallbackAlreadyBound));

    // The first callback is still in place.
    assert_eq!(
        view.upload_files(&FileSelection::from_drop(vec![png("a.png")])),
        IntakeOutcome::Accepted
    );
    assert_eq!(calls.borrow().len(), 1);
}

/// Provider that stores replies and answers them later.
#[derive(Default)]
struct DeferredProvider {
    size_replies: RefCell<Vec<SizeLimitReply>>,
    mime_replies: RefCell<Vec<MimeTypesReply>>,
}

impl PolicyProvider for DeferredProvider {
    fn max_file_size_limit(&self, reply: SizeLimitReply) {
        self.size_replies.borrow_mut().push(reply);
    }

    fn allowed_mime_types(&self, reply: MimeTypesReply) {
        self.mime_replies.borrow_mut().push(reply);
    }
}

#[test]
fn deferred_provider_replies_update_the_form_later() {
    let (view, _) = recording_view(true);
    let provider = DeferredProvider::default();

    for query in view.set_active(true) {
        query.dispatch(&provider);
    }
    assert_eq!(*view.surface().label.borrow(), "");
    assert_eq!(view.policy(), PolicySnapshot::default());

    for reply in provider.size_replies.take() {
        reply(Some(1536));
    }
    for reply in provider.mime_replies.take() {
        reply(Some(vec!["application/pdf".to_owned()]));
    }

    assert_eq!(*view.surface().label.borrow(), "(Max file size: 1.5 KB)");
    assert_eq!(
        view.surface().accept.borrow().as_deref(),
        Some("application/pdf")
    );

    let policy = view.policy();
    assert!(policy.check(&FileInfo::new("doc.pdf", 100, Some("application/pdf"))).is_ok());
    assert!(policy.check(&png("a.png")).is_err());
}
