//! The upload form controller.
//!
//! [`UploadFormView`] owns the form's behavior and nothing else: it
//! flips the drag-over state on its [`FormSurface`], forwards file
//! selections to the write-once drop callback, and turns each
//! inactive -> active transition into the two policy queries whose
//! replies update the accept filter and the size-limit label.

use std::cell::{Cell, OnceCell, RefCell};
use std::fmt;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::accept::accept_filter;
use crate::events::{self, DomEventKind, Handler, Target};
use crate::format::format_optional_size;
use crate::label::LimitTemplate;
use crate::policy::{PolicyQuery, PolicySnapshot};
use crate::selection::FileSelection;
use crate::surface::FormSurface;
use crate::types::{FormConfig, FormError};

/// Callback receiving every file selection that carries files.
///
/// The returned flag is reported back as [`IntakeOutcome`] and gates
/// nothing else.
pub type DropCallback<F> = Rc<dyn Fn(&FileSelection<F>) -> bool>;

/// Formats the size limit for the info label. `None` is an absent limit.
pub type SizeFormatter = Rc<dyn Fn(Option<u64>) -> String>;

/// A change of the popup's active state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveChange {
    /// Previous value.
    pub previous: bool,
    /// New value.
    pub new: bool,
}

/// Result of one intake attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeOutcome {
    /// The event carried no files; the callback was not invoked.
    NoFiles,
    /// The callback ran and returned `true`.
    Accepted,
    /// The callback ran and returned `false`.
    Declined,
}

/// Result of routing a DOM event through the event table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatched {
    /// No binding exists for the (target, event) pair.
    Unbound,
    /// A non-intake handler ran.
    Handled(Handler),
    /// The intake handler ran.
    Intake(IntakeOutcome),
}

/// Static description of the form markup.
///
/// Contains no policy data; the accept filter and size label arrive
/// later through the policy replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormTemplate {
    /// Id of the hidden file input.
    pub input_id: String,
    /// Whether the input accepts several files at once.
    pub multiple: bool,
    /// Caption of the select-files button.
    pub select_files_text: String,
    /// Hint shown in the drop zone.
    pub drop_hint_text: String,
}

/// Controller for one upload form popup.
pub struct UploadFormView<S, F> {
    surface: Rc<S>,
    config: FormConfig,
    template: LimitTemplate,
    format_size: SizeFormatter,
    on_drop: OnceCell<DropCallback<F>>,
    active: Cell<bool>,
    policy: Rc<RefCell<PolicySnapshot>>,
}

impl<S, F> UploadFormView<S, F>
where
    S: FormSurface + 'static,
    F: 'static,
{
    /// Start building a view over `surface`.
    #[must_use]
    pub fn builder(surface: S) -> UploadFormViewBuilder<S, F> {
        UploadFormViewBuilder {
            surface,
            config: FormConfig::default(),
            on_drop: None,
            format_size: None,
        }
    }

    /// The rendering surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The configuration the view was built with.
    #[must_use]
    pub const fn config(&self) -> &FormConfig {
        &self.config
    }

    /// The read-only max-file-size label template.
    #[must_use]
    pub const fn max_file_size_text(&self) -> &LimitTemplate {
        &self.template
    }

    /// Whether the popup is currently active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Whether the container currently shows the drag-over state.
    #[must_use]
    pub fn is_drag_over(&self) -> bool {
        self.surface.is_drag_over()
    }

    /// The most recent policy values delivered by the provider.
    #[must_use]
    pub fn policy(&self) -> PolicySnapshot {
        self.policy.borrow().clone()
    }

    /// Attempt to rebind the drop callback.
    ///
    /// # Errors
    ///
    /// Always returns [`FormError::CallbackAlreadyBound`] on a built
    /// view: the callback is bound once, at construction.
    pub fn bind_on_drop(&self, callback: DropCallback<F>) -> Result<(), FormError> {
        self.on_drop.set(callback).map_err(|_| {
            warn!("rejected attempt to rebind onDropCallback");
            FormError::CallbackAlreadyBound
        })
    }

    /// Describe the form markup.
    #[must_use]
    pub fn render(&self) -> FormTemplate {
        FormTemplate {
            input_id: self.config.input_id.clone(),
            multiple: true,
            select_files_text: self.config.select_files_text.clone(),
            drop_hint_text: self.config.drop_hint_text.clone(),
        }
    }

    /// Record the popup's active state and return the policy queries the
    /// change triggers.
    ///
    /// Only an inactive -> active transition produces queries: one
    /// allowed-mime-types and one max-file-size query. Setting the
    /// current value again is not a transition.
    #[must_use]
    pub fn set_active(&self, active: bool) -> Vec<PolicyQuery> {
        let previous = self.active.replace(active);
        if previous == active {
            return Vec::new();
        }

        let change = ActiveChange {
            previous,
            new: active,
        };
        debug!(?change, "upload form active state changed");
        [
            self.request_allowed_mime_types(change),
            self.request_max_file_size_limit(change),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Build the `mfuGetMaxFileSizeLimit` query for an activation.
    ///
    /// Returns `None` when the change is a deactivation. The reply
    /// writes the formatted limit into the info label.
    #[must_use]
    pub fn request_max_file_size_limit(&self, change: ActiveChange) -> Option<PolicyQuery> {
        if !change.new {
            return None;
        }

        let surface = Rc::clone(&self.surface);
        let policy = Rc::clone(&self.policy);
        let template = self.template.clone();
        let format_size = Rc::clone(&self.format_size);
        Some(PolicyQuery::MaxFileSizeLimit {
            reply: Box::new(move |limit: Option<u64>| {
                debug!(?limit, "max file size limit received");
                surface.set_limit_label(&template.render(&format_size(limit)));
                policy.borrow_mut().max_file_size = limit;
            }),
        })
    }

    /// Build the `mfuGetAllowedMimeTypes` query for an activation.
    ///
    /// Returns `None` when the change is a deactivation. The reply sets
    /// the file input's accept filter, removing it when the list is
    /// absent or empty.
    #[must_use]
    pub fn request_allowed_mime_types(&self, change: ActiveChange) -> Option<PolicyQuery> {
        if !change.new {
            return None;
        }

        let surface = Rc::clone(&self.surface);
        let policy = Rc::clone(&self.policy);
        Some(PolicyQuery::AllowedMimeTypes {
            reply: Box::new(move |mime_types: Option<Vec<String>>| {
                debug!(?mime_types, "allowed mime types received");
                surface.set_accept(accept_filter(mime_types.as_deref()).as_deref());
                policy.borrow_mut().allowed_mime_types = mime_types;
            }),
        })
    }

    /// Forward a file selection to the drop callback.
    ///
    /// Entry point for host code with a synthesized event; behaves
    /// exactly like a dropped or picked selection.
    pub fn upload_files(&self, event: &FileSelection<F>) -> IntakeOutcome {
        self.intake(event)
    }

    /// Route a DOM event through the static event table.
    pub fn dispatch(
        &self,
        target: Target,
        kind: DomEventKind,
        event: &FileSelection<F>,
    ) -> Dispatched {
        let Some(handler) = events::handler_for(target, kind) else {
            return Dispatched::Unbound;
        };
        match handler {
            Handler::UploadFiles => return Dispatched::Intake(self.intake(event)),
            Handler::SelectFiles => self.select_files(),
            Handler::SetDragState => self.set_drag_state(),
            Handler::RemoveDragState => self.remove_drag_state(),
        }
        Dispatched::Handled(handler)
    }

    /// Show the drag-over state.
    pub fn set_drag_state(&self) {
        self.surface.set_drag_over(true);
    }

    /// Clear the drag-over state.
    pub fn remove_drag_state(&self) {
        self.surface.set_drag_over(false);
    }

    /// Open the native file picker.
    pub fn select_files(&self) {
        self.surface.open_file_picker();
    }

    fn intake(&self, event: &FileSelection<F>) -> IntakeOutcome {
        self.remove_drag_state();

        if !event.has_file_data() {
            debug!(source = ?event.source(), "file selection carries no files");
            return IntakeOutcome::NoFiles;
        }

        let Some(on_drop) = self.on_drop.get() else {
            // Unreachable for built views; the builder always binds one.
            return IntakeOutcome::NoFiles;
        };
        debug!(
            source = ?event.source(),
            count = event.files().len(),
            "forwarding file selection"
        );
        if on_drop(event) {
            IntakeOutcome::Accepted
        } else {
            IntakeOutcome::Declined
        }
    }
}

impl<S, F> fmt::Debug for UploadFormView<S, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadFormView")
            .field("config", &self.config)
            .field("active", &self.active.get())
            .field("policy", &self.policy.borrow())
            .finish_non_exhaustive()
    }
}

/// Builder for [`UploadFormView`].
pub struct UploadFormViewBuilder<S, F> {
    surface: S,
    config: FormConfig,
    on_drop: Option<DropCallback<F>>,
    format_size: Option<SizeFormatter>,
}

impl<S, F> UploadFormViewBuilder<S, F>
where
    S: FormSurface + 'static,
    F: 'static,
{
    /// Use `config` instead of the defaults.
    #[must_use]
    pub fn config(mut self, config: FormConfig) -> Self {
        self.config = config;
        self
    }

    /// Bind the drop callback. Defaults to accepting every selection.
    #[must_use]
    pub fn on_drop(mut self, callback: impl Fn(&FileSelection<F>) -> bool + 'static) -> Self {
        self.on_drop = Some(Rc::new(callback));
        self
    }

    /// Replace the size formatter used by the info label.
    #[must_use]
    pub fn format_size(mut self, formatter: impl Fn(Option<u64>) -> String + 'static) -> Self {
        self.format_size = Some(Rc::new(formatter));
        self
    }

    /// Validate the configuration and build the view.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidConfig`] if the configuration fails
    /// [`FormConfig::validate`].
    pub fn build(self) -> Result<UploadFormView<S, F>, FormError> {
        self.config.validate()?;
        if !self.config.max_file_size_text.contains(LimitTemplate::PLACEHOLDER) {
            warn!(
                template = %self.config.max_file_size_text,
                "max file size template has no {} placeholder",
                LimitTemplate::PLACEHOLDER
            );
        }

        let units = self.config.size_units;
        let format_size = self
            .format_size
            .unwrap_or_else(|| Rc::new(move |limit| format_optional_size(limit, units)));
        let on_drop = self
            .on_drop
            .unwrap_or_else(|| Rc::new(|_: &FileSelection<F>| true));

        Ok(UploadFormView {
            surface: Rc::new(self.surface),
            template: LimitTemplate::new(self.config.max_file_size_text.clone()),
            config: self.config,
            format_size,
            on_drop: OnceCell::from(on_drop),
            active: Cell::new(false),
            policy: Rc::new(RefCell::new(PolicySnapshot::default())),
        })
    }
}
