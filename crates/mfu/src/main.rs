use dioxus::logger::tracing::info;
use dioxus::prelude::*;
use mfu_form::{FileMeta, FileSelection, SizeUnits, format_file_size};
use mfu_io::{FORM_CSS, PickedFile, PolicyHandle, UploadForm};

mod service;

use service::PolicyService;

/// Page styles for the demo shell around the form.
const APP_CSS: &str = r"
.mfu-app { max-width: 40rem; margin: 2rem auto; font-family: sans-serif; }
.mfu-popup { display: none; margin-top: 1rem; }
.mfu-popup--open { display: block; }
.mfu-app__files li.rejected { color: #c0392b; }
";

fn main() {
    dioxus::launch(app);
}

/// One file as seen by the drop callback.
#[derive(Debug, Clone, PartialEq, Eq)]
struct IntakeRecord {
    id: usize,
    name: String,
    size: String,
    rejection: Option<String>,
}

/// Root application component.
///
/// Provides the policy service as context, toggles the upload popup,
/// and lists every file the form hands to the drop callback together
/// with the policy verdict.
fn app() -> Element {
    let config = use_hook(service::load_config);
    use_context_provider(|| PolicyHandle::new(PolicyService::new(config.clone())));

    let mut open = use_signal(|| false);
    let mut records = use_signal(Vec::<IntakeRecord>::new);

    // --- Drop callback ---
    // The service is the source of truth for the limits, so the verdict
    // is computed against its policy rather than the form's copy.
    let policy = config.policy;
    let on_drop = use_callback(move |selection: FileSelection<PickedFile>| {
        let files = selection.into_files();
        let (accepted, rejected) = policy.partition(files);
        info!(
            accepted = accepted.len(),
            rejected = rejected.len(),
            "files received"
        );

        let mut list = records.write();
        let mut next_id = list.len();
        let mut push = |file: &PickedFile, rejection: Option<String>| {
            list.push(IntakeRecord {
                id: next_id,
                name: file.name(),
                size: format_file_size(file.size(), SizeUnits::Binary),
                rejection,
            });
            next_id += 1;
        };
        for file in &accepted {
            push(file, None);
        }
        for (file, violation) in &rejected {
            push(file, Some(violation.to_string()));
        }
        true
    });

    let popup_class = if open() {
        "mfu-popup mfu-popup--open"
    } else {
        "mfu-popup"
    };

    rsx! {
        style { dangerous_inner_html: FORM_CSS }
        style { dangerous_inner_html: APP_CSS }

        div { class: "mfu-app",
            header {
                h1 { "mfu" }
                p { "Multi-file upload" }
            }

            button {
                class: "mfu-app__toggle",
                onclick: move |_| {
                    let current = open();
                    open.set(!current);
                },
                if open() { "Close" } else { "Upload files" }
            }

            // The form stays mounted while hidden so it keeps its state
            // and window guard across openings.
            div { class: popup_class,
                UploadForm { active: open(), on_drop: on_drop }
            }

            if !records().is_empty() {
                ul { class: "mfu-app__files",
                    for record in records() {
                        li {
                            key: "{record.id}",
                            class: if record.rejection.is_some() { "rejected" } else { "accepted" },
                            "{record.name} ({record.size})"
                            if let Some(ref reason) = record.rejection {
                                " : {reason}"
                            }
                        }
                    }
                }
            }
        }
    }
}
