use api::ReportKind;
use chrono::Utc;
use dioxus::prelude::*;
use store::report::{build_report, SUBMITTED};

use crate::session::{use_api, use_session};
use crate::toast::use_toaster;

/// Inline form for sending a bug report or a suggestion.
#[component]
pub fn ReportDialog(on_close: EventHandler<()>) -> Element {
    let api = use_api();
    let session = use_session();
    let toaster = use_toaster();
    let mut kind = use_signal(ReportKind::default);
    let mut message = use_signal(String::new);
    let mut sending = use_signal(|| false);

    let handle_submit = move |_| {
        let api = api.clone();
        let author = session.peek().user.clone();
        let report = match build_report(kind(), &message(), author.as_ref(), Utc::now()) {
            Ok(report) => report,
            Err(e) => {
                toaster.error(e.to_string());
                return;
            }
        };
        sending.set(true);
        spawn(async move {
            match api.submit_report(&report).await {
                Ok(()) => {
                    toaster.success(SUBMITTED);
                    on_close.call(());
                }
                Err(e) => toaster.error(e.user_message("Failed to submit report!")),
            }
            sending.set(false);
        });
    };

    rsx! {
        div {
            class: "modal-body",
            h2 { class: "modal-title", "Send feedback" }

            div {
                class: "modal-field",
                label { r#for: "report-kind", "Type" }
                select {
                    id: "report-kind",
                    value: kind().label(),
                    onchange: move |evt| {
                        if let Some(k) = ReportKind::from_label(&evt.value()) {
                            kind.set(k);
                        }
                    },
                    for k in ReportKind::ALL {
                        option { key: "{k.label()}", value: k.label(), "{k.label()}" }
                    }
                }
            }

            div {
                class: "modal-field",
                label { r#for: "report-message", "Message" }
                textarea {
                    id: "report-message",
                    rows: 5,
                    placeholder: "What happened, or what would you like to see?",
                    value: message(),
                    oninput: move |evt: FormEvent| message.set(evt.value()),
                }
            }

            div {
                class: "modal-actions",
                button {
                    class: "btn primary",
                    disabled: sending(),
                    onclick: handle_submit,
                    if sending() { "Sending..." } else { "Submit" }
                }
                button {
                    class: "btn outline",
                    onclick: move |_| on_close.call(()),
                    "Cancel"
                }
            }
        }
    }
}
