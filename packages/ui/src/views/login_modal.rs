use api::Registration;
use dioxus::prelude::*;
use store::{AuthAction, AuthFlow, AuthStep};

use crate::browser;
use crate::session::{sign_in, use_api, use_session};
use crate::toast::use_toaster;

/// Login, registration and password reset in one modal.
#[component]
pub fn LoginModal(#[props(!optional)] reset_token: Option<String>) -> Element {
    let api = use_api();
    let mut session = use_session();
    let toaster = use_toaster();
    let mut flow = use_signal(move || AuthFlow::new(reset_token));
    let mut busy = use_signal(|| false);

    let mut on_submit = move |_: ()| {
        let action = match flow.read().submit() {
            Ok(action) => action,
            Err(e) => {
                toaster.error(e.to_string());
                return;
            }
        };
        let api = api.clone();
        busy.set(true);
        spawn(async move {
            run(action, &api, session, flow, toaster).await;
            busy.set(false);
        });
    };
    let mut submit_on_enter = on_submit.clone();

    let state = flow();
    let step = state.step.clone();
    let form = state.form.clone();

    rsx! {
        div {
            class: "modal-backdrop",
            div {
                class: "modal-card login-card",
                h1 { class: "login-brand", "Trench Social" }
                h2 { class: "modal-title", "{state.title()}" }

                div {
                    class: "login-fields",
                    onkeydown: move |evt: KeyboardEvent| {
                        if evt.key() == Key::Enter {
                            submit_on_enter(());
                        }
                    },
                    match step {
                        AuthStep::Login => rsx! {
                            input {
                                r#type: "email",
                                placeholder: "Email",
                                value: form.email.clone(),
                                oninput: move |evt: FormEvent| flow.write().form.email = evt.value(),
                            }
                            input {
                                r#type: "password",
                                placeholder: "Password",
                                value: form.password.clone(),
                                oninput: move |evt: FormEvent| flow.write().form.password = evt.value(),
                            }
                        },
                        AuthStep::Register => rsx! {
                            input {
                                r#type: "text",
                                placeholder: "Name",
                                value: form.name.clone(),
                                oninput: move |evt: FormEvent| flow.write().form.name = evt.value(),
                            }
                            input {
                                r#type: "text",
                                placeholder: "Username",
                                value: form.username.clone(),
                                oninput: move |evt: FormEvent| flow.write().form.username = evt.value(),
                            }
                            input {
                                r#type: "email",
                                placeholder: "Email",
                                value: form.email.clone(),
                                oninput: move |evt: FormEvent| flow.write().form.email = evt.value(),
                            }
                            input {
                                r#type: "password",
                                placeholder: "Password",
                                value: form.password.clone(),
                                oninput: move |evt: FormEvent| flow.write().form.password = evt.value(),
                            }
                        },
                        AuthStep::AwaitingCode => rsx! {
                            p { class: "modal-text", "We sent a code to {form.email}." }
                            input {
                                r#type: "text",
                                placeholder: "Verification code",
                                value: form.code.clone(),
                                oninput: move |evt: FormEvent| flow.write().form.code = evt.value(),
                            }
                        },
                        AuthStep::Forgot => rsx! {
                            input {
                                r#type: "email",
                                placeholder: "Email",
                                value: form.email.clone(),
                                oninput: move |evt: FormEvent| flow.write().form.email = evt.value(),
                            }
                            if state.forgot_submitted {
                                p { class: "modal-text", "If that email has an account, a reset link is on its way." }
                            }
                        },
                        AuthStep::ResetPassword { .. } => rsx! {
                            input {
                                r#type: "password",
                                placeholder: "New password",
                                value: form.password.clone(),
                                oninput: move |evt: FormEvent| flow.write().form.password = evt.value(),
                            }
                        },
                    }
                }

                button {
                    class: "btn primary wide",
                    disabled: busy(),
                    onclick: move |_| on_submit(()),
                    if busy() { "Please wait..." } else { "{submit_label(&state.step)}" }
                }

                div {
                    class: "login-links",
                    if state.step == AuthStep::Login {
                        button {
                            class: "link",
                            onclick: move |_| flow.write().go_register(),
                            "Create account"
                        }
                        button {
                            class: "link",
                            onclick: move |_| flow.write().go_forgot(),
                            "Forgot password?"
                        }
                    } else {
                        button {
                            class: "link",
                            onclick: move |_| {
                                if flow.peek().reset_token().is_some() {
                                    browser::clear_query();
                                }
                                flow.write().back_to_login();
                            },
                            "Back to login"
                        }
                    }
                }

                button {
                    class: "btn outline wide",
                    onclick: move |_| session.write().start_guest(),
                    "Join as guest"
                }
            }
        }
    }
}

fn submit_label(step: &AuthStep) -> &'static str {
    match step {
        AuthStep::Login => "Log in",
        AuthStep::Register => "Send code",
        AuthStep::AwaitingCode => "Verify and register",
        AuthStep::Forgot => "Send reset link",
        AuthStep::ResetPassword { .. } => "Update password",
    }
}

async fn run(
    action: AuthAction,
    api: &api::ApiClient,
    session: Signal<store::Session>,
    mut flow: Signal<AuthFlow>,
    toaster: crate::Toaster,
) {
    match action {
        AuthAction::Login { email, password } => {
            if let Err(e) = sign_in(api, session, toaster, &email, &password).await {
                tracing::warn!("login failed: {e}");
                toaster.error(e.user_message("Login failed!"));
            }
        }
        AuthAction::SendCode { email } => match api.send_code(&email).await {
            Ok(()) => {
                toaster.success("Verification code sent to email");
                flow.write().code_sent();
            }
            Err(e) => toaster.error(e.user_message("Failed to send code.")),
        },
        AuthAction::VerifyAndRegister {
            email,
            code,
            password,
            name,
            username,
        } => match api.verify_code(&email, &code).await {
            Ok(check) if check.success => {
                toaster.success("Code verified ✔️");
                let registration = Registration {
                    email,
                    password,
                    name,
                    username,
                };
                match api.register(&registration).await {
                    Ok(message) => {
                        toaster.success(
                            message.unwrap_or_else(|| "Registration successful! Please log in.".into()),
                        );
                        flow.write().registered();
                    }
                    Err(e) => toaster.error(e.user_message("Registration failed!")),
                }
            }
            Ok(check) => {
                toaster.error(check.error.unwrap_or_else(|| "Invalid / expired code".into()))
            }
            Err(e) => toaster.error(e.user_message("Invalid / expired code")),
        },
        AuthAction::ForgotPassword { email } => {
            match api.forgot_password(&email).await {
                Ok(()) => toaster.success("Reset link sent if email exists"),
                Err(e) => toaster.error(e.user_message("Failed to send reset link")),
            }
            flow.write().forgot_requested();
        }
        AuthAction::ResetPassword { token, password } => {
            match api.reset_password(&token, &password).await {
                Ok(()) => {
                    toaster.success("Password updated!");
                    browser::clear_query();
                    flow.write().password_reset();
                }
                Err(e) => toaster.error(e.user_message("Failed to reset password")),
            }
        }
    }
}
