//! # Login modal state machine
//!
//! One modal covers login, registration with an emailed code, the password
//! reset request and the reset link itself:
//!
//! ```text
//! Login ──link──▶ Register ──code sent──▶ AwaitingCode ──registered──▶ Login
//!   │
//!   └──link──▶ Forgot (submitted flag set after any response)
//!
//! ?resetToken=… ──▶ ResetPassword { token } ──password reset──▶ Login
//! ```
//!
//! [`AuthFlow::submit`] validates the form for the current step and returns
//! the request the UI should make. The UI reports the outcome back through the
//! transition methods. Every way back to `Login` clears the form.

use crate::error::ValidationError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthStep {
    #[default]
    Login,
    Register,
    AwaitingCode,
    Forgot,
    ResetPassword {
        token: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthForm {
    pub email: String,
    pub password: String,
    pub name: String,
    pub username: String,
    pub code: String,
}

impl AuthForm {
    pub fn is_empty(&self) -> bool {
        *self == AuthForm::default()
    }
}

/// Request the UI makes after a valid submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    Login { email: String, password: String },
    SendCode { email: String },
    /// Check the code, then register with the form's fields.
    VerifyAndRegister {
        email: String,
        code: String,
        password: String,
        name: String,
        username: String,
    },
    ForgotPassword { email: String },
    ResetPassword { token: String, password: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthFlow {
    pub step: AuthStep,
    pub form: AuthForm,
    /// Set once a reset email was requested, whatever the outcome.
    pub forgot_submitted: bool,
}

fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(value.to_string())
    }
}

/// Passwords are sent exactly as typed; only a blank one is refused.
fn password(value: &str) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField("Password"))
    } else {
        Ok(value.to_string())
    }
}

impl AuthFlow {
    /// Start in `ResetPassword` when the page was opened from a reset link.
    pub fn new(reset_token: Option<String>) -> Self {
        let step = match reset_token.filter(|t| !t.is_empty()) {
            Some(token) => AuthStep::ResetPassword { token },
            None => AuthStep::Login,
        };
        Self {
            step,
            ..Default::default()
        }
    }

    pub fn title(&self) -> &'static str {
        match self.step {
            AuthStep::Login => "Log in",
            AuthStep::Register => "Create account",
            AuthStep::AwaitingCode => "Verify your email",
            AuthStep::Forgot => "Reset password",
            AuthStep::ResetPassword { .. } => "Choose a new password",
        }
    }

    pub fn submit(&self) -> Result<AuthAction, ValidationError> {
        let f = &self.form;
        Ok(match &self.step {
            AuthStep::Login => AuthAction::Login {
                email: required(&f.email, "Email")?,
                password: password(&f.password)?,
            },
            AuthStep::Register => {
                required(&f.name, "Name")?;
                required(&f.username, "Username")?;
                password(&f.password)?;
                AuthAction::SendCode {
                    email: required(&f.email, "Email")?,
                }
            }
            AuthStep::AwaitingCode => AuthAction::VerifyAndRegister {
                email: required(&f.email, "Email")?,
                code: required(&f.code, "Code")?,
                password: password(&f.password)?,
                name: required(&f.name, "Name")?,
                username: required(&f.username, "Username")?,
            },
            AuthStep::Forgot => AuthAction::ForgotPassword {
                email: required(&f.email, "Email")?,
            },
            AuthStep::ResetPassword { token } => AuthAction::ResetPassword {
                token: token.clone(),
                password: password(&f.password)?,
            },
        })
    }

    pub fn go_register(&mut self) {
        self.step = AuthStep::Register;
    }

    pub fn go_forgot(&mut self) {
        self.step = AuthStep::Forgot;
        self.forgot_submitted = false;
    }

    /// Leave any step for a fresh login form.
    pub fn back_to_login(&mut self) {
        self.step = AuthStep::Login;
        self.form = AuthForm::default();
        self.forgot_submitted = false;
    }

    pub fn code_sent(&mut self) {
        if self.step == AuthStep::Register {
            self.step = AuthStep::AwaitingCode;
        }
    }

    pub fn registered(&mut self) {
        self.back_to_login();
    }

    pub fn forgot_requested(&mut self) {
        self.forgot_submitted = true;
    }

    pub fn password_reset(&mut self) {
        self.back_to_login();
    }

    /// The reset token, while in `ResetPassword`.
    pub fn reset_token(&self) -> Option<&str> {
        match &self.step {
            AuthStep::ResetPassword { token } => Some(token),
            _ => None,
        }
    }
}
