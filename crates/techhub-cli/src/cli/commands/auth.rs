//! One-shot login/register command handlers.
//!
//! These run the same validation and wire calls as the interactive
//! flow, with stdout/stderr in place of notices. Validation and server
//! rejections exit non-zero.

use anyhow::{Context, Result, bail};
use techhub_core::client::{ApiResult, AuthClient};
use techhub_core::session::{Credentials, RegistrationProfile, SessionUser};
use techhub_core::validate::{self, FieldError};

pub async fn login(auth: &AuthClient, email: String, password: String) -> Result<()> {
    let credentials = Credentials { email, password };
    if let Err(reason) = validate::validate_login(&credentials) {
        bail!("{}", login_failure_text(reason));
    }

    match auth.login(&credentials).await.context("login request")? {
        ApiResult::Ok(payload) => {
            let user = SessionUser::from(payload);
            println!("Welcome Back! Signed in as {}", user.full_name());
            println!("Department: {}", user.department);
            println!("Task: {}", user.task);
            Ok(())
        }
        ApiResult::Rejected { status, message } => {
            let message = message.unwrap_or_else(|| "Please check your credentials".to_string());
            bail!("Login Failed ({status}): {message}");
        }
    }
}

pub struct RegisterArgs {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub password: String,
    pub department: String,
    pub task: String,
}

pub async fn register(auth: &AuthClient, args: RegisterArgs) -> Result<()> {
    let profile = RegistrationProfile {
        name: args.name,
        surname: args.surname,
        email: args.email,
        password: args.password,
        department: args.department,
        task: args.task,
    };
    if let Err(reason) = validate::validate_registration(&profile) {
        bail!("{}", register_failure_text(reason));
    }

    match auth.register(&profile).await.context("register request")? {
        ApiResult::Ok(()) => {
            println!("Registration Successful: your account has been created");
            Ok(())
        }
        ApiResult::Rejected { status, message } => {
            let message = message.unwrap_or_else(|| "Unknown error occurred".to_string());
            bail!("Registration Failed ({status}): {message}");
        }
    }
}

fn login_failure_text(reason: FieldError) -> &'static str {
    match reason {
        FieldError::MissingFields => "Missing Information: please enter both email and password",
        FieldError::InvalidEmail => "Invalid Email: please enter a valid email address",
        FieldError::WeakPassword => "Invalid Password: please enter a valid password",
    }
}

fn register_failure_text(reason: FieldError) -> &'static str {
    match reason {
        FieldError::MissingFields => "Missing Info: please fill in all fields",
        FieldError::InvalidEmail => "Invalid Email: please enter a valid email address",
        FieldError::WeakPassword => {
            "Weak Password: password must be at least 6 characters long"
        }
    }
}
