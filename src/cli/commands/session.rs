//! captcha, login, register, logout, whoami

use std::path::PathBuf;

use tracing::debug;

use crate::cli::Context;
use crate::cli_output::{icons, print_fields, print_status};
use crate::error::{AuthError, ProphetResult};
use crate::models::{format_timestamp, LoginRequest, RegisterRequest};

const PASSWORD_ENV: &str = "PROPHET_PASSWORD";

fn read_password() -> ProphetResult<String> {
    if let Ok(password) = std::env::var(PASSWORD_ENV) {
        if !password.is_empty() {
            return Ok(password);
        }
    }
    Ok(rpassword::prompt_password("Password: ")?)
}

pub async fn captcha(ctx: &Context, out: Option<PathBuf>, open: bool) -> ProphetResult<()> {
    let captcha = ctx.api.auth().captcha().await?;
    let image = captcha.image_bytes().map_err(|e| AuthError::InvalidCaptcha {
        message: e.to_string(),
    })?;

    let path = out.unwrap_or_else(|| ctx.config.data_dir.join("captcha.png"));
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, image)?;

    print_status(icons::SUCCESS, &format!("Captcha saved to {}", path.display()));
    println!("  captcha id: {}", captcha.captcha_id);

    if open {
        if let Err(err) = open::that(&path) {
            debug!(error = %err, "could not open captcha image");
            print_status(icons::WARNING, "Could not open the image viewer");
        }
    }
    Ok(())
}

pub async fn login(ctx: &Context, username: String, captcha_id: String, captcha: String) -> ProphetResult<()> {
    let request = LoginRequest {
        username,
        password: read_password()?,
        captcha_id,
        captcha_code: captcha,
    };
    let user = ctx.auth.login(&request).await?;
    print_status(icons::SUCCESS, &format!("Logged in as {}", user.username));
    Ok(())
}

pub async fn register(
    ctx: &Context,
    username: String,
    email: String,
    captcha_id: String,
    captcha: String,
) -> ProphetResult<()> {
    let request = RegisterRequest {
        username,
        email,
        password: read_password()?,
        captcha_id,
        captcha_code: captcha,
    };
    let user = ctx.auth.register(&request).await?;
    print_status(
        icons::SUCCESS,
        &format!("Registered {}. Run `prophet login` to sign in.", user.username),
    );
    Ok(())
}

pub async fn logout(ctx: &Context) -> ProphetResult<()> {
    ctx.auth.logout().await;
    print_status(icons::SUCCESS, "Logged out");
    Ok(())
}

pub fn whoami(ctx: &Context) -> ProphetResult<()> {
    let user = ctx.auth.user().ok_or(AuthError::NotLoggedIn)?;
    print_fields(&[
        (ctx.label("id"), user.id.to_string()),
        (ctx.label("username"), user.username.clone()),
        (ctx.label("email"), super::or_dash(user.email.as_deref())),
        (ctx.label("role"), super::or_dash(user.role.as_deref())),
        (ctx.label("created_at"), format_timestamp(user.created_at.as_ref())),
    ]);
    Ok(())
}
