// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;
use std::path::Path;

use wisssh_core::protocol::ProfileUpdate;
use wisssh_core::ImageKind;

use super::{print_lines, read_image};
use crate::api::Transport;
use crate::auth::AuthStep;
use crate::client::Client;
use crate::display::format_user;
use crate::error::{Error, Result};

/// Log in after checking that the email is registered.
pub async fn login<T: Transport + 'static>(
    client: &Client<T>,
    email: &str,
    password: &str,
    remember: bool,
    out: &mut impl Write,
) -> Result<()> {
    match client.lookup_email(email).await? {
        AuthStep::Signup { email } => Err(Error::UnknownEmail(email)),
        AuthStep::Login { email, name } => {
            client.login(&email, password, remember).await?;
            writeln!(out, "Logged in as {}", name)?;
            Ok(())
        }
    }
}

pub async fn signup<T: Transport + 'static>(
    client: &Client<T>,
    email: &str,
    name: &str,
    password: &str,
    remember: bool,
    out: &mut impl Write,
) -> Result<()> {
    client.signup(email, name, password, remember).await?;
    writeln!(out, "Signed up as {}", name)?;
    Ok(())
}

pub fn logout<T: Transport + 'static>(client: &Client<T>, out: &mut impl Write) -> Result<()> {
    client.logout()?;
    writeln!(out, "Logged out")?;
    Ok(())
}

pub async fn whoami<T: Transport + 'static>(client: &Client<T>, out: &mut impl Write) -> Result<()> {
    let user = client.current_user().await?;
    print_lines(out, &format_user(&user))
}

/// Rename the user and/or upload a new avatar.
///
/// With neither given this behaves like `whoami`.
pub async fn profile<T: Transport + 'static>(
    client: &Client<T>,
    name: Option<String>,
    avatar: Option<&Path>,
    out: &mut impl Write,
) -> Result<()> {
    let user = client.current_user().await?;
    if name.is_none() && avatar.is_none() {
        return print_lines(out, &format_user(&user));
    }

    let mut image_extension = user.image_extension.clone();
    if let Some(path) = avatar {
        let (extension, bytes) = read_image(path)?;
        client
            .images()
            .upload(ImageKind::Avatar, &user.id, &extension, bytes)
            .await?;
        image_extension = Some(extension);
    }

    let update = ProfileUpdate {
        name: name.unwrap_or(user.name),
        image_extension,
    };
    let updated = client.update_profile(update).await?;
    writeln!(out, "Updated profile of {}", updated.name)?;
    Ok(())
}

/// Send the reset mail, or confirm the reset with the mailed code.
pub async fn reset_password<T: Transport + 'static>(
    client: &Client<T>,
    email: &str,
    code: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    match code {
        Some(code) => {
            client.verify_password_reset(code).await?;
            writeln!(out, "Password reset confirmed")?;
        }
        None => {
            client.send_password_reset(email).await?;
            writeln!(out, "Sent a password reset mail to {}", email)?;
        }
    }
    Ok(())
}
