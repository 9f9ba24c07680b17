// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Login, signup, logout and password reset.
//!
//! The flow starts from an email address: a known email continues to the
//! password prompt, an unknown one to signup.

use tracing::info;
use wisssh_core::protocol::{
    paths, LoginRequest, PasswordResetRequest, SignupRequest, TokenPair, UsernameLookup,
};

use crate::api::{ApiRequest, Transport};
use crate::client::Client;
use crate::error::Result;

/// Where the flow goes after the email was entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStep {
    /// The email belongs to `name`; ask for the password.
    Login { email: String, name: String },
    /// No account yet; ask for a name and password.
    Signup { email: String },
}

impl<T: Transport + 'static> Client<T> {
    /// Decide between login and signup for `email`.
    pub async fn lookup_email(&self, email: &str) -> Result<AuthStep> {
        let path = format!("{}/{}", paths::USERNAME_BY_EMAIL, email.trim());
        let response = match self.api().request_public(ApiRequest::get(path)).await {
            Ok(response) => response,
            Err(e) if e.status() == Some(404) => {
                return Ok(AuthStep::Signup {
                    email: email.trim().to_string(),
                })
            }
            Err(e) => return Err(e),
        };

        let lookup: UsernameLookup = if response.body.is_empty() {
            UsernameLookup::default()
        } else {
            response.json()?
        };
        Ok(match lookup.name {
            Some(name) => AuthStep::Login {
                email: email.trim().to_string(),
                name,
            },
            None => AuthStep::Signup {
                email: email.trim().to_string(),
            },
        })
    }

    /// Log in and store the issued tokens.
    ///
    /// With `remember` the access token outlives the process.
    pub async fn login(&self, email: &str, password: &str, remember: bool) -> Result<()> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self
            .api()
            .request_public(ApiRequest::post(paths::LOGIN, &body)?)
            .await?;
        let pair: TokenPair = response.json()?;

        // Nothing cached belongs to the new session
        self.cache().lock().reset();
        self.images().reset();
        self.session().set_remember(remember);
        self.session().login(pair)?;
        Ok(())
    }

    /// Create an account, then log into it with the same credentials.
    pub async fn signup(
        &self,
        email: &str,
        name: &str,
        password: &str,
        remember: bool,
    ) -> Result<()> {
        let body = SignupRequest {
            email: email.to_string(),
            name: name.to_string(),
            password: password.to_string(),
        };
        self.api()
            .request_public(ApiRequest::post(paths::SIGNUP, &body)?)
            .await?;
        info!(name, "account created");
        self.login(email, password, remember).await
    }

    /// End the session and drop everything cached for it.
    pub fn logout(&self) -> Result<()> {
        self.session().logout()?;
        self.cache().lock().reset();
        self.images().reset();
        Ok(())
    }

    pub async fn send_password_reset(&self, email: &str) -> Result<()> {
        let body = PasswordResetRequest {
            email: email.to_string(),
        };
        self.api()
            .request_public(ApiRequest::post(paths::PASSWORD_RESET_EMAIL, &body)?)
            .await?;
        Ok(())
    }

    /// Check the code from the reset email.
    pub async fn verify_password_reset(&self, code: &str) -> Result<()> {
        let path = format!("{}/{}", paths::VERIFY_PASSWORD_RESET, code.trim());
        self.api().request_public(ApiRequest::get(path)).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
