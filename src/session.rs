use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    error::{AdminError, ValidationError},
    settings::KeyValueStore,
};

pub const ADMIN_SECRET_KEY: &str = "admin-password";
pub const MIN_SECRET_LEN: usize = 6;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum AdminSession {
    #[default]
    Unauthenticated,
    Authenticated,
}

impl AdminSession {
    pub fn is_authenticated(self) -> bool {
        self == AdminSession::Authenticated
    }
}

/// The single shared password in front of the admin panel.
pub struct SessionGate {
    secret: String,
    storage: Arc<dyn KeyValueStore>,
}

impl SessionGate {
    /// Reads the stored secret once, falling back to `default` on first run.
    pub async fn load(storage: Arc<dyn KeyValueStore>, default: &str) -> Result<Self, AdminError> {
        let secret = match storage.get(ADMIN_SECRET_KEY).await? {
            Some(saved) => saved,
            None => {
                info!("no stored admin password, using configured default");
                default.to_string()
            },
        };
        Ok(Self { secret, storage })
    }

    pub fn verify(&self, attempt: &str) -> Result<(), AdminError> {
        if attempt == self.secret {
            Ok(())
        } else {
            Err(AdminError::InvalidPassword)
        }
    }

    /// Moves `session` to authenticated when the password matches; leaves it untouched otherwise.
    pub fn login(&self, session: &mut AdminSession, attempt: &str) -> Result<(), AdminError> {
        self.verify(attempt)?;
        *session = AdminSession::Authenticated;
        Ok(())
    }

    pub fn logout(session: &mut AdminSession) {
        *session = AdminSession::Unauthenticated;
    }

    pub async fn change_secret(&mut self, new_secret: &str) -> Result<(), AdminError> {
        if new_secret.chars().count() < MIN_SECRET_LEN {
            return Err(ValidationError::PasswordTooShort.into());
        }

        if let Err(err) = self.storage.set(ADMIN_SECRET_KEY, new_secret).await {
            warn!(error = %err, "failed to persist admin password");
            return Err(err.into());
        }
        self.secret = new_secret.to_string();
        info!("admin password changed");
        Ok(())
    }
}
