//! Local stand-in for an account service. Credentials are checked for shape
//! only and nothing leaves the machine.

use crate::storage::{keys, LocalStorage, StorageError};
use async_trait::async_trait;
use chrono::Utc;
use movie_explorer_models::User;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Name, email and a password of at least 6 characters are required")]
    InvalidRegistration,

    #[error("Not logged in")]
    NotLoggedIn,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Partial profile update; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
}

#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn login(&self, email: &str, password: &str, remember: bool) -> Result<User, AuthError>;
    async fn register(&self, name: &str, email: &str, password: &str) -> Result<User, AuthError>;
    fn logout(&self) -> Result<(), AuthError>;
    fn current_user(&self) -> Option<User>;
    async fn update_profile(&self, update: ProfileUpdate) -> Result<User, AuthError>;

    fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }
}

pub struct MockAuthenticator {
    storage: Arc<LocalStorage>,
    user: RwLock<Option<User>>,
    latency: Duration,
}

impl MockAuthenticator {
    /// Restore the stored session, dropping it if unreadable
    pub fn load(storage: Arc<LocalStorage>) -> Self {
        let user = storage.load::<User>(keys::USER);
        Self {
            storage,
            user: RwLock::new(user),
            latency: Duration::ZERO,
        }
    }

    /// Simulated round-trip delay applied to login, register and profile updates
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn remembered_email(&self) -> Option<String> {
        self.storage.load(keys::REMEMBERED_EMAIL)
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn new_user_id() -> String {
        format!("user-{}", Utc::now().timestamp_millis())
    }

    fn store_user(&self, user: &User) -> Result<(), AuthError> {
        self.storage.save(keys::USER, user)?;
        *self.user.write() = Some(user.clone());
        Ok(())
    }
}

#[async_trait]
impl Authenticator for MockAuthenticator {
    async fn login(&self, email: &str, password: &str, remember: bool) -> Result<User, AuthError> {
        self.simulate_latency().await;

        let email = email.trim();
        if email.is_empty() || password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::InvalidCredentials);
        }

        let name = email.split('@').next().unwrap_or(email).to_string();
        let user = User {
            id: Self::new_user_id(),
            name,
            email: email.to_string(),
            avatar: None,
        };
        self.store_user(&user)?;

        if remember {
            self.storage.save(keys::REMEMBERED_EMAIL, email)?;
        } else {
            self.storage.remove(keys::REMEMBERED_EMAIL)?;
        }

        info!("Logged in as {}", user.email);
        Ok(user)
    }

    async fn register(&self, name: &str, email: &str, password: &str) -> Result<User, AuthError> {
        self.simulate_latency().await;

        let (name, email) = (name.trim(), email.trim());
        if name.is_empty() || email.is_empty() || password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::InvalidRegistration);
        }

        let user = User {
            id: Self::new_user_id(),
            name: name.to_string(),
            email: email.to_string(),
            avatar: None,
        };
        self.store_user(&user)?;

        info!("Registered {}", user.email);
        Ok(user)
    }

    fn logout(&self) -> Result<(), AuthError> {
        *self.user.write() = None;
        // the remembered email outlives the session
        self.storage.remove(keys::USER)?;
        Ok(())
    }

    fn current_user(&self) -> Option<User> {
        self.user.read().clone()
    }

    async fn update_profile(&self, update: ProfileUpdate) -> Result<User, AuthError> {
        self.simulate_latency().await;

        let mut user = self.current_user().ok_or(AuthError::NotLoggedIn)?;
        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(avatar) = update.avatar {
            user.avatar = Some(avatar);
        }
        self.store_user(&user)?;
        Ok(user)
    }
}
