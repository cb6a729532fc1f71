//! Account registry for local farmer accounts

use std::sync::Arc;

use bcrypt::{hash, verify};
use serde::{Deserialize, Serialize};
use shared::validation::{validate_bangladesh_phone, validate_email, validate_password};
use shared::{Language, User};
use uuid::Uuid;

use super::storage::{keys, load_json, save_json, KeyValueStore};
use crate::error::{AppError, AppResult};

/// Input for registering a farmer account
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone: String,
}

/// Stored account: the public profile plus its password hash
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCredential {
    #[serde(flatten)]
    pub user: User,
    pub password_hash: String,
}

/// Credential list keyed by email
pub struct IdentityStore {
    store: Arc<dyn KeyValueStore>,
    credentials: Vec<StoredCredential>,
    bcrypt_cost: u32,
}

impl IdentityStore {
    pub fn load(store: Arc<dyn KeyValueStore>, bcrypt_cost: u32) -> AppResult<Self> {
        let credentials: Vec<StoredCredential> =
            load_json(store.as_ref(), keys::USERS)?.unwrap_or_default();
        Ok(Self {
            store,
            credentials,
            bcrypt_cost,
        })
    }

    /// Create an account. Returns `None` when the email is already taken,
    /// leaving the existing account untouched. A taken email wins over any
    /// field validation error.
    pub fn register(&mut self, input: RegisterInput) -> AppResult<Option<User>> {
        if self.find(&input.email).is_some() {
            tracing::debug!("Registration refused, email already in use");
            return Ok(None);
        }

        if input.name.trim().is_empty() {
            return Err(AppError::invalid("name", "Name is required"));
        }
        validate_email(&input.email).map_err(|msg| AppError::invalid("email", msg))?;
        validate_password(&input.password).map_err(|msg| AppError::invalid("password", msg))?;
        if !input.phone.trim().is_empty() {
            validate_bangladesh_phone(&input.phone)
                .map_err(|msg| AppError::invalid("phone", msg))?;
        }

        let password_hash = hash(&input.password, self.bcrypt_cost)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        let user = User {
            id: Uuid::new_v4(),
            name: input.name,
            email: input.email,
            phone: input.phone,
            language: Language::English,
            badges: Vec::new(),
        };

        let mut next = self.credentials.clone();
        next.push(StoredCredential {
            user: user.clone(),
            password_hash,
        });
        self.commit(next)?;

        tracing::info!("Registered user {}", user.id);
        Ok(Some(user))
    }

    /// Check an email/password pair. Returns `None` on any mismatch.
    pub fn login(&self, email: &str, password: &str) -> AppResult<Option<User>> {
        let Some(credential) = self.find(email) else {
            return Ok(None);
        };

        let valid = verify(password, &credential.password_hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;

        Ok(valid.then(|| credential.user.clone()))
    }

    /// Write a changed profile back to its stored account
    pub fn sync_profile(&mut self, user: &User) -> AppResult<()> {
        let Some(index) = self.credentials.iter().position(|c| c.user.id == user.id) else {
            return Ok(());
        };
        let mut next = self.credentials.clone();
        next[index].user = user.clone();
        self.commit(next)
    }

    fn find(&self, email: &str) -> Option<&StoredCredential> {
        self.credentials.iter().find(|c| c.user.email == email)
    }

    fn commit(&mut self, next: Vec<StoredCredential>) -> AppResult<()> {
        save_json(self.store.as_ref(), keys::USERS, &next)?;
        self.credentials = next;
        Ok(())
    }
}
