//! Application session: the signed-in user, their crop batches, the
//! account registry and the UI language, restored from storage at start-up.

use std::sync::Arc;

use shared::{Badge, CropBatch, CropBatchUpdate, Language, NewCropBatch, User};
use uuid::Uuid;

use super::auth::{IdentityStore, RegisterInput};
use super::crop::CropStore;
use super::storage::{keys, load_json, save_json, KeyValueStore};
use crate::error::AppResult;

pub struct AppSession {
    store: Arc<dyn KeyValueStore>,
    identities: IdentityStore,
    crops: CropStore,
    user: Option<User>,
    language: Language,
}

impl AppSession {
    /// Restore the session from `store`
    pub fn open(store: Arc<dyn KeyValueStore>, bcrypt_cost: u32) -> AppResult<Self> {
        let identities = IdentityStore::load(store.clone(), bcrypt_cost)?;
        let crops = CropStore::load(store.clone())?;
        let user: Option<User> = load_json(store.as_ref(), keys::USER)?;
        let language: Language = load_json(store.as_ref(), keys::LANGUAGE)?.unwrap_or_default();

        if let Some(user) = &user {
            tracing::info!("Restored session for user {}", user.id);
        }

        Ok(Self {
            store,
            identities,
            crops,
            user,
            language,
        })
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn crops(&self) -> &CropStore {
        &self.crops
    }

    /// Register an account and sign it in. Returns `false` when the email
    /// is already registered.
    pub fn register(&mut self, input: RegisterInput) -> AppResult<bool> {
        match self.identities.register(input)? {
            Some(user) => {
                self.set_user(Some(user))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Sign in. Returns `false` on a credential mismatch.
    pub fn login(&mut self, email: &str, password: &str) -> AppResult<bool> {
        match self.identities.login(email, password)? {
            Some(user) => {
                tracing::info!("User {} logged in", user.id);
                self.set_user(Some(user))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Sign out, discarding the whole crop collection
    pub fn logout(&mut self) -> AppResult<()> {
        if let Some(user) = &self.user {
            tracing::info!("User {} logged out", user.id);
        }
        self.set_user(None)?;
        self.crops.clear()
    }

    /// Add a batch, granting the first-harvest badge on the way. Once the
    /// batch is stored the call succeeds; a badge that cannot be saved is
    /// logged and granted again on the next add.
    pub fn add_crop(&mut self, input: NewCropBatch) -> AppResult<CropBatch> {
        let batch = self.crops.add(input)?;

        if let Some(mut user) = self.user.clone() {
            if user.grant_badge(Badge::FirstHarvest) {
                let user_id = user.id;
                match self.save_profile(user) {
                    Ok(()) => tracing::info!("User {} earned the first harvest badge", user_id),
                    Err(e) => tracing::warn!("Could not save badge for user {}: {}", user_id, e),
                }
            }
        }

        Ok(batch)
    }

    pub fn update_crop(&mut self, id: Uuid, update: CropBatchUpdate) -> AppResult<Option<CropBatch>> {
        self.crops.update(id, update)
    }

    pub fn delete_crop(&mut self, id: Uuid) -> AppResult<bool> {
        self.crops.remove(id)
    }

    /// Change the UI language, also recording it on the signed-in user
    pub fn set_language(&mut self, language: Language) -> AppResult<()> {
        save_json(self.store.as_ref(), keys::LANGUAGE, &language)?;
        self.language = language;

        if let Some(mut user) = self.user.clone() {
            user.language = language;
            self.save_profile(user)?;
        }
        Ok(())
    }

    /// Write a changed profile to the account registry and the session
    fn save_profile(&mut self, user: User) -> AppResult<()> {
        self.identities.sync_profile(&user)?;
        self.set_user(Some(user))
    }

    fn set_user(&mut self, user: Option<User>) -> AppResult<()> {
        match &user {
            Some(u) => save_json(self.store.as_ref(), keys::USER, u)?,
            None => self.store.remove(keys::USER)?,
        }
        self.user = user;
        Ok(())
    }
}
