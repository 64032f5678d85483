use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng};

use crate::{
    errors::{SocialError, SocialResult},
    forms::{LoginForm, RegistrationForm, UpdateAccountForm},
    id::{EntityId, picture_reference},
    models::{AccountView, NewUser, ProfileUpdate, ProfileView, User, Viewer},
    service::{SocialService, unique_to_validation},
    store::SocialStore,
};

impl<S: SocialStore> SocialService<S> {
    pub async fn register(&self, form: RegistrationForm) -> SocialResult<User> {
        form.validate()?;
        let password_hash = self.hash_password(&form.password)?;
        let user = self
            .store
            .create_user(NewUser {
                username: form.username,
                email: form.email,
                password_hash,
                image_file: self.site.default_image.clone(),
            })
            .await
            .map_err(unique_to_validation)?;
        log::info!("registered user {} ({})", user.id, user.username);
        Ok(user)
    }

    /// Returns the viewer for valid credentials and `None` otherwise.
    pub async fn login(&self, form: &LoginForm) -> SocialResult<Option<Viewer>> {
        form.validate()?;
        let Some(user) = self.store.find_user_by_email(&form.email).await? else {
            log::warn!("login refused: no account for {}", form.email);
            return Ok(None);
        };
        if self.verify_password(&form.password, &user.password_hash)? {
            log::debug!("user {} logged in", user.id);
            Ok(Some(Viewer::from(&user)))
        } else {
            log::warn!("login refused: wrong password for user {}", user.id);
            Ok(None)
        }
    }

    pub async fn user(&self, id: EntityId) -> SocialResult<User> {
        self.require_user(id).await
    }

    pub async fn account(&self, viewer: &Viewer) -> SocialResult<AccountView> {
        let user = self.require_user(viewer.id).await?;
        let posts_count = self.store.count_posts_by_author(user.id).await?;
        Ok(AccountView {
            image_file: user.image_path(),
            posts_count,
            connections: user.connections,
            user,
        })
    }

    pub async fn update_account(&self, viewer: &Viewer, form: UpdateAccountForm) -> SocialResult<User> {
        let extension = form.validate()?;
        let update = ProfileUpdate {
            username: form.username,
            email: form.email,
            image_file: extension.as_deref().map(picture_reference),
        };
        let user = self
            .store
            .update_profile(viewer.id, update)
            .await
            .map_err(unique_to_validation)?;
        log::info!("updated account {}", user.id);
        Ok(user)
    }

    pub async fn profile(&self, username: &str, viewer: &Viewer) -> SocialResult<ProfileView> {
        let user = self.require_username(username).await?;
        let posts_count = self.store.count_posts_by_author(user.id).await?;
        Ok(ProfileView {
            image_file: user.image_path(),
            posts_count,
            connections: user.connections,
            connected_users: user.connected_users.to_string(),
            is_connected: user.is_connected_to(viewer.id),
            user,
        })
    }

    fn hash_password(&self, password: &str) -> SocialResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| SocialError::other(format!("failed to hash password: {err}")))
    }

    fn verify_password(&self, password: &str, stored: &str) -> SocialResult<bool> {
        let parsed = PasswordHash::new(stored)
            .map_err(|err| SocialError::other(format!("stored password hash is malformed: {err}")))?;
        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(err) => Err(SocialError::other(format!("failed to verify password: {err}"))),
        }
    }
}
