//! Application operations over a [`SocialStore`].
//!
//! The service validates forms, checks who may do what, and turns store
//! failures into the shapes callers render. Every operation that acts on
//! behalf of someone takes an explicit [`Viewer`].

mod accounts;
mod directory;
mod engagement;
mod messaging;
mod posts;

pub use directory::UserListKind;

use argon2::{Algorithm, Argon2, Params, Version};

use crate::{
    config::{AppConfig, SiteSettings},
    errors::{SocialError, SocialResult, ValidationError},
    id::EntityId,
    models::{Post, User, Viewer},
    store::SocialStore,
};

pub struct SocialService<S> {
    store: S,
    site: SiteSettings,
    argon2: Argon2<'static>,
}

impl<S: SocialStore> SocialService<S> {
    pub fn new(store: S, config: &AppConfig) -> SocialResult<Self> {
        let security = &config.security;
        let params = Params::new(
            security.argon2_memory_kib,
            security.argon2_iterations,
            security.argon2_parallelism,
            None,
        )
        .map_err(|err| SocialError::other(format!("invalid argon2 parameters: {err}")))?;
        Ok(Self {
            store,
            site: config.site.clone(),
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    async fn require_user(&self, id: EntityId) -> SocialResult<User> {
        self.store
            .get_user(id)
            .await?
            .ok_or_else(|| SocialError::not_found("user", id))
    }

    async fn require_post(&self, id: EntityId) -> SocialResult<Post> {
        self.store
            .get_post(id)
            .await?
            .ok_or_else(|| SocialError::not_found("post", id))
    }

    async fn require_username(&self, username: &str) -> SocialResult<User> {
        self.store
            .find_user_by_username(username)
            .await?
            .ok_or_else(|| SocialError::not_found("user", username))
    }
}

/// Reports a taken username or email as a field issue on the form.
fn unique_to_validation(err: SocialError) -> SocialError {
    match err {
        SocialError::UniqueConstraintViolation { field, .. } => {
            let message = format!("That {field} is taken. Please choose a different one.");
            SocialError::Validation(ValidationError::single(field, "validation.unique", message))
        }
        other => other,
    }
}

fn ensure_author(post: &Post, viewer: &Viewer) -> SocialResult<()> {
    if post.is_authored_by(viewer) {
        Ok(())
    } else {
        log::warn!("user {} refused on post {} they did not write", viewer.id, post.id);
        Err(SocialError::forbidden("only the author may change this post"))
    }
}
