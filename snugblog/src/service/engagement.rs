use crate::{
    errors::{SocialError, SocialResult},
    id::EntityId,
    models::Viewer,
    service::SocialService,
    store::SocialStore,
};

impl<S: SocialStore> SocialService<S> {
    /// Likes the post if the viewer has not yet, unlikes it otherwise.
    /// Returns whether the viewer likes it afterwards.
    pub async fn toggle_like(&self, viewer: &Viewer, post_id: EntityId) -> SocialResult<bool> {
        let liked = self.store.toggle_like(post_id, viewer.id).await?;
        log::info!(
            "user {} {} post {}",
            viewer.id,
            if liked { "liked" } else { "unliked" },
            post_id
        );
        Ok(liked)
    }

    /// Connects or disconnects the viewer and `target_id` on both sides at once.
    pub async fn toggle_connection(&self, viewer: &Viewer, target_id: EntityId) -> SocialResult<bool> {
        if viewer.id == target_id {
            log::warn!("user {} tried to connect to themselves", viewer.id);
            return Err(SocialError::forbidden("cannot connect to yourself"));
        }
        let connected = self.store.toggle_connection(viewer.id, target_id).await?;
        log::info!(
            "users {} and {} {}",
            viewer.id,
            target_id,
            if connected { "connected" } else { "disconnected" }
        );
        Ok(connected)
    }
}
