use chrono::Utc;

use crate::{
    errors::{SocialError, SocialResult},
    forms::MessageForm,
    id::EntityId,
    models::{ConversationView, Message, NewMessage, Viewer},
    service::SocialService,
    store::SocialStore,
};

impl<S: SocialStore> SocialService<S> {
    /// Appends a message from `sender_id` to `receiver_id`.
    ///
    /// The asserted sender has to be the viewer; anything else is `Forbidden`.
    pub async fn send_message(
        &self,
        viewer: &Viewer,
        sender_id: EntityId,
        receiver_id: EntityId,
        form: MessageForm,
    ) -> SocialResult<Message> {
        if sender_id != viewer.id {
            log::warn!("user {} tried to send a message as user {}", viewer.id, sender_id);
            return Err(SocialError::forbidden("sender does not match the signed in user"));
        }
        form.validate()?;
        let message = self
            .store
            .create_message(NewMessage {
                content: form.content,
                sender_id,
                receiver_id,
                created_at: Utc::now(),
            })
            .await?;
        log::info!("user {} sent message {} to user {}", sender_id, message.id, receiver_id);
        Ok(message)
    }

    /// Messages between the pair in either direction, oldest first.
    pub async fn list_conversation(&self, user_x: EntityId, user_y: EntityId) -> SocialResult<Vec<Message>> {
        self.store.conversation(user_x, user_y).await
    }

    pub async fn conversation_view(&self, viewer: &Viewer, other_id: EntityId) -> SocialResult<ConversationView> {
        let with = self.require_user(other_id).await?;
        let messages = self.list_conversation(viewer.id, other_id).await?;
        Ok(ConversationView { with, messages })
    }
}
