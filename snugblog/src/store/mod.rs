//! Persistence seam for users, posts, comments, messages and the two
//! membership relations.
//!
//! Every method is one atomic operation against the backing store. The like
//! and connection toggles in particular change the set and its counter (on
//! both users, for connections) together or not at all.

mod memory;
mod redis_store;

pub use memory::MemoryStore;
pub use redis_store::{RedisStore, SERVICE};

use crate::{
    errors::SocialResult,
    id::EntityId,
    models::{Comment, Message, NewComment, NewMessage, NewPost, NewUser, Post, ProfileUpdate, User},
};

#[allow(async_fn_in_trait)]
pub trait SocialStore {
    /// Fails with `UniqueConstraintViolation` when the username or email is taken.
    async fn create_user(&self, user: NewUser) -> SocialResult<User>;
    async fn get_user(&self, id: EntityId) -> SocialResult<Option<User>>;
    /// Case-insensitive lookup.
    async fn find_user_by_username(&self, username: &str) -> SocialResult<Option<User>>;
    /// Case-insensitive lookup.
    async fn find_user_by_email(&self, email: &str) -> SocialResult<Option<User>>;
    /// Every user in id order.
    async fn list_users(&self) -> SocialResult<Vec<User>>;
    /// Users for `ids` in the given order; unknown ids are skipped.
    async fn get_users(&self, ids: &[EntityId]) -> SocialResult<Vec<User>>;
    async fn update_profile(&self, id: EntityId, update: ProfileUpdate) -> SocialResult<User>;

    async fn create_post(&self, post: NewPost) -> SocialResult<Post>;
    async fn get_post(&self, id: EntityId) -> SocialResult<Option<Post>>;
    async fn update_post(&self, id: EntityId, title: String, content: String) -> SocialResult<Post>;
    /// Removes the post together with its comments and like set.
    async fn delete_post(&self, id: EntityId) -> SocialResult<()>;
    /// Newest first.
    async fn recent_posts(&self, limit: usize) -> SocialResult<Vec<Post>>;
    /// Newest first.
    async fn posts_by_author(&self, author_id: EntityId) -> SocialResult<Vec<Post>>;
    async fn count_posts_by_author(&self, author_id: EntityId) -> SocialResult<u64>;

    /// Fails with `NotFound` when the post does not exist.
    async fn create_comment(&self, comment: NewComment) -> SocialResult<Comment>;
    /// Creation order.
    async fn comments_for_post(&self, post_id: EntityId) -> SocialResult<Vec<Comment>>;

    /// Flips `user_id` in the post's liked set and returns whether it is liked afterwards.
    async fn toggle_like(&self, post_id: EntityId, user_id: EntityId) -> SocialResult<bool>;
    /// Flips the symmetric connection and returns whether the pair is connected afterwards.
    async fn toggle_connection(&self, user_id: EntityId, other_id: EntityId) -> SocialResult<bool>;

    /// Fails with `NotFound` when either participant does not exist.
    async fn create_message(&self, message: NewMessage) -> SocialResult<Message>;
    /// Messages in either direction between the pair, in creation order.
    async fn conversation(&self, user_x: EntityId, user_y: EntityId) -> SocialResult<Vec<Message>>;
}
