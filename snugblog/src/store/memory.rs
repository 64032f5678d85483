use std::collections::BTreeMap;

use tokio::sync::Mutex;

use crate::{
    errors::{SocialError, SocialResult},
    id::EntityId,
    models::{Comment, Message, NewComment, NewMessage, NewPost, NewUser, Post, ProfileUpdate, User},
    store::SocialStore,
    types::MemberSet,
};

/// Process-local store. One mutex guards all state, so each trait call is a
/// single critical section.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    user_seq: EntityId,
    post_seq: EntityId,
    comment_seq: EntityId,
    message_seq: EntityId,
    users: BTreeMap<EntityId, User>,
    posts: BTreeMap<EntityId, Post>,
    comments: BTreeMap<EntityId, Comment>,
    messages: BTreeMap<EntityId, Message>,
}

fn next_id(seq: &mut EntityId) -> EntityId {
    *seq += 1;
    *seq
}

impl MemoryState {
    fn claim(&self, field: &str, value: &str, owner: Option<EntityId>) -> SocialResult<()> {
        let taken_by = self.users.values().find(|user| {
            let current = match field {
                "username" => &user.username,
                _ => &user.email,
            };
            Some(user.id) != owner && current.eq_ignore_ascii_case(value)
        });
        match taken_by {
            Some(user) => Err(SocialError::UniqueConstraintViolation {
                field: field.to_string(),
                existing_entity_id: user.id.to_string(),
            }),
            None => Ok(()),
        }
    }

    fn require_user(&self, id: EntityId) -> SocialResult<()> {
        if self.users.contains_key(&id) {
            Ok(())
        } else {
            Err(SocialError::not_found("user", id))
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SocialStore for MemoryStore {
    async fn create_user(&self, user: NewUser) -> SocialResult<User> {
        let mut state = self.state.lock().await;
        state.claim("username", &user.username, None)?;
        state.claim("email", &user.email, None)?;
        let id = next_id(&mut state.user_seq);
        let created = User {
            id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            image_file: user.image_file,
            connections: 0,
            connected_users: MemberSet::new(),
        };
        state.users.insert(id, created.clone());
        Ok(created)
    }

    async fn get_user(&self, id: EntityId) -> SocialResult<Option<User>> {
        Ok(self.state.lock().await.users.get(&id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> SocialResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state.users.values().find(|user| user.username.eq_ignore_ascii_case(username)).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> SocialResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state.users.values().find(|user| user.email.eq_ignore_ascii_case(email)).cloned())
    }

    async fn list_users(&self) -> SocialResult<Vec<User>> {
        Ok(self.state.lock().await.users.values().cloned().collect())
    }

    async fn get_users(&self, ids: &[EntityId]) -> SocialResult<Vec<User>> {
        let state = self.state.lock().await;
        Ok(ids.iter().filter_map(|id| state.users.get(id).cloned()).collect())
    }

    async fn update_profile(&self, id: EntityId, update: ProfileUpdate) -> SocialResult<User> {
        let mut state = self.state.lock().await;
        state.require_user(id)?;
        state.claim("username", &update.username, Some(id))?;
        state.claim("email", &update.email, Some(id))?;
        let user = state.users.get_mut(&id).ok_or_else(|| SocialError::not_found("user", id))?;
        user.username = update.username;
        user.email = update.email;
        if let Some(image_file) = update.image_file {
            user.image_file = image_file;
        }
        Ok(user.clone())
    }

    async fn create_post(&self, post: NewPost) -> SocialResult<Post> {
        let mut state = self.state.lock().await;
        state.require_user(post.author_id)?;
        let id = next_id(&mut state.post_seq);
        let created = Post {
            id,
            author_id: post.author_id,
            title: post.title,
            content: post.content,
            date_posted: post.date_posted,
            likes: 0,
            liked_users: MemberSet::new(),
        };
        state.posts.insert(id, created.clone());
        Ok(created)
    }

    async fn get_post(&self, id: EntityId) -> SocialResult<Option<Post>> {
        Ok(self.state.lock().await.posts.get(&id).cloned())
    }

    async fn update_post(&self, id: EntityId, title: String, content: String) -> SocialResult<Post> {
        let mut state = self.state.lock().await;
        let post = state.posts.get_mut(&id).ok_or_else(|| SocialError::not_found("post", id))?;
        post.title = title;
        post.content = content;
        Ok(post.clone())
    }

    async fn delete_post(&self, id: EntityId) -> SocialResult<()> {
        let mut state = self.state.lock().await;
        if state.posts.remove(&id).is_none() {
            return Err(SocialError::not_found("post", id));
        }
        state.comments.retain(|_, comment| comment.post_id != id);
        Ok(())
    }

    async fn recent_posts(&self, limit: usize) -> SocialResult<Vec<Post>> {
        let state = self.state.lock().await;
        Ok(state.posts.values().rev().take(limit).cloned().collect())
    }

    async fn posts_by_author(&self, author_id: EntityId) -> SocialResult<Vec<Post>> {
        let state = self.state.lock().await;
        Ok(state
            .posts
            .values()
            .rev()
            .filter(|post| post.author_id == author_id)
            .cloned()
            .collect())
    }

    async fn count_posts_by_author(&self, author_id: EntityId) -> SocialResult<u64> {
        let state = self.state.lock().await;
        Ok(state.posts.values().filter(|post| post.author_id == author_id).count() as u64)
    }

    async fn create_comment(&self, comment: NewComment) -> SocialResult<Comment> {
        let mut state = self.state.lock().await;
        if !state.posts.contains_key(&comment.post_id) {
            return Err(SocialError::not_found("post", comment.post_id));
        }
        state.require_user(comment.user_id)?;
        let id = next_id(&mut state.comment_seq);
        let created = Comment {
            id,
            content: comment.content,
            user_id: comment.user_id,
            post_id: comment.post_id,
        };
        state.comments.insert(id, created.clone());
        Ok(created)
    }

    async fn comments_for_post(&self, post_id: EntityId) -> SocialResult<Vec<Comment>> {
        let state = self.state.lock().await;
        Ok(state
            .comments
            .values()
            .filter(|comment| comment.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn toggle_like(&self, post_id: EntityId, user_id: EntityId) -> SocialResult<bool> {
        let mut state = self.state.lock().await;
        let post = state
            .posts
            .get_mut(&post_id)
            .ok_or_else(|| SocialError::not_found("post", post_id))?;
        Ok(post.toggle_like(user_id))
    }

    async fn toggle_connection(&self, user_id: EntityId, other_id: EntityId) -> SocialResult<bool> {
        let mut state = self.state.lock().await;
        state.require_user(user_id)?;
        state.require_user(other_id)?;
        let connected = !state.users[&user_id].is_connected_to(other_id);
        for (owner, member) in [(user_id, other_id), (other_id, user_id)] {
            if let Some(user) = state.users.get_mut(&owner) {
                user.set_connection(member, connected);
            }
        }
        Ok(connected)
    }

    async fn create_message(&self, message: NewMessage) -> SocialResult<Message> {
        let mut state = self.state.lock().await;
        state.require_user(message.sender_id)?;
        state.require_user(message.receiver_id)?;
        let id = next_id(&mut state.message_seq);
        let created = Message {
            id,
            content: message.content,
            sender_id: message.sender_id,
            receiver_id: message.receiver_id,
            created_at: message.created_at,
        };
        state.messages.insert(id, created.clone());
        Ok(created)
    }

    async fn conversation(&self, user_x: EntityId, user_y: EntityId) -> SocialResult<Vec<Message>> {
        let state = self.state.lock().await;
        Ok(state
            .messages
            .values()
            .filter(|message| {
                (message.sender_id == user_x && message.receiver_id == user_y)
                    || (message.sender_id == user_y && message.receiver_id == user_x)
            })
            .cloned()
            .collect())
    }
}
