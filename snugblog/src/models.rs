//! Entity and view models for the blog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    id::EntityId,
    types::{MemberSet, Relationship},
};

/// A registered account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub username: String,
    pub email: String,
    /// Argon2 PHC string; never rendered.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub image_file: String,
    /// Denormalized size of `connected_users`.
    pub connections: u64,
    #[serde(default)]
    pub connected_users: MemberSet,
}

impl User {
    pub fn is_connected_to(&self, other: EntityId) -> bool {
        self.connected_users.contains(other)
    }

    /// How `other` relates to this user when this user is the viewer.
    pub fn relationship_to(&self, other: EntityId) -> Relationship {
        if self.connected_users.contains(other) {
            Relationship::Connected
        } else if other == self.id {
            Relationship::Myself
        } else {
            Relationship::NotConnected
        }
    }

    /// Public path of the profile picture.
    pub fn image_path(&self) -> String {
        format!("/static/profile_pics/{}", self.image_file)
    }

    /// Sets membership of `other`, keeping the counter in step.
    pub(crate) fn set_connection(&mut self, other: EntityId, connected: bool) {
        if connected {
            if self.connected_users.insert(other) {
                self.connections += 1;
            }
        } else if self.connected_users.remove(other) {
            self.connections = self.connections.saturating_sub(1);
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub image_file: String,
}

#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub username: String,
    pub email: String,
    pub image_file: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: EntityId,
    pub author_id: EntityId,
    pub title: String,
    pub content: String,
    pub date_posted: DateTime<Utc>,
    /// Denormalized size of `liked_users`.
    pub likes: u64,
    #[serde(default)]
    pub liked_users: MemberSet,
}

impl Post {
    pub fn is_liked_by(&self, user_id: EntityId) -> bool {
        self.liked_users.contains(user_id)
    }

    pub fn is_authored_by(&self, viewer: &Viewer) -> bool {
        self.author_id == viewer.id
    }

    /// Flips the like of `user_id` and returns whether the post is liked afterwards.
    pub(crate) fn toggle_like(&mut self, user_id: EntityId) -> bool {
        let liked = self.liked_users.toggle(user_id);
        if liked {
            self.likes += 1;
        } else {
            self.likes = self.likes.saturating_sub(1);
        }
        liked
    }
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: EntityId,
    pub title: String,
    pub content: String,
    pub date_posted: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: EntityId,
    pub content: String,
    pub user_id: EntityId,
    pub post_id: EntityId,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub content: String,
    pub user_id: EntityId,
    pub post_id: EntityId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: EntityId,
    pub content: String,
    pub sender_id: EntityId,
    pub receiver_id: EntityId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewMessage {
    pub content: String,
    pub sender_id: EntityId,
    pub receiver_id: EntityId,
    pub created_at: DateTime<Utc>,
}

/// The authenticated identity an action runs as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    pub id: EntityId,
    pub username: String,
}

impl From<&User> for Viewer {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

/// A user listed in likers/connections, tagged relative to the viewer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserCard {
    pub user: User,
    pub relationship: Relationship,
}

/// Result of a directory search: either a list or a jump to one profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "result")]
pub enum SearchOutcome {
    Matches(Vec<User>),
    Profile(User),
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub user: User,
    pub image_file: String,
    pub posts_count: u64,
    pub connections: u64,
    /// Legacy space-joined form of the user's connections.
    pub connected_users: String,
    pub is_connected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountView {
    pub user: User,
    pub image_file: String,
    pub posts_count: u64,
    pub connections: u64,
}

/// Both directions of a pairwise message log, seen from the viewer.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationView {
    pub with: User,
    pub messages: Vec<Message>,
}
