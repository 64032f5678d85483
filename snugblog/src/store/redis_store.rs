use chrono::{DateTime, Utc};
use redis::{AsyncCommands, aio::ConnectionManager, cmd};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    errors::{SocialError, SocialResult},
    id::EntityId,
    keys::KeyContext,
    models::{Comment, Message, NewComment, NewMessage, NewPost, NewUser, Post, ProfileUpdate, User},
    runtime::{
        commands::{
            CascadeList, DeleteCommand, EntityRef, IndexEntry, InsertCommand, ToggleCommand, ToggleSide,
            UpdateCommand,
        },
        executor::{reply_active, reply_id},
        run_script,
        scripts::{ENTITY_DELETE_SCRIPT, ENTITY_INSERT_SCRIPT, ENTITY_UPDATE_SCRIPT, TOGGLE_MEMBERSHIP_SCRIPT},
    },
    store::SocialStore,
    types::MemberSet,
};

/// Service segment of every key written by this store.
pub const SERVICE: &str = "blog";

const USERS: &str = "users";
const POSTS: &str = "posts";
const COMMENTS: &str = "comments";
const MESSAGES: &str = "messages";

const LIKED_BY: &str = "liked_by";
const CONNECTED: &str = "connected";
const AUTHORED: &str = "authored";
const POST_COMMENTS: &str = "post_comments";

/// Stored shape of a user; the connection set lives in its own Redis set.
#[derive(Debug, Serialize, Deserialize)]
struct UserDoc {
    id: EntityId,
    username: String,
    email: String,
    password_hash: String,
    image_file: String,
    connections: u64,
}

impl UserDoc {
    fn into_user(self, connected_users: MemberSet) -> User {
        User {
            id: self.id,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            image_file: self.image_file,
            connections: self.connections,
            connected_users,
        }
    }
}

/// Stored shape of a post; the liked set lives in its own Redis set.
#[derive(Debug, Serialize, Deserialize)]
struct PostDoc {
    id: EntityId,
    author_id: EntityId,
    title: String,
    content: String,
    date_posted: DateTime<Utc>,
    likes: u64,
}

impl PostDoc {
    fn into_post(self, liked_users: MemberSet) -> Post {
        Post {
            id: self.id,
            author_id: self.author_id,
            title: self.title,
            content: self.content,
            date_posted: self.date_posted,
            likes: self.likes,
            liked_users,
        }
    }
}

/// Redis Stack backed store. Documents are RedisJSON values; every mutation
/// runs as one Lua script.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
    prefix: String,
}

impl RedisStore {
    pub fn new(conn: ConnectionManager, prefix: impl Into<String>) -> Self {
        Self {
            conn,
            prefix: prefix.into(),
        }
    }

    pub async fn connect(url: &str, prefix: impl Into<String>) -> SocialResult<Self> {
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self::new(conn, prefix))
    }

    pub fn keys(&self) -> KeyContext<'_> {
        KeyContext::new(&self.prefix, SERVICE)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Clone of the connection manager for ad-hoc commands.
    pub fn connection(&self) -> ConnectionManager {
        self.conn.clone()
    }

    async fn fetch_doc<T: DeserializeOwned>(&self, key: &str) -> SocialResult<Option<T>> {
        let mut conn = self.connection();
        let raw: Option<String> = cmd("JSON.GET").arg(key).arg("$").query_async(&mut conn).await?;
        match raw {
            Some(json) => Ok(first_of(&json)?),
            None => Ok(None),
        }
    }

    /// Documents for `keys` in order; missing keys come back as `None`.
    async fn fetch_docs<T: DeserializeOwned>(&self, keys: &[String]) -> SocialResult<Vec<Option<T>>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.connection();
        let raw: Vec<Option<String>> = cmd("JSON.MGET").arg(keys).arg("$").query_async(&mut conn).await?;
        raw.iter()
            .map(|entry| match entry {
                Some(json) => first_of(json),
                None => Ok(None),
            })
            .collect()
    }

    /// Reads the relation set `alias` for every id with one pipeline round trip.
    async fn member_sets(&self, alias: &str, ids: &[EntityId]) -> SocialResult<Vec<MemberSet>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let keys = self.keys();
        let mut pipe = redis::pipe();
        for id in ids {
            pipe.smembers(keys.relation(alias, *id));
        }
        let mut conn = self.connection();
        let sets: Vec<Vec<EntityId>> = pipe.query_async(&mut conn).await?;
        Ok(sets.into_iter().map(MemberSet::from_iter).collect())
    }

    async fn hydrate_users(&self, docs: Vec<UserDoc>) -> SocialResult<Vec<User>> {
        let ids: Vec<EntityId> = docs.iter().map(|doc| doc.id).collect();
        let sets = self.member_sets(CONNECTED, &ids).await?;
        Ok(docs.into_iter().zip(sets).map(|(doc, set)| doc.into_user(set)).collect())
    }

    async fn hydrate_posts(&self, docs: Vec<PostDoc>) -> SocialResult<Vec<Post>> {
        let ids: Vec<EntityId> = docs.iter().map(|doc| doc.id).collect();
        let sets = self.member_sets(LIKED_BY, &ids).await?;
        Ok(docs.into_iter().zip(sets).map(|(doc, set)| doc.into_post(set)).collect())
    }

    async fn posts_by_ids(&self, ids: &[EntityId]) -> SocialResult<Vec<Post>> {
        let keys: Vec<String> = ids.iter().map(|id| self.keys().entity(POSTS, *id)).collect();
        let docs: Vec<PostDoc> = self.fetch_docs(&keys).await?.into_iter().flatten().collect();
        self.hydrate_posts(docs).await
    }

    /// Resolves a claim and checks the owner still holds `value`.
    async fn user_by_claim(&self, field: &str, value: &str) -> SocialResult<Option<User>> {
        let mut conn = self.connection();
        let owner: Option<EntityId> = conn.get(self.keys().unique(USERS, field, value)).await?;
        let Some(id) = owner else {
            return Ok(None);
        };
        let user = self.get_user(id).await?.filter(|user| {
            let held = if field == "email" { &user.email } else { &user.username };
            held.eq_ignore_ascii_case(value)
        });
        if user.is_none() {
            log::warn!("stale {field} claim for user {id}");
        }
        Ok(user)
    }

    fn user_ref(&self, id: EntityId) -> EntityRef {
        EntityRef::new(self.keys().entity(USERS, id), "user", id)
    }

    fn post_ref(&self, id: EntityId) -> EntityRef {
        EntityRef::new(self.keys().entity(POSTS, id), "post", id)
    }

    async fn insert(&self, command: &InsertCommand) -> SocialResult<EntityId> {
        let mut conn = self.connection();
        let reply = run_script(&mut conn, &ENTITY_INSERT_SCRIPT, command).await?;
        reply_id(&reply)
    }

    async fn toggle(&self, command: &ToggleCommand) -> SocialResult<bool> {
        let mut conn = self.connection();
        let reply = run_script(&mut conn, &TOGGLE_MEMBERSHIP_SCRIPT, command).await?;
        reply_active(&reply)
    }
}

/// `JSON.GET key $` answers with a one-element array.
fn first_of<T: DeserializeOwned>(json: &str) -> SocialResult<Option<T>> {
    let values: Vec<T> = serde_json::from_str(json)
        .map_err(|err| SocialError::other(format!("failed to deserialize entity: {err}")))?;
    Ok(values.into_iter().next())
}

/// Highest index for a `ZREVRANGE` returning `limit` entries.
fn stop_for(limit: usize) -> isize {
    isize::try_from(limit).map_or(-1, |limit| limit - 1)
}

impl SocialStore for RedisStore {
    async fn create_user(&self, user: NewUser) -> SocialResult<User> {
        let keys = self.keys();
        let doc = UserDoc {
            id: 0,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            image_file: user.image_file,
            connections: 0,
        };
        let command = InsertCommand::new(keys.sequence(USERS), keys.entity_prefix(USERS), &doc)?
            .claim("username", keys.unique(USERS, "username", &doc.username))
            .claim("email", keys.unique(USERS, "email", &doc.email))
            .index(IndexEntry::Sorted { key: keys.index(USERS) });
        let id = self.insert(&command).await?;
        log::debug!("stored user {id} under {}", keys.entity(USERS, id));
        Ok(UserDoc { id, ..doc }.into_user(MemberSet::new()))
    }

    async fn get_user(&self, id: EntityId) -> SocialResult<Option<User>> {
        let Some(doc) = self.fetch_doc::<UserDoc>(&self.keys().entity(USERS, id)).await? else {
            return Ok(None);
        };
        Ok(self.hydrate_users(vec![doc]).await?.pop())
    }

    async fn find_user_by_username(&self, username: &str) -> SocialResult<Option<User>> {
        self.user_by_claim("username", username).await
    }

    async fn find_user_by_email(&self, email: &str) -> SocialResult<Option<User>> {
        self.user_by_claim("email", email).await
    }

    async fn list_users(&self) -> SocialResult<Vec<User>> {
        let mut conn = self.connection();
        let ids: Vec<EntityId> = conn.zrange(self.keys().index(USERS), 0, -1).await?;
        self.get_users(&ids).await
    }

    async fn get_users(&self, ids: &[EntityId]) -> SocialResult<Vec<User>> {
        let keys: Vec<String> = ids.iter().map(|id| self.keys().entity(USERS, *id)).collect();
        let docs: Vec<UserDoc> = self.fetch_docs(&keys).await?.into_iter().flatten().collect();
        self.hydrate_users(docs).await
    }

    async fn update_profile(&self, id: EntityId, update: ProfileUpdate) -> SocialResult<User> {
        let keys = self.keys();
        let mut command = UpdateCommand::new(self.user_ref(id))
            .swap_unique(
                "username",
                keys.unique_prefix(USERS, "username"),
                keys.unique(USERS, "username", &update.username),
            )
            .swap_unique(
                "email",
                keys.unique_prefix(USERS, "email"),
                keys.unique(USERS, "email", &update.email),
            )
            .assign("$.username", &update.username)?
            .assign("$.email", &update.email)?;
        if let Some(image_file) = &update.image_file {
            command = command.assign("$.image_file", image_file)?;
        }

        let mut conn = self.connection();
        run_script(&mut conn, &ENTITY_UPDATE_SCRIPT, &command).await?;
        self.get_user(id).await?.ok_or_else(|| SocialError::not_found("user", id))
    }

    async fn create_post(&self, post: NewPost) -> SocialResult<Post> {
        let keys = self.keys();
        let doc = PostDoc {
            id: 0,
            author_id: post.author_id,
            title: post.title,
            content: post.content,
            date_posted: post.date_posted,
            likes: 0,
        };
        let command = InsertCommand::new(keys.sequence(POSTS), keys.entity_prefix(POSTS), &doc)?
            .require(self.user_ref(doc.author_id))
            .index(IndexEntry::Sorted { key: keys.index(POSTS) })
            .index(IndexEntry::Sorted {
                key: keys.relation(AUTHORED, doc.author_id),
            });
        let id = self.insert(&command).await?;
        Ok(PostDoc { id, ..doc }.into_post(MemberSet::new()))
    }

    async fn get_post(&self, id: EntityId) -> SocialResult<Option<Post>> {
        let Some(doc) = self.fetch_doc::<PostDoc>(&self.keys().entity(POSTS, id)).await? else {
            return Ok(None);
        };
        Ok(self.hydrate_posts(vec![doc]).await?.pop())
    }

    async fn update_post(&self, id: EntityId, title: String, content: String) -> SocialResult<Post> {
        let command = UpdateCommand::new(self.post_ref(id))
            .assign("$.title", &title)?
            .assign("$.content", &content)?;
        let mut conn = self.connection();
        run_script(&mut conn, &ENTITY_UPDATE_SCRIPT, &command).await?;
        self.get_post(id).await?.ok_or_else(|| SocialError::not_found("post", id))
    }

    async fn delete_post(&self, id: EntityId) -> SocialResult<()> {
        let keys = self.keys();
        let doc: PostDoc = self
            .fetch_doc(&keys.entity(POSTS, id))
            .await?
            .ok_or_else(|| SocialError::not_found("post", id))?;
        let command = DeleteCommand {
            target: self.post_ref(id),
            indexes: vec![
                IndexEntry::Sorted { key: keys.index(POSTS) },
                IndexEntry::Sorted {
                    key: keys.relation(AUTHORED, doc.author_id),
                },
            ],
            drop_keys: vec![keys.relation(LIKED_BY, id)],
            cascade: Some(CascadeList {
                list_key: keys.relation(POST_COMMENTS, id),
                entity_key_prefix: keys.entity_prefix(COMMENTS),
            }),
        };
        let mut conn = self.connection();
        run_script(&mut conn, &ENTITY_DELETE_SCRIPT, &command).await?;
        Ok(())
    }

    async fn recent_posts(&self, limit: usize) -> SocialResult<Vec<Post>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let mut conn = self.connection();
        let ids: Vec<EntityId> = conn.zrevrange(self.keys().index(POSTS), 0, stop_for(limit)).await?;
        self.posts_by_ids(&ids).await
    }

    async fn posts_by_author(&self, author_id: EntityId) -> SocialResult<Vec<Post>> {
        let mut conn = self.connection();
        let ids: Vec<EntityId> = conn.zrevrange(self.keys().relation(AUTHORED, author_id), 0, -1).await?;
        self.posts_by_ids(&ids).await
    }

    async fn count_posts_by_author(&self, author_id: EntityId) -> SocialResult<u64> {
        let mut conn = self.connection();
        let count: u64 = conn.zcard(self.keys().relation(AUTHORED, author_id)).await?;
        Ok(count)
    }

    async fn create_comment(&self, comment: NewComment) -> SocialResult<Comment> {
        let keys = self.keys();
        let doc = Comment {
            id: 0,
            content: comment.content,
            user_id: comment.user_id,
            post_id: comment.post_id,
        };
        let command = InsertCommand::new(keys.sequence(COMMENTS), keys.entity_prefix(COMMENTS), &doc)?
            .require(self.post_ref(doc.post_id))
            .require(self.user_ref(doc.user_id))
            .index(IndexEntry::List {
                key: keys.relation(POST_COMMENTS, doc.post_id),
            });
        let id = self.insert(&command).await?;
        Ok(Comment { id, ..doc })
    }

    async fn comments_for_post(&self, post_id: EntityId) -> SocialResult<Vec<Comment>> {
        let keys = self.keys();
        let mut conn = self.connection();
        let ids: Vec<EntityId> = conn.lrange(keys.relation(POST_COMMENTS, post_id), 0, -1).await?;
        let doc_keys: Vec<String> = ids.iter().map(|id| keys.entity(COMMENTS, *id)).collect();
        Ok(self.fetch_docs(&doc_keys).await?.into_iter().flatten().collect())
    }

    async fn toggle_like(&self, post_id: EntityId, user_id: EntityId) -> SocialResult<bool> {
        let command = ToggleCommand {
            sides: vec![ToggleSide::new(
                self.post_ref(post_id),
                self.keys().relation(LIKED_BY, post_id),
                user_id,
                "$.likes",
            )],
        };
        self.toggle(&command).await
    }

    async fn toggle_connection(&self, user_id: EntityId, other_id: EntityId) -> SocialResult<bool> {
        let keys = self.keys();
        let command = ToggleCommand {
            sides: vec![
                ToggleSide::new(
                    self.user_ref(user_id),
                    keys.relation(CONNECTED, user_id),
                    other_id,
                    "$.connections",
                ),
                ToggleSide::new(
                    self.user_ref(other_id),
                    keys.relation(CONNECTED, other_id),
                    user_id,
                    "$.connections",
                ),
            ],
        };
        self.toggle(&command).await
    }

    async fn create_message(&self, message: NewMessage) -> SocialResult<Message> {
        let keys = self.keys();
        let doc = Message {
            id: 0,
            content: message.content,
            sender_id: message.sender_id,
            receiver_id: message.receiver_id,
            created_at: message.created_at,
        };
        let command = InsertCommand::new(keys.sequence(MESSAGES), keys.entity_prefix(MESSAGES), &doc)?
            .require(self.user_ref(doc.sender_id))
            .require(self.user_ref(doc.receiver_id))
            .index(IndexEntry::List {
                key: keys.conversation(doc.sender_id, doc.receiver_id),
            });
        let id = self.insert(&command).await?;
        Ok(Message { id, ..doc })
    }

    async fn conversation(&self, user_x: EntityId, user_y: EntityId) -> SocialResult<Vec<Message>> {
        let keys = self.keys();
        let mut conn = self.connection();
        let ids: Vec<EntityId> = conn.lrange(keys.conversation(user_x, user_y), 0, -1).await?;
        let doc_keys: Vec<String> = ids.iter().map(|id| keys.entity(MESSAGES, *id)).collect();
        let mut messages: Vec<Message> = self.fetch_docs(&doc_keys).await?.into_iter().flatten().collect();
        messages.sort_by_key(|message| message.id);
        Ok(messages)
    }
}
