use std::str::FromStr;

use crate::{
    errors::{SocialError, SocialResult},
    id::EntityId,
    models::{SearchOutcome, User, UserCard, Viewer},
    service::SocialService,
    store::SocialStore,
    types::MemberSet,
};

/// Which relation a user list is drawn from, as named in its path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserListKind {
    Likers,
    Connections,
}

impl FromStr for UserListKind {
    type Err = SocialError;

    fn from_str(segment: &str) -> Result<Self, Self::Err> {
        match segment {
            "like" => Ok(UserListKind::Likers),
            "connections" => Ok(UserListKind::Connections),
            other => Err(SocialError::not_found("user list", other)),
        }
    }
}

impl UserListKind {
    pub fn segment(&self) -> &'static str {
        match self {
            UserListKind::Likers => "like",
            UserListKind::Connections => "connections",
        }
    }
}

impl<S: SocialStore> SocialService<S> {
    /// Scans users in id order. Username prefix matches are collected; a user
    /// whose email equals the query ends the scan with a jump to that profile.
    pub async fn search_by_name_prefix(&self, query: &str) -> SocialResult<SearchOutcome> {
        let query = query.to_lowercase();
        let mut matches = Vec::new();
        for user in self.store.list_users().await? {
            if user.username.to_lowercase().starts_with(&query) {
                matches.push(user);
            } else if user.email == query {
                log::debug!("search {query:?} resolved to user {}", user.id);
                return Ok(SearchOutcome::Profile(user));
            }
        }
        log::debug!("search {query:?} matched {} users", matches.len());
        Ok(SearchOutcome::Matches(matches))
    }

    pub async fn list_likers(&self, post_id: EntityId, viewer: &Viewer) -> SocialResult<Vec<UserCard>> {
        let post = self.require_post(post_id).await?;
        self.user_cards(&post.liked_users, viewer).await
    }

    pub async fn list_connections(&self, user_id: EntityId, viewer: &Viewer) -> SocialResult<Vec<UserCard>> {
        let user = self.require_user(user_id).await?;
        self.user_cards(&user.connected_users, viewer).await
    }

    pub async fn user_list(&self, kind: UserListKind, id: EntityId, viewer: &Viewer) -> SocialResult<Vec<UserCard>> {
        match kind {
            UserListKind::Likers => self.list_likers(id, viewer).await,
            UserListKind::Connections => self.list_connections(id, viewer).await,
        }
    }

    async fn user_cards(&self, members: &MemberSet, viewer: &Viewer) -> SocialResult<Vec<UserCard>> {
        let me = self.require_user(viewer.id).await?;
        let ids: Vec<EntityId> = members.iter().collect();
        let users: Vec<User> = self.store.get_users(&ids).await?;
        Ok(users
            .into_iter()
            .map(|user| UserCard {
                relationship: me.relationship_to(user.id),
                user,
            })
            .collect())
    }
}
