use chrono::Utc;

use crate::{
    errors::SocialResult,
    forms::{CommentForm, PostForm},
    id::EntityId,
    models::{Comment, NewComment, NewPost, Post, User, Viewer},
    service::{SocialService, ensure_author},
    store::SocialStore,
};

impl<S: SocialStore> SocialService<S> {
    pub async fn create_post(&self, viewer: &Viewer, form: PostForm) -> SocialResult<Post> {
        form.validate()?;
        let post = self
            .store
            .create_post(NewPost {
                author_id: viewer.id,
                title: form.title,
                content: form.content,
                date_posted: Utc::now(),
            })
            .await?;
        log::info!("user {} created post {}", viewer.id, post.id);
        Ok(post)
    }

    pub async fn get_post(&self, id: EntityId) -> SocialResult<Post> {
        self.require_post(id).await
    }

    /// Only the author may edit; the check runs before the form is looked at.
    pub async fn update_post(&self, viewer: &Viewer, id: EntityId, form: PostForm) -> SocialResult<Post> {
        let post = self.require_post(id).await?;
        ensure_author(&post, viewer)?;
        form.validate()?;
        let post = self.store.update_post(id, form.title, form.content).await?;
        log::info!("user {} updated post {}", viewer.id, id);
        Ok(post)
    }

    pub async fn delete_post(&self, viewer: &Viewer, id: EntityId) -> SocialResult<()> {
        let post = self.require_post(id).await?;
        ensure_author(&post, viewer)?;
        self.store.delete_post(id).await?;
        log::info!("user {} deleted post {}", viewer.id, id);
        Ok(())
    }

    /// The home feed, newest first.
    pub async fn recent_posts(&self) -> SocialResult<Vec<Post>> {
        self.store.recent_posts(self.site.feed_size).await
    }

    pub async fn posts_by_username(&self, username: &str) -> SocialResult<(User, Vec<Post>)> {
        let user = self.require_username(username).await?;
        let posts = self.store.posts_by_author(user.id).await?;
        Ok((user, posts))
    }

    pub async fn add_comment(&self, viewer: &Viewer, post_id: EntityId, form: CommentForm) -> SocialResult<Comment> {
        self.require_post(post_id).await?;
        form.validate()?;
        let comment = self
            .store
            .create_comment(NewComment {
                content: form.content,
                user_id: viewer.id,
                post_id,
            })
            .await?;
        log::info!("user {} commented on post {}", viewer.id, post_id);
        Ok(comment)
    }

    pub async fn comments_for_post(&self, post_id: EntityId) -> SocialResult<Vec<Comment>> {
        self.require_post(post_id).await?;
        self.store.comments_for_post(post_id).await
    }
}
