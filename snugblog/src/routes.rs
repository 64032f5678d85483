//! Request-level actions.
//!
//! Each action calls into [`SocialService`] and decides where the client goes
//! next and what it is told. `NotFound` and `Forbidden` are returned as errors
//! so the caller can answer with [`status_code`](crate::errors::SocialError::status_code); validation
//! errors are returned for the caller to re-render the form with.

use std::fmt;

use serde::Serialize;

use crate::{
    errors::SocialResult,
    forms::{CommentForm, LoginForm, MessageForm, PostForm, RegistrationForm, UpdateAccountForm},
    id::EntityId,
    models::{ConversationView, SearchOutcome, User, UserCard, Viewer},
    service::{SocialService, UserListKind},
    store::SocialStore,
    validators::is_local_path,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Route {
    Home,
    Login,
    Account,
    Post(EntityId),
    Comments(EntityId),
    Profile(String),
    Messages { user_id: EntityId, current_user_id: EntityId },
    /// A same-site path supplied by the client.
    Local(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/home".to_string(),
            Route::Login => "/login".to_string(),
            Route::Account => "/account".to_string(),
            Route::Post(id) => format!("/post/{id}"),
            Route::Comments(id) => format!("/comments/{id}"),
            Route::Profile(username) => format!("/profile/{username}"),
            Route::Messages {
                user_id,
                current_user_id,
            } => format!("/messages/{user_id}/{current_user_id}"),
            Route::Local(path) => path.clone(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashCategory {
    Success,
    Danger,
}

/// A one-shot notice shown on the next page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flash {
    pub category: FlashCategory,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Success,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Danger,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub redirect: Route,
    pub flash: Option<Flash>,
}

impl Reply {
    pub fn to(redirect: Route) -> Self {
        Self { redirect, flash: None }
    }

    pub fn with_flash(redirect: Route, flash: Flash) -> Self {
        Self {
            redirect,
            flash: Some(flash),
        }
    }
}

/// Either a page to render or a redirect.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "body")]
pub enum Response<T> {
    Render(T),
    Redirect(Reply),
}

#[derive(Debug, Clone)]
pub enum LoginOutcome {
    /// `remember` asks the session layer to outlive the browser session.
    SignedIn { viewer: Viewer, reply: Reply, remember: bool },
    Refused(Flash),
}

#[derive(Debug, Clone, Serialize)]
pub struct UserListPage {
    pub legend: &'static str,
    pub users: Vec<UserCard>,
}

const OVERSMART: &str = "Dont try to be Oversmart!";

fn oversmart() -> Reply {
    Reply::with_flash(Route::Home, Flash::danger(OVERSMART))
}

pub async fn register<S: SocialStore>(service: &SocialService<S>, form: RegistrationForm) -> SocialResult<Reply> {
    service.register(form).await?;
    Ok(Reply::with_flash(
        Route::Login,
        Flash::success("Your account has been created! You are now able to log in"),
    ))
}

/// `next` is followed only when it stays on this site.
pub async fn login<S: SocialStore>(
    service: &SocialService<S>,
    form: &LoginForm,
    next: Option<&str>,
) -> SocialResult<LoginOutcome> {
    let Some(viewer) = service.login(form).await? else {
        return Ok(LoginOutcome::Refused(Flash::danger(
            "Login Unsuccessful. Please check email and password",
        )));
    };
    let redirect = match next {
        Some(target) if is_local_path(target) => Route::Local(target.to_string()),
        _ => Route::Home,
    };
    Ok(LoginOutcome::SignedIn {
        viewer,
        reply: Reply::to(redirect),
        remember: form.remember,
    })
}

pub async fn update_account<S: SocialStore>(
    service: &SocialService<S>,
    viewer: &Viewer,
    form: UpdateAccountForm,
) -> SocialResult<Reply> {
    service.update_account(viewer, form).await?;
    Ok(Reply::with_flash(Route::Account, Flash::success("Your account has been updated!")))
}

pub async fn new_post<S: SocialStore>(service: &SocialService<S>, viewer: &Viewer, form: PostForm) -> SocialResult<Reply> {
    service.create_post(viewer, form).await?;
    Ok(Reply::with_flash(Route::Home, Flash::success("Your post has been created!")))
}

pub async fn update_post<S: SocialStore>(
    service: &SocialService<S>,
    viewer: &Viewer,
    post_id: EntityId,
    form: PostForm,
) -> SocialResult<Reply> {
    let post = service.update_post(viewer, post_id, form).await?;
    Ok(Reply::with_flash(Route::Post(post.id), Flash::success("Your post has been updated!")))
}

pub async fn delete_post<S: SocialStore>(
    service: &SocialService<S>,
    viewer: &Viewer,
    post_id: EntityId,
) -> SocialResult<Reply> {
    service.delete_post(viewer, post_id).await?;
    Ok(Reply::with_flash(Route::Home, Flash::success("Your post has been deleted!")))
}

pub async fn like<S: SocialStore>(service: &SocialService<S>, viewer: &Viewer, post_id: EntityId) -> SocialResult<Reply> {
    let flash = if service.toggle_like(viewer, post_id).await? {
        Flash::success("Like Done!")
    } else {
        Flash::danger("UnLiked!")
    };
    Ok(Reply::with_flash(Route::Home, flash))
}

pub async fn comment<S: SocialStore>(
    service: &SocialService<S>,
    viewer: &Viewer,
    post_id: EntityId,
    form: CommentForm,
) -> SocialResult<Reply> {
    service.add_comment(viewer, post_id, form).await?;
    Ok(Reply::with_flash(Route::Comments(post_id), Flash::success("Commented!")))
}

/// Toggles the connection and sends the viewer back to the target's profile.
pub async fn connect<S: SocialStore>(service: &SocialService<S>, viewer: &Viewer, user_id: EntityId) -> SocialResult<Reply> {
    let target = service.user(user_id).await?;
    service.toggle_connection(viewer, user_id).await?;
    Ok(Reply::to(Route::Profile(target.username)))
}

/// `current_user_id` is the sender the client claims to be.
pub async fn send_message<S: SocialStore>(
    service: &SocialService<S>,
    viewer: &Viewer,
    user_id: EntityId,
    current_user_id: EntityId,
    form: MessageForm,
) -> SocialResult<Reply> {
    match service.send_message(viewer, current_user_id, user_id, form).await {
        Ok(_) => Ok(Reply::with_flash(
            Route::Messages {
                user_id,
                current_user_id,
            },
            Flash::success("Message sent successfully!"),
        )),
        Err(err) if err.is_forbidden() => Ok(oversmart()),
        Err(err) => Err(err),
    }
}

pub async fn messages<S: SocialStore>(
    service: &SocialService<S>,
    viewer: &Viewer,
    user_id: EntityId,
    current_user_id: EntityId,
) -> SocialResult<Response<ConversationView>> {
    if viewer.id != current_user_id {
        log::warn!("user {} asked for the messages of user {}", viewer.id, current_user_id);
        return Ok(Response::Redirect(oversmart()));
    }
    Ok(Response::Render(service.conversation_view(viewer, user_id).await?))
}

pub async fn search<S: SocialStore>(
    service: &SocialService<S>,
    viewer: &Viewer,
    query: &str,
) -> SocialResult<Response<Vec<User>>> {
    log::debug!("user {} searched for {query:?}", viewer.id);
    Ok(match service.search_by_name_prefix(query).await? {
        SearchOutcome::Matches(users) => Response::Render(users),
        SearchOutcome::Profile(user) => Response::Redirect(Reply::to(Route::Profile(user.username))),
    })
}

/// `content` is the list's path segment: `like` or `connections`.
pub async fn user_list<S: SocialStore>(
    service: &SocialService<S>,
    viewer: &Viewer,
    content: &str,
    id: EntityId,
) -> SocialResult<UserListPage> {
    let kind: UserListKind = content.parse()?;
    let users = service.user_list(kind, id, viewer).await?;
    let legend = match kind {
        UserListKind::Likers => "User Likes",
        UserListKind::Connections => "Connections",
    };
    Ok(UserListPage { legend, users })
}
