use super::support::*;

fn flash_of(reply: &Reply) -> (FlashCategory, &str) {
    let flash = reply.flash.as_ref().expect("flash");
    (flash.category, flash.message.as_str())
}

#[tokio::test]
async fn register_sends_to_login() {
    let service = memory_service();
    let reply = routes::register(&service, registration("alice")).await.expect("register");
    assert_eq!(reply.redirect, Route::Login);
    assert_eq!(
        flash_of(&reply),
        (FlashCategory::Success, "Your account has been created! You are now able to log in")
    );
}

#[tokio::test]
async fn login_follows_only_local_next() {
    let service = memory_service();
    sign_up(&service, "alice").await;
    let form = LoginForm {
        email: "alice@example.com".to_string(),
        password: PASSWORD.to_string(),
        remember: false,
    };

    let outcome = routes::login(&service, &form, Some("/account")).await.expect("login");
    let LoginOutcome::SignedIn { reply, .. } = outcome else {
        panic!("expected sign in");
    };
    assert_eq!(reply.redirect, Route::Local("/account".to_string()));

    let outcome = routes::login(&service, &form, Some("https://evil.example/")).await.expect("login");
    let LoginOutcome::SignedIn { reply, remember, .. } = outcome else {
        panic!("expected sign in");
    };
    assert_eq!(reply.redirect, Route::Home);
    assert!(!remember);

    let remembered = LoginForm {
        remember: true,
        ..form.clone()
    };
    let outcome = routes::login(&service, &remembered, None).await.expect("login");
    assert!(matches!(outcome, LoginOutcome::SignedIn { remember: true, .. }));

    let wrong = LoginForm {
        password: "bad".to_string(),
        ..form
    };
    match routes::login(&service, &wrong, None).await.expect("login") {
        LoginOutcome::Refused(flash) => {
            assert_eq!(flash.category, FlashCategory::Danger);
            assert_eq!(flash.message, "Login Unsuccessful. Please check email and password");
        }
        LoginOutcome::SignedIn { .. } => panic!("wrong password accepted"),
    }
}

#[tokio::test]
async fn like_flashes_follow_the_toggle() {
    let service = memory_service();
    let alice = sign_up(&service, "alice").await;
    let post = write_post(&service, &alice, "hello").await;

    let reply = routes::like(&service, &alice, post.id).await.expect("like");
    assert_eq!(reply.redirect, Route::Home);
    assert_eq!(flash_of(&reply), (FlashCategory::Success, "Like Done!"));

    let reply = routes::like(&service, &alice, post.id).await.expect("unlike");
    assert_eq!(flash_of(&reply), (FlashCategory::Danger, "UnLiked!"));
}

#[tokio::test]
async fn post_lifecycle_replies() {
    let service = memory_service();
    let alice = sign_up(&service, "alice").await;
    let form = PostForm {
        title: "t".to_string(),
        content: "c".to_string(),
    };
    let reply = routes::new_post(&service, &alice, form.clone()).await.expect("new");
    assert_eq!(flash_of(&reply).1, "Your post has been created!");

    let post_id = service.recent_posts().await.expect("feed")[0].id;
    let reply = routes::update_post(&service, &alice, post_id, form).await.expect("update");
    assert_eq!(reply.redirect, Route::Post(post_id));
    assert_eq!(flash_of(&reply).1, "Your post has been updated!");

    let reply = routes::comment(&service, &alice, post_id, CommentForm { content: "nice".to_string() })
        .await
        .expect("comment");
    assert_eq!(reply.redirect, Route::Comments(post_id));
    assert_eq!(flash_of(&reply).1, "Commented!");

    let reply = routes::delete_post(&service, &alice, post_id).await.expect("delete");
    assert_eq!(reply.redirect, Route::Home);
    assert_eq!(flash_of(&reply).1, "Your post has been deleted!");
}

#[tokio::test]
async fn foreign_post_update_is_403() {
    let service = memory_service();
    let alice = sign_up(&service, "alice").await;
    let bob = sign_up(&service, "bob").await;
    let post = write_post(&service, &alice, "mine").await;
    let err = routes::delete_post(&service, &bob, post.id).await.expect_err("not author");
    assert_eq!(err.status_code(), 403);
}

#[tokio::test]
async fn connect_returns_to_target_profile() {
    let service = memory_service();
    let alice = sign_up(&service, "alice").await;
    let bob = sign_up(&service, "bob").await;
    let reply = routes::connect(&service, &alice, bob.id).await.expect("connect");
    assert_eq!(reply.redirect, Route::Profile("bob".to_string()));
    assert!(reply.flash.is_none());
}

#[tokio::test]
async fn spoofed_sender_goes_home_with_warning() {
    let service = memory_service();
    let one = sign_up(&service, "one").await;
    let two = sign_up(&service, "two").await;

    let reply = routes::send_message(&service, &one, one.id, two.id, message("as two"))
        .await
        .expect("handled");
    assert_eq!(reply.redirect, Route::Home);
    assert_eq!(flash_of(&reply), (FlashCategory::Danger, "Dont try to be Oversmart!"));

    let reply = routes::send_message(&service, &one, two.id, one.id, message("hi"))
        .await
        .expect("sent");
    assert_eq!(
        reply.redirect,
        Route::Messages {
            user_id: two.id,
            current_user_id: one.id
        }
    );
    assert_eq!(flash_of(&reply).1, "Message sent successfully!");

    match routes::messages(&service, &two, one.id, one.id).await.expect("handled") {
        Response::Redirect(reply) => assert_eq!(reply.redirect, Route::Home),
        Response::Render(_) => panic!("read someone else's messages"),
    }
    match routes::messages(&service, &two, one.id, two.id).await.expect("view") {
        Response::Render(view) => assert_eq!(view.messages.len(), 1),
        Response::Redirect(_) => panic!("own conversation refused"),
    }
}

#[tokio::test]
async fn search_redirects_on_email() {
    let service = memory_service();
    let alice = sign_up(&service, "alice").await;
    match routes::search(&service, &alice, "alice@example.com").await.expect("search") {
        Response::Redirect(reply) => assert_eq!(reply.redirect.path(), "/profile/alice"),
        Response::Render(users) => panic!("expected redirect, got {} users", users.len()),
    }
}

#[tokio::test]
async fn user_list_by_path_segment() {
    let service = memory_service();
    let alice = sign_up(&service, "alice").await;
    let post = write_post(&service, &alice, "hello").await;
    service.toggle_like(&alice, post.id).await.expect("like");

    let page = routes::user_list(&service, &alice, "like", post.id).await.expect("likers");
    assert_eq!(page.legend, "User Likes");
    assert_eq!(page.users.len(), 1);
    assert_eq!(page.users[0].relationship, Relationship::Myself);

    let err = routes::user_list(&service, &alice, "followers", alice.id)
        .await
        .expect_err("unknown list");
    assert_eq!(err.status_code(), 404);
}
