use super::support::*;

#[tokio::test]
async fn feed_is_newest_first_and_bounded() {
    let config = AppConfig {
        site: snugblog::config::SiteSettings {
            feed_size: 2,
            ..Default::default()
        },
        ..test_config()
    };
    let service = SocialService::new(MemoryStore::new(), &config).expect("service");
    let alice = sign_up(&service, "alice").await;
    for title in ["first", "second", "third"] {
        write_post(&service, &alice, title).await;
    }

    let titles: Vec<String> = service
        .recent_posts()
        .await
        .expect("feed")
        .into_iter()
        .map(|post| post.title)
        .collect();
    assert_eq!(titles, vec!["third", "second"]);
}

#[tokio::test]
async fn only_the_author_may_edit_or_delete() {
    let service = memory_service();
    let alice = sign_up(&service, "alice").await;
    let bob = sign_up(&service, "bob").await;
    let post = write_post(&service, &alice, "mine").await;

    let form = PostForm {
        title: "hijacked".to_string(),
        content: String::new(),
    };
    let err = service.update_post(&bob, post.id, form).await.expect_err("not the author");
    assert!(err.is_forbidden());
    assert!(service.delete_post(&bob, post.id).await.expect_err("not the author").is_forbidden());

    let form = PostForm {
        title: "edited".to_string(),
        content: "new body".to_string(),
    };
    let updated = service.update_post(&alice, post.id, form).await.expect("edit");
    assert_eq!(updated.title, "edited");
    assert_eq!(updated.date_posted, post.date_posted);

    service.delete_post(&alice, post.id).await.expect("delete");
    assert!(service.get_post(post.id).await.expect_err("deleted").is_not_found());
}

#[tokio::test]
async fn posts_by_username_lists_only_that_author() {
    let service = memory_service();
    let alice = sign_up(&service, "alice").await;
    let bob = sign_up(&service, "bob").await;
    write_post(&service, &alice, "a1").await;
    write_post(&service, &bob, "b1").await;
    write_post(&service, &alice, "a2").await;

    let (user, posts) = service.posts_by_username("alice").await.expect("alice posts");
    assert_eq!(user.id, alice.id);
    let titles: Vec<&str> = posts.iter().map(|post| post.title.as_str()).collect();
    assert_eq!(titles, vec!["a2", "a1"]);

    assert!(service.posts_by_username("carol").await.expect_err("unknown").is_not_found());
}

#[tokio::test]
async fn comments_keep_creation_order_and_need_a_post() {
    let service = memory_service();
    let alice = sign_up(&service, "alice").await;
    let bob = sign_up(&service, "bob").await;
    let post = write_post(&service, &alice, "topic").await;

    for (viewer, text) in [(&bob, "first"), (&alice, "second")] {
        let form = CommentForm {
            content: text.to_string(),
        };
        service.add_comment(viewer, post.id, form).await.expect("comment");
    }
    let comments = service.comments_for_post(post.id).await.expect("comments");
    let texts: Vec<&str> = comments.iter().map(|comment| comment.content.as_str()).collect();
    assert_eq!(texts, vec!["first", "second"]);
    assert_eq!(comments[0].user_id, bob.id);

    let form = CommentForm {
        content: "lost".to_string(),
    };
    let err = service.add_comment(&bob, post.id + 100, form).await.expect_err("no such post");
    assert!(err.is_not_found());
}

#[tokio::test]
async fn empty_comment_is_rejected() {
    let service = memory_service();
    let alice = sign_up(&service, "alice").await;
    let post = write_post(&service, &alice, "topic").await;
    let form = CommentForm {
        content: "   ".to_string(),
    };
    let err = service.add_comment(&alice, post.id, form).await.expect_err("blank");
    assert!(matches!(err, SocialError::Validation(_)));
}
