use redis::AsyncCommands;
use serial_test::serial;

use super::support::*;

#[tokio::test]
#[serial]
#[ignore = "requires Redis Stack on REDIS_URL"]
async fn like_toggle_keeps_set_and_counter_in_step() {
    let ns = TestNamespace::unique();
    let service = ns.service().await;
    let alice = sign_up(&service, "alice").await;
    let bob = sign_up(&service, "bob").await;
    let post = write_post(&service, &alice, "hello").await;

    assert!(service.toggle_like(&alice, post.id).await.expect("like"));
    assert!(service.toggle_like(&bob, post.id).await.expect("like"));
    assert!(!service.toggle_like(&alice, post.id).await.expect("unlike"));

    let stored = service.get_post(post.id).await.expect("post");
    assert_eq!(stored.likes, 1);
    assert_eq!(stored.liked_users.to_string(), bob.id.to_string());

    let mut conn = service.store().connection();
    let set_key = service.store().keys().relation("liked_by", post.id);
    let members: Vec<u64> = conn.smembers(&set_key).await.expect("liked set");
    assert_eq!(members, vec![bob.id]);

    assert!(service.toggle_like(&bob, post.id + 50).await.expect_err("missing").is_not_found());
    ns.cleanup(&service).await;
}

#[tokio::test]
#[serial]
#[ignore = "requires Redis Stack on REDIS_URL"]
async fn connection_toggle_updates_both_users() {
    let ns = TestNamespace::unique();
    let service = ns.service().await;
    let one = sign_up(&service, "one").await;
    let two = sign_up(&service, "two").await;

    assert!(service.toggle_connection(&one, two.id).await.expect("connect"));
    let (a, b) = (service.user(one.id).await.expect("one"), service.user(two.id).await.expect("two"));
    assert_eq!((a.connections, b.connections), (1, 1));
    assert!(a.is_connected_to(two.id) && b.is_connected_to(one.id));

    assert!(!service.toggle_connection(&one, two.id).await.expect("disconnect"));
    let (a, b) = (service.user(one.id).await.expect("one"), service.user(two.id).await.expect("two"));
    assert_eq!((a.connections, b.connections), (0, 0));
    assert!(a.connected_users.is_empty() && b.connected_users.is_empty());

    let err = service.toggle_connection(&one, 999).await.expect_err("missing");
    assert!(err.is_not_found());
    assert_eq!(service.user(one.id).await.expect("one").connections, 0);
    ns.cleanup(&service).await;
}

#[tokio::test]
#[serial]
#[ignore = "requires Redis Stack on REDIS_URL"]
async fn conversation_reads_both_directions_in_order() {
    let ns = TestNamespace::unique();
    let service = ns.service().await;
    let one = sign_up(&service, "one").await;
    let two = sign_up(&service, "two").await;

    service.send_message(&one, one.id, two.id, message("hi")).await.expect("hi");
    service.send_message(&two, two.id, one.id, message("hello")).await.expect("hello");

    for (x, y) in [(one.id, two.id), (two.id, one.id)] {
        let texts: Vec<String> = service
            .list_conversation(x, y)
            .await
            .expect("conversation")
            .into_iter()
            .map(|message| message.content)
            .collect();
        assert_eq!(texts, vec!["hi", "hello"]);
    }

    let err = service
        .send_message(&one, one.id, 4040, message("void"))
        .await
        .expect_err("missing receiver");
    assert!(err.is_not_found());
    ns.cleanup(&service).await;
}

#[tokio::test]
#[serial]
#[ignore = "requires Redis Stack on REDIS_URL"]
async fn accounts_and_unique_claims() {
    let ns = TestNamespace::unique();
    let service = ns.service().await;
    let alice = sign_up(&service, "alice").await;
    sign_up(&service, "bob").await;

    let mut clash = registration("ALICE");
    clash.email = "fresh@example.com".to_string();
    let err = service.register(clash).await.expect_err("taken username");
    assert!(matches!(err, SocialError::Validation(ref v) if v.issue_for("username").is_some()));

    let form = UpdateAccountForm {
        username: "alicia".to_string(),
        email: "alice@example.com".to_string(),
        picture: None,
    };
    service.update_account(&alice, form).await.expect("rename");
    assert!(service.store().find_user_by_username("alice").await.expect("lookup").is_none());
    let renamed = service
        .store()
        .find_user_by_username("ALICIA")
        .await
        .expect("lookup")
        .expect("renamed user");
    assert_eq!(renamed.id, alice.id);

    // The released name can be taken by someone else.
    let mut reuse = registration("alice");
    reuse.email = "new-alice@example.com".to_string();
    service.register(reuse).await.expect("reuse released name");

    let login = LoginForm {
        email: "Alice@Example.com".to_string(),
        password: PASSWORD.to_string(),
        remember: false,
    };
    let viewer = service.login(&login).await.expect("login").expect("signed in");
    assert_eq!(viewer.username, "alicia");
    ns.cleanup(&service).await;
}

#[tokio::test]
#[serial]
#[ignore = "requires Redis Stack on REDIS_URL"]
async fn concurrent_renames_leave_only_the_final_name_claimed() {
    let ns = TestNamespace::unique();
    let service = ns.service().await;
    let alice = sign_up(&service, "alice").await;
    let rename = |username: &str| UpdateAccountForm {
        username: username.to_string(),
        email: "alice@example.com".to_string(),
        picture: None,
    };

    let (first, second) = tokio::join!(
        service.update_account(&alice, rename("xavier")),
        service.update_account(&alice, rename("yolanda")),
    );
    first.expect("first rename");
    second.expect("second rename");

    let stored = service.user(alice.id).await.expect("user");
    let released = if stored.username == "xavier" { "yolanda" } else { "xavier" };
    let store = service.store();
    for name in ["alice", released] {
        assert!(store.find_user_by_username(name).await.expect("lookup").is_none(), "{name} still claimed");
    }
    let owner = store.find_user_by_username(&stored.username).await.expect("lookup").expect("final name");
    assert_eq!(owner.id, alice.id);

    let keys = store.keys();
    let mut conn = store.connection();
    let claims: Vec<String> = conn
        .keys(format!("{}:*", keys.unique_prefix("users", "username")))
        .await
        .expect("claim keys");
    assert_eq!(claims, vec![keys.unique("users", "username", &stored.username)]);

    let mut reuse = registration(released);
    reuse.email = "other@example.com".to_string();
    service.register(reuse).await.expect("released name is free");
    ns.cleanup(&service).await;
}

#[tokio::test]
#[serial]
#[ignore = "requires Redis Stack on REDIS_URL"]
async fn claim_pointing_at_a_renamed_user_does_not_resolve() {
    let ns = TestNamespace::unique();
    let service = ns.service().await;
    let alice = sign_up(&service, "alice").await;

    let store = service.store();
    let mut conn = store.connection();
    let _: () = conn
        .set(store.keys().unique("users", "username", "ghost"), alice.id)
        .await
        .expect("plant claim");

    assert!(store.find_user_by_username("ghost").await.expect("lookup").is_none());
    assert_eq!(
        store.find_user_by_username("alice").await.expect("lookup").map(|user| user.id),
        Some(alice.id)
    );
    ns.cleanup(&service).await;
}

#[tokio::test]
#[serial]
#[ignore = "requires Redis Stack on REDIS_URL"]
async fn deleting_a_post_removes_comments_likes_and_index_entries() {
    let ns = TestNamespace::unique();
    let service = ns.service().await;
    let alice = sign_up(&service, "alice").await;
    let keep = write_post(&service, &alice, "keep").await;
    let doomed = write_post(&service, &alice, "doomed").await;
    service.toggle_like(&alice, doomed.id).await.expect("like");
    let form = CommentForm {
        content: "bye".to_string(),
    };
    let comment = service.add_comment(&alice, doomed.id, form).await.expect("comment");

    service.delete_post(&alice, doomed.id).await.expect("delete");

    let feed: Vec<u64> = service.recent_posts().await.expect("feed").iter().map(|post| post.id).collect();
    assert_eq!(feed, vec![keep.id]);
    assert_eq!(service.account(&alice).await.expect("account").posts_count, 1);

    let keys = service.store().keys();
    let mut conn = service.store().connection();
    let leftovers: u64 = conn
        .exists(vec![
            keys.entity("comments", comment.id),
            keys.relation("liked_by", doomed.id),
            keys.relation("post_comments", doomed.id),
        ])
        .await
        .expect("exists");
    assert_eq!(leftovers, 0);
    ns.cleanup(&service).await;
}

#[tokio::test]
#[serial]
#[ignore = "requires Redis Stack on REDIS_URL"]
async fn directory_search_over_redis() {
    let ns = TestNamespace::unique();
    let service = ns.service().await;
    for name in ["alice", "bob", "alfred"] {
        sign_up(&service, name).await;
    }

    let SearchOutcome::Matches(users) = service.search_by_name_prefix("Al").await.expect("search") else {
        panic!("expected matches");
    };
    let names: Vec<&str> = users.iter().map(|user| user.username.as_str()).collect();
    assert_eq!(names, vec!["alice", "alfred"]);

    let outcome = service.search_by_name_prefix("bob@example.com").await.expect("search");
    assert!(matches!(outcome, SearchOutcome::Profile(ref user) if user.username == "bob"));
    ns.cleanup(&service).await;
}
