use super::support::*;

#[tokio::test]
async fn like_toggles_set_and_counter_together() {
    let service = memory_service();
    let alice = sign_up(&service, "alice").await;
    let post = write_post(&service, &alice, "hello").await;
    assert_eq!(post.likes, 0);
    assert_eq!(post.liked_users.to_string(), "");

    assert!(service.toggle_like(&alice, post.id).await.expect("like"));
    let liked = service.get_post(post.id).await.expect("post");
    assert_eq!(liked.likes, 1);
    assert_eq!(liked.liked_users.to_string(), alice.id.to_string());

    assert!(!service.toggle_like(&alice, post.id).await.expect("unlike"));
    let unliked = service.get_post(post.id).await.expect("post");
    assert_eq!(unliked.likes, 0);
    assert!(unliked.liked_users.is_empty());
}

#[tokio::test]
async fn odd_and_even_like_counts() {
    let service = memory_service();
    let alice = sign_up(&service, "alice").await;
    let bob = sign_up(&service, "bob").await;
    let post = write_post(&service, &alice, "hello").await;

    for _ in 0..3 {
        service.toggle_like(&bob, post.id).await.expect("toggle");
    }
    for _ in 0..4 {
        service.toggle_like(&alice, post.id).await.expect("toggle");
    }
    let post = service.get_post(post.id).await.expect("post");
    assert!(post.is_liked_by(bob.id));
    assert!(!post.is_liked_by(alice.id));
    assert_eq!(post.likes, post.liked_users.len() as u64);
    assert_eq!(post.likes, 1);
}

#[tokio::test]
async fn liking_a_missing_post_is_not_found() {
    let service = memory_service();
    let alice = sign_up(&service, "alice").await;
    let err = service.toggle_like(&alice, 42).await.expect_err("no post");
    assert_eq!(err.status_code(), 404);
}

#[tokio::test]
async fn connection_is_mutual_and_reversible() {
    let service = memory_service();
    let one = sign_up(&service, "one").await;
    let two = sign_up(&service, "two").await;

    assert!(service.toggle_connection(&one, two.id).await.expect("connect"));
    let (a, b) = (service.user(one.id).await.expect("one"), service.user(two.id).await.expect("two"));
    assert!(a.is_connected_to(two.id) && b.is_connected_to(one.id));
    assert_eq!((a.connections, b.connections), (1, 1));

    // Either side may undo it.
    assert!(!service.toggle_connection(&two, one.id).await.expect("disconnect"));
    let (a, b) = (service.user(one.id).await.expect("one"), service.user(two.id).await.expect("two"));
    assert!(!a.is_connected_to(two.id) && !b.is_connected_to(one.id));
    assert_eq!((a.connections, b.connections), (0, 0));
    assert_eq!(a.connected_users.to_string(), "");
}

#[tokio::test]
async fn counters_match_set_sizes_across_many_toggles() {
    let service = memory_service();
    let mut viewers = Vec::new();
    for name in ["ann", "ben", "cat", "dan"] {
        viewers.push(sign_up(&service, name).await);
    }
    let pairs = [(0, 1), (0, 2), (1, 2), (0, 1), (3, 0), (2, 3), (1, 3)];
    for (x, y) in pairs {
        service
            .toggle_connection(&viewers[x], viewers[y].id)
            .await
            .expect("toggle");
    }
    for user in service.store().list_users().await.expect("users") {
        assert_eq!(user.connections, user.connected_users.len() as u64, "user {}", user.username);
        for other in user.connected_users.iter() {
            let other = service.user(other).await.expect("other");
            assert!(other.is_connected_to(user.id));
        }
    }
}

#[tokio::test]
async fn self_connection_is_forbidden_and_missing_target_not_found() {
    let service = memory_service();
    let alice = sign_up(&service, "alice").await;
    let err = service.toggle_connection(&alice, alice.id).await.expect_err("self");
    assert!(err.is_forbidden());
    let err = service.toggle_connection(&alice, 99).await.expect_err("missing");
    assert!(err.is_not_found());
    assert_eq!(service.user(alice.id).await.expect("alice").connections, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_likes_are_not_lost() {
    let service = memory_service();
    let author = sign_up(&service, "author").await;
    let post = write_post(&service, &author, "popular").await;

    let mut likers = Vec::new();
    for idx in 0..24 {
        likers.push(sign_up(&service, &format!("fan{idx}")).await);
    }
    let service = Arc::new(service);

    let mut handles = Vec::new();
    for viewer in likers {
        let service = Arc::clone(&service);
        let post_id = post.id;
        handles.push(tokio::spawn(async move { service.toggle_like(&viewer, post_id).await }));
    }
    for handle in handles {
        assert!(handle.await.expect("join").expect("like"));
    }

    let post = service.get_post(post.id).await.expect("post");
    assert_eq!(post.likes, 24);
    assert_eq!(post.liked_users.len(), 24);
}
