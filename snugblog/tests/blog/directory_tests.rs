use super::support::*;

fn names(users: &[User]) -> Vec<&str> {
    users.iter().map(|user| user.username.as_str()).collect()
}

#[tokio::test]
async fn prefix_search_ignores_case_and_keeps_id_order() {
    let service = memory_service();
    for name in ["Alice", "bob", "alfred", "Albert"] {
        sign_up(&service, name).await;
    }

    let SearchOutcome::Matches(users) = service.search_by_name_prefix("AL").await.expect("search") else {
        panic!("expected matches");
    };
    assert_eq!(names(&users), vec!["Alice", "alfred", "Albert"]);

    let SearchOutcome::Matches(users) = service.search_by_name_prefix("").await.expect("search") else {
        panic!("expected matches");
    };
    assert_eq!(users.len(), 4);
}

#[tokio::test]
async fn exact_email_jumps_to_profile() {
    let service = memory_service();
    sign_up(&service, "alice").await;
    let bob = sign_up(&service, "bob").await;

    match service.search_by_name_prefix("Bob@Example.com").await.expect("search") {
        SearchOutcome::Profile(user) => assert_eq!(user.id, bob.id),
        other => panic!("expected profile, got {other:?}"),
    }
}

#[tokio::test]
async fn prefix_match_wins_over_email_for_the_same_user() {
    let service = memory_service();
    let mut form = registration("x");
    form.username = "xy@example.com".to_string();
    form.email = "xy@example.com".to_string();
    service.register(form).await.expect("register");

    let outcome = service.search_by_name_prefix("xy@example.com").await.expect("search");
    assert!(matches!(outcome, SearchOutcome::Matches(ref users) if users.len() == 1));
}

#[tokio::test]
async fn likers_are_annotated_relative_to_viewer() {
    let service = memory_service();
    let me = sign_up(&service, "me").await;
    let friend = sign_up(&service, "friend").await;
    let stranger = sign_up(&service, "stranger").await;
    let post = write_post(&service, &friend, "news").await;

    service.toggle_connection(&me, friend.id).await.expect("connect");
    for viewer in [&me, &friend, &stranger] {
        service.toggle_like(viewer, post.id).await.expect("like");
    }

    let cards = service.list_likers(post.id, &me).await.expect("likers");
    let tags: Vec<(String, Relationship)> = cards
        .iter()
        .map(|card| (card.user.username.clone(), card.relationship))
        .collect();
    assert_eq!(
        tags,
        vec![
            ("me".to_string(), Relationship::Myself),
            ("friend".to_string(), Relationship::Connected),
            ("stranger".to_string(), Relationship::NotConnected),
        ]
    );
}

#[tokio::test]
async fn connections_list_and_dispatch_by_kind() {
    let service = memory_service();
    let me = sign_up(&service, "me").await;
    let hub = sign_up(&service, "hub").await;
    let other = sign_up(&service, "other").await;
    service.toggle_connection(&hub, me.id).await.expect("connect me");
    service.toggle_connection(&hub, other.id).await.expect("connect other");

    let cards = service
        .user_list(UserListKind::Connections, hub.id, &me)
        .await
        .expect("connections");
    let relationships: Vec<Relationship> = cards.iter().map(|card| card.relationship).collect();
    assert_eq!(relationships, vec![Relationship::Myself, Relationship::NotConnected]);

    assert!(service.list_connections(404, &me).await.expect_err("missing").is_not_found());
    assert!(service.list_likers(404, &me).await.expect_err("missing").is_not_found());
}
