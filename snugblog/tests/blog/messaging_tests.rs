use super::support::*;

#[tokio::test]
async fn conversation_is_the_same_from_both_sides() {
    let service = memory_service();
    let one = sign_up(&service, "one").await;
    let two = sign_up(&service, "two").await;
    let three = sign_up(&service, "three").await;

    service.send_message(&one, one.id, two.id, message("hi")).await.expect("hi");
    service.send_message(&three, three.id, one.id, message("elsewhere")).await.expect("other pair");
    service.send_message(&two, two.id, one.id, message("hello")).await.expect("hello");

    let forward = service.list_conversation(one.id, two.id).await.expect("forward");
    let backward = service.list_conversation(two.id, one.id).await.expect("backward");
    assert_eq!(forward, backward);
    let texts: Vec<&str> = forward.iter().map(|message| message.content.as_str()).collect();
    assert_eq!(texts, vec!["hi", "hello"]);
    assert_eq!((forward[0].sender_id, forward[0].receiver_id), (one.id, two.id));
}

#[tokio::test]
async fn sender_must_be_the_viewer() {
    let service = memory_service();
    let one = sign_up(&service, "one").await;
    let two = sign_up(&service, "two").await;

    let err = service
        .send_message(&one, two.id, one.id, message("spoofed"))
        .await
        .expect_err("spoofed sender");
    assert!(err.is_forbidden());
    assert!(service.list_conversation(one.id, two.id).await.expect("log").is_empty());
}

#[tokio::test]
async fn message_to_missing_user_is_not_found() {
    let service = memory_service();
    let one = sign_up(&service, "one").await;
    let err = service
        .send_message(&one, one.id, 77, message("anyone?"))
        .await
        .expect_err("no receiver");
    assert!(err.is_not_found());
}

#[tokio::test]
async fn conversation_view_names_the_other_user() {
    let service = memory_service();
    let one = sign_up(&service, "one").await;
    let two = sign_up(&service, "two").await;
    service.send_message(&one, one.id, two.id, message("hi")).await.expect("hi");

    let view = service.conversation_view(&two, one.id).await.expect("view");
    assert_eq!(view.with.username, "one");
    assert_eq!(view.messages.len(), 1);
}
