use crate::helpers::{spawn_app, unsubscribe_token};

#[tokio::test]
async fn an_unsubscribe_link_takes_the_subscriber_off_the_list() {
    let app = spawn_app().await;
    app.post_subscription("email=ursula_le_guin%40gmail.com".into())
        .await;

    let response = app
        .get_unsubscribe(&unsubscribe_token("ursula_le_guin@gmail.com"))
        .await;

    assert_eq!(200, response.status().as_u16());
    let html = response.text().await.unwrap();
    assert!(html.contains("ursula_le_guin@gmail.com"));

    // The list is empty again: the same address subscribes as new.
    let response = app
        .post_subscription("email=ursula_le_guin%40gmail.com".into())
        .await;
    let html = response.text().await.unwrap();
    assert!(html.contains("You are subscribed"));
}

#[tokio::test]
async fn replaying_an_unsubscribe_link_reports_no_matching_subscription() {
    let app = spawn_app().await;
    app.post_subscription("email=ursula_le_guin%40gmail.com".into())
        .await;
    let token = unsubscribe_token("ursula_le_guin@gmail.com");

    app.get_unsubscribe(&token).await;
    let response = app.get_unsubscribe(&token).await;

    assert_eq!(200, response.status().as_u16());
    let html = response.text().await.unwrap();
    assert!(html.contains("No matching subscription"));
}

#[tokio::test]
async fn an_unknown_token_reports_no_matching_subscription() {
    let app = spawn_app().await;

    let response = app
        .get_unsubscribe(&unsubscribe_token("stranger@nowhere.com"))
        .await;

    assert_eq!(200, response.status().as_u16());
    let html = response.text().await.unwrap();
    assert!(html.contains("No matching subscription"));
}

#[tokio::test]
async fn a_mangled_token_reports_no_matching_subscription() {
    let app = spawn_app().await;
    app.post_subscription("email=ursula_le_guin%40gmail.com".into())
        .await;

    for token in ["not-a-token", "abc123", "DEADBEEF"] {
        let response = app.get_unsubscribe(token).await;

        assert_eq!(200, response.status().as_u16());
        let html = response.text().await.unwrap();
        assert!(
            html.contains("No matching subscription"),
            "token {token} did not behave as unknown"
        );
    }
}
