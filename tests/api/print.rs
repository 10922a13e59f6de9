use wiremock::{
    Mock, ResponseTemplate,
    matchers::any,
};

use crate::helpers::{newsletter_body, spawn_app};

#[tokio::test]
async fn a_valid_passcode_yields_the_rendered_print_version() {
    let app = spawn_app().await;

    let response = app.post_print(newsletter_body(&app.valid_passcode())).await;

    assert_eq!(200, response.status().as_u16());
    assert!(
        response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .starts_with("text/html")
    );
    let html = response.text().await.unwrap();
    assert!(html.contains("Postbox Weekly"));
    assert!(html.contains("<p>News of the week.</p>"));
}

#[tokio::test]
async fn a_wrong_passcode_is_rejected() {
    let app = spawn_app().await;

    let response = app.post_print(newsletter_body(&app.wrong_passcode())).await;

    assert_eq!(403, response.status().as_u16());
}

#[tokio::test]
async fn an_incomplete_issue_is_rejected() {
    let app = spawn_app().await;

    let body = serde_json::json!({
        "passcode": app.valid_passcode(),
        "issue": {"title": "Weekly", "date": "", "body": "<p>Hi</p>"}
    });
    let response = app.post_print(body).await;

    assert_eq!(400, response.status().as_u16());
}

#[tokio::test]
async fn printing_never_touches_the_mail_transport() {
    let app = spawn_app().await;
    app.post_subscription("email=a%40domain.com".into()).await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let response = app.post_print(newsletter_body(&app.valid_passcode())).await;

    assert_eq!(200, response.status().as_u16());
}
