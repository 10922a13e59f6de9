use std::path::PathBuf;

use once_cell::sync::Lazy;
use tempfile::TempDir;
use wiremock::MockServer;

use postbox::configuration::{Settings, get_configuration};
use postbox::domain::{IdentityHash, SubscriberEmail};
use postbox::passcode::PasscodeAuthenticator;
use postbox::startup::Application;
use postbox::telemetry::{get_subscriber, init_subscriber};

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub email_server: MockServer,
    pub api_client: reqwest::Client,
    secret_path: PathBuf,
    // Owns the store and secret files for the lifetime of the test.
    _state_dir: TempDir,
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with_settings(|_| {}).await
}

pub async fn spawn_app_with_settings(customize: impl FnOnce(&mut Settings)) -> TestApp {
    Lazy::force(&TRACING);

    let email_server = MockServer::start().await;

    let state_dir = tempfile::tempdir().expect("Failed to create a state directory.");
    let secret_path = state_dir.path().join("passcode_secret");
    std::fs::write(&secret_path, "test-shared-secret").expect("Failed to write the secret.");

    let mut config = get_configuration().expect("Failed to read configuration");
    config.app.port = 0;
    config.email_client.base_url = email_server.uri();
    config.email_client.timeout_ms = 500;
    config.address_book.store_path = state_dir.path().join("address_book.json");
    config.passcode.secret_path = secret_path.clone();
    config.delivery.pacing_ms = 0;
    customize(&mut config);

    let app = Application::build(config)
        .await
        .expect("Failed to build the application.");
    let port = app.get_port();
    let _ = tokio::spawn(app.run_until_stopped());

    TestApp {
        address: format!("http://127.0.0.1:{port}"),
        email_server,
        api_client: reqwest::Client::new(),
        secret_path,
        _state_dir: state_dir,
    }
}

impl TestApp {
    pub async fn post_subscription(&self, body: String) -> reqwest::Response {
        self.api_client
            .post(format!("{}/subscriptions", self.address))
            .header("Content-type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_unsubscribe(&self, token: &str) -> reqwest::Response {
        self.api_client
            .get(format!(
                "{}/subscriptions/unsubscribe/{token}",
                self.address
            ))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_newsletter(&self, body: serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(format!("{}/newsletters", self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_print(&self, body: serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(format!("{}/newsletters/print", self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub fn store_path(&self) -> PathBuf {
        self._state_dir.path().join("address_book.json")
    }

    /// Derives the passcode of the current window from the same secret file
    /// the application was started with.
    pub fn valid_passcode(&self) -> String {
        PasscodeAuthenticator::load(&self.secret_path)
            .expect("Failed to load the test secret.")
            .current_passcode()
            .expect("Failed to derive the test passcode.")
    }

    /// A passcode guaranteed not to match the current window.
    pub fn wrong_passcode(&self) -> String {
        if self.valid_passcode() == "000000" {
            "111111".to_string()
        } else {
            "000000".to_string()
        }
    }
}

pub fn unsubscribe_token(email: &str) -> String {
    let email = SubscriberEmail::parse(email.to_string()).expect("Invalid test email.");
    IdentityHash::derive(&email).as_ref().to_string()
}

pub fn newsletter_body(passcode: &str) -> serde_json::Value {
    serde_json::json!({
        "passcode": passcode,
        "issue": {
            "title": "Postbox Weekly",
            "date": "2024-06-01",
            "body": "<p>News of the week.</p>"
        }
    })
}
