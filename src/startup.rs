use std::net::TcpListener;
use std::time::Duration;

use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use crate::address_book::AddressBook;
use crate::configuration::Settings;
use crate::email_client::EmailClient;
use crate::passcode::PasscodeAuthenticator;
use crate::render::Renderer;
use crate::routes::{
    health_check, home, print_newsletter, publish_newsletter, subscribe, unsubscribe,
};

pub struct Application {
    port: u16,
    server: Server,
}

pub struct ApplicationBaseURL(pub String);

/// Delivery knobs handed to the dispatch loop.
pub struct DeliveryOptions {
    pub list_unsubscribe: bool,
    pub pacing: Duration,
}

impl Application {
    pub async fn build(config: Settings) -> Result<Self, anyhow::Error> {
        let email_client = config.email_client.client();

        let renderer = Renderer::load(&config.app.templates_dir)?;

        let address_book = AddressBook::load(&config.address_book.store_path)
            .await
            .context("Failed to open the address book store")?;

        let authenticator = PasscodeAuthenticator::load(&config.passcode.secret_path)
            .context("Failed to load the passcode secret")?;

        let address = format!("{}:{}", config.app.host, config.app.port);
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();
        let server = run(
            listener,
            address_book,
            authenticator,
            email_client,
            renderer,
            config.app.base_url,
            DeliveryOptions {
                list_unsubscribe: config.delivery.list_unsubscribe,
                pacing: config.delivery.pacing(),
            },
        )?;

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    address_book: AddressBook,
    authenticator: PasscodeAuthenticator,
    email_client: EmailClient,
    renderer: Renderer,
    base_url: String,
    delivery: DeliveryOptions,
) -> Result<Server, anyhow::Error> {
    let address_book = web::Data::new(address_book);
    let authenticator = web::Data::new(authenticator);
    let email_client = web::Data::new(email_client);
    let renderer = web::Data::new(renderer);
    let base_url = web::Data::new(ApplicationBaseURL(base_url));
    let delivery = web::Data::new(delivery);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/", web::get().to(home))
            .route("/health_check", web::get().to(health_check))
            .route("/subscriptions", web::post().to(subscribe))
            .route(
                "/subscriptions/unsubscribe/{token}",
                web::get().to(unsubscribe),
            )
            .route("/newsletters", web::post().to(publish_newsletter))
            .route("/newsletters/print", web::post().to(print_newsletter))
            .app_data(address_book.clone())
            .app_data(authenticator.clone())
            .app_data(email_client.clone())
            .app_data(renderer.clone())
            .app_data(base_url.clone())
            .app_data(delivery.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
