use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError, web};
use anyhow::Context;

use crate::address_book::AddressBook;
use crate::domain::SubscriberEmail;
use crate::render::Renderer;

use super::helpers::error_chain_fmt;

#[derive(serde::Deserialize)]
pub struct FormData {
    pub email: String,
}

#[derive(thiserror::Error)]
pub enum SubscribeError {
    #[error("{0}")]
    ValidationError(String),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for SubscribeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for SubscribeError {
    fn status_code(&self) -> StatusCode {
        match self {
            SubscribeError::ValidationError(_) => StatusCode::BAD_REQUEST,
            SubscribeError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[tracing::instrument(
    name = "Adding a new subscriber",
    skip(form, address_book, renderer),
    fields(subscriber_email = %form.email)
)]
pub async fn subscribe(
    form: web::Form<FormData>,
    address_book: web::Data<AddressBook>,
    renderer: web::Data<Renderer>,
) -> Result<HttpResponse, SubscribeError> {
    let email = SubscriberEmail::parse(form.0.email).map_err(SubscribeError::ValidationError)?;

    let newly_added = address_book
        .add(&email)
        .await
        .context("Failed to persist the new subscriber.")?;
    if !newly_added {
        tracing::info!("The address is already on the list.");
    }

    let template = if newly_added {
        "site/subscription_successful.html"
    } else {
        "site/subscription_repeat.html"
    };
    let html = renderer
        .render(template, &tera::Context::new())
        .context("Failed to render the subscription page.")?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(html))
}
