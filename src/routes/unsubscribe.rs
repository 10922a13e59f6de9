use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError, web};
use anyhow::Context;

use crate::address_book::AddressBook;
use crate::domain::IdentityHash;
use crate::render::Renderer;

use super::helpers::error_chain_fmt;

#[derive(thiserror::Error)]
pub enum UnsubscribeError {
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for UnsubscribeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for UnsubscribeError {
    fn status_code(&self) -> StatusCode {
        match self {
            UnsubscribeError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[tracing::instrument(
    name = "Unsubscribing by token",
    skip(address_book, renderer),
    fields(token = %path)
)]
pub async fn unsubscribe(
    path: web::Path<String>,
    address_book: web::Data<AddressBook>,
    renderer: web::Data<Renderer>,
) -> Result<HttpResponse, UnsubscribeError> {
    // A token that does not even parse behaves like an unknown one; stale
    // or mangled links must never turn into server errors.
    let removed = match IdentityHash::parse(path.into_inner()) {
        Ok(token) => address_book
            .remove(&token)
            .await
            .context("Failed to persist the unsubscription.")?,
        Err(_) => None,
    };

    let html = match removed {
        Some(email) => {
            tracing::info!("A subscriber left the list.");
            let mut ctx = tera::Context::new();
            ctx.insert("email", &email);
            renderer.render("site/unsubscribed_successfully.html", &ctx)
        }
        None => renderer.render("site/unsubscribed_no_email.html", &tera::Context::new()),
    }
    .context("Failed to render the unsubscription page.")?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(html))
}
