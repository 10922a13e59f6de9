use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse, web};
use anyhow::Context;

use crate::domain::IssueContent;
use crate::passcode::PasscodeAuthenticator;
use crate::render::Renderer;

use super::errors::PublishError;
use super::publish::check_passcode;
use super::types::BodySchema;

/// The single-output sibling of the dispatch job: same gate, one render,
/// no registry access and no pacing.
#[tracing::instrument(
    name = "Generating a print version",
    skip_all,
    fields(issue_title = tracing::field::Empty)
)]
pub async fn print_newsletter(
    request: HttpRequest,
    body: web::Json<BodySchema>,
    authenticator: web::Data<PasscodeAuthenticator>,
    renderer: web::Data<Renderer>,
) -> Result<HttpResponse, PublishError> {
    let BodySchema { passcode, issue } = body.into_inner();
    let issue: IssueContent = issue.try_into().map_err(PublishError::ValidationError)?;
    tracing::Span::current().record("issue_title", tracing::field::display(issue.title()));

    check_passcode(&authenticator, &passcode, &request)?;

    let html = renderer
        .render("print/newsletter.html", &issue.context())
        .context("Failed to render the print template.")?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(html))
}
