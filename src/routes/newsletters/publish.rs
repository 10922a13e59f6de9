use actix_web::{HttpRequest, HttpResponse, web};
use anyhow::Context;
use secrecy::{ExposeSecret, SecretString};
use uuid::Uuid;

use crate::address_book::AddressBook;
use crate::domain::{IssueContent, SubscriberEmail};
use crate::email_client::EmailClient;
use crate::passcode::PasscodeAuthenticator;
use crate::render::Renderer;
use crate::startup::{ApplicationBaseURL, DeliveryOptions};

use super::errors::PublishError;
use super::types::BodySchema;

#[tracing::instrument(
    name = "Publishing a newsletter issue",
    skip_all,
    fields(job_id = %Uuid::new_v4(), issue_title = tracing::field::Empty)
)]
pub async fn publish_newsletter(
    request: HttpRequest,
    body: web::Json<BodySchema>,
    address_book: web::Data<AddressBook>,
    authenticator: web::Data<PasscodeAuthenticator>,
    email_client: web::Data<EmailClient>,
    renderer: web::Data<Renderer>,
    base_url: web::Data<ApplicationBaseURL>,
    delivery: web::Data<DeliveryOptions>,
) -> Result<HttpResponse, PublishError> {
    let BodySchema { passcode, issue } = body.into_inner();
    let issue: IssueContent = issue.try_into().map_err(PublishError::ValidationError)?;
    tracing::Span::current().record("issue_title", tracing::field::display(issue.title()));

    check_passcode(&authenticator, &passcode, &request)?;

    let recipients = address_book.snapshot().await;
    send_newsletter_issue(
        recipients,
        &issue,
        &email_client,
        &renderer,
        &base_url,
        &delivery,
    )
    .await?;

    Ok(HttpResponse::Ok().finish())
}

/// Shared gate of the privileged operations. A mismatch leaves the
/// registry untouched and logs the caller's origin; an authenticator
/// breakage is surfaced as its own failure, never as a denial.
pub(super) fn check_passcode(
    authenticator: &PasscodeAuthenticator,
    candidate: &SecretString,
    request: &HttpRequest,
) -> Result<(), PublishError> {
    let matches = authenticator
        .validate(candidate.expose_secret())
        .map_err(PublishError::AuthenticatorUnavailable)?;

    if !matches {
        let conn = request.connection_info();
        let caller = conn.peer_addr().unwrap_or("unknown");
        tracing::warn!(%caller, "Rejected a privileged request: incorrect passcode.");
        return Err(PublishError::AuthorizationDenied);
    }

    Ok(())
}

#[tracing::instrument(
    name = "Delivering the issue to the subscriber list",
    skip_all,
    fields(recipients = recipients.len())
)]
async fn send_newsletter_issue(
    recipients: Vec<(String, String)>,
    issue: &IssueContent,
    email_client: &EmailClient,
    renderer: &Renderer,
    base_url: &ApplicationBaseURL,
    delivery: &DeliveryOptions,
) -> Result<(), PublishError> {
    let subject = issue.subject();

    for (token, stored_email) in recipients {
        let email = match SubscriberEmail::parse(stored_email) {
            Ok(email) => email,
            Err(err) => {
                tracing::warn!(
                    err.cause_chain = ?err,
                    "Skipping a subscriber. The stored contact details are invalid."
                );
                continue;
            }
        };

        let unsubscribe_url = delivery
            .list_unsubscribe
            .then(|| format!("{}/subscriptions/unsubscribe/{}", base_url.0, token));

        // Each recipient renders from its own context; one subscriber's
        // unsubscribe link must never leak into another's message.
        let context = match &unsubscribe_url {
            Some(url) => issue.context_with_unsubscribe(url),
            None => issue.context(),
        };
        let html = renderer
            .render("mail/newsletter.html", &context)
            .context("Failed to render the newsletter mail template.")?;
        let text = renderer
            .render("mail/newsletter.txt", &context)
            .context("Failed to render the newsletter text template.")?;

        // A refused send is this recipient's problem alone. The batch keeps
        // going and the job still reports completion.
        if let Err(err) = email_client
            .send_email(&email, &subject, &html, &text, unsubscribe_url.as_deref())
            .await
        {
            tracing::error!(
                err.cause_chain = ?err,
                subscriber_email = %email,
                "Failed to deliver the issue to a subscriber."
            );
        }

        tokio::time::sleep(delivery.pacing).await;
    }

    Ok(())
}
