use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, web};

use crate::render::Renderer;

use super::helpers::e500;

pub async fn home(renderer: web::Data<Renderer>) -> Result<HttpResponse, actix_web::Error> {
    let html = renderer
        .render("site/index.html", &tera::Context::new())
        .map_err(e500)?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(html))
}
