use crate::models::{HighlightRequest, HighlightResponse, RenderRequest, RenderResponse};
use crate::render::{highlight, render_markdown};
use actix_web::{web, HttpResponse, Responder};

const EDITOR_PAGE: &str = include_str!("../../static/editor.html");

/// Configure the editor page and its rendering endpoints
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/editor", web::get().to(editor_page)).service(
        web::scope("/ui")
            .route("/render", web::post().to(render))
            .route("/highlight", web::post().to(highlight_code)),
    );
}

async fn editor_page() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(EDITOR_PAGE)
}

/// POST /ui/render - review markdown to HTML
async fn render(req: web::Json<RenderRequest>) -> impl Responder {
    HttpResponse::Ok().json(RenderResponse {
        html: render_markdown(&req.text),
    })
}

/// POST /ui/highlight - editor contents to highlighted HTML
async fn highlight_code(req: web::Json<HighlightRequest>) -> impl Responder {
    HttpResponse::Ok().json(HighlightResponse {
        html: highlight(&req.code, &req.language),
    })
}
