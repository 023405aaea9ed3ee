pub mod auth;
pub mod health;
pub mod todos;

use actix_web::http::header;
use actix_web::{web, HttpResponse};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(health::health)
        .service(auth::index)
        .service(auth::register_page)
        .service(auth::register)
        .service(auth::login_page)
        .service(auth::login)
        .service(auth::logout)
        .service(
            web::scope("/todos")
                .service(todos::list_todos)
                .service(todos::create_todo)
                .service(todos::toggle_todo)
                .service(todos::delete_todo),
        );
}

/// `303 See Other` to `location`, so the browser follows up with a GET.
pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub(crate) fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}
