use actix_web::web;
use crate::web::handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/story", web::post().to(handlers::api_story))
            .route("/translate", web::post().to(handlers::api_translate))
            .route("/languages", web::get().to(handlers::languages))
    )
    .route("/", web::get().to(handlers::index))
    .route("/story", web::post().to(handlers::story_form))
    .route("/translate", web::post().to(handlers::translate_form))
    .route("/export", web::post().to(handlers::export))
    .route("/health", web::get().to(handlers::health_check));
}
