mod config;
mod model;
mod web;
mod weaver;

use actix_web::{App, HttpServer, web::Data};
use actix_files as fs;
use dotenv::dotenv;
use log::{info, error};
use std::sync::Arc;
use tera::Tera;

use config::Settings;
use model::ChatCompletionModel;
use weaver::StoryWeaver;
use web::routes;

// App state structure
struct AppState {
    tera: Tera,
    weaver: StoryWeaver,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize environment
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting Word Weaver");

    let settings = Settings::from_env();

    let model = match ChatCompletionModel::new(settings.llm.clone()) {
        Ok(model) => Arc::new(model),
        Err(e) => {
            error!("Failed to initialize completion client: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize template engine
    let mut tera = match Tera::new(&format!("{}/**/*", settings.templates_dir)) {
        Ok(t) => t,
        Err(e) => {
            error!("Template parsing error: {}", e);
            std::process::exit(1);
        }
    };
    tera.autoescape_on(vec![".html"]);

    let app_state = Data::new(AppState {
        tera,
        weaver: StoryWeaver::new(model),
    });

    let static_dir = settings.static_dir.clone();
    info!("Listening on {}:{}", settings.host, settings.port);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .configure(routes::configure)
            .service(fs::Files::new("/static", static_dir.clone()))
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await
}
