use actix_web::http::header::{ContentDisposition, ContentType, DispositionParam, DispositionType};
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, Responder};
use log::{error, info, warn};
use serde_json::json;
use tera::Context;
use uuid::Uuid;

use crate::web::models::{
    export_base, validate_prompt, ExportForm, PageView, PromptForm, TranslateForm,
};
use crate::weaver::language::{export_file_name, LANGUAGES};
use crate::weaver::state::WeaverState;
use crate::weaver::{StoryRequest, TranslationRequest};
use crate::AppState;

fn render_page(data: &AppState, view: &PageView<'_>, status: StatusCode) -> HttpResponse {
    let rendered = Context::from_serialize(view).and_then(|ctx| data.tera.render("index.html", &ctx));
    match rendered {
        Ok(html) => HttpResponse::build(status).content_type("text/html").body(html),
        Err(e) => {
            error!("Template error: {}", e);
            HttpResponse::InternalServerError().body("Template error")
        }
    }
}

// Index page handler
pub async fn index(data: web::Data<AppState>) -> impl Responder {
    let state = WeaverState::Idle;
    render_page(&data, &PageView::new(&state, "", None), StatusCode::OK)
}

// Health check endpoint
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

pub async fn languages() -> impl Responder {
    HttpResponse::Ok().json(LANGUAGES)
}

// Story form: always starts over from a fresh generation
pub async fn story_form(data: web::Data<AppState>, form: web::Form<PromptForm>) -> impl Responder {
    let request_id = Uuid::new_v4();

    let prompt = match validate_prompt(&form.prompt) {
        Ok(prompt) => prompt,
        Err(message) => {
            warn!("[{}] Rejected prompt: {}", request_id, message);
            let state = WeaverState::Idle;
            let view = PageView::new(&state, &form.prompt, None).with_prompt_error(message);
            return render_page(&data, &view, StatusCode::BAD_REQUEST);
        }
    };

    info!("[{}] Story form submitted: {}", request_id, prompt);
    let state = WeaverState::Idle.submit();

    let result = data
        .weaver
        .generate_story(&StoryRequest {
            input_word: prompt.to_string(),
        })
        .await
        .map(|response| response.story);

    match state.finish_generation(result) {
        Ok(state) => render_page(&data, &PageView::new(&state, prompt, None), StatusCode::OK),
        Err(e) => {
            error!("[{}] Invalid state transition: {}", request_id, e);
            HttpResponse::InternalServerError().body("Internal server error")
        }
    }
}

// Translation form: the story travels with the form so it survives the round trip
pub async fn translate_form(
    data: web::Data<AppState>,
    form: web::Form<TranslateForm>,
) -> impl Responder {
    let request_id = Uuid::new_v4();
    let language = form.language.trim();

    let state = if form.story.trim().is_empty() {
        WeaverState::Idle
    } else {
        WeaverState::StoryReady {
            story: form.story.clone(),
        }
    };

    if language.is_empty() {
        let view = PageView::new(&state, &form.prompt, None).with_prompt_error("Please choose a language.");
        return render_page(&data, &view, StatusCode::BAD_REQUEST);
    }

    let state = match state.begin_translation(language) {
        Ok(state) => state,
        Err(e) => {
            warn!("[{}] Rejected translation: {}", request_id, e);
            let message = e.to_string();
            let state = WeaverState::Idle;
            let view = PageView::new(&state, &form.prompt, Some(language)).with_prompt_error(&message);
            return render_page(&data, &view, StatusCode::BAD_REQUEST);
        }
    };

    info!("[{}] Translation form submitted: {}", request_id, language);
    let result = data
        .weaver
        .translate_story(&TranslationRequest {
            text_to_translate: form.story.clone(),
            target_language: language.to_string(),
        })
        .await
        .map(|response| response.translated_text);

    match state.finish_translation(result) {
        Ok(state) => render_page(
            &data,
            &PageView::new(&state, &form.prompt, Some(language)),
            StatusCode::OK,
        ),
        Err(e) => {
            error!("[{}] Invalid state transition: {}", request_id, e);
            HttpResponse::InternalServerError().body("Internal server error")
        }
    }
}

// Plain-text download of the story or one of its translations
pub async fn export(form: web::Form<ExportForm>) -> impl Responder {
    if form.text.is_empty() {
        return HttpResponse::BadRequest().body("Nothing to save");
    }

    let file_name = export_file_name(&export_base(form.language.as_deref()));
    info!("Exporting {} characters as {}", form.text.chars().count(), file_name);

    HttpResponse::Ok()
        .insert_header(ContentType::plaintext())
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(file_name)],
        })
        .body(form.into_inner().text)
}

// Story API endpoint
pub async fn api_story(data: web::Data<AppState>, req: web::Json<StoryRequest>) -> impl Responder {
    let request_id = Uuid::new_v4();

    let input_word = match validate_prompt(&req.input_word) {
        Ok(prompt) => prompt.to_string(),
        Err(message) => {
            warn!("[{}] Rejected prompt: {}", request_id, message);
            return HttpResponse::BadRequest().json(json!({ "error": message }));
        }
    };

    info!("[{}] Story request: {}", request_id, input_word);

    match data.weaver.generate_story(&StoryRequest { input_word }).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            error!("[{}] Story request failed: {}", request_id, e);
            HttpResponse::InternalServerError().json(json!({ "error": e.to_string() }))
        }
    }
}

// Translation API endpoint
pub async fn api_translate(
    data: web::Data<AppState>,
    req: web::Json<TranslationRequest>,
) -> impl Responder {
    let request_id = Uuid::new_v4();

    if req.text_to_translate.trim().is_empty() || req.target_language.trim().is_empty() {
        warn!("[{}] Rejected translation with missing fields", request_id);
        return HttpResponse::BadRequest().json(json!({
            "error": "Both textToTranslate and targetLanguage are required."
        }));
    }

    info!("[{}] Translation request: {}", request_id, req.target_language);

    match data.weaver.translate_story(&req).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            error!("[{}] Translation request failed: {}", request_id, e);
            HttpResponse::InternalServerError().json(json!({ "error": e.to_string() }))
        }
    }
}
