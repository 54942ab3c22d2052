use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{
    http::header,
    middleware::Logger,
    web::{self, resource, scope, Json, Path, Query},
    App, HttpRequest, HttpResponse, HttpServer,
};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::{
    auth::AdminSessions,
    core::{
        contact::{submit_contact, subscribe, ContactForm, FormRelay, NewsletterSignup, Relay},
        content::ContentService,
        data::{open_store, ContentStore},
        editor::{Draft, DraftView, Drafts, Edit, FieldPath},
        language::Language,
        media::{MediaPipeline, Upload},
        settings::Settings,
    },
    error::{CmsError, Result},
};

/// Edit batches may carry inline images.
const MAX_JSON_BYTES: usize = 16 * 1024 * 1024;

const FILE_NAME_HEADER: &str = "X-File-Name";

pub struct AppState {
    pub settings: Settings,
    pub content: ContentService,
    pub drafts: Drafts,
    pub sessions: AdminSessions,
    pub media: MediaPipeline,
    pub relay: Box<dyn Relay>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let store = open_store(&settings);
        let relay = Box::new(FormRelay::new(settings.relay_endpoint.clone()));
        AppState::with_parts(settings, store, relay)
    }

    pub fn with_parts(
        settings: Settings,
        store: Arc<dyn ContentStore>,
        relay: Box<dyn Relay>,
    ) -> Self {
        AppState {
            content: ContentService::new(store, settings.store_timeout()),
            drafts: Drafts::new(settings.draft_ttl()),
            sessions: AdminSessions::new(settings.session_ttl()),
            media: MediaPipeline::new(settings.media),
            relay,
            settings,
        }
    }

    fn authorize(&self, key: &BearerAuth) -> Result<()> {
        self.sessions.check(key.token())
    }
}

pub async fn start_server(settings: Settings) -> std::io::Result<()> {
    let addr = settings.socket_addr();
    let state = web::Data::new(AppState::new(settings));
    info!("Content store: {}", state.content.store().describe());
    state.content.load().await;

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(routes)
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_header()
                    .allow_any_method(),
            )
            .wrap(Logger::default())
    })
    .bind(addr)?;
    info!("Server started at {}", addr);
    server.run().await
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().limit(MAX_JSON_BYTES))
        .service(
            scope("/v1")
                .service(resource("/status").route(web::get().to(status_handler)))
                .service(resource("/content").route(web::get().to(content_handler)))
                .service(resource("/content/{lang}").route(web::get().to(language_handler)))
                .service(resource("/contact").route(web::post().to(contact_handler)))
                .service(resource("/newsletter").route(web::post().to(newsletter_handler)))
                .service(
                    scope("/admin")
                        .service(resource("/login").route(web::post().to(login_handler)))
                        .service(resource("/logout").route(web::post().to(logout_handler)))
                        .service(resource("/drafts").route(web::post().to(open_draft_handler)))
                        .service(
                            resource("/drafts/{id}")
                                .route(web::get().to(get_draft_handler))
                                .route(web::patch().to(edit_draft_handler))
                                .route(web::delete().to(cancel_draft_handler)),
                        )
                        .service(
                            resource("/drafts/{id}/language")
                                .route(web::put().to(switch_language_handler)),
                        )
                        .service(
                            resource("/drafts/{id}/media").route(web::post().to(upload_handler)),
                        )
                        .service(
                            resource("/drafts/{id}/publish")
                                .route(web::post().to(publish_handler)),
                        )
                        .service(
                            resource("/subscribers")
                                .route(web::get().to(subscribers_handler))
                                .route(web::delete().to(clear_subscribers_handler)),
                        )
                        .service(
                            resource("/subscribers/{email}")
                                .route(web::delete().to(delete_subscriber_handler)),
                        ),
                ),
        );
}

async fn status_handler() -> HttpResponse {
    HttpResponse::Ok().body("rdcl-site is running")
}

async fn content_handler(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.content.translations())
}

async fn language_handler(state: web::Data<AppState>, lang: Path<String>) -> Result<HttpResponse> {
    let language: Language = lang.parse()?;
    Ok(HttpResponse::Ok().json(state.content.resolve(language)))
}

async fn contact_handler(
    state: web::Data<AppState>,
    form: Json<ContactForm>,
) -> Result<HttpResponse> {
    submit_contact(state.relay.as_ref(), &form, &state.settings.contact_subject).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

async fn newsletter_handler(
    state: web::Data<AppState>,
    signup: Json<NewsletterSignup>,
) -> Result<HttpResponse> {
    let added = subscribe(
        &state.content,
        state.relay.as_ref(),
        &signup,
        &state.settings.newsletter_subject,
    )
    .await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "added": added })))
}

#[derive(Deserialize)]
struct LoginRequest {
    password: String,
}

async fn login_handler(
    state: web::Data<AppState>,
    login: Json<LoginRequest>,
) -> Result<HttpResponse> {
    let token = state
        .sessions
        .login(&login.password, state.settings.admin_hash())?;
    Ok(HttpResponse::Ok().json(json!({ "token": token })))
}

async fn logout_handler(state: web::Data<AppState>, key: BearerAuth) -> HttpResponse {
    state.sessions.logout(key.token());
    HttpResponse::NoContent().finish()
}

#[derive(Deserialize)]
struct LanguageRequest {
    #[serde(default)]
    language: Language,
}

async fn open_draft_handler(
    state: web::Data<AppState>,
    key: BearerAuth,
    request: Json<LanguageRequest>,
) -> Result<HttpResponse> {
    state.authorize(&key)?;
    let draft = Draft::open(&state.content.translations(), request.language);
    Ok(HttpResponse::Created().json(state.drafts.insert(draft)))
}

async fn get_draft_handler(
    state: web::Data<AppState>,
    key: BearerAuth,
    id: Path<Uuid>,
) -> Result<HttpResponse> {
    state.authorize(&key)?;
    Ok(HttpResponse::Ok().json(state.drafts.view(*id)?))
}

#[derive(Deserialize)]
struct EditBatch {
    edits: Vec<Edit>,
}

async fn edit_draft_handler(
    state: web::Data<AppState>,
    key: BearerAuth,
    id: Path<Uuid>,
    batch: Json<EditBatch>,
) -> Result<HttpResponse> {
    state.authorize(&key)?;
    let view = state.drafts.update(*id, |draft| {
        draft.apply(&batch.edits)?;
        Ok(DraftView::from(&*draft))
    })?;
    Ok(HttpResponse::Ok().json(view))
}

async fn switch_language_handler(
    state: web::Data<AppState>,
    key: BearerAuth,
    id: Path<Uuid>,
    request: Json<LanguageRequest>,
) -> Result<HttpResponse> {
    state.authorize(&key)?;
    let view = state.drafts.update(*id, |draft| {
        draft.switch_language(request.language);
        Ok(DraftView::from(&*draft))
    })?;
    Ok(HttpResponse::Ok().json(view))
}

async fn cancel_draft_handler(
    state: web::Data<AppState>,
    key: BearerAuth,
    id: Path<Uuid>,
) -> Result<HttpResponse> {
    state.authorize(&key)?;
    state.drafts.take(*id)?.cancel();
    Ok(HttpResponse::NoContent().finish())
}

#[derive(Deserialize)]
struct MediaTarget {
    path: FieldPath,
}

fn header_value(request: &HttpRequest, name: impl header::AsHeaderName) -> String {
    request
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

async fn upload_handler(
    state: web::Data<AppState>,
    key: BearerAuth,
    id: Path<Uuid>,
    target: Query<MediaTarget>,
    request: HttpRequest,
    payload: web::Payload,
) -> Result<HttpResponse> {
    state.authorize(&key)?;
    state.drafts.view(*id)?;
    let max = state.media.max_upload_bytes();
    let body = match payload.to_bytes_limited(max).await {
        Ok(body) => body.map_err(|error| CmsError::ImageDecode(error.to_string()))?,
        Err(_) => return Err(state.media.too_large(max + 1)),
    };
    let upload = Upload {
        file_name: header_value(&request, FILE_NAME_HEADER),
        content_type: header_value(&request, header::CONTENT_TYPE),
        bytes: body.to_vec(),
    };
    let pipeline = state.media.clone();
    let data_uri = web::block(move || pipeline.ingest(&upload))
        .await
        .map_err(|error| CmsError::ImageDecode(error.to_string()))??;

    let target = target.into_inner();
    let view = state.drafts.update(*id, |draft| {
        draft.attach_media(target.path, data_uri)?;
        Ok(DraftView::from(&*draft))
    })?;
    Ok(HttpResponse::Ok().json(view))
}

async fn publish_handler(
    state: web::Data<AppState>,
    key: BearerAuth,
    id: Path<Uuid>,
) -> Result<HttpResponse> {
    state.authorize(&key)?;
    let draft = state.drafts.take(*id)?;
    match draft.publish(&state.content).await {
        Ok(()) => Ok(HttpResponse::Ok().json(state.content.translations())),
        Err((draft, error)) => {
            state.drafts.restore(draft);
            Err(error)
        }
    }
}

async fn subscribers_handler(
    state: web::Data<AppState>,
    key: BearerAuth,
) -> Result<HttpResponse> {
    state.authorize(&key)?;
    Ok(HttpResponse::Ok().json(state.content.subscribers().await))
}

async fn delete_subscriber_handler(
    state: web::Data<AppState>,
    key: BearerAuth,
    email: Path<String>,
) -> Result<HttpResponse> {
    state.authorize(&key)?;
    let deleted = state.content.delete_subscriber(&email).await?;
    Ok(HttpResponse::Ok().json(json!({ "deleted": deleted })))
}

async fn clear_subscribers_handler(
    state: web::Data<AppState>,
    key: BearerAuth,
) -> Result<HttpResponse> {
    state.authorize(&key)?;
    state.content.clear_subscribers().await?;
    Ok(HttpResponse::NoContent().finish())
}
