use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::{ServiceError, activity as activity_service};

#[derive(Deserialize)]
struct ActivityQueryParams {
    page: Option<usize>,
    kind: Option<String>,
}

#[get("/activity")]
pub async fn show_activity(
    params: web::Query<ActivityQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match activity_service::load_activity_page(
        repo.get_ref(),
        &user,
        params.page.unwrap_or(1),
        params.kind.as_deref(),
    ) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "activity",
                &server_config.auth_service_url,
            );
            context.insert("entries", &data.entries);
            context.insert("total", &data.total);
            if let Some(kind) = &params.kind {
                context.insert("kind", kind);
            }

            render_template(&tera, "activity/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to load activity page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
