use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::profile::ProfileForm;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::{ServiceError, profile as profile_service};

#[get("/profile")]
pub async fn show_profile(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match profile_service::load_profile_page(repo.get_ref(), &user) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "profile",
                &server_config.auth_service_url,
            );
            context.insert("profile", &data.profile);
            context.insert("saved_count", &data.saved_count);

            render_template(&tera, "profile/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to load profile page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/profile")]
pub async fn save_profile(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ProfileForm>,
) -> impl Responder {
    match profile_service::save_profile(repo.get_ref(), &user, form) {
        Ok(_) => {
            FlashMessage::success("Profile updated.").send();
            redirect("/profile")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/profile")
        }
        Err(err) => {
            log::error!("Failed to save profile: {err}");
            FlashMessage::error("Could not update the profile.").send();
            redirect("/profile")
        }
    }
}
