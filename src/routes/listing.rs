use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::forms::listing::AddListingForm;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::{ServiceError, listing as listing_service};

#[derive(Deserialize)]
struct SavedQueryParams {
    page: Option<usize>,
}

#[get("/listing/{id}")]
pub async fn show_listing(
    listing_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match listing_service::get_listing_page(repo.get_ref(), &user, listing_id.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "search",
                &server_config.auth_service_url,
            );
            context.insert("listing", &data.listing);
            context.insert("saved", &data.saved);

            render_template(&tera, "listing/show.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to load listing page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/listing/add")]
pub async fn add_listing(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddListingForm>,
) -> impl Responder {
    match listing_service::add_listing(repo.get_ref(), &user, form) {
        Ok(listing) => {
            FlashMessage::success("Listing published.").send();
            redirect(&format!("/listing/{}", listing.id))
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to add listing: {err}");
            FlashMessage::error("Could not publish the listing.").send();
            redirect("/")
        }
    }
}

#[post("/listing/{id}/save")]
pub async fn save_listing(
    listing_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let listing_id = listing_id.into_inner();
    match listing_service::save_listing(repo.get_ref(), &user, listing_id) {
        Ok(_) => {
            FlashMessage::success("Listing saved.").send();
            redirect(&format!("/listing/{listing_id}"))
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to save listing {listing_id}: {err}");
            FlashMessage::error("Could not save the listing.").send();
            redirect(&format!("/listing/{listing_id}"))
        }
    }
}

#[post("/listing/{id}/unsave")]
pub async fn unsave_listing(
    listing_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let listing_id = listing_id.into_inner();
    match listing_service::unsave_listing(repo.get_ref(), &user, listing_id) {
        Ok(_) => redirect("/saved"),
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to unsave listing {listing_id}: {err}");
            FlashMessage::error("Could not remove the saved listing.").send();
            redirect("/saved")
        }
    }
}

#[post("/listing/{id}/delete")]
pub async fn delete_listing(
    listing_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match listing_service::delete_listing(repo.get_ref(), &user, listing_id.into_inner()) {
        Ok(()) => {
            FlashMessage::success("Listing removed.").send();
            redirect("/")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to delete listing: {err}");
            FlashMessage::error("Could not remove the listing.").send();
            redirect("/")
        }
    }
}

#[get("/saved")]
pub async fn show_saved(
    params: web::Query<SavedQueryParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match listing_service::load_saved_page(repo.get_ref(), &user, params.page.unwrap_or(1)) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "saved",
                &server_config.auth_service_url,
            );
            context.insert("listings", &data.listings);
            context.insert("total", &data.total);

            render_template(&tera, "listing/saved.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to load saved listings: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
