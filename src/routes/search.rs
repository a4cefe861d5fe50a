use actix_web::{HttpRequest, HttpResponse, Responder, get, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dto::search::SearchParams;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::{ServiceError, search as search_service};

#[get("/search")]
pub async fn show_search(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    // Category and condition checkboxes repeat in the query string,
    // which actix's Query extractor cannot represent.
    let params: SearchParams =
        serde_html_form::from_str(req.query_string()).unwrap_or_default();
    let state = params.into_query_state();

    match search_service::load_search_page(repo.get_ref(), &user, state) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "search",
                &server_config.auth_service_url,
            );
            context.insert("listings", &data.listings);
            context.insert("total", &data.total);
            context.insert("search_query", &data.state.text);
            context.insert("categories", &data.state.categories);
            context.insert("conditions", &data.state.conditions);
            context.insert("sort", &data.state.sort);

            render_template(&tera, "search/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to load search page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
