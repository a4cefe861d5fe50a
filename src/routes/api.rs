use actix_web::{HttpRequest, HttpResponse, Responder, get, web};
use log::error;

use crate::dto::search::{SearchParams, SearchResponse, SuggestParams};
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::services::{ServiceError, search as search_service};

#[get("/v1/suggestions")]
pub async fn api_v1_suggestions(
    params: web::Query<SuggestParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match search_service::suggest_titles(repo.get_ref(), &user, &params.q) {
        Ok(suggestions) => HttpResponse::Ok().json(suggestions),
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(e) => {
            error!("Failed to fetch suggestions: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/v1/search")]
pub async fn api_v1_search(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let params: SearchParams =
        serde_html_form::from_str(req.query_string()).unwrap_or_default();
    let state = params.into_query_state();

    match search_service::load_search_page(repo.get_ref(), &user, state) {
        Ok(data) => HttpResponse::Ok().json(SearchResponse {
            total: data.total,
            rows: data.listings.items,
        }),
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(e) => {
            error!("Failed to search listings: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
