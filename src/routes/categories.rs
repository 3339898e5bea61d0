use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, Responder, delete, get, post, put, web};

use crate::assembler::{LinkBuilder, paged_categories};
use crate::errors::ApiError;
use crate::forms::categories::{
    AddCategoryForm, AddCategoryPayload, DeleteCategoryQuery, ListCategoriesQuery,
    UpdateCategoryForm, UpdateCategoryPayload,
};
use crate::pagination::Pagination;
use crate::repository::DieselRepository;
use crate::services::categories as service;

use super::{RequestLinkBuilder, blocking, error_responder};

pub const CATEGORIES_ROUTE: &str = "categories";

fn failure(error: ApiError, req: &HttpRequest) -> HttpResponse {
    error_responder(req).respond(&error, req)
}

#[post("/categories")]
pub async fn create_category(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<AddCategoryForm>,
) -> impl Responder {
    let payload = match AddCategoryPayload::try_from(form) {
        Ok(payload) => payload,
        Err(e) => return failure(e.into(), &req),
    };

    let repo = repo.into_inner();
    match blocking(move || service::create_category(payload, repo.as_ref())).await {
        Ok(id) => {
            let location = RequestLinkBuilder::new(&req).category(&id.to_string());
            log::info!("Created category {id}");
            HttpResponse::Created()
                .insert_header((header::LOCATION, location))
                .finish()
        }
        Err(e) => failure(e, &req),
    }
}

#[get("/categories/{name}")]
pub async fn get_category(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    name: web::Path<String>,
) -> impl Responder {
    let name = name.into_inner();
    let repo = repo.into_inner();
    match blocking(move || service::get_category(&name, repo.as_ref())).await {
        Ok(category) => HttpResponse::Ok().json(category),
        Err(e) => failure(e, &req),
    }
}

#[put("/categories/{name}")]
pub async fn update_category(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    name: web::Path<String>,
    web::Json(form): web::Json<UpdateCategoryForm>,
) -> impl Responder {
    let payload = match UpdateCategoryPayload::try_from(form) {
        Ok(payload) => payload,
        Err(e) => return failure(e.into(), &req),
    };

    let name = name.into_inner();
    let repo = repo.into_inner();
    match blocking(move || service::update_category(&name, payload, repo.as_ref())).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => failure(e, &req),
    }
}

#[delete("/categories")]
pub async fn delete_category(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    query: web::Query<DeleteCategoryQuery>,
) -> impl Responder {
    let name = query.into_inner().name;
    let repo = repo.into_inner();
    match blocking(move || service::delete_category(&name, repo.as_ref())).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => failure(e, &req),
    }
}

#[get("/categories", name = "categories")]
pub async fn list_categories(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    query: web::Query<ListCategoriesQuery>,
) -> impl Responder {
    let pagination = match Pagination::try_from(query.into_inner()) {
        Ok(pagination) => pagination,
        Err(e) => return failure(e.into(), &req),
    };

    let repo = repo.into_inner();
    match blocking(move || service::list_categories(pagination, repo.as_ref())).await {
        Ok(page) => {
            HttpResponse::Ok().json(paged_categories(page, &RequestLinkBuilder::new(&req)))
        }
        Err(e) => failure(e, &req),
    }
}
