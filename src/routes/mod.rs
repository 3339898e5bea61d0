//! HTTP surface of the service mounted under `/api/v1`.

use actix_web::error::{InternalError, JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, web};

use crate::assembler::LinkBuilder;
use crate::errors::{ApiError, ErrorResponder};
use crate::services::ServiceResult;

pub mod categories;

/// Prefix shared by every API route.
pub const API_PREFIX: &str = "/api/v1";

/// Register the API routes together with extractor configuration that renders
/// body and parameter failures in the common error shape.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(
            web::scope(API_PREFIX)
                .service(categories::create_category)
                .service(categories::list_categories)
                .service(categories::delete_category)
                .service(categories::get_category)
                .service(categories::update_category)
                .default_service(web::to(route_not_found)),
        )
        .default_service(web::to(route_not_found));
}

/// Fallback for requests no route accepts, by path or by method.
async fn route_not_found(req: HttpRequest) -> HttpResponse {
    let error = ApiError::RouteNotFound {
        method: req.method().to_string(),
        path: req.path().to_string(),
    };
    error_responder(&req).respond(&error, &req)
}

/// The responder registered with the application, or the built-in one.
pub(crate) fn error_responder(req: &HttpRequest) -> ErrorResponder {
    req.app_data::<web::Data<ErrorResponder>>()
        .map(|responder| responder.get_ref().clone())
        .unwrap_or_default()
}

fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    let response =
        error_responder(req).respond(&ApiError::MalformedRequestBody(err.to_string()), req);
    InternalError::from_response(err, response).into()
}

fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    let response =
        error_responder(req).respond(&ApiError::InvalidRequestParameters(err.to_string()), req);
    InternalError::from_response(err, response).into()
}

fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
    let response =
        error_responder(req).respond(&ApiError::InvalidRequestParameters(err.to_string()), req);
    InternalError::from_response(err, response).into()
}

/// Run a synchronous service call on the blocking thread pool.
pub(crate) async fn blocking<F, T>(call: F) -> Result<T, ApiError>
where
    F: FnOnce() -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
{
    match web::block(call).await {
        Ok(result) => result.map_err(ApiError::from),
        Err(e) => Err(ApiError::UnmappedInternal(e.to_string())),
    }
}

/// Absolute links resolved against the named routes of the current request.
///
/// Category names are appended as single path segments, so reserved
/// characters such as `/`, `?` and `%` are percent-encoded.
pub struct RequestLinkBuilder<'a> {
    req: &'a HttpRequest,
}

impl<'a> RequestLinkBuilder<'a> {
    pub fn new(req: &'a HttpRequest) -> Self {
        Self { req }
    }

    /// Resolve `route`, then append `segment` as one percent-encoded path
    /// segment and `query` as form-encoded pairs.
    fn link(&self, route: &str, segment: Option<&str>, query: &[(&str, String)]) -> String {
        let mut url = match self.req.url_for_static(route) {
            Ok(url) => url,
            Err(e) => {
                log::error!("Failed to build link to route '{route}': {e}");
                return String::new();
            }
        };
        if let Some(segment) = segment {
            match url.path_segments_mut() {
                Ok(mut segments) => {
                    segments.pop_if_empty().push(segment);
                }
                Err(()) => {
                    log::error!("Route '{route}' resolved to a URL without a path");
                    return String::new();
                }
            }
        }
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(key, value)| (*key, value.as_str())));
        }
        url.to_string()
    }
}

impl LinkBuilder for RequestLinkBuilder<'_> {
    fn category(&self, name: &str) -> String {
        self.link(categories::CATEGORIES_ROUTE, Some(name), &[])
    }

    fn update_category(&self, name: &str) -> String {
        self.link(categories::CATEGORIES_ROUTE, Some(name), &[])
    }

    fn delete_category(&self, name: &str) -> String {
        self.link(
            categories::CATEGORIES_ROUTE,
            None,
            &[("name", name.to_string())],
        )
    }

    fn categories_page(&self, page: usize, size: usize) -> String {
        self.link(
            categories::CATEGORIES_ROUTE,
            None,
            &[("page", page.to_string()), ("size", size.to_string())],
        )
    }
}
