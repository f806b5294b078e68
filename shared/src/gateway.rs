//! Fetch gateway: builds listing/detail requests and turns shell responses
//! into typed payloads or an [`AppError`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::capabilities::{HttpError, HttpRequest, HttpResult};
use crate::config::ApiConfig;
use crate::model::{AttractionDetail, Criteria, DataEnvelope, PageResponse};
use crate::{
    AppError, AppResult, ATTRACTIONS_PATH, ATTRACTION_PATH, CATEGORIES_PATH, FIRST_PAGE, MRTS_PATH,
};

/// Parameters of a single listing page request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: u32,
    pub category: Option<String>,
    pub keyword: Option<String>,
}

impl PageQuery {
    pub fn new(page: u32, criteria: &Criteria) -> Self {
        Self {
            page,
            category: criteria.category.clone(),
            keyword: criteria.keyword.clone(),
        }
    }

    pub fn is_first_page(&self) -> bool {
        self.page == FIRST_PAGE
    }

    /// `page` is always present; empty filters are omitted instead of being
    /// sent as empty parameters.
    pub fn query_string(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("page", &self.page.to_string());
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            query.append_pair("category", category);
        }
        if let Some(keyword) = self.keyword.as_deref().filter(|k| !k.is_empty()) {
            query.append_pair("keyword", keyword);
        }
        query.finish()
    }
}

pub fn page_request(api: &ApiConfig, query: &PageQuery) -> AppResult<HttpRequest> {
    let url = format!("{}?{}", api.url(ATTRACTIONS_PATH), query.query_string());
    build_get(api, url)
}

pub fn categories_request(api: &ApiConfig) -> AppResult<HttpRequest> {
    build_get(api, api.url(CATEGORIES_PATH))
}

pub fn mrts_request(api: &ApiConfig) -> AppResult<HttpRequest> {
    build_get(api, api.url(MRTS_PATH))
}

pub fn attraction_request(api: &ApiConfig, id: u64) -> AppResult<HttpRequest> {
    build_get(api, format!("{}/{id}", api.url(ATTRACTION_PATH)))
}

fn build_get(api: &ApiConfig, url: String) -> AppResult<HttpRequest> {
    HttpRequest::get(url)
        .and_then(|request| request.with_timeout_ms(api.timeout_ms))
        .map_err(|e| AppError::transport("Request failed").with_internal(e.to_string()))
}

pub fn decode_page(result: HttpResult) -> AppResult<PageResponse> {
    decode_json(result)
}

pub fn decode_labels(result: HttpResult) -> AppResult<Vec<String>> {
    let envelope: DataEnvelope<Vec<String>> = decode_json(result)?;
    Ok(envelope.data)
}

pub fn decode_attraction(result: HttpResult) -> AppResult<AttractionDetail> {
    let envelope: DataEnvelope<AttractionDetail> = decode_json(result)?;
    Ok(envelope.data)
}

fn decode_json<T: DeserializeOwned>(result: HttpResult) -> AppResult<T> {
    let response = result.map_err(|e| transport_error(&e))?;

    if !response.is_success() {
        return Err(AppError::from_http_status(
            response.status(),
            Some(response.body()),
        ));
    }

    serde_json::from_slice(response.body()).map_err(|e| {
        AppError::decode("Unexpected response payload")
            .with_internal(format!(
                "request {} ({}): {e}",
                response.request_id(),
                response.header("content-type").unwrap_or("no content type")
            ))
    })
}

fn transport_error(error: &HttpError) -> AppError {
    let message = match error {
        HttpError::Timeout { .. } => "Request timed out",
        HttpError::Connection { .. } => "Network error",
        HttpError::InvalidUrl { .. }
        | HttpError::InvalidHeader { .. }
        | HttpError::InvalidRequest { .. } => "Request failed",
    };
    AppError::transport(message).with_internal(error.to_string())
}
