//! Resource client: one thin typed wrapper per backend operation.
//!
//! Every call is a single request/response pair with no retry and no
//! caching. The bearer token is attached whenever the session holds one;
//! protected endpoints reject tokenless calls and that failure surfaces
//! like any other request error. Non-2xx responses are mapped to the
//! server's `{"error": …}` message when one can be parsed.

use seed::browser::fetch::{FetchError, Header, Method, Request, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared::list::Page;
use shared::models::{Collection, Id, LoginRequest, LoginResponse, Product, ProductGroup};
use shared::query::ListParams;

use crate::resource::Resource;

/// Endpoint configuration. Paths are spelled exactly as the backend
/// exposes them (including "catalouges"). The base URL defaults to the
/// serving origin and can be overridden at compile time.
pub mod endpoint {
    pub const BASE_URL: &str = match option_env!("API_BASE_URL") {
        Some(base) => base,
        None => "",
    };

    pub const LOGIN: &str = "/api/auth/login";
    pub const LOGOUT: &str = "/api/auth/logout";

    pub const PRODUCTS: &str = "/api/products/products";
    pub const PRODUCT_BY_ID: &str = "/api/products/productsById";
    pub const CREATE_PRODUCT: &str = "/api/products/createProduct";
    pub const UPDATE_PRODUCT: &str = "/api/products/updateProduct";
    pub const DELETE_PRODUCT: &str = "/api/products/deleteProduct";
    pub const PRODUCT_COLLECTIONS: &str = "/api/products/collections";

    pub const COLLECTIONS: &str = "/api/collections/collections";
    pub const CREATE_COLLECTION: &str = "/api/collections/createCollections";
    pub const UPDATE_COLLECTION: &str = "/api/collections/updateCollection";
    pub const DELETE_COLLECTION: &str = "/api/collections/deleteCollection";

    pub const CATALOGUES: &str = "/api/catalouges/catalouges";
    pub const CREATE_CATALOGUE: &str = "/api/catalouges/createCatalouge";
    pub const UPDATE_CATALOGUE: &str = "/api/catalouges/updateCatalouge";
    pub const DELETE_CATALOGUE: &str = "/api/catalouges/deleteCatalouge";
    pub const CATALOGUE_PRODUCTS: &str = "/api/catalouges/getProductsUnderCatalouge";
    pub const ADD_PRODUCTS_TO_CATALOGUE: &str = "/api/catalouges/addProductToCatalouge";

    pub const UPLOAD: &str = "/upload";
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Message taken from the server's error body.
    #[error("{0}")]
    Server(String),
    #[error("request failed with status {0}")]
    Status(u16),
    #[error("network request failed")]
    Fetch(FetchError),
    #[error("browser error: {0}")]
    Browser(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Serialize)]
struct IdBody {
    id: Id,
}

#[derive(Serialize)]
struct WithId<'a, P: Serialize> {
    id: Id,
    #[serde(flatten)]
    payload: &'a P,
}

#[derive(Serialize)]
struct TokenBody {
    token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddProductsBody {
    id: Id,
    product_ids: Vec<Id>,
}

#[derive(Deserialize)]
struct UploadResponse {
    url: String,
}

fn url(path: &str) -> String {
    format!("{}{}", endpoint::BASE_URL, path)
}

fn encode(value: &str) -> String {
    js_sys::encode_uri_component(value).into()
}

fn authorized(request: Request<'static>, token: &Option<String>) -> Request<'static> {
    match token {
        Some(token) => request.header(Header::bearer(token.clone())),
        None => request,
    }
}

/// Maps non-2xx responses to the server message when one is present.
async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_ok() {
        return Ok(response);
    }
    if let Ok(body) = response.json::<ErrorBody>().await {
        return Err(ApiError::Server(body.error));
    }
    Err(ApiError::Status(status.code))
}

pub async fn list<R: Resource>(
    params: Option<ListParams>,
    token: Option<String>,
) -> Result<Page<R::Record>> {
    let url = match &params {
        Some(p) => format!(
            "{}?category={}&limit={}&offset={}&name={}",
            url(R::LIST_PATH),
            encode(&p.category),
            p.limit,
            p.offset,
            encode(&p.search),
        ),
        None => url(R::LIST_PATH),
    };
    let response = authorized(Request::new(url), &token)
        .fetch()
        .await
        .map_err(ApiError::Fetch)?;
    // Total count travels in a response header next to the JSON rows.
    let header_total = response
        .raw_response()
        .headers()
        .get("x-total-count")
        .ok()
        .flatten()
        .and_then(|value| value.parse::<u64>().ok());
    let response = check(response).await?;
    let rows: Vec<R::Record> = response.json().await.map_err(ApiError::Fetch)?;
    let total = header_total
        .unwrap_or_else(|| params.map(|p| p.offset).unwrap_or(0) + rows.len() as u64);
    Ok(Page { rows, total })
}

pub async fn create<R: Resource>(payload: &R::Payload, token: Option<String>) -> Result<()> {
    let request = Request::new(url(R::CREATE_PATH))
        .method(Method::Post)
        .json(payload)
        .map_err(ApiError::Fetch)?;
    let response = authorized(request, &token)
        .fetch()
        .await
        .map_err(ApiError::Fetch)?;
    check(response).await?;
    Ok(())
}

pub async fn update<R: Resource>(
    id: Id,
    payload: &R::Payload,
    token: Option<String>,
) -> Result<()> {
    let request = Request::new(url(R::UPDATE_PATH))
        .method(R::UPDATE_METHOD)
        .json(&WithId { id, payload })
        .map_err(ApiError::Fetch)?;
    let response = authorized(request, &token)
        .fetch()
        .await
        .map_err(ApiError::Fetch)?;
    check(response).await?;
    Ok(())
}

pub async fn delete<R: Resource>(id: Id, token: Option<String>) -> Result<()> {
    let request = Request::new(url(R::DELETE_PATH))
        .method(Method::Post)
        .json(&IdBody { id })
        .map_err(ApiError::Fetch)?;
    let response = authorized(request, &token)
        .fetch()
        .await
        .map_err(ApiError::Fetch)?;
    check(response).await?;
    Ok(())
}

pub async fn product_by_id(id: Id) -> Result<Product> {
    let response = Request::new(format!("{}?id={}", url(endpoint::PRODUCT_BY_ID), id))
        .fetch()
        .await
        .map_err(ApiError::Fetch)?;
    check(response).await?.json().await.map_err(ApiError::Fetch)
}

/// Collection list used as the category value-set, independent of any
/// pagination state.
pub async fn collections_for_filter() -> Result<Vec<Collection>> {
    let response = Request::new(url(endpoint::PRODUCT_COLLECTIONS))
        .fetch()
        .await
        .map_err(ApiError::Fetch)?;
    check(response).await?.json().await.map_err(ApiError::Fetch)
}

pub async fn catalogue_products(catalogue_id: Id, name: &str) -> Result<Vec<ProductGroup>> {
    let response = Request::new(format!(
        "{}?catalogueId={}&name={}",
        url(endpoint::CATALOGUE_PRODUCTS),
        catalogue_id,
        encode(name),
    ))
    .fetch()
    .await
    .map_err(ApiError::Fetch)?;
    check(response).await?.json().await.map_err(ApiError::Fetch)
}

pub async fn add_products_to_catalogue(
    id: Id,
    product_ids: Vec<Id>,
    token: Option<String>,
) -> Result<()> {
    let request = Request::new(url(endpoint::ADD_PRODUCTS_TO_CATALOGUE))
        .method(Method::Post)
        .json(&AddProductsBody { id, product_ids })
        .map_err(ApiError::Fetch)?;
    let response = authorized(request, &token)
        .fetch()
        .await
        .map_err(ApiError::Fetch)?;
    check(response).await?;
    Ok(())
}

/// Uploads one file and resolves to its public URL.
pub async fn upload(file: web_sys::File) -> Result<String> {
    let form_data =
        web_sys::FormData::new().map_err(|error| ApiError::Browser(format!("{:?}", error)))?;
    form_data
        .append_with_blob("file", &file)
        .map_err(|error| ApiError::Browser(format!("{:?}", error)))?;
    let response = Request::new(url(endpoint::UPLOAD))
        .method(Method::Post)
        .body(form_data.into())
        .fetch()
        .await
        .map_err(ApiError::Fetch)?;
    let body: UploadResponse = check(response).await?.json().await.map_err(ApiError::Fetch)?;
    Ok(body.url)
}

pub async fn login(email: String, password: String) -> Result<LoginResponse> {
    let request = Request::new(url(endpoint::LOGIN))
        .method(Method::Post)
        .json(&LoginRequest { email, password })
        .map_err(ApiError::Fetch)?;
    let response = request.fetch().await.map_err(ApiError::Fetch)?;
    check(response).await?.json().await.map_err(ApiError::Fetch)
}

pub async fn logout(token: String) -> Result<()> {
    let request = Request::new(url(endpoint::LOGOUT))
        .method(Method::Post)
        .json(&TokenBody { token })
        .map_err(ApiError::Fetch)?;
    check(request.fetch().await.map_err(ApiError::Fetch)?).await?;
    Ok(())
}
