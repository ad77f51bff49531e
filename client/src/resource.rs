//! Resource descriptors: the per-kind facts the generic list and form
//! plumbing is parameterized over, so the screens share one controller
//! instead of copy-pasting it per resource.

use seed::browser::fetch::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use shared::models::{Catalogue, Collection, NamePayload, Product, ProductPayload};

use crate::api::endpoint;

pub trait Resource: 'static {
    type Record: DeserializeOwned + Clone + 'static;
    type Payload: Serialize;

    /// Singular name used in notification texts.
    const NOUN: &'static str;

    const LIST_PATH: &'static str;
    const CREATE_PATH: &'static str;
    const UPDATE_PATH: &'static str;
    const DELETE_PATH: &'static str;
    const UPDATE_METHOD: Method = Method::Post;

    /// Whether the list endpoint understands search/category/pagination
    /// parameters. Collections and catalogues are fetched whole.
    const PAGINATED: bool;
}

pub struct Products;

impl Resource for Products {
    type Record = Product;
    type Payload = ProductPayload;

    const NOUN: &'static str = "product";
    const LIST_PATH: &'static str = endpoint::PRODUCTS;
    const CREATE_PATH: &'static str = endpoint::CREATE_PRODUCT;
    const UPDATE_PATH: &'static str = endpoint::UPDATE_PRODUCT;
    const DELETE_PATH: &'static str = endpoint::DELETE_PRODUCT;
    const PAGINATED: bool = true;
}

pub struct Collections;

impl Resource for Collections {
    type Record = Collection;
    type Payload = NamePayload;

    const NOUN: &'static str = "collection";
    const LIST_PATH: &'static str = endpoint::COLLECTIONS;
    const CREATE_PATH: &'static str = endpoint::CREATE_COLLECTION;
    const UPDATE_PATH: &'static str = endpoint::UPDATE_COLLECTION;
    const DELETE_PATH: &'static str = endpoint::DELETE_COLLECTION;
    const UPDATE_METHOD: Method = Method::Put;
    const PAGINATED: bool = false;
}

pub struct Catalogues;

impl Resource for Catalogues {
    type Record = Catalogue;
    type Payload = NamePayload;

    const NOUN: &'static str = "catalogue";
    const LIST_PATH: &'static str = endpoint::CATALOGUES;
    const CREATE_PATH: &'static str = endpoint::CREATE_CATALOGUE;
    const UPDATE_PATH: &'static str = endpoint::UPDATE_CATALOGUE;
    const DELETE_PATH: &'static str = endpoint::DELETE_CATALOGUE;
    const UPDATE_METHOD: Method = Method::Put;
    const PAGINATED: bool = false;
}
