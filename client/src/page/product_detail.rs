//! Public product detail view with a thumbnail gallery.

use seed::{prelude::*, *};

use shared::models::{Id, Product};
use shared::notify::Notification;

use crate::api;

const FALLBACK_IMAGE: &str = "/images/noImg.webp";

pub struct Model {
    product: Option<Product>,
    loading: bool,
    active_image: usize,
}

#[derive(Clone)]
pub enum Msg {
    Fetched(Result<Product, String>),
    SelectImage(usize),
}

pub fn init(id: Id, orders: &mut impl Orders<Msg>) -> Model {
    orders.perform_cmd(async move {
        Msg::Fetched(
            api::product_by_id(id)
                .await
                .map_err(|error| error.to_string()),
        )
    });
    Model {
        product: None,
        loading: true,
        active_image: 0,
    }
}

pub fn update(msg: Msg, model: &mut Model, orders: &mut impl Orders<Msg>) {
    match msg {
        Msg::Fetched(result) => {
            model.loading = false;
            match result {
                Ok(product) => model.product = Some(product),
                Err(text) => {
                    orders.notify(Notification::error("Error fetching product", text));
                }
            }
        }

        Msg::SelectImage(index) => {
            model.active_image = index;
        }
    }
}

pub fn view(model: &Model) -> Node<Msg> {
    div![
        attrs! {At::Class => "container py-5"},
        if model.loading {
            skeleton()
        } else {
            match &model.product {
                Some(product) => detail(product, model.active_image),
                None => p!["Product not found."],
            }
        },
    ]
}

fn skeleton() -> Node<Msg> {
    div![
        attrs! {At::Class => "row placeholder-glow"},
        div![
            attrs! {At::Class => "col-md-6"},
            div![
                attrs! {At::Class => "placeholder rounded w-100"},
                style! {St::Height => px(360)},
            ],
        ],
        div![
            attrs! {At::Class => "col-md-6"},
            span![attrs! {At::Class => "placeholder col-8 mb-3"}],
            span![attrs! {At::Class => "placeholder col-4 mb-3"}],
            span![attrs! {At::Class => "placeholder col-12"}],
            span![attrs! {At::Class => "placeholder col-10"}],
        ],
    ]
}

fn detail(product: &Product, active_image: usize) -> Node<Msg> {
    let main_image = product
        .images
        .get(active_image)
        .or_else(|| product.images.first())
        .map(String::as_str)
        .unwrap_or(FALLBACK_IMAGE);
    div![
        attrs! {At::Class => "row"},
        div![
            attrs! {At::Class => "col-md-6"},
            img![
                attrs! {At::Src => main_image, At::Class => "rounded w-100"},
                style! {St::Height => px(360), St::ObjectFit => "contain"},
            ],
            div![
                attrs! {At::Class => "d-flex mt-3"},
                product.images.iter().enumerate().map(|(index, image)| {
                    let selected = index == active_image;
                    img![
                        attrs! {
                            At::Src => image,
                            At::Class => if selected {
                                "rounded me-2 border border-primary border-2"
                            } else {
                                "rounded me-2 border"
                            },
                        },
                        style! {
                            St::Width => px(64),
                            St::Height => px(64),
                            St::ObjectFit => "cover",
                            St::Cursor => "pointer",
                        },
                        ev(Ev::Click, move |_| Msg::SelectImage(index)),
                    ]
                }),
            ],
        ],
        div![
            attrs! {At::Class => "col-md-6"},
            h2![&product.name],
            h5![
                attrs! {At::Class => "text-muted"},
                &product.category
            ],
            h4![format!("Rs: {}", product.price)],
            p![
                attrs! {At::Class => "mt-3"},
                &product.description
            ],
        ],
    ]
}
