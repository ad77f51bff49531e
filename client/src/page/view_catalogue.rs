//! Public catalogue browsing: products grouped by collection name, with
//! a live name search and per-group expand/collapse.

use std::collections::BTreeSet;

use seed::{prelude::*, *};

use shared::list::{ListCmd, ListMsg, ListState, Page};
use shared::models::{Id, Product, ProductGroup};

use crate::api;
use crate::ui;

const FALLBACK_IMAGE: &str = "/images/noImg.webp";
const COLLAPSED_PREVIEW: usize = 2;

pub struct Model {
    catalogue_id: Id,
    list: ListState<ProductGroup>,
    open_groups: BTreeSet<String>,
}

#[derive(Clone)]
pub enum Msg {
    List(ListMsg<ProductGroup>),
    ToggleGroup(String),
}

pub fn init(catalogue_id: Id, orders: &mut impl Orders<Msg>) -> Model {
    let mut model = Model {
        catalogue_id,
        list: ListState::new("catalogue product"),
        open_groups: BTreeSet::new(),
    };
    let cmds = model.list.update(ListMsg::RefreshRequested);
    execute(cmds, catalogue_id, orders);
    model
}

pub fn update(msg: Msg, model: &mut Model, orders: &mut impl Orders<Msg>) {
    match msg {
        Msg::List(list_msg) => {
            let cmds = model.list.update(list_msg);
            execute(cmds, model.catalogue_id, orders);
        }

        Msg::ToggleGroup(name) => {
            if !model.open_groups.remove(&name) {
                model.open_groups.insert(name);
            }
        }
    }
}

/// The grouped endpoint takes the catalogue id and a name filter, so
/// this screen executes the controller's fetch commands itself instead
/// of going through the generic resource listing.
fn execute(cmds: Vec<ListCmd>, catalogue_id: Id, orders: &mut impl Orders<Msg>) {
    for cmd in cmds {
        match cmd {
            ListCmd::Fetch(ticket, params) => {
                orders.perform_cmd(async move {
                    let result = api::catalogue_products(catalogue_id, &params.search)
                        .await
                        .map(|groups| Page {
                            total: groups.len() as u64,
                            rows: groups,
                        })
                        .map_err(|error| error.to_string());
                    Msg::List(ListMsg::FetchArrived(ticket, result))
                });
            }
            ListCmd::Notify(notification) => {
                orders.notify(notification);
            }
            ListCmd::Delete(_) => {}
        }
    }
}

pub fn view(model: &Model) -> Node<Msg> {
    div![
        attrs! {At::Class => "container py-4"},
        input![
            attrs! {
                At::Class => "form-control mb-4",
                At::Type => "text",
                At::Placeholder => "Search product by name...",
                At::Value => model.list.query().search(),
            },
            input_ev(Ev::Input, |text| Msg::List(ListMsg::SearchChanged(text))),
        ],
        if model.list.is_loading() {
            div![
                attrs! {At::Class => "d-flex flex-wrap justify-content-center"},
                ui::skeleton_cards(6),
            ]
        } else if model.list.rows().is_empty() {
            p!["No products found in this catalogue."]
        } else {
            div![model.list.rows().iter().map(|group| group_view(model, group))]
        },
    ]
}

fn group_view(model: &Model, group: &ProductGroup) -> Node<Msg> {
    let expanded = model.open_groups.contains(&group.name);
    let visible: Vec<&Product> = if expanded {
        group.products.iter().collect()
    } else {
        group.products.iter().take(COLLAPSED_PREVIEW).collect()
    };
    div![
        attrs! {At::Class => "mb-5"},
        h4![&group.name],
        div![
            attrs! {At::Class => "d-flex flex-wrap"},
            visible.into_iter().map(|product| product_card(product)),
        ],
        IF!(group.products.len() > COLLAPSED_PREVIEW => div![
            attrs! {At::Class => "text-center mt-2"},
            button![
                attrs! {At::Class => "btn btn-link"},
                {
                    let name = group.name.clone();
                    ev(Ev::Click, move |_| Msg::ToggleGroup(name))
                },
                if expanded { "Show Less" } else { "Show More" }
            ],
        ]),
    ]
}

fn product_card(product: &Product) -> Node<Msg> {
    let image = product
        .images
        .first()
        .map(String::as_str)
        .unwrap_or(FALLBACK_IMAGE);
    a![
        attrs! {
            At::Class => "card shadow-sm rounded-3 m-2 border-0 p-2 text-center",
            At::Href => format!("/productDetails?id={}", product.id),
        },
        style! {
            St::Width => px(180),
            St::Height => px(200),
            St::TextDecoration => "none",
            St::Color => "inherit",
        },
        img![
            attrs! {At::Src => image},
            style! {St::Height => px(120), St::Width => percent(90), St::ObjectFit => "contain"},
        ],
        h6![
            attrs! {At::Class => "text-truncate"},
            style! {St::FontWeight => "lighter"},
            &product.name
        ],
        h6![format!("Rs: {}", product.price)],
    ]
}
