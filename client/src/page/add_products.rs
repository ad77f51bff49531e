//! Catalogue membership screen: pick products from the paginated,
//! searchable table and attach them to the catalogue in one request.

use seed::{prelude::*, *};

use shared::list::{ListMsg, ListState};
use shared::models::{Id, Product};
use shared::notify::Notification;

use crate::api;
use crate::listing;
use crate::resource::{Products, Resource};
use crate::session::SessionStore;
use crate::ui;

pub struct Model {
    catalogue_id: Id,
    list: ListState<Product>,
    selected: Vec<Id>,
    saving: bool,
}

#[derive(Clone)]
pub enum Msg {
    List(ListMsg<Product>),
    ToggleSelection(Id),
    SaveClicked,
    SaveFinished(Result<(), String>),
}

pub fn init(catalogue_id: Id, ctx: &SessionStore, orders: &mut impl Orders<Msg>) -> Model {
    let mut model = Model {
        catalogue_id,
        list: ListState::new(Products::NOUN),
        selected: Vec::new(),
        saving: false,
    };
    let cmds = model.list.update(ListMsg::RefreshRequested);
    listing::execute::<Products, _>(cmds, ctx.token(), orders, Msg::List);
    model
}

pub fn update(msg: Msg, model: &mut Model, ctx: &SessionStore, orders: &mut impl Orders<Msg>) {
    match msg {
        Msg::List(list_msg) => {
            let cmds = model.list.update(list_msg);
            listing::execute::<Products, _>(cmds, ctx.token(), orders, Msg::List);
        }

        Msg::ToggleSelection(id) => {
            if model.selected.contains(&id) {
                model.selected.retain(|selected| *selected != id);
            } else {
                model.selected.push(id);
            }
        }

        Msg::SaveClicked => {
            if model.selected.is_empty() {
                orders.notify(Notification::warning(
                    "Validation",
                    "Please select at least one product.",
                ));
                return;
            }
            model.saving = true;
            let id = model.catalogue_id;
            let product_ids = model.selected.clone();
            let token = ctx.token();
            orders.perform_cmd(async move {
                Msg::SaveFinished(
                    api::add_products_to_catalogue(id, product_ids, token)
                        .await
                        .map_err(|error| error.to_string()),
                )
            });
        }

        Msg::SaveFinished(Ok(())) => {
            model.saving = false;
            model.selected.clear();
            orders.notify(Notification::success(
                "Success",
                "Products added to catalogue successfully!",
            ));
            let cmds = model.list.update(ListMsg::RefreshRequested);
            listing::execute::<Products, _>(cmds, ctx.token(), orders, Msg::List);
        }

        Msg::SaveFinished(Err(text)) => {
            model.saving = false;
            orders.notify(Notification::error("Error saving products", text));
        }
    }
}

pub fn view(model: &Model) -> Node<Msg> {
    div![
        attrs! {At::Class => "container"},
        a![
            attrs! {
                At::Class => "btn btn-sm btn-primary mb-2",
                At::Href => format!("/viewCatalogue?id={}", model.catalogue_id),
            },
            "View Catalogue"
        ],
        h3!["Add Products to Catalogue"],
        input![
            attrs! {
                At::Class => "form-control my-3",
                At::Type => "text",
                At::Placeholder => "Search products by name",
                At::Value => model.list.query().search(),
            },
            input_ev(Ev::Input, |text| Msg::List(ListMsg::SearchChanged(text))),
        ],
        if model.list.is_loading() {
            ui::skeleton_table(4, 5)
        } else {
            products_table(model)
        },
        div![
            attrs! {At::Class => "d-flex justify-content-between align-items-center"},
            button![
                attrs! {
                    At::Class => "btn btn-primary",
                    At::Disabled => (model.selected.is_empty() || model.saving).as_at_value(),
                },
                ev(Ev::Click, |_| Msg::SaveClicked),
                "Save Selected Products"
            ],
            ui::pagination(
                model.list.query().page(),
                model.list.has_prev_page(),
                model.list.has_next_page(),
                |page| Msg::List(ListMsg::PageRequested(page)),
            ),
        ],
        IF!(model.saving => ui::backdrop_spinner()),
    ]
}

fn products_table(model: &Model) -> Node<Msg> {
    table![
        attrs! {At::Class => "table table-striped table-bordered table-hover"},
        thead![tr![
            th!["Select"],
            th!["Product Name"],
            th!["Category"],
            th!["Price"],
        ]],
        tbody![if model.list.rows().is_empty() {
            vec![tr![td![attrs! {At::ColSpan => 4}, "No products found."]]]
        } else {
            model
                .list
                .rows()
                .iter()
                .map(|product| {
                    let id = product.id;
                    tr![
                        td![input![
                            attrs! {
                                At::Type => "checkbox",
                                At::Checked => model.selected.contains(&id).as_at_value(),
                            },
                            ev(Ev::Change, move |_| Msg::ToggleSelection(id)),
                        ]],
                        td![&product.name],
                        td![&product.category],
                        td![product.price.to_string()],
                    ]
                })
                .collect()
        }],
    ]
}
