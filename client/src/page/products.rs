//! Products screen: searchable, category-filterable, paginated card
//! grid with a create/edit modal and a multi-image upload sub-flow.

use seed::{prelude::*, *};
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;

use shared::form::{FormModel, ProductDraft, SubmitCmd, UploadOutcome};
use shared::list::{ListMsg, ListState};
use shared::models::{Collection, Id, Product};
use shared::notify::Notification;

use crate::api;
use crate::listing;
use crate::resource::{Products, Resource};
use crate::session::SessionStore;
use crate::ui;

const FALLBACK_IMAGE: &str = "/images/noImg.webp";

// ------ ------
//     Model
// ------ ------

pub struct Model {
    list: ListState<Product>,
    collections: Vec<Collection>,
    form: FormModel<ProductDraft>,
    uploading: bool,
}

// ------ ------
//    Update
// ------ ------

#[derive(Clone)]
pub enum Msg {
    List(ListMsg<Product>),
    CollectionsFetched(Result<Vec<Collection>, String>),
    AddClicked,
    EditClicked(Product),
    DeleteConfirmed(Id),
    CloseModal,
    NameChanged(String),
    DescriptionChanged(String),
    PriceChanged(String),
    CategoryChanged(String),
    FilesSelected(Vec<web_sys::File>),
    UploadsFinished(UploadOutcome),
    RemoveImage(String),
    SubmitClicked,
    SubmitFinished {
        name: String,
        was_edit: bool,
        result: Result<(), String>,
    },
    Noop,
}

pub fn init(ctx: &SessionStore, orders: &mut impl Orders<Msg>) -> Model {
    let mut model = Model {
        list: ListState::new(Products::NOUN),
        collections: Vec::new(),
        form: FormModel::default(),
        uploading: false,
    };
    let cmds = model.list.update(ListMsg::RefreshRequested);
    listing::execute::<Products, _>(cmds, ctx.token(), orders, Msg::List);
    orders.perform_cmd(async {
        Msg::CollectionsFetched(
            api::collections_for_filter()
                .await
                .map_err(|error| error.to_string()),
        )
    });
    model
}

pub fn update(msg: Msg, model: &mut Model, ctx: &SessionStore, orders: &mut impl Orders<Msg>) {
    match msg {
        Msg::Noop => {
            orders.skip();
        }

        Msg::List(list_msg) => {
            let cmds = model.list.update(list_msg);
            listing::execute::<Products, _>(cmds, ctx.token(), orders, Msg::List);
        }

        Msg::CollectionsFetched(Ok(collections)) => model.collections = collections,
        Msg::CollectionsFetched(Err(text)) => {
            orders.notify(Notification::error("Error fetching collections", text));
        }

        Msg::AddClicked => model.form.open_create(),
        Msg::EditClicked(product) => model.form.open_edit(product.id, &product),

        Msg::DeleteConfirmed(id) => {
            let cmds = model.list.update(ListMsg::DeleteRequested(id));
            listing::execute::<Products, _>(cmds, ctx.token(), orders, Msg::List);
        }

        Msg::CloseModal => model.form.close(),

        Msg::NameChanged(value) => {
            if let Some(open) = model.form.open_mut() {
                open.draft.name = value;
            }
        }
        Msg::DescriptionChanged(value) => {
            if let Some(open) = model.form.open_mut() {
                open.draft.description = value;
            }
        }
        Msg::PriceChanged(value) => {
            if let Some(open) = model.form.open_mut() {
                open.draft.price = value;
            }
        }
        Msg::CategoryChanged(value) => {
            if let Some(open) = model.form.open_mut() {
                open.draft.category = value;
            }
        }

        Msg::FilesSelected(files) => {
            if files.is_empty() {
                orders.skip();
                return;
            }
            model.uploading = true;
            orders.perform_cmd(async move {
                let uploads = files.into_iter().map(|file| async move {
                    api::upload(file).await.map_err(|error| error.to_string())
                });
                let results = futures::future::join_all(uploads).await;
                // Best effort: failed files are logged and dropped.
                for failure in results.iter().filter_map(|result| result.as_ref().err()) {
                    error!("image upload failed:", failure);
                }
                Msg::UploadsFinished(UploadOutcome::collect(results))
            });
        }

        Msg::UploadsFinished(outcome) => {
            model.uploading = false;
            if let Some(open) = model.form.open_mut() {
                open.draft.merge_uploads(outcome);
            }
        }

        Msg::RemoveImage(url) => {
            if let Some(open) = model.form.open_mut() {
                open.draft.remove_image(&url);
            }
        }

        Msg::SubmitClicked => {
            if let Some(cmd) = model.form.submit() {
                let token = ctx.token();
                orders.perform_cmd(async move {
                    match cmd {
                        SubmitCmd::Create(payload) => Msg::SubmitFinished {
                            name: payload.name.clone(),
                            was_edit: false,
                            result: api::create::<Products>(&payload, token)
                                .await
                                .map_err(|error| error.to_string()),
                        },
                        SubmitCmd::Update(id, payload) => Msg::SubmitFinished {
                            name: payload.name.clone(),
                            was_edit: true,
                            result: api::update::<Products>(id, &payload, token)
                                .await
                                .map_err(|error| error.to_string()),
                        },
                    }
                });
            }
        }

        Msg::SubmitFinished {
            name,
            was_edit,
            result: Ok(()),
        } => {
            model.form.close();
            let verb = if was_edit { "updated" } else { "created" };
            orders.notify(Notification::success(
                format!("Product {}", verb),
                format!("Product \"{}\" was successfully {}.", name, verb),
            ));
            let cmds = model.list.update(ListMsg::RefreshRequested);
            listing::execute::<Products, _>(cmds, ctx.token(), orders, Msg::List);
        }

        Msg::SubmitFinished {
            result: Err(text), ..
        } => {
            model.form.submit_failed();
            orders.notify(Notification::error("Error", text));
        }
    }
}

// ------ ------
//     View
// ------ ------

pub fn view(model: &Model, logged_in: bool) -> Node<Msg> {
    div![
        div![
            attrs! {At::Class => "d-flex justify-content-between align-items-center px-3"},
            h5!["Products"],
            IF!(logged_in => button![
                attrs! {At::Class => "btn btn-sm btn-primary mt-2"},
                ev(Ev::Click, |_| Msg::AddClicked),
                "+ Add New"
            ]),
        ],
        input![
            attrs! {
                At::Class => "form-control mt-3 p-2",
                At::Type => "text",
                At::Placeholder => "Search Product Name",
                At::Value => model.list.query().search(),
            },
            input_ev(Ev::Input, |text| Msg::List(ListMsg::SearchChanged(text))),
        ],
        div![
            attrs! {At::Class => "d-flex justify-content-end align-items-center mt-2 px-3"},
            category_filter(model),
        ],
        div![
            attrs! {At::Class => "d-flex flex-wrap justify-content-center mt-2"},
            if model.list.is_loading() {
                ui::skeleton_cards(6)
            } else {
                model.list.rows().iter().map(|product| product_card(product, logged_in)).collect()
            },
        ],
        ui::pagination(
            model.list.query().page(),
            model.list.has_prev_page(),
            model.list.has_next_page(),
            |page| Msg::List(ListMsg::PageRequested(page)),
        ),
        form_modal(model),
        IF!(model.uploading || model.list.is_deleting() => ui::backdrop_spinner()),
    ]
}

fn category_filter(model: &Model) -> Node<Msg> {
    let current = model.list.query().category();
    select![
        attrs! {At::Class => "form-control w-50"},
        input_ev(Ev::Change, |value| Msg::List(ListMsg::CategoryChanged(value))),
        option![
            attrs! {At::Value => "", At::Selected => current.is_empty().as_at_value()},
            "All"
        ],
        model.collections.iter().map(|collection| {
            option![
                attrs! {
                    At::Value => collection.name,
                    At::Selected => (current == collection.name).as_at_value(),
                },
                &collection.name
            ]
        }),
    ]
}

fn product_card(product: &Product, logged_in: bool) -> Node<Msg> {
    let id = product.id;
    let image = product
        .images
        .first()
        .map(String::as_str)
        .unwrap_or(FALLBACK_IMAGE);
    div![
        attrs! {At::Class => "card shadow-sm rounded-3 m-2 border-0 p-2 text-center"},
        style! {St::Width => px(180), St::Height => px(200), St::Position => "relative"},
        IF!(logged_in => div![
            style! {
                St::Position => "absolute",
                St::Top => "0",
                St::Right => "0",
                St::ZIndex => "10",
            },
            button![
                attrs! {At::Class => "btn btn-sm"},
                {
                    let product = product.clone();
                    ev(Ev::Click, move |event| {
                        event.stop_propagation();
                        Msg::EditClicked(product)
                    })
                },
                "\u{270e}"
            ],
            button![
                attrs! {At::Class => "btn btn-sm text-danger"},
                ev(Ev::Click, move |event| {
                    event.stop_propagation();
                    if ui::confirm_destructive() {
                        Msg::DeleteConfirmed(id)
                    } else {
                        Msg::Noop
                    }
                }),
                "\u{1f5d1}"
            ],
        ]),
        a![
            attrs! {At::Href => format!("/productDetails?id={}", id)},
            style! {St::TextDecoration => "none", St::Color => "inherit"},
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
        ],
    ]
}

fn form_modal(model: &Model) -> Node<Msg> {
    let open = match model.form.open_ref() {
        Some(open) => open,
        None => return empty![],
    };
    let title = if open.editing.is_some() {
        "Update Product"
    } else {
        "Create Product"
    };
    let submit_label = if open.editing.is_some() {
        "Update Product"
    } else {
        "Save Product"
    };

    let body = nodes![
        div![
            attrs! {At::Class => "form-group mb-3"},
            label!["Name"],
            input![
                attrs! {At::Class => "form-control", At::Type => "text", At::Value => open.draft.name},
                input_ev(Ev::Input, Msg::NameChanged),
            ],
            ui::field_error(&open.errors, "productName"),
        ],
        div![
            attrs! {At::Class => "form-group mb-3"},
            label!["Description"],
            textarea![
                attrs! {At::Class => "form-control", At::Rows => 3, At::Value => open.draft.description},
                input_ev(Ev::Input, Msg::DescriptionChanged),
            ],
            ui::field_error(&open.errors, "productDescription"),
        ],
        div![
            attrs! {At::Class => "form-group mb-3"},
            label!["Price"],
            input![
                attrs! {At::Class => "form-control", At::Type => "number", At::Value => open.draft.price},
                input_ev(Ev::Input, Msg::PriceChanged),
            ],
            ui::field_error(&open.errors, "productPrice"),
        ],
        div![
            attrs! {At::Class => "form-group mb-3"},
            label!["Category"],
            select![
                attrs! {At::Class => "form-control"},
                input_ev(Ev::Change, Msg::CategoryChanged),
                option![
                    attrs! {At::Value => "", At::Selected => open.draft.category.is_empty().as_at_value()},
                    "Select category"
                ],
                model.collections.iter().map(|collection| {
                    option![
                        attrs! {
                            At::Value => collection.name,
                            At::Selected => (open.draft.category == collection.name).as_at_value(),
                        },
                        &collection.name
                    ]
                }),
            ],
            ui::field_error(&open.errors, "productCategory"),
        ],
        div![
            attrs! {At::Class => "form-group"},
            label!["Images"],
            input![
                attrs! {At::Class => "form-control", At::Type => "file", At::Multiple => AtValue::None},
                ev(Ev::Change, |event| {
                    let files = event
                        .target()
                        .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
                        .and_then(|input| input.files())
                        .map(|list| (0..list.length()).filter_map(|i| list.get(i)).collect())
                        .unwrap_or_default();
                    Msg::FilesSelected(files)
                }),
            ],
            ui::field_error(&open.errors, "productImages"),
            div![
                attrs! {At::Class => "d-flex flex-wrap mt-2"},
                open.draft.images.iter().map(|url| {
                    let url_to_remove = url.clone();
                    div![
                        style! {St::Position => "relative", St::MarginRight => px(10)},
                        img![
                            attrs! {At::Src => url},
                            style! {
                                St::Width => px(100),
                                St::Height => px(100),
                                St::ObjectFit => "cover",
                                St::BorderRadius => px(4),
                            },
                        ],
                        button![
                            attrs! {At::Class => "btn btn-sm btn-danger"},
                            style! {St::Position => "absolute", St::Top => px(-5), St::Right => px(-5)},
                            ev(Ev::Click, move |_| Msg::RemoveImage(url_to_remove)),
                            "\u{d7}"
                        ],
                    ]
                }),
            ],
        ],
    ];

    let footer = nodes![
        button![
            attrs! {At::Class => "btn btn-secondary"},
            ev(Ev::Click, |_| Msg::CloseModal),
            "Cancel"
        ],
        button![
            attrs! {At::Class => "btn btn-primary", At::Disabled => open.saving.as_at_value()},
            ev(Ev::Click, |_| Msg::SubmitClicked),
            submit_label
        ],
    ];

    ui::modal(title, Msg::CloseModal, body, footer)
}
