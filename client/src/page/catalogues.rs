//! Catalogues screen: table list with a name-only modal, plus per-row
//! actions to manage catalogue membership and copy a shareable
//! public-view link.

use seed::{prelude::*, *};

use shared::form::{CatalogueDraft, FormModel, SubmitCmd};
use shared::list::{ListMsg, ListState};
use shared::models::{Catalogue, Id};
use shared::notify::Notification;

use crate::api;
use crate::listing;
use crate::resource::{Catalogues, Resource};
use crate::session::SessionStore;
use crate::ui;

pub struct Model {
    list: ListState<Catalogue>,
    form: FormModel<CatalogueDraft>,
}

#[derive(Clone)]
pub enum Msg {
    List(ListMsg<Catalogue>),
    AddClicked,
    EditClicked(Catalogue),
    DeleteConfirmed(Id),
    CopyShareLink(Id),
    CloseModal,
    NameChanged(String),
    SubmitClicked,
    SubmitFinished {
        was_edit: bool,
        result: Result<(), String>,
    },
    Noop,
}

pub fn init(ctx: &SessionStore, orders: &mut impl Orders<Msg>) -> Model {
    let mut model = Model {
        list: ListState::new(Catalogues::NOUN),
        form: FormModel::default(),
    };
    let cmds = model.list.update(ListMsg::RefreshRequested);
    listing::execute::<Catalogues, _>(cmds, ctx.token(), orders, Msg::List);
    model
}

pub fn update(msg: Msg, model: &mut Model, ctx: &SessionStore, orders: &mut impl Orders<Msg>) {
    match msg {
        Msg::Noop => {
            orders.skip();
        }

        Msg::List(list_msg) => {
            let cmds = model.list.update(list_msg);
            listing::execute::<Catalogues, _>(cmds, ctx.token(), orders, Msg::List);
        }

        Msg::AddClicked => model.form.open_create(),
        Msg::EditClicked(catalogue) => model.form.open_edit(catalogue.id, &catalogue),

        Msg::DeleteConfirmed(id) => {
            let cmds = model.list.update(ListMsg::DeleteRequested(id));
            listing::execute::<Catalogues, _>(cmds, ctx.token(), orders, Msg::List);
        }

        Msg::CopyShareLink(id) => {
            let origin = window().location().origin().unwrap_or_default();
            let link = format!("{}/viewCatalogue?id={}", origin, id);
            match ui::copy_to_clipboard(&link) {
                Ok(()) => {
                    orders.notify(Notification::success("Copied!", link));
                }
                Err(_) => {
                    orders.notify(Notification::error("Error", "Failed to copy link."));
                }
            }
        }

        Msg::CloseModal => model.form.close(),

        Msg::NameChanged(value) => {
            if let Some(open) = model.form.open_mut() {
                open.draft.name = value;
            }
        }

        Msg::SubmitClicked => {
            if let Some(cmd) = model.form.submit() {
                let token = ctx.token();
                orders.perform_cmd(async move {
                    match cmd {
                        SubmitCmd::Create(payload) => Msg::SubmitFinished {
                            was_edit: false,
                            result: api::create::<Catalogues>(&payload, token)
                                .await
                                .map_err(|error| error.to_string()),
                        },
                        SubmitCmd::Update(id, payload) => Msg::SubmitFinished {
                            was_edit: true,
                            result: api::update::<Catalogues>(id, &payload, token)
                                .await
                                .map_err(|error| error.to_string()),
                        },
                    }
                });
            }
        }

        Msg::SubmitFinished {
            was_edit,
            result: Ok(()),
        } => {
            model.form.close();
            orders.notify(Notification::success(
                "Success",
                if was_edit {
                    "Catalogue updated successfully!"
                } else {
                    "Catalogue created successfully!"
                },
            ));
            let cmds = model.list.update(ListMsg::RefreshRequested);
            listing::execute::<Catalogues, _>(cmds, ctx.token(), orders, Msg::List);
        }

        Msg::SubmitFinished {
            result: Err(text), ..
        } => {
            model.form.submit_failed();
            orders.notify(Notification::error("Error saving catalogue", text));
        }
    }
}

pub fn view(model: &Model) -> Node<Msg> {
    div![
        div![
            attrs! {At::Class => "d-flex justify-content-between align-items-center px-3"},
            h5!["Catalogues"],
            button![
                attrs! {At::Class => "btn btn-sm btn-primary mt-2"},
                ev(Ev::Click, |_| Msg::AddClicked),
                "+ Add New"
            ],
        ],
        if model.list.is_loading() {
            ui::skeleton_table(3, 5)
        } else {
            records_table(model)
        },
        form_modal(model),
        IF!(model.list.is_deleting() => ui::backdrop_spinner()),
    ]
}

fn records_table(model: &Model) -> Node<Msg> {
    table![
        attrs! {At::Class => "table table-bordered mt-3"},
        thead![
            attrs! {At::Class => "thead-light"},
            tr![th!["ID"], th!["Name"], th!["Actions"]],
        ],
        tbody![if model.list.rows().is_empty() {
            vec![tr![td![
                attrs! {At::ColSpan => 3, At::Class => "text-center"},
                "No catalogues found"
            ]]]
        } else {
            model
                .list
                .rows()
                .iter()
                .map(|catalogue| {
                    let id = catalogue.id;
                    tr![
                        td![catalogue.id.to_string()],
                        td![&catalogue.name],
                        td![
                            attrs! {At::Class => "d-flex"},
                            a![
                                attrs! {
                                    At::Class => "btn btn-sm text-primary",
                                    At::Href => format!("/addProducts?id={}", id),
                                    At::Title => "Manage products",
                                },
                                "\u{1f441}"
                            ],
                            button![
                                attrs! {At::Class => "btn btn-sm text-primary"},
                                {
                                    let catalogue = catalogue.clone();
                                    ev(Ev::Click, move |_| Msg::EditClicked(catalogue))
                                },
                                "\u{270e}"
                            ],
                            button![
                                attrs! {At::Class => "btn btn-sm text-danger"},
                                ev(Ev::Click, move |_| {
                                    if ui::confirm_destructive() {
                                        Msg::DeleteConfirmed(id)
                                    } else {
                                        Msg::Noop
                                    }
                                }),
                                "\u{1f5d1}"
                            ],
                            button![
                                attrs! {At::Class => "btn btn-sm text-success", At::Title => "Copy share link"},
                                ev(Ev::Click, move |_| Msg::CopyShareLink(id)),
                                "\u{29c9}"
                            ],
                        ],
                    ]
                })
                .collect()
        }],
    ]
}

fn form_modal(model: &Model) -> Node<Msg> {
    let open = match model.form.open_ref() {
        Some(open) => open,
        None => return empty![],
    };
    let title = if open.editing.is_some() {
        "Edit Catalogue"
    } else {
        "Add Catalogue"
    };

    let body = nodes![
        div![
            attrs! {At::Class => "form-group mb-3"},
            label!["ID"],
            input![attrs! {
                At::Class => "form-control",
                At::Type => "text",
                At::Disabled => AtValue::None,
                At::Placeholder => "Auto-generated",
                At::Value => open.editing.map(|id| id.to_string()).unwrap_or_default(),
            }],
        ],
        div![
            attrs! {At::Class => "form-group mb-3"},
            label!["Catalogue Name"],
            input![
                attrs! {
                    At::Class => "form-control",
                    At::Type => "text",
                    At::Placeholder => "Enter catalogue name",
                    At::Value => open.draft.name,
                },
                input_ev(Ev::Input, Msg::NameChanged),
            ],
            ui::field_error(&open.errors, "name"),
        ],
    ];

    let footer = nodes![
        button![
            attrs! {At::Class => "btn btn-secondary"},
            ev(Ev::Click, |_| Msg::CloseModal),
            "Close"
        ],
        button![
            attrs! {At::Class => "btn btn-primary", At::Disabled => open.saving.as_at_value()},
            ev(Ev::Click, |_| Msg::SubmitClicked),
            if open.editing.is_some() { "Update" } else { "Save" }
        ],
    ];

    ui::modal(title, Msg::CloseModal, body, footer)
}
