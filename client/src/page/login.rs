//! Login screen. On success the session is persisted through the
//! session store and the app navigates to the dashboard.

use seed::{prelude::*, *};

use shared::models::LoginResponse;

use crate::api;
use crate::session::SessionStore;

pub struct Model {
    email: String,
    password: String,
    error: Option<String>,
    submitting: bool,
}

pub fn init() -> Model {
    Model {
        email: String::new(),
        password: String::new(),
        error: None,
        submitting: false,
    }
}

#[derive(Clone)]
pub enum Msg {
    EmailChanged(String),
    PasswordChanged(String),
    SubmitClicked,
    SubmitFinished(Result<LoginResponse, String>),
}

pub fn update(msg: Msg, model: &mut Model, ctx: &mut SessionStore, orders: &mut impl Orders<Msg>) {
    match msg {
        Msg::EmailChanged(email) => model.email = email,
        Msg::PasswordChanged(password) => model.password = password,

        Msg::SubmitClicked => {
            if model.submitting {
                return;
            }
            model.error = None;
            model.submitting = true;
            let email = model.email.clone();
            let password = model.password.clone();
            orders.perform_cmd(async move {
                Msg::SubmitFinished(
                    api::login(email, password)
                        .await
                        .map_err(|error| error.to_string()),
                )
            });
        }

        Msg::SubmitFinished(result) => {
            model.submitting = false;
            match result {
                Ok(response) => {
                    ctx.login(response.into());
                    orders.request_url(Url::new());
                }
                Err(_) => {
                    model.error = Some("Invalid email or password".into());
                }
            }
        }
    }
}

pub fn view(model: &Model) -> Node<Msg> {
    div![
        attrs! {At::Class => "d-flex justify-content-center align-items-center vh-100 bg-light"},
        form![
            attrs! {At::Class => "card shadow-sm p-4"},
            style! {St::Width => px(360)},
            ev(Ev::Submit, |event| {
                event.prevent_default();
                Msg::SubmitClicked
            }),
            h4![attrs! {At::Class => "text-center mb-4"}, "Admin Login"],
            div![
                attrs! {At::Class => "mb-3"},
                label![attrs! {At::Class => "form-label"}, "Email"],
                input![
                    attrs! {
                        At::Class => "form-control",
                        At::Type => "email",
                        At::Placeholder => "Enter email",
                        At::Value => model.email,
                    },
                    input_ev(Ev::Input, Msg::EmailChanged),
                ],
            ],
            div![
                attrs! {At::Class => "mb-3"},
                label![attrs! {At::Class => "form-label"}, "Password"],
                input![
                    attrs! {
                        At::Class => "form-control",
                        At::Type => "password",
                        At::Placeholder => "Enter password",
                        At::Value => model.password,
                    },
                    input_ev(Ev::Input, Msg::PasswordChanged),
                ],
            ],
            model
                .error
                .as_ref()
                .map(|text| p![attrs! {At::Class => "text-danger"}, text]),
            button![
                attrs! {
                    At::Class => "btn btn-primary w-100",
                    At::Type => "submit",
                    At::Disabled => model.submitting.as_at_value(),
                },
                if model.submitting { "Logging in..." } else { "Login" }
            ],
        ],
    ]
}
