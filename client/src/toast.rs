//! Dismissible notification toasts, fed by the app-wide notification
//! channel and auto-hidden after a few seconds.

use seed::{prelude::*, *};

use shared::notify::{Level, Notification};

const AUTO_HIDE_MS: u32 = 4000;

#[derive(Default)]
pub struct Model {
    toasts: Vec<Toast>,
    next_id: u64,
}

struct Toast {
    id: u64,
    notification: Notification,
}

pub enum Msg {
    Dismiss(u64),
}

pub fn push(model: &mut Model, notification: Notification, orders: &mut impl Orders<Msg>) {
    let id = model.next_id;
    model.next_id += 1;
    model.toasts.push(Toast { id, notification });
    orders.perform_cmd(cmds::timeout(AUTO_HIDE_MS, move || Msg::Dismiss(id)));
}

pub fn update(msg: Msg, model: &mut Model) {
    match msg {
        Msg::Dismiss(id) => model.toasts.retain(|toast| toast.id != id),
    }
}

pub fn view(model: &Model) -> Node<Msg> {
    div![
        attrs! {At::Class => "toast-container p-3"},
        style! {
            St::Position => "fixed",
            St::Top => "0",
            St::Right => "0",
            St::ZIndex => "1100",
        },
        model.toasts.iter().map(|toast| {
            let id = toast.id;
            let alert_class = match toast.notification.level {
                Level::Success => "alert alert-success",
                Level::Warning => "alert alert-warning",
                Level::Error => "alert alert-danger",
            };
            div![
                attrs! {At::Class => alert_class},
                strong![&toast.notification.title],
                div![&toast.notification.text],
                button![
                    attrs! {At::Class => "close", At::Type => "button"},
                    ev(Ev::Click, move |_| Msg::Dismiss(id)),
                    "\u{d7}"
                ],
            ]
        }),
    ]
}
