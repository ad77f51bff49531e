//! View helpers shared by the screens: skeleton placeholders, modal
//! chrome, pagination controls, the blocking delete confirmation and
//! the clipboard copy used for catalogue share links.

use seed::{prelude::*, *};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlTextAreaElement;

use shared::form::FieldErrors;

/// Grey placeholder cards shown while a grid is loading.
pub fn skeleton_cards<Ms>(count: usize) -> Vec<Node<Ms>> {
    (0..count)
        .map(|_| {
            div![
                attrs! {At::Class => "card shadow-sm rounded-3 m-2 border-0 p-2"},
                style! {St::Width => px(180), St::Height => px(200)},
                div![
                    style! {
                        St::Height => px(120),
                        St::BackgroundColor => "#e0e0e0",
                        St::BorderRadius => px(4),
                    },
                    attrs! {At::Class => "mb-2"},
                ],
                div![
                    style! {
                        St::Height => px(20),
                        St::Width => percent(80),
                        St::BackgroundColor => "#e0e0e0",
                        St::BorderRadius => px(4),
                    },
                    attrs! {At::Class => "mb-1"},
                ],
                div![style! {
                    St::Height => px(20),
                    St::Width => percent(40),
                    St::BackgroundColor => "#e0e0e0",
                    St::BorderRadius => px(4),
                }],
            ]
        })
        .collect()
}

/// Grey placeholder table shown while a table screen is loading.
pub fn skeleton_table<Ms>(columns: usize, rows: usize) -> Node<Ms> {
    let line = |width: f64| {
        div![style! {
            St::Height => px(18),
            St::Width => percent(width),
            St::BackgroundColor => "#e0e0e0",
            St::BorderRadius => px(4),
        }]
    };
    table![
        attrs! {At::Class => "table table-bordered mt-3"},
        thead![tr![(0..columns).map(|_| th![line(80.0)])]],
        tbody![(0..rows).map(|_| tr![(0..columns).map(|_| td![line(100.0)])])],
    ]
}

pub fn pagination<Ms: 'static + Clone>(
    page: u32,
    has_prev: bool,
    has_next: bool,
    to_msg: fn(u32) -> Ms,
) -> Node<Ms> {
    div![
        attrs! {At::Class => "d-flex justify-content-between align-items-center mt-3"},
        button![
            attrs! {At::Class => "btn btn-outline-primary", At::Disabled => (!has_prev).as_at_value()},
            ev(Ev::Click, move |_| to_msg(page - 1)),
            "Previous"
        ],
        span![attrs! {At::Class => "mx-2"}, page.to_string()],
        button![
            attrs! {At::Class => "btn btn-outline-primary", At::Disabled => (!has_next).as_at_value()},
            ev(Ev::Click, move |_| to_msg(page + 1)),
            "Next"
        ],
    ]
}

/// Bootstrap modal chrome. The caller provides body and footer content;
/// the header close button and a backdrop are wired to `close_msg`.
pub fn modal<Ms: 'static + Clone>(
    title: &str,
    close_msg: Ms,
    body: Vec<Node<Ms>>,
    footer: Vec<Node<Ms>>,
) -> Node<Ms> {
    div![
        attrs! {At::Class => "modal"},
        style! {
            St::Display => "block",
            St::BackgroundColor => "rgba(0, 0, 0, 0.5)",
        },
        div![
            attrs! {At::Class => "modal-dialog modal-lg"},
            div![
                attrs! {At::Class => "modal-content"},
                div![
                    attrs! {At::Class => "modal-header"},
                    h5![attrs! {At::Class => "modal-title"}, title],
                    button![
                        attrs! {At::Class => "close", At::Type => "button"},
                        ev(Ev::Click, move |_| close_msg.clone()),
                        "\u{d7}"
                    ],
                ],
                div![attrs! {At::Class => "modal-body"}, body],
                div![attrs! {At::Class => "modal-footer"}, footer],
            ],
        ],
    ]
}

/// Full-screen spinner shown while a save/delete/upload is in flight.
pub fn backdrop_spinner<Ms>() -> Node<Ms> {
    div![
        style! {
            St::Position => "fixed",
            St::Top => "0",
            St::Left => "0",
            St::Width => percent(100),
            St::Height => percent(100),
            St::BackgroundColor => "rgba(0, 0, 0, 0.3)",
            St::Display => "flex",
            St::AlignItems => "center",
            St::JustifyContent => "center",
            St::ZIndex => "1200",
        },
        div![
            attrs! {At::Class => "spinner-border text-light"},
            span![attrs! {At::Class => "sr-only"}, "Loading..."],
        ],
    ]
}

/// Inline message for one field, empty when the field is valid.
pub fn field_error<Ms>(errors: &FieldErrors, field: &str) -> Node<Ms> {
    match errors.get(field) {
        Some(message) => div![attrs! {At::Class => "text-danger mt-1"}, message],
        None => empty![],
    }
}

/// Blocking yes/no prompt guarding destructive actions.
pub fn confirm_destructive() -> bool {
    window()
        .confirm_with_message("Are you sure? This action cannot be undone!")
        .unwrap_or(false)
}

/// Copies `text` through a temporary off-screen textarea.
pub fn copy_to_clipboard(text: &str) -> Result<(), JsValue> {
    let document = document();
    let textarea: HtmlTextAreaElement = document.create_element("textarea")?.dyn_into()?;
    textarea.set_value(text);
    textarea.style().set_property("position", "fixed")?;
    textarea.style().set_property("opacity", "0")?;
    let body = document.body().ok_or_else(|| JsValue::from_str("no body"))?;
    body.append_child(&textarea)?;
    textarea.select();
    let copied = document
        .dyn_ref::<web_sys::HtmlDocument>()
        .and_then(|doc| doc.exec_command("copy").ok())
        .unwrap_or(false);
    body.remove_child(&textarea)?;
    if copied {
        Ok(())
    } else {
        Err(JsValue::from_str("copy command rejected"))
    }
}
