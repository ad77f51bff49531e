//! Dashboard landing page: shortcut cards into the admin sections.

use seed::{prelude::*, *};

pub fn view<Ms>() -> Node<Ms> {
    div![
        attrs! {At::Class => "container py-5"},
        h3![attrs! {At::Class => "mb-4"}, "Dashboard"],
        div![
            attrs! {At::Class => "row g-4"},
            card("Products", "Manage the product catalog.", "/products"),
            card(
                "Collections",
                "Group products into collections.",
                "/collections"
            ),
            card(
                "Catalogues",
                "Curate shareable catalogues.",
                "/catalouges"
            ),
        ],
    ]
}

fn card<Ms>(title: &str, text: &str, href: &str) -> Node<Ms> {
    div![
        attrs! {At::Class => "col-md-4"},
        a![
            attrs! {
                At::Class => "card shadow-sm h-100 p-4 text-center",
                At::Href => href,
            },
            style! {St::TextDecoration => "none", St::Color => "inherit"},
            h5![title],
            p![attrs! {At::Class => "text-muted mb-0"}, text],
        ],
    ]
}
