use seed::{prelude::*, *};

use shared::models::Id;
use shared::notify::Notification;

mod api;
mod listing;
mod page;
mod resource;
mod session;
mod toast;
mod ui;

use session::SessionStore;

// ------ ------
//     Init
// ------ ------

fn init(url: Url, orders: &mut impl Orders<Msg>) -> Model {
    orders
        .subscribe(Msg::UrlChanged)
        .subscribe(Msg::NotificationPosted);
    let mut model = Model {
        ctx: SessionStore::rehydrate(),
        page: PageModel::Blank,
        toasts: toast::Model::default(),
        sidebar_open: false,
        logging_out: false,
    };
    change_route(url, &mut model, orders);
    model
}

// ------ ------
//     Routes
// ------ ------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Home,
    Login,
    Products,
    Collections,
    Catalogues,
    AddProducts(Id),
    ViewCatalogue(Id),
    ProductDetail(Id),
    NotFound,
}

impl Route {
    fn from_url(mut url: Url) -> Self {
        let part = url.next_path_part().map(ToOwned::to_owned);
        match part.as_deref() {
            None => Route::Home,
            Some("login") => Route::Login,
            Some("products") => Route::Products,
            Some("collections") => Route::Collections,
            Some("catalouges") => Route::Catalogues,
            Some("addProducts") => match query_id(&url) {
                Some(id) => Route::AddProducts(id),
                None => Route::NotFound,
            },
            Some("viewCatalogue") => match query_id(&url) {
                Some(id) => Route::ViewCatalogue(id),
                None => Route::NotFound,
            },
            Some("productDetails") => match query_id(&url) {
                Some(id) => Route::ProductDetail(id),
                None => Route::NotFound,
            },
            Some(_) => Route::NotFound,
        }
    }

    /// Public routes render without a session; everything else demands
    /// a logged-in user.
    fn is_public(self) -> bool {
        matches!(
            self,
            Route::Login | Route::ViewCatalogue(_) | Route::ProductDetail(_)
        )
    }
}

fn query_id(url: &Url) -> Option<Id> {
    url.search()
        .get("id")
        .and_then(|values| values.first())
        .and_then(|value| value.parse().ok())
}

// ------ ------
//     Model
// ------ ------

struct Model {
    ctx: SessionStore,
    page: PageModel,
    toasts: toast::Model,
    sidebar_open: bool,
    logging_out: bool,
}

enum PageModel {
    /// Placeholder rendered while a redirect is in flight.
    Blank,
    NotFound,
    Home,
    Login(page::login::Model),
    Products(page::products::Model),
    Collections(page::collections::Model),
    Catalogues(page::catalogues::Model),
    AddProducts(page::add_products::Model),
    ViewCatalogue(page::view_catalogue::Model),
    ProductDetail(page::product_detail::Model),
}

// ------ ------
//    Update
// ------ ------

enum Msg {
    UrlChanged(subs::UrlChanged),
    NotificationPosted(Notification),
    Toast(toast::Msg),
    ToggleSidebar,
    LogoutClicked,
    LogoutFinished(Result<(), String>),
    Login(page::login::Msg),
    Products(page::products::Msg),
    Collections(page::collections::Msg),
    Catalogues(page::catalogues::Msg),
    AddProducts(page::add_products::Msg),
    ViewCatalogue(page::view_catalogue::Msg),
    ProductDetail(page::product_detail::Msg),
}

fn change_route(url: Url, model: &mut Model, orders: &mut impl Orders<Msg>) {
    let route = Route::from_url(url);
    if !route.is_public() && !model.ctx.is_logged_in() {
        model.page = PageModel::Blank;
        orders.request_url(Url::new().set_path(&["login"]));
        return;
    }
    if route == Route::Login && model.ctx.is_logged_in() {
        model.page = PageModel::Blank;
        orders.request_url(Url::new());
        return;
    }
    model.sidebar_open = false;
    model.page = match route {
        Route::Home => PageModel::Home,
        Route::Login => PageModel::Login(page::login::init()),
        Route::Products => PageModel::Products(page::products::init(
            &model.ctx,
            &mut orders.proxy(Msg::Products),
        )),
        Route::Collections => PageModel::Collections(page::collections::init(
            &model.ctx,
            &mut orders.proxy(Msg::Collections),
        )),
        Route::Catalogues => PageModel::Catalogues(page::catalogues::init(
            &model.ctx,
            &mut orders.proxy(Msg::Catalogues),
        )),
        Route::AddProducts(id) => PageModel::AddProducts(page::add_products::init(
            id,
            &model.ctx,
            &mut orders.proxy(Msg::AddProducts),
        )),
        Route::ViewCatalogue(id) => PageModel::ViewCatalogue(page::view_catalogue::init(
            id,
            &mut orders.proxy(Msg::ViewCatalogue),
        )),
        Route::ProductDetail(id) => PageModel::ProductDetail(page::product_detail::init(
            id,
            &mut orders.proxy(Msg::ProductDetail),
        )),
        Route::NotFound => PageModel::NotFound,
    };
}

fn update(msg: Msg, model: &mut Model, orders: &mut impl Orders<Msg>) {
    match msg {
        Msg::UrlChanged(subs::UrlChanged(url)) => {
            change_route(url, model, orders);
        }

        Msg::NotificationPosted(notification) => {
            toast::push(
                &mut model.toasts,
                notification,
                &mut orders.proxy(Msg::Toast),
            );
        }

        Msg::Toast(toast_msg) => toast::update(toast_msg, &mut model.toasts),

        Msg::ToggleSidebar => model.sidebar_open = !model.sidebar_open,

        Msg::LogoutClicked => {
            if model.logging_out {
                return;
            }
            match model.ctx.token() {
                Some(token) => {
                    model.logging_out = true;
                    orders.perform_cmd(async move {
                        Msg::LogoutFinished(
                            api::logout(token).await.map_err(|error| error.to_string()),
                        )
                    });
                }
                // No token to revoke; drop the local session outright.
                None => {
                    model.ctx.logout();
                    orders.request_url(Url::new().set_path(&["login"]));
                }
            }
        }

        Msg::LogoutFinished(result) => {
            model.logging_out = false;
            match result {
                Ok(()) => {
                    model.ctx.logout();
                    orders.request_url(Url::new().set_path(&["login"]));
                }
                Err(text) => {
                    error!("logout failed:", text);
                    orders.notify(Notification::error(
                        "Failed to logout. Please try again.",
                        text,
                    ));
                }
            }
        }

        // Page messages only apply while their page is mounted; a
        // message that outlives its page is dropped.
        Msg::Login(page_msg) => {
            if let PageModel::Login(page_model) = &mut model.page {
                page::login::update(
                    page_msg,
                    page_model,
                    &mut model.ctx,
                    &mut orders.proxy(Msg::Login),
                );
            }
        }
        Msg::Products(page_msg) => {
            if let PageModel::Products(page_model) = &mut model.page {
                page::products::update(
                    page_msg,
                    page_model,
                    &model.ctx,
                    &mut orders.proxy(Msg::Products),
                );
            }
        }
        Msg::Collections(page_msg) => {
            if let PageModel::Collections(page_model) = &mut model.page {
                page::collections::update(
                    page_msg,
                    page_model,
                    &model.ctx,
                    &mut orders.proxy(Msg::Collections),
                );
            }
        }
        Msg::Catalogues(page_msg) => {
            if let PageModel::Catalogues(page_model) = &mut model.page {
                page::catalogues::update(
                    page_msg,
                    page_model,
                    &model.ctx,
                    &mut orders.proxy(Msg::Catalogues),
                );
            }
        }
        Msg::AddProducts(page_msg) => {
            if let PageModel::AddProducts(page_model) = &mut model.page {
                page::add_products::update(
                    page_msg,
                    page_model,
                    &model.ctx,
                    &mut orders.proxy(Msg::AddProducts),
                );
            }
        }
        Msg::ViewCatalogue(page_msg) => {
            if let PageModel::ViewCatalogue(page_model) = &mut model.page {
                page::view_catalogue::update(
                    page_msg,
                    page_model,
                    &mut orders.proxy(Msg::ViewCatalogue),
                );
            }
        }
        Msg::ProductDetail(page_msg) => {
            if let PageModel::ProductDetail(page_model) = &mut model.page {
                page::product_detail::update(
                    page_msg,
                    page_model,
                    &mut orders.proxy(Msg::ProductDetail),
                );
            }
        }
    }
}

// ------ ------
//     View
// ------ ------

fn view(model: &Model) -> impl IntoNodes<Msg> {
    if let PageModel::Login(page_model) = &model.page {
        return nodes![
            toast::view(&model.toasts).map_msg(Msg::Toast),
            page::login::view(page_model).map_msg(Msg::Login),
        ];
    }
    nodes![
        toast::view(&model.toasts).map_msg(Msg::Toast),
        navbar(model),
        IF!(model.sidebar_open => sidebar(model)),
        page_view(model),
        IF!(model.logging_out => ui::backdrop_spinner()),
    ]
}

fn navbar(model: &Model) -> Node<Msg> {
    nav![
        attrs! {At::Class => "navbar navbar-light bg-white border-bottom px-3"},
        IF!(model.ctx.is_logged_in() => button![
            attrs! {At::Class => "btn btn-outline-secondary me-2", At::Type => "button"},
            ev(Ev::Click, |_| Msg::ToggleSidebar),
            "\u{2630}"
        ]),
        a![
            attrs! {At::Class => "navbar-brand", At::Href => "/"},
            "Sports Store Admin"
        ],
    ]
}

fn sidebar(model: &Model) -> Node<Msg> {
    div![
        style! {
            St::Position => "fixed",
            St::Top => "0",
            St::Left => "0",
            St::Width => percent(100),
            St::Height => percent(100),
            St::BackgroundColor => "rgba(0, 0, 0, 0.4)",
            St::ZIndex => "1050",
        },
        ev(Ev::Click, |_| Msg::ToggleSidebar),
        div![
            attrs! {At::Class => "bg-white h-100 p-4 shadow"},
            style! {St::Width => px(280)},
            ev(Ev::Click, |event| {
                event.stop_propagation();
                None as Option<Msg>
            }),
            model.ctx.user().map(|user| h5![
                attrs! {At::Class => "mb-4"},
                format!("Hi, {}", user.name.as_deref().unwrap_or("Admin"))
            ]),
            ul![
                attrs! {At::Class => "nav flex-column"},
                sidebar_link("/", "Dashboard"),
                sidebar_link("/products", "Products"),
                sidebar_link("/collections", "Collections"),
                sidebar_link("/catalouges", "Catalogues"),
            ],
            button![
                attrs! {At::Class => "btn btn-outline-danger mt-4 w-100", At::Type => "button"},
                ev(Ev::Click, |_| Msg::LogoutClicked),
                "Logout"
            ],
        ],
    ]
}

fn sidebar_link(href: &str, label: &str) -> Node<Msg> {
    li![
        attrs! {At::Class => "nav-item"},
        a![attrs! {At::Class => "nav-link px-0", At::Href => href}, label],
    ]
}

fn page_view(model: &Model) -> Node<Msg> {
    match &model.page {
        PageModel::Blank => empty![],
        PageModel::NotFound => div![
            attrs! {At::Class => "container py-5 text-center"},
            h3!["404"],
            p!["This page could not be found."],
        ],
        PageModel::Home => page::home::view(),
        PageModel::Login(_) => empty![],
        PageModel::Products(page_model) => {
            page::products::view(page_model, model.ctx.is_logged_in()).map_msg(Msg::Products)
        }
        PageModel::Collections(page_model) => {
            page::collections::view(page_model).map_msg(Msg::Collections)
        }
        PageModel::Catalogues(page_model) => {
            page::catalogues::view(page_model).map_msg(Msg::Catalogues)
        }
        PageModel::AddProducts(page_model) => {
            page::add_products::view(page_model).map_msg(Msg::AddProducts)
        }
        PageModel::ViewCatalogue(page_model) => {
            page::view_catalogue::view(page_model).map_msg(Msg::ViewCatalogue)
        }
        PageModel::ProductDetail(page_model) => {
            page::product_detail::view(page_model).map_msg(Msg::ProductDetail)
        }
    }
}

// ------ ------
//     Start
// ------ ------

#[wasm_bindgen(start)]
pub fn start() {
    App::start("app", init, update, view);
}
