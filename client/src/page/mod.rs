pub mod add_products;
pub mod catalogues;
pub mod collections;
pub mod home;
pub mod login;
pub mod product_detail;
pub mod products;
pub mod view_catalogue;
