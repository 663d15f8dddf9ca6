//! Category storage, seed data, and the categories JSON API.

mod api;
mod db;
mod domain;

pub use api::{
    CategoryCreatedResponse, CategoryListResponse, create_category_endpoint,
    get_categories_endpoint,
};
pub use db::{
    DEFAULT_CATEGORIES, create_category, create_category_table, get_all_categories,
    seed_default_categories,
};
pub use domain::{Category, CategoryId, NewCategory};
