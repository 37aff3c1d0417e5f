pub mod dtos;
pub mod models;
pub mod validator;

pub use dtos::{CategoryOutputDto, CategoryProps};
pub use models::Category;
