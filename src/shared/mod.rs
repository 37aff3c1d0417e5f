pub mod constants;
pub mod domain;
pub mod validation;
