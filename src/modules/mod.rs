pub mod auth;
pub mod links;
