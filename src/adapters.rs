pub mod api_errors;
pub mod auth;
pub mod import;
pub mod platform;
pub mod records;
pub mod webhook;
