pub mod action;
pub mod error;
pub mod id;
pub mod import;
pub mod platform;
pub mod record;
pub mod store;
pub mod webhook;
