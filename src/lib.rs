pub mod app;
pub mod biomart;
pub mod config;
pub mod domain;
pub mod error;
pub mod fetch;
pub mod output;
pub mod query;
pub mod response;
pub mod store;
