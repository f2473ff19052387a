//! Headless DataFlow Pro dashboard shell: session gate, job creation wizard,
//! static data store, list filters and route guard.

pub mod auth;
pub mod config;
pub mod db;
pub mod filter;
pub mod handlers;
pub mod model;
pub mod notice;
pub mod pages;
pub mod routes;
pub mod session;
pub mod shell;
pub mod store;
pub mod wizard;
