pub mod app;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;
pub mod session;
pub mod validation;

#[cfg(test)]
mod test_support;
