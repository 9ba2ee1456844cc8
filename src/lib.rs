pub mod app;
pub mod app_state;
pub mod auth;
pub mod clock;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod modules;
pub mod policy;
pub mod telemetry;
