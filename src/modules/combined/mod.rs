pub mod aggregator;
pub mod handlers;
pub mod routes;
pub mod service;
