pub mod api;
pub mod config;
pub mod db;
pub mod docs;
pub mod errors;
pub mod model;
pub mod models;
pub mod report;
pub mod routes;
pub mod session;
pub mod storage;
