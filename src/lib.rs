pub mod api;
pub mod config;
pub mod db;
pub mod generator;
pub mod indexer;
pub mod models;
pub mod search;
pub mod state;
pub mod store;
