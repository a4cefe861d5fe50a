pub mod activity;
pub mod auth;
pub mod config;
pub mod listing;
pub mod profile;
