pub mod activity;
pub mod listing;
pub mod main;
pub mod profile;
pub mod search;
