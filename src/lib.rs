pub mod access;
pub mod app;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;
pub mod view;
