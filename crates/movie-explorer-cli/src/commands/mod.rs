pub mod auth;
pub mod browse;
pub mod clear;
pub mod collections;
pub mod config;
pub mod context;
pub mod details;
pub mod discover;
pub mod history;
pub mod prompts;
pub mod search;
pub mod theme;
