//! Telegram bot that searches the Maxima.lv promotional-offer catalog
//! and replies with paginated photo + caption pairs.

pub mod bot;
pub mod catalog;
pub mod domain;
pub mod models;
pub mod search;
pub mod server;
