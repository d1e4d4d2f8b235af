pub mod account;
pub mod auth;
pub mod export;
pub mod ideas;
pub mod tags;
