pub mod auth;
pub mod calendar;
pub mod config;
pub mod error;
pub mod mail;
pub mod models;
pub mod routes;
pub mod storage;
