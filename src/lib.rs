//! HTTP gateway over a cached COVID-19 statistics snapshot

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod feed;
pub mod geocode;
pub mod models;
pub mod snapshot;

#[cfg(test)]
mod test_support;
