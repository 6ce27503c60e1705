pub mod config;
pub mod dns;
pub mod error;
pub mod http;
pub mod ip;
pub mod notify;
pub mod reconcile;

pub use error::{DdnsError, Result};
