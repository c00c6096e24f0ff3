pub mod level;
pub mod record;
pub mod document;
pub mod formatter;
pub mod error;
pub mod client;
pub mod handler;
pub mod logger;
pub mod config;
pub mod env;
pub mod layer;

#[cfg(feature = "elasticsearch")]
pub mod elasticsearch;

pub mod init;
pub mod noop_client;

#[cfg(test)]
mod test_support;
