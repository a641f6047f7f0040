pub mod api_fetch;
pub mod config;
pub mod error;
pub mod export;
pub mod fixtures;
pub mod http_cache;
pub mod http_client;
pub mod logging;
pub mod persist;
pub mod player;
pub mod projection;
pub mod provider;
pub mod state;
pub mod stats_table;
pub mod tools;
pub mod trades;
