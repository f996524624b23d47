pub mod config;
pub mod llm;
pub mod playlist;
pub mod server;
pub mod spotify;
