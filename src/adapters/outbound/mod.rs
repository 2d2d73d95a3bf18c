/// Outbound adapters - Infrastructure implementations of outbound ports
pub mod console;
pub mod crawlers;
pub mod credentials;
pub mod filesystem;
pub mod network;
