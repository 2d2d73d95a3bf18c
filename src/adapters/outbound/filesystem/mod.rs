/// Filesystem adapters for scan output
mod json_file_store;

pub use json_file_store::JsonFileStore;
