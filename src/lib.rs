// Biblioteca raiz do crate `studium`.
// Alocador de blocos de estudo, persistência do planejamento e API HTTP.
pub mod algorithm;
pub mod api_json;
pub mod config;
pub mod models;
pub mod server;
pub mod server_handlers;
pub mod storage;

/// Executa o servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;
