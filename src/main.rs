// --- Studium: planejador semanal de estudos ---

use studium::config::Config;
use studium::run_server;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    println!("=== Studium - Planejador de Estudos (API) ===");
    println!("Iniciando servidor em http://{}", config.bind);
    run_server(config).await
}
