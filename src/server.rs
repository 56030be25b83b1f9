use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::sync::Mutex;

use crate::config::Config;
use crate::server_handlers::*;
use crate::storage::PlanoStore;

/// Registra todas as rotas. Separado de `run_server` para os testes montarem
/// o mesmo `App`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/planejamento/distribuir", web::post().to(distribuir_handler))
        .route("/planejamento/gerar", web::post().to(gerar_handler))
        .route("/planoEstudo", web::post().to(criar_plano_handler))
        .route("/planoEstudo/{id}", web::put().to(atualizar_plano_handler))
        .route("/planoEstudo/{id}/planejamento", web::get().to(carregar_planejamento_handler))
        .route("/planoEstudo/{id}/planejamento", web::post().to(enviar_planejamento_handler))
        .route("/planoEstudo/{id}/historico", web::get().to(historico_handler))
        .route("/planoEstudo/{id}/disciplina", web::post().to(criar_disciplina_handler))
        .route("/disciplina/{id}", web::put().to(atualizar_disciplina_handler))
        .route("/blocoEstudo", web::post().to(criar_bloco_handler))
        .route("/blocoEstudo/{id}", web::delete().to(remover_bloco_handler))
        .route("/help", web::get().to(help_handler));
}

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let store = PlanoStore::abrir(&config.db_path).map_err(|e| std::io::Error::other(e.to_string()))?;
    log::info!("banco em {}", config.db_path.display());
    if config.em_memoria() {
        log::warn!("banco em memoria: os dados serao perdidos ao encerrar o servidor");
    }
    let store = web::Data::new(Mutex::new(store));

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .app_data(store.clone())
            .configure(configure)
    })
    .bind(config.bind.as_str())?
    .run()
    .await
}
