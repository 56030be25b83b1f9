// Endpoints unitários do contrato de persistência (cada chamada do fan-out).

use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::sync::Mutex;

use crate::api_json::DisciplinaAtualizada;
use crate::models::{BlocoEstudo, Disciplina};
use crate::storage::PlanoStore;
use super::{lock_store, store_error_response};

#[derive(Deserialize)]
pub struct NovoPlano {
    pub nome: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtualizacaoDisciplina {
    pub horas_semanais: f64,
    pub selecionada: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NovoBloco {
    pub plano_id: i64,
    pub dia_semana: u8,
    pub ordem: u32,
    pub total_horas_planejadas: f64,
    pub disciplina_id: i64,
}

/// POST /planoEstudo
pub async fn criar_plano_handler(body: web::Json<NovoPlano>, store: web::Data<Mutex<PlanoStore>>) -> impl Responder {
    let nome = body.into_inner().nome;
    if nome.trim().is_empty() {
        return HttpResponse::BadRequest().json(json!({"error": "nome is required"}));
    }
    let store = match lock_store(&store) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match store.criar_plano(nome.trim()) {
        Ok(p) => HttpResponse::Created().json(p),
        Err(e) => store_error_response(&e),
    }
}

/// PUT /planoEstudo/{id} com as chaves `<dia>_ativo` / `<dia>_horas`.
pub async fn atualizar_plano_handler(
    path: web::Path<i64>,
    body: web::Json<Map<String, Value>>,
    store: web::Data<Mutex<PlanoStore>>,
) -> impl Responder {
    let store = match lock_store(&store) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match store.atualizar_plano(path.into_inner(), &body.into_inner()) {
        Ok(p) => HttpResponse::Ok().json(p),
        Err(e) => store_error_response(&e),
    }
}

/// POST /planoEstudo/{id}/disciplina
pub async fn criar_disciplina_handler(
    path: web::Path<i64>,
    body: web::Json<Disciplina>,
    store: web::Data<Mutex<PlanoStore>>,
) -> impl Responder {
    let plano_id = path.into_inner();
    let store = match lock_store(&store) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    if let Err(e) = store.plano(plano_id) {
        return store_error_response(&e);
    }
    match store.criar_disciplina(plano_id, &body.into_inner()) {
        Ok(d) => HttpResponse::Created().json(d),
        Err(e) => store_error_response(&e),
    }
}

/// PUT /disciplina/{id}
pub async fn atualizar_disciplina_handler(
    path: web::Path<i64>,
    body: web::Json<AtualizacaoDisciplina>,
    store: web::Data<Mutex<PlanoStore>>,
) -> impl Responder {
    let body = body.into_inner();
    let atualizacao = DisciplinaAtualizada { id: path.into_inner(), horas_semanais: body.horas_semanais, selecionada: body.selecionada };
    let store = match lock_store(&store) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match store.atualizar_disciplina(&atualizacao) {
        Ok(()) => HttpResponse::Ok().json(atualizacao),
        Err(e) => store_error_response(&e),
    }
}

/// POST /blocoEstudo
pub async fn criar_bloco_handler(body: web::Json<NovoBloco>, store: web::Data<Mutex<PlanoStore>>) -> impl Responder {
    let b = body.into_inner();
    let bloco = BlocoEstudo {
        id: None,
        dia_semana: b.dia_semana,
        ordem: b.ordem,
        total_horas_planejadas: b.total_horas_planejadas,
        disciplina_id: b.disciplina_id,
    };
    let store = match lock_store(&store) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match store.criar_bloco(b.plano_id, &bloco) {
        Ok(criado) => HttpResponse::Created().json(criado),
        Err(e) => store_error_response(&e),
    }
}

/// DELETE /blocoEstudo/{id}
pub async fn remover_bloco_handler(path: web::Path<i64>, store: web::Data<Mutex<PlanoStore>>) -> impl Responder {
    let store = match lock_store(&store) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match store.remover_bloco(path.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => store_error_response(&e),
    }
}

/// GET /planoEstudo/{id}/historico?limit=10
pub async fn historico_handler(
    path: web::Path<i64>,
    query: web::Query<std::collections::HashMap<String, String>>,
    store: web::Data<Mutex<PlanoStore>>,
) -> impl Responder {
    let lim = query.get("limit").and_then(|s| s.parse::<i64>().ok()).unwrap_or(10);
    let store = match lock_store(&store) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match store.listar_historico(path.into_inner(), lim) {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => store_error_response(&e),
    }
}
