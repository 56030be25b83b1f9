use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use std::sync::Mutex;

use crate::algorithm::{distribuir_horas_semanais, planejar};
use crate::api_json::{montar_submissao, parse_planejamento_input, planejar_chamadas, validar_disciplinas_do_plano};
use crate::models::EstadoPlanejamento;
use crate::storage::PlanoStore;
use super::{lock_store, store_error_response};

fn parse_body(body: web::Json<serde_json::Value>) -> Result<EstadoPlanejamento, HttpResponse> {
    let body_value = body.into_inner();
    let json_str = serde_json::to_string(&body_value)
        .map_err(|e| HttpResponse::BadRequest().json(json!({"error": format!("invalid JSON body: {}", e)})))?;
    parse_planejamento_input(&json_str)
        .map_err(|e| HttpResponse::BadRequest().json(json!({"error": format!("failed to parse input: {}", e)})))
}

/// POST /planejamento/distribuir
/// Recalcula `horasSemanais` das disciplinas a partir dos dias.
pub async fn distribuir_handler(body: web::Json<serde_json::Value>) -> impl Responder {
    let estado = match parse_body(body) {
        Ok(e) => e.normalizado(),
        Err(resp) => return resp,
    };
    let mut disciplinas = estado.disciplinas;
    let distribuido = distribuir_horas_semanais(&mut disciplinas, &estado.dias);
    HttpResponse::Ok().json(json!({"distribuido": distribuido, "disciplinas": disciplinas, "dias": estado.dias}))
}

/// POST /planejamento/gerar
/// Distribui as horas e gera os blocos sem gravar nada.
pub async fn gerar_handler(body: web::Json<serde_json::Value>) -> impl Responder {
    let estado = match parse_body(body) {
        Ok(e) => e,
        Err(resp) => return resp,
    };
    match planejar(estado) {
        Ok(p) => HttpResponse::Ok().json(p),
        Err(e) => HttpResponse::UnprocessableEntity().json(json!({"error": e.to_string(), "blocos": []})),
    }
}

/// GET /planoEstudo/{id}/planejamento
pub async fn carregar_planejamento_handler(path: web::Path<i64>, store: web::Data<Mutex<PlanoStore>>) -> impl Responder {
    let plano_id = path.into_inner();
    let store = match lock_store(&store) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match store.carregar_estado(plano_id) {
        Ok(estado) => HttpResponse::Ok().json(estado),
        Err(e) => store_error_response(&e),
    }
}

/// POST /planoEstudo/{id}/planejamento
/// Gera os blocos e substitui os anteriores do plano. Uma falha no meio deixa
/// o que já foi gravado e devolve uma mensagem genérica com o erro do banco.
pub async fn enviar_planejamento_handler(
    path: web::Path<i64>,
    body: web::Json<serde_json::Value>,
    store: web::Data<Mutex<PlanoStore>>,
) -> impl Responder {
    let plano_id = path.into_inner();
    let estado = match parse_body(body) {
        Ok(e) => e,
        Err(resp) => return resp,
    };

    let store = match lock_store(&store) {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    // o envio atualiza disciplinas por id; só valem as do próprio plano
    let do_plano = match store.disciplinas(plano_id) {
        Ok(d) => d,
        Err(e) => return store_error_response(&e),
    };
    if let Err(e) = validar_disciplinas_do_plano(&estado.disciplinas, &do_plano) {
        return HttpResponse::BadRequest().json(json!({"error": e.to_string()}));
    }

    let planejamento = match planejar(estado) {
        Ok(p) => p,
        Err(e) => return HttpResponse::UnprocessableEntity().json(json!({"error": e.to_string(), "blocos": []})),
    };

    // todos os blocos do plano são substituídos, não só os que o cliente enviou
    let antigos = match store.blocos(plano_id) {
        Ok(b) => b,
        Err(e) => return store_error_response(&e),
    };

    let n_blocos = planejamento.blocos.len();
    let submissao = montar_submissao(&planejamento.estado.dias, &planejamento.estado.disciplinas, planejamento.blocos);
    let chamadas = planejar_chamadas(plano_id, &submissao, &antigos);

    match store.aplicar_chamadas(&chamadas) {
        Ok(aplicadas) => {
            if let Err(e) = store.registrar_geracao(plano_id, n_blocos, &planejamento.resumo) {
                log::warn!("nao foi possivel registrar historico do plano {}: {}", plano_id, e);
            }
            log::info!("plano {}: {} blocos salvos ({} chamadas)", plano_id, n_blocos, aplicadas);
            HttpResponse::Ok().json(json!({
                "status": "ok",
                "chamadas": aplicadas,
                "submissao": submissao,
                "resumo": planejamento.resumo
            }))
        }
        Err(falha) => {
            log::error!("plano {}: {}", plano_id, falha);
            HttpResponse::InternalServerError().json(json!({
                "error": format!("Erro ao salvar planejamento: {}", falha.erro)
            }))
        }
    }
}
