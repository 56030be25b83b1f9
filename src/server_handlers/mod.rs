pub mod docs;
pub mod persistencia;
pub mod planejamento;

pub use docs::*;
pub use persistencia::*;
pub use planejamento::*;

use actix_web::{web, HttpResponse};
use serde_json::json;
use std::sync::{Mutex, MutexGuard};

use crate::storage::{PlanoStore, StoreError};

pub(crate) fn lock_store(store: &web::Data<Mutex<PlanoStore>>) -> Result<MutexGuard<'_, PlanoStore>, HttpResponse> {
    store.lock().map_err(|e| {
        log::error!("store lock poisoned: {}", e);
        HttpResponse::InternalServerError().json(json!({"error": "store unavailable"}))
    })
}

pub(crate) fn store_error_response(e: &StoreError) -> HttpResponse {
    match e {
        StoreError::NaoEncontrado { .. } => HttpResponse::NotFound().json(json!({"error": e.to_string()})),
        _ => {
            log::error!("store error: {}", e);
            HttpResponse::InternalServerError().json(json!({"error": format!("store error: {}", e)}))
        }
    }
}
