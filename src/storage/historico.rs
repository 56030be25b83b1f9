use chrono::Utc;
use rusqlite::params;
use serde::Serialize;

use crate::algorithm::ResumoPlanejamento;
use crate::storage::{PlanoStore, StoreError};

/// Linha do histórico de gerações de um plano.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistroGeracao {
    pub id: i64,
    pub ts: String,
    pub plano_id: i64,
    pub blocos: i64,
    pub horas_alocadas: f64,
    pub horas_nao_alocadas: f64,
}

impl PlanoStore {
    /// Registra uma geração salva com sucesso.
    pub fn registrar_geracao(&self, plano_id: i64, blocos: usize, resumo: &ResumoPlanejamento) -> Result<(), StoreError> {
        let ts = Utc::now().to_rfc3339();
        self.conn().execute(
            "INSERT INTO historico_geracao (ts, plano_id, blocos, horas_alocadas, horas_nao_alocadas)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![ts, plano_id, blocos as i64, resumo.horas_alocadas, resumo.horas_nao_alocadas],
        )?;
        Ok(())
    }

    /// Mais recentes primeiro.
    pub fn listar_historico(&self, plano_id: i64, limit: i64) -> Result<Vec<RegistroGeracao>, StoreError> {
        let mut stmt = self.conn().prepare(
            "SELECT id, ts, plano_id, blocos, horas_alocadas, horas_nao_alocadas
             FROM historico_geracao WHERE plano_id = ?1 ORDER BY id DESC LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![plano_id, limit], |row| {
            Ok(RegistroGeracao {
                id: row.get(0)?,
                ts: row.get(1)?,
                plano_id: row.get(2)?,
                blocos: row.get(3)?,
                horas_alocadas: row.get(4)?,
                horas_nao_alocadas: row.get(5)?,
            })
        })?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }
}
