// Acesso genérico às tabelas: um descritor por entidade em vez de um
// repositório por tabela.

use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::models::{BlocoEstudo, Disciplina, PlanoEstudo};
use crate::storage::StoreError;

pub trait Entidade: Sized {
    const TABELA: &'static str;
    /// Colunas na ordem que `from_row` espera.
    const COLUNAS: &'static str;

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

/// Entidades que têm coluna `plano_id`.
pub trait PertenceAPlano: Entidade {
    const ORDENACAO: &'static str = "id";
}

fn json_col<T: serde::de::DeserializeOwned>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T> {
    let texto: String = row.get(idx)?;
    serde_json::from_str(&texto).map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

impl Entidade for PlanoEstudo {
    const TABELA: &'static str = "plano_estudo";
    const COLUNAS: &'static str = "id, nome, dias_ativos, horas_por_dia, atualizado_em";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(PlanoEstudo {
            id: row.get(0)?,
            nome: row.get(1)?,
            dias_ativos: json_col(row, 2)?,
            horas_por_dia: json_col(row, 3)?,
            atualizado_em: row.get(4)?,
        })
    }
}

impl Entidade for Disciplina {
    const TABELA: &'static str = "disciplina";
    const COLUNAS: &'static str = "id, titulo, cor, importancia, conhecimento, horas_semanais, selecionada";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Disciplina {
            id: row.get(0)?,
            titulo: row.get(1)?,
            cor: row.get(2)?,
            importancia: row.get(3)?,
            conhecimento: row.get(4)?,
            horas_semanais: row.get(5)?,
            selecionada: row.get(6)?,
        })
    }
}

impl PertenceAPlano for Disciplina {}

impl Entidade for BlocoEstudo {
    const TABELA: &'static str = "bloco_estudo";
    const COLUNAS: &'static str = "id, dia_semana, ordem, total_horas_planejadas, disciplina_id";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(BlocoEstudo {
            id: Some(row.get(0)?),
            dia_semana: row.get(1)?,
            ordem: row.get(2)?,
            total_horas_planejadas: row.get(3)?,
            disciplina_id: row.get(4)?,
        })
    }
}

impl PertenceAPlano for BlocoEstudo {
    const ORDENACAO: &'static str = "dia_semana, ordem";
}

pub fn buscar_por_id<E: Entidade>(conn: &Connection, id: i64) -> Result<E, StoreError> {
    let sql = format!("SELECT {} FROM {} WHERE id = ?1", E::COLUNAS, E::TABELA);
    conn.query_row(&sql, params![id], |row| E::from_row(row))
        .optional()?
        .ok_or(StoreError::NaoEncontrado { entidade: E::TABELA, id })
}

pub fn listar_por_plano<E: PertenceAPlano>(conn: &Connection, plano_id: i64) -> Result<Vec<E>, StoreError> {
    let sql = format!("SELECT {} FROM {} WHERE plano_id = ?1 ORDER BY {}", E::COLUNAS, E::TABELA, E::ORDENACAO);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![plano_id], |row| E::from_row(row))?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn remover<E: Entidade>(conn: &Connection, id: i64) -> Result<(), StoreError> {
    let sql = format!("DELETE FROM {} WHERE id = ?1", E::TABELA);
    let n = conn.execute(&sql, params![id])?;
    if n == 0 {
        return Err(StoreError::NaoEncontrado { entidade: E::TABELA, id });
    }
    Ok(())
}
