use rusqlite::Connection;
use std::fs;
use std::path::Path;

use crate::storage::StoreError;

/// Abre (ou cria) o banco SQLite e garante as tabelas. `:memory:` abre um
/// banco efêmero, útil para testes.
pub fn open_connection(path: &Path) -> Result<Connection, StoreError> {
    let conn = if path.as_os_str() == ":memory:" {
        Connection::open_in_memory()?
    } else {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        Connection::open(path)?
    };
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS plano_estudo (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nome TEXT NOT NULL,
            dias_ativos TEXT NOT NULL,
            horas_por_dia TEXT NOT NULL,
            atualizado_em TEXT
        );

        CREATE TABLE IF NOT EXISTS disciplina (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            plano_id INTEGER NOT NULL REFERENCES plano_estudo(id),
            titulo TEXT NOT NULL,
            cor TEXT,
            importancia REAL NOT NULL DEFAULT 0,
            conhecimento REAL NOT NULL DEFAULT 0,
            horas_semanais REAL NOT NULL DEFAULT 0,
            selecionada INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS bloco_estudo (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            plano_id INTEGER NOT NULL REFERENCES plano_estudo(id),
            dia_semana INTEGER NOT NULL,
            ordem INTEGER NOT NULL,
            total_horas_planejadas REAL NOT NULL,
            disciplina_id INTEGER NOT NULL REFERENCES disciplina(id)
        );

        CREATE TABLE IF NOT EXISTS historico_geracao (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            ts TEXT NOT NULL,
            plano_id INTEGER NOT NULL,
            blocos INTEGER NOT NULL,
            horas_alocadas REAL NOT NULL,
            horas_nao_alocadas REAL NOT NULL
        );",
    )?;
    Ok(())
}
