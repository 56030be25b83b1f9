pub mod db;
pub mod entidade;
pub mod historico;

use chrono::Utc;
use rusqlite::{params, Connection};
use serde_json::{Map, Value};
use std::path::Path;
use thiserror::Error;

use crate::algorithm::semear_estado;
use crate::api_json::{aplicar_dados_plano, ChamadaRest, DisciplinaAtualizada};
use crate::models::{BlocoEstudo, Disciplina, EstadoPlanejamento, PlanoEstudo};
use entidade::{buscar_por_id, listar_por_plano, remover};

pub use historico::RegistroGeracao;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize column: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{entidade} {id} não encontrado")]
    NaoEncontrado { entidade: &'static str, id: i64 },
}

/// Falha no meio do envio. As chamadas anteriores já foram gravadas e não
/// são desfeitas.
#[derive(Debug, Error)]
#[error("falha ao salvar o planejamento ({aplicadas} de {total} chamadas aplicadas): {erro}")]
pub struct FalhaEnvio {
    pub aplicadas: usize,
    pub total: usize,
    #[source]
    pub erro: StoreError,
}

/// Colaborador de persistência do planejamento (planos, disciplinas e blocos).
pub struct PlanoStore {
    conn: Connection,
}

impl std::fmt::Debug for PlanoStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PlanoStore(..)")
    }
}

impl PlanoStore {
    pub fn abrir(path: &Path) -> Result<Self, StoreError> {
        Ok(PlanoStore { conn: db::open_connection(path)? })
    }

    pub fn em_memoria() -> Result<Self, StoreError> {
        Self::abrir(Path::new(":memory:"))
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn criar_plano(&self, nome: &str) -> Result<PlanoEstudo, StoreError> {
        let plano = PlanoEstudo::new(0, nome);
        self.conn.execute(
            "INSERT INTO plano_estudo (nome, dias_ativos, horas_por_dia, atualizado_em) VALUES (?1, ?2, ?3, ?4)",
            params![
                plano.nome,
                serde_json::to_string(&plano.dias_ativos)?,
                serde_json::to_string(&plano.horas_por_dia)?,
                Utc::now().to_rfc3339(),
            ],
        )?;
        self.plano(self.conn.last_insert_rowid())
    }

    pub fn plano(&self, id: i64) -> Result<PlanoEstudo, StoreError> {
        buscar_por_id(&self.conn, id)
    }

    /// PUT /planoEstudo/:id com `dadosPlano`.
    pub fn atualizar_plano(&self, id: i64, dados: &Map<String, Value>) -> Result<PlanoEstudo, StoreError> {
        let mut plano = self.plano(id)?;
        aplicar_dados_plano(&mut plano, dados);
        self.conn.execute(
            "UPDATE plano_estudo SET dias_ativos = ?1, horas_por_dia = ?2, atualizado_em = ?3 WHERE id = ?4",
            params![
                serde_json::to_string(&plano.dias_ativos)?,
                serde_json::to_string(&plano.horas_por_dia)?,
                Utc::now().to_rfc3339(),
                id,
            ],
        )?;
        self.plano(id)
    }

    pub fn criar_disciplina(&self, plano_id: i64, d: &Disciplina) -> Result<Disciplina, StoreError> {
        let d = d.clone().normalizada();
        self.conn.execute(
            "INSERT INTO disciplina (plano_id, titulo, cor, importancia, conhecimento, horas_semanais, selecionada)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![plano_id, d.titulo, d.cor, d.importancia, d.conhecimento, d.horas_semanais, d.selecionada],
        )?;
        buscar_por_id(&self.conn, self.conn.last_insert_rowid())
    }

    pub fn disciplinas(&self, plano_id: i64) -> Result<Vec<Disciplina>, StoreError> {
        listar_por_plano(&self.conn, plano_id)
    }

    /// PUT /disciplina/:id (apenas `horasSemanais` e `selecionada`).
    pub fn atualizar_disciplina(&self, d: &DisciplinaAtualizada) -> Result<(), StoreError> {
        let n = self.conn.execute(
            "UPDATE disciplina SET horas_semanais = ?1, selecionada = ?2 WHERE id = ?3",
            params![d.horas_semanais.max(0.0), d.selecionada, d.id],
        )?;
        if n == 0 {
            return Err(StoreError::NaoEncontrado { entidade: "disciplina", id: d.id });
        }
        Ok(())
    }

    pub fn blocos(&self, plano_id: i64) -> Result<Vec<BlocoEstudo>, StoreError> {
        listar_por_plano(&self.conn, plano_id)
    }

    /// POST /blocoEstudo
    pub fn criar_bloco(&self, plano_id: i64, b: &BlocoEstudo) -> Result<BlocoEstudo, StoreError> {
        self.conn.execute(
            "INSERT INTO bloco_estudo (plano_id, dia_semana, ordem, total_horas_planejadas, disciplina_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![plano_id, b.dia_semana, b.ordem, b.total_horas_planejadas, b.disciplina_id],
        )?;
        Ok(BlocoEstudo { id: Some(self.conn.last_insert_rowid()), ..b.clone() })
    }

    /// DELETE /blocoEstudo/:id
    pub fn remover_bloco(&self, id: i64) -> Result<(), StoreError> {
        remover::<BlocoEstudo>(&self.conn, id)
    }

    /// Estado inicial do formulário para um plano.
    pub fn carregar_estado(&self, plano_id: i64) -> Result<EstadoPlanejamento, StoreError> {
        let plano = self.plano(plano_id)?;
        let disciplinas = self.disciplinas(plano_id)?;
        let blocos = self.blocos(plano_id)?;
        Ok(semear_estado(&plano, disciplinas, &blocos))
    }

    fn executar(&self, chamada: &ChamadaRest) -> Result<(), StoreError> {
        log::debug!("{} {}", chamada.metodo(), chamada.caminho());
        match chamada {
            ChamadaRest::AtualizarPlano { plano_id, dados } => self.atualizar_plano(*plano_id, dados).map(|_| ()),
            ChamadaRest::AtualizarDisciplina { disciplina } => self.atualizar_disciplina(disciplina),
            ChamadaRest::RemoverBloco { bloco_id } => self.remover_bloco(*bloco_id),
            ChamadaRest::CriarBloco { plano_id, bloco } => self.criar_bloco(*plano_id, bloco).map(|_| ()),
        }
    }

    /// Executa o fan-out em três fases: atualizações, remoções e criações.
    /// Dentro de uma fase todas as chamadas são tentadas; se alguma falhar, as
    /// fases seguintes não rodam. Nada é desfeito.
    pub fn aplicar_chamadas(&self, chamadas: &[ChamadaRest]) -> Result<usize, FalhaEnvio> {
        let fase = |c: &ChamadaRest| match c {
            ChamadaRest::AtualizarPlano { .. } | ChamadaRest::AtualizarDisciplina { .. } => 0,
            ChamadaRest::RemoverBloco { .. } => 1,
            ChamadaRest::CriarBloco { .. } => 2,
        };

        let mut aplicadas = 0usize;
        for f in 0..3 {
            let mut primeira_falha: Option<StoreError> = None;
            for c in chamadas.iter().filter(|c| fase(*c) == f) {
                match self.executar(c) {
                    Ok(()) => aplicadas += 1,
                    Err(e) => {
                        log::warn!("{} {} falhou: {}", c.metodo(), c.caminho(), e);
                        if primeira_falha.is_none() {
                            primeira_falha = Some(e);
                        }
                    }
                }
            }
            if let Some(erro) = primeira_falha {
                return Err(FalhaEnvio { aplicadas, total: chamadas.len(), erro });
            }
        }
        Ok(aplicadas)
    }
}
