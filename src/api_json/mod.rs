use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::models::{BlocoEstudo, DiaEstudo, Disciplina, EstadoPlanejamento, PlanoEstudo, NOMES_DIAS};

/// Parâmetros de entrada do planejamento
///
/// # Estrutura do JSON esperado:
/// ```json
/// {
///   "disciplinas": [
///     { "id": 1, "titulo": "Direito Civil", "cor": "#3b82f6",
///       "importancia": 5, "conhecimento": 1, "horasSemanais": 0, "selecionada": true }
///   ],
///   "dias": [
///     { "diaSemana": 1, "horasPlanejadas": 3, "ativo": true,
///       "blocos": [ { "id": 10, "disciplinaId": 1, "totalHorasPlanejadas": 1.5, "ordem": 1 } ] }
///   ]
/// }
/// ```
///
/// Os blocos aninhados em cada dia são os já persistidos; viram
/// `blocos_existentes` do estado.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanejamentoInput {
    #[serde(default)]
    pub disciplinas: Vec<Disciplina>,
    #[serde(default)]
    pub dias: Vec<DiaInput>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaInput {
    pub dia_semana: u8,
    #[serde(default)]
    pub horas_planejadas: f64,
    #[serde(default)]
    pub ativo: bool,
    #[serde(default)]
    pub blocos: Vec<BlocoInput>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlocoInput {
    #[serde(default)]
    pub id: Option<i64>,
    pub disciplina_id: i64,
    pub total_horas_planejadas: f64,
    #[serde(default)]
    pub ordem: u32,
}

impl PlanejamentoInput {
    pub fn into_estado(self) -> EstadoPlanejamento {
        let mut dias = Vec::with_capacity(self.dias.len());
        let mut blocos_existentes = Vec::new();
        for d in self.dias.into_iter() {
            for b in d.blocos.into_iter() {
                blocos_existentes.push(BlocoEstudo {
                    id: b.id,
                    dia_semana: d.dia_semana,
                    ordem: b.ordem,
                    total_horas_planejadas: b.total_horas_planejadas,
                    disciplina_id: b.disciplina_id,
                });
            }
            dias.push(DiaEstudo { dia_semana: d.dia_semana, horas_planejadas: d.horas_planejadas, ativo: d.ativo });
        }
        EstadoPlanejamento { disciplinas: self.disciplinas, dias, blocos_existentes }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("invalid JSON body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("diaSemana fora do intervalo 0-6: {0}")]
    DiaInvalido(u8),

    #[error("diaSemana repetido: {0}")]
    DiaRepetido(u8),

    #[error("disciplina repetida: {0}")]
    DisciplinaRepetida(i64),

    #[error("disciplina {0} não pertence ao plano")]
    DisciplinaDeOutroPlano(i64),
}

pub fn parse_planejamento_input(json_str: &str) -> Result<EstadoPlanejamento, InputError> {
    let input = serde_json::from_str::<PlanejamentoInput>(json_str)?;
    let estado = input.into_estado();
    validar_dias(&estado.dias)?;
    validar_disciplinas(&estado.disciplinas)?;
    Ok(estado)
}

/// Cada `id` de disciplina aparece uma única vez (o orçamento é por id).
pub fn validar_disciplinas(disciplinas: &[Disciplina]) -> Result<(), InputError> {
    let mut vistos: HashSet<i64> = HashSet::with_capacity(disciplinas.len());
    for d in disciplinas {
        if !vistos.insert(d.id) {
            return Err(InputError::DisciplinaRepetida(d.id));
        }
    }
    Ok(())
}

/// Todas as disciplinas enviadas precisam estar entre as do plano.
pub fn validar_disciplinas_do_plano(disciplinas: &[Disciplina], do_plano: &[Disciplina]) -> Result<(), InputError> {
    let permitidas: HashSet<i64> = do_plano.iter().map(|d| d.id).collect();
    match disciplinas.iter().find(|d| !permitidas.contains(&d.id)) {
        Some(d) => Err(InputError::DisciplinaDeOutroPlano(d.id)),
        None => Ok(()),
    }
}

/// Cada `diaSemana` deve estar em 0-6 e aparecer uma única vez.
pub fn validar_dias(dias: &[DiaEstudo]) -> Result<(), InputError> {
    let mut vistos = [false; 7];
    for d in dias {
        let idx = d.dia_semana as usize;
        if idx >= 7 {
            return Err(InputError::DiaInvalido(d.dia_semana));
        }
        if vistos[idx] {
            return Err(InputError::DiaRepetido(d.dia_semana));
        }
        vistos[idx] = true;
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisciplinaAtualizada {
    pub id: i64,
    pub horas_semanais: f64,
    pub selecionada: bool,
}

/// Payload produzido no envio do formulário.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submissao {
    pub blocos: Vec<BlocoEstudo>,
    /// Chaves `<dia>_ativo` e `<dia>_horas` para os sete dias.
    pub dados_plano: Map<String, Value>,
    pub disciplinas_atualizadas: Vec<DisciplinaAtualizada>,
}

/// Os dias ausentes da lista saem como inativos com 0 horas.
pub fn montar_submissao(dias: &[DiaEstudo], disciplinas: &[Disciplina], blocos: Vec<BlocoEstudo>) -> Submissao {
    let mut dados_plano = Map::new();
    for (i, nome) in NOMES_DIAS.iter().enumerate() {
        let dia = dias.iter().find(|d| d.dia_semana as usize == i);
        let horas = dia.map(|d| d.horas_planejadas).unwrap_or(0.0);
        let ativo = dia.map(|d| d.disponivel()).unwrap_or(false);
        dados_plano.insert(format!("{}_ativo", nome), Value::Bool(ativo));
        dados_plano.insert(format!("{}_horas", nome), serde_json::json!(horas));
    }

    let disciplinas_atualizadas = disciplinas
        .iter()
        .map(|d| DisciplinaAtualizada { id: d.id, horas_semanais: d.horas_semanais, selecionada: d.selecionada })
        .collect();

    // os ids antigos não valem para os blocos novos
    let blocos = blocos.into_iter().map(|b| BlocoEstudo { id: None, ..b }).collect();

    Submissao { blocos, dados_plano, disciplinas_atualizadas }
}

/// Lê de volta `dadosPlano` no registro do plano. Chaves desconhecidas são ignoradas.
pub fn aplicar_dados_plano(plano: &mut PlanoEstudo, dados: &Map<String, Value>) {
    for (i, nome) in NOMES_DIAS.iter().enumerate() {
        if let Some(v) = dados.get(&format!("{}_ativo", nome)).and_then(Value::as_bool) {
            plano.dias_ativos[i] = v;
        }
        if let Some(v) = dados.get(&format!("{}_horas", nome)).and_then(Value::as_f64) {
            plano.horas_por_dia[i] = v.max(0.0);
        }
    }
}

/// Uma chamada REST da persistência. A ordem de `planejar_chamadas` é a ordem
/// de execução.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "acao", rename_all = "camelCase")]
pub enum ChamadaRest {
    #[serde(rename_all = "camelCase")]
    AtualizarPlano { plano_id: i64, dados: Map<String, Value> },
    #[serde(rename_all = "camelCase")]
    AtualizarDisciplina { disciplina: DisciplinaAtualizada },
    #[serde(rename_all = "camelCase")]
    RemoverBloco { bloco_id: i64 },
    #[serde(rename_all = "camelCase")]
    CriarBloco { plano_id: i64, bloco: BlocoEstudo },
}

impl ChamadaRest {
    pub fn metodo(&self) -> &'static str {
        match self {
            ChamadaRest::AtualizarPlano { .. } | ChamadaRest::AtualizarDisciplina { .. } => "PUT",
            ChamadaRest::RemoverBloco { .. } => "DELETE",
            ChamadaRest::CriarBloco { .. } => "POST",
        }
    }

    pub fn caminho(&self) -> String {
        match self {
            ChamadaRest::AtualizarPlano { plano_id, .. } => format!("/planoEstudo/{}", plano_id),
            ChamadaRest::AtualizarDisciplina { disciplina } => format!("/disciplina/{}", disciplina.id),
            ChamadaRest::RemoverBloco { bloco_id } => format!("/blocoEstudo/{}", bloco_id),
            ChamadaRest::CriarBloco { .. } => "/blocoEstudo".to_string(),
        }
    }
}

/// Expande a submissão nas chamadas de substituição total: atualiza o plano e
/// as disciplinas, apaga todos os blocos antigos e cria os novos. Blocos
/// antigos sem `id` não têm como ser apagados e são ignorados.
pub fn planejar_chamadas(plano_id: i64, submissao: &Submissao, blocos_antigos: &[BlocoEstudo]) -> Vec<ChamadaRest> {
    let mut out = Vec::with_capacity(1 + submissao.disciplinas_atualizadas.len() + blocos_antigos.len() + submissao.blocos.len());
    out.push(ChamadaRest::AtualizarPlano { plano_id, dados: submissao.dados_plano.clone() });
    for d in submissao.disciplinas_atualizadas.iter() {
        out.push(ChamadaRest::AtualizarDisciplina { disciplina: d.clone() });
    }
    for b in blocos_antigos.iter() {
        if let Some(id) = b.id {
            out.push(ChamadaRest::RemoverBloco { bloco_id: id });
        }
    }
    for b in submissao.blocos.iter() {
        out.push(ChamadaRest::CriarBloco { plano_id, bloco: b.clone() });
    }
    out
}
