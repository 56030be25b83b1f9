// Estruturas de dados principais do planejamento semanal

use serde::{Deserialize, Serialize};

/// Durações possíveis de um bloco, da maior para a menor.
pub const DURACOES_BLOCO: [f64; 3] = [1.5, 1.0, 0.5];

/// Menor fração de hora que o planejador aloca.
pub const PASSO_HORAS: f64 = 0.5;

/// Chaves dos dias usadas no registro do plano (`<dia>_ativo`, `<dia>_horas`).
/// O índice é o `diaSemana`: 0 = domingo ... 6 = sábado.
pub const NOMES_DIAS: [&str; 7] = ["domingo", "segunda", "terca", "quarta", "quinta", "sexta", "sabado"];

/// Disciplina de um plano com os pesos que alimentam o distribuidor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Disciplina {
    pub id: i64,
    #[serde(default)]
    pub titulo: String,
    #[serde(default)]
    pub cor: Option<String>,
    /// Importância 0.0 - 5.0 (passo 0.5).
    #[serde(default)]
    pub importancia: f64,
    /// Conhecimento atual 0.0 - 5.0 (passo 0.5). Menos conhecimento => mais horas.
    #[serde(default)]
    pub conhecimento: f64,
    #[serde(default)]
    pub horas_semanais: f64,
    #[serde(default)]
    pub selecionada: bool,
}

impl Disciplina {
    /// `importancia * (6 - conhecimento)`, entre 0 e 25 para entradas normalizadas.
    /// Nunca negativo, mesmo com valores fora dos sliders.
    pub fn peso(&self) -> f64 {
        (self.importancia * (6.0 - self.conhecimento)).max(0.0)
    }

    /// Aplica a semântica dos sliders: pesos em [0,5] no passo de 0.5 e horas >= 0.
    pub fn normalizada(mut self) -> Self {
        self.importancia = ajustar_slider(self.importancia);
        self.conhecimento = ajustar_slider(self.conhecimento);
        self.horas_semanais = if self.horas_semanais.is_finite() { self.horas_semanais.max(0.0) } else { 0.0 };
        self
    }

    /// Tem horas para distribuir em blocos?
    pub fn financiavel(&self) -> bool {
        self.selecionada && self.horas_semanais > 0.0
    }
}

fn ajustar_slider(v: f64) -> f64 {
    if !v.is_finite() {
        return 0.0;
    }
    (v.clamp(0.0, 5.0) / PASSO_HORAS).round() * PASSO_HORAS
}

/// Disponibilidade de um dia da semana.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaEstudo {
    pub dia_semana: u8,
    #[serde(default)]
    pub horas_planejadas: f64,
    #[serde(default)]
    pub ativo: bool,
}

impl DiaEstudo {
    pub fn new(dia_semana: u8, horas_planejadas: f64) -> Self {
        let horas = if horas_planejadas.is_finite() { horas_planejadas.max(0.0) } else { 0.0 };
        DiaEstudo { dia_semana, horas_planejadas: horas, ativo: horas > 0.0 }
    }

    /// Recalcula `ativo` a partir das horas (o cliente pode enviar ambos inconsistentes).
    pub fn normalizado(self) -> Self {
        DiaEstudo::new(self.dia_semana, self.horas_planejadas)
    }

    pub fn disponivel(&self) -> bool {
        self.ativo && self.horas_planejadas > 0.0
    }

    pub fn nome(&self) -> &'static str {
        NOMES_DIAS.get(self.dia_semana as usize).copied().unwrap_or("desconhecido")
    }
}

/// Bloco de estudo agendado. `id` só existe para blocos já persistidos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlocoEstudo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub dia_semana: u8,
    pub ordem: u32,
    pub total_horas_planejadas: f64,
    pub disciplina_id: i64,
}

/// Registro do plano com as flags de disponibilidade por dia.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanoEstudo {
    pub id: i64,
    #[serde(default)]
    pub nome: String,
    /// Índice = `diaSemana`.
    #[serde(default)]
    pub dias_ativos: [bool; 7],
    #[serde(default)]
    pub horas_por_dia: [f64; 7],
    #[serde(default)]
    pub atualizado_em: Option<String>,
}

impl PlanoEstudo {
    pub fn new(id: i64, nome: &str) -> Self {
        PlanoEstudo { id, nome: nome.to_string(), dias_ativos: [false; 7], horas_por_dia: [0.0; 7], atualizado_em: None }
    }
}

/// Estado do formulário de planejamento: o que o cliente edita e reenvia.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstadoPlanejamento {
    #[serde(default)]
    pub disciplinas: Vec<Disciplina>,
    #[serde(default)]
    pub dias: Vec<DiaEstudo>,
    /// Blocos persistidos anteriormente (serão substituídos no envio).
    #[serde(default)]
    pub blocos_existentes: Vec<BlocoEstudo>,
}

impl EstadoPlanejamento {
    pub fn normalizado(self) -> Self {
        EstadoPlanejamento {
            disciplinas: self.disciplinas.into_iter().map(Disciplina::normalizada).collect(),
            dias: self.dias.into_iter().map(DiaEstudo::normalizado).collect(),
            blocos_existentes: self.blocos_existentes,
        }
    }
}
