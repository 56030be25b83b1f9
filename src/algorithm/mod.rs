// Alocador de blocos de estudo: distribuidor de horas + gerador guloso
pub mod blocos;
pub mod distribuicao;
pub mod erro;
pub mod resumo;
pub mod semente;

pub use blocos::{gerar_blocos_de_estudo, ordenar_por_prioridade};
pub use distribuicao::{calcular_horas_semanais, distribuir_horas_semanais, total_horas_disponiveis};
pub use erro::PlanejamentoError;
pub use resumo::{resumir_planejamento, ResumoPlanejamento};
pub use semente::semear_estado;

use serde::Serialize;
use crate::models::{BlocoEstudo, EstadoPlanejamento};

/// Resultado de uma rodada completa: metas recalculadas, blocos e resumo.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Planejamento {
    pub estado: EstadoPlanejamento,
    pub blocos: Vec<BlocoEstudo>,
    pub resumo: ResumoPlanejamento,
}

/// Orquestra o fluxo do formulário: normaliza a entrada, redistribui as horas
/// semanais e gera os blocos.
pub fn planejar(estado: EstadoPlanejamento) -> Result<Planejamento, PlanejamentoError> {
    let mut estado = estado.normalizado();
    distribuir_horas_semanais(&mut estado.disciplinas, &estado.dias);
    let blocos = gerar_blocos_de_estudo(&estado.disciplinas, &estado.dias)?;
    let resumo = resumir_planejamento(&estado.disciplinas, &estado.dias, &blocos);
    Ok(Planejamento { estado, blocos, resumo })
}
