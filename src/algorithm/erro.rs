use thiserror::Error;

/// Falhas de validação que impedem gerar (e enviar) um planejamento.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanejamentoError {
    #[error("Configure pelo menos um dia de estudo")]
    SemDiasAtivos,

    #[error("Configure as horas semanais das disciplinas")]
    SemHorasDisciplinas,
}
