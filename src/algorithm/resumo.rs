use serde::Serialize;

use crate::models::{BlocoEstudo, DiaEstudo, Disciplina};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumoDia {
    pub dia_semana: u8,
    pub nome: String,
    pub horas_planejadas: f64,
    pub horas_alocadas: f64,
    pub blocos: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumoDisciplina {
    pub disciplina_id: i64,
    pub horas_semanais: f64,
    pub horas_alocadas: f64,
}

/// Quanto da semana o gerador conseguiu preencher. A folga é aceitável
/// (heurística gulosa), mas o cliente costuma exibi-la.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumoPlanejamento {
    pub dias: Vec<ResumoDia>,
    pub disciplinas: Vec<ResumoDisciplina>,
    pub horas_disponiveis: f64,
    pub horas_alocadas: f64,
    pub horas_nao_alocadas: f64,
}

pub fn resumir_planejamento(disciplinas: &[Disciplina], dias: &[DiaEstudo], blocos: &[BlocoEstudo]) -> ResumoPlanejamento {
    let dias_out: Vec<ResumoDia> = dias
        .iter()
        .map(|d| {
            let do_dia = blocos.iter().filter(|b| b.dia_semana == d.dia_semana);
            ResumoDia {
                dia_semana: d.dia_semana,
                nome: d.nome().to_string(),
                horas_planejadas: d.horas_planejadas,
                horas_alocadas: do_dia.clone().map(|b| b.total_horas_planejadas).sum(),
                blocos: do_dia.count(),
            }
        })
        .collect();

    let disciplinas_out: Vec<ResumoDisciplina> = disciplinas
        .iter()
        .filter(|d| d.selecionada)
        .map(|d| ResumoDisciplina {
            disciplina_id: d.id,
            horas_semanais: d.horas_semanais,
            horas_alocadas: blocos.iter().filter(|b| b.disciplina_id == d.id).map(|b| b.total_horas_planejadas).sum(),
        })
        .collect();

    let horas_disponiveis: f64 = dias.iter().map(|d| d.horas_planejadas).sum();
    let horas_alocadas: f64 = blocos.iter().map(|b| b.total_horas_planejadas).sum();

    ResumoPlanejamento {
        dias: dias_out,
        disciplinas: disciplinas_out,
        horas_disponiveis,
        horas_alocadas,
        horas_nao_alocadas: (horas_disponiveis - horas_alocadas).max(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folga_do_dia_unico() {
        let ds = vec![Disciplina { id: 1, titulo: String::new(), cor: None, importancia: 3.0, conhecimento: 3.0, horas_semanais: 5.0, selecionada: true }];
        let dias = vec![DiaEstudo::new(4, 2.0)];
        let blocos = crate::algorithm::gerar_blocos_de_estudo(&ds, &dias).unwrap();
        let r = resumir_planejamento(&ds, &dias, &blocos);
        assert_eq!(r.horas_alocadas, 2.0);
        assert_eq!(r.horas_nao_alocadas, 0.0);
        assert_eq!(r.dias[0].nome, "quinta");
        assert_eq!(r.dias[0].blocos, 2);
        assert_eq!(r.disciplinas[0].horas_alocadas, 2.0);
    }
}
