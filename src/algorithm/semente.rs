// Reconstrói o estado do formulário a partir do que já foi persistido.

use std::collections::HashMap;

use crate::models::{BlocoEstudo, DiaEstudo, Disciplina, EstadoPlanejamento, PlanoEstudo};

/// Soma das horas dos blocos por `dia_semana`.
fn horas_por_dia(blocos: &[BlocoEstudo]) -> [f64; 7] {
    let mut out = [0.0; 7];
    for b in blocos {
        if let Some(slot) = out.get_mut(b.dia_semana as usize) {
            *slot += b.total_horas_planejadas;
        }
    }
    out
}

/// Alocação histórica de cada disciplina (soma dos seus blocos).
fn horas_por_disciplina(blocos: &[BlocoEstudo]) -> HashMap<i64, f64> {
    let mut out: HashMap<i64, f64> = HashMap::new();
    for b in blocos {
        *out.entry(b.disciplina_id).or_default() += b.total_horas_planejadas;
    }
    out
}

/// Monta os sete dias e as disciplinas normalizadas.
///
/// Um dia usa as horas do registro do plano quando marcado como ativo com
/// horas; senão, a soma dos blocos existentes naquele dia. Disciplinas sem
/// `horas_semanais` guardadas recebem sua alocação histórica.
pub fn semear_estado(plano: &PlanoEstudo, disciplinas: Vec<Disciplina>, blocos: &[BlocoEstudo]) -> EstadoPlanejamento {
    let dos_blocos = horas_por_dia(blocos);
    let dias: Vec<DiaEstudo> = (0..7u8)
        .map(|i| {
            let idx = i as usize;
            let horas = if plano.dias_ativos[idx] && plano.horas_por_dia[idx] > 0.0 {
                plano.horas_por_dia[idx]
            } else {
                dos_blocos[idx]
            };
            DiaEstudo::new(i, horas)
        })
        .collect();

    let historico = horas_por_disciplina(blocos);
    let disciplinas = disciplinas
        .into_iter()
        .map(|d| {
            let mut d = d.normalizada();
            if d.horas_semanais <= 0.0 {
                if let Some(h) = historico.get(&d.id) {
                    d.horas_semanais = *h;
                }
            }
            d
        })
        .collect();

    EstadoPlanejamento { disciplinas, dias, blocos_existentes: blocos.to_vec() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bloco(id: i64, dia: u8, ordem: u32, horas: f64, disc: i64) -> BlocoEstudo {
        BlocoEstudo { id: Some(id), dia_semana: dia, ordem, total_horas_planejadas: horas, disciplina_id: disc }
    }

    #[test]
    fn agrupa_blocos_por_dia_e_disciplina() {
        let mut plano = PlanoEstudo::new(1, "OAB");
        plano.dias_ativos[1] = true;
        plano.horas_por_dia[1] = 3.0;
        let blocos = vec![bloco(10, 1, 1, 1.5, 5), bloco(11, 3, 1, 1.0, 5), bloco(12, 3, 2, 0.5, 6)];
        let ds = vec![
            Disciplina { id: 5, titulo: "Civil".into(), cor: None, importancia: 4.0, conhecimento: 2.0, horas_semanais: 0.0, selecionada: true },
            Disciplina { id: 6, titulo: "Penal".into(), cor: None, importancia: 3.0, conhecimento: 2.0, horas_semanais: 4.0, selecionada: true },
        ];

        let estado = semear_estado(&plano, ds, &blocos);
        assert_eq!(estado.dias.len(), 7);
        // registro do plano prevalece
        assert_eq!(estado.dias[1].horas_planejadas, 3.0);
        // sem registro => soma dos blocos
        assert_eq!(estado.dias[3].horas_planejadas, 1.5);
        assert!(estado.dias[3].ativo);
        assert!(!estado.dias[0].ativo);

        assert_eq!(estado.disciplinas[0].horas_semanais, 2.5);
        assert_eq!(estado.disciplinas[1].horas_semanais, 4.0);
        assert_eq!(estado.blocos_existentes.len(), 3);
    }
}
