//! Distribuidor de horas semanais.
//!
//! Converte o par (importância, conhecimento) de cada disciplina selecionada
//! e o total de horas disponíveis na semana numa meta de `horas_semanais`,
//! proporcional ao peso e arredondada para meia hora.

use crate::models::{DiaEstudo, Disciplina, PASSO_HORAS};

/// Soma das horas planejadas de todos os dias.
pub fn total_horas_disponiveis(dias: &[DiaEstudo]) -> f64 {
    dias.iter().map(|d| d.horas_planejadas).sum()
}

/// Arredonda para o múltiplo de 0.5 mais próximo.
pub fn arredondar_meia_hora(horas: f64) -> f64 {
    (horas / PASSO_HORAS).round() * PASSO_HORAS
}

/// Calcula as metas sem tocar nas disciplinas. Devolve `None` quando não há
/// horas disponíveis ou nenhum peso positivo entre as selecionadas: nesse caso
/// o chamador mantém os valores atuais.
pub fn calcular_horas_semanais(disciplinas: &[Disciplina], dias: &[DiaEstudo]) -> Option<Vec<f64>> {
    let total = total_horas_disponiveis(dias);
    if total <= 0.0 {
        return None;
    }

    let peso_total: f64 = disciplinas.iter().filter(|d| d.selecionada).map(Disciplina::peso).sum();
    if peso_total <= 0.0 {
        return None;
    }

    let metas = disciplinas
        .iter()
        .map(|d| {
            if d.selecionada {
                arredondar_meia_hora(d.peso() / peso_total * total)
            } else {
                0.0
            }
        })
        .collect();
    Some(metas)
}

/// Recalcula `horas_semanais` in place. Retorna `false` se nada mudou por
/// causa das guardas de divisão por zero.
pub fn distribuir_horas_semanais(disciplinas: &mut [Disciplina], dias: &[DiaEstudo]) -> bool {
    match calcular_horas_semanais(disciplinas, dias) {
        Some(metas) => {
            for (d, horas) in disciplinas.iter_mut().zip(metas) {
                d.horas_semanais = horas;
            }
            true
        }
        None => {
            log::debug!("distribuicao ignorada: sem horas disponiveis ou pesos nulos");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disc(id: i64, importancia: f64, conhecimento: f64, selecionada: bool) -> Disciplina {
        Disciplina { id, titulo: format!("D{}", id), cor: None, importancia, conhecimento, horas_semanais: 0.0, selecionada }
    }

    #[test]
    fn exemplo_dois_pesos() {
        let mut ds = vec![disc(1, 5.0, 1.0, true), disc(2, 2.0, 4.0, true)];
        let dias = vec![DiaEstudo::new(1, 4.0), DiaEstudo::new(3, 6.0)];
        assert!(distribuir_horas_semanais(&mut ds, &dias));
        assert_eq!(ds[0].horas_semanais, 8.5);
        assert_eq!(ds[1].horas_semanais, 1.5);
    }

    #[test]
    fn nao_selecionada_fica_com_zero() {
        let mut ds = vec![disc(1, 3.0, 3.0, true), disc(2, 5.0, 0.0, false)];
        ds[1].horas_semanais = 4.0;
        distribuir_horas_semanais(&mut ds, &[DiaEstudo::new(2, 5.0)]);
        assert_eq!(ds[0].horas_semanais, 5.0);
        assert_eq!(ds[1].horas_semanais, 0.0);
    }

    #[test]
    fn guardas_mantem_valores() {
        let mut ds = vec![disc(1, 3.0, 3.0, true)];
        ds[0].horas_semanais = 7.0;
        assert!(!distribuir_horas_semanais(&mut ds, &[DiaEstudo::new(1, 0.0)]));
        assert_eq!(ds[0].horas_semanais, 7.0);

        // importância zero => peso total zero
        let mut sem_peso = vec![disc(1, 0.0, 2.0, true)];
        sem_peso[0].horas_semanais = 2.0;
        assert!(!distribuir_horas_semanais(&mut sem_peso, &[DiaEstudo::new(1, 3.0)]));
        assert_eq!(sem_peso[0].horas_semanais, 2.0);
    }

    #[test]
    fn conhecimento_acima_da_escala_nao_gera_horas_negativas() {
        let mut ds = vec![disc(1, 3.0, 7.0, true), disc(2, 3.0, 2.0, true)];
        assert!(distribuir_horas_semanais(&mut ds, &[DiaEstudo::new(1, 6.0)]));
        assert_eq!(ds[0].horas_semanais, 0.0);
        assert_eq!(ds[1].horas_semanais, 6.0);
    }

    #[test]
    fn idempotente() {
        let mut ds = vec![disc(1, 4.0, 2.0, true), disc(2, 3.5, 1.5, true), disc(3, 1.0, 5.0, true)];
        let dias = vec![DiaEstudo::new(1, 3.0), DiaEstudo::new(2, 2.5)];
        distribuir_horas_semanais(&mut ds, &dias);
        let primeira: Vec<f64> = ds.iter().map(|d| d.horas_semanais).collect();
        distribuir_horas_semanais(&mut ds, &dias);
        let segunda: Vec<f64> = ds.iter().map(|d| d.horas_semanais).collect();
        assert_eq!(primeira, segunda);
    }
}
