//! Gerador de blocos de estudo.
//!
//! Heurística gulosa em duas fases:
//! - Fase A (variedade): para cada dia ativo, na ordem dos dias, coloca blocos
//!   preferindo disciplinas que ainda não aparecem no dia; se nenhuma serve,
//!   aceita repetir.
//! - Fase B (varredura): preenche folgas que sobraram quando os orçamentos das
//!   disciplinas acabaram de forma desigual.
//!
//! Sempre tenta a duração mais longa primeiro. Não é um empacotamento ótimo:
//! pode sobrar menos de 0.5h por dia ou horas de disciplina sem alocação.

use std::collections::HashSet;

use crate::algorithm::erro::PlanejamentoError;
use crate::models::{BlocoEstudo, DiaEstudo, Disciplina, DURACOES_BLOCO, PASSO_HORAS};

/// Iterações por dia ativo na fase A.
const ITERACOES_POR_DIA: usize = 100;
/// Passadas externas da fase B.
const MAX_VARREDURAS: usize = 50;

/// Disciplina na fila de prioridade com o orçamento que ainda resta (somado
/// entre todos os dias, não por dia).
#[derive(Debug)]
struct Candidata {
    id: i64,
    orcamento: f64,
}

/// Ordena as disciplinas financiáveis por peso decrescente. `sort_by` é
/// estável, então empates mantêm a ordem original.
pub fn ordenar_por_prioridade(disciplinas: &[Disciplina]) -> Vec<&Disciplina> {
    let mut fila: Vec<&Disciplina> = disciplinas.iter().filter(|d| d.financiavel()).collect();
    fila.sort_by(|a, b| b.peso().partial_cmp(&a.peso()).unwrap_or(std::cmp::Ordering::Equal));
    fila
}

fn horas_usadas(blocos: &[BlocoEstudo], dia_semana: u8) -> f64 {
    blocos.iter().filter(|b| b.dia_semana == dia_semana).map(|b| b.total_horas_planejadas).sum()
}

fn proxima_ordem(blocos: &[BlocoEstudo], dia_semana: u8) -> u32 {
    blocos.iter().filter(|b| b.dia_semana == dia_semana).count() as u32 + 1
}

/// Maior duração que cabe tanto na folga do dia quanto no orçamento.
fn maior_duracao(restante_dia: f64, orcamento: f64) -> Option<f64> {
    DURACOES_BLOCO.iter().copied().find(|&d| d <= restante_dia && d <= orcamento)
}

/// Primeira candidata (em ordem de prioridade) que admite algum bloco.
/// Com `excluir` informado, pula as disciplinas que já estão no dia.
fn escolher(fila: &[Candidata], restante_dia: f64, excluir: Option<&HashSet<i64>>) -> Option<(usize, f64)> {
    for (idx, c) in fila.iter().enumerate() {
        if c.orcamento <= 0.0 {
            continue;
        }
        if let Some(ja_no_dia) = excluir {
            if ja_no_dia.contains(&c.id) {
                continue;
            }
        }
        if let Some(dur) = maior_duracao(restante_dia, c.orcamento) {
            return Some((idx, dur));
        }
    }
    None
}

fn colocar(blocos: &mut Vec<BlocoEstudo>, fila: &mut [Candidata], dia_semana: u8, idx: usize, duracao: f64) {
    let ordem = proxima_ordem(blocos, dia_semana);
    blocos.push(BlocoEstudo {
        id: None,
        dia_semana,
        ordem,
        total_horas_planejadas: duracao,
        disciplina_id: fila[idx].id,
    });
    fila[idx].orcamento -= duracao;
}

/// Gera os blocos da semana a partir das metas `horas_semanais` e das horas
/// de cada dia. Determinística para entradas iguais.
pub fn gerar_blocos_de_estudo(disciplinas: &[Disciplina], dias: &[DiaEstudo]) -> Result<Vec<BlocoEstudo>, PlanejamentoError> {
    let dias_ativos: Vec<&DiaEstudo> = dias.iter().filter(|d| d.disponivel()).collect();
    if dias_ativos.is_empty() {
        return Err(PlanejamentoError::SemDiasAtivos);
    }

    let mut fila: Vec<Candidata> = ordenar_por_prioridade(disciplinas)
        .into_iter()
        .map(|d| Candidata { id: d.id, orcamento: d.horas_semanais })
        .collect();
    if fila.is_empty() {
        return Err(PlanejamentoError::SemHorasDisciplinas);
    }

    let mut blocos: Vec<BlocoEstudo> = Vec::new();

    // Fase A
    let limite = dias_ativos.len() * ITERACOES_POR_DIA;
    let mut iteracoes = 0usize;
    'dias: for dia in dias_ativos.iter() {
        loop {
            if iteracoes >= limite {
                log::warn!("fase A interrompida apos {} iteracoes", iteracoes);
                break 'dias;
            }
            iteracoes += 1;

            let restante = dia.horas_planejadas - horas_usadas(&blocos, dia.dia_semana);
            if restante < PASSO_HORAS {
                break;
            }

            let ja_no_dia: HashSet<i64> = blocos
                .iter()
                .filter(|b| b.dia_semana == dia.dia_semana)
                .map(|b| b.disciplina_id)
                .collect();

            let escolha = escolher(&fila, restante, Some(&ja_no_dia)).or_else(|| escolher(&fila, restante, None));
            match escolha {
                Some((idx, dur)) => colocar(&mut blocos, &mut fila, dia.dia_semana, idx, dur),
                None => break,
            }
        }
    }

    // Fase B: uma colocação por passada, recomeçando do primeiro dia
    for _ in 0..MAX_VARREDURAS {
        let mut colocou = false;
        for dia in dias_ativos.iter() {
            let restante = dia.horas_planejadas - horas_usadas(&blocos, dia.dia_semana);
            if restante < PASSO_HORAS {
                continue;
            }
            if let Some((idx, dur)) = escolher(&fila, restante, None) {
                colocar(&mut blocos, &mut fila, dia.dia_semana, idx, dur);
                colocou = true;
                break;
            }
        }
        if !colocou {
            break;
        }
    }

    log::debug!("gerados {} blocos para {} dias ativos", blocos.len(), dias_ativos.len());
    Ok(blocos)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disc(id: i64, importancia: f64, conhecimento: f64, horas: f64) -> Disciplina {
        Disciplina { id, titulo: String::new(), cor: None, importancia, conhecimento, horas_semanais: horas, selecionada: true }
    }

    #[test]
    fn dia_unico_preenche_com_maior_bloco_primeiro() {
        let blocos = gerar_blocos_de_estudo(&[disc(1, 3.0, 3.0, 5.0)], &[DiaEstudo::new(2, 2.0)]).unwrap();
        let duracoes: Vec<f64> = blocos.iter().map(|b| b.total_horas_planejadas).collect();
        assert_eq!(duracoes, vec![1.5, 0.5]);
        assert_eq!(blocos.iter().map(|b| b.ordem).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn variedade_antes_de_repetir() {
        // Dia de 3h: a primeira disciplina recebe 1.5h e a segunda entra antes de repetir.
        let ds = vec![disc(1, 5.0, 1.0, 10.0), disc(2, 2.0, 4.0, 10.0)];
        let blocos = gerar_blocos_de_estudo(&ds, &[DiaEstudo::new(1, 3.0)]).unwrap();
        assert_eq!(blocos.len(), 2);
        assert_eq!(blocos[0].disciplina_id, 1);
        assert_eq!(blocos[1].disciplina_id, 2);
    }

    #[test]
    fn prioridade_estavel_em_empates() {
        let ds = vec![disc(7, 2.0, 2.0, 1.0), disc(3, 2.0, 2.0, 1.0)];
        let fila = ordenar_por_prioridade(&ds);
        assert_eq!(fila.iter().map(|d| d.id).collect::<Vec<_>>(), vec![7, 3]);
    }

    #[test]
    fn erros_de_validacao() {
        assert_eq!(
            gerar_blocos_de_estudo(&[disc(1, 1.0, 1.0, 2.0)], &[DiaEstudo::new(0, 0.0)]),
            Err(PlanejamentoError::SemDiasAtivos)
        );
        let mut nao_sel = disc(1, 1.0, 1.0, 2.0);
        nao_sel.selecionada = false;
        assert_eq!(
            gerar_blocos_de_estudo(&[nao_sel, disc(2, 1.0, 1.0, 0.0)], &[DiaEstudo::new(0, 2.0)]),
            Err(PlanejamentoError::SemHorasDisciplinas)
        );
    }

    #[test]
    fn orcamento_menor_que_a_capacidade_deixa_folga() {
        let blocos = gerar_blocos_de_estudo(&[disc(1, 1.0, 1.0, 1.0)], &[DiaEstudo::new(1, 4.0), DiaEstudo::new(2, 4.0)]).unwrap();
        assert_eq!(blocos.len(), 1);
        assert_eq!(blocos[0].total_horas_planejadas, 1.0);
        assert_eq!(blocos[0].dia_semana, 1);
    }
}
