//! Conclusion with top and bottom precinct rankings.

use super::{write_heading, write_table};
use cs_common::{Observation, Rankings};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

const CONCLUSION: &str = "Verificou-se uma grande dispersão de dados, dessa forma pode-se \
afirmar que não há um padrão no número de recuperação de veículos nas diferentes CISPS. \
Sendo assim, observa-se delegacias que tiveram ocorrências de recuperação muito mais \
expressivas do que outras, conforme abaixo:";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingsSection {
    pub n: usize,
    pub top: Vec<Observation>,
    pub bottom: Vec<Observation>,
}

impl RankingsSection {
    pub fn from_rankings(rankings: &Rankings) -> Self {
        Self {
            n: rankings.n,
            top: rankings.top.clone(),
            bottom: rankings.bottom.clone(),
        }
    }

    pub fn write_text(&self, out: &mut String) {
        write_heading(out, "CONCLUSÃO DA ANÁLISE", 20);
        let _ = writeln!(out, "{}", CONCLUSION);

        write_heading(
            out,
            &format!(
                "TOP {} DELEGACIAS COM MAIOR ÍNDICE DE RECUPERAÇÃO DE VEÍCULOS",
                self.n
            ),
            60,
        );
        if self.top.is_empty() {
            let _ = writeln!(out, "Nenhuma delegacia acima do limite superior.");
        } else {
            write_table(out, &self.top);
        }

        write_heading(
            out,
            &format!(
                "TOP {} DELEGACIAS COM MENOR ÍNDICE DE RECUPERAÇÃO DE VEÍCULOS",
                self.n
            ),
            60,
        );
        write_table(out, &self.bottom);
    }
}
