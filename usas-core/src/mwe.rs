//! # Resolução de Índices de MWE (Expressões Multipalavra)
//!
//! O tagger não numera as MWEs: cada token carrega a lista de intervalos
//! `[start, end)` das expressões das quais participa. Para a planilha de
//! correção precisamos de IDs pequenos e estáveis, atribuídos da esquerda
//! para a direita na sentença.
//!
//! ## Algoritmo
//! 1. Para cada token, une seus intervalos no **conjunto de membros** (índices cobertos).
//! 2. Conjuntos com menos de dois membros não são MWE (um token que só aponta para si mesmo).
//! 3. Conjuntos iguais são a mesma MWE, não importa de qual token vieram.
//! 4. Ordena as MWEs distintas pelo menor índice; empates pela lista ordenada de membros.
//! 5. Atribui IDs `1..=K` nessa ordem e marca cada membro com o ID da sua MWE.
//!
//! ## Exemplo
//! "On the river Nile" com intervalos `[[(0,1),(2,4)], [(1,2)], [(0,1),(2,4)], [(0,1),(2,4)]]`
//! → `[{1}, {}, {1}, {1}]` ("the" só aponta para si mesmo).

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TaggingError};

/// Um intervalo semiaberto `[start, end)` de índices de token.
///
/// Serializado como o par `[start, end]`, o mesmo formato que o tagger emite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct MweRange {
    /// Índice do token inicial (inclusivo)
    pub start: usize,
    /// Índice do token final (exclusivo)
    pub end: usize,
}

impl MweRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

impl From<(usize, usize)> for MweRange {
    fn from((start, end): (usize, usize)) -> Self {
        Self { start, end }
    }
}

impl From<MweRange> for (usize, usize) {
    fn from(range: MweRange) -> Self {
        (range.start, range.end)
    }
}

/// Converte os intervalos de MWE de cada token em IDs de grupo por token.
///
/// A saída tem o mesmo comprimento da entrada. Falha com
/// [`TaggingError::InvalidMweRange`] se um intervalo estiver invertido ou
/// passar do fim da sentença.
pub fn resolve_mwe_indexes(ranges_per_token: &[Vec<MweRange>]) -> Result<Vec<BTreeSet<usize>>> {
    let n_tokens = ranges_per_token.len();

    // Conjunto de membros → menor índice (chave BTreeSet já deduplica conjuntos iguais)
    let mut distinct: BTreeMap<BTreeSet<usize>, usize> = BTreeMap::new();

    for (token, ranges) in ranges_per_token.iter().enumerate() {
        let mut members = BTreeSet::new();
        for range in ranges {
            if range.start > range.end || range.end > n_tokens {
                return Err(TaggingError::InvalidMweRange {
                    token,
                    start: range.start,
                    end: range.end,
                    len: n_tokens,
                });
            }
            members.extend(range.start..range.end);
        }
        if members.len() < 2 {
            continue;
        }
        let Some(&min) = members.first() else {
            continue;
        };
        distinct.insert(members, min);
    }

    // Menor índice primeiro; empate pela ordem lexicográfica dos membros
    let mut ordered: Vec<(usize, BTreeSet<usize>)> = distinct
        .into_iter()
        .map(|(members, min)| (min, members))
        .collect();
    ordered.sort();

    let mut indexes = vec![BTreeSet::new(); n_tokens];
    for (id, (_, members)) in (1..).zip(ordered) {
        for member in members {
            indexes[member].insert(id);
        }
    }
    Ok(indexes)
}
