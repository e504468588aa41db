//! Candidate ranking: tokenize the sample under each candidate dialect,
//! score the resulting tables, and pick a winner deterministically.

use super::candidates::PotentialDialect;
use super::table::Table;
use super::uniformity::{tau_0, tau_1};
use crate::metadata::Quote;

/// Score card for one candidate dialect.
#[derive(Debug, Clone)]
pub struct DialectScore {
    /// The candidate that was scored.
    pub dialect: PotentialDialect,
    /// Combined ranking score; higher is better.
    pub score: f64,
    /// Dispersion score over the field counts.
    #[allow(dead_code)]
    pub tau_0: f64,
    /// Structure score over the field counts.
    #[allow(dead_code)]
    pub tau_1: f64,
    /// Rows parsed under this candidate.
    #[allow(dead_code)]
    pub num_rows: usize,
    /// Modal field count under this candidate.
    pub num_fields: usize,
    /// Whether every row carried the modal field count.
    pub is_uniform: bool,
}

/// A scored candidate together with its parsed table, so the winner's
/// table is not re-parsed for header detection.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub score: DialectScore,
    pub table: Table,
}

/// Combine the two uniformity scores into a single ranking score.
///
/// The base is the geometric mean of `tau_0` and `tau_1`. On top of that,
/// tables that actually split into several fields earn a small bonus and
/// single-field tables are halved: a wrong delimiter that never matches
/// yields a perfectly uniform one-column table, which must not outrank a
/// mildly ragged multi-column parse.
pub fn rank_candidate(tau_0: f64, tau_1: f64, modal_field_count: usize) -> f64 {
    let uniformity = (tau_0 * tau_1).sqrt();
    if modal_field_count <= 1 {
        return uniformity * 0.5;
    }
    let field_bonus = (modal_field_count.min(10) as f64 / 10.0) * 0.2;
    uniformity + field_bonus
}

/// Tokenize and score the sample under every candidate.
pub fn score_candidates(
    data: &[u8],
    candidates: &[PotentialDialect],
    max_rows: usize,
) -> Vec<ScoredCandidate> {
    candidates
        .iter()
        .map(|candidate| {
            let table = Table::parse(data, candidate, max_rows);
            let score = if table.is_empty() {
                DialectScore {
                    dialect: candidate.clone(),
                    score: 0.0,
                    tau_0: 0.0,
                    tau_1: 0.0,
                    num_rows: 0,
                    num_fields: 0,
                    is_uniform: false,
                }
            } else {
                let t0 = tau_0(&table);
                let t1 = tau_1(&table);
                let modal = table.modal_field_count();
                DialectScore {
                    dialect: candidate.clone(),
                    score: rank_candidate(t0, t1, modal),
                    tau_0: t0,
                    tau_1: t1,
                    num_rows: table.num_rows(),
                    num_fields: modal,
                    is_uniform: table.is_uniform(),
                }
            };
            ScoredCandidate { score, table }
        })
        .collect()
}

/// Pick the best-scoring candidate.
///
/// A delimiter that never matches parses the whole sample as one uniform
/// column, which scores deceptively well; single-field candidates are
/// therefore only eligible when nothing splits the sample at all. Ordering
/// is fully deterministic: ranking score first, then the larger modal
/// field count (consistent with the modal-count tie-break), then delimiter
/// priority, then quote priority.
pub fn find_best(candidates: &[ScoredCandidate]) -> Option<&ScoredCandidate> {
    let any_multi_field = candidates
        .iter()
        .any(|c| c.score.score > 0.0 && c.score.num_fields > 1);
    candidates
        .iter()
        .filter(|c| c.score.score > 0.0)
        .filter(|c| !any_multi_field || c.score.num_fields > 1)
        .max_by(|a, b| {
            a.score
                .score
                .partial_cmp(&b.score.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.score.num_fields.cmp(&b.score.num_fields))
                .then_with(|| {
                    delimiter_priority(a.score.dialect.delimiter)
                        .cmp(&delimiter_priority(b.score.dialect.delimiter))
                })
                .then_with(|| {
                    quote_priority(a.score.dialect.quote).cmp(&quote_priority(b.score.dialect.quote))
                })
        })
}

const fn delimiter_priority(delimiter: u8) -> u8 {
    match delimiter {
        b',' => 4,
        b';' => 3,
        b'\t' => 2,
        b'|' => 1,
        _ => 0,
    }
}

const fn quote_priority(quote: Quote) -> u8 {
    match quote {
        Quote::Some(b'"') => 3,
        Quote::Some(b'\'') => 2,
        Quote::None => 1,
        Quote::Some(_) => 0,
    }
}
