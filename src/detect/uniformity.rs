//! Uniformity scores (`tau_0`, `tau_1`) over a table's per-row field
//! counts. Both quantify how consistent the field count is across rows;
//! they are independent signals and are combined only at ranking time.

use super::table::Table;

/// Dispersion score: `tau_0 = 1 / (1 + 2σ)` where σ is the population
/// standard deviation of the field counts. 1 for perfectly uniform counts,
/// decreasing as variance grows; 0 for an empty table.
pub fn tau_0(table: &Table) -> f64 {
    if table.field_counts.is_empty() {
        return 0.0;
    }
    1.0 / (1.0 + 2.0 * population_std_dev(&table.field_counts))
}

/// Structure score: the mean of three components over the field counts.
///
/// - range: 1 when `max == min`, else `1 / (1 + (max − min) / modal)`;
/// - transition: fraction of adjacent row pairs with equal counts, so a
///   file alternating 3/4/3/4 fields scores worse than one with a single
///   block transition even at identical variance;
/// - mode: fraction of rows carrying the modal count.
///
/// Returns a value in `[0, 1]`; 0 for an empty table.
pub fn tau_1(table: &Table) -> f64 {
    let counts = &table.field_counts;
    if counts.is_empty() {
        return 0.0;
    }

    let n = counts.len();
    let modal = table.modal_field_count();
    let min = table.min_field_count();
    let max = table.max_field_count();

    let range_score = if max == min {
        1.0
    } else if modal == 0 {
        0.0
    } else {
        1.0 / (1.0 + (max - min) as f64 / modal as f64)
    };

    let transition_score = if n <= 1 {
        1.0
    } else {
        let transitions = counts.windows(2).filter(|pair| pair[0] != pair[1]).count();
        1.0 - transitions as f64 / (n - 1) as f64
    };

    let modal_freq = counts.iter().filter(|&&count| count == modal).count();
    let mode_score = modal_freq as f64 / n as f64;

    (range_score + transition_score + mode_score) / 3.0
}

fn population_std_dev(values: &[usize]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<usize>() as f64 / n;
    let variance = values
        .iter()
        .map(|&v| {
            let diff = v as f64 - mean;
            diff * diff
        })
        .sum::<f64>()
        / n;
    variance.sqrt()
}
