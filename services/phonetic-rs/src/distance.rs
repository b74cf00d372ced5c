//! Weighted edit distance between normalized words.

use ndarray::Array2;

use crate::cost::{CostModel, PhoneticCosts};

/// Phonetic edit distance between two normalized words.
///
/// Zero iff the words are identical; never negative.
pub fn word_distance(w1: &str, w2: &str) -> f64 {
    weighted_distance(w1, w2, &PhoneticCosts)
}

/// Minimum-cost alignment of `w1` and `w2` under an arbitrary cost model.
///
/// Rows walk `w2`, columns walk `w1`. The first row and column accumulate
/// deletion costs, since those depend on the letter and its neighbours.
pub fn weighted_distance<C: CostModel + ?Sized>(w1: &str, w2: &str, costs: &C) -> f64 {
    let cols: Vec<char> = w1.chars().collect();
    let rows: Vec<char> = w2.chars().collect();
    let (n_cols, n_rows) = (cols.len(), rows.len());

    let mut dp = Array2::<f64>::zeros((n_rows + 1, n_cols + 1));

    for i in 1..=n_rows {
        dp[[i, 0]] = dp[[i - 1, 0]] + costs.deletion_cost(&rows, i - 1);
    }
    for j in 1..=n_cols {
        dp[[0, j]] = dp[[0, j - 1]] + costs.deletion_cost(&cols, j - 1);
    }

    for j in 1..=n_cols {
        for i in 1..=n_rows {
            let delete_row = dp[[i - 1, j]] + costs.deletion_cost(&rows, i - 1);
            let delete_col = dp[[i, j - 1]] + costs.deletion_cost(&cols, j - 1);
            let substitute =
                dp[[i - 1, j - 1]] + costs.substitution_cost(rows[i - 1], cols[j - 1]);

            dp[[i, j]] = delete_row.min(delete_col).min(substitute);
        }
    }

    dp[[n_rows, n_cols]]
}
