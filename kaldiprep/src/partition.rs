use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::error::{Error, Result};

/// Split `records` into `(train, test)`.
///
/// `round(train_fraction * len)` records are drawn uniformly without
/// replacement from an RNG seeded with `seed`; the rest, in input order,
/// form the test set. Same input and seed always give the same split.
pub fn partition<T: Clone>(
    records: &[T],
    train_fraction: f64,
    seed: u64,
) -> Result<(Vec<T>, Vec<T>)> {
    if records.is_empty() {
        return Err(Error::EmptyCatalogue);
    }
    if !train_fraction.is_finite() || !(0.0..=1.0).contains(&train_fraction) {
        return Err(Error::InvalidOption(format!(
            "train fraction must be between 0.0 and 1.0, got {train_fraction}"
        )));
    }

    let total = records.len();
    let train_len = ((total as f64) * train_fraction).round_ties_even() as usize;
    let train_len = train_len.min(total);

    let mut rng = StdRng::seed_from_u64(seed);
    let picked = rand::seq::index::sample(&mut rng, total, train_len);

    let mut in_train = vec![false; total];
    let mut train = Vec::with_capacity(train_len);
    for i in picked.iter() {
        in_train[i] = true;
        train.push(records[i].clone());
    }

    let test: Vec<T> = records
        .iter()
        .zip(&in_train)
        .filter(|(_, selected)| !**selected)
        .map(|(r, _)| r.clone())
        .collect();

    debug!(train = train.len(), test = test.len(), seed, "partitioned records");

    Ok((train, test))
}
