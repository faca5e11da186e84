use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{CfError, Result};
use crate::stats;
use crate::types::{TestSet, TrainSet};

/// Checks that a record consists of exactly an actor and an entity.
fn interaction<'a, S: AsRef<str>>(record_index: usize, fields: &'a [S]) -> Result<(&'a str, &'a str)> {
    match fields {
        [actor, entity] => Ok((actor.as_ref(), entity.as_ref())),
        _ => Err(CfError::InputFormat { record: record_index, fields: fields.len() }),
    }
}

/// Splits interaction records into a training and a test set.
///
/// For every record (in input order) we draw a number uniformly from `0..=num_folds` and hold the
/// interaction out for testing if it equals `test_fold`. The first interaction routed to a pool
/// for an actor only registers the actor in that pool with an empty history, later ones are
/// appended. The split is fully determined by `seed`.
pub fn build_train_test<R, S>(
    records: &[R],
    num_folds: u32,
    test_fold: u32,
    seed: u64,
) -> Result<(TrainSet, TestSet)>
    where R: AsRef<[S]>, S: AsRef<str> {

    let mut rng = StdRng::seed_from_u64(seed);

    let mut train = TrainSet::default();
    let mut test = TestSet::default();

    for (record_index, record) in records.iter().enumerate() {

        let (actor, entity) = interaction(record_index, record.as_ref())?;

        let pool = if rng.gen_range(0..=num_folds) == test_fold {
            &mut test
        } else {
            &mut train
        };

        match pool.get_mut(actor) {
            Some(history) => history.push(entity.to_owned()),
            None => {
                pool.insert(actor.to_owned(), Vec::new());
            }
        }
    }

    debug!("Split {} records into {} train interactions of {} actors and {} test interactions \
        of {} actors", records.len(), stats::num_interactions(&train), train.len(),
        stats::num_interactions(&test), test.len());

    Ok((train, test))
}

/// Groups all interaction records into per-actor histories, keeping every interaction.
pub fn build_histories<R, S>(records: &[R]) -> Result<TrainSet>
    where R: AsRef<[S]>, S: AsRef<str> {

    let mut histories = TrainSet::default();

    for (record_index, record) in records.iter().enumerate() {
        let (actor, entity) = interaction(record_index, record.as_ref())?;

        histories.entry(actor.to_owned())
            .or_insert_with(Vec::new)
            .push(entity.to_owned());
    }

    Ok(histories)
}
