extern crate csv;
extern crate fnv;
extern crate num_cpus;
extern crate rand;
extern crate scoped_pool;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate serde_json;
#[macro_use]
extern crate log;
extern crate thiserror;

use std::time::Instant;

use fnv::FnvHashSet;

pub mod config;
pub mod error;
pub mod evaluation;
pub mod io;
mod matrix;
pub mod recommend;
pub mod split;
pub mod stats;
mod topk;
pub mod types;
pub mod utils;
mod usage_tests;

pub use config::EvaluationConfig;
pub use error::{CfError, Result};
pub use evaluation::EvaluationReport;
pub use matrix::SimilarityMatrix;
pub use recommend::{recommend, recommend_all};
pub use split::{build_histories, build_train_test};
pub use types::{Mode, RankedList, Recommendation, TestSet, TrainSet};

use stats::EntityDictionary;
use types::{DenseVector, SparseMatrix};


/// Computes the similarity matrix between items (`Mode::Item`) or users (`Mode::User`) of the
/// training set. Only pairs sharing at least one user (resp. item) get an entry.
pub fn build_similarity(train: &TrainSet, mode: Mode) -> SimilarityMatrix {

    let start = Instant::now();

    let (dictionary, c, popularity) = match mode {
        Mode::Item => item_cooccurrences(train),
        Mode::User => user_cooccurrences(train),
    };

    let rows = normalize(c, &popularity);
    let similarities = SimilarityMatrix::new(mode, dictionary, rows);

    debug!("{}-mode similarities: {} entities, {} pairs, {}ms",
        mode, similarities.num_entities(), similarities.num_entries(),
        utils::to_millis(start.elapsed()));

    similarities
}

/// Cooccurrence matrix C of items, counting the users who interacted with both items, and the
/// number of interactions N per item.
fn item_cooccurrences(train: &TrainSet) -> (EntityDictionary, SparseMatrix, DenseVector) {

    let dictionary = EntityDictionary::of_entities(train);
    let num_items = dictionary.len();

    let mut c = types::new_sparse_matrix(num_items);
    let mut item_interaction_counts = types::new_dense_vector(num_items);

    let mut history: Vec<u32> = Vec::new();

    for items in train.values() {

        history.clear();
        history.extend(items.iter().filter_map(|item| dictionary.index(item)));

        for &item in history.iter() {
            item_interaction_counts[item as usize] += 1;

            for &other_item in history.iter() {
                if item != other_item {
                    *c[item as usize].entry(other_item).or_insert(0.0) += 1.0;
                }
            }
        }
    }

    (dictionary, c, item_interaction_counts)
}

/// Cooccurrence matrix C of users via an inverted item-to-users index. Each shared item
/// contributes `1 / ln(1 + |users of item|)`, so that popular items say less about the
/// similarity of two users (IIF weighting).
fn user_cooccurrences(train: &TrainSet) -> (EntityDictionary, SparseMatrix, DenseVector) {

    let user_dictionary = EntityDictionary::of_actors(train);
    let item_dictionary = EntityDictionary::of_entities(train);
    let num_users = user_dictionary.len();

    let mut item_users: Vec<FnvHashSet<u32>> =
        vec![FnvHashSet::default(); item_dictionary.len()];

    for (user, items) in train.iter() {
        if let Some(user_idx) = user_dictionary.index(user) {
            for item in items.iter() {
                if let Some(item_idx) = item_dictionary.index(item) {
                    item_users[item_idx as usize].insert(user_idx);
                }
            }
        }
    }

    let mut c = types::new_sparse_matrix(num_users);
    let mut user_interaction_counts = types::new_dense_vector(num_users);

    for users in item_users.iter() {

        let weight = 1.0 / (1.0 + users.len() as f64).ln();

        for &user in users.iter() {

            // Counts start at one on first sight of a user, unlike the item counts
            let count = &mut user_interaction_counts[user as usize];
            if *count == 0 {
                *count = 1;
            }
            *count += 1;

            for &other_user in users.iter() {
                if user != other_user {
                    *c[user as usize].entry(other_user).or_insert(0.0) += weight;
                }
            }
        }
    }

    (user_dictionary, c, user_interaction_counts)
}

/// Cosine normalization W[i][j] = C[i][j] / sqrt(N[i] * N[j]). Both counts are positive for
/// every stored pair, as the pair shares at least one interaction.
fn normalize(mut c: SparseMatrix, counts: &DenseVector) -> SparseMatrix {

    for (entity, row) in c.iter_mut().enumerate() {
        let count = counts[entity] as f64;

        for (other_entity, cooccurrences) in row.iter_mut() {
            let other_count = counts[*other_entity as usize] as f64;
            *cooccurrences /= (count * other_count).sqrt();
        }
    }

    c
}
