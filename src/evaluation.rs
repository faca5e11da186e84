use std::time::Instant;

use fnv::FnvHashSet;

use crate::error::{CfError, Result};
use crate::matrix::SimilarityMatrix;
use crate::recommend;
use crate::stats;
use crate::types::{Mode, RankedList, TestSet, TrainSet};
use crate::utils;

/// Offline evaluation results of a recommender configuration.
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct EvaluationReport {
    pub mode: Mode,
    pub num_items_to_recommend: usize,
    pub k: usize,
    pub recall: f64,
    pub precision: f64,
    pub coverage: f64,
    pub popularity: f64,
    pub num_actors_evaluated: usize,
    pub num_items_recommended: usize,
}

type Rankings<'a> = Vec<(&'a str, RankedList)>;

fn rankings<'a>(
    train: &'a TrainSet,
    similarities: &SimilarityMatrix,
    num_items_to_recommend: usize,
    k: usize,
) -> Result<Rankings<'a>> {
    train.keys()
        .map(|actor| {
            recommend::recommend(actor, train, similarities, num_items_to_recommend, k)
                .map(|recommendations| (actor.as_str(), recommendations))
        })
        .collect()
}

fn ratio(numerator: f64, denominator: f64, metric: &'static str, what: &'static str) -> Result<f64> {
    if denominator > 0.0 {
        Ok(numerator / denominator)
    } else {
        Err(CfError::DivisionDegenerate { metric, denominator: what })
    }
}

/// Number of recommended items the actor interacted with in the test set, and the number of
/// test interactions of the actor. `None` for actors without test interactions.
fn hits(actor: &str, recommendations: &RankedList, test: &TestSet) -> Option<(usize, usize)> {
    test.get(actor).map(|held_out| {
        let hits = recommendations.iter()
            .filter(|recommendation| held_out.contains(&recommendation.item))
            .count();

        (hits, held_out.len())
    })
}

fn recall_of(rankings: &Rankings, test: &TestSet) -> Result<f64> {
    let mut num_hits = 0;
    let mut num_held_out = 0;

    for (actor, recommendations) in rankings.iter() {
        if let Some((hits, held_out)) = hits(actor, recommendations, test) {
            num_hits += hits;
            num_held_out += held_out;
        }
    }

    ratio(num_hits as f64, num_held_out as f64, "recall", "the number of test interactions")
}

// The denominator assumes a full list of recommendations for every evaluated actor, even when
// fewer candidates were available.
fn precision_of(rankings: &Rankings, test: &TestSet, num_items_to_recommend: usize) -> Result<f64> {
    let mut num_hits = 0;
    let mut num_slots = 0;

    for (actor, recommendations) in rankings.iter() {
        if let Some((hits, _)) = hits(actor, recommendations, test) {
            num_hits += hits;
            num_slots += num_items_to_recommend;
        }
    }

    ratio(num_hits as f64, num_slots as f64, "precision", "the number of recommendation slots")
}

fn recommended_items<'r>(rankings: &'r Rankings) -> FnvHashSet<&'r str> {
    rankings.iter()
        .flat_map(|(_, recommendations)| recommendations.iter())
        .map(|recommendation| recommendation.item.as_str())
        .collect()
}

fn coverage_of(train: &TrainSet, rankings: &Rankings) -> Result<f64> {
    let all_items: FnvHashSet<&str> = train.values()
        .flat_map(|items| items.iter())
        .map(|item| item.as_str())
        .collect();

    ratio(recommended_items(rankings).len() as f64, all_items.len() as f64,
        "coverage", "the number of training items")
}

fn popularity_of(train: &TrainSet, rankings: &Rankings) -> Result<f64> {
    let item_popularity = stats::entity_popularity(train);

    let mut sum_of_log_popularity = 0.0;
    let mut num_recommendations = 0;

    for (_, recommendations) in rankings.iter() {
        for recommendation in recommendations.iter() {
            let popularity = item_popularity.get(recommendation.item.as_str()).cloned().unwrap_or(0);
            sum_of_log_popularity += (1.0 + popularity as f64).ln();
            num_recommendations += 1;
        }
    }

    ratio(sum_of_log_popularity, num_recommendations as f64,
        "popularity", "the number of recommendations")
}

/// Share of the held out interactions which were recommended, over all actors present in both
/// the training and the test set.
pub fn recall(
    train: &TrainSet,
    test: &TestSet,
    similarities: &SimilarityMatrix,
    num_items_to_recommend: usize,
    k: usize,
) -> Result<f64> {
    let rankings = rankings(train, similarities, num_items_to_recommend, k)?;
    recall_of(&rankings, test)
}

/// Share of recommendation slots which hit a held out interaction. Every evaluated actor is
/// charged `num_items_to_recommend` slots, even if fewer items could be recommended.
pub fn precision(
    train: &TrainSet,
    test: &TestSet,
    similarities: &SimilarityMatrix,
    num_items_to_recommend: usize,
    k: usize,
) -> Result<f64> {
    let rankings = rankings(train, similarities, num_items_to_recommend, k)?;
    precision_of(&rankings, test, num_items_to_recommend)
}

/// Share of the training items which get recommended to at least one actor.
pub fn coverage(
    train: &TrainSet,
    _test: &TestSet,
    similarities: &SimilarityMatrix,
    num_items_to_recommend: usize,
    k: usize,
) -> Result<f64> {
    let rankings = rankings(train, similarities, num_items_to_recommend, k)?;
    coverage_of(train, &rankings)
}

/// Mean of `ln(1 + popularity)` over all recommendations, where the popularity of an item is its
/// number of occurrences in the training set.
pub fn popularity(
    train: &TrainSet,
    _test: &TestSet,
    similarities: &SimilarityMatrix,
    num_items_to_recommend: usize,
    k: usize,
) -> Result<f64> {
    let rankings = rankings(train, similarities, num_items_to_recommend, k)?;
    popularity_of(train, &rankings)
}

/// Computes all metrics from a single pass of recommendations, spread over `pool_size` threads.
pub fn evaluate(
    train: &TrainSet,
    test: &TestSet,
    similarities: &SimilarityMatrix,
    num_items_to_recommend: usize,
    k: usize,
    pool_size: usize,
) -> Result<EvaluationReport> {

    let start = Instant::now();

    let rankings =
        recommend::recommend_all(train, similarities, num_items_to_recommend, k, pool_size)?;

    info!("Computed recommendations for {} actors in {}ms", rankings.len(),
        utils::to_millis(start.elapsed()));

    let num_actors_evaluated = rankings.iter()
        .filter(|(actor, _)| test.contains_key(*actor))
        .count();

    Ok(EvaluationReport {
        mode: similarities.mode(),
        num_items_to_recommend,
        k,
        recall: recall_of(&rankings, test)?,
        precision: precision_of(&rankings, test, num_items_to_recommend)?,
        coverage: coverage_of(train, &rankings)?,
        popularity: popularity_of(train, &rankings)?,
        num_actors_evaluated,
        num_items_recommended: recommended_items(&rankings).len(),
    })
}
