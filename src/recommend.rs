use std::sync::{Mutex, PoisonError};

use fnv::{FnvHashMap, FnvHashSet};
use scoped_pool::Pool;

use crate::error::{CfError, Result};
use crate::matrix::SimilarityMatrix;
use crate::topk::{self, ScoredItem};
use crate::types::{Mode, RankedList, Recommendation, TrainSet};


/// Top-`num_items_to_recommend` items for `actor` which the actor has not interacted with yet,
/// scored from the `k` nearest neighbors in the similarity matrix.
///
/// In item mode, each item of the actor's history adds its similarity to each of its `k` most
/// similar items. In user mode, each of the actor's `k` most similar users adds its similarity
/// to every item in its history. Order among equal scores is unspecified.
pub fn recommend(
    actor: &str,
    train: &TrainSet,
    similarities: &SimilarityMatrix,
    num_items_to_recommend: usize,
    k: usize,
) -> Result<RankedList> {

    let history = train.get(actor)
        .ok_or_else(|| CfError::ActorNotFound(actor.to_owned()))?;

    let interacted_items: FnvHashSet<&str> = history.iter().map(|item| item.as_str()).collect();

    let mut item_scores: FnvHashMap<&str, f64> = FnvHashMap::default();

    match similarities.mode() {
        Mode::Item => {
            for item in history.iter() {
                for (other_item, similarity) in similarities.neighbors(item, k) {
                    if !interacted_items.contains(other_item) {
                        *item_scores.entry(other_item).or_insert(0.0) += similarity;
                    }
                }
            }
        }
        Mode::User => {
            for (other_actor, similarity) in similarities.neighbors(actor, k) {
                let other_history = match train.get(other_actor) {
                    Some(other_history) => other_history,
                    None => continue,
                };

                for other_item in other_history.iter() {
                    if !interacted_items.contains(other_item.as_str()) {
                        *item_scores.entry(other_item.as_str()).or_insert(0.0) += similarity;
                    }
                }
            }
        }
    }

    let candidates = item_scores.into_iter()
        .map(|(item, score)| ScoredItem { item, score });

    let recommendations = topk::top_k(candidates, num_items_to_recommend)
        .into_iter()
        .map(|scored_item| Recommendation { item: scored_item.item.to_owned(), score: scored_item.score })
        .collect();

    Ok(recommendations)
}

/// Recommendations for every actor of the training set, computed on `pool_size` threads. The
/// result lists the actors in the iteration order of `train`, regardless of the pool size.
pub fn recommend_all<'a>(
    train: &'a TrainSet,
    similarities: &SimilarityMatrix,
    num_items_to_recommend: usize,
    k: usize,
    pool_size: usize,
) -> Result<Vec<(&'a str, RankedList)>> {

    let actors: Vec<&'a str> = train.keys().map(|actor| actor.as_str()).collect();

    // One slot per actor, so that the merge does not depend on the scheduling of the threads
    let slots: Vec<Mutex<Option<Result<RankedList>>>> =
        actors.iter().map(|_| Mutex::new(None)).collect();

    let pool = Pool::new(pool_size.max(1));

    pool.scoped(|scope| {
        for (actor, slot) in actors.iter().zip(slots.iter()) {
            scope.execute(move || {
                let recommendations =
                    recommend(actor, train, similarities, num_items_to_recommend, k);
                *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(recommendations);
            });
        }
    });

    pool.shutdown();

    actors.into_iter()
        .zip(slots.into_iter())
        .map(|(actor, slot)| {
            match slot.into_inner().unwrap_or_else(PoisonError::into_inner) {
                Some(recommendations) => recommendations.map(|ranked| (actor, ranked)),
                None => Ok((actor, RankedList::new())),
            }
        })
        .collect()
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::build_similarity;

    fn train_set(histories: &[(&str, &[&str])]) -> TrainSet {
        histories.iter()
            .map(|&(actor, entities)| {
                (actor.to_owned(), entities.iter().map(|entity| entity.to_string()).collect())
            })
            .collect()
    }

    fn movies() -> TrainSet {
        train_set(&[
            ("alice", &["apple", "dog", "pony"]),
            ("bob", &["apple", "pony"]),
            ("charles", &["pony", "bike"]),
            ("dora", &["bike", "dog", "apple", "car"]),
            ("emil", &[]),
            ("frank", &["car", "bike"]),
        ])
    }

    fn close_enough_to(value: f64, expected: f64) -> bool {
        (value - expected).abs() < 1e-9
    }

    fn items(recommendations: &RankedList) -> Vec<&str> {
        recommendations.iter().map(|recommendation| recommendation.item.as_str()).collect()
    }

    #[test]
    fn item_mode_scenario() {
        let train = train_set(&[("A", &["x", "y"]), ("B", &["y", "z"])]);
        let w = build_similarity(&train, Mode::Item);

        // W[y] holds x and z with equal weight, so a single neighbor of y may be either
        let single = recommend("A", &train, &w, 1, 1).unwrap();
        assert!(single.len() <= 1);
        if let Some(first) = single.first() {
            assert_eq!(first.item, "z");
            assert!(close_enough_to(first.score, 1.0 / 2.0_f64.sqrt()));
        }

        let recommendations = recommend("A", &train, &w, 1, 2).unwrap();
        assert_eq!(items(&recommendations), vec!["z"]);
        assert!(close_enough_to(recommendations[0].score, 1.0 / 2.0_f64.sqrt()));
    }

    #[test]
    fn item_mode_sums_over_history() {
        let train = train_set(&[("A", &["x", "y"]), ("B", &["x", "y", "z"]), ("C", &["z"])]);
        let w = build_similarity(&train, Mode::Item);

        let recommendations = recommend("A", &train, &w, 10, 10).unwrap();

        assert_eq!(items(&recommendations), vec!["z"]);
        let expected = w.get("x", "z") + w.get("y", "z");
        assert!(close_enough_to(recommendations[0].score, expected));
    }

    #[test]
    fn user_mode_adds_neighbor_similarity_per_item() {
        let train = train_set(&[("A", &["x"]), ("B", &["x", "y", "z"]), ("C", &["w"])]);
        let w = build_similarity(&train, Mode::User);

        let recommendations = recommend("A", &train, &w, 10, 10).unwrap();

        let similarity = w.get("A", "B");
        assert!(similarity > 0.0);
        assert_eq!(recommendations.len(), 2);
        for recommendation in recommendations.iter() {
            assert!(recommendation.item == "y" || recommendation.item == "z");
            assert!(close_enough_to(recommendation.score, similarity));
        }
    }

    #[test]
    fn rankings_are_valid_for_every_actor() {
        let train = movies();

        for mode in &[Mode::Item, Mode::User] {
            let w = build_similarity(&train, *mode);

            for (actor, history) in train.iter() {
                let recommendations = recommend(actor, &train, &w, 2, 3).unwrap();

                assert!(recommendations.len() <= 2);
                assert!(recommendations.iter().all(|r| !history.contains(&r.item)));
                assert!(recommendations.windows(2).all(|pair| pair[0].score >= pair[1].score));
            }
        }
    }

    #[test]
    fn actors_without_neighbors_get_nothing() {
        let train = movies();

        for mode in &[Mode::Item, Mode::User] {
            let w = build_similarity(&train, *mode);
            assert!(recommend("emil", &train, &w, 10, 10).unwrap().is_empty());
        }
    }

    #[test]
    fn unknown_actor_is_an_error() {
        let train = movies();
        let w = build_similarity(&train, Mode::Item);

        match recommend("zoe", &train, &w, 10, 10) {
            Err(CfError::ActorNotFound(actor)) => assert_eq!(actor, "zoe"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn parallel_recommendations_match_sequential_ones() {
        let train = movies();
        let w = build_similarity(&train, Mode::User);

        let in_parallel = recommend_all(&train, &w, 3, 5, 4).unwrap();

        assert_eq!(in_parallel.len(), train.len());
        for (actor, recommendations) in in_parallel {
            assert_eq!(recommendations, recommend(actor, &train, &w, 3, 5).unwrap());
        }
    }
}
