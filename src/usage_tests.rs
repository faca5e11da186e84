/**
 * NeighborCF
 * Copyright (C) 2018 The NeighborCF Authors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <http://www.gnu.org/licenses/>.
 */

#[cfg(test)]
mod tests {

    use crate::{build_histories, build_similarity, build_train_test, evaluation, recommend};
    use crate::{EvaluationConfig, Mode};

    fn interactions() -> Vec<Vec<String>> {
        let mut interactions = Vec::new();

        // Two taste clusters with a little overlap
        for user in 0..30 {
            let offset = if user % 2 == 0 { 0 } else { 10 };
            for item in 0..12 {
                let item_index = offset + (user + item) % 12;
                interactions.push(vec![format!("user{}", user), format!("item{}", item_index)]);
            }
        }

        interactions
    }

    #[test]
    fn programmatic_usage() {

        /* Our input data comprises of observed interactions between users and items. The
           identifiers used can be strings of arbitrary length and structure. */
        let interactions = vec![
            vec!["alice", "apple"],
            vec!["alice", "dog"],
            vec!["alice", "pony"],
            vec!["bob", "apple"],
            vec!["bob", "pony"],
            vec!["charles", "pony"],
            vec!["charles", "bike"],
        ];

        /* For serving, we keep all interactions as user histories. */
        let histories = build_histories(&interactions).unwrap();

        /* The item similarity matrix relates items which were interacted with by the same
           users. Absent pairs have a similarity of zero. */
        let similarities = build_similarity(&histories, Mode::Item);

        assert!(similarities.get("apple", "pony") > 0.0);
        assert_eq!(similarities.get("dog", "bike"), 0.0);

        /* Bob gets recommendations from the items similar to apple and pony. */
        let recommended = recommend(
            "bob",        // The user to recommend for
            &histories,   // The user histories
            &similarities,
            2,            // The number of items to recommend
            10,           // The number of neighbors to consider per item
        ).unwrap();

        let items: Vec<&str> = recommended.iter().map(|r| r.item.as_str()).collect();
        assert_eq!(items.len(), 2);
        assert!(items.contains(&"dog"));
        assert!(items.contains(&"bike"));
    }

    #[test]
    fn offline_evaluation() {

        for mode in &[Mode::Item, Mode::User] {

            let config = EvaluationConfig::for_mode(*mode);

            let (train, test) = build_train_test(
                &interactions(), config.num_folds, config.test_fold, config.seed).unwrap();

            let similarities = build_similarity(&train, config.mode);

            let report = evaluation::evaluate(
                &train,
                &test,
                &similarities,
                config.num_items_to_recommend,
                config.k,
                2,
            ).unwrap();

            assert_eq!(report.mode, *mode);
            assert!(report.recall >= 0.0 && report.recall <= 1.0);
            assert!(report.precision >= 0.0 && report.precision <= 1.0);
            assert!(report.coverage > 0.0 && report.coverage <= 1.0);
            assert!(report.popularity > 0.0);
            assert!(report.num_items_recommended > 0);
        }
    }
}
