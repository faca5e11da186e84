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

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Result type used to find the top-k entries of a sparse row via a binary heap
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct ScoredItem<T> {
    pub item: T,
    pub score: f64,
}

/// Reversed ordering turns `BinaryHeap` into a min-heap on the score, so its top is the weakest
/// entry kept so far. Floats have no total order, incomparable scores count as equal.
fn cmp_reverse<T>(scored_item_a: &ScoredItem<T>, scored_item_b: &ScoredItem<T>) -> Ordering {
    match scored_item_a.score.partial_cmp(&scored_item_b.score) {
        Some(Ordering::Less) => Ordering::Greater,
        Some(Ordering::Greater) => Ordering::Less,
        Some(Ordering::Equal) => Ordering::Equal,
        None => Ordering::Equal
    }
}

impl<T: PartialEq> Eq for ScoredItem<T> {}

impl<T: PartialEq> Ord for ScoredItem<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_reverse(self, other)
    }
}

impl<T: PartialEq> PartialOrd for ScoredItem<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(cmp_reverse(self, other))
    }
}

/// Keeps the `k` highest scored entries and returns them sorted by descending score. The order
/// among equal scores is unspecified.
pub fn top_k<T, I>(scored_items: I, k: usize) -> Vec<ScoredItem<T>>
    where T: PartialEq, I: IntoIterator<Item = ScoredItem<T>> {

    if k == 0 {
        return Vec::new();
    }

    let mut heap = BinaryHeap::with_capacity(k);

    for scored_item in scored_items {
        if heap.len() < k {
            heap.push(scored_item);
        } else if let Some(mut top) = heap.peek_mut() {
            if scored_item < *top {
                *top = scored_item;
            }
        }
    }

    // Ascending in the reversed order means descending by score
    heap.into_sorted_vec()
}


#[cfg(test)]
mod tests {

    use std::f64::EPSILON;
    use super::{top_k, ScoredItem};

    fn within_epsilon(value: f64, expected: f64) -> bool {
        (value - expected).abs() < EPSILON
    }

    #[test]
    fn scored_item_ordering_reversed() {
        let item_a = ScoredItem { item: 1, score: 0.5 };
        let item_b = ScoredItem { item: 2, score: 1.5 };
        let item_c = ScoredItem { item: 3, score: 0.3 };

        assert!(item_a > item_b);
        assert!(item_a < item_c);
        assert!(item_b < item_c);
    }

    #[test]
    fn topk() {

        const K: usize = 3;

        let items = vec![
            ScoredItem { item: 1, score: 0.5 },
            ScoredItem { item: 2, score: 1.5 },
            ScoredItem { item: 3, score: 0.3 },
            ScoredItem { item: 4, score: 3.5 },
            ScoredItem { item: 5, score: 2.5 },
        ];

        let top = top_k(items, K);

        assert_eq!(top.len(), 3);

        assert_eq!(top[0].item, 4);
        assert!(within_epsilon(top[0].score, 3.5));

        assert_eq!(top[1].item, 5);
        assert!(within_epsilon(top[1].score, 2.5));

        assert_eq!(top[2].item, 2);
        assert!(within_epsilon(top[2].score, 1.5));
    }

    #[test]
    fn topk_with_fewer_candidates_than_k() {
        let items = vec![
            ScoredItem { item: "a", score: 0.1 },
            ScoredItem { item: "b", score: 0.9 },
        ];

        let top = top_k(items, 10);

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].item, "b");
        assert_eq!(top[1].item, "a");
    }

    #[test]
    fn topk_zero() {
        let items = vec![ScoredItem { item: 1, score: 1.0 }];
        assert!(top_k(items, 0).is_empty());
    }
}
