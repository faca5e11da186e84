use crate::stats::EntityDictionary;
use crate::topk::{self, ScoredItem};
use crate::types::{Mode, SparseMatrix};

/// Sparse, immutable similarity matrix between entities (items or users, depending on the mode).
///
/// Only pairs which co-occurred at least once are stored. Every other pair, including pairs with
/// entities the matrix has never seen, has a similarity of zero.
#[derive(PartialEq, Debug, Clone)]
pub struct SimilarityMatrix {
    mode: Mode,
    dictionary: EntityDictionary,
    rows: SparseMatrix,
}

impl SimilarityMatrix {

    pub(crate) fn new(mode: Mode, dictionary: EntityDictionary, rows: SparseMatrix) -> Self {
        debug_assert_eq!(dictionary.len(), rows.len());
        SimilarityMatrix { mode, dictionary, rows }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Number of entities known to the matrix, with or without neighbors.
    pub fn num_entities(&self) -> usize {
        self.rows.len()
    }

    /// Number of stored (ordered) pairs.
    pub fn num_entries(&self) -> usize {
        self.rows.iter().map(|row| row.len()).sum()
    }

    pub fn contains(&self, entity: &str) -> bool {
        self.dictionary.index(entity).is_some()
    }

    /// Similarity of the ordered pair `(a, b)`, zero if the pair never co-occurred.
    pub fn get(&self, a: &str, b: &str) -> f64 {
        match (self.dictionary.index(a), self.dictionary.index(b)) {
            (Some(a), Some(b)) => self.rows[a as usize].get(&b).cloned().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// All stored similarities of `entity`, in unspecified order.
    pub fn row<'a>(&'a self, entity: &str) -> Box<dyn Iterator<Item = (&'a str, f64)> + 'a> {
        match self.dictionary.index(entity) {
            Some(index) => Box::new(
                self.rows[index as usize]
                    .iter()
                    .map(move |(other, weight)| (self.dictionary.name(*other), *weight))
            ),
            None => Box::new(std::iter::empty()),
        }
    }

    /// The `k` most similar entities to `entity`, sorted by descending similarity.
    pub fn neighbors(&self, entity: &str, k: usize) -> Vec<(&str, f64)> {
        let index = match self.dictionary.index(entity) {
            Some(index) => index,
            None => return Vec::new(),
        };

        let candidates = self.rows[index as usize]
            .iter()
            .map(|(other, weight)| ScoredItem { item: *other, score: *weight });

        topk::top_k(candidates, k)
            .into_iter()
            .map(|scored_item| (self.dictionary.name(scored_item.item), scored_item.score))
            .collect()
    }

    /// Every stored `(a, b, similarity)` triple.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, f64)> {
        let dictionary = &self.dictionary;

        self.rows.iter()
            .enumerate()
            .flat_map(move |(index, row)| {
                let name = dictionary.name(index as u32);
                row.iter().map(move |(other, weight)| (name, dictionary.name(*other), *weight))
            })
    }
}


#[cfg(test)]
mod tests {

    use fnv::FnvHashMap;

    use crate::stats::EntityDictionary;
    use crate::types::{self, Mode};
    use super::SimilarityMatrix;

    fn matrix() -> SimilarityMatrix {
        let mut dictionary = EntityDictionary::new();
        let a = dictionary.intern("a");
        let b = dictionary.intern("b");
        let c = dictionary.intern("c");
        dictionary.intern("lonely");

        let mut rows = types::new_sparse_matrix(4);
        link(&mut rows, a, b, 0.5);
        link(&mut rows, a, c, 0.75);

        SimilarityMatrix::new(Mode::Item, dictionary, rows)
    }

    fn link(rows: &mut Vec<FnvHashMap<u32, f64>>, x: u32, y: u32, weight: f64) {
        rows[x as usize].insert(y, weight);
        rows[y as usize].insert(x, weight);
    }

    #[test]
    fn absent_pairs_are_zero() {
        let matrix = matrix();

        assert_eq!(matrix.get("a", "b"), 0.5);
        assert_eq!(matrix.get("b", "c"), 0.0);
        assert_eq!(matrix.get("a", "unknown"), 0.0);
        assert_eq!(matrix.get("unknown", "a"), 0.0);
        assert_eq!(matrix.get("a", "a"), 0.0);
    }

    #[test]
    fn neighbors_sorted_descending() {
        let matrix = matrix();

        assert_eq!(matrix.neighbors("a", 10), vec![("c", 0.75), ("b", 0.5)]);
        assert_eq!(matrix.neighbors("a", 1), vec![("c", 0.75)]);
        assert!(matrix.neighbors("lonely", 10).is_empty());
        assert!(matrix.neighbors("unknown", 10).is_empty());
    }

    #[test]
    fn entries_and_counts() {
        let matrix = matrix();

        assert_eq!(matrix.num_entities(), 4);
        assert_eq!(matrix.num_entries(), 4);
        assert_eq!(matrix.entries().count(), 4);
        assert!(matrix.entries().all(|(a, b, w)| matrix.get(b, a) == w));
        assert_eq!(matrix.row("b").collect::<Vec<_>>(), vec![("a", 0.5)]);
        assert_eq!(matrix.row("unknown").count(), 0);
        assert!(matrix.contains("lonely"));
    }
}
