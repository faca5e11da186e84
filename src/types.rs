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

use std::fmt;
use std::str::FromStr;

use fnv::FnvHashMap;

use crate::error::CfError;

/// Per-actor interaction histories, duplicates are kept.
pub type TrainSet = FnvHashMap<String, Vec<String>>;

/// Held out interactions per actor, same shape as the training set.
pub type TestSet = FnvHashMap<String, Vec<String>>;

pub type DenseVector = Vec<u32>;

pub type SparseVector = FnvHashMap<u32, f64>;
pub type SparseMatrix = Vec<SparseVector>;

pub fn new_dense_vector(dimensions: usize) -> DenseVector {
    vec![0; dimensions]
}

pub fn new_sparse_matrix(num_rows: usize) -> SparseMatrix {
    vec![FnvHashMap::with_capacity_and_hasher(0, Default::default()); num_rows]
}

/// Which entities the similarity matrix relates: items (ItemCF) or users (UserCF).
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Item,
    User,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Mode::Item => write!(f, "item"),
            Mode::User => write!(f, "user"),
        }
    }
}

impl FromStr for Mode {
    type Err = CfError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "item" | "itemcf" => Ok(Mode::Item),
            "user" | "usercf" => Ok(Mode::User),
            other => Err(CfError::InvalidConfig(format!(
                "unknown mode '{}', expected 'item' or 'user'", other))),
        }
    }
}

/// A recommended item together with its accumulated score.
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct Recommendation {
    pub item: String,
    pub score: f64,
}

/// Recommendations sorted by descending score.
pub type RankedList = Vec<Recommendation>;
