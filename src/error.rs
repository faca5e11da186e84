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

use std::io;

use thiserror::Error;

/// Errors reported by the recommender and its collaborators.
#[derive(Error, Debug)]
pub enum CfError {
    /// An interaction record did not consist of exactly an actor and an entity.
    #[error("malformed interaction record #{record}: expected 2 fields, found {fields}")]
    InputFormat { record: usize, fields: usize },

    /// Recommendations were requested for an actor without a training history.
    #[error("actor '{0}' is not part of the training set")]
    ActorNotFound(String),

    /// A metric denominator is zero, so the metric is undefined.
    #[error("{metric} is undefined: {denominator} is zero")]
    DivisionDegenerate {
        metric: &'static str,
        denominator: &'static str,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CfError>;
