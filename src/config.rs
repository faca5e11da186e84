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

use std::fs::File;
use std::io::BufReader;

use crate::error::{CfError, Result};
use crate::types::Mode;

/// Parameters of an offline evaluation run. Field names are used in JSON config files.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct EvaluationConfig {
    pub mode: Mode,
    /// Interactions are assigned to one of `num_folds + 1` buckets
    pub num_folds: u32,
    /// Bucket which is held out for testing
    pub test_fold: u32,
    pub seed: u64,
    /// Number of items to recommend per actor (N)
    pub num_items_to_recommend: usize,
    /// Number of nearest neighbors to score from (K)
    pub k: usize,
    #[serde(default = "default_num_threads")]
    pub num_threads: usize,
}

fn default_num_threads() -> usize {
    num_cpus::get()
}

impl EvaluationConfig {

    /// Defaults which work well on MovieLens-sized data for the given mode.
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Item => EvaluationConfig {
                mode,
                num_folds: 7,
                test_fold: 1,
                seed: 1,
                num_items_to_recommend: 10,
                k: 10,
                num_threads: default_num_threads(),
            },
            Mode::User => EvaluationConfig {
                mode,
                num_folds: 8,
                test_fold: 1,
                seed: 1,
                num_items_to_recommend: 10,
                k: 80,
                num_threads: default_num_threads(),
            },
        }
    }

    pub fn from_json_file(path: &str) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: EvaluationConfig = serde_json::from_reader(reader)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_items_to_recommend == 0 {
            return Err(CfError::InvalidConfig(
                "the number of items to recommend must be positive".to_owned()));
        }

        if self.k == 0 {
            return Err(CfError::InvalidConfig(
                "the number of neighbors must be positive".to_owned()));
        }

        if self.test_fold > self.num_folds {
            return Err(CfError::InvalidConfig(format!(
                "the test fold {} is never drawn, folds range from 0 to {}",
                self.test_fold, self.num_folds)));
        }

        if self.num_threads == 0 {
            return Err(CfError::InvalidConfig("the number of threads must be positive".to_owned()));
        }

        Ok(())
    }
}
