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

extern crate env_logger;
extern crate getopts;
#[macro_use]
extern crate log;
extern crate neighborcf;
extern crate num_cpus;

use std::env;
use std::error::Error;
use std::process;

use getopts::Options;

use neighborcf::{io, Mode};

fn main() {

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let program = args[0].clone();

    let mut opts = Options::new();
    opts.optopt("i", "inputfile", "Input file name (required). The input consists of interactions \
        between users and items, one user and item per line.", "PATH");
    opts.optopt("d", "delimiter", "Field delimiter of the input file (optional, defaults to a \
        tab).", "STRING");
    opts.optopt("m", "mode", "Recommender to use, 'item' (ItemCF) or 'user' (UserCF) (optional, \
        defaults to item).", "MODE");
    opts.optopt("n", "num-recommendations", "Number of items to recommend per user (optional, \
        defaults to 10).", "NUMBER");
    opts.optopt("k", "num-neighbors", "Number of nearest neighbors to score from (optional, \
        defaults to 10 for item and 80 for user mode).", "NUMBER");
    opts.optopt("o", "outputfile", "Output file name (optional, output will be written to stdout \
        by default).", "PATH");
    opts.optflag("h", "help", "Print this help menu");

    let matches = match opts.parse(&args[1..]) {
        Ok(matches) => matches,
        Err(failure) => {
            let hint = failure.to_string();
            return print_usage_and_exit(&program, opts, Some(&hint))
        },
    };

    if matches.opt_present("h") {
        return print_usage_and_exit(&program, opts, None);
    }

    let interactions_path = match matches.opt_str("i") {
        Some(path) => path,
        None => return print_usage_and_exit(
            &program,
            opts,
            Some("Please specify an inputfile via --inputfile."),
        ),
    };

    let mode: Mode = match matches.opt_get_default("m", Mode::Item) {
        Ok(mode) => mode,
        Err(failure) => {
            let hint = format!("Problem with option 'm': {}", failure);
            return print_usage_and_exit(&program, opts, Some(&hint))
        },
    };

    let default_k = match mode {
        Mode::Item => 10,
        Mode::User => 80,
    };

    let parameters = matches.opt_get_default("n", 10)
        .and_then(|n| matches.opt_get_default("k", default_k).map(|k| (n, k)));

    let (n, k): (usize, usize) = match parameters {
        Ok((n, k)) if n > 0 && k > 0 => (n, k),
        Ok(_) => {
            return print_usage_and_exit(&program, opts, Some("Options 'n' and 'k' must be positive."))
        },
        Err(failure) => {
            let hint = format!("Problem with option 'n' or 'k': {}", failure);
            return print_usage_and_exit(&program, opts, Some(&hint))
        },
    };

    let delimiter = matches.opt_str("d").unwrap_or_else(|| "\t".to_owned());
    let recommendations_path = matches.opt_str("o");

    if let Err(failure) =
        compute_recommendations(&interactions_path, &delimiter, mode, n, k, recommendations_path) {
        error!("{}", failure);
        process::exit(1);
    }
}

fn print_usage_and_exit(
    program: &str,
    opts: Options,
    hint: Option<&str>
) {

    if let Some(hint) = hint {
        eprintln!("\n{}\n", hint);
    }

    let brief = format!("Usage: {} [options]", program);
    eprint!("{}", opts.usage(&brief));
    process::exit(2);
}

fn compute_recommendations(
    interactions_path: &str,
    delimiter: &str,
    mode: Mode,
    n: usize,
    k: usize,
    recommendations_path: Option<String>,
) -> Result<(), Box<dyn Error>> {

    info!("Reading user histories from {}", interactions_path);
    let records = io::read_records(interactions_path, delimiter)?;
    let histories = neighborcf::build_histories(&records)?;

    info!("Found {} interactions of {} users", records.len(), histories.len());

    info!("Computing {} similarities", mode);
    let similarities = neighborcf::build_similarity(&histories, mode);

    info!("Computing {} recommendations per user from {} neighbors", n, k);
    let recommendations =
        neighborcf::recommend_all(&histories, &similarities, n, k, num_cpus::get())?;

    info!("Writing recommendations...");
    io::write_recommendations(&recommendations, recommendations_path)?;

    Ok(())
}
