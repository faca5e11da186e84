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

use std::env;
use std::error::Error;
use std::process;
use std::str::FromStr;

use getopts::{Matches, Options};

use neighborcf::{evaluation, io, EvaluationConfig, Mode};

fn main() {

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let program = args[0].clone();

    let mut opts = Options::new();
    opts.optopt("i", "inputfile", "Input file name (required). The input consists of interactions \
        between users and items, one user and item per line.", "PATH");
    opts.optopt("d", "delimiter", "Field delimiter of the input file (optional, defaults to a \
        tab). Use '::' for MovieLens rating dumps.", "STRING");
    opts.optopt("c", "config", "JSON file with the evaluation parameters (optional). Options \
        given on the command line take precedence.", "PATH");
    opts.optopt("m", "mode", "Recommender to evaluate, 'item' (ItemCF) or 'user' (UserCF) \
        (optional, defaults to item).", "MODE");
    opts.optopt("f", "num-folds", "Number of folds M, interactions are held out with \
        probability 1/(M+1) (optional).", "NUMBER");
    opts.optopt("t", "test-fold", "Fold which is held out for testing (optional).", "NUMBER");
    opts.optopt("s", "seed", "Seed for the random train/test split (optional).", "NUMBER");
    opts.optopt("n", "num-recommendations", "Number of items to recommend per user \
        (optional).", "NUMBER");
    opts.optopt("k", "num-neighbors", "Number of nearest neighbors to score from \
        (optional).", "NUMBER");
    opts.optopt("j", "threads", "Number of threads to compute recommendations with (optional, \
        defaults to the number of CPUs).", "NUMBER");
    opts.optopt("o", "outputfile", "Output file name for the JSON report (optional, output will \
        be written to stdout by default).", "PATH");
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

    let config = match evaluation_config(&matches) {
        Ok(config) => config,
        Err(failure) => {
            let hint = format!("Problem with the evaluation parameters: {}", failure);
            return print_usage_and_exit(&program, opts, Some(&hint))
        },
    };

    let delimiter = matches.opt_str("d").unwrap_or_else(|| "\t".to_owned());
    let report_path = matches.opt_str("o");

    if let Err(failure) = run_evaluation(&interactions_path, &delimiter, &config, report_path) {
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

fn override_with<T>(matches: &Matches, name: &str, value: &mut T) -> Result<(), Box<dyn Error>>
    where T: FromStr, T::Err: Error + 'static {

    if let Some(parsed) = matches.opt_get::<T>(name)? {
        *value = parsed;
    }

    Ok(())
}

fn evaluation_config(matches: &Matches) -> Result<EvaluationConfig, Box<dyn Error>> {

    let mut config = match matches.opt_str("c") {
        Some(path) => EvaluationConfig::from_json_file(&path)?,
        None => {
            let mode = match matches.opt_str("m") {
                Some(mode) => Mode::from_str(&mode)?,
                None => Mode::Item,
            };
            EvaluationConfig::for_mode(mode)
        }
    };

    override_with(matches, "m", &mut config.mode)?;
    override_with(matches, "f", &mut config.num_folds)?;
    override_with(matches, "t", &mut config.test_fold)?;
    override_with(matches, "s", &mut config.seed)?;
    override_with(matches, "n", &mut config.num_items_to_recommend)?;
    override_with(matches, "k", &mut config.k)?;
    override_with(matches, "j", &mut config.num_threads)?;

    config.validate()?;

    Ok(config)
}

fn run_evaluation(
    interactions_path: &str,
    delimiter: &str,
    config: &EvaluationConfig,
    report_path: Option<String>,
) -> Result<(), Box<dyn Error>> {

    info!("Reading interactions from {}", interactions_path);
    let records = io::read_records(interactions_path, delimiter)?;

    let (train, test) =
        neighborcf::build_train_test(&records, config.num_folds, config.test_fold, config.seed)?;

    info!("Split {} interactions into {} training and {} test histories", records.len(),
        train.len(), test.len());

    info!("Computing {} similarities", config.mode);
    let similarities = neighborcf::build_similarity(&train, config.mode);

    info!("Evaluating top-{} recommendations from {} neighbors on {} threads",
        config.num_items_to_recommend, config.k, config.num_threads);

    let report = evaluation::evaluate(
        &train,
        &test,
        &similarities,
        config.num_items_to_recommend,
        config.k,
        config.num_threads,
    )?;

    info!("recall: {:.4}, precision: {:.4}, coverage: {:.4}, popularity: {:.4}",
        report.recall, report.precision, report.coverage, report.popularity);

    io::write_report(&report, report_path)?;

    Ok(())
}
