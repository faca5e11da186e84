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
use std::io;
use std::io::prelude::*;
use std::io::{stdout, BufReader};
use std::path::Path;

use crate::error::{CfError, Result};
use crate::evaluation::EvaluationReport;
use crate::types::RankedList;

/// Reads a CSV input file. We expect NO headers and a user-item tuple per line, further columns
/// are allowed.
pub fn csv_reader(file: &str, delimiter: u8) -> Result<csv::Reader<File>> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_path(file)?;

    Ok(reader)
}

/// Keeps actor and entity of a record and drops trailing columns like ratings or timestamps.
/// Shorter records are passed on as they are, to be rejected by the splitter.
fn project<'a, I: Iterator<Item = &'a str>>(fields: I) -> Vec<String> {
    fields.take(2).map(|field| field.to_owned()).collect()
}

/// Reads interaction records from `file`. Single byte delimiters (like tabs) are handled by a CSV
/// reader, longer ones (like the `::` of the MovieLens dumps) by splitting each line.
pub fn read_records(file: &str, delimiter: &str) -> Result<Vec<Vec<String>>> {

    if delimiter.is_empty() {
        return Err(CfError::InvalidConfig("the field delimiter must not be empty".to_owned()));
    }

    let mut records = Vec::new();

    if delimiter.len() == 1 {
        let mut reader = csv_reader(file, delimiter.as_bytes()[0])?;

        for record in reader.records() {
            records.push(project(record?.iter()));
        }
    } else {
        let reader = BufReader::new(File::open(file)?);

        for line in reader.lines() {
            let line = line?;
            let line = line.trim_end_matches('\r');

            if !line.is_empty() {
                records.push(project(line.split(delimiter)));
            }
        }
    }

    debug!("Read {} records from {}", records.len(), file);

    Ok(records)
}

fn output(path: Option<String>) -> io::Result<Box<dyn Write>> {
    let out: Box<dyn Write> = match path {
        Some(path) => Box::new(File::create(&Path::new(&path))?),
        _ => Box::new(stdout())
    };

    Ok(out)
}

/// Output the evaluation report as JSON. If a `report_path` is supplied, we write to a file at
/// the specified path, otherwise, we output to stdout.
pub fn write_report(report: &EvaluationReport, report_path: Option<String>) -> Result<()> {
    let mut out = output(report_path)?;

    serde_json::to_writer_pretty(&mut out, report)?;
    writeln!(out)?;

    Ok(())
}

/// Struct used for JSON serialization of recommendations. Field names will be used in JSON.
#[derive(Serialize)]
struct Recommendations<'a> {
    for_actor: &'a str,
    recommended: &'a RankedList,
}

/// Output recommendations as JSON lines, one line per actor.
pub fn write_recommendations(
    recommendations: &[(&str, RankedList)],
    recommendations_path: Option<String>,
) -> Result<()> {

    let mut out = output(recommendations_path)?;

    for &(for_actor, ref recommended) in recommendations.iter() {
        let line = Recommendations { for_actor, recommended };
        writeln!(out, "{}", serde_json::to_string(&line)?)?;
    }

    out.flush()?;

    Ok(())
}
