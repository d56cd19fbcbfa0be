// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Command-line tool to filter, transform and merge Gettext PO files.
//!
//! With one input file the catalog is filtered and written to stdout, or
//! counted with `-s`. With two input files the translations from the
//! second file are merged into the first by `msgid` and the merged
//! catalog is written; filters and `-c` apply to the second file before
//! the merge.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};

use po_edit::catalog::Catalog;
use po_edit::filter::{apply_filters, Filter, FilterSet};
use po_edit::merge;
use po_edit::parse;
use po_edit::write::{write_catalog, WriteOptions};

#[derive(Debug, Parser)]
#[command(about = "Filter, transform and merge gettext PO files.")]
struct Args {
    /// PO file to read. With a second file, this is the merge base.
    file: PathBuf,

    /// PO file whose translations are merged into the first file.
    updates: Option<PathBuf>,

    /// Keep only entries matching the given filter (repeatable).
    #[arg(short = 'f', value_name = "FILTER")]
    filters: Vec<FilterCode>,

    /// Leave the given part out of the output (repeatable).
    #[arg(short = 'n', value_name = "PART")]
    suppress: Vec<SuppressCode>,

    /// Print the number of active entries instead of the catalog.
    #[arg(short = 's')]
    stats: bool,

    /// Replace every translation with a copy of its msgid.
    #[arg(short = 'c')]
    copy_msgid: bool,
}

/// Filter codes accepted by `-f`.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum FilterCode {
    /// Fuzzy entries.
    #[value(name = "f")]
    Fuzzy,
    /// Non-fuzzy entries.
    #[value(name = "nf")]
    NotFuzzy,
    /// Fully translated entries.
    #[value(name = "t")]
    Translated,
    /// Entries with untranslated strings.
    #[value(name = "nt")]
    NotTranslated,
    /// Untranslated entries plus the header.
    #[value(name = "nth")]
    NotTranslatedOrHeader,
    /// Drop the obsolete entries.
    #[value(name = "o")]
    Obsolete,
    /// Drop the active entries.
    #[value(name = "no")]
    NotObsolete,
}

impl From<FilterCode> for Filter {
    fn from(code: FilterCode) -> Self {
        match code {
            FilterCode::Fuzzy => Filter::Fuzzy,
            FilterCode::NotFuzzy => Filter::NotFuzzy,
            FilterCode::Translated => Filter::Translated,
            FilterCode::NotTranslated => Filter::NotTranslated,
            FilterCode::NotTranslatedOrHeader => Filter::NotTranslatedOrHeader,
            FilterCode::Obsolete => Filter::Obsolete,
            FilterCode::NotObsolete => Filter::NotObsolete,
        }
    }
}

/// Suppression codes accepted by `-n`.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum SuppressCode {
    /// msgctxt lines.
    #[value(name = "ctxt")]
    Context,
    /// msgid and msgid_plural lines.
    #[value(name = "id")]
    Id,
    /// The whole translation block.
    #[value(name = "str")]
    Translation,
    /// All comment categories.
    #[value(name = "cmt")]
    AllComments,
    /// Translator comments.
    #[value(name = "ucmt")]
    StandardComments,
    /// Source-reference comments.
    #[value(name = "pcmt")]
    PositionComments,
    /// Flag comments.
    #[value(name = "scmt")]
    FlagComments,
    /// Remaining comments.
    #[value(name = "dcmt")]
    OtherComments,
    /// Translation text (an empty msgstr is still written).
    #[value(name = "tr")]
    TranslationText,
    /// Line numbers in source references.
    #[value(name = "linf")]
    LineNumbers,
}

fn write_options(codes: &[SuppressCode]) -> WriteOptions {
    let mut options = WriteOptions::default();
    for code in codes {
        match code {
            SuppressCode::Context => options.no_context = true,
            SuppressCode::Id => options.no_id = true,
            SuppressCode::Translation => options.no_translation = true,
            SuppressCode::AllComments => {
                options.no_standard_comments = true;
                options.no_position_comments = true;
                options.no_flag_comments = true;
                options.no_other_comments = true;
            }
            SuppressCode::StandardComments => options.no_standard_comments = true,
            SuppressCode::PositionComments => options.no_position_comments = true,
            SuppressCode::FlagComments => options.no_flag_comments = true,
            SuppressCode::OtherComments => options.no_other_comments = true,
            SuppressCode::TranslationText => options.empty_translation = true,
            SuppressCode::LineNumbers => options.normalize_line_numbers = true,
        }
    }
    options
}

fn read_catalog(path: &Path) -> anyhow::Result<Catalog> {
    let input = fs::read_to_string(path)
        .with_context(|| format!("Could not read {}", path.display()))?;
    parse::parse(&input).with_context(|| format!("Could not parse {} as PO file", path.display()))
}

fn run(args: &Args) -> anyhow::Result<()> {
    let filters: FilterSet = args.filters.iter().map(|code| Filter::from(*code)).collect();
    let options = write_options(&args.suppress);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match &args.updates {
        None => {
            let mut catalog = read_catalog(&args.file)?;
            apply_filters(&mut catalog, &filters);
            if args.stats {
                writeln!(out, "{}", catalog.active.len())?;
            } else {
                if args.copy_msgid {
                    catalog.copy_msgid_to_translation();
                }
                write_catalog(&mut out, &catalog, &options)?;
            }
        }
        Some(updates) => {
            let mut base = read_catalog(&args.file)?;
            let mut patch = read_catalog(updates)?;
            apply_filters(&mut patch, &filters);
            if args.copy_msgid {
                patch.copy_msgid_to_translation();
            }
            for id in merge::update(&mut base, &patch) {
                eprintln!("Warning: unknown msgid: {id}");
            }
            write_catalog(&mut out, &base, &options)?;
        }
    }

    out.flush().context("Could not write catalog")?;
    Ok(())
}

fn main() {
    // Usage errors exit with code 1; only `-h`/`--help` exit 0.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => return,
                _ => process::exit(1),
            }
        }
    };
    if let Err(err) = run(&args) {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}
