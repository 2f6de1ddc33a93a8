use std::path::PathBuf;

use anyhow::Context;
use mw_classify::{ClassificationResult, Classifier};
use mw_config::MeshConfig;
use mw_tables::{ClassificationSink, PageInput, read_lexicon, read_pages};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ClassifyArgs;
use crate::output::output;
use crate::progress::Progress;

/// Pages classified between two writes to the output file.
const BATCH_SIZE: usize = 64;

#[derive(Debug, Serialize)]
struct ClassifyResponse {
    output: PathBuf,
    categories: usize,
    inputs: usize,
    already_classified: usize,
    classified: usize,
    without_deduction: usize,
    /// Lexicon categories that have no output column.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    unlisted_categories: Vec<String>,
}

/// Handle `mwt classify`.
pub fn handle(
    args: &ClassifyArgs,
    config: &MeshConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let settings = &config.classify;
    let lexicon = read_lexicon(&args.lexicon)
        .with_context(|| format!("failed to read lexicon '{}'", args.lexicon.display()))?;
    let classifier = Classifier::new(&lexicon).context("failed to compile lexicon")?;

    let unlisted_categories: Vec<String> = lexicon
        .codes()
        .filter(|code| !settings.categories.iter().any(|c| c == *code))
        .map(ToString::to_string)
        .collect();
    if !unlisted_categories.is_empty() {
        warn!(
            categories = %unlisted_categories.join(", "),
            "lexicon categories missing from classify.categories get no count column"
        );
    }

    let pages = read_pages(&args.input, &settings.url_column, &settings.text_column)
        .with_context(|| format!("failed to read input '{}'", args.input.display()))?;
    let mut sink = ClassificationSink::open(&args.output, &settings.categories)
        .with_context(|| format!("failed to open output '{}'", args.output.display()))?;

    let pending: Vec<&PageInput> = pages.iter().filter(|p| !sink.contains(&p.url)).collect();
    let already_classified = pages.len() - pending.len();
    debug!(pending = pending.len(), already_classified, "classifying");

    let progress = Progress::bar(pending.len() as u64, "classifying");
    let mut classified = 0;
    let mut without_deduction = 0;

    for batch in pending.chunks(BATCH_SIZE) {
        let results: Vec<ClassificationResult> = if settings.parallel {
            batch
                .par_iter()
                .map(|page| classifier.classify(&page.text, &page.url))
                .collect()
        } else {
            batch
                .iter()
                .map(|page| classifier.classify(&page.text, &page.url))
                .collect()
        };

        for result in &results {
            let appended = sink.append(result).inspect_err(|_| {
                progress.finish_err("classification aborted");
            })?;
            if appended {
                classified += 1;
                if result.deduction.is_empty() {
                    without_deduction += 1;
                }
            }
        }
        progress.inc(batch.len() as u64);
    }
    progress.finish_ok("done");

    output(
        &ClassifyResponse {
            output: args.output.clone(),
            categories: lexicon.len(),
            inputs: pages.len(),
            already_classified,
            classified,
            without_deduction,
            unlisted_categories,
        },
        flags.format,
    )
}
