// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tracksheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tracksheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Tracksheet CLI entrypoint.
//!
//! Loads a sheet through the mock backend, applies the requested view changes and prints the
//! outline (or the filtered sheet as JSON with `--json`).

use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use tracksheet::backend::MockBackend;
use tracksheet::config::Config;
use tracksheet::model::fixtures::demo_sheet;
use tracksheet::model::{QuestionId, SubTopicId, TopicId};
use tracksheet::render::{render_outline, RenderOptions};
use tracksheet::store::{SheetStore, StoreError};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--slug <slug>] [--query <text>] [--collapse-all]\n  {program} [--toggle <topic>/<sub-topic>/<question>] [--config <file.json>] [--json]\n\nSettings come from defaults, then --config, then TRACKSHEET_SHEET,\nTRACKSHEET_FETCH_LATENCY_MS, TRACKSHEET_MUTATION_LATENCY_MS and TRACKSHEET_LOG.\n--slug overrides the configured sheet."
    );
}

type QuestionPath = (TopicId, SubTopicId, QuestionId);

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    slug: Option<String>,
    query: Option<String>,
    collapse_all: bool,
    toggle: Option<QuestionPath>,
    config: Option<String>,
    json: bool,
}

fn parse_question_path(raw: &str) -> Result<QuestionPath, ()> {
    let mut parts = raw.split('/');
    let (Some(topic), Some(sub_topic), Some(question), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(());
    };
    Ok((
        topic.parse().map_err(|_| ())?,
        sub_topic.parse().map_err(|_| ())?,
        question.parse().map_err(|_| ())?,
    ))
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--slug" => {
                if options.slug.is_some() {
                    return Err(());
                }
                options.slug = Some(args.next().ok_or(())?);
            }
            "--query" => {
                if options.query.is_some() {
                    return Err(());
                }
                options.query = Some(args.next().ok_or(())?);
            }
            "--collapse-all" => {
                if options.collapse_all {
                    return Err(());
                }
                options.collapse_all = true;
            }
            "--toggle" => {
                if options.toggle.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                options.toggle = Some(parse_question_path(&raw)?);
            }
            "--config" => {
                if options.config.is_some() {
                    return Err(());
                }
                options.config = Some(args.next().ok_or(())?);
            }
            "--json" => {
                if options.json {
                    return Err(());
                }
                options.json = true;
            }
            _ => return Err(()),
        }
    }

    Ok(options)
}

async fn run(config: &Config, options: &CliOptions) -> Result<String, Box<dyn Error>> {
    let backend = Arc::new(MockBackend::new(demo_sheet(), config.backend()));
    let store = SheetStore::new(backend);

    store.load_sheet(&config.sheet_slug).await?;
    if let Some((topic_id, sub_topic_id, question_id)) = &options.toggle {
        store
            .toggle_question_complete(topic_id, sub_topic_id, question_id)
            .await?;
    }
    if options.collapse_all {
        store.toggle_all().await;
    }
    if let Some(query) = &options.query {
        store.set_search_query(query.as_str()).await;
    }

    let state = store.state().await;
    let view = store.filtered_sheet().await.ok_or(StoreError::NotLoaded)?;
    if options.json {
        let mut json = serde_json::to_string_pretty(&*view)?;
        json.push('\n');
        return Ok(json);
    }
    Ok(render_outline(&view, &state.ui, RenderOptions::default()))
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "tracksheet".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let mut config = Config::load(options.config.as_deref().map(Path::new))?;
        if let Some(slug) = &options.slug {
            config.sheet_slug = slug.clone();
        }
        tracksheet::logging::init(&config.log_filter)?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let output = runtime.block_on(run(&config, &options))?;
        print!("{output}");
        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("tracksheet: {err}");
        std::process::exit(1);
    }
}
