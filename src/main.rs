// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of qgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! qgraph CLI entrypoint.
//!
//! Loads a TRAPI-shaped query graph (or the built-in demo), settles the layout and prints the
//! sentence rows, or the full render frame with `--json`.

use std::path::{Path, PathBuf};

use qgraph::format::FormatError;
use qgraph::ontology::StaticOntology;
use qgraph::{ConfigError, EditorConfig, QueryBuilder};
use thiserror::Error;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_TICKS: usize = 300;

const DEMO_GRAPH: &str = r#"{
  "nodes": {
    "n0": { "categories": ["biolink:SmallMolecule"], "is_set": true },
    "n1": { "categories": ["biolink:Disease"], "ids": ["MONDO:0005148"], "name": "type 2 diabetes" },
    "n2": { "categories": ["biolink:Gene"] }
  },
  "edges": {
    "e0": { "subject": "n0", "object": "n1", "predicates": ["biolink:treats"] },
    "e1": { "subject": "n1", "object": "n0", "predicates": ["biolink:caused_by"] },
    "e2": {
      "subject": "n1",
      "object": "n2",
      "predicates": ["biolink:condition_associated_with_gene"],
      "qualifier_constraints": [
        { "qualifier_set": [
          { "qualifier_type_id": "biolink:object_aspect_qualifier", "qualifier_value": "activity" }
        ] }
      ]
    }
  }
}"#;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--config <file>] [--ticks <n>] [--json] <graph.json>\n  {program} [--config <file>] [--ticks <n>] [--json] --demo\n\n<graph.json> is a TRAPI query graph or a full TRAPI message with `message.query_graph`.\n--ticks caps the layout simulation (default {DEFAULT_TICKS}).\n--json prints the render frame instead of the sentence rows.\n\nSet RUST_LOG (e.g. `qgraph=debug`) for diagnostics on stderr."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    demo: bool,
    json: bool,
    config: Option<PathBuf>,
    ticks: Option<usize>,
    graph: Option<PathBuf>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--json" => {
                if options.json {
                    return Err(());
                }
                options.json = true;
            }
            "--config" => {
                if options.config.is_some() {
                    return Err(());
                }
                let path = args.next().ok_or(())?;
                options.config = Some(PathBuf::from(path));
            }
            "--ticks" => {
                if options.ticks.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let ticks: usize = raw.parse().map_err(|_| ())?;
                options.ticks = Some(ticks);
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.graph.is_some() {
                    return Err(());
                }
                options.graph = Some(PathBuf::from(arg));
            }
        }
    }

    if options.demo == options.graph.is_some() {
        return Err(());
    }

    Ok(options)
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("{path}: {source}")]
    Graph { path: PathBuf, source: FormatError },
    #[error("failed to encode frame: {0}")]
    Encode(#[from] serde_json::Error),
}

fn read_graph(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path)
        .map_err(|source| CliError::Read { path: path.to_path_buf(), source })
}

fn run(options: CliOptions) -> Result<(), CliError> {
    let config = match &options.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };

    let (source, origin) = match &options.graph {
        Some(path) => (read_graph(path)?, path.clone()),
        None => (DEMO_GRAPH.to_owned(), PathBuf::from("<demo>")),
    };

    let mut builder = QueryBuilder::new(config).with_ontology(Box::new(StaticOntology::biolink()));
    builder
        .load_json(&source)
        .map_err(|source| CliError::Graph { path: origin, source })?;
    let ticks = builder.settle(options.ticks.unwrap_or(DEFAULT_TICKS));
    tracing::debug!(ticks, "layout done");

    if options.json {
        println!("{}", serde_json::to_string_pretty(&builder.frame())?);
        return Ok(());
    }

    for line in builder.sentence() {
        println!("{line}");
    }
    match builder.state().error_message() {
        Some(message) => println!("invalid: {message}"),
        None => println!("valid"),
    }
    Ok(())
}

fn main() {
    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "qgraph".to_owned());

    let options = match parse_options(args) {
        Ok(options) => options,
        Err(()) => {
            print_usage(&program);
            std::process::exit(2);
        }
    };

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(options) {
        eprintln!("qgraph: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use qgraph::format::from_json;

    use super::{parse_options, CliOptions, DEMO_GRAPH};

    fn args(values: &[&str]) -> impl Iterator<Item = String> {
        values.iter().map(|value| (*value).to_owned()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn parses_demo_flag() {
        let options = parse_options(args(&["--demo"])).expect("parse options");
        assert_eq!(options, CliOptions { demo: true, ..CliOptions::default() });
    }

    #[test]
    fn parses_graph_path_with_flags_in_any_order() {
        let options = parse_options(args(&["--json", "graph.json", "--ticks", "50"]))
            .expect("parse options");
        assert_eq!(options.graph, Some(PathBuf::from("graph.json")));
        assert_eq!(options.ticks, Some(50));
        assert!(options.json);
        assert!(!options.demo);
    }

    #[test]
    fn parses_config_path() {
        let options =
            parse_options(args(&["--config", "qgraph.json", "--demo"])).expect("parse options");
        assert_eq!(options.config, Some(PathBuf::from("qgraph.json")));
    }

    #[test]
    fn requires_exactly_one_input() {
        parse_options(args(&[])).unwrap_err();
        parse_options(args(&["--demo", "graph.json"])).unwrap_err();
    }

    #[test]
    fn rejects_unknown_and_duplicate_flags() {
        parse_options(args(&["--nope", "--demo"])).unwrap_err();
        parse_options(args(&["--demo", "--demo"])).unwrap_err();
        parse_options(args(&["--json", "--json", "--demo"])).unwrap_err();
        parse_options(args(&["a.json", "b.json"])).unwrap_err();
    }

    #[test]
    fn rejects_missing_or_bad_values() {
        parse_options(args(&["--demo", "--ticks"])).unwrap_err();
        parse_options(args(&["--demo", "--ticks", "many"])).unwrap_err();
        parse_options(args(&["--demo", "--config"])).unwrap_err();
    }

    #[test]
    fn demo_graph_parses() {
        let graph = from_json(DEMO_GRAPH).expect("demo graph");
        assert_eq!(graph.nodes().len(), 3);
        assert_eq!(graph.edges().len(), 3);
    }
}
