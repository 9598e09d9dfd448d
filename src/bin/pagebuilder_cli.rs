//! CLI tool for pagebuilder - inspects the column layout of a stage snapshot
//!
//! Usage:
//!   pagebuilder_cli <stage.json>               # Every column group
//!   pagebuilder_cli <stage.json> --group <id>  # A single column group
//!
//! Prints, per column group, the column widths and their total, the drop
//! zones and the resize handle positions as JSON. Set `RUST_LOG=debug` for
//! engine logs on stderr.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use pagebuilder::column::{
    calculate_drop_positions, column_width, columns_width, determine_column_widths, ColumnWidth,
    DropPosition,
};
use pagebuilder::config::ConfigRegistry;
use pagebuilder::stage::Stage;
use pagebuilder::types::{BlockId, StageSnapshot};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ColumnReport {
    id: BlockId,
    width: f64,
    /// Handle positions, for columns with a right-hand neighbour
    #[serde(skip_serializing_if = "Option::is_none")]
    handles: Option<Vec<ColumnWidth>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GroupReport {
    group: BlockId,
    columns_width: f64,
    columns: Vec<ColumnReport>,
    drop_positions: Vec<DropPosition>,
}

fn group_report(stage: &Stage, group: BlockId) -> GroupReport {
    let group_element = stage.tree.geometry(group).unwrap_or_default();
    let columns = stage
        .tree
        .children(group)
        .iter()
        .map(|&column| ColumnReport {
            id: column,
            width: column_width(stage, column),
            handles: determine_column_widths(stage, column, &group_element).ok(),
        })
        .collect();

    GroupReport {
        group,
        columns_width: columns_width(stage, group),
        columns,
        drop_positions: calculate_drop_positions(stage, group),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: pagebuilder_cli <stage.json> [--group <id>]");
        std::process::exit(1);
    }

    let input_path = &args[1];
    let group_filter = if args.len() > 3 && args[2] == "--group" {
        match args[3].trim_start_matches('#').parse::<u32>() {
            Ok(id) => Some(BlockId(id)),
            Err(e) => {
                eprintln!("Invalid group id {}: {}", args[3], e);
                std::process::exit(1);
            }
        }
    } else {
        None
    };

    // Read input file
    let data = match fs::read_to_string(input_path) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error reading {}: {}", input_path, e);
            std::process::exit(1);
        }
    };

    // Restore the stage
    let snapshot: StageSnapshot = match serde_json::from_str(&data) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error parsing snapshot: {}", e);
            std::process::exit(1);
        }
    };
    let stage = match Stage::from_snapshot(snapshot, ConfigRegistry::builtin()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Invalid snapshot: {}", e);
            std::process::exit(1);
        }
    };

    let groups: Vec<BlockId> = match group_filter {
        Some(group) => {
            if !stage.tree.get(group).is_some_and(|b| b.is_column_group()) {
                eprintln!("Block {} is not a column group", group);
                std::process::exit(1);
            }
            vec![group]
        }
        None => stage
            .tree
            .blocks()
            .filter(|b| b.is_column_group())
            .map(|b| b.id)
            .collect(),
    };

    let reports: Vec<GroupReport> = groups.iter().map(|&g| group_report(&stage, g)).collect();

    let json = match serde_json::to_string_pretty(&reports) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing JSON: {}", e);
            std::process::exit(1);
        }
    };

    io::stdout().write_all(json.as_bytes()).unwrap();
    println!();
}
