//! Handler functions for graph CLI commands.
//!
//! Implements `protolex graph {related,path,stats,export}`.

use crate::catalog_handlers::open_knowledge_base;
use crate::cli::GraphSubcommand;
use crate::config::ProtolexConfig;
use protolex::graph::query::{path, NodeSummary};
use protolex::graph::{compute_stats, save_graph, top_nodes_by_degree, DegreeDirection, GraphMetadata};
use protolex_core::{Error, Result};
use std::path::PathBuf;

/// Handle a graph subcommand.
pub fn handle_graph_command(config: &ProtolexConfig, command: GraphSubcommand) -> Result<()> {
    match command {
        GraphSubcommand::Related { id, json } => handle_related(config, &id, json),
        GraphSubcommand::Path { from, to, json } => handle_path(config, &from, &to, json),
        GraphSubcommand::Stats { json } => handle_stats(config, json),
        GraphSubcommand::Export { output } => handle_export(config, output.as_deref()),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| Error::serialization(format!("failed to serialize output: {e}")))?;
    println!("{json}");
    Ok(())
}

fn describe(node: &NodeSummary) -> String {
    match &node.category {
        Some(category) => format!("{} ({}, {category})", node.id, node.name),
        None => format!("{} ({})", node.id, node.name),
    }
}

// ============================================================================
// Command handlers
// ============================================================================

fn handle_related(config: &ProtolexConfig, id: &str, json: bool) -> Result<()> {
    let kb = open_knowledge_base(config)?;
    let response = kb.related(id)?;

    if json {
        return print_json(&response);
    }

    println!("Related to '{}':", response.source.id);
    println!("  References:");
    if response.outgoing.is_empty() {
        println!("    (none)");
    }
    for node in &response.outgoing {
        println!("    - {}", describe(node));
    }
    println!("  Referenced by:");
    if response.incoming.is_empty() {
        println!("    (none)");
    }
    for node in &response.incoming {
        println!("    - {}", describe(node));
    }
    println!("\n{} related protocol(s)", response.total_count);
    Ok(())
}

fn handle_path(config: &ProtolexConfig, from: &str, to: &str, json: bool) -> Result<()> {
    let kb = open_knowledge_base(config)?;
    let response = path(&kb.snapshot().graph, from, to)?;

    if json {
        return print_json(&response);
    }

    if !response.found {
        println!("No reference path from '{from}' to '{to}'.");
        return Ok(());
    }

    println!("Path from '{from}' to '{to}' ({} hop(s)):", response.length);
    for (step, node) in response.path.iter().enumerate() {
        println!("  {}. {}", step + 1, describe(node));
    }
    Ok(())
}

fn handle_stats(config: &ProtolexConfig, json: bool) -> Result<()> {
    let kb = open_knowledge_base(config)?;
    let snapshot = kb.snapshot();
    let stats = compute_stats(&snapshot.graph);

    if json {
        return print_json(&stats);
    }

    println!("Graph Statistics");
    println!("================");
    println!("Protocols:      {}", stats.node_count);
    println!("  Orphans:      {}", stats.orphan_count);
    println!("References:     {}", stats.edge_count);
    println!("  One-way:      {}", stats.asymmetric_count);
    println!("Cycles:         {}", stats.cycle_count);
    println!("Avg degree:     {:.2}", stats.avg_degree);
    println!("Max in-degree:  {}", stats.max_in_degree);
    println!("Max out-degree: {}", stats.max_out_degree);

    if let Some(id) = &stats.most_referenced {
        println!("Most referenced: {id}");
    }
    if let Some(id) = &stats.most_references {
        println!("Most references: {id}");
    }

    if !stats.category_distribution.is_empty() {
        println!("\nCategories:");
        for (category, count) in &stats.category_distribution {
            println!("  {category}: {count}");
        }
    }

    let top = top_nodes_by_degree(&snapshot.graph, 5, DegreeDirection::Both);
    if !top.is_empty() {
        println!("\nMost connected:");
        for (id, degree) in top {
            println!("  {id}: {degree}");
        }
    }
    Ok(())
}

fn handle_export(config: &ProtolexConfig, output: Option<&str>) -> Result<()> {
    let output_path = match output {
        Some(p) => PathBuf::from(p),
        None => config.graph_path()?,
    };

    let kb = open_knowledge_base(config)?;
    let snapshot = kb.snapshot();
    let metadata = GraphMetadata::for_fingerprint(snapshot.fingerprint.clone());
    save_graph(&snapshot.graph, &output_path, Some(metadata))?;

    println!(
        "Graph exported: {} protocol(s), {} reference(s)",
        snapshot.graph.node_count(),
        snapshot.graph.edge_count()
    );
    println!("Graph saved to: {}", output_path.display());
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
