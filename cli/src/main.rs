//! Edmonds matching CLI
//!
//! Loads a graph document, computes a maximum cardinality matching and prints
//! it as text or JSON, optionally with the structural event trace.

mod args;
mod input;

use clap::Parser;
use edmonds_core::execution::tracer::TracePoint;
use edmonds_core::{Algorithm, AlgorithmMetrics, BlossomMatcher, ExecutionTracer, NodeId, TraceEvent};
use log::info;
use serde::Serialize;

use args::{Args, OutputFormat};

#[derive(Debug, Serialize)]
struct Report<'a> {
    size: usize,
    pairs: Vec<(NodeId, NodeId)>,
    metrics: &'a AlgorithmMetrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace: Option<&'a [TracePoint]>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .init();

    let graph = input::load_graph(&args.graph)?;
    info!(
        "Loaded {} with {} vertices and {} edges",
        args.graph.display(),
        graph.node_count(),
        graph.edge_count()
    );

    let mut matcher = BlossomMatcher::new();
    matcher.set_parameter("verification", args.verification.as_parameter())?;

    let mut tracer = ExecutionTracer::new();
    let sink = if args.trace {
        Some(&mut tracer as &mut dyn edmonds_core::ProgressSink)
    } else {
        None
    };
    let result = matcher.execute_with_tracing(&graph, sink)?;

    let report = Report {
        size: result.matching.len(),
        pairs: result.matching.pairs(),
        metrics: &result.metrics,
        trace: args.trace.then(|| tracer.points()),
    };

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_text(&report),
    }

    Ok(())
}

fn print_text(report: &Report<'_>) {
    for (a, b) in &report.pairs {
        println!("{a} - {b}");
    }
    println!(
        "matching size {} ({} phases, {} augmentations, {} blossoms, {:?})",
        report.size,
        report.metrics.phases,
        report.metrics.augmentations,
        report.metrics.blossoms_contracted,
        report.metrics.execution_time
    );

    let Some(trace) = report.trace else {
        return;
    };
    println!();
    for point in trace {
        match &point.event {
            TraceEvent::TreeEdgeAdded { parent, child } => {
                println!("{:>5}  tree      {parent} -> {child}", point.step)
            }
            TraceEvent::BlossomContracted { base, members } => {
                let members: Vec<String> = members.iter().map(NodeId::to_string).collect();
                println!("{:>5}  blossom   base {base} [{}]", point.step, members.join(", "))
            }
            TraceEvent::PathAugmented { pairs } => {
                let pairs: Vec<String> = pairs.iter().map(|(a, b)| format!("{a}-{b}")).collect();
                println!("{:>5}  augment   {}", point.step, pairs.join(" "))
            }
        }
    }
}
