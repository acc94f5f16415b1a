use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::{Path, PathBuf};

use biolink_engine::{filter_graph, CompiledGraphs, FilterCriteria};
use biolink_graph::{Element, NodeMeta};
use biolink_model::SchemaDocument;

/// Biolink Explorer - compile and query Biolink Model graphs
#[derive(Parser)]
#[command(name = "biolink-explorer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the Biolink Model YAML document
    #[arg(short, long, global = true, default_value = "biolink-model.yaml")]
    schema: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Which compiled graph a command operates on
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum GraphKind {
    Categories,
    Predicates,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile the schema and write visualization elements as JSON
    Compile {
        #[arg(short, long, value_enum, default_value_t = GraphKind::Categories)]
        graph: GraphKind,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the lineage (ancestors or descendants) of one or more nodes
    Lineage {
        #[arg(short, long, value_enum, default_value_t = GraphKind::Categories)]
        graph: GraphKind,

        /// Walk descendants instead of ancestors
        #[arg(short, long)]
        descendants: bool,

        /// Node ids to start from
        #[arg(required = true)]
        nodes: Vec<String>,
    },

    /// Apply the interactive filter pipeline and report what survives
    Filter {
        #[arg(short, long, value_enum, default_value_t = GraphKind::Predicates)]
        graph: GraphKind,

        /// Domain categories to filter by (hierarchical)
        #[arg(long)]
        domain: Vec<String>,

        /// Range categories to filter by (hierarchical)
        #[arg(long)]
        range: Vec<String>,

        /// Hide mixin nodes
        #[arg(long)]
        no_mixins: bool,

        /// Node ids to search for (restricts to their lineages)
        #[arg(long)]
        search: Vec<String>,

        /// Output file for the filtered elements (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the details recorded for a single node
    Show {
        #[arg(short, long, value_enum, default_value_t = GraphKind::Categories)]
        graph: GraphKind,

        /// Node id to look up
        node: String,
    },

    /// Print node/edge counts for both compiled graphs
    Stats,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        eprintln!("Loading schema from {}", cli.schema.display());
    }
    let schema = SchemaDocument::from_file(&cli.schema)
        .with_context(|| format!("could not load schema {}", cli.schema.display()))?;
    let compiled = CompiledGraphs::compile(&schema);

    match cli.command {
        Commands::Compile { graph, output } => {
            let elements = elements_for(&compiled, graph);
            write_elements(elements, output.as_deref())?;
            eprintln!(
                "{} {} elements",
                "compiled".green().bold(),
                elements.len()
            );
        }

        Commands::Lineage {
            graph,
            descendants,
            nodes,
        } => {
            let lineage = match graph {
                GraphKind::Categories if descendants => compiled.category_dag.descendants(&nodes),
                GraphKind::Categories => compiled.category_dag.ancestors(&nodes),
                GraphKind::Predicates if descendants => compiled.predicate_dag.descendants(&nodes),
                GraphKind::Predicates => compiled.predicate_dag.ancestors(&nodes),
            };
            let mut sorted: Vec<&String> = lineage.iter().collect();
            sorted.sort();
            for id in sorted {
                println!("{id}");
            }
        }

        Commands::Filter {
            graph,
            domain,
            range,
            no_mixins,
            search,
            output,
        } => {
            let criteria = FilterCriteria {
                selected_domains: domain,
                selected_ranges: range,
                include_mixins: !no_mixins,
                search_nodes: search,
            };
            let outcome = match graph {
                GraphKind::Categories => filter_graph(
                    &compiled.category_elements,
                    &criteria,
                    &compiled.category_dag,
                    &compiled.category_dag,
                ),
                GraphKind::Predicates => filter_graph(
                    &compiled.predicate_elements,
                    &criteria,
                    &compiled.predicate_dag,
                    &compiled.category_dag,
                ),
            };

            let kept = outcome
                .elements
                .iter()
                .filter(|e| e.as_node().is_some())
                .count();
            let total = elements_for(&compiled, graph)
                .iter()
                .filter(|e| e.as_node().is_some())
                .count();
            eprintln!(
                "{} {kept} of {total} nodes",
                "kept".green().bold()
            );
            if outcome.include_mixins && no_mixins {
                eprintln!(
                    "{}",
                    "note: mixin visibility was forced on because a searched node is a mixin"
                        .yellow()
                );
            }
            write_elements(&outcome.elements, output.as_deref())?;
        }

        Commands::Show { graph, node } => match graph {
            GraphKind::Categories => {
                let Some(found) = compiled.category_dag.node(&node) else {
                    bail!("no category named {node}");
                };
                print_details(&node, found);
            }
            GraphKind::Predicates => {
                let Some(found) = compiled.predicate_dag.node(&node) else {
                    bail!("no predicate named {node}");
                };
                print_details(&node, found);
            }
        },

        Commands::Stats => {
            println!(
                "{}: {} nodes, {} edges",
                "categories".bold(),
                compiled.category_dag.node_count(),
                compiled.category_dag.edge_count()
            );
            println!(
                "{}: {} nodes, {} edges",
                "predicates".bold(),
                compiled.predicate_dag.node_count(),
                compiled.predicate_dag.edge_count()
            );
        }
    }

    Ok(())
}

fn elements_for(compiled: &CompiledGraphs, graph: GraphKind) -> &Vec<Element> {
    match graph {
        GraphKind::Categories => &compiled.category_elements,
        GraphKind::Predicates => &compiled.predicate_elements,
    }
}

fn write_elements(elements: &[Element], output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(elements)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("could not write {}", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn print_details<N: NodeMeta>(id: &str, node: &N) {
    let attributes = node.attributes();

    let mut title = id.bold().to_string();
    if attributes.is_mixin {
        title.push_str(&format!(" {}", "[mixin]".yellow()));
    }
    if attributes.is_symmetric == Some(true) {
        title.push_str(&format!(" {}", "[symmetric]".cyan()));
    }
    println!("{title}");

    if attributes.is_symmetric.is_some() {
        let value = |v: Option<&str>| v.unwrap_or("-").to_string();
        println!(
            "domain: {} -> range: {}",
            value(attributes.domain.as_deref()).green(),
            value(attributes.range.as_deref()).green()
        );
    }
    println!(
        "description: {}",
        attributes.description.as_deref().unwrap_or("-")
    );
    println!(
        "notes: {}",
        attributes
            .notes
            .as_ref()
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    println!(
        "aliases: {}",
        attributes
            .aliases
            .as_ref()
            .map(|a| a.join(", "))
            .unwrap_or_else(|| "-".to_string())
    );
}
