//! Declave CLI - inspect declaration facades of a compilation unit model

use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::path::PathBuf;

use declave::config::{self, DeclaveConfig};
use declave::decl::{DeclKind, Declaration};
use declave::model::{loader, NodeId};
use declave::output::{self, DeclRow};
use declave::render::{bound_pairs, SignatureRenderer, SignatureStyle};
use declave::unit::{CompilationUnit, UnitId};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "declave")]
#[command(version = "0.0.1")]
#[command(about = "Declaration facades over JVM-style type models")]
#[command(long_about = r#"
Declave loads a compilation unit model and exposes its declarations
through identity-memoized facades, enabling:
  • Declaration listings across the source and generated realms
  • Signature rendering with generics substitution
  • Per-kind statistics for a unit

Example usage:
  declave inspect --model unit.json
  declave signature --model unit.json --type-name Counter --bind T=String
  declave stats --model unit.json
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the declarations of a unit
    Inspect {
        /// Path to the model document (falls back to declave.toml)
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// Filter by declaration kind (class, method, field, ...)
        #[arg(short, long)]
        kind: Option<String>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Render member signatures of one type
    Signature {
        /// Path to the model document (falls back to declave.toml)
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// Simple name of the type to render
        #[arg(short, long)]
        type_name: String,

        /// Generics binding, repeatable (e.g. --bind T=String)
        #[arg(short, long)]
        bind: Vec<String>,

        /// Render types after the member name
        #[arg(long)]
        type_at_end: bool,
    },

    /// Show statistics about a unit
    Stats {
        /// Path to the model document (falls back to declave.toml)
        #[arg(short, long)]
        model: Option<PathBuf>,
    },

    /// Write a starter declave.toml
    Init {
        /// Default model path to record
        #[arg(short, long)]
        model: Option<String>,

        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Inspect { model, kind, format } => {
            let kind_filter = kind.map(|k| k.parse::<DeclKind>()).transpose()?;
            let model = load_model(model)?;
            let mut unit = CompilationUnit::new(UnitId(0), &model);
            resolve_unit(&mut unit);

            let renderer = SignatureRenderer::new(&model);
            let rows: Vec<DeclRow> = unit
                .declarations()
                .filter(|(_, d)| kind_filter.map(|k| d.kind() == k).unwrap_or(true))
                .map(|(_, d)| DeclRow {
                    kind: d.kind().to_string(),
                    name: d.name().to_string(),
                    visibility: d.visibility().map(|v| v.to_string()).unwrap_or_default(),
                    signature: renderer.signature(d),
                })
                .collect();

            match format.as_str() {
                "json" => println!("{}", output::declarations_json(&rows)?),
                _ => {
                    if !output::is_quiet() {
                        println!("{}", output::section(&format!(
                            "package {} - {} declarations",
                            unit.package_name(),
                            rows.len()
                        )));
                    }
                    println!("{}", output::declarations_table(&rows));
                }
            }
        }

        Commands::Signature { model, type_name, bind, type_at_end } => {
            let bindings: HashMap<String, String> = bind
                .iter()
                .map(|b| parse_binding(b))
                .collect::<anyhow::Result<_>>()?;
            let style = if type_at_end {
                SignatureStyle::TypeAtEnd
            } else {
                SignatureStyle::TypeFirst
            };

            let model = load_model(model)?;
            let mut unit = CompilationUnit::new(UnitId(0), &model);
            let members = members_of_type(&mut unit, &type_name)?;

            let renderer = SignatureRenderer::new(&model);
            for id in members {
                let decl = unit.declaration(id);
                let pairs = match decl {
                    Declaration::Method(m) => {
                        bound_pairs(&model, m.type_parameters(), &bindings)
                    }
                    _ => Vec::new(),
                };
                println!("{}", renderer.resolved_signature(decl, &pairs, style));
            }
        }

        Commands::Stats { model } => {
            let model = load_model(model)?;
            let mut unit = CompilationUnit::new(UnitId(0), &model);

            let nodes: Vec<NodeId> = model.iter().map(|(id, _)| id).collect();
            let mut absent = 0usize;
            for node in nodes {
                if unit.classify(node).is_none() {
                    absent += 1;
                }
            }

            let mut counts: HashMap<DeclKind, usize> = HashMap::new();
            for (_, decl) in unit.declarations() {
                *counts.entry(decl.kind()).or_default() += 1;
            }
            let stats: Vec<(&str, usize)> = DeclKind::all()
                .iter()
                .filter_map(|k| counts.get(k).map(|c| (k.as_str(), *c)))
                .collect();

            println!("{}", output::section(&format!("package {}", unit.package_name())));
            println!("{}", output::stats_table(&stats));
            println!(
                "{} nodes, {} facades, {} without a facade",
                model.len(),
                unit.declaration_count(),
                absent
            );
        }

        Commands::Init { model, force } => {
            let path = config::default_config_path();
            let config = DeclaveConfig {
                model,
                format: None,
            };
            config::write_config(&path, &config, force)?;
            println!("Wrote {}", path.display());
        }
    }

    Ok(())
}

/// Resolve the model path from the CLI or declave.toml, then load it
fn load_model(cli_path: Option<PathBuf>) -> anyhow::Result<declave::Model> {
    let path = match cli_path {
        Some(path) => path,
        None => {
            let config = config::load_config(None)?;
            let from_config = config.and_then(|c| c.model).map(PathBuf::from);
            from_config.ok_or_else(|| {
                anyhow::anyhow!("no model given: pass --model or set one in declave.toml")
            })?
        }
    };

    tracing::info!("Loading model {}", path.display());
    let model = loader::load_model(&path)?;
    tracing::debug!("{} nodes loaded", model.len());
    Ok(model)
}

/// Resolve every type declaration, member, and parameter of the unit
fn resolve_unit(unit: &mut CompilationUnit) {
    let types: Vec<_> = unit
        .source_type_declarations()
        .into_iter()
        .chain(unit.generated_type_declarations())
        .collect();

    for id in types {
        let members: Vec<NodeId> = match unit.declaration(id) {
            Declaration::Class(c) => c.members().to_vec(),
            Declaration::SourceClass(c) => c.members().to_vec(),
            _ => Vec::new(),
        };
        for member in members {
            if unit.classify(member).is_none() {
                tracing::debug!("member node {} has no facade", member.0);
                continue;
            }
            for parameter in member_parameters(unit, member) {
                let _ = unit.classify(parameter);
            }
        }
    }
}

fn member_parameters(unit: &mut CompilationUnit, member: NodeId) -> Vec<NodeId> {
    match unit.classify(member).map(|id| unit.declaration(id)) {
        Some(Declaration::Method(m)) => m.parameters().to_vec(),
        Some(Declaration::Constructor(c)) => c.parameters().to_vec(),
        Some(Declaration::SourceMethod(m)) => m.parameters().to_vec(),
        Some(Declaration::SourceConstructor(c)) => c.parameters().to_vec(),
        _ => Vec::new(),
    }
}

/// Find a type by simple name and return its resolved members
fn members_of_type(unit: &mut CompilationUnit, type_name: &str) -> anyhow::Result<Vec<declave::DeclId>> {
    let types: Vec<_> = unit
        .source_type_declarations()
        .into_iter()
        .chain(unit.generated_type_declarations())
        .collect();

    let found = types
        .into_iter()
        .find(|id| unit.declaration(*id).name() == type_name)
        .ok_or(declave::Error::UnknownType(type_name.to_string()))?;

    let members: Vec<NodeId> = match unit.declaration(found) {
        Declaration::Class(c) => c.members().to_vec(),
        Declaration::SourceClass(c) => c.members().to_vec(),
        _ => Vec::new(),
    };

    let resolved = members
        .into_iter()
        .filter_map(|m| {
            let id = unit.classify(m);
            if id.is_none() {
                tracing::warn!("member node {} of {} has no facade", m.0, type_name);
            }
            id
        })
        .collect();
    Ok(resolved)
}

fn parse_binding(raw: &str) -> anyhow::Result<(String, String)> {
    match raw.split_once('=') {
        Some((name, bound)) if !name.is_empty() && !bound.is_empty() => {
            Ok((name.to_string(), bound.to_string()))
        }
        _ => anyhow::bail!("invalid binding '{}': expected NAME=TYPE", raw),
    }
}
