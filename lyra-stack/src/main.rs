use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;

use lyra_aws::{config_for, render_manifest};
use lyra_core::resource::Value;
use lyra_core::stack::Stack;

use crate::config::StackConfig;
use crate::network::declare_network;
use crate::outputs::export_outputs;
use crate::security_groups::declare_security_groups;

mod config;
mod network;
mod outputs;
mod security_groups;

#[derive(Parser)]
#[command(name = "lyra")]
#[command(about = "Declares the Lyra demo network stack for AWS", long_about = None)]
struct Cli {
    /// CIDR block allowed to reach the application tier over SSH
    #[arg(long, global = true, value_name = "CIDR")]
    ssh_cidr: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the declared resources against their schemas
    Validate,
    /// Render the resource manifest as JSON
    Render {
        /// Write the manifest to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// List the exported stack outputs
    Outputs,
    /// Show the resource creation order
    Graph,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let mut config = StackConfig::default();
    if let Some(cidr) = cli.ssh_cidr {
        config = config.with_ssh_cidr(cidr);
    }

    let result = match cli.command {
        Commands::Validate => run_validate(&config),
        Commands::Render { output } => run_render(&config, output.as_deref()),
        Commands::Outputs => run_outputs(&config),
        Commands::Graph => run_graph(&config),
        Commands::Completions { shell } => run_completions(shell),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

/// Declare every resource and output in the stack
fn build_stack(config: &StackConfig) -> Result<Stack, String> {
    let mut stack = Stack::new();

    let network = declare_network(&mut stack, config)
        .map_err(|e| format!("Failed to declare network: {}", e))?;
    let groups = declare_security_groups(&mut stack, config, &network.vpc)
        .map_err(|e| format!("Failed to declare security groups: {}", e))?;
    export_outputs(&mut stack, &network, &groups)
        .map_err(|e| format!("Failed to export outputs: {}", e))?;

    log::debug!(
        "declared {} resources and {} outputs",
        stack.resources().len(),
        stack.outputs().len()
    );

    Ok(stack)
}

fn validate_resources(stack: &Stack) -> Result<(), String> {
    let mut all_errors = Vec::new();

    for (binding, resource) in stack.resources() {
        match config_for(&resource.id.resource_type) {
            Some(config) => {
                if let Err(errors) = config.schema.validate(&resource.attributes) {
                    for error in errors {
                        all_errors.push(format!(
                            "{}.{}: {}",
                            resource.id.resource_type, resource.id.name, error
                        ));
                    }
                }
            }
            None => {
                all_errors.push(format!(
                    "{}: unknown resource type '{}'",
                    binding, resource.id.resource_type
                ));
            }
        }
    }

    if all_errors.is_empty() {
        Ok(())
    } else {
        Err(all_errors.join("\n"))
    }
}

fn run_validate(config: &StackConfig) -> Result<(), String> {
    let stack = build_stack(config)?;

    println!("{}", "Validating...".cyan());

    validate_resources(&stack)?;

    // Surfaces undeclared references and dependency cycles
    stack.creation_order().map_err(|e| e.to_string())?;

    println!(
        "{}",
        format!(
            "✓ {} resources validated successfully.",
            stack.resources().len()
        )
        .green()
        .bold()
    );

    for (_, resource) in stack.resources() {
        println!("  • {}.{}", resource.id.resource_type, resource.id.name);
    }

    Ok(())
}

fn run_render(config: &StackConfig, output: Option<&Path>) -> Result<(), String> {
    let stack = build_stack(config)?;

    validate_resources(&stack)?;

    let manifest = render_manifest(&stack, &config.project, &config.region)
        .map_err(|e| format!("Failed to render manifest: {}", e))?;
    log::debug!("rendered manifest with {} resources", manifest.resources.len());

    let json = serde_json::to_string_pretty(&manifest)
        .map_err(|e| format!("Failed to serialize manifest: {}", e))?;

    match output {
        Some(path) => {
            fs::write(path, json)
                .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
            println!(
                "{}",
                format!("✓ Manifest written to {}", path.display())
                    .green()
                    .bold()
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn run_outputs(config: &StackConfig) -> Result<(), String> {
    let stack = build_stack(config)?;

    println!("{}", "Outputs:".cyan());
    for (name, value) in stack.outputs() {
        println!("  {} -> {}", name, format_value(value).cyan());
    }

    Ok(())
}

fn run_graph(config: &StackConfig) -> Result<(), String> {
    let stack = build_stack(config)?;
    let graph = stack.graph();
    let order = stack.creation_order().map_err(|e| e.to_string())?;
    log::debug!("computed creation order for {} resources", order.len());

    println!("{}", "Creation order:".cyan());
    for (i, binding) in order.iter().enumerate() {
        let targets = graph.dependency_targets(binding);
        if targets.is_empty() {
            println!("  {:2}. {}", i + 1, binding);
        } else {
            println!(
                "  {:2}. {} {}",
                i + 1,
                binding,
                format!("(depends on {})", targets.join(", ")).dimmed()
            );
        }
    }

    Ok(())
}

fn run_completions(shell: Shell) -> Result<(), String> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "lyra", &mut io::stdout());
    Ok(())
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{}\"", s),
        Value::Int(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::List(items) => {
            let strs: Vec<_> = items.iter().map(format_value).collect();
            format!("[{}]", strs.join(", "))
        }
        Value::Map(map) => {
            let strs: Vec<_> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", k, format_value(v)))
                .collect();
            format!("{{{}}}", strs.join(", "))
        }
        Value::Ref(binding, attr) => format!("{}.{}", binding, attr),
    }
}
