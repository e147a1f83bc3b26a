use clap::{Parser, Subcommand};
use keiro::prelude::*;
use std::fs;
use std::time::Instant;

/// Inspect, lay out and check campaign sequences stored as flat JSON
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Optional JSON file with layout settings (originX, rowHeight, ...)
    #[arg(long, global = true)]
    layout_config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print import warnings, an outline and a branch summary
    Inspect {
        /// Path to the flat sequence JSON file
        sequence_path: String,
    },
    /// Recompute every position and write the result as flat JSON
    Layout {
        /// Path to the flat sequence JSON file
        sequence_path: String,
        /// Where to write the laid out sequence (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Report authoring issues; exits non-zero when any are found
    Validate {
        /// Path to the flat sequence JSON file
        sequence_path: String,
    },
    /// Print the template variables referenced by a text
    Vars {
        /// The text to scan, e.g. "Hi {{firstName}}"
        text: String,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let layout = cli
        .layout_config
        .as_deref()
        .map(load_layout_config)
        .unwrap_or_default();

    match cli.command {
        Command::Inspect { sequence_path } => run_inspect(&sequence_path, layout),
        Command::Layout {
            sequence_path,
            output,
        } => run_layout(&sequence_path, output.as_deref(), layout),
        Command::Validate { sequence_path } => run_validate(&sequence_path, layout),
        Command::Vars { text } => run_vars(&text),
    }
}

fn load_layout_config(path: &str) -> LayoutConfig {
    let json = fs::read_to_string(path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read layout config '{}': {}", path, e))
    });
    serde_json::from_str(&json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse layout config: {}", e)))
}

fn load_sequence(path: &str, options: &ImportOptions) -> FlatImport {
    let json = fs::read_to_string(path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read sequence file '{}': {}", path, e))
    });
    from_json(&json, options)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load sequence: {}", e)))
}

fn run_inspect(path: &str, layout: LayoutConfig) {
    let load_start = Instant::now();
    let options = ImportOptions {
        layout,
        ..ImportOptions::default()
    };
    let import = load_sequence(path, &options);
    let load_duration = load_start.elapsed();

    println!("\n--- Import ---");
    println!("Steps:    {}", import.graph.len());
    println!("Roots:    {}", import.graph.roots().len());
    if import.is_clean() {
        println!("Warnings: none");
    } else {
        println!("Warnings: {}", import.warnings.len());
        for warning in &import.warnings {
            println!("  -> {}", warning);
        }
    }

    println!("\n--- Outline ---");
    println!("{}", OutlineFormatter::format(&import.graph));

    println!("\n--- Branches ---");
    for node in import.graph.nodes() {
        let Some(connections) = import.graph.connections(node.id().as_str()) else {
            continue;
        };
        if connections.is_leaf() {
            continue;
        }
        let targets = connections
            .iter()
            .map(|(branch, child)| format!("{} -> {}", branch.as_str(), child))
            .collect::<Vec<_>>()
            .join(", ");
        println!("  {} ({}): {}", node.id(), node.step(), targets);
    }

    println!("\nLoaded in {:?}", load_duration);
}

fn run_layout(path: &str, output: Option<&str>, layout: LayoutConfig) {
    let options = ImportOptions {
        layout_policy: LayoutPolicy::Always,
        layout,
    };
    let import = load_sequence(path, &options);
    for warning in &import.warnings {
        eprintln!("Warning: {}", warning);
    }

    let json = to_json(&import.graph)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to encode sequence: {}", e)));

    match output {
        Some(out_path) => {
            fs::write(out_path, json).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to write '{}': {}", out_path, e))
            });
            println!(
                "Laid out {} step(s) and saved to '{}'",
                import.graph.len(),
                out_path
            );
        }
        None => println!("{}", json),
    }
}

fn run_validate(path: &str, layout: LayoutConfig) {
    let options = ImportOptions {
        layout,
        ..ImportOptions::default()
    };
    let import = load_sequence(path, &options);
    let issues = import.graph.validate();

    for warning in &import.warnings {
        println!("  -> import: {}", warning);
    }
    for issue in &issues {
        println!("  -> {}", issue);
    }

    if issues.is_empty() && import.is_clean() {
        println!("Sequence is valid ({} step(s)).", import.graph.len());
    } else {
        exit_with_error(&format!(
            "{} issue(s) and {} import warning(s) found",
            issues.len(),
            import.warnings.len()
        ));
    }
}

fn run_vars(text: &str) {
    let variables = extract_variables(text);
    if variables.is_empty() {
        println!("No known variables referenced.");
        return;
    }
    for key in variables {
        println!("{}", key.placeholder());
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
