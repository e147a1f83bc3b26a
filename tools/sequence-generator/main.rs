use clap::Parser;
use keiro::prelude::*;
use rand::Rng;
use rand::rngs::ThreadRng;
use rand::seq::IndexedRandom;
use std::fs;

/// A CLI tool to generate random campaign sequences for manual testing
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_sequence.json")]
    output: String,

    /// The number of steps to generate
    #[arg(short, long, default_value_t = 12)]
    steps: usize,

    /// Probability that a new step is a condition
    #[arg(long, default_value_t = 0.3)]
    condition_ratio: f64,
}

const SUBJECTS: &[&str] = &[
    "Quick question, {{first_name}}",
    "Ideas for {{company}}",
    "Following up",
    "Hello from our team",
];

const MESSAGES: &[&str] = &[
    "Hi {{first_name}}, I noticed your work as {{position}}.",
    "Hey {{name}}, would love to connect.",
    "Just checking in on my last note.",
    "Thanks for your time!",
];

const TASKS: &[&str] = &["Call {{name}}", "Research {{company}}", "Send a gift"];

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.steps == 0 {
        eprintln!("Error: --steps must be at least 1");
        std::process::exit(1);
    }
    if !(0.0..=1.0).contains(&cli.condition_ratio) {
        eprintln!(
            "Error: --condition-ratio ({}) must be between 0 and 1",
            cli.condition_ratio
        );
        std::process::exit(1);
    }

    println!("Generating a sequence of {} step(s)...", cli.steps);

    let graph = generate_sequence(&mut rng, cli.steps, cli.condition_ratio)?;
    let json_output = to_json(&graph)?;
    fs::write(&cli.output, json_output)?;

    println!(
        "Successfully generated and saved sequence to '{}'",
        cli.output
    );

    Ok(())
}

/// Grows a sequence one step at a time, always attaching to a free slot.
fn generate_sequence(
    rng: &mut ThreadRng,
    steps: usize,
    condition_ratio: f64,
) -> Result<SequenceGraph> {
    let mut graph = SequenceGraph::new();
    // Slots a new step can still hang off.
    let mut open: Vec<ParentLink> = Vec::new();

    for index in 0..steps {
        let parent = if open.is_empty() {
            None
        } else {
            Some(open.swap_remove(rng.random_range(0..open.len())))
        };

        let step: StepType = if rng.random_bool(condition_ratio) {
            random_condition(rng).into()
        } else {
            random_action(rng).into()
        };

        let node_id = graph.insert_node(format!("step-{:03}", index + 1), step.clone(), parent)?;
        fill_content(rng, &mut graph, &node_id, &step)?;

        if rng.random_bool(0.5) {
            let schedule = Schedule::new(rng.random_range(1..=5), DelayUnit::Days);
            graph.set_schedule(node_id.as_str(), schedule)?;
        }

        for branch in step.branches() {
            open.push(ParentLink::new(node_id.clone(), *branch));
        }
    }

    graph.relayout();
    Ok(graph)
}

fn random_action(rng: &mut ThreadRng) -> ActionType {
    *ActionType::ALL.choose(rng).unwrap_or(&ActionType::Email)
}

fn random_condition(rng: &mut ThreadRng) -> ConditionType {
    *ConditionType::ALL
        .choose(rng)
        .unwrap_or(&ConditionType::EmailOpened)
}

fn pick(rng: &mut ThreadRng, texts: &[&str]) -> String {
    texts.choose(rng).copied().unwrap_or_default().to_string()
}

fn fill_content(
    rng: &mut ThreadRng,
    graph: &mut SequenceGraph,
    node_id: &NodeId,
    step: &StepType,
) -> Result<()> {
    let fields: Vec<(TemplateField, String)> = match step {
        StepType::Action(ActionType::Email) => vec![
            (TemplateField::Subject, pick(rng, SUBJECTS)),
            (TemplateField::Message, pick(rng, MESSAGES)),
        ],
        StepType::Action(ActionType::LinkedinMessage | ActionType::LinkedinInvitation) => {
            vec![(TemplateField::Message, pick(rng, MESSAGES))]
        }
        StepType::Action(ActionType::ManualTask) => {
            vec![(TemplateField::TaskTitle, pick(rng, TASKS))]
        }
        _ => Vec::new(),
    };

    for (field, text) in fields {
        graph.update_content(node_id.as_str(), ContentPatch::text(field, text))?;
    }
    Ok(())
}
