use clap::Parser;
use flowcalc::prelude::*;
use std::io::{self, BufRead, Write};
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Replays or interactively drives a block-chain editing session
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a JSON script of editor actions
    script_path: Option<String>,

    /// Run in interactive mode, reading one action per line
    #[arg(short = 'i', long)]
    interactive: bool,

    /// Log every graph mutation
    #[arg(short, long)]
    verbose: bool,

    /// Distance on each axis within which a dropped block snaps to a neighbor
    #[arg(long, default_value_t = SNAP_DISTANCE)]
    snap_distance: f64,

    /// Horizontal footprint of a block on the canvas
    #[arg(long, default_value_t = BLOCK_WIDTH)]
    block_width: f64,

    /// Accept wires that close a cycle (evaluation will then report it)
    #[arg(long)]
    no_cycle_guard: bool,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let mut editor = Editor::builder()
        .with_policy_config(PolicyConfig {
            block_width: cli.block_width,
            snap_distance: cli.snap_distance,
            cycle_guard: !cli.no_cycle_guard,
        })
        .build();

    if cli.interactive {
        run_interactive(&mut editor);
    } else {
        run_script(&mut editor, cli.script_path);
    }
}

/// Runs every action of a script file, then computes the final chain.
fn run_script(editor: &mut Editor, script_path: Option<String>) {
    let script_path = script_path.unwrap_or_else(|| {
        exit_with_error("A script path is required in non-interactive mode.");
    });

    let load_start = Instant::now();
    let script = EditorScript::from_file(&script_path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load script: {}", e)));
    let load_duration = load_start.elapsed();

    println!("Replaying {} actions from '{}'...", script.actions.len(), script_path);
    let replay_start = Instant::now();
    for action in script.actions {
        let outcome = editor.apply(action);
        println!("  {}", describe_outcome(&outcome));
    }
    let replay_duration = replay_start.elapsed();

    print_graph(editor);
    println!();
    print_result(editor);

    println!("\n--- Performance Summary ---");
    println!("Script Loading:  {:?}", load_duration);
    println!("Replay:          {:?}", replay_duration);
}

/// Runs the CLI in an interactive, human-friendly mode with prompts.
fn run_interactive(editor: &mut Editor) {
    println!("--- flowcalc Interactive Mode ---");
    print_help();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            return;
        }

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => exit_with_error(&format!("Failed to read input: {}", e)),
            None => return,
        };

        match line.trim() {
            "" => continue,
            "quit" | "exit" => return,
            "help" => print_help(),
            "list" => print_graph(editor),
            command => match parse_command(command) {
                Ok(action) => {
                    let outcome = editor.apply(action);
                    println!("{}", describe_outcome(&outcome));
                }
                Err(message) => println!("{}", message),
            },
        }
    }
}

/// Parses one interactive command into an editor action.
fn parse_command(command: &str) -> Result<EditorAction, String> {
    let parts: Vec<&str> = command.split_whitespace().collect();
    let action = match parts.as_slice() {
        ["add", kind] => EditorAction::AddBlock {
            kind: parse_kind(kind),
            position: None,
        },
        ["add", kind, x, y] => EditorAction::AddBlock {
            kind: parse_kind(kind),
            position: Some(parse_position(x, y)?),
        },
        ["set", id, value] => EditorAction::SetValue {
            id: BlockId::from(*id),
            value: value.to_string(),
        },
        ["set", id] => EditorAction::SetValue {
            id: BlockId::from(*id),
            value: String::new(),
        },
        ["move", id, x, y] => EditorAction::MoveBlock {
            id: BlockId::from(*id),
            position: parse_position(x, y)?,
        },
        ["delete", id] => EditorAction::DeleteBlock {
            id: BlockId::from(*id),
        },
        ["connect", source, target] => EditorAction::Connect {
            source: BlockId::from(*source),
            target: BlockId::from(*target),
        },
        ["disconnect", source] => EditorAction::Disconnect {
            source: BlockId::from(*source),
        },
        ["compute"] => EditorAction::Compute,
        _ => return Err(format!("Unknown command '{}'. Type 'help' for usage.", command)),
    };
    Ok(action)
}

fn parse_kind(name: &str) -> BlockKind {
    match name {
        "input" => BlockKind::Input,
        "add" => BlockKind::Add,
        "multiply" | "mul" => BlockKind::Multiply,
        other => BlockKind::Custom(other.to_string()),
    }
}

fn parse_position(x: &str, y: &str) -> Result<Position, String> {
    let x = x
        .parse::<f64>()
        .map_err(|_| format!("'{}' is not a valid coordinate", x))?;
    let y = y
        .parse::<f64>()
        .map_err(|_| format!("'{}' is not a valid coordinate", y))?;
    Ok(Position::new(x, y))
}

fn describe_outcome(outcome: &ActionOutcome) -> String {
    match outcome {
        ActionOutcome::Added(Ok(block)) => {
            format!("Added {} block '{}' at {}", block.kind, block.id, block.position)
        }
        ActionOutcome::Added(Err(e)) => format!("Add refused: {}", e),
        ActionOutcome::ValueUpdated(true) => "Value updated".to_string(),
        ActionOutcome::ValueUpdated(false) => "No such operation block; value ignored".to_string(),
        ActionOutcome::Moved(None) => "No such block; move ignored".to_string(),
        ActionOutcome::Moved(Some(SnapOutcome::NoCandidate)) => "Moved".to_string(),
        ActionOutcome::Moved(Some(SnapOutcome::Connected { source_id, anchor })) => {
            format!("Snapped to {} and wired after '{}'", anchor, source_id)
        }
        ActionOutcome::Moved(Some(SnapOutcome::Rejected {
            source_id,
            anchor,
            reason,
        })) => format!(
            "Snapped to {} but could not wire after '{}': {}",
            anchor, source_id, reason
        ),
        ActionOutcome::Deleted(Some(block)) => format!("Deleted block '{}'", block.id),
        ActionOutcome::Deleted(None) => "Nothing deleted".to_string(),
        ActionOutcome::Connected(Ok(())) => "Connected".to_string(),
        ActionOutcome::Connected(Err(e)) => format!("Connection rejected: {}", e),
        ActionOutcome::Disconnected(Some(wire)) => format!("Removed wire {}", wire),
        ActionOutcome::Disconnected(None) => "No wire to remove".to_string(),
        ActionOutcome::Computed(Ok(result)) => format!(
            "Result: {} ({})",
            TraceFormatter::format_number(result.value),
            result.reason()
        ),
        ActionOutcome::Computed(Err(e)) => format!("Evaluation failed: {}", e),
    }
}

fn print_graph(editor: &Editor) {
    println!("\n--- Graph ---");
    for block in editor.list_blocks() {
        match &block.value {
            Some(value) => println!(
                "  [{}] {} '{}' at {}",
                block.id, block.kind, value, block.position
            ),
            None => println!("  [{}] {} at {}", block.id, block.kind, block.position),
        }
    }
    for wire in editor.list_wires() {
        println!("  {}", wire);
    }
}

fn print_result(editor: &Editor) {
    match editor.compute() {
        Ok(result) => {
            println!("  -> Result: {}", TraceFormatter::format_number(result.value));
            println!("  -> Reason: {}", result.reason());
        }
        Err(e) => println!("  -> Evaluation failed: {}", e),
    }
}

fn print_help() {
    println!("Commands:");
    println!("  add <input|add|multiply> [x y]   add a block");
    println!("  set <id> <value>                 set an operand");
    println!("  move <id> <x> <y>                drop a block, snapping if near a neighbor");
    println!("  delete <id>                      delete a block and its wires");
    println!("  connect <source> <target>        wire source output to target input");
    println!("  disconnect <source>              remove the wire leaving a block");
    println!("  compute                          evaluate the chain");
    println!("  list                             show blocks and wires");
    println!("  quit                             leave");
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
