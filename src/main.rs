//! Social Agent - routes chat requests to weather, news, jokes and image tools
//!
//! Commands:
//! - `chat` (default): interactive session through the language model coordinator
//! - `call <tool> key=value...`: run one tool directly, no language model involved
//! - `tools`: print the tool specs in OpenAI function-calling form
//! - `init`: print a sample `.social-agent.toml`
//! - `version`: print the version

mod present;
mod repl;

use serde_json::{Map, Value};
use social_agent_core::config::{load_config, sample_config};
use social_agent_core::{AgentError, Result, ToolRegistry};
use std::sync::Once;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing subscriber (only once)
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::new(
                std::env::var("RUST_LOG")
                    .unwrap_or_else(|_| "social_agent=info,social_agent_core=info".into()),
            ))
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    });
}

#[derive(Debug, PartialEq)]
enum Command {
    Chat,
    Call { tool: String, pairs: Vec<String> },
    Tools,
    Init,
    Version,
    Help,
}

/// Command-line arguments
struct Args {
    command: Command,
}

impl Args {
    /// Parse command-line arguments
    fn parse() -> Self {
        Self::parse_from(std::env::args().skip(1))
    }

    fn parse_from(args: impl IntoIterator<Item = String>) -> Self {
        let mut args = args.into_iter();

        let command = match args.next().as_deref() {
            None | Some("chat") => Command::Chat,
            Some("call") => match args.next() {
                Some(tool) => Command::Call {
                    tool,
                    pairs: args.collect(),
                },
                None => Command::Help,
            },
            Some("tools") => Command::Tools,
            Some("init") => Command::Init,
            Some("version" | "--version" | "-V") => Command::Version,
            _ => Command::Help,
        };

        Self { command }
    }
}

fn print_usage() {
    println!("Usage: social-agent [COMMAND]");
    println!();
    println!("Commands:");
    println!("  chat                      Interactive session (default)");
    println!("  call <tool> key=value...  Run one tool directly");
    println!("  tools                     Print tool specs as JSON");
    println!("  init                      Print a sample .social-agent.toml");
    println!("  version                   Print the version");
    println!();
    println!("Examples:");
    println!("  social-agent call get_weather city=\"New York\"");
    println!("  social-agent call get_jokes category=programming count=3");
}

/// Turn `key=value` pairs into JSON tool arguments
///
/// Values that parse as integers become JSON numbers; everything else is a
/// string.
fn parse_call_args(pairs: &[String]) -> Result<Value> {
    let mut map = Map::new();
    for pair in pairs {
        let (key, value) = pair.split_once('=').ok_or_else(|| {
            AgentError::invalid_operation(format!("Expected key=value, got '{}'", pair))
        })?;
        let value = match value.parse::<i64>() {
            Ok(n) => Value::from(n),
            Err(_) => Value::String(value.to_string()),
        };
        map.insert(key.to_string(), value);
    }
    Ok(Value::Object(map))
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Help => {
            print_usage();
            return Ok(());
        }
        Command::Init => {
            print!("{}", sample_config());
            return Ok(());
        }
        Command::Version => {
            println!("social-agent {}", social_agent_core::version());
            return Ok(());
        }
        _ => {}
    }

    let cwd = std::env::current_dir()?;
    let config = load_config(&cwd)?;

    match command {
        Command::Chat => repl::run(&config),
        Command::Tools => {
            let registry = ToolRegistry::from_config(&config);
            let specs: Vec<Value> = registry.specs().iter().map(|s| s.to_openai()).collect();
            println!("{}", serde_json::to_string_pretty(&specs)?);
            Ok(())
        }
        Command::Call { tool, pairs } => {
            let arguments = parse_call_args(&pairs)?;
            let registry = ToolRegistry::from_config(&config);
            let result = registry.invoke(&tool, &arguments)?;
            println!("{}", present::render(&tool, &result));
            println!();
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Command::Help | Command::Init | Command::Version => Ok(()),
    }
}

fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Args::parse();
    if let Err(e) = run(args.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
