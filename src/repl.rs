//! Interactive chat loop

use crate::present;
use social_agent_core::{
    Coordinator, OpenAiSelector, Result, SocialAgentConfig, ToolRegistry, ToolSelector,
};
use std::io::{self, BufRead, Write};

/// One line of user input
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Quit,
    Help,
    Empty,
    Request(&'a str),
}

fn classify(line: &str) -> Input<'_> {
    let line = line.trim();
    match line.to_lowercase().as_str() {
        "" => Input::Empty,
        "quit" | "exit" | "bye" => Input::Quit,
        "help" => Input::Help,
        _ => Input::Request(line),
    }
}

fn print_welcome(config: &SocialAgentConfig) {
    println!(
        "Welcome to Social Agent v{} ({})",
        social_agent_core::version(),
        config.identity.app_name
    );
    println!("{}", "=".repeat(50));
    println!("I can help you with:");
    println!("  - Weather information for cities");
    println!("  - Social media posts from the latest news");
    println!("  - Jokes (programming, dad, science, general, office)");
    println!("  - AI image generation");
    println!();
    println!("Type 'help' for examples, 'quit', 'exit' or 'bye' to leave.");
    println!("{}", "=".repeat(50));
}

fn print_help() {
    println!("Try asking:");
    println!("  - What's the weather in Tokyo?");
    println!("  - Create social media posts about AI news");
    println!("  - Tell me two programming jokes");
    println!("  - Generate an image of a lighthouse at dawn");
    println!("  - help              show this message");
    println!("  - quit, exit, bye   end the session");
}

/// Run the interactive loop until EOF or a quit command
pub fn run(config: &SocialAgentConfig) -> Result<()> {
    if config.news.credential().is_none() {
        eprintln!("Warning: NEWS_API_KEY not found. News and social media requests will fail.");
        eprintln!("         Get a free API key from https://newsapi.org/");
    }

    let selector = OpenAiSelector::new(&config.coordinator, &config.identity)?;
    tracing::info!(
        model = selector.model(),
        session = %config.identity.session_id,
        "coordinator ready"
    );
    let coordinator = Coordinator::new(ToolRegistry::from_config(config), selector);

    print_welcome(config);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();

    loop {
        print!("\nYou: ");
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!();
            break;
        }

        match classify(&line) {
            Input::Quit => {
                println!("Goodbye!");
                break;
            }
            Input::Help => print_help(),
            Input::Empty => continue,
            Input::Request(request) => println!("\nAgent: {}", respond(&coordinator, request)),
        }
    }

    Ok(())
}

/// Answer one request; failures become a message, the loop keeps going
fn respond<S: ToolSelector>(coordinator: &Coordinator<S>, request: &str) -> String {
    let turn = match coordinator.handle(request) {
        Ok(turn) => turn,
        Err(e) => {
            tracing::error!(error = %e, "request failed");
            return format!("Sorry, something went wrong: {}", e);
        }
    };

    match coordinator.summarize(request, &turn) {
        Ok(Some(answer)) => answer,
        Ok(None) => present::render_turn(&turn),
        Err(e) => {
            tracing::warn!(error = %e, "summary failed, showing raw tool result");
            present::render_turn(&turn)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use social_agent_core::{AgentError, Selection, ToolSpec, WeatherTool};
    use std::sync::Arc;

    struct Fixed(Selection);

    impl ToolSelector for Fixed {
        fn select(&self, _request: &str, _tools: &[ToolSpec]) -> Result<Selection> {
            Ok(self.0.clone())
        }
    }

    struct Failing;

    impl ToolSelector for Failing {
        fn select(&self, _request: &str, _tools: &[ToolSpec]) -> Result<Selection> {
            Err(AgentError::llm("offline"))
        }
    }

    fn registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(WeatherTool::default()));
        registry
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("  \n"), Input::Empty);
        assert_eq!(classify("QUIT\n"), Input::Quit);
        assert_eq!(classify("bye"), Input::Quit);
        assert_eq!(classify(" Help "), Input::Help);
        assert_eq!(classify(" weather in Paris\n"), Input::Request("weather in Paris"));
    }

    #[test]
    fn test_respond_renders_tool_result() {
        let coordinator = Coordinator::new(
            registry(),
            Fixed(Selection::Invoke {
                name: "get_weather".into(),
                arguments: json!({"city": "London"}),
                call_id: None,
            }),
        );
        assert_eq!(
            respond(&coordinator, "London?"),
            "[Weather Agent]\nIt's cloudy in London with a temperature of 15°C."
        );
    }

    #[test]
    fn test_respond_survives_selector_failure() {
        let coordinator = Coordinator::new(registry(), Failing);
        assert!(respond(&coordinator, "hello").starts_with("Sorry, something went wrong"));
    }
}
