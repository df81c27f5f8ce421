//! Jokes tool
//!
//! Samples jokes without replacement from a per-category [`JokeSource`].

use super::args::{Arg, Args};
use super::{normalize_key, Echo, Tool, ToolResult, ToolSpec};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

pub const GET_JOKES: &str = "get_jokes";

pub const DEFAULT_CATEGORY: &str = "general";
pub const MIN_COUNT: i64 = 1;
pub const MAX_COUNT: i64 = 5;

const INVALID_CATEGORY: &str = "Invalid category provided. Please provide a valid category name.";
const INVALID_COUNT: &str = "Invalid count. Please provide a number between 1 and 5.";

/// A joke setup and its punchline
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Joke {
    pub joke: String,
    pub punchline: String,
}

impl Joke {
    pub fn new(joke: impl Into<String>, punchline: impl Into<String>) -> Self {
        Self {
            joke: joke.into(),
            punchline: punchline.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct JokesPayload {
    jokes: Vec<Joke>,
    count: usize,
}

/// Source of jokes grouped by category
pub trait JokeSource: Send + Sync {
    /// Category names in presentation order
    fn categories(&self) -> Vec<String>;

    /// The full population for a normalized category name
    fn jokes(&self, category: &str) -> Option<Vec<Joke>>;
}

type JokeTable = [(&'static str, [(&'static str, &'static str); 7])];

const STATIC_JOKES: &JokeTable = &[
    (
        "programming",
        [
            ("Why do programmers prefer dark mode?", "Because light attracts bugs!"),
            (
                "How many programmers does it take to change a light bulb?",
                "None, that's a hardware problem!",
            ),
            ("Why do Java developers wear glasses?", "Because they can't C#!"),
            (
                "A SQL query goes into a bar, walks up to two tables and asks...",
                "Can I join you?",
            ),
            ("Why did the programmer quit his job?", "Because he didn't get arrays!"),
            ("What's a programmer's favorite hangout place?", "Foo Bar!"),
            (
                "Why do programmers always mix up Halloween and Christmas?",
                "Because Oct 31 equals Dec 25!",
            ),
        ],
    ),
    (
        "dad",
        [
            ("I'm reading a book about anti-gravity.", "It's impossible to put down!"),
            (
                "Did you hear about the mathematician who's afraid of negative numbers?",
                "He'll stop at nothing to avoid them!",
            ),
            ("Why don't scientists trust atoms?", "Because they make up everything!"),
            (
                "I told my wife she was drawing her eyebrows too high.",
                "She looked surprised!",
            ),
            ("What do you call a fake noodle?", "An impasta!"),
            ("Why did the scarecrow win an award?", "He was outstanding in his field!"),
            ("I used to hate facial hair...", "But then it grew on me!"),
        ],
    ),
    (
        "science",
        [
            (
                "Two atoms are walking down the street. One says, 'I think I lost an electron!'",
                "The other asks, 'Are you sure?' The first replies, 'Yes, I'm positive!'",
            ),
            ("What did the biologist wear to impress his date?", "Designer genes!"),
            ("Why can't you trust an atom?", "Because they make up everything!"),
            ("What do you call an educated tube?", "A graduated cylinder!"),
            (
                "Why did the physics teacher break up with the biology teacher?",
                "There was no chemistry!",
            ),
            (
                "What's the fastest way to determine the sex of a chromosome?",
                "Pull down its genes!",
            ),
            (
                "I have a new theory on inertia...",
                "But it doesn't seem to be gaining momentum!",
            ),
        ],
    ),
    (
        "general",
        [
            ("Why don't eggs tell jokes?", "They'd crack each other up!"),
            ("What do you call a sleeping bull?", "A bulldozer!"),
            ("Why did the math book look so sad?", "Because it was full of problems!"),
            ("What do you call a bear with no teeth?", "A gummy bear!"),
            ("Why don't skeletons fight each other?", "They don't have the guts!"),
            ("What's orange and sounds like a parrot?", "A carrot!"),
            ("Why did the cookie go to the doctor?", "Because it felt crumbly!"),
        ],
    ),
    (
        "office",
        [
            (
                "Why did the employee get fired from the calendar factory?",
                "He took a day off!",
            ),
            ("What do you call a person who's happy on Monday?", "Retired!"),
            (
                "Why don't meetings ever start on time?",
                "Because punctuality is a deadline issue!",
            ),
            (
                "What's the best thing about Switzerland at work?",
                "I don't know, but their flag is a big plus!",
            ),
            ("Why did the PowerPoint cross the road?", "To get to the other slide!"),
            ("What do you call a printer that can sing?", "A Dell!"),
            (
                "Why do accountants make good comedians?",
                "They know how to work the numbers!",
            ),
        ],
    ),
];

/// Fixed in-memory joke book: five categories of seven jokes
#[derive(Debug, Clone, Default)]
pub struct StaticJokeBook;

impl JokeSource for StaticJokeBook {
    fn categories(&self) -> Vec<String> {
        STATIC_JOKES
            .iter()
            .map(|(name, _)| name.to_string())
            .collect()
    }

    fn jokes(&self, category: &str) -> Option<Vec<Joke>> {
        STATIC_JOKES
            .iter()
            .find(|(name, _)| *name == category)
            .map(|(_, jokes)| {
                jokes
                    .iter()
                    .map(|(joke, punchline)| Joke::new(*joke, *punchline))
                    .collect()
            })
    }
}

/// `get_jokes` tool
pub struct JokesTool {
    source: Arc<dyn JokeSource>,
    rng: Mutex<StdRng>,
}

impl JokesTool {
    pub fn new(source: Arc<dyn JokeSource>) -> Self {
        Self::with_rng(source, StdRng::from_os_rng())
    }

    /// Use a specific RNG, e.g. a seeded one for reproducible draws
    pub fn with_rng(source: Arc<dyn JokeSource>, rng: StdRng) -> Self {
        Self {
            source,
            rng: Mutex::new(rng),
        }
    }

    /// Draw `count` distinct jokes from `category`
    pub fn get_jokes(&self, category: &str, count: i64) -> ToolResult {
        tracing::info!(tool = GET_JOKES, category = %category, count, "tool called");

        let echo = Echo::new().with("category", category).with("count", count);

        if !(MIN_COUNT..=MAX_COUNT).contains(&count) {
            return ToolResult::error(echo, INVALID_COUNT);
        }

        let Some(population) = self.source.jokes(&normalize_key(category)) else {
            return ToolResult::error(
                echo,
                format!(
                    "Sorry, I don't have jokes for the category '{}'. Available categories: {}",
                    category,
                    self.source.categories().join(", ")
                ),
            );
        };

        // count is within 1..=5 here
        let wanted = (count as usize).min(population.len());
        let jokes: Vec<Joke> = {
            let mut rng = self.rng.lock();
            population
                .choose_multiple(&mut *rng, wanted)
                .cloned()
                .collect()
        };

        let payload = JokesPayload {
            count: jokes.len(),
            jokes,
        };
        ToolResult::success(echo, &payload)
    }
}

impl Default for JokesTool {
    fn default() -> Self {
        Self::new(Arc::new(StaticJokeBook))
    }
}

impl Tool for JokesTool {
    fn name(&self) -> &str {
        GET_JOKES
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec::new(
            GET_JOKES,
            "Retrieves between 1 and 5 jokes (setup and punchline) from a category: \
             programming, dad, science, general or office.",
            json!({
                "type": "object",
                "properties": {
                    "category": {
                        "type": "string",
                        "description": "Joke category. Defaults to \"general\"."
                    },
                    "count": {
                        "type": "integer",
                        "minimum": MIN_COUNT,
                        "maximum": MAX_COUNT,
                        "description": "Number of jokes to return (1-5). Defaults to 1."
                    }
                }
            }),
        )
    }

    fn invoke(&self, args: &Value) -> ToolResult {
        let args = Args::new(args);
        let echo = || {
            Echo::new()
                .with("category", args.raw_or("category", DEFAULT_CATEGORY))
                .with("count", args.raw_or("count", MIN_COUNT))
        };

        let Some(category) = args.str("category").or_default(DEFAULT_CATEGORY) else {
            return ToolResult::error(echo(), INVALID_CATEGORY);
        };
        let Some(count) = args.int("count").or_default(MIN_COUNT) else {
            return ToolResult::error(echo(), INVALID_COUNT);
        };

        self.get_jokes(category, count)
    }
}
