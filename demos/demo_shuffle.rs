use optbind::derive::*;
use optbind::prelude::*;
use optbind::{Input, Seeded};
use rand::seq::SliceRandom;

#[derive(Debug, Default, PartialEq, OptEnum)]
enum Order {
    #[default]
    Keep,
    Reverse,
    Shuffle,
}

#[derive(Debug, Default, Options)]
struct Shuffle {
    #[opt(gloss = "The file to read; '-' for standard input.", required)]
    input: Option<Input>,
    #[opt(gloss = "How to order the lines.")]
    order: Order,
    #[opt(name = "seed", gloss = "The shuffle seed; 0 for a random seed.")]
    random: Option<Seeded>,
    #[opt(gloss = "Only print lines containing each of these words.")]
    filters: Vec<String>,
}

fn main() {
    let shuffle = Shuffle::parse_args();
    let Some(mut input) = shuffle.input else {
        eprintln!("No input to read.");
        std::process::exit(1);
    };
    let text = match input.read_text() {
        Ok(text) => text,
        Err(error) => {
            eprintln!("Failed to read '{}': {error}", input.source());
            std::process::exit(1);
        }
    };
    let mut lines: Vec<&str> = text
        .lines()
        .filter(|line| shuffle.filters.iter().all(|word| line.contains(word.as_str())))
        .collect();

    match shuffle.order {
        Order::Keep => {}
        Order::Reverse => lines.reverse(),
        Order::Shuffle => {
            let mut random = shuffle.random.unwrap_or_default();
            lines.shuffle(&mut random);
        }
    }

    for line in lines {
        println!("{line}");
    }
}
