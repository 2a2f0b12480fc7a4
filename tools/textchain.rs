/// Text Chain — builds a word-window Markov chain and prints a run of text.
///
/// Usage: textchain <text_doc.txt> [history_size] [--config <generator.ron>]
use markov_text::core::config::GeneratorConfig;
use markov_text::core::text::TextChain;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: textchain <text_doc.txt> [history_size] [--config <generator.ron>]";

/// Slots in the word handoff buffer.
const STREAM_CAPACITY: usize = 10;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut positional = Vec::new();
    let mut config_path = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" if i + 1 < args.len() => {
                i += 1;
                config_path = Some(args[i].clone());
            }
            "--help" | "-h" => {
                println!("{USAGE}");
                process::exit(0);
            }
            other if !other.starts_with("--") => positional.push(other.to_string()),
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("{USAGE}");
                process::exit(1);
            }
        }
        i += 1;
    }

    if positional.is_empty() || positional.len() > 2 {
        eprintln!("{USAGE}");
        process::exit(1);
    }

    let config = match config_path {
        Some(ref path) => GeneratorConfig::load_from_ron(Path::new(path)).unwrap_or_else(|e| {
            eprintln!("Error loading config '{}': {}", path, e);
            process::exit(1);
        }),
        None => GeneratorConfig::default(),
    };

    let history = match positional.get(1) {
        Some(raw) => match raw.parse::<usize>() {
            Ok(n) if n > 0 => n,
            _ => {
                eprintln!("Invalid history size: {}", raw);
                process::exit(1);
            }
        },
        None => config.history,
    };

    let body = std::fs::read_to_string(&positional[0]).unwrap_or_else(|e| {
        eprintln!("Failed to read text: {}", e);
        process::exit(1);
    });

    info!("building chain");
    let words: Vec<String> = body.split_whitespace().map(str::to_string).collect();
    let chain = TextChain::build_streaming(words, history, STREAM_CAPACITY).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    info!("generating text");
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let words = chain
        .generate(&mut rng, config.word_count, config.burn_in)
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            process::exit(1);
        });
    println!("{}", words.join(" "));
}
