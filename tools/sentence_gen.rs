/// Sentence Gen — trains a sentence graph on a text file and prints samples.
///
/// Usage: sentence_gen <input.txt> [--config <generator.ron>] [--seed <n>]
use markov_text::core::config::GeneratorConfig;
use markov_text::core::pipeline::SentenceGenerator;
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: sentence_gen <input.txt> [--config <generator.ron>] [--seed <n>]";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut input = None;
    let mut config_path = None;
    let mut seed = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" if i + 1 < args.len() => {
                i += 1;
                config_path = Some(args[i].clone());
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                seed = Some(args[i].parse::<u64>().unwrap_or_else(|_| {
                    eprintln!("Error: --seed must be a non-negative integer");
                    process::exit(1);
                }));
            }
            "--help" | "-h" => {
                println!("{USAGE}");
                process::exit(0);
            }
            other if input.is_none() && !other.starts_with("--") => {
                input = Some(other.to_string());
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("{USAGE}");
                process::exit(1);
            }
        }
        i += 1;
    }

    let input_path = input.unwrap_or_else(|| {
        eprintln!("{USAGE}");
        process::exit(1);
    });

    let mut config = match config_path {
        Some(ref path) => GeneratorConfig::load_from_ron(Path::new(path)).unwrap_or_else(|e| {
            eprintln!("Error loading config '{}': {}", path, e);
            process::exit(1);
        }),
        None => GeneratorConfig::default(),
    };
    if seed.is_some() {
        config.seed = seed;
    }
    let count = config.sentence_count;

    let mut generator = SentenceGenerator::builder()
        .config(config)
        .train_file(Path::new(&input_path))
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            process::exit(1);
        });

    for _ in 0..count {
        match generator.generate() {
            Ok(sentence) => println!("{}", sentence),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
    }
}
