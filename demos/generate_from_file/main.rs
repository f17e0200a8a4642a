//! Example reading text from a file, training a model, and then printing `n` amount of tokens.
//!
//! Usage: generate_from_file <FILE_PATH> <ORDER> <N>
//! Using `cargo run`: `cargo run --example generate_from_file -- <FILE_PATH> <ORDER> <N>`
//!
//! Set `RUST_LOG=debug` to see what the model is doing.

use ngramish::{ModelConfig, NGramModel, ReadErrorPolicy};

use rand::thread_rng;
use std::process::exit;

const USAGE: &str = "Usage: generate_from_file <FILE_PATH> <ORDER> <N>";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() != 4 {
        println!("{USAGE}");
        exit(1);
    }

    let (Ok(order), Ok(n)) = (args[2].parse(), args[3].parse()) else {
        println!("{USAGE}");
        exit(1);
    };

    let cfg = ModelConfig::builder()
        .order(order)
        .on_read_error(ReadErrorPolicy::Strict)
        .build()
        .unwrap_or_else(|err| {
            eprintln!("{err}");
            exit(1);
        });

    let model = NGramModel::from_config(cfg, &args[1]).unwrap_or_else(|err| {
        eprintln!("{err}");
        exit(1);
    });

    println!("{}", model.generate_text(&mut thread_rng(), n));
}
