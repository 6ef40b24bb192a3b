mod cli;

use std::process::ExitCode;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use cyk::error_handling::Error;
use cyk::generator;

fn main() -> ExitCode {
    pretty_env_logger::init();
    let cli = cli::Cli::parse();

    let grammar = match cli::build_grammar(&cli) {
        Ok(grammar) => grammar,
        Err(errors) => {
            for error in errors {
                eprintln!("{}", error);
            }
            return ExitCode::FAILURE;
        }
    };

    if cli.show_grammar {
        println!("{}", grammar);
    }

    let mut failed = false;
    for (i, word) in cli.words.iter().enumerate() {
        match cli::check_word(&grammar, word) {
            Ok((derived, table)) => {
                println!("{}: {}", word, if derived { "accepted" } else { "rejected" });
                if cli.table {
                    print!("{}", table);
                }
            }
            Err(error) => {
                eprintln!("{}", Error::at("word", i + 1, error));
                failed = true;
            }
        }
    }

    if let Some(amount) = cli.generate {
        let mut rng = match cli.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        match generator::generate_many(&grammar, &mut rng, amount, cli.max_depth) {
            Ok(words) => words.iter().for_each(|word| println!("{}", word)),
            Err(error) => {
                eprintln!("{}", Error::at("--generate", 0, error));
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
