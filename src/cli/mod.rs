// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// The entry point for all user interaction, parsed with clap.
// All business logic is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `train`    — trains the NSE model on an SNLI file
//   2. `classify` — loads a checkpoint and labels one pair

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{ClassifyArgs, Commands, TrainArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "nse-entail",
    version = "0.1.0",
    about = "Train a Neural Semantic Encoder on SNLI pairs, then classify entailment."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use
    /// case. The CLI layer only routes, never computes.
    /// Matching moves the args out of `self`, so the handlers
    /// are associated functions rather than methods.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)    => Self::run_train(args),
            Commands::Classify(args) => Self::run_classify(args),
        }
    }

    fn run_train(args: TrainArgs) -> Result<()> {
        use crate::application::train_use_case::TrainUseCase;

        tracing::info!("Starting training on '{}'", args.data_file);

        // Convert CLI args → application config
        let use_case = TrainUseCase::new(args.into());
        use_case.execute()?;

        println!("Training complete. Checkpoint saved.");
        Ok(())
    }

    fn run_classify(args: ClassifyArgs) -> Result<()> {
        use crate::application::classify_use_case::ClassifyUseCase;

        let use_case = ClassifyUseCase::new(
            args.checkpoint_dir.clone(),
            args.embeddings_file.clone(),
        )?;

        let (label, confidence) =
            use_case.classify_with_confidence(&args.premise, &args.hypothesis)?;
        println!("\nLabel: {} (confidence {:.3})", label.as_str(), confidence);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_args_parse_and_move_out_of_cli() {
        let cli = Cli::parse_from([
            "nse-entail", "classify",
            "--premise", "A dog runs.",
            "--hypothesis", "An animal moves.",
        ]);

        // Same ownership pattern as Cli::run — the args move out
        // of the parsed struct before the handler takes over
        match cli.command {
            Commands::Classify(args) => {
                assert_eq!(args.premise, "A dog runs.");
                assert_eq!(args.hypothesis, "An animal moves.");
                assert_eq!(args.checkpoint_dir, "checkpoints");
            }
            other => panic!("expected classify subcommand, got {other:?}"),
        }
    }

    #[test]
    fn train_args_carry_defaults_into_config() {
        use crate::application::train_use_case::TrainConfig;

        let cli = Cli::parse_from(["nse-entail", "train", "--epochs", "3"]);
        match cli.command {
            Commands::Train(args) => {
                let cfg: TrainConfig = args.into();
                assert_eq!(cfg.epochs, 3);
                assert_eq!(cfg.d_units, 300);
                assert_eq!(cfg.d_hidden, 1024);
            }
            other => panic!("expected train subcommand, got {other:?}"),
        }
    }
}
