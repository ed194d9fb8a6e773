use std::path::PathBuf;

use anyhow::Context as _;
use arena_training::{Trainer, TrainingConfig};
use chrono::Utc;

use crate::{schema::training_history::TrainingHistory, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Move catalog JSON file
    #[arg(long, default_value = "data/moves.json")]
    moves: PathBuf,
    /// Character catalog JSON file
    #[arg(long, default_value = "data/characters.json")]
    characters: PathBuf,
    /// Training config JSON file; missing fields use defaults
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    generations: Option<usize>,
    #[arg(long)]
    population: Option<usize>,
    /// Battles per individual and generation
    #[arg(long)]
    trials: Option<usize>,
    #[arg(long)]
    seed: Option<u64>,
    /// Where to save the champion genome
    #[arg(long, default_value = "champion.json")]
    output: PathBuf,
    /// Where to save the per-generation history
    #[arg(long, default_value = "training_history.json")]
    history: PathBuf,
}

impl TrainArg {
    fn load_config(&self) -> anyhow::Result<TrainingConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_json_file("training config", path)?,
            None => TrainingConfig::default(),
        };
        if let Some(generations) = self.generations {
            config.generations = generations;
        }
        if let Some(population) = self.population {
            config.population_size = population;
        }
        if let Some(trials) = self.trials {
            config.trials = trials;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let catalog = util::read_catalog(&arg.moves, &arg.characters)?;
    let config = arg.load_config()?;

    eprintln!("Training parameters:");
    eprintln!("  Generations: {}", config.generations);
    eprintln!("  Population:  {}", config.population_size);
    eprintln!("  Trials:      {}", config.trials);

    let mut trainer = Trainer::new(&catalog, config.clone())?;
    let mut generations = Vec::with_capacity(config.generations);
    for _ in 0..config.generations {
        let report = trainer.run_generation()?;
        eprintln!(
            "Gen {}: Winrate {:.1}% | MaxFit {:.0} | AvgFit {:.0} | {:?} (stagnation {})",
            report.generation,
            report.win_rate * 100.0,
            report.max_fitness,
            report.mean_fitness,
            report.tier,
            report.stagnation,
        );
        generations.push(report);
    }

    eprintln!("Training completed.");

    let champion = trainer
        .champion()
        .context("Population is empty, no champion to save")?;
    util::save_json_file("genome", champion.genome(), &arg.output)?;

    let history = TrainingHistory {
        trained_at: Utc::now(),
        final_fitness: champion.fitness(),
        config,
        generations,
    };
    util::save_json_file("training history", &history, &arg.history)?;

    eprintln!();
    eprintln!("Champion saved successfully");
    eprintln!("  Path: {}", arg.output.display());
    eprintln!("  History: {}", arg.history.display());
    eprintln!("  Trained at: {}", history.trained_at);
    eprintln!("  Final fitness: {:.3}", history.final_fitness);
    eprintln!("  Parameters: {}", champion.genome().len());

    Ok(())
}
