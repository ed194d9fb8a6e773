use std::{
    io::{self, BufRead as _, Write as _},
    path::PathBuf,
    thread,
    time::Duration,
};

use anyhow::Context as _;
use arena_engine::{Battle, BattleState, Combatant, Effectiveness, MoveEffect, TurnRecord};
use arena_evaluator::{DecisionEngine, PolicyNetwork, network::Topology};
use arena_training::{Genome, TrainingConfig};
use rand::SeedableRng as _;
use rand_pcg::Pcg32;

use crate::util;

const HEALTH_BAR_WIDTH: usize = 20;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct WatchArg {
    /// Champion genome saved by `arena train`
    #[arg(long, default_value = "champion.json")]
    genome: PathBuf,
    /// Move catalog JSON file
    #[arg(long, default_value = "data/moves.json")]
    moves: PathBuf,
    /// Character catalog JSON file
    #[arg(long, default_value = "data/characters.json")]
    characters: PathBuf,
    /// Training config the genome was trained with; supplies the encounter
    /// table and network size
    #[arg(long)]
    config: Option<PathBuf>,
    /// Hidden units of the network, overriding the config
    #[arg(long)]
    hidden: Option<usize>,
    /// Pause after each turn, in milliseconds
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,
    #[arg(long)]
    seed: Option<u64>,
}

impl WatchArg {
    fn load_config(&self) -> anyhow::Result<TrainingConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_json_file("training config", path)?,
            None => TrainingConfig::default(),
        };
        if let Some(hidden) = self.hidden {
            config.hidden_size = hidden;
        }
        Ok(config)
    }
}

pub(crate) fn run(arg: &WatchArg) -> anyhow::Result<()> {
    let config = arg.load_config()?;
    if !arg.genome.exists() {
        anyhow::bail!(
            "Genome file {} not found. Run `arena train` first to produce one.",
            arg.genome.display()
        );
    }
    let genome: Genome = util::read_json_file("genome", &arg.genome)?;
    let network = PolicyNetwork::new(Topology::with_hidden(config.hidden_size), genome.into_vec())
        .with_context(|| format!("Genome {} does not fit the network", arg.genome.display()))?;
    println!("Genome loaded");

    let catalog = util::read_catalog(&arg.moves, &arg.characters)?;
    let engine = DecisionEngine::learned(&catalog, network);
    let encounters = config.encounters;
    let mut rng = match arg.seed {
        Some(seed) => Pcg32::seed_from_u64(seed),
        None => Pcg32::from_rng(&mut rand::rng()),
    };
    let delay = Duration::from_millis(arg.delay_ms);

    loop {
        println!("  NEW EXHIBITION BATTLE  ");
        let mut battle = encounters.build_battle(&catalog, &mut rng)?;
        while battle.state().is_running() {
            print_status(&battle);
            thread::sleep(delay);
            let record = battle.step(&engine)?;
            narrate(&battle, &record);
        }

        let result = match battle.state() {
            BattleState::Victory => "VICTORY",
            BattleState::Defeat => "DEFEAT",
            BattleState::Exhausted | BattleState::Running => "DRAW",
        };
        println!();
        println!(
            ">>> RESULT: {result} | Damage dealt: {:.0}/{:.0}",
            battle.hero_damage_dealt(),
            battle.foe_max_hp_total()
        );

        print!("\n[Enter] next battle, [q] quit: ");
        io::stdout().flush().context("Failed to flush stdout")?;
        let mut line = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        if read == 0 || line.trim().eq_ignore_ascii_case("q") {
            break;
        }
    }
    Ok(())
}

fn print_status(battle: &Battle<'_>) {
    let rule = "=".repeat(40);
    println!();
    println!("{rule}");
    println!("--- TURN {} ---", battle.turn());
    for combatant in battle.roster().iter().filter(|c| c.is_alive()) {
        println!("{}", status_line(combatant));
    }
    println!("{rule}");
    println!();
}

fn status_line(combatant: &Combatant) -> String {
    let icon = if combatant.is_hero() { ":-)" } else { ">:C" };
    let name = combatant.name().chars().take(10).collect::<String>();
    format!(
        "{icon} {name:<10} [{}] {:.0}/{:.0}",
        health_bar(combatant.hp_fraction()),
        combatant.hp().trunc(),
        combatant.stats().hp
    )
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn health_bar(fraction: f32) -> String {
    let width = HEALTH_BAR_WIDTH as f32;
    let filled = (fraction.clamp(0.0, 1.0) * width) as usize;
    let mut bar = "█".repeat(filled);
    bar.push_str(&"░".repeat(HEALTH_BAR_WIDTH - filled));
    bar
}

fn narrate(battle: &Battle<'_>, record: &TurnRecord) {
    match record {
        TurnRecord::Acted {
            actor,
            move_id,
            effects,
            ..
        } => {
            let actor = battle.combatant(*actor).name();
            let move_name = &battle.catalog().move_def(*move_id).name;
            for effect in effects {
                match *effect {
                    MoveEffect::Damage {
                        target,
                        damage,
                        multiplier,
                        ..
                    } => {
                        let target = battle.combatant(target).name();
                        let note = match Effectiveness::from_multiplier(multiplier) {
                            Effectiveness::Super => " (Super effective!)",
                            Effectiveness::Resisted => " (Not very effective...)",
                            Effectiveness::Neutral => "",
                        };
                        println!("{actor} used {move_name} on {target} >> {damage:.0} dmg{note}");
                    }
                    MoveEffect::Heal { healed, .. } => {
                        println!("{actor} used {move_name} and recovered {healed:.0} HP");
                    }
                }
            }
        }
        TurnRecord::Forfeited { actor, .. } => {
            println!("{} has no targets", battle.combatant(*actor).name());
        }
    }
}
