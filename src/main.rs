use clap::{Parser, Subcommand};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use sea_battle::prelude::*;
use serde_json::json;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch one computer-versus-computer match, shot by shot.
    Watch {
        #[arg(long, help = "Fix RNG seed for a reproducible match (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Play many computer-versus-computer matches and print statistics as JSON.
    Sim {
        #[arg(long, default_value_t = 100)]
        games: u32,
        #[arg(long, help = "Seed of the first match; match i uses seed + i")]
        seed: Option<u64>,
    },
}

fn rng_for(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => SmallRng::from_rng(&mut rand::rng()),
    }
}

fn watch(seed: Option<u64>) -> anyhow::Result<()> {
    if let Some(s) = seed {
        println!("Using fixed seed: {} (match will be reproducible)", s);
    }
    let mut game = Match::new(Side::opponent(), Side::opponent(), rng_for(seed));
    game.setup()?;
    println!("Side {} fires first.", game.active());

    while game.phase() == Phase::Playing {
        let report = game.play_turn()?;
        let verdict = match report.outcome {
            Some(ShotOutcome::Miss) => "miss".to_string(),
            Some(ShotOutcome::Hit(_)) => "hit".to_string(),
            Some(ShotOutcome::Sunk(id)) => {
                let sunk = &game.sides()[1 - report.shooter];
                let len = sunk.board().ship(id).map_or(0, |s| s.length());
                format!("sunk a ship of length {}", len)
            }
            None => "already fired".to_string(),
        };
        println!("side {} -> {}: {}", report.shooter, report.cell, verdict);
    }

    for (i, side) in game.sides().iter().enumerate() {
        let kind = if side.is_opponent() { "computer" } else { "human" };
        println!(
            "\nSide {} ({}, {}): {} shots, {:.0}% accuracy, {} ships lost",
            i,
            side.name(),
            kind,
            side.shots_fired(),
            side.accuracy() * 100.0,
            side.board().sunk_count()
        );
        print!("{}", side.board());
    }
    match game.result() {
        Some(MatchResult::Won { winner, shots, .. }) => {
            println!("\nSide {} wins after {} shots.", winner, shots)
        }
        Some(MatchResult::Withdrawn { side }) => println!("\nSide {} withdrew.", side),
        None => {}
    }
    Ok(())
}

fn sim(games: u32, seed: Option<u64>) -> anyhow::Result<()> {
    let mut wins = [0u32; 2];
    let mut withdrawn = 0u32;
    let mut winning_shots = Vec::with_capacity(games as usize);

    for i in 0..games {
        let rng = rng_for(seed.map(|s| s.wrapping_add(i as u64)));
        let mut game = Match::new(Side::opponent(), Side::opponent(), rng);
        match game.run()? {
            MatchResult::Won { winner, shots, .. } => {
                wins[winner] += 1;
                winning_shots.push(shots);
            }
            MatchResult::Withdrawn { .. } => withdrawn += 1,
        }
    }

    let mean = if winning_shots.is_empty() {
        0.0
    } else {
        winning_shots.iter().sum::<usize>() as f64 / winning_shots.len() as f64
    };
    let result = json!({
        "games": games,
        "wins": {"side0": wins[0], "side1": wins[1]},
        "withdrawn": withdrawn,
        "winning_shots": {
            "mean": mean,
            "min": winning_shots.iter().min(),
            "max": winning_shots.iter().max(),
        },
    });
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Watch { seed } => watch(seed),
        Commands::Sim { games, seed } => sim(games, seed),
    }
}
