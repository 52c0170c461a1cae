use std::path::PathBuf;

use clap::{Parser, Subcommand};
use fleetwar::session::{load_state, run_local_game, save_states, PlayerKind, SessionConfig};
use fleetwar::init_logging;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play two computer players against each other on this machine.
    Local {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value = "player1")]
        player1_name: String,
        #[arg(long, default_value = "player2")]
        player2_name: String,
        #[arg(long, value_enum, default_value_t = PlayerKind::Hunting)]
        player1: PlayerKind,
        #[arg(long, value_enum, default_value_t = PlayerKind::Random)]
        player2: PlayerKind,
        #[arg(long, help = "Directory to write both players' final state as JSON")]
        save_dir: Option<PathBuf>,
    },
    /// Render a player state saved with `local --save-dir`.
    Show { state_file: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Local {
            seed,
            player1_name,
            player2_name,
            player1,
            player2,
            save_dir,
        } => {
            if let Some(s) = seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            let config = SessionConfig {
                names: [player1_name, player2_name],
                kinds: [player1, player2],
                seed,
            };
            let report = run_local_game(&config).await?;

            for state in report.game.states() {
                println!("{}\n", state.render_both_boards());
            }
            for node in &report.players {
                println!("{}: {} after {} shots", node.name(), node.outcome(), node.shot_count());
            }
            match report.winner() {
                Some(name) => println!("Winner: {}", name),
                None => println!("No winner"),
            }

            if let Some(dir) = save_dir {
                for path in save_states(&report.game, &dir)? {
                    println!("Saved {}", path.display());
                }
            }
        }
        Commands::Show { state_file } => {
            let state = load_state(&state_file)?;
            println!("{}", state.render_both_boards());
            println!(
                "{} ships afloat: {}",
                state.name(),
                if state.is_alive() { "yes" } else { "no" }
            );
        }
    }
    Ok(())
}
