use fleetwar::session::{run_local_game, PlayerKind, SessionConfig};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <seed>", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;

    let config = SessionConfig {
        names: ["player1".to_string(), "player2".to_string()],
        kinds: [PlayerKind::Hunting, PlayerKind::Random],
        seed: Some(seed),
    };
    let report = run_local_game(&config).await?;
    let [p1, p2] = &report.players;

    let result = json!({
        "seed": seed,
        "player1": {"outcome": p1.outcome().to_string(), "shots": p1.shot_count()},
        "player2": {"outcome": p2.outcome().to_string(), "shots": p2.shot_count()},
        "winner": report.winner(),
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
