//! Local play: a game and two computer players, each behind its own mailbox.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::game::Game;
use crate::mailbox::Mailbox;
use crate::player::Player;
use crate::player_ai::{HuntingPlayer, RandomPlayer};
use crate::player_node::PlayerNode;
use crate::player_state::PlayerState;
use crate::protocol::{Message, MessageBody, MessageTarget};

/// Which strategy drives a computer player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PlayerKind {
    Hunting,
    Random,
}

impl PlayerKind {
    pub fn build(&self) -> Box<dyn Player> {
        match self {
            PlayerKind::Hunting => Box::new(HuntingPlayer::new()),
            PlayerKind::Random => Box::new(RandomPlayer::new()),
        }
    }
}

/// Who plays, with what strategy, and from which seed.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub names: [String; 2],
    pub kinds: [PlayerKind; 2],
    /// Player one is seeded with `seed`, player two with `seed + 1`.
    /// `None` seeds both from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            names: ["player1".to_string(), "player2".to_string()],
            kinds: [PlayerKind::Hunting, PlayerKind::Random],
            seed: None,
        }
    }
}

impl SessionConfig {
    fn rngs(&self) -> [SmallRng; 2] {
        match self.seed {
            Some(s) => [SmallRng::seed_from_u64(s), SmallRng::seed_from_u64(s.wrapping_add(1))],
            None => {
                let mut seed_rng = rand::rng();
                [SmallRng::from_rng(&mut seed_rng), SmallRng::from_rng(&mut seed_rng)]
            }
        }
    }
}

/// Everything left over once a local game has ended.
pub struct SessionReport {
    pub game: Game,
    pub players: [PlayerNode; 2],
}

impl SessionReport {
    pub fn winner(&self) -> Option<&str> {
        self.game.winner()
    }
}

/// Play one complete game on local mailboxes and return the final actors.
pub async fn run_local_game(config: &SessionConfig) -> anyhow::Result<SessionReport> {
    let [name1, name2] = &config.names;
    if name1 == name2 {
        bail!("players need distinct names, both are called {:?}", name1);
    }

    let (mut game_tx, game_box) = Mailbox::new("game");
    let (p1_tx, p1_box) = Mailbox::new(name1.as_str());
    let (p2_tx, p2_box) = Mailbox::new(name2.as_str());

    let [rng1, rng2] = config.rngs();
    let p1 = PlayerNode::new(name1.as_str(), config.kinds[0].build(), Box::new(game_tx.clone()), rng1);
    let p2 = PlayerNode::new(name2.as_str(), config.kinds[1].build(), Box::new(game_tx.clone()), rng2);
    let game = Game::new(name1.as_str(), Box::new(p1_tx), name2.as_str(), Box::new(p2_tx));

    game_tx.deliver_message(Message::new("run", MessageBody::Setup))?;
    log::info!("starting {} ({:?}) vs {} ({:?})", name1, config.kinds[0], name2, config.kinds[1]);

    let (game, p1, p2) = tokio::try_join!(game_box.run(game), p1_box.run(p1), p2_box.run(p2))?;
    Ok(SessionReport {
        game,
        players: [p1, p2],
    })
}

/// Write each player's authoritative state to `<dir>/<name>.json`.
pub fn save_states(game: &Game, dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let mut written = Vec::new();
    for state in game.states() {
        let path = dir.join(format!("{}.json", state.name()));
        let json = serde_json::to_string_pretty(state)?;
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

/// Read a player state written by [`save_states`].
pub fn load_state(path: &Path) -> anyhow::Result<PlayerState> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let state = serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    Ok(state)
}
