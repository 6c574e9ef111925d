use serde::{Deserialize, Serialize};

use super::grid::Coords;

/// Something the presentation side needs to render.
///
/// Each event carries enough data to draw it without querying the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    GridInitialized { rows: usize, columns: usize },
    TileSpawned { value: u32, coords: Coords },
    TileMoved { from: Coords, to: Coords },
    TileMerged { coords: Coords, new_value: u32 },
    /// Play is paused until [`GridEngine::acknowledge`](super::GridEngine::acknowledge).
    GameWon,
    /// Play is paused until acknowledged; acknowledging starts a new game.
    GameLost,
}

/// A blocking notification awaiting acknowledgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notification {
    Won,
    Lost,
}

impl Notification {
    pub(crate) fn event(self) -> GameEvent {
        match self {
            Notification::Won => GameEvent::GameWon,
            Notification::Lost => GameEvent::GameLost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_tagged() {
        let ev = GameEvent::TileMerged { coords: Coords::new(1, 2), new_value: 8 };
        let json = serde_json::to_string(&ev).unwrap();
        assert_eq!(json, r#"{"event":"tile_merged","coords":{"row":1,"column":2},"new_value":8}"#);
        let lost = serde_json::to_string(&GameEvent::GameLost).unwrap();
        assert_eq!(lost, r#"{"event":"game_lost"}"#);
    }
}
