use serde::{Deserialize, Serialize};
use crate::types::{ChickenId, EggId};

/// What the picking collaborator resolved under the pointer.
/// Both can be set; eggs win on click.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hover {
    #[serde(default)]
    pub egg:     Option<EggId>,
    #[serde(default)]
    pub chicken: Option<ChickenId>,
}

impl Hover {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn egg(egg_id: EggId) -> Self {
        Self { egg: Some(egg_id), chicken: None }
    }

    pub fn chicken(chicken_id: ChickenId) -> Self {
        Self { egg: None, chicken: Some(chicken_id) }
    }
}

/// All player-issued commands.
/// Variants are append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PlayerCommand {
    // ── Clock control ─────────────────────────────
    Pause,
    Resume,

    // ── Pointer ───────────────────────────────────
    SetHover { hover: Hover },
    Click,

    // ── Direct actions ────────────────────────────
    Harvest { egg_id: EggId },
    Feed { chicken_id: ChickenId },
    DisposeDead,
}
