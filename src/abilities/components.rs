//! Ability identifiers and per-ability records.

use crate::core::ActiveTuning;

/// Every capability the player can learn.
///
/// Declaration order is the order abilities are listed in the spellbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AbilityId {
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    Jump,
    Shoot,
    Blink,
    Shield,
}

impl AbilityId {
    pub const ALL: [AbilityId; 8] = [
        AbilityId::MoveForward,
        AbilityId::MoveBackward,
        AbilityId::MoveLeft,
        AbilityId::MoveRight,
        AbilityId::Jump,
        AbilityId::Shoot,
        AbilityId::Blink,
        AbilityId::Shield,
    ];

    /// The directional abilities eligible for the awakening draw.
    pub const MOVEMENT: [AbilityId; 4] = [
        AbilityId::MoveForward,
        AbilityId::MoveBackward,
        AbilityId::MoveLeft,
        AbilityId::MoveRight,
    ];

    /// Stable string key, used in logs.
    pub fn key(self) -> &'static str {
        match self {
            AbilityId::MoveForward => "move_forward",
            AbilityId::MoveBackward => "move_backward",
            AbilityId::MoveLeft => "move_left",
            AbilityId::MoveRight => "move_right",
            AbilityId::Jump => "jump",
            AbilityId::Shoot => "shoot",
            AbilityId::Blink => "blink",
            AbilityId::Shield => "shield",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AbilityId::MoveForward => "Move Forward",
            AbilityId::MoveBackward => "Move Backward",
            AbilityId::MoveLeft => "Step Left",
            AbilityId::MoveRight => "Step Right",
            AbilityId::Jump => "Jump",
            AbilityId::Shoot => "Void Bolt",
            AbilityId::Blink => "Blink",
            AbilityId::Shield => "Divine Shield",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AbilityId::MoveForward => "Your legs respond. You can walk forward.",
            AbilityId::MoveBackward => "You can step back from danger.",
            AbilityId::MoveLeft => "Sidestep to the left.",
            AbilityId::MoveRight => "Sidestep to the right.",
            AbilityId::Jump => "Defy gravity briefly.",
            AbilityId::Shoot => "Fire projectiles of raw energy.",
            AbilityId::Blink => "Teleport forward instantly.",
            AbilityId::Shield => "Invulnerability for 5 seconds.",
        }
    }
}

/// Timer state of a triggered ability.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveTiming {
    /// Minimum seconds between activations
    pub cooldown: f32,
    /// Seconds the effect stays in force, 0 for instantaneous
    pub duration: f32,
    /// Clock reading of the last activation, `None` if never used
    pub last_used: Option<f32>,
    /// Cached effect flag, cleared lazily once the duration has passed
    pub active: bool,
}

impl ActiveTiming {
    pub fn new(tuning: ActiveTuning) -> Self {
        Self {
            cooldown: tuning.cooldown.max(0.0),
            duration: tuning.duration.max(0.0),
            last_used: None,
            active: false,
        }
    }

    pub fn ready(&self, now: f32) -> bool {
        match self.last_used {
            Some(last) => now - last >= self.cooldown,
            None => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AbilityKind {
    /// Always on once learned
    Passive,
    /// Triggered, gated by a cooldown
    Active(ActiveTiming),
}

/// One learnable ability and its runtime state.
#[derive(Debug, Clone, PartialEq)]
pub struct Ability {
    pub id: AbilityId,
    pub unlocked: bool,
    pub kind: AbilityKind,
}

impl Ability {
    pub fn passive(id: AbilityId) -> Self {
        Self {
            id,
            unlocked: false,
            kind: AbilityKind::Passive,
        }
    }

    pub fn active(id: AbilityId, tuning: ActiveTuning) -> Self {
        Self {
            id,
            unlocked: false,
            kind: AbilityKind::Active(ActiveTiming::new(tuning)),
        }
    }

    pub fn name(&self) -> &'static str {
        self.id.name()
    }

    pub fn description(&self) -> &'static str {
        self.id.description()
    }
}
