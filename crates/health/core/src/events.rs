//! Notifications emitted by vitality operations.
//!
//! Each event is emitted after the state mutation it describes has committed.

use crate::damage::{DamageRequest, DamageResolution};
use crate::entity::EntityId;
use crate::heal::{HealRequest, HealResolution, HealSource};

#[derive(Clone, Debug)]
pub enum HealthEvent {
    /// A damage request reached the entity, before any check.
    PreDamage {
        entity: EntityId,
        request: DamageRequest,
    },
    DamageResolved(Box<DamageResolution>),
    MaxHealthChanged {
        entity: EntityId,
        old: i64,
        new: i64,
    },
    HealthGained {
        entity: EntityId,
        amount: i64,
        hp: i64,
    },
    HealthLost {
        entity: EntityId,
        amount: i64,
        hp: i64,
    },
    Died {
        entity: EntityId,
        killer: Option<EntityId>,
    },
    PreHeal {
        entity: EntityId,
        request: HealRequest,
    },
    Healed(HealResolution),
    Resurrected {
        entity: EntityId,
        hp: i64,
        source: HealSource,
    },
}

impl HealthEvent {
    /// Entity the event is about.
    pub fn entity(&self) -> EntityId {
        match self {
            Self::PreDamage { entity, .. }
            | Self::MaxHealthChanged { entity, .. }
            | Self::HealthGained { entity, .. }
            | Self::HealthLost { entity, .. }
            | Self::Died { entity, .. }
            | Self::PreHeal { entity, .. }
            | Self::Resurrected { entity, .. } => *entity,
            Self::DamageResolved(resolution) => resolution.entity,
            Self::Healed(resolution) => resolution.entity,
        }
    }

    /// Short snake_case name, useful for logs and assertions.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PreDamage { .. } => "pre_damage",
            Self::DamageResolved(_) => "damage_resolved",
            Self::MaxHealthChanged { .. } => "max_health_changed",
            Self::HealthGained { .. } => "health_gained",
            Self::HealthLost { .. } => "health_lost",
            Self::Died { .. } => "died",
            Self::PreHeal { .. } => "pre_heal",
            Self::Healed(_) => "healed",
            Self::Resurrected { .. } => "resurrected",
        }
    }
}

/// Receives health notifications.
pub trait ResultSink {
    fn emit(&mut self, event: HealthEvent);
}

impl<F: FnMut(HealthEvent)> ResultSink for F {
    fn emit(&mut self, event: HealthEvent) {
        self(event)
    }
}

/// Drops every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl ResultSink for NullSink {
    fn emit(&mut self, _event: HealthEvent) {}
}

/// Records events in emission order.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<HealthEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[HealthEvent] {
        &self.events
    }

    /// Event kinds in emission order.
    pub fn kinds(&self) -> Vec<&'static str> {
        self.events.iter().map(HealthEvent::kind).collect()
    }

    pub fn count(&self, kind: &str) -> usize {
        self.events.iter().filter(|event| event.kind() == kind).count()
    }

    pub fn drain(&mut self) -> Vec<HealthEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl ResultSink for EventLog {
    fn emit(&mut self, event: HealthEvent) {
        self.events.push(event);
    }
}
