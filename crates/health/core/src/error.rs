//! Error infrastructure for health-core.
//!
//! Damage that does not land is never an error: prevention is reported through
//! [`crate::DamageOutcome`] and [`crate::PreventionReasons`]. The types here cover
//! misuse of the vitality state machine, missing builder inputs and failures
//! raised by injected collaborators.

use crate::entity::EntityId;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the caller may retry later or pick another operation
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistency that requires investigation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: operation not valid in the current life state.
    Recoverable,

    /// Examples: missing request field, unknown entity.
    Validation,

    /// Examples: a death strategy reporting an inconsistent host.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// A vitality operation was attempted on an entity that is dead.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("cannot {attempted_operation} entity '{entity_name}': entity is dead (hp {current_hp})")]
pub struct DeadEntityError {
    /// Name of the rejected operation, e.g. `"Heal"` or `"SetHpToMax"`.
    pub attempted_operation: &'static str,
    pub current_hp: i64,
    pub entity_name: String,
}

/// Errors returned by health-core operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HealthError {
    #[error(transparent)]
    DeadEntity(#[from] DeadEntityError),

    #[error("invalid operation on entity '{entity_name}': {message}")]
    InvalidOperation {
        entity_name: String,
        message: &'static str,
    },

    /// A required input was never supplied to a builder.
    #[error("missing required argument '{0}'")]
    MissingArgument(&'static str),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("entity {0} not found")]
    EntityNotFound(EntityId),

    /// An injected death or resurrection strategy failed.
    #[error("{strategy} strategy failed: {message}")]
    StrategyFailed {
        strategy: &'static str,
        message: String,
    },
}

impl HealthError {
    /// Builds a [`HealthError::StrategyFailed`] from any displayable cause.
    pub fn strategy_failed(strategy: &'static str, cause: impl core::fmt::Display) -> Self {
        Self::StrategyFailed {
            strategy,
            message: cause.to_string(),
        }
    }

    /// Returns the severity level of this error.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::DeadEntity(_) | Self::InvalidOperation { .. } => ErrorSeverity::Recoverable,
            Self::MissingArgument(_) | Self::InvalidArgument(_) | Self::EntityNotFound(_) => {
                ErrorSeverity::Validation
            }
            Self::StrategyFailed { .. } => ErrorSeverity::Internal,
        }
    }

    /// Returns a stable identifier for this error variant.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DeadEntity(_) => "HEALTH_DEAD_ENTITY",
            Self::InvalidOperation { .. } => "HEALTH_INVALID_OPERATION",
            Self::MissingArgument(_) => "HEALTH_MISSING_ARGUMENT",
            Self::InvalidArgument(_) => "HEALTH_INVALID_ARGUMENT",
            Self::EntityNotFound(_) => "HEALTH_ENTITY_NOT_FOUND",
            Self::StrategyFailed { .. } => "HEALTH_STRATEGY_FAILED",
        }
    }

    /// Returns the dead-entity payload if this is a [`HealthError::DeadEntity`].
    pub fn as_dead_entity(&self) -> Option<&DeadEntityError> {
        match self {
            Self::DeadEntity(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dead_entity_message_names_operation_and_entity() {
        let err = HealthError::from(DeadEntityError {
            attempted_operation: "Heal",
            current_hp: 0,
            entity_name: "goblin".into(),
        });

        assert_eq!(err.to_string(), "cannot Heal entity 'goblin': entity is dead (hp 0)");
        assert_eq!(err.error_code(), "HEALTH_DEAD_ENTITY");
        assert!(err.severity().is_recoverable());
    }

    #[test]
    fn strategy_failures_are_internal() {
        let err = HealthError::strategy_failed("on_death", "host despawn failed");
        assert!(err.severity().is_internal());
        assert_eq!(err.to_string(), "on_death strategy failed: host despawn failed");
    }

    #[test]
    fn every_variant_maps_to_a_severity() {
        let cases = [
            (
                HealthError::InvalidOperation {
                    entity_name: "hero".into(),
                    message: "already alive",
                },
                "recoverable",
            ),
            (HealthError::MissingArgument("amount"), "validation"),
            (HealthError::InvalidArgument("negative".into()), "validation"),
            (HealthError::EntityNotFound(EntityId(3)), "validation"),
            (HealthError::strategy_failed("on_resurrect", "boom"), "internal"),
        ];

        for (err, expected) in cases {
            let severity = err.severity();
            assert_eq!(severity.as_str(), expected, "{}", err.error_code());
            assert_eq!(severity.is_recoverable(), expected == "recoverable");
            assert_eq!(severity.is_internal(), expected == "internal");
        }
    }
}
