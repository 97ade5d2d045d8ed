use bitflags::bitflags;

bitflags! {
    /// Why a damage instance was prevented.
    ///
    /// The empty set is the "none" value. Pre-phase reasons are set before the
    /// pipeline runs; the remaining reasons are set by the step that terminated it.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct PreventionReasons: u16 {
        const ENTITY_IMMUNE = 1 << 0;
        const ENTITY_DEAD = 1 << 1;
        const PRE_PHASE_IGNORED = 1 << 2;
        const PRE_PHASE_ZERO_AMOUNT = 1 << 3;
        const ALL_DAMAGE_IMMUNE = 1 << 4;
        const DAMAGE_SOURCE_IMMUNE = 1 << 5;
        const DAMAGE_TYPE_IMMUNE = 1 << 6;
        const DEFENSE_ABSORBED = 1 << 7;
        const PIPELINE_REDUCED_TO_ZERO = 1 << 8;

        /// Reasons raised before the pipeline starts.
        const PRE_PHASE = Self::ENTITY_IMMUNE.bits()
            | Self::ENTITY_DEAD.bits()
            | Self::PRE_PHASE_IGNORED.bits()
            | Self::PRE_PHASE_ZERO_AMOUNT.bits();

        /// Reasons owned by the terminating pipeline step.
        const PIPELINE = Self::ALL_DAMAGE_IMMUNE.bits()
            | Self::DAMAGE_SOURCE_IMMUNE.bits()
            | Self::DAMAGE_TYPE_IMMUNE.bits()
            | Self::DEFENSE_ABSORBED.bits()
            | Self::PIPELINE_REDUCED_TO_ZERO.bits();
    }
}

/// Final state of a damage instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageOutcome {
    #[default]
    Applied,
    Prevented,
}

impl DamageOutcome {
    pub const fn is_prevented(self) -> bool {
        matches!(self, Self::Prevented)
    }
}
