use serde::Serialize;

use super::lookup::Reference;

/// A measurement published on the platform, such as physical flow or firm
/// technical capacity.
///
/// The `indicator` query parameter takes the human-readable label, not the
/// short key. That is an upstream quirk and is preserved here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Indicator {
    pub key: &'static str,
    /// Exact wire value for the `indicator` query parameter.
    pub label: &'static str,
}

macro_rules! indicators {
    ($($name:ident => $key:literal, $label:literal;)+) => {
        impl Indicator {
            $(pub const $name: Indicator = Indicator { key: $key, label: $label };)+

            pub const ALL: &'static [Indicator] = &[$(Indicator::$name),+];
        }
    };
}

indicators! {
    INTERRUPTION_CAPACITY => "interruption_capacity",
        "Actual interruption of interruptible capacity";
    ALLOCATION => "allocation", "Allocation";
    FIRM_AVAILABLE => "firm_available", "Firm Available";
    FIRM_BOOKED => "firm_booked", "Firm Booked";
    FIRM_INTERRUPTION_PLANNED => "firm_interruption_planned",
        "Firm Interruption Planned - Interrupted";
    FIRM_INTERRUPTION_UNPLANNED => "firm_interruption_unplanned",
        "Firm Interruption Unplanned - Interrupted";
    FIRM_TECHNICAL => "firm_technical", "Firm Technical";
    GCV => "gcv", "GCV";
    INTERRUPTIBLE_AVAILABLE => "interruptible_available", "Interruptible Available";
    INTERRUPTIBLE_BOOKED => "interruptible_booked", "Interruptible Booked";
    INTERRUPTIBLE_INTERRUPTION_ACTUAL => "interruptible_interruption_actual",
        "Interruptible Interruption Actual – Interrupted";
    INTERRUPTIBLE_INTERRUPTION_PLANNED => "interruptible_interruption_planned",
        "Interruptible Interruption Planned - Interrupted";
    INTERRUPTIBLE_TOTAL => "interruptible_total", "Interruptible Total";
    NOMINATIONS => "nominations", "Nominations";
    PHYSICAL_FLOW => "physical_flow", "Physical Flow";
    FIRM_INTERRUPTION_CAPACITY_PLANNED => "firm_interruption_capacity_planned",
        "Planned interruption of firm capacity";
    RENOMINATION => "renomination", "Renomination";
    FIRM_INTERRUPTION_CAPACITY_UNPLANNED => "firm_interruption_capacity_unplanned",
        "Unplanned interruption of firm capacity";
    WOBBE_INDEX => "wobbe_index", "Wobbe Index";
    OVERSUBSCRIPTION_AVAILABLE => "oversubscription_available",
        "Available through Oversubscription";
    SURRENDER_AVAILABLE => "surrender_available", "Available through Surrender";
    UIOLI_AVAILABLE_LT => "uioli_available_lt", "Available through UIOLI long-term";
    UIOLI_AVAILABLE_ST => "uioli_available_st", "Available through UIOLI short-term";
}

impl Reference for Indicator {
    const KIND: &'static str = "indicator";

    fn table() -> &'static [Self] {
        Indicator::ALL
    }

    fn key(&self) -> &'static str {
        self.key
    }

    fn matches_alias(&self, s: &str) -> bool {
        self.label == s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_complete_with_unique_keys() {
        assert_eq!(Indicator::ALL.len(), 23);
        for (i, a) in Indicator::ALL.iter().enumerate() {
            for b in &Indicator::ALL[i + 1..] {
                assert_ne!(a.key, b.key);
                assert_ne!(a.label, b.label);
            }
        }
    }
}
