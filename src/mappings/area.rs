use serde::Serialize;

use super::lookup::Reference;

/// A market area: the set of transmission system operators active in one
/// country-level area. Some areas carry more than one operator (Germany
/// carries seventeen).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Area {
    /// Two-letter area key.
    pub key: &'static str,
    /// Operator keys as used in `operatorKey` query parameters.
    pub operator_keys: &'static [&'static str],
    pub operator_labels: &'static [&'static str],
}

macro_rules! areas {
    ($($name:ident => $key:literal, [$($op:literal),+], [$($label:literal),+];)+) => {
        impl Area {
            $(pub const $name: Area = Area {
                key: $key,
                operator_keys: &[$($op),+],
                operator_labels: &[$($label),+],
            };)+

            pub const ALL: &'static [Area] = &[$(Area::$name),+];
        }
    };
}

areas! {
    BE => "BE", ["BE-TSO-0001"], ["Fluxys Belgium"];
    BG => "BG", ["BG-TSO-0001"], ["Bulgartransgaz"];
    CZ => "CZ", ["CZ-TSO-0001"], ["NET4GAS"];
    DE => "DE",
        ["DE-TSO-0001", "DE-TSO-0002", "DE-TSO-0003", "DE-TSO-0005",
         "DE-TSO-0009", "DE-TSO-0010", "DE-TSO-0013", "DE-TSO-0014",
         "DE-TSO-0006", "DE-TSO-0004", "DE-TSO-0007", "DE-TSO-0008",
         "DE-TSO-0015", "DE-TSO-0016", "DE-TSO-0017", "DE-TSO-0018",
         "DE-TSO-0020"],
        ["GASCADE Gastransport", "Thyssengas", "ONTRAS",
         "Gasunie Deutschland ", "Open Grid Europe", "bayernets",
         "jordgas Transport", "terranets bw", "Gastransport Nord",
         "GRTgaz Deutschland", "Fluxys TENP", "Nowega", "GOAL",
         "OPAL Gastransport", "NEL Gastransport", "Fluxys Deutschland",
         "LBTG"];
    EE => "EE", ["EE-TSO-0001"], ["Elering"];
    ES => "ES", ["ES-TSO-0006"], ["Enagas"];
    FR => "FR", ["FR-TSO-0002", "FR-TSO-0003"], ["TERÉGA", "GRTgaz"];
    GR => "GR", ["GR-TSO-0001"], ["DESFA"];
    HR => "HR", ["HR-TSO-0001"], ["Plinacro Ltd"];
    IE => "IE", ["IE-TSO-0002"], ["GNI"];
    IT => "IT", ["IT-TSO-0001", "IT-TSO-0003", "IT-TSO-0004"],
        ["Snam Rete Gas", "SGI", "ITG"];
    LV => "LV", ["LV-TSO-0001"], ["Conexus"];
    NL => "NL", ["NL-TSO-0001", "UK-TSO-0004"], ["GTS", "BBL company"];
    PL => "PL", ["PL-TSO-0002", "PL-TSO-0001"],
        ["GAZ-SYSTEM", "GAZ-SYSTEM (ISO)"];
    PT => "PT", ["PT-TSO-0001"], ["REN - Gasodutos"];
    RO => "RO", ["RO-TSO-0001"], ["Transgaz"];
    SI => "SI", ["SI-TSO-0001"], ["Plinovodi"];
    UA => "UA", ["UA-TSO-0001"], ["Gas TSO UA"];
    UK => "UK", ["UK-TSO-0001", "UK-TSO-0002", "IE-TSO-0001", "UK-TSO-0003"],
        ["National Grid Gas", "Premier Transmission", "GNI (UK)",
         "Interconnector"];
    LU => "LU", ["LU-TSO-0001"], ["Creos Luxembourg"];
    HU => "HU", ["HU-TSO-0001"], ["FGSZ"];
    AT => "AT", ["AT-TSO-0001", "AT-TSO-0003"], ["Gas Connect Austria", "TAG"];
    LT => "LT", ["LT-TSO-0001"], ["Amber Grid"];
    SK => "SK", ["SK-TSO-0001"], ["eustream"];
    FI => "FI", ["FI-TSO-0003"], ["Gasgrid Finland"];
    CH => "CH", ["AL-TSO-0001"], ["TAP"];
    DK => "DK", ["DK-TSO-0001"], ["Energinet"];
}

impl Reference for Area {
    const KIND: &'static str = "area";

    fn table() -> &'static [Self] {
        Area::ALL
    }

    fn key(&self) -> &'static str {
        self.key
    }

    /// An area is also known under any of its operator keys.
    fn matches_alias(&self, s: &str) -> bool {
        self.operator_keys.contains(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mappings::resolve;

    #[test]
    fn table_is_complete_and_consistent() {
        assert_eq!(Area::ALL.len(), 27);
        for area in Area::ALL {
            assert_eq!(area.operator_keys.len(), area.operator_labels.len());
        }
    }

    #[test]
    fn resolves_by_operator_key_alias() {
        let area: Area = resolve("DE-TSO-0001").unwrap();
        assert_eq!(area.key, "DE");
    }
}
