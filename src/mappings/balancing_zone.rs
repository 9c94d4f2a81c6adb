use serde::Serialize;

use super::lookup::Reference;

/// A gas balancing zone, with the market area manager that operates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BalancingZone {
    /// Eleven-character key as used in `bzKey` query parameters.
    pub key: &'static str,
    pub label: &'static str,
    pub manager: &'static str,
}

macro_rules! balancing_zones {
    ($($name:ident => $key:literal, $label:literal, $manager:literal;)+) => {
        impl BalancingZone {
            $(pub const $name: BalancingZone = BalancingZone {
                key: $key,
                label: $label,
                manager: $manager,
            };)+

            pub const ALL: &'static [BalancingZone] = &[$(BalancingZone::$name),+];
        }
    };
}

balancing_zones! {
    AT => "AT---------", "Austria", "Central European Gas Hub AG";
    BE_H => "BE-H-ZONE--", "H-Zone", "Fluxys Belgium";
    BE_L => "BE-L-ZONE--", "L-Zone", "Fluxys Belgium";
    BE_LUX => "BE-LUX------", "BeLux", "Fluxys Belgium";
    BG_GNTT => "BG-GTNTT---", "GTNTT-BG", "Bulgartransgaz EAD";
    BG_NGTS => "BG-NGTS----", "Bulgaria", "Bulgartransgaz EAD";
    CH => "CH---------", "Switzerland", "Swissgas AS";
    CZ => "CZ---------", "Czech", "NET4GAS, s.r.o.";
    DE_GASPOOL => "DE-GASPOOL-", "GASPOOL", "GASPOOL Balancing Services GmbH";
    DE_NCG => "DE-NCG-----", "NCG", "Net Connect Germany";
    DK => "DK---------", "Denmark", "Energinet";
    EE => "EE---------", "Estonia", "Elering AS";
    ES => "ES---------", "Spain", "Enagas Transporte S.A.U.";
    FI => "FI---------", "Finland", "Gasgrid Finland Oy";
    FR_NORTH => "FR-NORTH---", "PEG North", "GRTgaz";
    FR_SOUTH => "FR-SOUTH---", "PEG South", "GRTgaz";
    FR_TIGF => "FR-TIGF----", "PEG TIGF", "TERÉGA";
    FR_TRS => "FR-TRS------", "TRS", "GRTgaz";
    GR => "GR---------", "Greece", "DESFA S.A.";
    HR => "HR---------", "Croatia", "Plinacro Ltd";
    HU => "HU---------", "Hungary", "FGSZ Ltd.";
    IE => "IE---------", "Ireland", "Gas Networks Ireland";
    IT => "IT---------", "Italy", "Snam Rete Gas S.p.A.";
    LT => "LT---------", "Lithuania", "AB Amber Grid";
    LU => "LU---------", "Luxemburg", "Creos Luxembourg S.A.";
    LV => "LV---------", "Latvia", "Conexus Baltic Grid";
    NL => "NL---------", "Netherlands", "Gasunie Transport Services B.V.";
    PL => "PL---------", "Poland H-gas", "GAZ-SYSTEM S.A.";
    PL_YAMAL => "PL-YAMAL---", "TGPS (YAMAL)", "GAZ-SYSTEM S.A.";
    PT => "PT---------", "Portugal", "REN - Gasodutos, S.A.";
    RO => "RO---------", "RO_NTS", "SNTGN Transgaz S.A.";
    RO_TBP => "RO-TBP-----", "RO_DTS", "SNTGN Transgaz S.A.";
    SE => "SE---------", "Sweden", "Swedegas AB";
    SI => "SI---------", "Slovenia", "Plinovodi d.o.o.";
    SK => "SK---------", "Slovakia", "eustream, a.s.";
    UK => "UK---------", "UK", "National Grid Gas plc";
    UK_IUK => "UK-IUK-----", "IUK", "Interconnector";
    UK_NI => "UK-NI------", "NI", "Premier Transmission Ltd";
    PL_L => "PL-L-gas---", "Poland L-gas", "GAZ-SYSTEM S.A. (ISO)";
    FR => "FR----------", "TRF", "GRTgaz";
    DK_SE => "DK-SE-------", "Joint Bal Zone DK/SE", "Energinet";
    UA => "UA---------", "Ukraine", "LLC Gas TSO of Ukraine";
    MD => "MD---------", "Moldova", "Moldovatransgaz LLC";
    TR => "TR---------", "Turkey", "";
    MK => "MK---------", "North Macedonia", "GA-MA - Skopje";
    RS => "RS---------", "Serbia", "Srbijagas";
    EE_LV => "EE-LV------", "Joint Bal Zone EE/LV", "Elering AS";
    DE_THE => "DE-THE-----", "DE THE BZ", "";
}

impl Reference for BalancingZone {
    const KIND: &'static str = "balancing zone";

    fn table() -> &'static [Self] {
        BalancingZone::ALL
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
        assert_eq!(BalancingZone::ALL.len(), 48);
        for (i, a) in BalancingZone::ALL.iter().enumerate() {
            for b in &BalancingZone::ALL[i + 1..] {
                assert_ne!(a.key, b.key);
            }
        }
    }
}
