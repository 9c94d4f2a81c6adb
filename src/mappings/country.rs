use serde::Serialize;

use super::lookup::Reference;

/// A country participating in the European gas transmission network.
///
/// Resolvable from its two-letter key or its label:
///
/// ```
/// use entsog::{resolve, Country};
///
/// let country: Country = resolve("BE").unwrap();
/// assert_eq!(country, Country::BE);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Country {
    /// Two-letter key as used in `countryKey` query parameters.
    pub key: &'static str,
    pub label: &'static str,
}

macro_rules! countries {
    ($($name:ident => $key:literal, $label:literal;)+) => {
        impl Country {
            $(pub const $name: Country = Country { key: $key, label: $label };)+

            pub const ALL: &'static [Country] = &[$(Country::$name),+];
        }
    };
}

countries! {
    AT => "AT", "Austria";
    BE => "BE", "Belgium";
    BG => "BG", "Bulgaria";
    CH => "CH", "Switzerland";
    CZ => "CZ", "Czech";
    DE => "DE", "Germany";
    DK => "DK", "Denmark";
    EE => "EE", "Estonia";
    ES => "ES", "Spain";
    FI => "FI", "Finland";
    FR => "FR", "France";
    GR => "GR", "Greece";
    HR => "HR", "Croatia";
    HU => "HU", "Hungary";
    IE => "IE", "Ireland";
    IT => "IT", "Italy";
    LT => "LT", "Lithuania";
    LU => "LU", "Luxemburg";
    LV => "LV", "Latvia";
    NL => "NL", "Netherlands";
    PL => "PL", "Poland";
    PT => "PT", "Portugal";
    RO => "RO", "Romania";
    SE => "SE", "Sweden";
    SI => "SI", "Slovenia";
    SK => "SK", "Slovakia";
    UK => "UK", "UK";
    UA => "UA", "Ukraine";
    MD => "MD", "Moldova";
    TR => "TR", "Turkey";
    MK => "MK", "North Macedonia";
    RS => "RS", "Serbia";
}

impl Reference for Country {
    const KIND: &'static str = "country";

    fn table() -> &'static [Self] {
        Country::ALL
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
        assert_eq!(Country::ALL.len(), 32);
        for (i, a) in Country::ALL.iter().enumerate() {
            for b in &Country::ALL[i + 1..] {
                assert_ne!(a.key, b.key);
            }
        }
    }
}
