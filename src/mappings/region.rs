/// Maps a country key to its continental region key (WE, EE, NE or SE).
///
/// Covers a few non-member countries (Norway, Montenegro, Bosnia, Malta)
/// that show up as adjacent systems in aggregated data.
pub fn region_key(country: &str) -> Option<&'static str> {
    let region = match country {
        "BE" | "NL" | "DE" | "FR" | "CH" | "AT" => "WE",
        "CZ" | "HU" | "SI" | "RS" | "PL" | "ME" | "RO" | "LT" | "BG" | "LV"
        | "BA" | "MK" => "EE",
        "UK" | "NO" | "DK" | "SE" | "IE" | "FI" => "NE",
        "IT" | "ES" | "PT" | "GR" | "MT" => "SE",
        _ => return None,
    };
    Some(region)
}

/// Neighbouring bidding zones with cross-border flows.
pub fn neighbours(zone: &str) -> Option<&'static [&'static str]> {
    let list: &'static [&'static str] = match zone {
        "BE" => &["NL", "DE_AT_LU", "FR", "GB", "DE_LU"],
        "NL" => &["BE", "DE_AT_LU", "DE_LU", "GB", "NO_2", "DK_1"],
        "DE_AT_LU" => &[
            "BE", "CH", "CZ", "DK_1", "DK_2", "FR", "IT_NORD", "IT_NORD_AT",
            "NL", "PL", "SE_4", "SI",
        ],
        "FR" => &[
            "BE", "CH", "DE_AT_LU", "DE_LU", "ES", "GB", "IT_NORD",
            "IT_NORD_FR",
        ],
        "CH" => &["AT", "DE_AT_LU", "DE_LU", "FR", "IT_NORD", "IT_NORD_CH"],
        "AT" => &["CH", "CZ", "DE_LU", "HU", "IT_NORD", "SI"],
        "CZ" => &["AT", "DE_AT_LU", "DE_LU", "PL", "SK"],
        "GB" => &["BE", "FR", "IE_SEM", "NL"],
        "NO_2" => &["DK_1", "NL", "NO_5"],
        "HU" => &["AT", "HR", "RO", "RS", "SK", "UA"],
        "IT_NORD" => &["CH", "DE_AT_LU", "FR", "SI", "AT", "IT_CNOR"],
        "ES" => &["FR", "PT"],
        "SI" => &["AT", "DE_AT_LU", "HR", "IT_NORD"],
        "RS" => &["AL", "BA", "BG", "HR", "HU", "ME", "MK", "RO"],
        "PL" => &["CZ", "DE_AT_LU", "DE_LU", "LT", "SE_4", "SK", "UA"],
        "ME" => &["AL", "BA", "RS"],
        "DK_1" => &["DE_AT_LU", "DE_LU", "DK_2", "NO_2", "SE_3", "NL"],
        "RO" => &["BG", "HU", "RS", "UA"],
        "LT" => &["BY", "LV", "PL", "RU_KGD", "SE_4"],
        "BG" => &["GR", "MK", "RO", "RS", "TR"],
        "SE_3" => &["DK_1", "FI", "NO_1", "SE_4"],
        "LV" => &["EE", "LT", "RU"],
        "IE_SEM" => &["GB"],
        "BA" => &["HR", "ME", "RS"],
        "NO_1" => &["NO_2", "NO_3", "NO_5", "SE_3"],
        "SE_4" => &["DE_AT_LU", "DE_LU", "DK_2", "LT", "PL"],
        "NO_5" => &["NO_1", "NO_2", "NO_3"],
        "SK" => &["CZ", "HU", "PL", "UA"],
        "EE" => &["FI", "LV", "RU"],
        "DK_2" => &["DE_AT_LU", "DE_LU", "SE_4"],
        "FI" => &["EE", "NO_4", "RU", "SE_1", "SE_3"],
        "NO_4" => &["SE_2", "FI", "SE_1"],
        "SE_1" => &["FI", "NO_4", "SE_2"],
        "SE_2" => &["NO_3", "NO_4", "SE_3"],
        "DE_LU" => &[
            "AT", "BE", "CH", "CZ", "DK_1", "DK_2", "FR", "NL", "PL", "SE_4",
        ],
        "MK" => &["BG", "GR", "RS"],
        "PT" => &["ES"],
        "GR" => &["AL", "BG", "IT_BRNN", "IT_GR", "MK", "TR"],
        "NO_3" => &["NO_4", "NO_5", "SE_2"],
        "IT" => &["AT", "FR", "GR", "MT", "ME", "SI", "CH"],
        "IT_BRNN" => &["GR", "IT_SUD"],
        "IT_SUD" => &["IT_BRNN", "IT_CSUD", "IT_FOGN", "IT_ROSN", "IT_CALA"],
        "IT_FOGN" => &["IT_SUD"],
        "IT_ROSN" => &["IT_SICI", "IT_SUD"],
        "IT_CSUD" => &["IT_CNOR", "IT_SARD", "IT_SUD"],
        "IT_CNOR" => &["IT_NORD", "IT_CSUD", "IT_SARD"],
        "IT_SARD" => &["IT_CNOR", "IT_CSUD"],
        "IT_SICI" => &["IT_CALA", "IT_ROSN", "MT"],
        "IT_CALA" => &["IT_SICI", "IT_SUD"],
        "MT" => &["IT_SICI"],
        _ => return None,
    };
    Some(list)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_countries_to_regions() {
        assert_eq!(region_key("BE"), Some("WE"));
        assert_eq!(region_key("FI"), Some("NE"));
        assert_eq!(region_key("MT"), Some("SE"));
        assert_eq!(region_key("ZZ"), None);
    }

    #[test]
    fn neighbour_lists_are_symmetric_for_simple_pairs() {
        assert_eq!(neighbours("PT"), Some(&["ES"][..]));
        assert!(neighbours("ES").unwrap().contains(&"PT"));
        assert_eq!(neighbours("ZZ"), None);
    }
}
