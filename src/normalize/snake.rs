use std::sync::LazyLock;

use regex::Regex;

static NON_ALNUM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9 _]+").unwrap());
static CAMEL_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(.)([A-Z][a-z]+)").unwrap());
static CAMEL_EDGE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").unwrap());
static UNDERSCORE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").unwrap());

/// Normalizes an upstream column name to snake_case.
///
/// The steps run in a fixed order: transliterate accents, collapse symbol
/// runs to `_`, break both camelCase boundary shapes, turn spaces into `_`,
/// collapse runs, lowercase, undo the `MWh` split, trim. Already-normalized
/// names pass through unchanged, so the transform is idempotent.
///
/// ```
/// use entsog::to_snake_case;
///
/// assert_eq!(to_snake_case("operatorKey"), "operator_key");
/// assert_eq!(to_snake_case("tSOCountry"), "t_so_country");
/// ```
pub fn to_snake_case(name: &str) -> String {
    let transliterated = transliterate(name);
    let symbols = NON_ALNUM.replace_all(&transliterated, "_");
    let words = CAMEL_WORD.replace_all(&symbols, "${1}_${2}");
    let edges = CAMEL_EDGE.replace_all(&words, "${1}_${2}");
    let spaced = edges.replace(' ', "_");
    let collapsed = UNDERSCORE_RUN.replace_all(&spaced, "_");
    let lowered = collapsed.to_lowercase().replace("m_wh", "mwh");
    lowered.trim_matches('_').to_string()
}

fn transliterate(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
            'è' | 'é' | 'ê' | 'ë' => 'e',
            'ì' | 'í' | 'î' | 'ï' => 'i',
            'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
            'ù' | 'ú' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            'ñ' => 'n',
            'ý' | 'ÿ' => 'y',
            'š' => 's',
            'ž' => 'z',
            'ß' => 's',
            'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'A',
            'È' | 'É' | 'Ê' | 'Ë' => 'E',
            'Ì' | 'Í' | 'Î' | 'Ï' => 'I',
            'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' => 'O',
            'Ù' | 'Ú' | 'Û' | 'Ü' => 'U',
            'Ç' => 'C',
            'Ñ' => 'N',
            'Ý' => 'Y',
            'Š' => 'S',
            'Ž' => 'Z',
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breaks_camel_case_boundaries() {
        assert_eq!(to_snake_case("operatorKey"), "operator_key");
        assert_eq!(to_snake_case("periodFrom"), "period_from");
        assert_eq!(to_snake_case("tSOCountry"), "t_so_country");
        assert_eq!(to_snake_case("eURelationship"), "e_u_relationship");
    }

    #[test]
    fn keeps_energy_units_together() {
        assert_eq!(to_snake_case("unitMWh"), "unit_mwh");
    }

    #[test]
    fn folds_symbols_and_accents() {
        assert_eq!(to_snake_case("Point Identifier (EIC)"), "point_identifier_eic");
        assert_eq!(to_snake_case("TERÉGA"), "terega");
    }

    #[test]
    fn is_idempotent() {
        for name in [
            "operatorKey",
            "tSOCountry",
            "Point Identifier (EIC)",
            "unitMWh",
            "Applicable tariff per kWh/d (Euro)",
        ] {
            let once = to_snake_case(name);
            assert_eq!(to_snake_case(&once), once);
        }
    }
}
