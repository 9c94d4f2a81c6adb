use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The input matched neither a key nor any alias of the reference set.
    /// The tables are hardcoded; a legitimate miss usually means the upstream
    /// platform added an entry we do not know about yet.
    #[error("'{value}' is not a known {kind}")]
    Unknown { kind: &'static str, value: String },
}

/// An entry of one of the static reference tables, resolvable by its
/// canonical key (fast path) or by scanning alias values.
pub trait Reference: Copy + Sized + 'static {
    /// Human name of the reference set, used in error messages.
    const KIND: &'static str;

    fn table() -> &'static [Self];

    /// Canonical key as used in query parameters.
    fn key(&self) -> &'static str;

    /// True when `s` matches a value this entry is known under besides its key.
    fn matches_alias(&self, s: &str) -> bool;
}

/// Resolves a raw string against a reference table: exact key first, then a
/// linear scan over alias values.
pub fn resolve<R: Reference>(input: &str) -> Result<R, LookupError> {
    R::table()
        .iter()
        .find(|entry| entry.key() == input)
        .or_else(|| R::table().iter().find(|entry| entry.matches_alias(input)))
        .copied()
        .ok_or_else(|| LookupError::Unknown {
            kind: R::KIND,
            value: input.to_string(),
        })
}

/// Accepted wherever a query filter takes a reference entry: either the
/// canonical entry itself (returned unchanged) or a raw string to resolve.
pub trait IntoReference<R> {
    fn into_reference(self) -> Result<R, LookupError>;
}

impl<R: Reference> IntoReference<R> for R {
    fn into_reference(self) -> Result<R, LookupError> {
        Ok(self)
    }
}

impl<R: Reference> IntoReference<R> for &str {
    fn into_reference(self) -> Result<R, LookupError> {
        resolve(self)
    }
}

impl<R: Reference> IntoReference<R> for &String {
    fn into_reference(self) -> Result<R, LookupError> {
        resolve(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mappings::{BalancingZone, Country, Indicator};

    #[test]
    fn resolves_country_by_key() {
        let belgium: Country = resolve("BE").unwrap();
        assert_eq!(belgium.key, "BE");
        assert_eq!(belgium.label, "Belgium");
    }

    #[test]
    fn resolves_country_by_label_alias() {
        let belgium: Country = resolve("Belgium").unwrap();
        assert_eq!(belgium.key, "BE");
    }

    #[test]
    fn canonical_value_passes_through_unchanged() {
        let entry = Country::BE.into_reference().unwrap();
        assert_eq!(entry, Country::BE);
    }

    #[test]
    fn unknown_value_is_an_error() {
        let err = resolve::<Country>("XX").unwrap_err();
        assert_eq!(
            err,
            LookupError::Unknown {
                kind: "country",
                value: "XX".to_string()
            }
        );
    }

    #[test]
    fn resolves_balancing_zone_by_label() {
        let zone: BalancingZone = resolve("H-Zone").unwrap();
        assert_eq!(zone.key, "BE-H-ZONE--");
    }

    #[test]
    fn resolves_indicator_by_label() {
        let indicator: Indicator = resolve("Physical Flow").unwrap();
        assert_eq!(indicator.key, "physical_flow");
    }
}
