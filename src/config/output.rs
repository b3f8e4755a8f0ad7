//! Output group composition.
//!
//! Output groups are a result verbosity tier followed by any fields the user
//! asked for with `--include-fields`.

use std::str::FromStr;

use crate::config::types::ResultVerbosity;
use crate::error_handling::ConfigError;

/// Validates the verbosity tier and builds the ordered output group list.
///
/// The tier is always the first group. Extra fields are split on commas and
/// appended in input order; nothing is trimmed or de-duplicated, so an empty
/// `include_fields` contributes a single empty group.
pub fn compose_output_groups(
    tier: &str,
    include_fields: &str,
) -> Result<(ResultVerbosity, Vec<String>), ConfigError> {
    let verbosity = ResultVerbosity::from_str(tier).map_err(|_| ConfigError::InvalidValue {
        flag: "result-verbosity",
        value: tier.to_string(),
        expected: "options are short, normal, long, trace",
    })?;

    let mut groups = Vec::with_capacity(2);
    let tier_name: &str = verbosity.as_ref();
    groups.push(tier_name.to_string());
    groups.extend(include_fields.split(',').map(str::to_string));

    Ok((verbosity, groups))
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_tier_leads_the_groups() {
        for tier in ResultVerbosity::iter() {
            let (verbosity, groups) = compose_output_groups(tier.as_ref(), "ttl").unwrap();
            assert_eq!(verbosity, tier);
            assert_eq!(groups[0], tier.to_string());
        }
    }

    #[test]
    fn test_extra_fields_keep_input_order() {
        let (_, groups) = compose_output_groups("long", "ttl,class,resolver").unwrap();
        assert_eq!(groups, vec!["long", "ttl", "class", "resolver"]);
    }

    #[test]
    fn test_empty_extra_fields_passes_through_empty_group() {
        let (_, groups) = compose_output_groups("normal", "").unwrap();
        assert_eq!(groups, vec!["normal".to_string(), String::new()]);
    }

    #[test]
    fn test_duplicates_are_tolerated() {
        let (_, groups) = compose_output_groups("short", "short,ttl,ttl").unwrap();
        assert_eq!(groups, vec!["short", "short", "ttl", "ttl"]);
    }

    #[test]
    fn test_unknown_tier_is_rejected() {
        for tier in ["", "verbose", "Normal", "TRACE"] {
            let err = compose_output_groups(tier, "").unwrap_err();
            assert_eq!(err.flag(), Some("result-verbosity"), "tier {tier:?}");
        }
    }
}
