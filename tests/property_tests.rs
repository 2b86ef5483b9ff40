//! Property-based tests for fanlog using proptest

use fanlog::prelude::*;
use fanlog::sinks::remote::derive_tag;
use proptest::prelude::*;

fn any_severity() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Debug),
        Just(Severity::Info),
        Just(Severity::Warn),
        Just(Severity::Error),
        Just(Severity::Fatal),
    ]
}

proptest! {
    /// The gate passes a record exactly when its rank reaches the threshold
    /// rank in the fixed order debug < info < warn < error < fatal
    #[test]
    fn test_gate_matches_rank_order(threshold in any_severity(), severity in any_severity()) {
        let gate = SeverityGate::new(threshold);
        prop_assert_eq!(gate.should_log(severity), severity as u8 >= threshold as u8);
    }

    /// An unrecognized configured threshold behaves exactly like info
    #[test]
    fn test_unknown_threshold_behaves_as_info(name in "[a-z]{1,12}", severity in any_severity()) {
        prop_assume!(name.parse::<Severity>().is_err());

        let gate = SeverityGate::from_name(&name);
        let info_gate = SeverityGate::new(Severity::Info);
        prop_assert_eq!(gate.should_log(severity), info_gate.should_log(severity));
    }

    /// Severity names roundtrip through Display and FromStr
    #[test]
    fn test_severity_name_roundtrip(severity in any_severity()) {
        let parsed: Severity = severity.as_str().parse().unwrap();
        prop_assert_eq!(severity, parsed);
    }

    /// Routing tags keep the `{service}_{severity}.log` shape for every
    /// service name, including ones carrying delimiter characters
    #[test]
    fn test_tag_shape_for_arbitrary_service_names(
        service in "\\PC{0,24}",
        severity in any_severity(),
    ) {
        let tag = derive_tag(&service, severity.as_str());

        let expected_suffix = format!("_{}.log", severity.as_str());
        prop_assert!(tag.ends_with(&expected_suffix));
        // Everything outside [A-Za-z0-9._-] was sanitized away
        let stem = &tag[..tag.len() - ".log".len()];
        prop_assert!(stem
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')));
        // Sanitization is deterministic
        prop_assert_eq!(tag.clone(), derive_tag(&service, severity.as_str()));
    }
}
