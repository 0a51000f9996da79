//! Property tests for octal file modes.

use proptest::prelude::*;

use mesh_deploy::domain::value_objects::FileMode;

proptest! {
    /// PROPERTY: any permission bits survive display and parse.
    #[test]
    fn property_mode_display_parses_back(bits in 0u32..=0o7777) {
        let mode = FileMode::new(bits).unwrap();
        let parsed: FileMode = mode.to_string().parse().unwrap();
        prop_assert_eq!(parsed, mode);
    }

    /// PROPERTY: parsing arbitrary text never panics.
    #[test]
    fn property_mode_parse_never_panics(s in "\\PC{0,8}") {
        let _ = s.parse::<FileMode>();
    }
}
