//! Property tests for the change cascade.

use proptest::prelude::*;

use mesh_deploy::domain::entities::ApplyResult;
use mesh_deploy::domain::services::{
    mesh_rules, CascadeAction, Manifest, ManifestParams, UNITS, WATCHDOG_SCRIPTS, WATCHDOG_UNITS,
};

fn manifest() -> Manifest {
    Manifest::mesh(&ManifestParams::new("/home/pi", "pi"))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: actions fire exactly when a relevant artifact changed, reloads come first.
    #[test]
    fn property_cascade_follows_change_flags(flags in proptest::collection::vec(any::<bool>(), 16)) {
        let manifest = manifest();
        let results: Vec<ApplyResult> = manifest
            .artifacts()
            .iter()
            .zip(flags.iter())
            .map(|(a, changed)| ApplyResult::new(a, *changed))
            .collect();
        let changed = |name: &str| results.iter().any(|r| r.name() == name && r.changed());

        let actions: Vec<CascadeAction> = mesh_rules()
            .plan(&results)
            .into_iter()
            .flat_map(|f| f.actions)
            .collect();

        let unit_changed = UNITS.iter().any(|u| changed(u));
        let watchdog_changed = WATCHDOG_SCRIPTS.iter().chain(WATCHDOG_UNITS.iter()).any(|n| changed(n));
        let journald_changed = changed("journald-mesh.conf");

        prop_assert_eq!(actions.contains(&CascadeAction::ReloadUnits), unit_changed);
        let restarts = actions
            .iter()
            .filter(|a| matches!(a, CascadeAction::RestartService(_)))
            .count();
        prop_assert_eq!(restarts, if watchdog_changed { 2 } else { 0 });
        let journald = actions.iter().any(|a| a.describe() == "systemctl restart systemd-journald");
        prop_assert_eq!(journald, journald_changed);

        if let Some(reload) = actions.iter().position(|a| *a == CascadeAction::ReloadUnits) {
            for (i, action) in actions.iter().enumerate() {
                if matches!(action, CascadeAction::RestartService(_)) {
                    prop_assert!(i > reload);
                }
            }
        }
    }

    /// PROPERTY: nothing changed means nothing fires, regardless of order of evaluation.
    #[test]
    fn property_no_changes_no_actions(_seed in any::<u8>()) {
        let manifest = manifest();
        let results: Vec<ApplyResult> = manifest
            .artifacts()
            .iter()
            .map(|a| ApplyResult::new(a, false))
            .collect();
        prop_assert!(mesh_rules().plan(&results).is_empty());
    }
}
