//! Registry lookup, tree helpers and parameter reports

use super::sample_model::Household;
use modelparams_rs::locator::collect_registries;
use modelparams_rs::model::{change_value, find_object};
use modelparams_rs::report::{param_tables, report_params, ReportConfig};
use modelparams_rs::{ModelObject, ModelParamsError, ObjectId};

#[test]
fn test_collect_and_find_registries() {
    let household = Household::new();
    let mut locator = collect_registries(&household).unwrap();

    assert_eq!(locator.len(), 3);
    let ids: Vec<&ObjectId> = locator.iter().map(|(id, _)| id).collect();
    assert_eq!(
        ids,
        vec![
            &ObjectId::new("household"),
            &Household::utility_id(),
            &Household::thresholds_id()
        ]
    );

    let (index, registry) = locator.find(&Household::utility_id()).unwrap();
    assert_eq!(index, 1);
    assert_eq!(registry.names(), vec!["sigma", "theta"]);
    assert!(locator.find(&ObjectId::new("firm")).is_none());

    // The snapshot is detached from the tree
    let (_, registry) = locator.find_mut(&Household::utility_id()).unwrap();
    registry.change_value("sigma", &[4.0]).unwrap();
    assert_eq!(household.utility.pvector.get("sigma").unwrap().value(), &[2.0]);
}

#[test]
fn test_change_value_in_tree() {
    let mut household = Household::new();
    change_value(&mut household, &Household::utility_id(), "theta", &[0.1, 1.9]).unwrap();

    assert_eq!(household.utility.theta, vec![0.1, 1.9]);
    let utility = find_object(&household, &Household::utility_id()).unwrap();
    assert_eq!(utility.pvector().get("theta").unwrap().value(), &[0.1, 1.9]);

    // Registry errors leave the fields alone
    assert!(matches!(
        change_value(&mut household, &Household::utility_id(), "theta", &[0.1]),
        Err(ModelParamsError::SizeMismatch { .. })
    ));
    assert!(matches!(
        change_value(&mut household, &Household::utility_id(), "rho", &[0.1]),
        Err(ModelParamsError::NotFound { .. })
    ));
    assert_eq!(household.utility.theta, vec![0.1, 1.9]);
}

#[test]
fn test_param_tables_by_object() {
    let household = Household::new();
    let config = ReportConfig::default();

    let calibrated = param_tables(&household, true, &config).unwrap();
    assert_eq!(calibrated.len(), 3);
    let utility = &calibrated[&Household::utility_id()];
    assert_eq!(utility.rows.len(), 2);
    assert_eq!(utility.rows[0].label(), "Curvature (sigma): 2.0000");
    assert_eq!(utility.rows[1].label(), "Weights (theta): [0.5000, 1.5000]");

    // Only the household has a fully fixed parameter
    let fixed = param_tables(&household, false, &config).unwrap();
    assert_eq!(fixed.len(), 1);
    assert_eq!(
        fixed[&ObjectId::new("household")].rows[0].label(),
        "Interest rate (r): 0.0400"
    );
}

#[test]
fn test_report_close_to_bounds() {
    let mut household = Household::new();
    change_value(&mut household, &ObjectId::new("household"), "beta", &[0.985]).unwrap();

    let config = ReportConfig {
        close_to_bounds_only: true,
        tolerance: 0.05,
        precision: 3,
    };
    let report = report_params(&household, true, &config).unwrap();
    assert_eq!(
        report,
        "household\n  Discount factor (beta): 0.985  (close to bounds)\n"
    );

    let full = report_params(&household, true, &ReportConfig::default()).unwrap();
    assert!(full.starts_with("household\n"));
    assert!(full.contains("household > utility\n"));
    assert!(full.contains("household > thresholds\n"));
    assert!(full.contains("(dx): [0.2500, 0.2500, 0.2500, 0.2500]"));
}
