//! Integration tests for the ParamRegistry collection

use modelparams_rs::{ModelParamsError, ObjectId, ParamRegistry, Parameter};

fn household() -> ParamRegistry {
    let mut registry = ParamRegistry::new(ObjectId::new("household"));
    registry
        .append(
            Parameter::scalar("beta", 0.95)
                .with_description("Discount factor")
                .with_symbol("β")
                .with_bounds(0.8, 0.99)
                .unwrap()
                .with_calibration(true)
                .unwrap(),
        )
        .unwrap();
    registry
        .append(Parameter::scalar("r", 0.04).with_description("Interest rate"))
        .unwrap();
    registry
        .append(
            Parameter::new("theta", vec![0.5, 1.5])
                .with_bounds(0.0, 2.0)
                .unwrap()
                .with_element_calibration(vec![false, true])
                .unwrap(),
        )
        .unwrap();
    registry
}

#[test]
fn test_registry_lifecycle() {
    let mut registry = household();
    assert_eq!(registry.owner(), &ObjectId::new("household"));
    assert_eq!(registry.names(), vec!["beta", "r", "theta"]);
    assert_eq!(registry.n_calibrated(), 2);

    // Lookups never fail
    assert!(registry.retrieve("gamma").is_none());
    assert_eq!(registry.retrieve("theta").unwrap().1, 2);

    // Changing values goes through the parameter checks
    registry.change_value("r", &[0.05]).unwrap();
    assert_eq!(registry.get("r").unwrap().value(), &[0.05]);
    assert!(registry.change_value("beta", &[1.2]).is_err());
    assert!(matches!(
        registry.change_value("gamma", &[1.0]),
        Err(ModelParamsError::NotFound { .. })
    ));

    // Reset restores the defaults
    registry.reset();
    assert_eq!(registry.get("r").unwrap().value(), &[0.04]);

    // Removal shifts later positions
    registry.remove("beta").unwrap();
    assert_eq!(registry.retrieve("theta").unwrap().1, 1);
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_names_are_unique() {
    let mut registry = household();
    let err = registry.append(Parameter::scalar("r", 0.03)).unwrap_err();
    match err {
        ModelParamsError::DuplicateName { name, owner } => {
            assert_eq!(name, "r");
            assert_eq!(owner, ObjectId::new("household"));
        }
        other => panic!("Expected DuplicateName, got {:?}", other),
    }
    assert_eq!(registry.get("r").unwrap().value(), &[0.04]);

    // Remove then append moves the parameter to the end
    let r = registry.remove("r").unwrap();
    registry.append(r).unwrap();
    assert_eq!(registry.names(), vec!["beta", "theta", "r"]);
}

#[test]
fn test_calibration_switches() {
    let mut registry = household();

    registry.change_calibration_status("r", true).unwrap();
    assert_eq!(registry.n_calibrated(), 3);

    registry.change_element_calibration("theta", 1, false).unwrap();
    assert_eq!(registry.fixed().len(), 1);
    assert_eq!(registry.fixed()[0].name(), "theta");

    assert!(matches!(
        registry.change_element_calibration("theta", 5, true),
        Err(ModelParamsError::IndexOutOfRange { index: 5, len: 2 })
    ));
    assert!(registry.change_calibration_status("gamma", true).is_err());
}

#[test]
fn test_json_round_trip() {
    let registry = household();
    let json = registry.to_json().unwrap();
    let loaded = ParamRegistry::from_json(&json).unwrap();
    assert_eq!(loaded, registry);

    // Duplicate names in the document are rejected
    let duplicated = json.replacen("\"r\"", "\"beta\"", 1);
    assert!(matches!(
        ParamRegistry::from_json(&duplicated),
        Err(ModelParamsError::DuplicateName { .. })
    ));
    assert!(matches!(
        ParamRegistry::from_json("{"),
        Err(ModelParamsError::Json(_))
    ));
}
