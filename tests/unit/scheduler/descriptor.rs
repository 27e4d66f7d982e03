use super::*;

fn desc(alias: &str, z: usize) -> WidgetDescriptor {
    WidgetDescriptor::new(
        alias,
        "builtin.fill",
        z,
        LocationSpec::Grid("A0".to_string()),
        &serde_json::json!({ "colour": [1, 2, 3] }),
    )
}

#[test]
fn dense_permutation_is_accepted() {
    let set = vec![desc("c", 2), desc("a", 0), desc("b", 1)];
    check_descriptor_set(&set).unwrap();
    check_descriptor_set(&[]).unwrap();
}

#[test]
fn duplicate_z_is_rejected() {
    let err = check_descriptor_set(&[desc("a", 0), desc("b", 0)]).unwrap_err();
    assert!(err.to_string().contains("more than one widget"), "{err}");
}

#[test]
fn gap_in_z_is_rejected() {
    let err = check_descriptor_set(&[desc("a", 0), desc("b", 2)]).unwrap_err();
    assert!(err.to_string().contains("z-position 2"), "{err}");
}

#[test]
fn payload_parsing() {
    let d = desc("a", 0);
    assert_eq!(d.parse_props().unwrap()["colour"][1], 2);

    let empty = desc("a", 0).with_raw(b"  ".to_vec());
    assert!(empty.parse_props().unwrap().as_object().unwrap().is_empty());

    let broken = desc("a", 0).with_raw(b"{not json".to_vec());
    assert!(broken.parse_props().is_err());
}
