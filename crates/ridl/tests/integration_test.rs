#[test]
fn sample_idl() {
    let data = include_str!("sample.idl");

    let output = ridl::parse(data).expect("could not parse sample.idl");
    assert!(output.warnings.is_empty());

    let names: Vec<&str> = output.classes.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["IMan", "Scaler"]);

    // Sorted member names; the constructor and the Title property are not
    // member declarations and must not appear.
    assert_eq!(
        output.classes[0].members,
        ["Close", "Open", "PrimeAsync", "Version"]
    );
    assert_eq!(output.classes[1].members, ["Resize"]);
}
