use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        EdgeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        EdgeError::execution("x")
            .to_string()
            .contains("execution error:")
    );
    assert!(
        EdgeError::unknown_strategy("7")
            .to_string()
            .contains("unknown strategy: 7")
    );
    assert!(EdgeError::EmptyInput.to_string().contains("empty input"));
    assert!(EdgeError::PoolStopped.to_string().contains("stopped"));
}

#[test]
fn out_of_bounds_reports_coordinates_and_shape() {
    let msg = EdgeError::out_of_bounds(9, 2, 4, 3).to_string();
    assert!(msg.contains("(9, 2)"));
    assert!(msg.contains("4x3"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = EdgeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
