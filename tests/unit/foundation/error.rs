use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CompareError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(CompareError::media("x").to_string().contains("media error:"));
    assert!(
        CompareError::invalid_region("x")
            .to_string()
            .contains("invalid region:")
    );
    assert!(
        CompareError::UnknownKernel("sinc".to_string())
            .to_string()
            .contains("sinc")
    );
}

#[test]
fn only_title_mismatch_is_soft() {
    assert!(CompareError::TitleCountMismatch { titles: 1, clips: 3 }.is_soft());
    assert!(
        !CompareError::StartOutOfBounds {
            start: 10,
            frame_count: 5
        }
        .is_soft()
    );
    assert!(!CompareError::validation("x").is_soft());
}

#[test]
fn aspect_mismatch_names_both_geometries() {
    let err = CompareError::AspectRatioMismatch {
        expected: Dimensions::new(1920, 800),
        found: Dimensions::new(1920, 1080),
    };
    let msg = err.to_string();
    assert!(msg.contains("1920x800"));
    assert!(msg.contains("1920x1080"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CompareError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
