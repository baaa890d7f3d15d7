//! Rendering intent selection, fallback and absolute colorimetric scaling

use icc_tests::fixtures::{Manifest, load_profile};
use icc_tests::synthetic::{self, PRESS_MEDIA_WHITE};
use oxicc_core::{D50, Direction, IccError, Intent, Profile, TagSignature};

#[test]
fn test_supported_intents_match_manifest() {
    let manifest = Manifest::load().unwrap();
    for fixture in &manifest.profiles {
        let profile = load_profile(&fixture.name).unwrap();
        let supported: Vec<String> = profile
            .supported_intents()
            .iter()
            .map(|i| format!("{i:?}"))
            .collect();
        assert_eq!(supported, fixture.supported_intents, "{}", fixture.name);
    }
}

#[test]
fn test_intent_selects_tag() {
    let profile = load_profile("press_cmyk").unwrap();
    let cases = [
        (Intent::Perceptual, TagSignature::A2B0, TagSignature::B2A0),
        (Intent::RelativeColorimetric, TagSignature::A2B1, TagSignature::B2A1),
        (Intent::Saturation, TagSignature::A2B2, TagSignature::B2A2),
        (Intent::AbsoluteColorimetric, TagSignature::A2B1, TagSignature::B2A1),
    ];
    for (intent, a2b, b2a) in cases {
        assert_eq!(
            profile.pipeline(Direction::DeviceToPcs, intent).unwrap().tag(),
            a2b
        );
        assert_eq!(
            profile.pipeline(Direction::PcsToDevice, intent).unwrap().tag(),
            b2a
        );
    }
}

#[test]
fn test_saturation_differs_from_perceptual() {
    let profile = load_profile("press_cmyk").unwrap();
    let cmyk = [0.1, 0.2, 0.6, 0.0];
    let perceptual = profile.to_xyz_d50(&cmyk, Intent::Perceptual).unwrap();
    let saturation = profile.to_xyz_d50(&cmyk, Intent::Saturation).unwrap();
    assert!(!perceptual.approx_eq(&saturation, 1e-3));
}

#[test_log::test]
fn test_absolute_scales_by_media_white() {
    let profile = load_profile("press_cmyk").unwrap();
    let cmyk = [0.3, 0.5, 0.2, 0.1];

    // same tag, same raw PCS
    let relative_pcs = profile.to_pcs(&cmyk, Intent::RelativeColorimetric).unwrap();
    let absolute_pcs = profile.to_pcs(&cmyk, Intent::AbsoluteColorimetric).unwrap();
    assert_eq!(relative_pcs, absolute_pcs);

    let relative = profile
        .to_xyz_d50(&cmyk, Intent::RelativeColorimetric)
        .unwrap();
    let absolute = profile
        .to_xyz_d50(&cmyk, Intent::AbsoluteColorimetric)
        .unwrap();

    let white = profile.media_white_point().unwrap();
    let expected = relative.mul_components(&white.div_components(&D50.xyz));
    assert!(absolute.approx_eq(&expected, 1e-12));
    assert!((white.y - PRESS_MEDIA_WHITE[1]).abs() < 1e-4);
    assert!(absolute.y < relative.y);
}

#[test]
fn test_absolute_requires_media_white() {
    let bytes = synthetic::press_cmyk().without_tag(b"wtpt").build();
    let profile = Profile::from_vec(bytes).unwrap();

    assert!(profile.error_if_unsupported(Intent::RelativeColorimetric).is_ok());
    assert!(matches!(
        profile.error_if_unsupported(Intent::AbsoluteColorimetric),
        Err(IccError::UnsupportedIntent {
            intent: Intent::AbsoluteColorimetric,
            ..
        })
    ));
}

#[test]
fn test_unspecified_uses_header_intent() {
    let profile = load_profile("seven_ink").unwrap();
    let pipeline = profile
        .pipeline(Direction::DeviceToPcs, Intent::Unspecified)
        .unwrap();
    assert_eq!(pipeline.tag(), TagSignature::A2B1);

    let device = [0.4, 0.3, 0.35, 0.3, 0.3, 0.3, 0.3];
    assert_eq!(
        profile.to_xyz_d50(&device, Intent::Unspecified).unwrap(),
        profile
            .to_xyz_d50(&device, Intent::RelativeColorimetric)
            .unwrap()
    );
}

#[test]
fn test_missing_intent_reports_tag() {
    let profile = load_profile("display_rgb").unwrap();
    match profile.error_if_unsupported(Intent::Saturation) {
        Err(IccError::UnsupportedIntent { intent, reason }) => {
            assert_eq!(intent, Intent::Saturation);
            assert!(reason.contains("A2B2"), "{reason}");
        }
        other => panic!("expected UnsupportedIntent, got {other:?}"),
    }
}

#[test]
fn test_one_direction_is_not_enough() {
    let bytes = synthetic::press_cmyk().without_tag(b"B2A2").build();
    let profile = Profile::from_vec(bytes).unwrap();

    assert!(profile
        .error_if_unsupported_in(Direction::DeviceToPcs, Intent::Saturation)
        .is_ok());
    assert!(profile
        .error_if_unsupported_in(Direction::PcsToDevice, Intent::Saturation)
        .is_err());
    assert!(profile.error_if_unsupported(Intent::Saturation).is_err());
    assert!(profile.to_xyz_d50(&[0.1, 0.1, 0.1, 0.0], Intent::Saturation).is_ok());
}
