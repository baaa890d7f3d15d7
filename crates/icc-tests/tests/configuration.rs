//! IccConfiguration: validation, fallback and channel normalization

use std::sync::Arc;

use icc_tests::synthetic;
use oxicc_core::{
    ConfigurationOptions, DeviceSpace, IccConfiguration, IccErrorKind, Intent, Profile,
    ProfileSource, Xyz, uncalibrated,
};

fn press_config(intent: Intent) -> IccConfiguration {
    IccConfiguration::open(
        ProfileSource::Bytes(synthetic::press_cmyk().build()),
        ConfigurationOptions::new().with_intent(intent),
    )
}

#[test_log::test]
fn test_calibrated_conversion() {
    let config = press_config(Intent::Perceptual);
    assert!(config.is_calibrated());
    assert_eq!(config.effective_space(), DeviceSpace::Cmyk);

    let profile = config.profile().unwrap();
    let cmyk = [0.2, 0.4, 0.6, 0.0];
    let expected = profile.to_xyz_d50(&cmyk, Intent::Perceptual).unwrap();
    assert_eq!(config.to_xyz_d50(&cmyk), expected);

    let back = config.from_xyz_d50(expected);
    assert_eq!(back.space(), DeviceSpace::Cmyk);
    for (a, b) in back.values().iter().zip(cmyk) {
        assert!((a - b).abs() < 1e-3);
    }
}

#[test]
fn test_from_path() {
    let path = std::env::temp_dir().join(format!("oxicc-press-{}.icc", std::process::id()));
    std::fs::write(&path, synthetic::press_cmyk().build()).unwrap();

    let config = IccConfiguration::open(
        ProfileSource::Path(path.clone()),
        ConfigurationOptions::default(),
    );
    let _ = std::fs::remove_file(&path);

    assert!(config.error().is_none(), "{:?}", config.error());
    assert_eq!(
        config.profile().and_then(|p| p.description()).as_deref(),
        Some("Synthetic Press CMYK")
    );
}

#[test]
fn test_short_channel_vectors_are_padded() {
    let config = press_config(Intent::RelativeColorimetric);
    assert_eq!(config.to_xyz_d50(&[0.8]), config.to_xyz_d50(&[0.8, 0.0, 0.0, 0.0]));
    assert_eq!(
        config.to_xyz_d50(&[0.1, 0.2, 0.3, 0.4, 0.9, 0.9]),
        config.to_xyz_d50(&[0.1, 0.2, 0.3, 0.4])
    );
}

#[test]
fn test_wrong_device_space_falls_back() {
    let config = IccConfiguration::open(
        ProfileSource::Bytes(synthetic::display_rgb().build()),
        ConfigurationOptions::default(),
    );
    assert!(!config.is_calibrated());
    assert_eq!(config.error_kind(), Some(IccErrorKind::UnsupportedHeader));

    let cmyk = [0.1, 0.5, 0.2, 0.3];
    assert_eq!(config.to_xyz_d50(&cmyk), uncalibrated::to_xyz_d50(&cmyk));
    assert_eq!(
        config.from_xyz_d50(Xyz::new(0.3, 0.3, 0.3)).space(),
        DeviceSpace::UncalibratedCmyk
    );
}

#[test]
fn test_rgb_configuration() {
    let config = IccConfiguration::open(
        ProfileSource::Bytes(synthetic::display_rgb().build()),
        ConfigurationOptions::new().with_expected_space(DeviceSpace::Rgb),
    );
    assert!(config.is_calibrated());

    let rgb = config.from_xyz_d50(config.to_xyz_d50(&[0.5, 0.6, 0.7]));
    assert_eq!(rgb.space(), DeviceSpace::Rgb);
    let rgb = rgb.into_values();
    assert_eq!(rgb.len(), 3);
    assert!((rgb[1] - 0.6).abs() < 1e-3);
}

#[test]
fn test_unsupported_intent_falls_back() {
    let bytes = synthetic::seven_ink().build();
    let options = ConfigurationOptions::new().with_expected_space(DeviceSpace::NColor(7));

    let config = IccConfiguration::open(ProfileSource::Bytes(bytes.clone()), options);
    assert_eq!(config.error_kind(), Some(IccErrorKind::UnsupportedIntent));

    let config = IccConfiguration::open(
        ProfileSource::Bytes(bytes),
        options.with_intent(Intent::AbsoluteColorimetric),
    );
    assert!(config.is_calibrated());
    assert_eq!(config.from_xyz_d50(Xyz::new(0.2, 0.2, 0.2)).len(), 7);
}

#[test]
fn test_wrong_signature_falls_back() {
    let config = IccConfiguration::open(
        ProfileSource::Bytes(synthetic::press_cmyk().signature(b"abcd").build()),
        ConfigurationOptions::default(),
    );
    assert_eq!(config.error_kind(), Some(IccErrorKind::WrongSignature));
    assert!(config.error().is_some_and(|e| e.contains("acsp")));
}

#[test]
fn test_from_shared_profile() {
    let profile = Arc::new(Profile::from_vec(synthetic::press_cmyk().build()).unwrap());
    let a = IccConfiguration::from_profile(profile.clone(), ConfigurationOptions::default());
    let b = IccConfiguration::from_profile(
        profile.clone(),
        ConfigurationOptions::new().with_intent(Intent::Saturation),
    );
    assert!(a.is_calibrated() && b.is_calibrated());
    assert_eq!(Arc::strong_count(&profile), 3);
    assert_ne!(
        a.to_xyz_d50(&[0.1, 0.2, 0.6, 0.0]),
        b.to_xyz_d50(&[0.1, 0.2, 0.6, 0.0])
    );
}

#[test]
fn test_u8_batch() {
    let config = press_config(Intent::Perceptual);
    let pixels = [0u8, 51, 102, 0, 255, 255, 255, 0, 7];
    let xyz = config.to_xyz_d50_u8(&pixels);
    assert_eq!(xyz.len(), 2);
    assert_eq!(xyz[0], config.to_xyz_d50(&[0.0, 0.2, 0.4, 0.0]));
}
