//! Broken, truncated and unsupported input

use icc_tests::builder::{ProfileBuilder, xyz_tag};
use icc_tests::synthetic;
use oxicc_core::{DeviceSpace, IccError, IccErrorKind, Intent, Profile};

#[test]
fn test_missing_file() {
    let err = Profile::from_path("🚫").unwrap_err();
    assert_eq!(err.kind(), IccErrorKind::FileNotFound);
    assert!(err.is_construction_error());
    assert!(err.to_string().contains("🚫"));
}

#[test]
fn test_truncated_profile() {
    let bytes = synthetic::press_cmyk().build();

    assert!(matches!(
        Profile::from_bytes(&bytes[..64]),
        Err(IccError::NotEnoughBytes {
            expected: 128,
            actual: 64
        })
    ));

    // header intact, tag data cut off
    let cut = bytes.len() - 100;
    assert!(matches!(
        Profile::from_bytes(&bytes[..cut]),
        Err(IccError::NotEnoughBytes { .. })
    ));
}

#[test]
fn test_trailing_garbage() {
    let mut bytes = synthetic::press_cmyk().build();
    bytes.extend_from_slice(&[0u8; 16]);
    assert!(matches!(
        Profile::from_vec(bytes),
        Err(IccError::NotParseable(_))
    ));
}

#[test]
fn test_wrong_signature_rejects_every_intent() {
    let bytes = synthetic::press_cmyk().signature(b"xxxx").build();
    let profile = Profile::from_vec(bytes).unwrap();

    for intent in Intent::ALL {
        assert!(matches!(
            profile.error_if_unsupported(intent),
            Err(IccError::WrongSignature(_))
        ));
    }
    assert!(profile.supported_intents().is_empty());
}

#[test]
fn test_corrupted_signature_bytes() {
    let mut bytes = synthetic::display_rgb().build();
    bytes[36..40].copy_from_slice(b"ACSP");
    let profile = Profile::from_vec(bytes).unwrap();
    assert_eq!(
        profile.check_header(),
        Err(IccError::WrongSignature(u32::from_be_bytes(*b"ACSP")))
    );
}

#[test]
fn test_device_space_mismatch() {
    let profile = Profile::from_vec(synthetic::display_rgb().build()).unwrap();
    assert!(matches!(
        profile.error_if_unsupported_for(Intent::Perceptual, DeviceSpace::Cmyk),
        Err(IccError::UnsupportedHeader(_))
    ));
    assert!(profile
        .error_if_unsupported_for(Intent::Perceptual, DeviceSpace::Rgb)
        .is_ok());

    let press = Profile::from_vec(synthetic::press_cmyk().build()).unwrap();
    assert!(press
        .error_if_unsupported_for(Intent::Perceptual, DeviceSpace::UncalibratedCmyk)
        .is_ok());
}

#[test]
fn test_unsupported_classes() {
    for class in [b"link", b"abst", b"nmcl"] {
        let bytes = ProfileBuilder::new(class, b"CMYK", b"Lab ")
            .tag(b"wtpt", xyz_tag([0.9642, 1.0, 0.8249]))
            .build();
        let profile = Profile::from_vec(bytes).unwrap();
        assert!(matches!(
            profile.check_header(),
            Err(IccError::UnsupportedHeader(_))
        ));
    }
}

#[test]
fn test_unsupported_pcs() {
    let bytes = ProfileBuilder::new(b"prtr", b"CMYK", b"RGB ").build();
    let profile = Profile::from_vec(bytes).unwrap();
    assert!(matches!(
        profile.check_header(),
        Err(IccError::UnsupportedHeader(_))
    ));
}

#[test]
fn test_removed_tag_degrades_one_slot() {
    let bytes = synthetic::press_cmyk().without_tag(b"A2B1").build();
    let profile = Profile::from_vec(bytes).unwrap();

    assert!(profile.error_if_unsupported(Intent::Perceptual).is_ok());
    assert!(profile.error_if_unsupported(Intent::Saturation).is_ok());
    for intent in [Intent::RelativeColorimetric, Intent::AbsoluteColorimetric] {
        assert_eq!(
            profile.error_if_unsupported(intent).map_err(|e| e.kind()),
            Err(IccErrorKind::UnsupportedIntent)
        );
    }
}

#[test]
fn test_multiprocess_tag() {
    let profile = Profile::from_vec(synthetic::multiprocess_cmyk().build()).unwrap();
    assert!(matches!(
        profile.error_if_unsupported(Intent::Perceptual),
        Err(IccError::UnsupportedLut(_))
    ));
    // failures are memoized and reported the same way every time
    let first = profile.to_xyz_d50(&[0.0; 4], Intent::Perceptual).unwrap_err();
    let second = profile.to_xyz_d50(&[0.0; 4], Intent::Perceptual).unwrap_err();
    assert_eq!(first, second);
}

#[test]
fn test_corrupt_lut_is_not_parseable() {
    let mut lut = b"mft2".to_vec();
    lut.extend_from_slice(&[0u8; 20]);
    let bytes = synthetic::press_cmyk().tag(b"A2B0", lut).build();
    let profile = Profile::from_vec(bytes).unwrap();

    assert!(matches!(
        profile.error_if_unsupported(Intent::Perceptual),
        Err(IccError::NotParseable(_))
    ));
    assert!(profile.error_if_unsupported(Intent::RelativeColorimetric).is_ok());
}

#[test]
fn test_out_of_bounds_tag_entry() {
    let mut bytes = synthetic::seven_ink().build();
    // first tag entry size field
    bytes[140..144].copy_from_slice(&u32::MAX.to_be_bytes());
    assert!(Profile::from_vec(bytes).is_err());
}
