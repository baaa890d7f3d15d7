//! Pipeline assembly and evaluation on synthetic profiles

use icc_tests::builder::{AbElements, ClutSamples, curv_identity, lut_ab_tag, lut16_tag, para_gamma};
use icc_tests::fixtures::{Manifest, load_profile};
use icc_tests::patterns::{DevicePattern, generate};
use icc_tests::{ProfileBuilder, max_abs_diff, synthetic};
use oxicc_core::icc::TagSignature;
use oxicc_core::{Direction, IccError, Intent, LutKind, PcsEncoding, Profile};

/// Intent whose slot is the tag's trailing digit
fn intent_for(tag: &str) -> Intent {
    match tag.as_bytes()[3] {
        b'0' => Intent::Perceptual,
        b'1' => Intent::RelativeColorimetric,
        _ => Intent::Saturation,
    }
}

#[test_log::test]
fn test_pipelines_match_manifest() {
    let manifest = Manifest::load().unwrap();

    for fixture in &manifest.profiles {
        let profile = load_profile(&fixture.name).unwrap();
        for lut in &fixture.luts {
            let direction = if lut.tag.starts_with("A2B") {
                Direction::DeviceToPcs
            } else {
                Direction::PcsToDevice
            };
            let pipeline = profile
                .pipeline(direction, intent_for(&lut.tag))
                .unwrap_or_else(|e| panic!("{} {}: {e}", fixture.name, lut.tag));

            assert_eq!(pipeline.tag().to_string(), lut.tag);
            assert_eq!(pipeline.direction(), direction);
            assert_eq!(format!("{:?}", pipeline.kind()), lut.kind);
            assert_eq!(format!("{:?}", pipeline.pcs_encoding()), lut.encoding);
            assert_eq!(pipeline.input_channels(), lut.inputs);
            assert_eq!(pipeline.output_channels(), lut.outputs);
            assert_eq!(pipeline.stage_names(), lut.stages, "{} {}", fixture.name, lut.tag);
        }
    }
}

#[test]
fn test_press_clut_matches_model() {
    let profile = load_profile("press_cmyk").unwrap();

    let mut samples = generate(DevicePattern::Corners, 4);
    samples.extend(generate(
        DevicePattern::Random {
            seed: 11,
            count: 200,
            lo: 0.0,
            hi: 1.0,
        },
        4,
    ));

    for slot in 0..3 {
        let pipeline = profile
            .pipeline(Direction::DeviceToPcs, intent_for(&format!("A2B{slot}")))
            .unwrap();
        for cmyk in &samples {
            let expected = synthetic::press_forward([cmyk[0], cmyk[1], cmyk[2], cmyk[3]], slot);
            let actual = pipeline.eval(cmyk).unwrap();
            assert!(
                max_abs_diff(&actual, &expected) < 1e-4,
                "slot {slot} {cmyk:?}: {actual:?} vs {expected:?}"
            );
        }
    }
}

#[test]
fn test_lut8_clut_matches_model() {
    let profile = load_profile("newsprint_cmyk").unwrap();
    let pipeline = profile
        .pipeline(Direction::DeviceToPcs, Intent::Perceptual)
        .unwrap();
    assert_eq!(pipeline.kind(), LutKind::Lut8);
    assert_eq!(pipeline.pcs_encoding(), PcsEncoding::LabV4);

    let mut samples = generate(DevicePattern::Corners, 4);
    samples.extend(generate(
        DevicePattern::Random {
            seed: 8,
            count: 200,
            lo: 0.0,
            hi: 1.0,
        },
        4,
    ));

    // nodes are rounded to 1/255
    let tolerance = 0.5 / 255.0 + 1e-9;
    for cmyk in &samples {
        let expected = synthetic::press_forward([cmyk[0], cmyk[1], cmyk[2], cmyk[3]], 0);
        let actual = pipeline.eval(cmyk).unwrap();
        assert!(
            max_abs_diff(&actual, &expected) < tolerance,
            "{cmyk:?}: {actual:?} vs {expected:?}"
        );
    }
}

#[test]
fn test_lut8_lab_is_not_legacy_scaled() {
    let profile = load_profile("newsprint_cmyk").unwrap();
    // paper encodes as [255, 64, 64]
    let lab = profile
        .to_pcs(&[0.0; 4], Intent::Perceptual)
        .unwrap()
        .to_lab();
    assert!((lab.l - 100.0).abs() < 1e-9, "{lab:?}");
    assert!((lab.a + 64.0).abs() < 1e-9, "{lab:?}");
    assert!((lab.b + 64.0).abs() < 1e-9, "{lab:?}");
}

#[test]
fn test_black_ink_darkens() {
    let profile = load_profile("press_cmyk").unwrap();
    let mut last = f64::INFINITY;
    for k in [0.0, 0.25, 0.5, 0.75, 1.0] {
        let lab = profile
            .to_pcs(&[0.2, 0.2, 0.2, k], Intent::Perceptual)
            .unwrap()
            .to_lab();
        assert!(lab.l < last);
        last = lab.l;
    }
}

#[test]
fn test_legacy_lab_white() {
    // v0 = 0xFF00 / 0xFFFF decodes to L = 100 under the legacy encoding
    let white = PcsEncoding::LabV2Legacy
        .decode([65280.0 / 65535.0, 32768.0 / 65535.0, 32768.0 / 65535.0])
        .to_lab();
    assert!((white.l - 100.0).abs() < 1e-9);
    assert!(white.a.abs() < 1e-9);
    assert!(white.b.abs() < 1e-9);
}

#[test]
fn test_display_matrix_shaper() {
    let profile = load_profile("display_rgb").unwrap();

    for rgb in generate(
        DevicePattern::Random {
            seed: 3,
            count: 100,
            lo: 0.0,
            hi: 1.0,
        },
        3,
    ) {
        let expected = synthetic::display_forward([rgb[0], rgb[1], rgb[2]]);
        let xyz = profile.to_xyz_d50(&rgb, Intent::Perceptual).unwrap();
        assert!(max_abs_diff(&xyz.to_array(), &expected) < 1e-4, "{rgb:?}");
    }

    let white = profile.to_xyz_d50(&[1.0, 1.0, 1.0], Intent::Perceptual).unwrap();
    assert!(white.approx_eq(&oxicc_core::D50.xyz, 1e-3));
}

#[test]
fn test_seven_ink_clut_matches_model() {
    let profile = load_profile("seven_ink").unwrap();
    let pipeline = profile
        .pipeline(Direction::DeviceToPcs, Intent::RelativeColorimetric)
        .unwrap();

    for d in generate(
        DevicePattern::Random {
            seed: 5,
            count: 50,
            lo: 0.0,
            hi: 1.0,
        },
        7,
    ) {
        let expected = synthetic::seven_ink_forward(&d);
        let actual = pipeline.eval(&d).unwrap();
        assert!(max_abs_diff(&actual, &expected) < 1e-4, "{d:?}");
    }
}

#[test]
fn test_pipelines_are_memoized() {
    let profile = load_profile("press_cmyk").unwrap();
    let a = profile
        .pipeline(Direction::DeviceToPcs, Intent::RelativeColorimetric)
        .unwrap();
    let b = profile
        .pipeline(Direction::DeviceToPcs, Intent::AbsoluteColorimetric)
        .unwrap();
    assert!(std::ptr::eq(a, b));
    assert_eq!(a.tag(), TagSignature::A2B1);
}

#[test]
fn test_lut16_matrix_only_on_xyz_input() {
    let half = [[0.5, 0.0, 0.0], [0.0, 0.5, 0.0], [0.0, 0.0, 0.5]];
    let identity_clut = ClutSamples::sample(vec![2; 3], 3, |n| n.to_vec());
    let bytes = ProfileBuilder::new(b"scnr", b"RGB ", b"XYZ ")
        .tag(b"A2B0", lut16_tag(3, 3, half, &identity_clut))
        .tag(b"B2A0", lut16_tag(3, 3, half, &identity_clut))
        .build();
    let profile = Profile::from_vec(bytes).unwrap();

    let forward = profile
        .pipeline(Direction::DeviceToPcs, Intent::Perceptual)
        .unwrap();
    assert_eq!(forward.stage_names(), ["curves", "clut", "curves"]);
    assert_eq!(forward.pcs_encoding(), PcsEncoding::Xyz);

    let inverse = profile
        .pipeline(Direction::PcsToDevice, Intent::Perceptual)
        .unwrap();
    assert_eq!(inverse.kind(), LutKind::Lut16);
    assert_eq!(inverse.stage_names(), ["matrix", "curves", "clut", "curves"]);

    let out = inverse.eval(&[0.4, 0.6, 0.8]).unwrap();
    assert!(max_abs_diff(&out, &[0.2, 0.3, 0.4]) < 1e-4);
}

#[test]
fn test_unsupported_element_set() {
    let b_and_m = AbElements {
        b: Some(vec![curv_identity(); 3]),
        m: Some(vec![para_gamma(2.2); 3]),
        ..Default::default()
    };
    let bytes = synthetic::display_rgb()
        .tag(b"A2B0", lut_ab_tag(true, 3, 3, &b_and_m))
        .build();
    let profile = Profile::from_vec(bytes).unwrap();

    match profile.pipeline(Direction::DeviceToPcs, Intent::Perceptual) {
        Err(IccError::UnsupportedLut(msg)) => assert!(msg.contains("B, M"), "{msg}"),
        other => panic!("expected UnsupportedLut, got {other:?}"),
    }
    // the other direction is unaffected
    assert!(profile
        .pipeline(Direction::PcsToDevice, Intent::Perceptual)
        .is_ok());
}

#[test]
fn test_container_in_wrong_direction() {
    let b_only = AbElements {
        b: Some(vec![curv_identity(); 3]),
        ..Default::default()
    };
    let bytes = synthetic::display_rgb()
        .tag(b"B2A0", lut_ab_tag(true, 3, 3, &b_only))
        .build();
    let profile = Profile::from_vec(bytes).unwrap();

    assert!(matches!(
        profile.pipeline(Direction::PcsToDevice, Intent::Perceptual),
        Err(IccError::UnsupportedLut(_))
    ));
}

#[test]
fn test_lut_channels_must_match_header() {
    // an RGB-shaped lutAToB inside a CMYK profile
    let bytes = synthetic::press_cmyk()
        .tag(
            b"A2B0",
            lut_ab_tag(
                true,
                3,
                3,
                &AbElements {
                    b: Some(vec![curv_identity(); 3]),
                    ..Default::default()
                },
            ),
        )
        .build();
    let profile = Profile::from_vec(bytes).unwrap();

    assert!(matches!(
        profile.pipeline(Direction::DeviceToPcs, Intent::Perceptual),
        Err(IccError::UnsupportedLut(_))
    ));
    assert!(profile
        .pipeline(Direction::DeviceToPcs, Intent::RelativeColorimetric)
        .is_ok());
}

#[test]
fn test_wrong_input_width() {
    let profile = load_profile("press_cmyk").unwrap();
    let pipeline = profile
        .pipeline(Direction::DeviceToPcs, Intent::Perceptual)
        .unwrap();
    assert!(matches!(
        pipeline.eval(&[0.1, 0.2, 0.3]),
        Err(IccError::ShapeMismatch {
            expected: 4,
            actual: 3,
            ..
        })
    ));
}
