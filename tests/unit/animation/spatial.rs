use super::*;

fn close(a: Vec3, b: Vec3) -> bool {
    (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9 && (a.z - b.z).abs() < 1e-9
}

#[test]
fn empty_3d_track_is_identity() {
    assert_eq!(interpolate_3d_keyframes(&[], 0.4), Transform3D::default());
}

#[test]
fn single_3d_keyframe_fills_defaults() {
    let kf = Keyframe3D {
        time: 0.5,
        position: Some(Vec3::new(1.0, 2.0, 3.0)),
        ..Keyframe3D::default()
    };
    let s = interpolate_3d_keyframes(&[kf], 0.9);
    assert_eq!(s.position, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(s.rotation, Vec3::ZERO);
    assert_eq!(s.scale, Vec3::ONE);
    assert_eq!(s.opacity, 1.0);
}

#[test]
fn vec3_fields_interpolate_and_hold() {
    let kfs = vec![
        Keyframe3D {
            time: 0.0,
            position: Some(Vec3::ZERO),
            rotation: Some(Vec3::new(0.0, 1.0, 0.0)),
            scale: Some(Scale3::Uniform(2.0)),
            easing: Some("linear".to_owned()),
            ..Keyframe3D::default()
        },
        Keyframe3D {
            time: 1.0,
            position: Some(Vec3::new(10.0, 0.0, -4.0)),
            scale: Some(Scale3::Axes(Vec3::new(1.0, 2.0, 3.0))),
            ..Keyframe3D::default()
        },
    ];
    let s = interpolate_3d_keyframes(&kfs, 0.5);
    assert!(close(s.position, Vec3::new(5.0, 0.0, -2.0)));
    assert!(close(s.rotation, Vec3::new(0.0, 1.0, 0.0)));
    assert!(close(s.scale, Vec3::new(1.5, 2.0, 2.5)));
}

#[test]
fn later_3d_keyframes_inherit_earlier_fields() {
    let kfs = vec![
        Keyframe3D {
            time: 0.0,
            rotation: Some(Vec3::new(0.0, 1.5, 0.0)),
            opacity: Some(0.2),
            easing: Some("linear".to_owned()),
            ..Keyframe3D::default()
        },
        Keyframe3D {
            time: 0.5,
            position: Some(Vec3::new(2.0, 0.0, 0.0)),
            easing: Some("linear".to_owned()),
            ..Keyframe3D::default()
        },
        Keyframe3D {
            time: 1.0,
            position: Some(Vec3::new(4.0, 0.0, 0.0)),
            ..Keyframe3D::default()
        },
    ];
    let mid = interpolate_3d_keyframes(&kfs, 0.75);
    assert!(close(mid.position, Vec3::new(3.0, 0.0, 0.0)));
    assert!(close(mid.rotation, Vec3::new(0.0, 1.5, 0.0)));
    assert_eq!(mid.opacity, 0.2);
    let end = interpolate_3d_keyframes(&kfs, 1.0);
    assert_eq!(end.rotation, Vec3::new(0.0, 1.5, 0.0));
    assert_eq!(end.scale, Vec3::ONE);
}

#[test]
fn scale3_accepts_number_or_triple() {
    let a: Scale3 = serde_json::from_value(serde_json::json!(1.5)).unwrap();
    assert_eq!(a, Scale3::Uniform(1.5));
    let b: Scale3 = serde_json::from_value(serde_json::json!([1.0, 2.0, 3.0])).unwrap();
    assert_eq!(b.to_vec3(), Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn empty_camera_track_uses_defaults() {
    let cam = interpolate_camera_track(&[], 0.5);
    assert_eq!(cam.position, Vec3::new(0.0, 0.0, 6.0));
    assert_eq!(cam.look_at, Vec3::ZERO);
    assert_eq!(cam.fov, 50.0);
}

#[test]
fn camera_track_interpolates_fov_and_holds_look_at() {
    let kfs = vec![
        CameraKeyframe {
            time: 0.0,
            position: Vec3::new(0.0, 0.0, 10.0),
            look_at: Some(Vec3::new(1.0, 1.0, 0.0)),
            fov: Some(40.0),
            easing: None,
        },
        CameraKeyframe {
            time: 1.0,
            position: Vec3::new(0.0, 0.0, 2.0),
            look_at: None,
            fov: Some(60.0),
            easing: None,
        },
    ];
    let cam = interpolate_camera_track_with_easing(&kfs, 0.5, "linear");
    assert!(close(cam.position, Vec3::new(0.0, 0.0, 6.0)));
    assert!(close(cam.look_at, Vec3::new(1.0, 1.0, 0.0)));
    assert!((cam.fov - 50.0).abs() < 1e-9);

    let end = interpolate_camera_track(&kfs, 1.0);
    assert_eq!(end.look_at, Vec3::new(1.0, 1.0, 0.0));
    assert_eq!(end.fov, 60.0);
}

#[test]
fn camera_keyframe_parses_camel_case() {
    let kf: CameraKeyframe = serde_json::from_value(serde_json::json!({
        "time": 0.0,
        "position": [0.0, 1.0, 5.0],
        "lookAt": [0.0, 0.0, 0.0],
        "fov": 35.0
    }))
    .unwrap();
    assert_eq!(kf.look_at, Some(Vec3::ZERO));
    assert_eq!(kf.fov, Some(35.0));
}
