use super::*;

#[test]
fn vec3_serializes_as_array() {
    let v = Vec3::new(1.0, 2.0, 3.0);
    let json = serde_json::to_value(v).unwrap();
    assert_eq!(json, serde_json::json!([1.0, 2.0, 3.0]));
    let back: Vec3 = serde_json::from_value(json).unwrap();
    assert_eq!(back, v);
}

#[test]
fn vec3_lerp_is_componentwise() {
    let a = Vec3::ZERO;
    let b = Vec3::new(10.0, -10.0, 4.0);
    assert_eq!(a.lerp(b, 0.5), Vec3::new(5.0, -5.0, 2.0));
    assert_eq!(a.lerp(b, 0.0), a);
    assert_eq!(a.lerp(b, 1.0), b);
}
