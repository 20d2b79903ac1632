use super::*;

#[test]
fn clamp01_handles_nan_and_bounds() {
    assert_eq!(clamp01(f64::NAN), 0.0);
    assert_eq!(clamp01(-3.0), 0.0);
    assert_eq!(clamp01(0.25), 0.25);
    assert_eq!(clamp01(7.0), 1.0);
}

#[test]
fn ratio_or_zero_guards_degenerate_denominators() {
    assert_eq!(ratio_or_zero(1.0, 0.0), 0.0);
    assert_eq!(ratio_or_zero(1.0, -2.0), 0.0);
    assert_eq!(ratio_or_zero(1.0, f64::NAN), 0.0);
    assert_eq!(ratio_or_zero(3.0, 4.0), 0.75);
}

#[test]
fn lerp_hits_endpoints() {
    assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
    assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
    assert_eq!(lerp(2.0, 6.0, 0.5), 4.0);
}
