use super::*;

#[test]
fn clamp_returns_bound_when_outside() {
    assert_eq!(clamp(-3.0, 0.0, 1.0), 0.0);
    assert_eq!(clamp(7, 0, 5), 5);
    assert_eq!(clamp(0.25, 0.0, 1.0), 0.25);
}

#[test]
fn lerp_hits_endpoints() {
    assert_eq!(lerp(2.0_f32, 0.0, 0.0), 2.0);
    assert_eq!(lerp(2.0_f32, 0.0, 1.0), 0.0);
    assert!(approx_eq(lerp(0.75_f32, 0.0, 0.5), 0.375, 1e-6));
}

