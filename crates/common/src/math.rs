use std::f32::consts::TAU;

/// Clamped linear remap of `v` from `[vmin, vmax]` onto `[tmin, tmax]`.
///
/// A degenerate source range (`vmin == vmax`) maps everything to `tmin`.
/// Clamping uses `min` then `max`, so an inverted source range or a NaN
/// input never panics.
pub fn normalize(v: f32, vmin: f32, vmax: f32, tmin: f32, tmax: f32) -> f32 {
    let nv = v.min(vmax).max(vmin);
    let dv = vmax - vmin;
    if dv == 0.0 {
        return tmin;
    }
    let pc = (nv - vmin) / dv;
    tmin + pc * (tmax - tmin)
}

/// Wrap an angle in radians into `[0, 2π)`.
pub fn wrap_angle(a: f32) -> f32 {
    let w = a.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if w >= TAU { 0.0 } else { w }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_horizontal_range() {
        assert_eq!(normalize(-1.0, -1.0, 1.0, -100.0, 100.0), -100.0);
        assert_eq!(normalize(1.0, -1.0, 1.0, -100.0, 100.0), 100.0);
        assert_eq!(normalize(0.0, -1.0, 1.0, -100.0, 100.0), 0.0);
    }

    #[test]
    fn normalize_clamps_out_of_range() {
        assert_eq!(normalize(2.0, -1.0, 1.0, -100.0, 100.0), 100.0);
        assert_eq!(normalize(-5.0, -1.0, 1.0, -100.0, 100.0), -100.0);
    }

    #[test]
    fn normalize_vertical_midpoint() {
        assert_eq!(normalize(0.0, -1.0, 1.0, 25.0, 175.0), 100.0);
    }

    #[test]
    fn normalize_degenerate_source_returns_target_min() {
        assert_eq!(normalize(3.0, 1.0, 1.0, 25.0, 175.0), 25.0);
    }

    #[test]
    fn normalize_nan_lands_on_source_max() {
        assert_eq!(normalize(f32::NAN, -1.0, 1.0, -100.0, 100.0), 100.0);
    }

    #[test]
    fn wrap_angle_range() {
        assert_eq!(wrap_angle(0.0), 0.0);
        assert!((wrap_angle(TAU + 0.5) - 0.5).abs() < 1e-5);
        assert!((wrap_angle(-0.5) - (TAU - 0.5)).abs() < 1e-5);
        assert!(wrap_angle(-1e-9) < TAU);
    }
}
