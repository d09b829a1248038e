/// Visual transform of the active card, derived from the drag offset alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardTransform {
    pub translate_x: f32,
    pub translate_y: f32,
    pub rotation_deg: f32,
    pub opacity: f32,
    pub scale: f32,
}

pub const MAX_TILT_DEG: f32 = 10.0;

impl CardTransform {
    pub fn resting() -> CardTransform {
        CardTransform {
            translate_x: 0.0,
            translate_y: 0.0,
            rotation_deg: 0.0,
            opacity: 1.0,
            scale: 1.0,
        }
    }
}

/// Maps a drag offset to the card transform. Pure; recomputed on every
/// gesture sample, so it has to stay O(1).
///
/// Rotation interpolates dx over [-W/2, W/2] into [-10deg, 10deg] and clamps
/// at the edges. Opacity and scale fade with |dx|/W, capped at 1.
pub fn drag_transform(dx: f32, dy: f32, viewport_width: f32) -> CardTransform {
    // Input anomalies (NaN/infinite deltas) degrade to no visual change.
    let dx = if dx.is_finite() { dx } else { 0.0 };
    let dy = if dy.is_finite() { dy } else { 0.0 };
    if !viewport_width.is_finite() || viewport_width <= 0.0 {
        return CardTransform::resting();
    }

    let progress = (dx.abs() / viewport_width).min(1.0);
    let tilt = (dx / (viewport_width / 2.0)).clamp(-1.0, 1.0);

    CardTransform {
        translate_x: dx,
        translate_y: dy,
        rotation_deg: tilt * MAX_TILT_DEG,
        opacity: 1.0 - progress * 0.5,
        scale: 1.0 - progress * 0.1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: f32 = 400.0;

    #[test]
    fn rest_at_zero_offset() {
        assert_eq!(drag_transform(0.0, 0.0, W), CardTransform::resting());
    }

    #[test]
    fn half_width_hits_the_boundary() {
        let t = drag_transform(W / 2.0, 0.0, W);
        assert_eq!(t.rotation_deg, 10.0);
        assert_eq!(t.opacity, 0.75);
        assert_eq!(t.scale, 0.95);
    }

    #[test]
    fn full_width_is_the_fade_floor() {
        let t = drag_transform(W, 0.0, W);
        assert_eq!(t.opacity, 0.5);
        assert_eq!(t.scale, 0.9);
    }

    #[test]
    fn clamps_instead_of_extrapolating() {
        let inside = drag_transform(W, 0.0, W);
        let outside = drag_transform(2.0 * W, 0.0, W);
        assert_eq!(outside.rotation_deg, inside.rotation_deg);
        assert_eq!(outside.opacity, inside.opacity);
        assert_eq!(outside.scale, inside.scale);
        assert_eq!(outside.translate_x, 2.0 * W);
    }

    #[test]
    fn symmetric_for_left_swipes() {
        let right = drag_transform(120.0, 0.0, W);
        let left = drag_transform(-120.0, 0.0, W);
        assert_eq!(left.rotation_deg, -right.rotation_deg);
        assert_eq!(left.opacity, right.opacity);
        assert_eq!(left.scale, right.scale);
    }

    #[test]
    fn non_finite_samples_are_ignored() {
        assert_eq!(
            drag_transform(f32::NAN, f32::INFINITY, W),
            CardTransform::resting()
        );
        assert_eq!(drag_transform(50.0, 0.0, f32::NAN), CardTransform::resting());
        assert_eq!(drag_transform(50.0, 0.0, 0.0), CardTransform::resting());
    }
}
