//! Static overlap tests and the line/line solver
//!
//! These are the cheap building blocks: boolean overlap predicates used to decide
//! whether a ball touches a block or the paddle this tick, and the parametric line
//! intersection that the swept reflection in [`super::sweep`] is built on.

use glam::Vec2;

use super::shapes::{Box2D, Circle, Line2D};

/// Below this the two lines are considered parallel
pub const PARALLEL_EPSILON: f32 = 1e-4;

/// Box/box overlap
///
/// Strict comparison on both axes, so boxes that only share an edge don't overlap.
pub fn box_box_check(a: Box2D, b: Box2D) -> bool {
    let delta = (a.center - b.center).abs();
    delta.x < a.extents.x + b.extents.x && delta.y < a.extents.y + b.extents.y
}

/// Box/circle overlap
///
/// Two stage bound, not an exact closest-point test:
/// 1. per-axis center distance against `extents + radius`
/// 2. center distance against `|extents| + radius`
///
/// Near the diagonals of a corner this accepts circles that don't actually touch
/// the box. Reflection tuning depends on that footprint, so keep it.
pub fn box_circle_check(aabb: Box2D, circle: Circle) -> bool {
    let distance = circle.center - aabb.center;

    if distance.x.abs() > aabb.extents.x + circle.radius {
        return false;
    }
    if distance.y.abs() > aabb.extents.y + circle.radius {
        return false;
    }

    distance.length() <= aabb.extents.length() + circle.radius
}

/// Circle/circle overlap, touching counts
pub fn circle_circle_check(a: Circle, b: Circle) -> bool {
    a.center.distance(b.center) <= a.radius + b.radius
}

/// Where two lines cross
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineIntersection {
    /// Parameter along the first line (0 at start, 1 at end), unclamped
    pub t_a: f32,
    /// Parameter along the second line, unclamped
    pub t_b: f32,
    pub point: Vec2,
}

impl LineIntersection {
    /// Both parameters fall inside their segments
    #[inline]
    pub fn on_both_segments(&self) -> bool {
        is_zero_to_one(self.t_a) && is_zero_to_one(self.t_b)
    }
}

#[inline]
pub fn is_zero_to_one(t: f32) -> bool {
    (0.0..=1.0).contains(&t)
}

/// Intersect the infinite lines through `a` and `b`
///
/// Returns `None` when the lines are (nearly) parallel. The returned parameters
/// are not clamped, so the caller decides what counts as on-segment.
pub fn line_line_check(a: Line2D, b: Line2D) -> Option<LineIntersection> {
    let (x1, y1) = (a.start.x, a.start.y);
    let (x2, y2) = (a.end.x, a.end.y);
    let (x3, y3) = (b.start.x, b.start.y);
    let (x4, y4) = (b.end.x, b.end.y);

    let denom = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let cross_a = x1 * y2 - y1 * x2;
    let cross_b = x3 * y4 - y3 * x4;
    let point = Vec2::new(
        cross_a * (x3 - x4) - (x1 - x2) * cross_b,
        cross_a * (y3 - y4) - (y1 - y2) * cross_b,
    ) * (1.0 / denom);

    Some(LineIntersection {
        t_a: segment_param(a, point),
        t_b: segment_param(b, point),
        point,
    })
}

/// Parameter of `point` along `line`, measured on the line's dominant axis
#[inline]
fn segment_param(line: Line2D, point: Vec2) -> f32 {
    let d = line.delta();
    if d.x.abs() > d.y.abs() {
        (point.x - line.start.x) / d.x
    } else {
        (point.y - line.start.y) / d.y
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn boxed(cx: f32, cy: f32, ex: f32, ey: f32) -> Box2D {
        Box2D::new(Vec2::new(cx, cy), Vec2::new(ex, ey))
    }

    #[test]
    fn test_box_box_separated() {
        // delta.x = 3, sum of extents = 2
        assert!(!box_box_check(boxed(0.0, 0.0, 1.0, 1.0), boxed(3.0, 0.0, 1.0, 1.0)));
    }

    #[test]
    fn test_box_box_overlap() {
        assert!(box_box_check(boxed(0.0, 0.0, 1.0, 1.0), boxed(1.5, 0.0, 1.0, 1.0)));
    }

    #[test]
    fn test_box_box_touching_edges_do_not_overlap() {
        assert!(!box_box_check(boxed(0.0, 0.0, 1.0, 1.0), boxed(2.0, 0.0, 1.0, 1.0)));
        // Overlapping on x alone is not enough
        assert!(!box_box_check(boxed(0.0, 0.0, 1.0, 1.0), boxed(0.5, 5.0, 1.0, 1.0)));
    }

    #[test]
    fn test_circle_circle_boundary_inclusive() {
        let a = Circle::new(Vec2::ZERO, 2.0);
        assert!(circle_circle_check(a, Circle::new(Vec2::new(5.0, 0.0), 3.0)));
        assert!(!circle_circle_check(a, Circle::new(Vec2::new(5.0, 0.0), 2.9)));
    }

    #[test]
    fn test_box_circle_face_contact() {
        let b = boxed(10.0, 10.0, 5.0, 1.0);
        assert!(box_circle_check(b, Circle::new(Vec2::new(10.0, 8.5), 1.0)));
        assert!(!box_circle_check(b, Circle::new(Vec2::new(10.0, 7.5), 1.0)));
        assert!(!box_circle_check(b, Circle::new(Vec2::new(16.5, 10.0), 1.0)));
    }

    #[test]
    fn test_box_circle_corner_false_positive_is_kept() {
        // Just off the corner diagonal. The corner is about 1.01 away, so a
        // closest-point test would reject it, but 2.32 <= sqrt(2) + 1.
        let b = boxed(0.0, 0.0, 1.0, 1.0);
        let c = Circle::new(Vec2::new(1.99, 1.2), 1.0);
        let closest = c.center.clamp(b.min(), b.max());
        assert!(c.center.distance(closest) > c.radius);
        assert!(box_circle_check(b, c));
    }

    #[test]
    fn test_box_circle_diagonal_rejection() {
        // Passes both per-axis checks but fails the radial bound
        let b = boxed(0.0, 0.0, 1.0, 1.0);
        let c = Circle::new(Vec2::new(1.95, 1.95), 1.0);
        assert!(!box_circle_check(b, c));
    }

    #[test]
    fn test_line_line_crossing() {
        let a = Line2D::new(Vec2::new(0.0, 0.0), Vec2::new(2.0, 2.0));
        let b = Line2D::new(Vec2::new(0.0, 2.0), Vec2::new(2.0, 0.0));

        let hit = line_line_check(a, b).expect("lines cross");
        assert!((hit.point.x - 1.0).abs() < 0.001);
        assert!((hit.point.y - 1.0).abs() < 0.001);
        assert!((hit.t_a - 0.5).abs() < 0.001);
        assert!((hit.t_b - 0.5).abs() < 0.001);
        assert!(hit.on_both_segments());
    }

    #[test]
    fn test_line_line_parallel() {
        let a = Line2D::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0));
        let b = Line2D::new(Vec2::new(0.0, 1.0), Vec2::new(1.0, 1.0));
        assert!(line_line_check(a, b).is_none());
    }

    #[test]
    fn test_line_line_unclamped_params() {
        // Crossing lies before the start of `a` and past the end of `b`
        let a = Line2D::new(Vec2::new(0.0, 2.0), Vec2::new(0.0, 4.0));
        let b = Line2D::new(Vec2::new(-4.0, 0.0), Vec2::new(-2.0, 0.0));

        let hit = line_line_check(a, b).expect("lines cross");
        assert!((hit.t_a - (-1.0)).abs() < 0.001);
        assert!((hit.t_b - 2.0).abs() < 0.001);
        assert!(!hit.on_both_segments());
    }

    #[test]
    fn test_zero_length_segment_is_parallel() {
        let point = Line2D::new(Vec2::new(3.0, 3.0), Vec2::new(3.0, 3.0));
        let b = Line2D::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0));
        assert!(line_line_check(point, b).is_none());
    }

    #[test]
    fn test_reflect_velocity() {
        // Ball moving right, hits vertical wall (normal pointing left)
        let reflected = reflect_velocity(Vec2::new(100.0, 0.0), Vec2::new(-1.0, 0.0));
        assert!((reflected.x - (-100.0)).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);

        let reflected = reflect_velocity(Vec2::new(30.0, 40.0), Vec2::new(0.0, -1.0));
        assert!((reflected - Vec2::new(30.0, -40.0)).length() < 0.001);
    }

    #[test]
    fn test_is_zero_to_one() {
        assert!(is_zero_to_one(0.0));
        assert!(is_zero_to_one(1.0));
        assert!(!is_zero_to_one(-0.001));
        assert!(!is_zero_to_one(1.001));
    }

    fn coord() -> impl Strategy<Value = f32> {
        -100.0f32..100.0
    }

    fn extent() -> impl Strategy<Value = f32> {
        0.0f32..20.0
    }

    proptest! {
        #[test]
        fn prop_box_box_symmetric(
            ax in coord(), ay in coord(), aex in extent(), aey in extent(),
            bx in coord(), by in coord(), bex in extent(), bey in extent(),
        ) {
            let a = boxed(ax, ay, aex, aey);
            let b = boxed(bx, by, bex, bey);
            prop_assert_eq!(box_box_check(a, b), box_box_check(b, a));
        }

        #[test]
        fn prop_circle_circle_symmetric(
            ax in coord(), ay in coord(), ar in extent(),
            bx in coord(), by in coord(), br in extent(),
        ) {
            let a = Circle::new(Vec2::new(ax, ay), ar);
            let b = Circle::new(Vec2::new(bx, by), br);
            prop_assert_eq!(circle_circle_check(a, b), circle_circle_check(b, a));
        }

        #[test]
        fn prop_predicates_are_pure(
            cx in coord(), cy in coord(), r in extent(),
            bx in coord(), by in coord(), ex in extent(), ey in extent(),
        ) {
            let b = boxed(bx, by, ex, ey);
            let c = Circle::new(Vec2::new(cx, cy), r);
            let first = box_circle_check(b, c);
            prop_assert_eq!(first, box_circle_check(b, c));
            prop_assert_eq!(b, boxed(bx, by, ex, ey));
            prop_assert_eq!(c, Circle::new(Vec2::new(cx, cy), r));
        }

        #[test]
        fn prop_box_circle_never_misses_inside(
            bx in coord(), by in coord(), ex in 0.1f32..20.0, ey in 0.1f32..20.0,
            fx in -1.0f32..1.0, fy in -1.0f32..1.0, r in 0.5f32..20.0,
        ) {
            // Any center inside the box must be accepted
            let b = boxed(bx, by, ex, ey);
            let c = Circle::new(b.center + Vec2::new(fx * ex, fy * ey), r);
            prop_assert!(box_circle_check(b, c));
        }
    }
}
