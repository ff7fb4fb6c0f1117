//! Swept circle-vs-box reflection
//!
//! Moves a circle through one timestep against a static box and bounces it off the
//! first face it reaches. The box faces are stretched by the circle's radius past
//! each corner, and the point on the circle's rim facing the direction of travel is
//! swept against them. That turns circle-vs-box into point-vs-segment per axis.
//!
//! Only faces the circle is moving toward are tested: a ball going down and right
//! checks `top` and `left`, never `bottom` or `right`. An axis with zero velocity
//! is skipped entirely.
//!
//! A rim point that already sits up to one full step past a face (`-t` in [0, 1])
//! counts as penetrating. If nothing was hit cleanly this step, those markers turn
//! into an immediate contact at `t = 0`, with the marked normal components
//! normalized. Two marked axes give a diagonal bounce off the corner.

use glam::Vec2;

use super::collision::{is_zero_to_one, line_line_check, reflect_velocity};
use super::shapes::{Box2D, Circle, Line2D};

/// How the contact was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    /// The rim point crossed a face during the step
    Swept,
    /// The rim point was already past a face when the step began
    Penetrating,
}

/// First contact of a sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Fraction of the step travelled before contact (0-1)
    pub t: f32,
    /// Surface normal the velocity was mirrored about
    pub normal: Vec2,
    pub kind: ContactKind,
}

/// Outcome of [`reflect_circle_box`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reflection {
    /// Circle center at the end of the step
    pub position: Vec2,
    /// Velocity after the step (reflected if there was a contact)
    pub velocity: Vec2,
    pub contact: Option<Contact>,
}

impl Reflection {
    pub fn hit(&self) -> bool {
        self.contact.is_some()
    }
}

/// Per-axis result of sweeping one rim point against one face
enum AxisHit {
    Swept(f32),
    Penetrating,
    Miss,
}

fn sweep_face(rim_point: Vec2, displacement: Vec2, face: Line2D) -> AxisHit {
    let path = Line2D::swept(rim_point, displacement);
    let Some(hit) = line_line_check(path, face) else {
        return AxisHit::Miss;
    };

    if !is_zero_to_one(hit.t_b) {
        return AxisHit::Miss;
    }
    if is_zero_to_one(hit.t_a) {
        AxisHit::Swept(hit.t_a)
    } else if is_zero_to_one(-hit.t_a) {
        AxisHit::Penetrating
    } else {
        AxisHit::Miss
    }
}

/// Move `circle` by `velocity * delta_time`, bouncing off `aabb`
///
/// The circle covers the part of the step before contact at the old velocity and
/// the remainder at the reflected velocity. There is no re-resolution against
/// other shapes within the same call.
pub fn reflect_circle_box(
    circle: Circle,
    velocity: Vec2,
    delta_time: f32,
    aabb: Box2D,
) -> Reflection {
    let edges = aabb.inflated_edges(circle.radius);
    let displacement = velocity * delta_time;

    let mut normal = Vec2::ZERO;
    let mut swept_t: Option<f32> = None;
    let mut penetrating = false;

    // y axis (+y is down)
    let y_face = if velocity.y > 0.0 {
        Some((Vec2::Y, edges.top, -1.0))
    } else if velocity.y < 0.0 {
        Some((Vec2::NEG_Y, edges.bottom, 1.0))
    } else {
        None
    };
    if let Some((dir, face, ny)) = y_face {
        match sweep_face(circle.rim_point(dir), displacement, face) {
            AxisHit::Swept(t) => {
                swept_t = Some(t);
                normal = Vec2::new(0.0, ny);
            }
            AxisHit::Penetrating => {
                penetrating = true;
                normal.y = ny;
            }
            AxisHit::Miss => {}
        }
    }

    // x axis, only replaces a y hit if it happens strictly earlier
    let x_face = if velocity.x > 0.0 {
        Some((Vec2::X, edges.left, -1.0))
    } else if velocity.x < 0.0 {
        Some((Vec2::NEG_X, edges.right, 1.0))
    } else {
        None
    };
    if let Some((dir, face, nx)) = x_face {
        match sweep_face(circle.rim_point(dir), displacement, face) {
            AxisHit::Swept(t) => {
                if swept_t.is_none_or(|best| t < best) {
                    swept_t = Some(t);
                    normal = Vec2::new(nx, 0.0);
                }
            }
            AxisHit::Penetrating => {
                penetrating = true;
                normal.x = nx;
            }
            AxisHit::Miss => {}
        }
    }

    let contact = match swept_t {
        Some(t) => Some(Contact {
            t,
            normal,
            kind: ContactKind::Swept,
        }),
        None if penetrating => Some(Contact {
            t: 0.0,
            normal: normal.normalize_or_zero(),
            kind: ContactKind::Penetrating,
        }),
        None => None,
    };

    match contact {
        Some(contact) => {
            let reflected = reflect_velocity(velocity, contact.normal);
            let position = circle.center
                + velocity * contact.t * delta_time
                + reflected * (1.0 - contact.t) * delta_time;

            log::trace!(
                "circle bounced off box at {:?}: t={:.3} normal={:?} ({:?})",
                aabb.center,
                contact.t,
                contact.normal,
                contact.kind
            );

            Reflection {
                position,
                velocity: reflected,
                contact: Some(contact),
            }
        }
        None => Reflection {
            position: circle.center + velocity * delta_time,
            velocity,
            contact: None,
        },
    }
}
