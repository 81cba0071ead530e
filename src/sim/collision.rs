//! Swept collision detection and response for a circle in a polyline world
//!
//! The tricky part of chalkline: the moving circle is never tested against a
//! world segment directly. Each segment is inflated by the circle radius into
//! a capsule (two end-cap circles plus two parallel tangent lines) and the
//! circle's centre path for the step is intersected with the capsule boundary.
//! The earliest contact reflects the remaining travel and the loop repeats
//! within the same step until the path runs clear.
//!
//! All intersection acceptance is rounded to 8 decimals and duplicate-contact
//! detection to 5 decimals. Normals are directionally meaningful but not unit
//! length; they are only normalized at the moment two simultaneous contacts
//! are merged.

use std::f64::consts::FRAC_PI_2;

use glam::DVec2;

use super::segment::Segment;
use crate::consts::MAX_BOUNCES;
use crate::round_to;

/// Decimal places for intersection acceptance.
const INTERSECT_DECIMALS: i32 = 8;
/// Decimal places for duplicate-contact detection within one resolve call.
const HISTORY_DECIMALS: i32 = 5;

/// A detected intersection point plus the surface normal at that point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub point: DVec2,
    /// Un-normalized. For line contacts this is the line direction rotated
    /// 90 degrees; for circle contacts it is the offset from the circle
    /// centre line to the intersection point.
    pub normal: DVec2,
}

/// Result of resolving one simulation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedStep {
    /// Corrected end position of the circle centre
    pub pos: DVec2,
    /// Velocity carried into subsequent steps
    pub vel: DVec2,
}

/// Intersect two finite segments.
///
/// Parallel and colinear pairs report no intersection; colinear overlap is
/// not detected. The intersection point is rounded to 8 decimals and accepted
/// only inside the rounded bounding-box intersection of both segments. The
/// normal is the direction of `b` rotated 90 degrees.
pub fn segment_segment_intersection(a: &Segment, b: &Segment) -> Option<Contact> {
    let (x1, y1, x2, y2) = (a.a.x, a.a.y, a.b.x, a.b.y);
    let (x3, y3, x4, y4) = (b.a.x, b.a.y, b.b.x, b.b.y);

    let d = (y3 - y4) * (x2 - x1) - (y1 - y2) * (x4 - x3);
    if d == 0.0 {
        return None;
    }

    let cross_a = x1 * y2 - y1 * x2;
    let cross_b = x3 * y4 - y3 * x4;
    let x = round_to(((x4 - x3) * cross_a - (x2 - x1) * cross_b) / d, INTERSECT_DECIMALS);
    let y = round_to(((y1 - y2) * cross_b - (y3 - y4) * cross_a) / d, INTERSECT_DECIMALS);

    let hi = a.max().min(b.max());
    let lo = a.min().max(b.min());
    if x > round_to(hi.x, INTERSECT_DECIMALS)
        || x < round_to(lo.x, INTERSECT_DECIMALS)
        || y > round_to(hi.y, INTERSECT_DECIMALS)
        || y < round_to(lo.y, INTERSECT_DECIMALS)
    {
        return None;
    }

    Some(Contact {
        point: DVec2::new(x, y),
        normal: DVec2::new(y4 - y3, x3 - x4),
    })
}

/// Intersect a circle with a finite segment.
///
/// Returns zero, one (tangency) or two contacts, each carrying the offset
/// from the circle centre as its normal. A degenerate segment is treated as a
/// pure point test against the circle boundary so no segment-length division
/// takes place.
pub fn circle_segment_intersection(center: DVec2, radius: f64, seg: &Segment) -> Vec<Contact> {
    let mut hits = Vec::new();

    if seg.is_degenerate() {
        let offset = seg.a - center;
        if round_to(offset.length_squared() - radius * radius, INTERSECT_DECIMALS) == 0.0 {
            hits.push(Contact {
                point: seg.a,
                normal: offset,
            });
        }
        return hits;
    }

    let d = seg.delta();
    let dl2 = d.length_squared();
    let det = (seg.a.x - center.x) * (seg.b.y - center.y)
        - (seg.a.y - center.y) * (seg.b.x - center.x);
    let dis = radius * radius * dl2 - det * det;

    if dis < 0.0 {
        return hits;
    }

    if dis == 0.0 {
        let x = round_to(det * d.y / dl2, INTERSECT_DECIMALS);
        let y = round_to(-det * d.x / dl2, INTERSECT_DECIMALS);
        hits.push(Contact {
            point: DVec2::new(x, y) + center,
            normal: DVec2::new(x, y),
        });
    } else {
        let root = dis.sqrt();
        // the x branch takes the sign of dy (with sign(0) = +1) and the y
        // branch |dy|; this keeps the two roots distinct and ordered
        let sign = if d.y < 0.0 { -1.0 } else { 1.0 };
        let x1 = round_to((det * d.y + sign * d.x * root) / dl2, INTERSECT_DECIMALS);
        let y1 = round_to((-det * d.x + d.y.abs() * root) / dl2, INTERSECT_DECIMALS);
        let x2 = round_to((det * d.y - sign * d.x * root) / dl2, INTERSECT_DECIMALS);
        let y2 = round_to((-det * d.x - d.y.abs() * root) / dl2, INTERSECT_DECIMALS);
        hits.push(Contact {
            point: DVec2::new(x1, y1) + center,
            normal: DVec2::new(x1, y1),
        });
        hits.push(Contact {
            point: DVec2::new(x2, y2) + center,
            normal: DVec2::new(x2, y2),
        });
    }

    hits.retain(|c| seg.bounds_contain(c.point));
    hits
}

/// Collect contacts between a travel segment and a world segment inflated by
/// the circle radius.
///
/// The capsule boundary is approximated by an end-cap circle at each endpoint
/// plus two tangent lines parallel to the segment, offset perpendicular by
/// the radius. A degenerate world segment contributes only its single cap.
pub fn capsule_contacts(wall: &Segment, travel: &Segment, radius: f64, out: &mut Vec<Contact>) {
    out.extend(circle_segment_intersection(wall.a, radius, travel));

    if wall.is_degenerate() {
        return;
    }

    out.extend(circle_segment_intersection(wall.b, radius, travel));

    let d = wall.delta();
    let theta = if d.x == 0.0 { FRAC_PI_2 } else { (d.y / d.x).atan() };
    let rsin = radius * theta.sin();
    let rcos = radius * theta.cos();

    let offset = DVec2::new(-rsin, rcos);
    let side_a = Segment::new(wall.a + offset, wall.b + offset);
    let side_b = Segment::new(wall.a - offset, wall.b - offset);
    if let Some(contact) = segment_segment_intersection(travel, &side_a) {
        out.push(contact);
    }
    if let Some(contact) = segment_segment_intersection(travel, &side_b) {
        out.push(contact);
    }
}

/// Reflect a vector about an un-normalized normal: `v - 2n(n.v)/|n|^2`.
#[inline]
pub fn reflect(v: DVec2, normal: DVec2) -> DVec2 {
    v - 2.0 * v.dot(normal) * normal / normal.length_squared()
}

fn already_resolved(history: &[Contact], contact: &Contact) -> bool {
    history.iter().any(|h| {
        round_to(h.point.x, HISTORY_DECIMALS) == round_to(contact.point.x, HISTORY_DECIMALS)
            && round_to(h.point.y, HISTORY_DECIMALS) == round_to(contact.point.y, HISTORY_DECIMALS)
    })
}

/// Resolve all collisions along the circle's travel within one step.
///
/// `center` is the circle centre after naive integration, so the travel
/// segment runs from `center - velocity` to `center`. Each iteration gathers
/// capsule contacts against every world segment, picks the one nearest the
/// travel start, reflects the unconsumed remainder of the travel about its
/// normal and goes again from the contact point. Two candidates at exactly
/// equal distance merge their unit normals, which yields the bisecting
/// reflection off a corner.
///
/// The loop is bounded by [`MAX_BOUNCES`]; if the bound is exhausted the ball
/// freezes at the last contact with the velocity reflected so far.
pub fn resolve_step(
    center: DVec2,
    radius: f64,
    velocity: DVec2,
    world: &[Segment],
) -> ResolvedStep {
    let mut start = center - velocity;
    let mut end = center;
    let mut vel = velocity;

    let mut history: Vec<Contact> = Vec::new();
    let mut candidates: Vec<Contact> = Vec::new();

    for bounce in 0..MAX_BOUNCES {
        candidates.clear();
        let travel = Segment::new(start, end);
        for wall in world {
            capsule_contacts(wall, &travel, radius, &mut candidates);
        }

        let mut nearest = (end - start).length_squared();
        let mut selected: Option<Contact> = None;

        for candidate in &candidates {
            let dist = (candidate.point - start).length_squared();
            if dist == nearest {
                // simultaneous with the current nearest contact
                if let Some(contact) = selected.as_mut() {
                    contact.normal = contact.normal.normalize() + candidate.normal.normalize();
                }
            } else if dist < nearest && !already_resolved(&history, candidate) {
                nearest = dist;
                selected = Some(*candidate);
            }
        }

        let Some(contact) = selected else {
            return ResolvedStep { pos: end, vel };
        };

        log::debug!(
            "bounce {} at ({:.5}, {:.5})",
            bounce,
            contact.point.x,
            contact.point.y
        );

        history.push(contact);
        let remainder = reflect(end - contact.point, contact.normal);
        start = contact.point;
        end = contact.point + remainder;
        vel = reflect(vel, contact.normal);
    }

    log::warn!(
        "bounce limit {} exhausted, freezing at ({:.5}, {:.5})",
        MAX_BOUNCES,
        start.x,
        start.y
    );
    ResolvedStep { pos: start, vel }
}

/// Static proximity predicate: does the segment already intersect or contain
/// the circle?
///
/// Used to validate a candidate segment before it enters the world, not
/// during the sweep. The out-of-bounds handling is an approximation of exact
/// point-to-segment distance: when the perpendicular foot falls off the
/// segment but inside its radius-expanded bounding box, overlap is reported
/// unless both endpoints clear the circle.
pub fn circle_overlaps_segment(center: DVec2, radius: f64, seg: &Segment) -> bool {
    let r2 = radius * radius;

    if seg.is_degenerate() {
        return (seg.a - center).length_squared() <= r2;
    }

    let d = seg.delta();
    let t = (center - seg.a).dot(d) / d.length_squared();
    let foot = seg.a + t * d;

    if (foot - center).length_squared() > r2 {
        return false;
    }

    let (lo, hi) = (seg.min(), seg.max());
    if foot.x > hi.x + radius
        || foot.x < lo.x - radius
        || foot.y > hi.y + radius
        || foot.y < lo.y - radius
    {
        return false;
    }

    if (foot.x > hi.x || foot.x < lo.x || foot.y > hi.y || foot.y < lo.y)
        && (seg.a - center).length_squared() > r2
        && (seg.b - center).length_squared() > r2
    {
        return false;
    }

    true
}
