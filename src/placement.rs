//! Radiating first-fit placement of word boxes on a canvas.

/// Radius increment between rings, in pixels.
pub const RADIUS_STEP: u32 = 10;

/// Rings beyond this radius are sampled every 2° instead of every 5°.
const FINE_ANGLE_RADIUS: u32 = 50;

/// A word's footprint in canvas coordinates. `right` and `bottom` are exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlacedBox {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

impl PlacedBox {
    pub fn new(left: i64, top: i64, width: u32, height: u32) -> PlacedBox {
        PlacedBox {
            left,
            top,
            right: left + width as i64,
            bottom: top + height as i64,
        }
    }

    pub fn width(&self) -> u32 {
        (self.right - self.left) as u32
    }

    pub fn height(&self) -> u32 {
        (self.bottom - self.top) as u32
    }

    /// True unless the boxes share interior area. Touching edges do not count.
    pub fn is_disjoint(&self, other: &PlacedBox) -> bool {
        other.left >= self.right
            || other.right <= self.left
            || other.top >= self.bottom
            || other.bottom <= self.top
    }

    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.left >= 0 && self.top >= 0 && self.right <= width as i64 && self.bottom <= height as i64
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    Placed(PlacedBox),
    Exhausted,
}

/// Offsets from the canvas center, ring by ring, in search order.
///
/// Each ring of radius `r` is walked from 0° upwards. The order is part of the
/// contract: the first free candidate wins.
#[derive(Clone, Debug)]
pub struct RadialSearch {
    max_radius: u32,
    radius: u32,
    angle: u32,
}

impl RadialSearch {
    pub fn new(max_radius: u32) -> RadialSearch {
        RadialSearch {
            max_radius,
            radius: 0,
            angle: 0,
        }
    }

    fn angle_step(radius: u32) -> u32 {
        if radius > FINE_ANGLE_RADIUS {
            2
        } else {
            5
        }
    }
}

impl Iterator for RadialSearch {
    /// `(radius, angle in degrees, dx, dy)`
    type Item = (u32, u32, f64, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.radius >= self.max_radius {
            return None;
        }
        let (radius, angle) = (self.radius, self.angle);
        self.angle += Self::angle_step(radius);
        if self.angle >= 360 {
            self.angle = 0;
            self.radius += RADIUS_STEP;
        }
        let (sin, cos) = (angle as f64).to_radians().sin_cos();
        Some((radius, angle, radius as f64 * cos, radius as f64 * sin))
    }
}

/// Find the first free spot for a `width` x `height` box, spiralling out from the center.
pub fn find_slot(
    canvas_width: u32,
    canvas_height: u32,
    placed: &[PlacedBox],
    width: u32,
    height: u32,
) -> Placement {
    let center_x = (canvas_width / 2) as f64;
    let center_y = (canvas_height / 2) as f64;
    let half_w = (width / 2) as f64;
    let half_h = (height / 2) as f64;
    for (radius, angle, dx, dy) in RadialSearch::new(canvas_width.max(canvas_height)) {
        // Truncation toward zero, not floor.
        let left = (center_x + dx - half_w) as i64;
        let top = (center_y + dy - half_h) as i64;
        let candidate = PlacedBox::new(left, top, width, height);
        if !candidate.fits_within(canvas_width, canvas_height) {
            continue;
        }
        if placed.iter().all(|other| other.is_disjoint(&candidate)) {
            trace!("slot at r={} a={}: {:?}", radius, angle, candidate);
            return Placement::Placed(candidate);
        }
    }
    Placement::Exhausted
}
