//! Collision Detection
//!
//! The row under the pointer is the one whose visual centre is nearest,
//! not the first one the pointer overlaps. Rows of uneven height (with or
//! without thumbnails) resolve predictably this way.

/// Axis-aligned rectangle in client coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn contains(&self, point: (f64, f64)) -> bool {
        point.0 >= self.left
            && point.0 <= self.left + self.width
            && point.1 >= self.top
            && point.1 <= self.top + self.height
    }

    pub fn from_dom(rect: &web_sys::DomRect) -> Self {
        Self::new(rect.left(), rect.top(), rect.width(), rect.height())
    }
}

/// Key of the candidate whose centre is closest to `point`. Ties keep the
/// earlier candidate.
pub fn closest_center<K, I>(point: (f64, f64), candidates: I) -> Option<K>
where
    I: IntoIterator<Item = (K, Rect)>,
{
    let mut best: Option<(K, f64)> = None;
    for (key, rect) in candidates {
        let (cx, cy) = rect.center();
        let distance = (point.0 - cx).hypot(point.1 - cy);
        match &best {
            Some((_, d)) if *d <= distance => {}
            _ => best = Some((key, distance)),
        }
    }
    best.map(|(key, _)| key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_center_beats_overlap() {
        // Tall row A (0..200), short row B (200..220)
        let rows = vec![
            ("a", Rect::new(0.0, 0.0, 100.0, 200.0)),
            ("b", Rect::new(0.0, 200.0, 100.0, 20.0)),
        ];
        // Pointer still inside A, but much closer to B's centre
        assert_eq!(closest_center((50.0, 190.0), rows.clone()), Some("b"));
        assert_eq!(closest_center((50.0, 90.0), rows), Some("a"));
    }

    #[test]
    fn test_empty_and_ties() {
        let none: Vec<(&str, Rect)> = vec![];
        assert_eq!(closest_center((0.0, 0.0), none), None);

        let rows = vec![
            ("first", Rect::new(0.0, 0.0, 10.0, 10.0)),
            ("second", Rect::new(0.0, 20.0, 10.0, 10.0)),
        ];
        assert_eq!(closest_center((5.0, 15.0), rows), Some("first"));
    }
}
