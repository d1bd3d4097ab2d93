//! Proportional distribution of a rectangle among children.
//!
//! Pure functions, recomputed on every paint.

use crate::geometry::{Orientation, Rect};

/// A child's fraction of the primary axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Share {
    /// Explicit proportion, clamped to `[0, 1]`.
    Explicit(f32),
    /// An equal part of `fraction`, split `count` ways.
    Remaining { fraction: f64, count: usize },
}

impl Share {
    /// The child's extent when the parent extent is `total`.
    pub fn extent_of(self, total: i32) -> i32 {
        let total = f64::from(total);
        let exact = match self {
            Share::Explicit(p) => total * f64::from(p),
            Share::Remaining { fraction, count } => total * fraction / count as f64,
        };
        exact.floor() as i32
    }
}

/// Resolve optional proportions to shares.
///
/// Unspecified entries split whatever the explicit ones leave, never less
/// than nothing.
pub fn shares(proportions: &[Option<f32>]) -> Vec<Share> {
    let explicit: f64 = proportions.iter().flatten().map(|p| f64::from(p.clamp(0.0, 1.0))).sum();
    let count = proportions.iter().filter(|p| p.is_none()).count();
    let fraction = (1.0 - explicit).max(0.0);

    proportions
        .iter()
        .map(|p| match p {
            Some(p) => Share::Explicit(p.clamp(0.0, 1.0)),
            None => Share::Remaining { fraction, count },
        })
        .collect()
}

/// Child rectangles for `area`, in order along `orientation`.
///
/// Each child spans the full cross axis. Offsets accumulate by the floored
/// extent of the previous children. No proportions, no rectangles.
pub fn distribute(area: Rect, orientation: Orientation, proportions: &[Option<f32>]) -> Vec<Rect> {
    let total = area.extent(orientation);
    let mut offset = area.start(orientation);

    shares(proportions)
        .into_iter()
        .map(|share| {
            let extent = share.extent_of(total);
            let rect = match orientation {
                Orientation::Horizontal => Rect::new(offset, area.y, extent, area.height),
                Orientation::Vertical => Rect::new(area.x, offset, area.width, extent),
            };
            offset += extent;
            rect
        })
        .collect()
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn no_children_is_empty() {
        assert!(distribute(Rect::new(0, 0, 100, 100), Orientation::Horizontal, &[]).is_empty());
    }

    #[test]
    fn equal_split_is_floor_of_extent_over_n() {
        for extent in [1, 7, 30, 99, 100, 640, 1001] {
            for n in 1..=12usize {
                for orientation in [Orientation::Horizontal, Orientation::Vertical] {
                    let area = match orientation {
                        Orientation::Horizontal => Rect::new(3, 4, extent, 50),
                        Orientation::Vertical => Rect::new(3, 4, 50, extent),
                    };
                    let rects = distribute(area, orientation, &vec![None; n]);
                    assert_eq!(rects.len(), n);
                    let expected = extent / n as i32;
                    for (i, r) in rects.iter().enumerate() {
                        assert_eq!(r.extent(orientation), expected, "extent={extent} n={n}");
                        assert_eq!(r.start(orientation), area.start(orientation) + i as i32 * expected);
                        if i > 0 && expected > 0 {
                            let prev = rects[i - 1];
                            assert!(r.start(orientation) > prev.start(orientation));
                            assert!(r.start(orientation) >= prev.start(orientation) + prev.extent(orientation));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn cross_axis_is_filled() {
        let rects = distribute(Rect::new(0, 10, 90, 40), Orientation::Horizontal, &[None, None, None]);
        assert_eq!(
            rects,
            vec![Rect::new(0, 10, 30, 40), Rect::new(30, 10, 30, 40), Rect::new(60, 10, 30, 40)]
        );
    }

    #[test]
    fn explicit_and_remaining_mix() {
        let rects = distribute(Rect::new(0, 0, 100, 200), Orientation::Vertical, &[Some(0.5), None, None]);
        assert_eq!(
            rects,
            vec![Rect::new(0, 0, 100, 100), Rect::new(0, 100, 100, 50), Rect::new(0, 150, 100, 50)]
        );
    }

    #[test]
    fn overcommitted_proportions_leave_nothing() {
        let s = shares(&[Some(0.8), Some(0.7), None]);
        assert_eq!(s[2], Share::Remaining { fraction: 0.0, count: 1 });
        let rects = distribute(Rect::new(0, 0, 100, 10), Orientation::Horizontal, &[Some(0.8), Some(0.7), None]);
        assert_eq!(rects[2].width, 0);
    }

    #[test]
    fn proportions_are_clamped() {
        assert_eq!(shares(&[Some(-1.0), Some(2.0)]), vec![Share::Explicit(0.0), Share::Explicit(1.0)]);
    }
}
