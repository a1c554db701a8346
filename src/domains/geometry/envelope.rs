//! Axis-aligned bounding envelope.

use serde::{Deserialize, Serialize};

/// Bounding rectangle in the geometry's own coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl Envelope {
    /// Envelope of a single point (degenerate).
    pub fn of_point(x: f64, y: f64) -> Self {
        Self {
            xmin: x,
            ymin: y,
            xmax: x,
            ymax: y,
        }
    }

    /// Envelope over a sequence of `(x, y)` pairs; `None` when empty.
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        points.into_iter().fold(None, |envelope, (x, y)| {
            Some(match envelope {
                None => Self::of_point(x, y),
                Some(e) => e.expand(x, y),
            })
        })
    }

    /// Grow to include `(x, y)`.
    pub fn expand(self, x: f64, y: f64) -> Self {
        Self {
            xmin: self.xmin.min(x),
            ymin: self.ymin.min(y),
            xmax: self.xmax.max(x),
            ymax: self.ymax.max(y),
        }
    }

    /// Midpoint of the envelope as `(x, y)`.
    pub fn center(&self) -> (f64, f64) {
        ((self.xmin + self.xmax) / 2.0, (self.ymin + self.ymax) / 2.0)
    }

    /// Comma-separated `xmin,ymin,xmax,ymax`, the envelope filter syntax.
    pub fn to_query_string(&self) -> String {
        format!("{},{},{},{}", self.xmin, self.ymin, self.xmax, self.ymax)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points_empty() {
        assert!(Envelope::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn test_from_points() {
        let envelope = Envelope::from_points([(1.0, 5.0), (-2.0, 3.0), (4.0, -1.0)]).unwrap();
        assert_eq!(envelope.xmin, -2.0);
        assert_eq!(envelope.ymin, -1.0);
        assert_eq!(envelope.xmax, 4.0);
        assert_eq!(envelope.ymax, 5.0);
    }

    #[test]
    fn test_center() {
        let envelope = Envelope {
            xmin: -90.0,
            ymin: 40.0,
            xmax: -80.0,
            ymax: 44.0,
        };
        assert_eq!(envelope.center(), (-85.0, 42.0));
    }

    #[test]
    fn test_query_string() {
        let envelope = Envelope {
            xmin: -90.41,
            ymin: 41.69,
            xmax: -82.41,
            ymax: 48.31,
        };
        assert_eq!(envelope.to_query_string(), "-90.41,41.69,-82.41,48.31");
        assert_eq!(Envelope::of_point(0.0, 2.0).to_query_string(), "0,2,0,2");
    }
}
