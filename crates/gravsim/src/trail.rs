//! Bounded motion trail
//!
//! A trail records the most recent positions of a particle so a renderer can
//! draw a fading path behind it. Trails never feed back into the physics.

use std::collections::VecDeque;

use nalgebra::Point2;

/// Default number of positions kept per particle
pub const DEFAULT_TRAIL_CAPACITY: usize = 100;

/// Fixed-capacity FIFO of past positions, oldest first
///
/// # Examples
///
/// ```
/// use gravsim::trail::Trail;
/// use nalgebra::Point2;
///
/// let mut trail = Trail::with_capacity(2);
/// trail.push(Point2::new(0.0, 0.0));
/// trail.push(Point2::new(1.0, 0.0));
/// trail.push(Point2::new(2.0, 0.0));
///
/// assert_eq!(trail.len(), 2);
/// assert_eq!(trail.oldest(), Some(Point2::new(1.0, 0.0)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    points: VecDeque<Point2<f64>>,
    capacity: usize,
}

/// One drawable piece of a trail
///
/// `alpha` ramps linearly with recency: the newest segment is close to
/// opaque (255), the oldest close to transparent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailSegment {
    pub start: Point2<f64>,
    pub end: Point2<f64>,
    pub alpha: u8,
}

impl Trail {
    /// Creates an empty trail holding at most `capacity` points
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity.min(DEFAULT_TRAIL_CAPACITY)),
            capacity,
        }
    }

    /// Appends a point, evicting the oldest one once the capacity is exceeded
    pub fn push(&mut self, point: Point2<f64>) {
        self.points.push_back(point);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn oldest(&self) -> Option<Point2<f64>> {
        self.points.front().copied()
    }

    pub fn newest(&self) -> Option<Point2<f64>> {
        self.points.back().copied()
    }

    /// Iterates positions from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &Point2<f64>> {
        self.points.iter()
    }

    /// Line segments between consecutive points with a linear alpha ramp
    ///
    /// Segment `i` (1-based, ending at point `i`) gets `alpha = 255 * i / len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use gravsim::trail::Trail;
    /// use nalgebra::Point2;
    ///
    /// let mut trail = Trail::with_capacity(10);
    /// for x in 0..4 {
    ///     trail.push(Point2::new(x as f64, 0.0));
    /// }
    ///
    /// let alphas: Vec<u8> = trail.segments().map(|s| s.alpha).collect();
    /// assert_eq!(alphas, vec![63, 127, 191]);
    /// ```
    pub fn segments(&self) -> impl Iterator<Item = TrailSegment> + '_ {
        let len = self.points.len();
        self.points
            .iter()
            .zip(self.points.iter().skip(1))
            .enumerate()
            .map(move |(k, (start, end))| {
                let i = k + 1;
                TrailSegment {
                    start: *start,
                    end: *end,
                    alpha: (255 * i / len) as u8,
                }
            })
    }
}

impl Default for Trail {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_TRAIL_CAPACITY)
    }
}
