//! Automation data delivered by the host alongside each block of audio.
//!
//! For every block the host may send, per parameter, a _queue_ of points. Each
//! point is a normalized value at a sample offset inside the block. The host
//! owns these queues; we only read them through the [`ParameterChanges`] and
//! [`ParamValueQueue`] traits. [`ChangeList`] and [`ParamQueue`] are simple
//! owned implementations for hosts written in Rust and for tests.

use crate::parameters::ParamId;


/// One automation point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    /// Number of sample frames after the beginning of the block.
    pub sample_offset: usize,

    /// The normalized value of the parameter at this point.
    pub value: f64,
}

/// The automation points for a single parameter within one block.
pub trait ParamValueQueue {
    /// The parameter these points belong to.
    fn parameter_id(&self) -> ParamId;

    /// The number of points in the queue.
    fn point_count(&self) -> usize;

    /// Read a point. Returns `None` if the point can't be read.
    fn point(&self, index: usize) -> Option<Point>;

    /// The point with the greatest index, if it can be read.
    ///
    /// Points are not required to be ordered by offset, so this is the last
    /// point _delivered_, not the latest in time.
    fn last_point(&self) -> Option<Point> {
        self.point_count()
            .checked_sub(1)
            .and_then(|index| self.point(index))
    }
}

/// The set of per-parameter queues for one block.
pub trait ParameterChanges {
    /// The number of queues.
    fn parameter_count(&self) -> usize;

    /// Get a queue. Returns `None` if the queue can't be read.
    fn parameter_data(&self, index: usize) -> Option<&dyn ParamValueQueue>;
}

/// An owned [`ParamValueQueue`].
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ParamQueue {
    id: ParamId,
    points: Vec<Point>,
}

impl ParamQueue {
    /// An empty queue for `id`.
    #[must_use]
    pub fn new(id: ParamId) -> Self {
        Self {
            id,
            points: Vec::new(),
        }
    }

    /// Append a point, keeping delivery order.
    #[must_use]
    pub fn with_point(mut self, sample_offset: usize, value: f64) -> Self {
        self.points.push(Point {
            sample_offset,
            value,
        });
        self
    }
}

impl ParamValueQueue for ParamQueue {
    fn parameter_id(&self) -> ParamId {
        self.id
    }

    fn point_count(&self) -> usize {
        self.points.len()
    }

    fn point(&self, index: usize) -> Option<Point> {
        self.points.get(index).copied()
    }
}

/// An owned [`ParameterChanges`].
///
/// # Examples
///
/// ```
/// # use kpp_component::events::{ChangeList, ParamQueue, ParameterChanges};
/// let changes = ChangeList::default()
///     .with_queue(ParamQueue::new(1).with_point(0, 0.25).with_point(10, 0.75));
/// assert_eq!(changes.parameter_count(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ChangeList {
    queues: Vec<ParamQueue>,
}

impl ChangeList {
    /// Append a queue.
    #[must_use]
    pub fn with_queue(mut self, queue: ParamQueue) -> Self {
        self.queues.push(queue);
        self
    }
}

impl ParameterChanges for ChangeList {
    fn parameter_count(&self) -> usize {
        self.queues.len()
    }

    fn parameter_data(&self, index: usize) -> Option<&dyn ParamValueQueue> {
        self.queues.get(index).map(|q| q as &dyn ParamValueQueue)
    }
}
