use crate::{Price, TaError};

use std::num::NonZero;

/// Fixed-capacity circular buffer of the most recent observations.
///
/// The buffer starts zero-filled and keeps a running sum that is maintained
/// incrementally on every [`push`](Self::push) (add the new value, subtract
/// the evicted one), so both [`sum`](Self::sum) and [`mean`](Self::mean) are
/// O(1). The running sum may accumulate floating-point rounding over very
/// long runs; it is never recomputed from scratch.
///
/// [`mean`](Self::mean) always divides by the full capacity. Until the
/// buffer has been filled once, the result is the mean of a zero-padded
/// window: check [`is_full`](Self::is_full) before treating it as a faithful
/// windowed mean.
///
/// # Example
///
/// ```
/// use pulse_ta::RollingWindow;
///
/// let mut window = RollingWindow::new(3).unwrap();
///
/// assert_eq!(window.push(3.0), None);
/// assert_eq!(window.mean(), 1.0); // (0 + 0 + 3) / 3
/// assert!(!window.is_full());
///
/// window.push(6.0);
/// window.push(9.0);
/// assert!(window.is_full());
/// assert_eq!(window.mean(), 6.0);
///
/// // Full: the oldest value is evicted and returned.
/// assert_eq!(window.push(12.0), Some(3.0));
/// assert_eq!(window.sum(), 27.0);
/// ```
#[derive(Clone, Debug)]
pub struct RollingWindow {
    buffer: Vec<Price>,
    /// Slot holding the oldest value; the next push overwrites it.
    head: usize,
    len: usize,
    sum: Price,
    capacity_reciprocal: f64,
}

impl RollingWindow {
    /// Creates a zero-filled window holding `capacity` observations.
    ///
    /// # Errors
    ///
    /// [`TaError::Configuration`] when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, TaError> {
        TaError::ensure_positive("capacity", capacity).map(Self::with_capacity)
    }

    /// Infallible constructor for an already validated capacity.
    #[must_use]
    pub fn with_capacity(capacity: NonZero<usize>) -> Self {
        let capacity = capacity.get();

        Self {
            buffer: vec![0.0; capacity],
            head: 0,
            len: 0,
            sum: 0.0,
            #[allow(clippy::cast_precision_loss)]
            capacity_reciprocal: 1.0 / capacity as f64,
        }
    }

    /// Inserts `value`, overwriting the oldest slot.
    ///
    /// Returns the evicted observation once the window has been filled, or
    /// `None` while a zero-padding slot is being replaced.
    #[inline]
    pub fn push(&mut self, value: Price) -> Option<Price> {
        let old = std::mem::replace(&mut self.buffer[self.head], value);

        self.sum -= old;
        self.sum += value;

        self.head += 1;
        if self.head == self.buffer.len() {
            self.head = 0;
        }

        if self.is_full() {
            Some(old)
        } else {
            self.len += 1;
            None
        }
    }

    /// Running sum of the stored values (padding zeros included).
    #[inline]
    #[must_use]
    pub fn sum(&self) -> Price {
        self.sum
    }

    /// `sum() / capacity()`.
    #[inline]
    #[must_use]
    pub fn mean(&self) -> Price {
        self.sum * self.capacity_reciprocal
    }

    /// `true` once `capacity` observations have been pushed since creation
    /// or the last [`reset`](Self::reset).
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len == self.buffer.len()
    }

    /// Number of real observations held, saturating at the capacity.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Iterates the window oldest first, padding zeros included.
    pub fn iter(&self) -> impl Iterator<Item = Price> + '_ {
        let (newer, older) = self.buffer.split_at(self.head);
        older.iter().chain(newer).copied()
    }

    /// Clears every slot and the running sum back to zero.
    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.head = 0;
        self.len = 0;
        self.sum = 0.0;
    }
}
