//! Integer ranges.

/// `start`, `start + step`, ... up to but excluding `stop`.
///
/// `a...b` is stored as the half-open `a..b+1`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RangeValue {
    pub start: i64,
    pub stop: i64,
    pub step: i64,
}

impl RangeValue {
    /// A range with a step of one.
    pub const fn new(start: i64, stop: i64) -> Self {
        RangeValue {
            start,
            stop,
            step: 1,
        }
    }

    /// `step` must not be zero; callers validate it.
    pub const fn with_step(start: i64, stop: i64, step: i64) -> Self {
        RangeValue { start, stop, step }
    }

    pub fn len(&self) -> usize {
        let (start, stop, step) = (
            i128::from(self.start),
            i128::from(self.stop),
            i128::from(self.step),
        );
        let n = if step > 0 && start < stop {
            (stop - start + step - 1) / step
        } else if step < 0 && start > stop {
            (start - stop - step - 1) / -step
        } else {
            0
        };
        usize::try_from(n).unwrap_or(usize::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at `index`, which must be below `len()`.
    pub fn get(&self, index: usize) -> Option<i64> {
        if index >= self.len() {
            return None;
        }
        let offset = i128::from(self.step) * index as i128;
        i64::try_from(i128::from(self.start) + offset).ok()
    }

    pub fn contains(&self, n: i64) -> bool {
        let (n, start, stop, step) = (
            i128::from(n),
            i128::from(self.start),
            i128::from(self.stop),
            i128::from(self.step),
        );
        let in_bounds = if step > 0 {
            start <= n && n < stop
        } else {
            stop < n && n <= start
        };
        in_bounds && (n - start) % step == 0
    }

    /// Two ranges yielding the same elements are equal (`0..0 == 5..5`).
    pub fn same_elements(&self, other: &RangeValue) -> bool {
        let len = self.len();
        len == other.len()
            && (len == 0 || (self.start == other.start && (len == 1 || self.step == other.step)))
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        (0..self.len()).map_while(|i| self.get(i))
    }
}
