//! Circular record of the player's vertical pixel position
//!
//! Slot `i` holds the last Y observed while `floor(x) mod len == i`. Slots
//! skipped over by a fast horizontal move are filled with the newest Y, so
//! every slot between two consecutive records is defined.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryBuffer {
    slots: Vec<Option<f32>>,
    /// Most recently written slot
    last_index: usize,
}

impl HistoryBuffer {
    pub fn new(len: usize) -> Self {
        assert!(len > 0, "history buffer needs at least one slot");
        Self {
            slots: vec![None; len],
            last_index: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.last_index
    }

    /// Raw slot contents, `None` where nothing was ever written
    pub fn slots(&self) -> &[Option<f32>] {
        &self.slots
    }

    /// Slot index for a horizontal pixel position (non-negative modulo)
    pub fn index_for(&self, pixel_x: f32) -> usize {
        assert!(pixel_x.is_finite(), "history index from non-finite x {pixel_x}");
        (pixel_x.floor() as i64).rem_euclid(self.slots.len() as i64) as usize
    }

    /// Write `pixel_y` into every slot from the cursor up to the new index,
    /// wrapping through the end of the ring when the index went backwards.
    pub fn record_and_advance(&mut self, pixel_x: f32, pixel_y: f32) {
        assert!(pixel_y.is_finite(), "history record of non-finite y {pixel_y}");
        let new_index = self.index_for(pixel_x);
        let prev_index = self.last_index;

        if prev_index > new_index {
            self.slots[prev_index..].fill(Some(pixel_y));
            self.slots[..=new_index].fill(Some(pixel_y));
        } else {
            self.slots[prev_index..=new_index].fill(Some(pixel_y));
        }

        self.last_index = new_index;
    }

    /// Stored Y for `pixel_x`, or `fallback` if that slot was never written
    pub fn lookup(&self, pixel_x: f32, fallback: f32) -> f32 {
        self.slots[self.index_for(pixel_x)].unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_forward_fill_overwrites_previous_slot() {
        let mut h = HistoryBuffer::new(1000);
        h.record_and_advance(5.0, 1.0);
        assert_eq!(h.slots()[5], Some(1.0));

        h.record_and_advance(7.0, 2.0);
        assert_eq!(h.slots()[5], Some(2.0));
        assert_eq!(h.slots()[6], Some(2.0));
        assert_eq!(h.slots()[7], Some(2.0));
        assert_eq!(h.slots()[8], None);
        assert_eq!(h.last_index(), 7);
    }

    #[test]
    fn test_first_record_fills_from_zero() {
        let mut h = HistoryBuffer::new(20);
        h.record_and_advance(4.7, 3.0);
        for i in 0..=4 {
            assert_eq!(h.slots()[i], Some(3.0));
        }
        assert_eq!(h.slots()[5], None);
    }

    #[test]
    fn test_wraparound_fill() {
        let mut h = HistoryBuffer::new(10);
        h.record_and_advance(8.0, 1.0);
        assert_eq!(h.last_index(), 8);

        h.record_and_advance(12.0, 9.0);
        for i in [8, 9, 0, 1, 2] {
            assert_eq!(h.slots()[i], Some(9.0), "slot {i}");
        }
        // 0..=8 got 1.0 from the first record; 3..8 must keep it
        for i in 3..8 {
            assert_eq!(h.slots()[i], Some(1.0), "slot {i}");
        }
        assert_eq!(h.last_index(), 2);
    }

    #[test]
    fn test_negative_x_uses_positive_modulo() {
        let h = HistoryBuffer::new(10);
        assert_eq!(h.index_for(-1.0), 9);
        assert_eq!(h.index_for(-0.5), 9);
        assert_eq!(h.index_for(-10.0), 0);
        assert_eq!(h.index_for(1234.9), 4);
    }

    #[test]
    fn test_lookup_unwritten_returns_fallback() {
        let mut h = HistoryBuffer::new(100);
        assert_eq!(h.lookup(50.0, 42.0), 42.0);

        h.record_and_advance(10.0, 7.0);
        assert_eq!(h.lookup(10.0, 42.0), 7.0);
        assert_eq!(h.lookup(110.0, 42.0), 7.0);
        assert_eq!(h.lookup(50.0, 42.0), 42.0);
    }

    proptest! {
        #[test]
        fn recorded_span_is_always_defined(
            xs in proptest::collection::vec(0.0f32..5000.0, 1..40),
        ) {
            let mut h = HistoryBuffer::new(97);
            let mut prev = 0usize;
            for &x in &xs {
                h.record_and_advance(x, x);
                let new = h.index_for(x);
                prop_assert_eq!(h.last_index(), new);

                // Every slot walked from prev to new (with wrap) holds the new value
                let mut i = prev;
                loop {
                    prop_assert_eq!(h.slots()[i], Some(x));
                    if i == new {
                        break;
                    }
                    i = (i + 1) % h.len();
                }
                prev = new;
            }
            // Cursor started at 0, so slot 0 has always been written
            prop_assert!(h.slots()[0].is_some());
        }
    }
}
