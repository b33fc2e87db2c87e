use rand::Rng;
use tracing::debug;

use crate::config::InputConfig;
use crate::error::InputError;
use crate::random::random_array;
use crate::step::Stepper;

/// Insertion sort as alternating compare and shift micro-steps.
///
/// `array[..sorted_up_to_index]` is sorted. The element at `gap_index` is
/// the one being walked left; while `is_picked_up` every step shifts it one
/// position or puts it down.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InsertionSort {
    pub array: Vec<i32>,
    pub sorted_up_to_index: usize,
    pub gap_index: usize,
    pub is_picked_up: bool,
    /// `is_picked_up` before the last step.
    pub was_picked_up: bool,
    /// `gap_index` before the last step.
    pub prev_gap_index: usize,
    pub finished: bool,
}

impl InsertionSort {
    pub fn new(array: Vec<i32>) -> Self {
        Self {
            array,
            sorted_up_to_index: 0,
            gap_index: 0,
            is_picked_up: false,
            was_picked_up: false,
            prev_gap_index: 0,
            finished: false,
        }
    }

    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        config: &InputConfig,
    ) -> Result<Self, InputError> {
        config.validate()?;
        Ok(Self::new(random_array(rng, config)))
    }

    fn in_place(&self) -> bool {
        self.gap_index == 0 || self.array[self.gap_index] >= self.array[self.gap_index - 1]
    }
}

impl Stepper for InsertionSort {
    fn step(mut self) -> Self {
        if self.finished {
            return self;
        }
        self.prev_gap_index = self.gap_index;
        self.was_picked_up = self.is_picked_up;

        if self.sorted_up_to_index >= self.array.len() {
            self.finished = true;
            return self;
        }

        if !self.is_picked_up {
            if self.in_place() {
                self.sorted_up_to_index += 1;
                self.gap_index = self.sorted_up_to_index;
                if self.sorted_up_to_index >= self.array.len() {
                    self.finished = true;
                }
                debug!(sorted = self.sorted_up_to_index, "insertion sort advanced boundary");
            } else {
                self.is_picked_up = true;
                debug!(gap = self.gap_index, "insertion sort picked up element");
            }
        } else if self.in_place() {
            self.is_picked_up = false;
            debug!(gap = self.gap_index, "insertion sort put element down");
        } else {
            self.array.swap(self.gap_index, self.gap_index - 1);
            self.gap_index -= 1;
            debug!(gap = self.gap_index, "insertion sort shifted element");
        }
        self
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}
