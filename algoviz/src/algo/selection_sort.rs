use rand::Rng;
use tracing::debug;

use crate::config::InputConfig;
use crate::error::InputError;
use crate::random::random_array;
use crate::step::Stepper;

/// Selection sort, one placed element per step.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SelectionSort {
    pub array: Vec<i32>,
    /// `array[..index]` holds the smallest elements in order.
    pub index: usize,
    /// Positions exchanged by the last step, equal when nothing moved.
    pub last_swap: Option<(usize, usize)>,
    pub finished: bool,
}

impl SelectionSort {
    pub fn new(array: Vec<i32>) -> Self {
        Self {
            array,
            index: 0,
            last_swap: None,
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

    /// Position of the smallest value in `array[index..]`, earliest on ties.
    pub fn find_min(&self) -> Option<usize> {
        let tail = self.array.get(self.index..)?;
        let mut best: Option<(usize, i32)> = None;
        for (offset, &v) in tail.iter().enumerate() {
            if best.map_or(true, |(_, min)| v < min) {
                best = Some((self.index + offset, v));
            }
        }
        best.map(|(i, _)| i)
    }
}

impl Stepper for SelectionSort {
    fn step(mut self) -> Self {
        if self.finished {
            return self;
        }
        let Some(min) = self.find_min() else {
            self.finished = true;
            self.last_swap = None;
            return self;
        };

        self.array.swap(self.index, min);
        self.last_swap = Some((self.index, min));
        debug!(index = self.index, min, "selection sort placed element");

        self.index += 1;
        if self.index == self.array.len() {
            self.finished = true;
        }
        self
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}
