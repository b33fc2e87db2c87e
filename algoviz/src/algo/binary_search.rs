use std::cmp::Ordering;

use rand::Rng;
use tracing::debug;

use crate::config::InputConfig;
use crate::error::InputError;
use crate::random::{random_sorted_array, random_target};
use crate::step::Stepper;

/// Binary search over a sorted array with an exclusive right bound.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BinarySearch {
    pub array: Vec<i32>,
    pub target: i32,
    pub left: usize,
    pub mid: usize,
    pub right: usize,
    pub finished: bool,
    pub found: bool,
}

impl BinarySearch {
    pub fn new(array: Vec<i32>, target: i32) -> Self {
        let right = array.len();
        Self {
            array,
            target,
            left: 0,
            mid: right / 2,
            right,
            finished: false,
            found: false,
        }
    }

    /// A random sorted array, searched for one of its own elements.
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        config: &InputConfig,
    ) -> Result<Self, InputError> {
        config.validate()?;
        let array = random_sorted_array(rng, config);
        let target = random_target(rng, &array).unwrap_or_default();
        Ok(Self::new(array, target))
    }
}

impl Stepper for BinarySearch {
    fn step(mut self) -> Self {
        if self.finished {
            return self;
        }
        if self.left == self.right {
            self.finished = true;
            return self;
        }

        match self.array[self.mid].cmp(&self.target) {
            Ordering::Less => {
                if self.left == self.mid {
                    self.finished = true;
                }
                self.left = self.mid;
            }
            Ordering::Greater => {
                if self.right == self.mid {
                    self.finished = true;
                }
                self.right = self.mid;
            }
            Ordering::Equal => {
                self.finished = true;
                self.found = true;
            }
        }
        self.mid = (self.left + self.right) / 2;

        debug!(
            left = self.left,
            mid = self.mid,
            right = self.right,
            found = self.found,
            "binary search step"
        );
        self
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}
