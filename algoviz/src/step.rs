/// One algorithm advanced by discrete units of work.
///
/// `step` consumes the current state and returns its successor; progress
/// structures (queues, heaps, forests) move into the new state instead of
/// being copied. A finished state steps to itself unchanged.
pub trait Stepper: Sized {
    fn step(self) -> Self;

    fn is_finished(&self) -> bool;

    /// Step until finished.
    fn run_to_end(mut self) -> Self {
        while !self.is_finished() {
            self = self.step();
        }
        self
    }

    /// Iterate over successive snapshots, starting with the state after the
    /// first step and ending with the first finished state.
    fn steps(self) -> Steps<Self>
    where
        Self: Clone,
    {
        Steps { next: Some(self) }
    }
}

/// Iterator returned by [`Stepper::steps`].
#[derive(Debug, Clone)]
pub struct Steps<S> {
    next: Option<S>,
}

impl<S: Stepper + Clone> Iterator for Steps<S> {
    type Item = S;

    fn next(&mut self) -> Option<S> {
        let current = self.next.take()?;
        if current.is_finished() {
            return None;
        }
        let stepped = current.step();
        if !stepped.is_finished() {
            self.next = Some(stepped.clone());
        }
        Some(stepped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Countdown(u32);

    impl Stepper for Countdown {
        fn step(self) -> Self {
            Countdown(self.0.saturating_sub(1))
        }

        fn is_finished(&self) -> bool {
            self.0 == 0
        }
    }

    #[test]
    fn run_to_end_stops_when_finished() {
        assert_eq!(Countdown(3).run_to_end(), Countdown(0));
    }

    #[test]
    fn steps_yields_through_terminal_state() {
        let seen: Vec<_> = Countdown(3).steps().collect();
        assert_eq!(seen, vec![Countdown(2), Countdown(1), Countdown(0)]);
    }

    #[test]
    fn steps_on_finished_state_is_empty() {
        assert_eq!(Countdown(0).steps().count(), 0);
    }
}
