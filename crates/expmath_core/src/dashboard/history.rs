use std::collections::VecDeque;

/// Bounded first-in first-out store of earlier widget states.
#[derive(Debug, Clone)]
pub struct History<T> {
    slots: VecDeque<T>,
    capacity: usize,
}

impl<T> History<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn seeded(capacity: usize, initial: T) -> Self {
        let mut history = Self::new(capacity);
        history.push(initial);
        history
    }

    /// Stores `value`, evicting the oldest entry when full.
    pub fn push(&mut self, value: T) -> Option<T> {
        let evicted = if self.slots.len() == self.capacity {
            self.slots.pop_front()
        } else {
            None
        };
        self.slots.push_back(value);
        evicted
    }

    pub fn pop(&mut self) -> Option<T> {
        self.slots.pop_front()
    }

    /// Pushes `current` and hands back the oldest stored state.
    ///
    /// With a two-slot store seeded with one state this swaps between
    /// the two most recent states on every call.
    pub fn exchange(&mut self, current: T) -> Option<T> {
        match self.push(current) {
            Some(evicted) => Some(evicted),
            None => self.pop(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exchange_alternates_between_two_states() {
        let mut history = History::seeded(2, "g");
        assert_eq!(history.exchange("f"), Some("g"));
        assert_eq!(history.exchange("g'"), Some("f"));
        assert_eq!(history.exchange("f'"), Some("g'"));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn push_evicts_oldest_when_full() {
        let mut history = History::new(2);
        assert_eq!(history.push(1), None);
        assert_eq!(history.push(2), None);
        assert_eq!(history.push(3), Some(1));
        assert_eq!(history.pop(), Some(2));
    }
}
