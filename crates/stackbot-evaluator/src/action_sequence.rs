use std::collections::{VecDeque, vec_deque};

use stackbot_core::Command;

/// Commands queued by the planner, one of which is emitted per tick.
///
/// Drained strictly first-in first-out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionSequence {
    actions: VecDeque<Command>,
}

impl ActionSequence {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn pop_front(&mut self) -> Option<Command> {
        self.actions.pop_front()
    }

    pub fn clear(&mut self) {
        self.actions.clear();
    }

    pub fn iter(&self) -> vec_deque::Iter<'_, Command> {
        self.actions.iter()
    }
}

impl Extend<Command> for ActionSequence {
    fn extend<T: IntoIterator<Item = Command>>(&mut self, iter: T) {
        self.actions.extend(iter);
    }
}

impl FromIterator<Command> for ActionSequence {
    fn from_iter<T: IntoIterator<Item = Command>>(iter: T) -> Self {
        Self {
            actions: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ActionSequence {
    type Item = &'a Command;
    type IntoIter = vec_deque::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
