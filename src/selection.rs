// Multi-select over entry list positions

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn step(self) -> isize {
        match self {
            Direction::Up => -1,
            Direction::Down => 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    indices: Vec<usize>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    /// Most recently added index
    pub fn last(&self) -> Option<usize> {
        self.indices.last().copied()
    }

    pub fn min(&self) -> Option<usize> {
        self.indices.iter().copied().min()
    }

    pub fn max(&self) -> Option<usize> {
        self.indices.iter().copied().max()
    }

    /// Click semantics: plain click selects exactly `index` (or clears when it
    /// is already the sole selection); multi toggles membership.
    pub fn toggle(&mut self, index: usize, multi: bool) {
        if multi {
            match self.indices.iter().position(|&i| i == index) {
                Some(pos) => {
                    self.indices.remove(pos);
                }
                None => self.indices.push(index),
            }
        } else if self.indices == [index] {
            self.indices.clear();
        } else {
            self.indices = vec![index];
        }
    }

    /// Inclusive range between two positions, in ascending order
    pub fn select_range(&mut self, from: usize, to: usize) {
        self.indices = (from.min(to)..=from.max(to)).collect();
    }

    pub fn select_all(&mut self, len: usize) {
        self.indices = (0..len).collect();
    }

    /// Next anchor for keyboard navigation, clamped to `[0, len)`
    pub fn next_anchor(&self, len: usize, direction: Direction) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let current = self.max().map_or(-1, |i| i as isize);
        let next = (current + direction.step()).clamp(0, len as isize - 1);
        Some(next as usize)
    }

    /// Re-map after the given positions were removed from the list
    pub fn remap_removed(&mut self, removed: &[usize]) {
        self.indices = self
            .indices
            .iter()
            .filter(|&&i| !removed.contains(&i))
            .map(|&i| i - removed.iter().filter(|&&r| r < i).count())
            .collect();
    }

    /// Re-map after the entries at `a` and `b` swapped places
    pub fn remap_swapped(&mut self, a: usize, b: usize) {
        for index in self.indices.iter_mut() {
            if *index == a {
                *index = b;
            } else if *index == b {
                *index = a;
            }
        }
    }
}
