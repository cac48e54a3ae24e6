use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

pub type VelocityMap = HashMap<String, VelocityEntry>;
pub type SortedVelocity = Vec<(String, VelocityEntry)>;

#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
pub enum State {
    Open,
    Closed,
}

impl State {
    pub const ALL: [State; 2] = [State::Open, State::Closed];

    pub fn as_str(&self) -> &'static str {
        match self {
            State::Open => "open",
            State::Closed => "closed",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
pub enum Point {
    One,
    Three,
    Five,
}

impl Point {
    pub const ALL: [Point; 3] = [Point::One, Point::Three, Point::Five];

    pub fn value(&self) -> u64 {
        match self {
            Point::One => 1,
            Point::Three => 3,
            Point::Five => 5,
        }
    }

    pub fn label(&self) -> String {
        format!("Point-{}", self.value())
    }
}

/// Point totals of one milestone. `sum` always equals `open + closed`.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize)]
pub struct VelocityEntry {
    pub open: u64,
    pub closed: u64,
    pub sum: u64,
}

impl VelocityEntry {
    pub fn new(open: u64, closed: u64) -> Self {
        Self {
            open,
            closed,
            sum: open + closed,
        }
    }

    pub fn add(&mut self, state: State, point: u64) {
        match state {
            State::Open => self.open += point,
            State::Closed => self.closed += point,
        }
        self.sum += point;
    }

    pub fn merge(&mut self, other: &VelocityEntry) {
        self.open += other.open;
        self.closed += other.closed;
        self.sum += other.sum;
    }
}

pub trait VelocityMerge {
    fn merge(&mut self, other: VelocityMap);
}

impl VelocityMerge for VelocityMap {
    fn merge(&mut self, other: VelocityMap) {
        for (title, entry) in other {
            self.entry(title)
                .and_modify(|current| current.merge(&entry))
                .or_insert(entry);
        }
    }
}

/// Folds every map into the first one. `None` when there is nothing to fold.
pub fn merge_all(maps: impl IntoIterator<Item = VelocityMap>) -> Option<VelocityMap> {
    maps.into_iter().reduce(|mut acc, velocity| {
        acc.merge(velocity);
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn velocity(entries: &[(&str, u64, u64)]) -> VelocityMap {
        entries
            .iter()
            .map(|(title, open, closed)| (title.to_string(), VelocityEntry::new(*open, *closed)))
            .collect()
    }

    #[test]
    fn add_keeps_sum_in_step() {
        let mut entry = VelocityEntry::default();
        entry.add(State::Open, 3);
        entry.add(State::Closed, 5);
        entry.add(State::Closed, 1);

        assert_eq!(entry, VelocityEntry { open: 3, closed: 6, sum: 9 });
    }

    #[test]
    fn point_labels() {
        let labels = Point::ALL.iter().map(Point::label).collect::<Vec<_>>();
        assert_eq!(labels, vec!["Point-1", "Point-3", "Point-5"]);
    }

    #[test]
    fn merge_adds_matching_and_inserts_missing() {
        let mut first = velocity(&[("M1", 1, 2)]);
        first.merge(velocity(&[("M1", 0, 1), ("M2", 5, 0)]));

        assert_eq!(first, velocity(&[("M1", 1, 3), ("M2", 5, 0)]));
        assert_eq!(first["M1"].sum, 4);
        assert_eq!(first["M2"].sum, 5);
    }

    #[test]
    fn merge_with_empty_is_identity() {
        let original = velocity(&[("M1", 1, 2), ("M2", 0, 0)]);

        let mut left = original.clone();
        left.merge(VelocityMap::new());
        assert_eq!(left, original);

        let mut right = VelocityMap::new();
        right.merge(original.clone());
        assert_eq!(right, original);
    }

    #[test]
    fn merge_disjoint_is_union() {
        let mut first = velocity(&[("A", 1, 1)]);
        first.merge(velocity(&[("B", 2, 3)]));

        assert_eq!(first.len(), 2);
        assert_eq!(first["A"], VelocityEntry::new(1, 1));
        assert_eq!(first["B"], VelocityEntry::new(2, 3));
    }

    #[test]
    fn merge_is_commutative_and_associative() {
        let a = velocity(&[("M1", 1, 2), ("M2", 3, 0)]);
        let b = velocity(&[("M1", 4, 1), ("M3", 0, 5)]);
        let c = velocity(&[("M2", 1, 1), ("M3", 2, 2)]);

        let mut ab = a.clone();
        ab.merge(b.clone());
        let mut ba = b.clone();
        ba.merge(a.clone());
        assert_eq!(ab, ba);

        let mut ab_c = ab.clone();
        ab_c.merge(c.clone());
        let mut bc = b.clone();
        bc.merge(c.clone());
        let mut a_bc = a.clone();
        a_bc.merge(bc);
        assert_eq!(ab_c, a_bc);

        for entry in ab_c.values() {
            assert_eq!(entry.sum, entry.open + entry.closed);
        }
    }

    #[test]
    fn merge_all_seeds_with_first() {
        let merged = merge_all(vec![
            velocity(&[("M1", 1, 0)]),
            velocity(&[("M1", 0, 3)]),
            velocity(&[("M2", 5, 5)]),
        ])
        .unwrap();

        assert_eq!(merged, velocity(&[("M1", 1, 3), ("M2", 5, 5)]));
        assert!(merge_all(Vec::new()).is_none());
    }
}
