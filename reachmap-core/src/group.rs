//! Group fetched reaches by river.
//!
//! Reaches are sorted by river name using ordinal string ordering and then
//! split into runs of equal names. The sort is stable, so each group keeps
//! the fetch order of its reaches.

use std::collections::BTreeSet;

use crate::reach::Reach;

/// Reaches sharing a river name, plus every jurisdiction they touch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiverGroup {
    /// Shared river name.
    pub river: String,
    /// Member reaches in fetch order.
    pub reaches: Vec<Reach>,
    /// Union of the members' non-empty jurisdiction keys.
    pub states: BTreeSet<String>,
}

impl RiverGroup {
    /// Create an empty group for `river`.
    pub fn new(river: impl Into<String>) -> Self {
        Self {
            river: river.into(),
            reaches: Vec::new(),
            states: BTreeSet::new(),
        }
    }

    /// Add a reach and merge its jurisdiction keys into the group.
    pub fn push(&mut self, reach: Reach) {
        self.states.extend(reach.shard_keys().map(str::to_owned));
        self.reaches.push(reach);
    }
}

/// Materialise `reaches`, sort them by river, and group consecutive runs.
///
/// # Examples
/// ```
/// use reachmap_core::{Reach, State, group_reaches};
///
/// let groups = group_reaches(vec![
///     Reach::new("2", "Salmon", "Main").with_state(State::new("ID", "Idaho")),
///     Reach::new("1", "Rogue", "Wild").with_state(State::new("OR", "Oregon")),
///     Reach::new("3", "Rogue", "Upper").with_state(State::new("OR", "Oregon")),
/// ]);
/// let rivers: Vec<&str> = groups.iter().map(|g| g.river.as_str()).collect();
/// assert_eq!(rivers, vec!["Rogue", "Salmon"]);
/// assert_eq!(groups[0].reaches.len(), 2);
/// ```
pub fn group_reaches<I>(reaches: I) -> Vec<RiverGroup>
where
    I: IntoIterator<Item = Reach>,
{
    let mut sorted: Vec<Reach> = reaches.into_iter().collect();
    sorted.sort_by(|left, right| left.river.cmp(&right.river));

    let mut groups: Vec<RiverGroup> = Vec::new();
    for reach in sorted {
        match groups.last_mut() {
            Some(group) if group.river == reach.river => group.push(reach),
            _ => {
                let mut group = RiverGroup::new(reach.river.clone());
                group.push(reach);
                groups.push(group);
            }
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reach::State;
    use rstest::rstest;

    fn reach(id: &str, river: &str, keys: &[&str]) -> Reach {
        keys.iter().fold(Reach::new(id, river, id), |reach, key| {
            reach.with_state(State::new(*key, *key))
        })
    }

    fn ids(group: &RiverGroup) -> Vec<&str> {
        group.reaches.iter().map(|reach| reach.id.as_str()).collect()
    }

    #[rstest]
    fn groups_are_sorted_by_river() {
        let groups = group_reaches(vec![
            reach("1", "Yough", &["PA"]),
            reach("2", "Gauley", &["WV"]),
            reach("3", "New", &["WV"]),
        ]);
        let rivers: Vec<&str> = groups.iter().map(|group| group.river.as_str()).collect();
        assert_eq!(rivers, vec!["Gauley", "New", "Yough"]);
    }

    #[rstest]
    fn groups_keep_fetch_order_within_a_river() {
        let groups = group_reaches(vec![
            reach("9", "Gauley", &[]),
            reach("1", "Arkansas", &[]),
            reach("4", "Gauley", &[]),
            reach("2", "Gauley", &[]),
        ]);
        let gauley = groups.last().expect("gauley group");
        assert_eq!(ids(gauley), vec!["9", "4", "2"]);
    }

    #[rstest]
    fn ordering_is_ordinal() {
        let groups = group_reaches(vec![
            reach("1", "american", &[]),
            reach("2", "Zambezi", &[]),
            reach("3", "Arkansas", &[]),
        ]);
        let rivers: Vec<&str> = groups.iter().map(|group| group.river.as_str()).collect();
        assert_eq!(rivers, vec!["Arkansas", "Zambezi", "american"]);
    }

    #[rstest]
    fn states_are_unioned_across_members() {
        let groups = group_reaches(vec![
            reach("1", "Klamath", &["CA"]),
            reach("2", "Klamath", &["CA", "OR"]),
        ]);
        let klamath = groups.first().expect("klamath group");
        assert_eq!(
            klamath.states.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["CA", "OR"]
        );
        assert_eq!(klamath.reaches.len(), 2);
    }

    #[rstest]
    fn empty_and_missing_keys_are_excluded() {
        let groups = group_reaches(vec![
            reach("1", "Chattooga", &["", "GA"]).with_state(State::default()),
        ]);
        let group = groups.first().expect("one group");
        assert_eq!(group.states.len(), 1);
        assert!(group.states.contains("GA"));
    }

    #[rstest]
    fn empty_input_yields_no_groups() {
        assert!(group_reaches(Vec::new()).is_empty());
    }
}
