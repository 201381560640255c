//! Behavioural tests for fetching and grouping reaches by river.

use std::cell::RefCell;

use reachmap_core::test_support::{StubReachSource, sample_reach};
use reachmap_core::{Reach, ReachPage, RiverGroup, State, fetch_reaches, group_reaches};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[derive(Debug, Default)]
struct GroupingWorld {
    reaches: RefCell<Vec<Reach>>,
    source: RefCell<Option<StubReachSource>>,
    groups: RefCell<Vec<RiverGroup>>,
}

impl GroupingWorld {
    fn group(&self, river: &str) -> RiverGroup {
        self.groups
            .borrow()
            .iter()
            .find(|group| group.river == river)
            .cloned()
            .unwrap_or_else(|| panic!("expected a group for {river}"))
    }
}

#[fixture]
fn grouping_world() -> GroupingWorld {
    GroupingWorld::default()
}

fn klamath(id: &str, keys: &[&str]) -> Reach {
    let reach = Reach {
        states: Vec::new(),
        ..sample_reach(id, "Klamath")
    };
    keys.iter()
        .fold(reach, |reach, key| reach.with_state(State::new(*key, *key)))
}

#[given("Klamath reaches in CA and in CA and OR")]
fn klamath_reaches(#[from(grouping_world)] world: &GroupingWorld) {
    let mut reaches = world.reaches.borrow_mut();
    reaches.push(klamath("10", &["CA"]));
    reaches.push(klamath("11", &["CA", "OR"]));
}

#[given("a Rogue reach in OR")]
fn rogue_reach(#[from(grouping_world)] world: &GroupingWorld) {
    world.reaches.borrow_mut().insert(0, sample_reach("20", "Rogue"));
}

#[given("a source page with one reach lacking geometry")]
fn page_with_missing_geometry(#[from(grouping_world)] world: &GroupingWorld) {
    let source = StubReachSource::with_pages(vec![ReachPage {
        reaches: vec![
            sample_reach("30", "Owyhee"),
            sample_reach("31", "Owyhee").with_geometry(""),
        ],
        has_more_pages: false,
    }]);
    world.source.replace(Some(source));
}

#[when("I group the reaches")]
fn group(#[from(grouping_world)] world: &GroupingWorld) {
    let reaches = world.reaches.borrow().clone();
    world.groups.replace(group_reaches(reaches));
}

#[when("I fetch and group the reaches")]
fn fetch_and_group(#[from(grouping_world)] world: &GroupingWorld) {
    let source = world.source.borrow();
    let source = source.as_ref().expect("source must be initialised");
    let reaches: Vec<Reach> = fetch_reaches(source)
        .collect::<Result<_, _>>()
        .expect("stub pages should load");
    world.groups.replace(group_reaches(reaches));
}

#[then("the Klamath group holds both Klamath reaches")]
fn klamath_holds_both(#[from(grouping_world)] world: &GroupingWorld) {
    let group = world.group("Klamath");
    let ids: Vec<&str> = group.reaches.iter().map(|reach| reach.id.as_str()).collect();
    assert_eq!(ids, vec!["10", "11"]);
    assert!(group.reaches.iter().all(|reach| reach.river == "Klamath"));
}

#[then("the Klamath group covers CA and OR")]
fn klamath_states(#[from(grouping_world)] world: &GroupingWorld) {
    let group = world.group("Klamath");
    let states: Vec<&str> = group.states.iter().map(String::as_str).collect();
    assert_eq!(states, vec!["CA", "OR"]);
}

#[then("the groups are in ascending river order")]
fn ascending_order(#[from(grouping_world)] world: &GroupingWorld) {
    let groups = world.groups.borrow();
    let rivers: Vec<&str> = groups.iter().map(|group| group.river.as_str()).collect();
    assert_eq!(rivers, vec!["Klamath", "Rogue"]);
}

#[then("no group contains the reach lacking geometry")]
fn geometry_filtered(#[from(grouping_world)] world: &GroupingWorld) {
    let groups = world.groups.borrow();
    let ids: Vec<&str> = groups
        .iter()
        .flat_map(|group| group.reaches.iter())
        .map(|reach| reach.id.as_str())
        .collect();
    assert_eq!(ids, vec!["30"]);
}

#[scenario(
    path = "tests/features/grouping.feature",
    name = "reaches sharing a river share a group"
)]
fn reaches_share_group(#[from(grouping_world)] world: GroupingWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/grouping.feature",
    name = "reaches without geometry are never grouped"
)]
fn geometry_never_grouped(#[from(grouping_world)] world: GroupingWorld) {
    let _ = world;
}
