use navmap::{Error, TreeMap, View};
use quickcheck::{Arbitrary, Gen, TestResult};
use quickcheck_macros::quickcheck;
use std::collections::BTreeMap;

fn init() { let _ = env_logger::builder().is_test(true).try_init(); }

/// A key window with its edges in ascending order, walked in either direction.
#[derive(Clone, Debug)]
struct Window {
    lo: u8,
    lo_inclusive: bool,
    hi: u8,
    hi_inclusive: bool,
    descending: bool,
}

impl Arbitrary for Window {
    fn arbitrary(gen: &mut Gen) -> Self {
        let (a, b) = (u8::arbitrary(gen), u8::arbitrary(gen));

        Window {
            lo: a.min(b),
            lo_inclusive: bool::arbitrary(gen),
            hi: a.max(b),
            hi_inclusive: bool::arbitrary(gen),
            descending: bool::arbitrary(gen),
        }
    }
}

impl Window {
    fn admits(&self, key: u8) -> bool {
        (if self.lo_inclusive { key >= self.lo } else { key > self.lo }) &&
        (if self.hi_inclusive { key <= self.hi } else { key < self.hi })
    }

    /// Checks if `a` comes strictly before `b` in this window's walk.
    fn before(&self, a: u8, b: u8) -> bool { if self.descending { a > b } else { a < b } }

    /// The model's keys inside the window, in walk order.
    fn keys(&self, model: &BTreeMap<u8, u8>) -> Vec<u8> {
        let mut keys: Vec<u8> = model.keys().cloned().filter(|&k| self.admits(k)).collect();
        if self.descending { keys.reverse(); }
        keys
    }

    fn open<'a>(&self, map: &'a TreeMap<u8, u8>) -> View<'a, u8, u8> {
        let view = map.range(self.lo, self.lo_inclusive, self.hi, self.hi_inclusive).unwrap();
        if self.descending { view.reversed() } else { view }
    }
}

fn build(entries: Vec<(u8, u8)>) -> (TreeMap<u8, u8>, BTreeMap<u8, u8>) {
    let map = TreeMap::new();
    let mut model = BTreeMap::new();

    for (key, value) in entries {
        assert_eq!(map.put(key, value), Ok(model.insert(key, value)));
    }

    (map, model)
}

fn keys(view: &View<u8, u8>) -> Vec<u8> { view.keys().collect::<Result<_, _>>().unwrap() }

#[quickcheck]
fn view_walks_admissible_keys_in_order(entries: Vec<(u8, u8)>, window: Window) -> bool {
    init();
    let (map, model) = build(entries);
    let view = window.open(&map);
    let expected = window.keys(&model);

    keys(&view) == expected &&
    view.size() == expected.len() &&
    view.entries().count() == view.size() &&
    view.is_empty() == expected.is_empty()
}

#[quickcheck]
fn double_reversal_is_identity(entries: Vec<(u8, u8)>, window: Window) -> bool {
    let (map, _) = build(entries);
    let view = window.open(&map);
    let twice = view.reversed().reversed();

    twice.direction() == view.direction() &&
    twice.entries().collect::<Vec<_>>() == view.entries().collect::<Vec<_>>()
}

#[quickcheck]
fn reversal_reverses_the_walk(entries: Vec<(u8, u8)>, window: Window) -> bool {
    let (map, _) = build(entries);
    let view = window.open(&map);
    let mut forward = keys(&view);
    forward.reverse();
    keys(&view.reversed()) == forward
}

#[quickcheck]
fn nested_ranges_stay_inside_their_parent(entries: Vec<(u8, u8)>, outer: Window, inner: Window)
    -> TestResult {

    init();
    let (map, model) = build(entries);
    let parent = outer.open(&map);

    // edges are requested in the parent's walk order
    let requested = if outer.descending {
        parent.range(inner.hi, inner.hi_inclusive, inner.lo, inner.lo_inclusive)
    } else {
        parent.range(inner.lo, inner.lo_inclusive, inner.hi, inner.hi_inclusive)
    };

    let valid_edge = |key: u8, inclusive: bool| {
        if inclusive { outer.admits(key) } else { key >= outer.lo && key <= outer.hi }
    };

    let expected_ok = valid_edge(inner.lo, inner.lo_inclusive) &&
                      valid_edge(inner.hi, inner.hi_inclusive);

    match requested {
        Err(error) => TestResult::from_bool(!expected_ok && error == Error::OutOfRange),
        Ok(child) => {
            let expected: Vec<u8> = outer.keys(&model).into_iter()
                .filter(|&k| inner.admits(k))
                .collect();

            TestResult::from_bool(
                expected_ok &&
                child.direction() == parent.direction() &&
                keys(&child) == expected &&
                expected.iter().all(|k| child.bound().contains(k, map.cmp()) &&
                                        parent.bound().contains(k, map.cmp()))
            )
        }
    }
}

#[quickcheck]
fn navigation_follows_the_walk(entries: Vec<(u8, u8)>, window: Window, probe: u8) -> bool {
    let (map, model) = build(entries);
    let view = window.open(&map);
    let keys = window.keys(&model);

    let ceiling = keys.iter().cloned().find(|&k| !window.before(k, probe));
    let higher = keys.iter().cloned().find(|&k| window.before(probe, k));
    let floor = keys.iter().rev().cloned().find(|&k| !window.before(probe, k));
    let lower = keys.iter().rev().cloned().find(|&k| window.before(k, probe));

    view.ceiling_key(&probe) == ceiling &&
    view.higher_key(&probe) == higher &&
    view.floor_key(&probe) == floor &&
    view.lower_key(&probe) == lower &&
    view.ceiling(&probe).map(|e| e.0) == ceiling &&
    view.first_key().ok() == keys.first().cloned() &&
    view.last_key().ok() == keys.last().cloned()
}

#[quickcheck]
fn writes_through_a_view_are_shared(entries: Vec<(u8, u8)>, window: Window, key: u8, value: u8)
    -> bool {

    init();
    let (map, mut model) = build(entries);
    let view = window.open(&map);
    let whole = map.reversed();

    if !window.admits(key) {
        return view.put(key, value) == Err(Error::OutOfRange) &&
               view.remove(&key) == Err(Error::OutOfRange) &&
               map.get(&key) == model.get(&key).cloned() &&
               map.size() == model.len();
    }

    view.put(key, value) == Ok(model.insert(key, value)) &&
    map.get(&key) == Some(value) &&
    whole.get(&key) == Some(value) &&
    view.contains_key(&key) &&
    view.remove(&key) == Ok(Some(value)) &&
    view.remove(&key) == Ok(None) &&
    !map.contains_key(&key) &&
    !whole.contains_key(&key) &&
    map.size() == model.len() - 1
}

#[quickcheck]
fn polls_take_the_walk_extremes(entries: Vec<(u8, u8)>, window: Window) -> bool {
    let (map, model) = build(entries);
    let view = window.open(&map);
    let keys = window.keys(&model);

    let first = view.poll_first().map(|e| e.0);
    let last = view.poll_last().map(|e| e.0);

    match keys.len() {
        0 => first.is_none() && last.is_none(),
        1 => first == keys.first().cloned() && last.is_none(),
        n => first == Some(keys[0]) && last == Some(keys[n - 1]) && map.size() == model.len() - 2,
    }
}

#[quickcheck]
fn cursors_fail_fast_on_foreign_inserts(entries: Vec<(u8, u8)>, key: u8) -> TestResult {
    init();
    let (map, model) = build(entries);
    if model.is_empty() { return TestResult::discard(); }

    let mut cursor = map.entries();
    map.put(key, 0).unwrap();

    // a cursor left behind by a change of shape has nothing to offer
    if cursor.has_next() != model.contains_key(&key) { return TestResult::failed(); }
    let result = cursor.next_entry();

    if model.contains_key(&key) {
        // value replacement is not a change of shape
        TestResult::from_bool(result.is_ok())
    } else {
        TestResult::from_bool(result == Err(Error::ConcurrentModification) &&
                              cursor.next().is_none())
    }
}

#[quickcheck]
fn remove_current_drains_a_view(entries: Vec<(u8, u8)>, window: Window) -> bool {
    let (map, model) = build(entries);
    let view = window.open(&map);
    let mut removed = vec![];
    let mut cursor = view.keys();

    while let Some(key) = cursor.next() {
        removed.push(key.unwrap());
        cursor.remove_current().unwrap();
    }

    removed == window.keys(&model) &&
    cursor.remove_current() == Err(Error::NoCurrentEntry) &&
    view.is_empty() &&
    map.size() == model.len() - removed.len()
}

#[quickcheck]
fn into_iter_matches_model(entries: Vec<(u8, u8)>) -> bool {
    let (map, model) = build(entries);
    map.into_iter().eq(model)
}
