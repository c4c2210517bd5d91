use std::{
    collections::HashMap,
    fmt::{self, Display},
};

use tracing::{debug, trace};

use crate::{
    map::{KeySet, Map, Position, Tile},
    reach::{self, ReachableKey},
};

/// Keys in the order they're collected, and the total steps to collect them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectPath {
    keys: Vec<char>,
    steps_n: usize,
}

impl Display for CollectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (ind, key) in self.keys.iter().enumerate() {
            if ind > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", key)?;
        }

        Ok(())
    }
}

impl CollectPath {
    pub fn new(keys: Vec<char>, steps_n: usize) -> Self {
        Self { keys, steps_n }
    }

    pub fn keys(&self) -> &[char] {
        &self.keys
    }

    pub fn steps_n(&self) -> usize {
        self.steps_n
    }

    fn after_key(self, key: char, steps_n: usize) -> Self {
        let mut keys = Vec::with_capacity(self.keys.len() + 1);
        keys.push(key);
        keys.extend(self.keys);
        Self::new(keys, steps_n + self.steps_n)
    }
}

/// Where the recursive search keeps finished sub-paths.
trait SubPathCache {
    fn lookup(&self, pos: &Position, hold_keys: KeySet) -> Option<CollectPath>;

    fn save(&mut self, pos: &Position, hold_keys: KeySet, path: &CollectPath);
}

/// Keeps nothing, every branch is searched again.
struct NoCache;

impl SubPathCache for NoCache {
    fn lookup(&self, _pos: &Position, _hold_keys: KeySet) -> Option<CollectPath> {
        None
    }

    fn save(&mut self, _pos: &Position, _hold_keys: KeySet, _path: &CollectPath) {}
}

impl SubPathCache for HashMap<(Position, KeySet), CollectPath> {
    fn lookup(&self, pos: &Position, hold_keys: KeySet) -> Option<CollectPath> {
        self.get(&(*pos, hold_keys)).cloned()
    }

    fn save(&mut self, pos: &Position, hold_keys: KeySet, path: &CollectPath) {
        self.insert((*pos, hold_keys), path.clone());
    }
}

/// Shortest path collecting every key reachable from given position, found by trying
/// every order of collection. It's exponential in the number of keys.
pub fn shortest_collect_path(map: &Map, from: &Position) -> CollectPath {
    let path = search_from(map, from, KeySet::new(), &mut Vec::new(), &mut NoCache);
    debug!("Brute force search found path({}) with {} steps.", path, path.steps_n());
    path
}

/// Same result as [`shortest_collect_path`], with sub-paths cached by the collector's
/// position and the keys it holds.
pub fn shortest_collect_path_memo(map: &Map, from: &Position) -> CollectPath {
    let mut cache = HashMap::new();
    let path = search_from(map, from, KeySet::new(), &mut Vec::new(), &mut cache);
    debug!(
        "Memoized search found path({}) with {} steps, {} sub-path(s) cached.",
        path,
        path.steps_n(),
        cache.len()
    );
    path
}

// The map passed in has every held key removed and its doors opened, with the
// collector's position marked as start, so (position, held keys) fixes the map.
fn search_from<C: SubPathCache>(
    map: &Map,
    from: &Position,
    hold_keys: KeySet,
    history: &mut Vec<char>,
    cache: &mut C,
) -> CollectPath {
    if let Some(path) = cache.lookup(from, hold_keys) {
        return path;
    }

    trace!(
        depth = history.len(),
        history = %history.iter().collect::<String>(),
        "Search keys from {}.",
        from
    );
    let mut shortest_path: Option<CollectPath> = None;
    for ReachableKey { key, pos, steps_n } in reach::accessible_keys(map, from) {
        let mut branch_map = map.clone();
        branch_map.set(from, Tile::Floor);
        branch_map.set(&pos, Tile::Start);
        branch_map.open_door(key);

        history.push(key);
        let rest_path = search_from(&branch_map, &pos, hold_keys.with(key), history, cache);
        history.pop();

        // Ties keep the branch discovered first.
        if shortest_path
            .as_ref()
            .map_or(true, |path| steps_n + rest_path.steps_n() < path.steps_n())
        {
            shortest_path = Some(rest_path.after_key(key, steps_n));
        }
    }

    let path = shortest_path.unwrap_or_default();
    cache.save(from, hold_keys, &path);
    path
}
