use tracing::trace;

use crate::map::{Direction, KeySet, Map, Position, Tile};

/// A key found by the reachability scan, with its shortest distance from the scan origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReachableKey {
    pub key: char,
    pub pos: Position,
    pub steps_n: usize,
}

/// Keys reachable from given position without passing walls, closed doors or other keys,
/// in the order they are discovered.
pub fn accessible_keys(map: &Map, from: &Position) -> Vec<ReachableKey> {
    // Visited floor is marked on a private copy, the given map stays untouched.
    let mut scan_map = map.clone();
    scan_map.set(from, Tile::Visited);

    let mut found_keys = KeySet::new();
    let mut reachable_keys = Vec::new();
    let mut wavefront = vec![*from];
    let mut steps_n = 1;
    while !wavefront.is_empty() {
        let mut next_wavefront = Vec::new();
        for pos in &wavefront {
            for next_pos in Direction::all_dirs()
                .iter()
                .flat_map(|dir| pos.neighbor(*dir))
            {
                match scan_map.get(&next_pos) {
                    Some(Tile::Key(key)) => {
                        // Keys are found, not passed through.
                        if found_keys.insert(key) {
                            reachable_keys.push(ReachableKey {
                                key,
                                pos: next_pos,
                                steps_n,
                            });
                        }
                    }
                    Some(Tile::Floor) => {
                        scan_map.set(&next_pos, Tile::Visited);
                        next_wavefront.push(next_pos);
                    }
                    _ => (),
                }
            }
        }

        wavefront = next_wavefront;
        steps_n += 1;
    }

    trace!(
        "Found {} reachable key(s) {} from {}.",
        reachable_keys.len(),
        found_keys,
        from
    );
    reachable_keys
}
