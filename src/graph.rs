use std::{
    cmp::{Ordering, Reverse},
    collections::{BinaryHeap, HashMap, HashSet, VecDeque},
};

use tracing::debug;

use crate::{
    map::{Direction, KeySet, Map, Position, Tile},
    search::CollectPath,
    Error,
};

/// Where a collector can stand between moves: one of the entrances, or a collected key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Node {
    Entrance(usize),
    Key(char),
}

/// A way to a key, with the keys of doors sitting on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub steps_n: usize,
    pub keys_needed: KeySet,
}

/// Every way to a key worth taking, from the shortest one. A longer route is kept
/// only if it needs fewer doors opened than every shorter one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRoutes {
    pub key: char,
    pub routes: Vec<Route>,
}

impl KeyRoutes {
    /// Steps of the shortest route whose doors are all opened by given keys.
    pub fn shortest_open(&self, hold_keys: &KeySet) -> Option<usize> {
        self.routes
            .iter()
            .find(|route| hold_keys.is_superset(&route.keys_needed))
            .map(|route| route.steps_n)
    }

    fn try_add(&mut self, route: Route) {
        // Routes come in order of steps, so a recorded one is never longer.
        if !self
            .routes
            .iter()
            .any(|r| route.keys_needed.is_superset(&r.keys_needed))
        {
            self.routes.push(route);
        }
    }
}

#[derive(Debug)]
pub struct KeyGraph {
    entrance_n: usize,
    routes: HashMap<Node, Vec<KeyRoutes>>,
}

impl KeyGraph {
    pub fn build(map: &Map) -> Self {
        let entrances = map.start_positions();
        let mut routes = HashMap::new();
        for (ind, pos) in entrances.iter().enumerate() {
            routes.insert(Node::Entrance(ind), routes_from(map, pos));
        }
        for (key, pos) in map.key_positions() {
            routes.insert(Node::Key(key), routes_from(map, &pos));
        }

        debug!(
            "Built key graph with {} entrance(s), {} node(s) and {} route(s).",
            entrances.len(),
            routes.len(),
            routes
                .values()
                .flat_map(|key_routes| key_routes.iter().map(|r| r.routes.len()))
                .sum::<usize>()
        );
        Self {
            entrance_n: entrances.len(),
            routes,
        }
    }

    pub fn entrance_n(&self) -> usize {
        self.entrance_n
    }

    /// Routes from given node to every key, in the order keys are found.
    pub fn routes(&self, node: &Node) -> &[KeyRoutes] {
        self.routes
            .get(node)
            .map(|routes| routes.as_slice())
            .unwrap_or(&[])
    }

    /// Dijkstra's search over collector states, one collector per entrance.
    pub fn find_shortest_collect_path(&self) -> CollectPath {
        let mut collectors = BinaryHeap::from([Reverse(Collector::new(self.entrance_n))]);
        let mut searched_states = HashSet::new();
        let mut collector_n = 1;
        while let Some(Reverse(collector)) = collectors.pop() {
            if !searched_states.insert(collector.state.clone()) {
                continue;
            }

            let hold_keys = collector.state.hold_keys;
            let mut moved = false;
            for (robot_ind, node) in collector.state.nodes.iter().enumerate() {
                for (key, steps_n) in self
                    .routes(node)
                    .iter()
                    .filter(|key_routes| !hold_keys.contains(key_routes.key))
                    .filter_map(|key_routes| {
                        key_routes
                            .shortest_open(&hold_keys)
                            .map(|steps_n| (key_routes.key, steps_n))
                    })
                {
                    moved = true;
                    collectors.push(Reverse(collector.move_to_key(
                        robot_ind,
                        key,
                        steps_n,
                        collector_n,
                    )));
                    collector_n += 1;
                }
            }

            if !moved {
                // The first collector unable to move has the shortest path.
                debug!(
                    "Graph search found path({}) with {} steps, {} state(s) searched.",
                    collector.path,
                    collector.path.steps_n(),
                    searched_states.len()
                );
                return collector.path;
            }
        }

        unreachable!("Every search ends with a collector unable to move.");
    }
}

/// Shortest path collecting keys with one collector per entrance.
pub fn find_shortest_collect_path(map: &Map) -> Result<CollectPath, Error> {
    if map.start_positions().is_empty() {
        return Err(Error::NoStartPosition);
    }

    Ok(KeyGraph::build(map).find_shortest_collect_path())
}

// Breadth first search over (position, doors passed) on every tile but walls.
// A state is dropped if the same position was reached with a subset of its doors,
// since the earlier one is never longer.
fn routes_from(map: &Map, from: &Position) -> Vec<KeyRoutes> {
    let mut search_states = VecDeque::from([(*from, 0, KeySet::new())]);
    let mut searched_doors: HashMap<Position, Vec<KeySet>> =
        HashMap::from([(*from, vec![KeySet::new()])]);
    let mut key_routes: Vec<KeyRoutes> = Vec::new();
    while let Some((pos, steps_n, keys_needed)) = search_states.pop_front() {
        for next_pos in Direction::all_dirs()
            .iter()
            .flat_map(|dir| pos.neighbor(*dir))
        {
            let Some(tile) = map.get(&next_pos) else {
                continue;
            };
            if tile == Tile::Wall {
                continue;
            }

            let next_keys_needed = match tile {
                Tile::Door(door) => keys_needed.with(door.to_ascii_lowercase()),
                _ => keys_needed,
            };
            let reached_doors = searched_doors.entry(next_pos).or_default();
            if reached_doors
                .iter()
                .any(|doors| next_keys_needed.is_superset(doors))
            {
                continue;
            }
            reached_doors.push(next_keys_needed);

            if let Tile::Key(key) = tile {
                let route = Route {
                    steps_n: steps_n + 1,
                    keys_needed,
                };
                match key_routes.iter_mut().find(|r| r.key == key) {
                    Some(found) => found.try_add(route),
                    None => key_routes.push(KeyRoutes {
                        key,
                        routes: vec![route],
                    }),
                }
            }
            search_states.push_back((next_pos, steps_n + 1, next_keys_needed));
        }
    }

    key_routes
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CollectorState {
    nodes: Vec<Node>,
    hold_keys: KeySet,
}

#[derive(Debug, Clone)]
struct Collector {
    state: CollectorState,
    path: CollectPath,
    // Breaks ties between equal steps, earlier collectors first.
    order: usize,
}

impl PartialEq for Collector {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Collector {}

impl PartialOrd for Collector {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Collector {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.path.steps_n(), self.order).cmp(&(other.path.steps_n(), other.order))
    }
}

impl Collector {
    fn new(entrance_n: usize) -> Self {
        Self {
            state: CollectorState {
                nodes: (0..entrance_n).map(Node::Entrance).collect(),
                hold_keys: KeySet::new(),
            },
            path: CollectPath::default(),
            order: 0,
        }
    }

    fn move_to_key(&self, robot_ind: usize, key: char, steps_n: usize, order: usize) -> Self {
        let mut nodes = self.state.nodes.clone();
        nodes[robot_ind] = Node::Key(key);
        let mut keys = self.path.keys().to_vec();
        keys.push(key);

        Self {
            state: CollectorState {
                nodes,
                hold_keys: self.state.hold_keys.with(key),
            },
            path: CollectPath::new(keys, self.path.steps_n() + steps_n),
            order,
        }
    }
}
