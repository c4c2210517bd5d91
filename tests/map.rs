use key_maze::{Error, KeySet, Map, Position, Tile};

fn map_of(lines: &[&str]) -> Map {
    Map::try_from_lines(lines.iter().copied()).unwrap()
}

#[test]
fn map_prints_as_given() {
    let lines = ["#########", "#b.A.@.a#", "#########"];
    let map = map_of(&lines);

    assert_eq!(map.row_n(), 3);
    assert_eq!(map.col_n(), 9);
    assert_eq!(map.to_string(), lines.join("\n"));
}

#[test]
fn map_gets_and_sets_tiles() {
    let mut map = map_of(&["#####", "#@.a#", "#####"]);

    assert_eq!(map.get(&Position::new(1, 3)), Some(Tile::Key('a')));
    assert_eq!(map.get(&Position::new(3, 0)), None);
    assert_eq!(map.get(&Position::new(0, 5)), None);

    map.set(&Position::new(1, 3), Tile::Floor);
    map.set(&Position::new(7, 7), Tile::Floor);
    assert_eq!(map.to_string(), "#####\n#@..#\n#####");
}

#[test]
fn map_locates_tiles_in_row_major_order() {
    let map = map_of(&["#A..#", "#.@A#", "#A..#"]);

    assert_eq!(map.first_location(Tile::Door('A')), Some(Position::new(0, 1)));
    assert_eq!(
        map.all_locations(Tile::Door('A')),
        vec![
            Position::new(0, 1),
            Position::new(1, 3),
            Position::new(2, 1)
        ]
    );
    assert_eq!(map.first_location(Tile::Key('z')), None);
    assert!(map.all_locations(Tile::Key('z')).is_empty());
}

#[test]
fn map_finds_only_start() {
    let map = map_of(&["#####", "#@.a#", "#####"]);
    assert_eq!(map.start_pos().unwrap(), Position::new(1, 1));

    let map = map_of(&["#####", "#..a#", "#####"]);
    assert!(matches!(map.start_pos(), Err(Error::NoStartPosition)));

    let map = map_of(&["#####", "#@.@#", "#####"]);
    assert!(matches!(
        map.start_pos(),
        Err(Error::MultipleStartPosition(first, second))
            if first == Position::new(1, 1) && second == Position::new(1, 3)
    ));
}

#[test]
fn map_collects_keys() {
    let map = map_of(&["#######", "#c.@ab#", "#######"]);

    assert_eq!(map.keys(), KeySet::from_iter(['a', 'b', 'c']));
    assert_eq!(map.keys().to_string(), "{a, b, c}");
    assert_eq!(
        map.key_positions(),
        vec![
            ('c', Position::new(1, 1)),
            ('a', Position::new(1, 4)),
            ('b', Position::new(1, 5))
        ]
    );
}

#[test]
fn map_opens_every_matching_door() {
    let mut map = map_of(&["#######", "#A.@.A#", "#B....#", "#######"]);

    map.open_door('a');
    assert_eq!(map.to_string(), "#######\n#..@..#\n#B....#\n#######");

    // No door for this key, nothing changes.
    map.open_door('c');
    assert_eq!(map.to_string(), "#######\n#..@..#\n#B....#\n#######");
}

#[test]
fn map_rejects_invalid_text() {
    assert!(matches!(
        Map::try_from_lines(["#####", "#@.a#", "####"]),
        Err(Error::InconsistentRow {
            line: 3,
            expect: 5,
            given: 4
        })
    ));
    assert!(matches!(
        Map::try_from_lines(["#####", "#@?a#", "#####"]),
        Err(Error::InvalidMapChar('?'))
    ));
    assert!(matches!(
        Map::try_from_lines(["#####", "#a@a#", "#####"]),
        Err(Error::DuplicateKey('a'))
    ));
    assert!(matches!(
        Map::try_from_lines(Vec::<&str>::new()),
        Err(Error::EmptyMap)
    ));
}

#[test]
fn map_splits_entrance() {
    let mut map = key_maze::read_map("tests/data/split1.txt").unwrap();
    map.split_entrance().unwrap();

    assert_eq!(
        map.to_string(),
        ["#######", "#a.#Cd#", "##@#@##", "#######", "##@#@##", "#cB#Ab#", "#######"].join("\n")
    );
    assert_eq!(map.start_positions().len(), 4);
}

#[test]
fn map_refuses_to_split_crowded_entrance() {
    let mut map = map_of(&["#########", "#b.A.@.a#", "#########"]);

    assert!(matches!(
        map.split_entrance(),
        Err(Error::UnsplittableEntrance(pos)) if pos == Position::new(1, 5)
    ));
    // Failed split leaves the map untouched.
    assert_eq!(map.to_string(), "#########\n#b.A.@.a#\n#########");
}

#[test]
fn key_set_works_as_set() {
    let mut keys = KeySet::new();
    assert!(keys.is_empty());
    assert!(keys.insert('c'));
    assert!(!keys.insert('c'));
    assert!(keys.insert('a'));

    assert_eq!(keys.len(), 2);
    assert!(keys.contains('a'));
    assert!(!keys.contains('b'));
    assert_eq!(keys.iter().collect::<String>(), "ac");
    assert!(keys.with('b').is_superset(&keys));
    assert!(!keys.is_superset(&keys.with('z')));
    assert!(keys.is_superset(&KeySet::new()));
}
