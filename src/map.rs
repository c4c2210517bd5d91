use std::fmt::{self, Display, Write};

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Neighbors are always visited in this order.
    pub fn all_dirs() -> &'static [Direction] {
        static ALL_DIRECTIONS: [Direction; 4] = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ];

        &ALL_DIRECTIONS
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    r: usize,
    c: usize,
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.r, self.c)
    }
}

impl Position {
    pub fn new(r: usize, c: usize) -> Self {
        Self { r, c }
    }

    pub fn r(&self) -> usize {
        self.r
    }

    pub fn c(&self) -> usize {
        self.c
    }

    /// Neighbor along given direction, `None` if it falls below row or column 0.
    /// Neighbors past the far edges are left for the map to reject.
    pub fn neighbor(&self, dir: Direction) -> Option<Self> {
        match dir {
            Direction::Up if self.r > 0 => Some(Self::new(self.r - 1, self.c)),
            Direction::Down => Some(Self::new(self.r + 1, self.c)),
            Direction::Left if self.c > 0 => Some(Self::new(self.r, self.c - 1)),
            Direction::Right => Some(Self::new(self.r, self.c + 1)),
            _ => None,
        }
    }
}

/// Set of key labels(`a` to `z`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct KeySet(u32);

impl KeySet {
    pub fn new() -> Self {
        Self(0)
    }

    fn bit(key: char) -> u32 {
        debug_assert!(key.is_ascii_lowercase());
        1 << (key as u32 - 'a' as u32)
    }

    /// Returns false if given key is already in this set.
    pub fn insert(&mut self, key: char) -> bool {
        let had = self.contains(key);
        self.0 |= Self::bit(key);
        !had
    }

    pub fn with(&self, key: char) -> Self {
        Self(self.0 | Self::bit(key))
    }

    pub fn contains(&self, key: char) -> bool {
        self.0 & Self::bit(key) != 0
    }

    pub fn is_superset(&self, other: &KeySet) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        ('a'..='z').filter(|key| self.contains(*key))
    }
}

impl FromIterator<char> for KeySet {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        let mut set = KeySet::new();
        for key in iter {
            set.insert(key);
        }

        set
    }
}

impl Display for KeySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('{')?;
        for (ind, key) in self.iter().enumerate() {
            if ind > 0 {
                f.write_str(", ")?;
            }
            f.write_char(key)?;
        }
        f.write_char('}')
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Wall,
    Floor,
    Start,
    Key(char),
    /// Door labeled with the upper case of its key.
    Door(char),
    /// Only placed by the reachability scan on its own map copy.
    Visited,
}

impl TryFrom<char> for Tile {
    type Error = Error;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '#' => Ok(Tile::Wall),
            '.' => Ok(Tile::Floor),
            '@' => Ok(Tile::Start),
            c if c.is_ascii_lowercase() => Ok(Tile::Key(c)),
            c if c.is_ascii_uppercase() => Ok(Tile::Door(c)),
            c => Err(Error::InvalidMapChar(c)),
        }
    }
}

impl From<Tile> for char {
    fn from(value: Tile) -> Self {
        match value {
            Tile::Wall => '#',
            Tile::Floor => '.',
            Tile::Start => '@',
            Tile::Key(c) | Tile::Door(c) => c,
            Tile::Visited => '*',
        }
    }
}

impl Tile {
    pub fn door_of_key(key: char) -> Self {
        Tile::Door(key.to_ascii_uppercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map {
    tiles: Vec<Tile>,
    row_n: usize,
    col_n: usize,
}

impl Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.tiles.chunks(self.col_n).enumerate() {
            if r > 0 {
                f.write_char('\n')?;
            }
            for tile in row {
                f.write_char(char::from(*tile))?;
            }
        }

        Ok(())
    }
}

impl Map {
    pub fn try_from_lines<'a, I: IntoIterator<Item = &'a str>>(lines: I) -> Result<Self, Error> {
        let mut tiles = Vec::new();
        let mut row_n = 0;
        let mut col_n = None;
        let mut keys = KeySet::new();
        for (ind, line) in lines.into_iter().enumerate() {
            let this_col_n = line.chars().count();
            let expect_col_n = *col_n.get_or_insert(this_col_n);
            if expect_col_n != this_col_n {
                return Err(Error::InconsistentRow {
                    line: ind + 1,
                    expect: expect_col_n,
                    given: this_col_n,
                });
            }

            for c in line.chars() {
                let tile = Tile::try_from(c)?;
                if let Tile::Key(key) = tile {
                    if !keys.insert(key) {
                        return Err(Error::DuplicateKey(key));
                    }
                }
                tiles.push(tile);
            }
            row_n += 1;
        }

        if tiles.is_empty() {
            return Err(Error::EmptyMap);
        }

        Ok(Self {
            tiles,
            row_n,
            col_n: col_n.unwrap_or(0),
        })
    }

    pub fn row_n(&self) -> usize {
        self.row_n
    }

    pub fn col_n(&self) -> usize {
        self.col_n
    }

    pub fn get(&self, pos: &Position) -> Option<Tile> {
        self.pos_to_ind(pos).map(|ind| self.tiles[ind])
    }

    /// Positions outside the map are ignored.
    pub fn set(&mut self, pos: &Position, tile: Tile) {
        if let Some(ind) = self.pos_to_ind(pos) {
            self.tiles[ind] = tile;
        }
    }

    pub fn first_location(&self, tile: Tile) -> Option<Position> {
        self.tiles
            .iter()
            .position(|t| *t == tile)
            .map(|ind| self.ind_to_pos(ind))
    }

    pub fn all_locations(&self, tile: Tile) -> Vec<Position> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, t)| **t == tile)
            .map(|(ind, _)| self.ind_to_pos(ind))
            .collect()
    }

    /// The only start position in map.
    pub fn start_pos(&self) -> Result<Position, Error> {
        let mut start_positions = self.all_locations(Tile::Start).into_iter();
        let start_pos = start_positions.next().ok_or(Error::NoStartPosition)?;
        if let Some(other_pos) = start_positions.next() {
            return Err(Error::MultipleStartPosition(start_pos, other_pos));
        }

        Ok(start_pos)
    }

    pub fn start_positions(&self) -> Vec<Position> {
        self.all_locations(Tile::Start)
    }

    pub fn keys(&self) -> KeySet {
        self.tiles
            .iter()
            .filter_map(|tile| match tile {
                Tile::Key(key) => Some(*key),
                _ => None,
            })
            .collect()
    }

    /// Keys with their positions, in row-major order.
    pub fn key_positions(&self) -> Vec<(char, Position)> {
        self.tiles
            .iter()
            .enumerate()
            .filter_map(|(ind, tile)| match tile {
                Tile::Key(key) => Some((*key, self.ind_to_pos(ind))),
                _ => None,
            })
            .collect()
    }

    /// Turn every door matching given key into floor, no door is fine.
    pub fn open_door(&mut self, key: char) {
        let door = Tile::door_of_key(key);
        for tile in self.tiles.iter_mut().filter(|t| **t == door) {
            *tile = Tile::Floor;
        }
    }

    /// Replace the only entrance and its surrounding floor with four entrances
    /// separated by walls.
    pub fn split_entrance(&mut self) -> Result<(), Error> {
        const SPLIT_PATTERN: [[Tile; 3]; 3] = [
            [Tile::Start, Tile::Wall, Tile::Start],
            [Tile::Wall, Tile::Wall, Tile::Wall],
            [Tile::Start, Tile::Wall, Tile::Start],
        ];

        let center = self.start_pos()?;
        if center.r == 0 || center.c == 0 {
            return Err(Error::UnsplittableEntrance(center));
        }

        let corner = Position::new(center.r - 1, center.c - 1);
        let area = (0..3)
            .flat_map(|dr| (0..3).map(move |dc| (dr, dc)))
            .map(|(dr, dc)| (dr, dc, Position::new(corner.r + dr, corner.c + dc)))
            .collect::<Vec<_>>();
        if area
            .iter()
            .any(|(_, _, pos)| *pos != center && self.get(pos) != Some(Tile::Floor))
        {
            return Err(Error::UnsplittableEntrance(center));
        }

        for (dr, dc, pos) in area {
            self.set(&pos, SPLIT_PATTERN[dr][dc]);
        }

        Ok(())
    }

    fn ind_to_pos(&self, ind: usize) -> Position {
        Position::new(ind / self.col_n, ind % self.col_n)
    }

    fn pos_to_ind(&self, pos: &Position) -> Option<usize> {
        if pos.r < self.row_n && pos.c < self.col_n {
            Some(pos.r * self.col_n + pos.c)
        } else {
            None
        }
    }
}
