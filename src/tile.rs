use crate::collision::Rect;
use crate::save::{SaveError, Saveable, TilemapSaveData, load_from_file, save_to_file};
use crate::vector::{IVec2, Vec2, Vec2Ext};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_TILE_SIZE: u32 = 16;

/// Tile categories that block movement unless a map says otherwise
pub const DEFAULT_PHYSICS_TILES: [TileKind; 2] = [TileKind::Grass, TileKind::Stone];

/// The 3x3 neighbourhood scanned by `physics_rects_around`, row-major.
///
/// Collision resolution processes the rectangles in this order and the last
/// overlapping rectangle decides the final position on an axis, so the order is
/// part of the physics behaviour.
#[rustfmt::skip]
const NEIGHBOR_OFFSETS: [(i32, i32); 9] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0), (0, 0), (1, 0),
    (-1, 1), (0, 1), (1, 1),
];

// Auto-tile neighbour bits
const RIGHT: u8 = 1;
const DOWN: u8 = 2;
const LEFT: u8 = 4;
const UP: u8 = 8;

/// Unique identifier for tile types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileKind {
    Grass,
    Stone,
    Decor,
    LargeDecor,
    Spawners,
}

impl TileKind {
    /// Every kind, in the order the editor cycles through them
    pub const ALL: [TileKind; 5] = [
        TileKind::Grass,
        TileKind::Stone,
        TileKind::Decor,
        TileKind::LargeDecor,
        TileKind::Spawners,
    ];

    /// Kinds whose variant is picked from their neighbours by `Tilemap::auto_tile`
    pub fn is_autotiled(&self) -> bool {
        matches!(self, TileKind::Grass | TileKind::Stone)
    }
}

/// A single placed tile.
///
/// For grid tiles `position` is the grid cell (and always equals the tile's key);
/// for off-grid tiles it is a raw pixel position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    #[serde(rename = "type")]
    pub kind: TileKind,
    pub variant: u32,
    pub position: Vec2,
}

impl Tile {
    pub fn new(kind: TileKind, variant: u32, position: Vec2) -> Self {
        Tile {
            kind,
            variant,
            position,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid grid key `{0}` (expected \"x;y\")")]
pub struct InvalidGridKey(pub String);

/// Integer cell coordinate used to index grid tiles.
///
/// Its text form is the canonical `"x;y"` string used in map files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridKey {
    pub x: i32,
    pub y: i32,
}

impl GridKey {
    pub fn new(x: i32, y: i32) -> Self {
        GridKey { x, y }
    }

    /// The cell containing a pixel position (floor division by the tile size).
    pub fn from_pixel(pixel: Vec2, tile_size: u32) -> Self {
        GridKey::from(pixel.floor_div(tile_size as f32))
    }

    /// The cell named by a grid-space position (e.g. a grid tile's `position`).
    pub fn from_cell(cell: Vec2) -> Self {
        GridKey::from(cell.floor_div(1.0))
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        GridKey::new(self.x + dx, self.y + dy)
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }

    /// Top-left pixel of this cell
    pub fn origin(&self, tile_size: u32) -> Vec2 {
        self.as_vec2() * tile_size as f32
    }
}

impl From<IVec2> for GridKey {
    fn from(v: IVec2) -> Self {
        GridKey::new(v.x, v.y)
    }
}

impl fmt::Display for GridKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{}", self.x, self.y)
    }
}

impl FromStr for GridKey {
    type Err = InvalidGridKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidGridKey(s.to_string());

        let (x, y) = s.split_once(';').ok_or_else(invalid)?;
        let key = GridKey::new(
            x.parse().map_err(|_| invalid())?,
            y.parse().map_err(|_| invalid())?,
        );

        // "+2;0" or "02;0" parse fine but are not canonical keys
        if key.to_string() != s {
            return Err(invalid());
        }
        Ok(key)
    }
}

/// Picks the auto-tile variant for a tile from its neighbour bitmask.
///
/// Returns `None` for patterns that have no dedicated variant (isolated tiles,
/// single neighbours, vertical/horizontal runs); those tiles keep their variant.
pub fn autotile_variant(neighbors: u8) -> Option<u32> {
    match neighbors {
        m if m == RIGHT | DOWN => Some(0),        // top-left corner
        m if m == RIGHT | DOWN | LEFT => Some(1), // top edge
        m if m == LEFT | DOWN => Some(2),         // top-right corner
        m if m == LEFT | UP | DOWN => Some(3),    // right edge
        m if m == LEFT | UP => Some(4),           // bottom-right corner
        m if m == LEFT | UP | RIGHT => Some(5),   // bottom edge
        m if m == RIGHT | UP => Some(6),          // bottom-left corner
        m if m == RIGHT | UP | DOWN => Some(7),   // left edge
        m if m == RIGHT | UP | DOWN | LEFT => Some(8), // interior
        _ => None,
    }
}

/// A tile selected for drawing, with its top-left pixel position resolved
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderTile {
    pub tile: Tile,
    pub pixel: Vec2,
}

/// Sparse tile storage plus the spatial queries the physics step relies on.
///
/// Grid tiles live in a hash map keyed by cell; off-grid (decorative) tiles are
/// kept in placement order and never take part in collision.
#[derive(Debug, Clone, PartialEq)]
pub struct Tilemap {
    tile_size: u32,
    physics_tiles: BTreeSet<TileKind>,
    grid: HashMap<GridKey, Tile>,
    offgrid: Vec<Tile>,
}

impl Default for Tilemap {
    fn default() -> Self {
        Self::new(DEFAULT_TILE_SIZE)
    }
}

impl Tilemap {
    /// Creates an empty map using the default physics tile set.
    ///
    /// A tile size of 0 is bumped to 1 so pixel -> cell conversion never divides
    /// by zero.
    pub fn new(tile_size: u32) -> Self {
        Self::with_physics_tiles(tile_size, DEFAULT_PHYSICS_TILES)
    }

    pub fn with_physics_tiles(tile_size: u32, kinds: impl IntoIterator<Item = TileKind>) -> Self {
        Tilemap {
            tile_size: tile_size.max(1),
            physics_tiles: kinds.into_iter().collect(),
            grid: HashMap::new(),
            offgrid: Vec::new(),
        }
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn physics_tiles(&self) -> &BTreeSet<TileKind> {
        &self.physics_tiles
    }

    pub fn is_physics(&self, kind: TileKind) -> bool {
        self.physics_tiles.contains(&kind)
    }

    pub fn get(&self, key: GridKey) -> Option<&Tile> {
        self.grid.get(&key)
    }

    pub fn grid_len(&self) -> usize {
        self.grid.len()
    }

    pub fn offgrid(&self) -> &[Tile] {
        &self.offgrid
    }

    /// Places a grid tile, replacing whatever occupied its cell.
    ///
    /// The tile's position is snapped to its cell so it always matches the key.
    pub fn place(&mut self, mut tile: Tile) -> Option<Tile> {
        let key = GridKey::from_cell(tile.position);
        tile.position = key.as_vec2();
        self.grid.insert(key, tile)
    }

    /// Places a grid tile in the cell containing `pixel` and returns that cell.
    pub fn place_at_pixel(&mut self, kind: TileKind, variant: u32, pixel: Vec2) -> GridKey {
        let key = GridKey::from_pixel(pixel, self.tile_size);
        self.grid.insert(key, Tile::new(kind, variant, key.as_vec2()));
        key
    }

    pub fn remove(&mut self, key: GridKey) -> Option<Tile> {
        self.grid.remove(&key)
    }

    pub fn push_offgrid(&mut self, tile: Tile) {
        self.offgrid.push(tile);
    }

    /// Removes every off-grid tile whose drawn area contains `point`.
    ///
    /// `extent` gives the pixel size of a tile (usually its image size).
    pub fn remove_offgrid_at(&mut self, point: Vec2, extent: impl Fn(&Tile) -> Vec2) -> usize {
        let before = self.offgrid.len();
        self.offgrid
            .retain(|tile| !Rect::from_pos_size(tile.position, extent(tile)).contains_point(point));
        before - self.offgrid.len()
    }

    /// Returns the grid tile under `point` if it is a physics tile.
    pub fn solid_check(&self, point: Vec2) -> Option<&Tile> {
        self.grid
            .get(&GridKey::from_pixel(point, self.tile_size))
            .filter(|tile| self.is_physics(tile.kind))
    }

    /// Collision rectangles of the physics tiles in the 3x3 cells around `position`.
    ///
    /// Rectangles come out in row-major neighbour order (top row first, left to
    /// right). Callers resolving collisions rely on this order.
    pub fn physics_rects_around(&self, position: Vec2) -> impl Iterator<Item = Rect> + '_ {
        let center = GridKey::from_pixel(position, self.tile_size);
        let size = self.tile_size as f32;

        NEIGHBOR_OFFSETS.iter().filter_map(move |&(dx, dy)| {
            let key = center.offset(dx, dy);
            self.grid
                .get(&key)
                .filter(|tile| self.is_physics(tile.kind))
                .map(|_| {
                    let origin = key.origin(self.tile_size);
                    Rect::new(origin.x, origin.y, size, size)
                })
        })
    }

    /// Re-picks the variant of every auto-tiled grid tile from its 4 neighbours.
    ///
    /// Only neighbours of the same kind count. Tiles whose neighbour pattern has
    /// no entry in the auto-tile table keep their current variant.
    pub fn auto_tile(&mut self) {
        let updates: Vec<(GridKey, u32)> = self
            .grid
            .iter()
            .filter(|(_, tile)| tile.kind.is_autotiled())
            .filter_map(|(key, tile)| {
                let same_kind = |dx: i32, dy: i32| {
                    self.grid
                        .get(&key.offset(dx, dy))
                        .is_some_and(|neighbor| neighbor.kind == tile.kind)
                };

                let mut mask = 0;
                if same_kind(1, 0) {
                    mask |= RIGHT;
                }
                if same_kind(0, 1) {
                    mask |= DOWN;
                }
                if same_kind(-1, 0) {
                    mask |= LEFT;
                }
                if same_kind(0, -1) {
                    mask |= UP;
                }

                autotile_variant(mask).map(|variant| (*key, variant))
            })
            .collect();

        for (key, variant) in updates {
            if let Some(tile) = self.grid.get_mut(&key) {
                tile.variant = variant;
            }
        }
    }

    /// Finds tiles matching any `(kind, variant)` pair, with pixel positions.
    ///
    /// Off-grid matches come first (in placement order), then grid matches sorted
    /// by cell. With `keep == false` the matches are removed from the map; this is
    /// how spawner tiles are turned into entities.
    pub fn extract(&mut self, pairs: &[(TileKind, u32)], keep: bool) -> Vec<Tile> {
        let matches = |tile: &Tile| pairs.contains(&(tile.kind, tile.variant));
        let mut found: Vec<Tile> = self.offgrid.iter().copied().filter(|t| matches(t)).collect();

        let mut grid_keys: Vec<GridKey> = self
            .grid
            .iter()
            .filter(|(_, tile)| matches(tile))
            .map(|(key, _)| *key)
            .collect();
        grid_keys.sort_by_key(|key| (key.y, key.x));

        for key in &grid_keys {
            if let Some(tile) = self.grid.get(key) {
                found.push(Tile::new(tile.kind, tile.variant, key.origin(self.tile_size)));
            }
        }

        if !keep {
            self.offgrid.retain(|tile| !matches(tile));
            for key in grid_keys {
                self.grid.remove(&key);
            }
        }

        found
    }

    /// Tiles to draw for a camera at `camera` (top-left) showing `view_size` pixels.
    ///
    /// All off-grid tiles are returned first, regardless of the camera, followed
    /// by the grid tiles whose cells intersect the view.
    pub fn visible_tiles(&self, camera: Vec2, view_size: Vec2) -> Vec<RenderTile> {
        let mut tiles: Vec<RenderTile> = self
            .offgrid
            .iter()
            .map(|tile| RenderTile {
                tile: *tile,
                pixel: tile.position,
            })
            .collect();

        let first = GridKey::from_pixel(camera, self.tile_size);
        let last = GridKey::from_pixel(camera + view_size, self.tile_size);

        for x in first.x..=last.x {
            for y in first.y..=last.y {
                let key = GridKey::new(x, y);
                if let Some(tile) = self.grid.get(&key) {
                    tiles.push(RenderTile {
                        tile: *tile,
                        pixel: key.origin(self.tile_size),
                    });
                }
            }
        }

        tiles
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SaveError> {
        save_to_file(self, path)
    }

    /// Loads a map file. A missing file yields `SaveError::NotFound`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SaveError> {
        load_from_file(path)
    }
}

impl Saveable for Tilemap {
    type Data = TilemapSaveData;

    fn to_save_data(&self) -> TilemapSaveData {
        TilemapSaveData {
            tile_size: self.tile_size,
            physics_tile_types: self.physics_tiles.clone(),
            tilemap: self
                .grid
                .iter()
                .map(|(key, tile)| (key.to_string(), *tile))
                .collect::<BTreeMap<_, _>>(),
            offgrid: self.offgrid.clone(),
        }
    }

    fn from_save_data(data: TilemapSaveData) -> Result<Self, SaveError> {
        if data.tile_size == 0 {
            return Err(SaveError::CorruptedData("tile_size must be positive".to_string()));
        }

        let mut grid = HashMap::with_capacity(data.tilemap.len());
        for (raw_key, tile) in data.tilemap {
            let key: GridKey = raw_key
                .parse()
                .map_err(|e: InvalidGridKey| SaveError::CorruptedData(e.to_string()))?;

            if tile.position != key.as_vec2() {
                return Err(SaveError::CorruptedData(format!(
                    "tile at key {} has position [{}, {}]",
                    key, tile.position.x, tile.position.y
                )));
            }
            grid.insert(key, tile);
        }

        Ok(Tilemap {
            tile_size: data.tile_size,
            physics_tiles: data.physics_tile_types,
            grid,
            offgrid: data.offgrid,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor_map() -> Tilemap {
        // Three grass tiles in a row at cells (0,1), (1,1), (2,1)
        let mut map = Tilemap::new(16);
        for x in 0..3 {
            map.place(Tile::new(TileKind::Grass, 0, Vec2::new(x as f32, 1.0)));
        }
        map
    }

    #[test]
    fn test_grid_key_canonicalization() {
        let mut map = Tilemap::new(16);
        let key = map.place_at_pixel(TileKind::Stone, 0, Vec2::new(34.0, 10.0));

        assert_eq!(key.to_string(), "2;0");
        assert!(map.get("2;0".parse().unwrap()).is_some());
        assert!(map.get(GridKey::new(3, 0)).is_none());
        assert!(map.get(GridKey::new(2, 1)).is_none());
        assert_eq!(map.grid_len(), 1);
        assert_eq!(map.get(key).unwrap().position, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_grid_key_negative_pixels_floor() {
        let mut map = Tilemap::new(16);
        let key = map.place_at_pixel(TileKind::Grass, 0, Vec2::new(-1.0, -17.0));

        // Truncation would have produced "0;-1"
        assert_eq!(key.to_string(), "-1;-2");
    }

    #[test]
    fn test_grid_key_parse_rejects_non_canonical() {
        assert_eq!("-3;7".parse::<GridKey>(), Ok(GridKey::new(-3, 7)));
        assert!("+2;0".parse::<GridKey>().is_err());
        assert!("02;0".parse::<GridKey>().is_err());
        assert!("2,0".parse::<GridKey>().is_err());
        assert!("2.0;0".parse::<GridKey>().is_err());
    }

    #[test]
    fn test_solid_check_only_physics_tiles() {
        let mut map = floor_map();
        map.place(Tile::new(TileKind::Decor, 0, Vec2::new(5.0, 1.0)));

        assert!(map.solid_check(Vec2::new(20.0, 20.0)).is_some());
        assert!(map.solid_check(Vec2::new(20.0, 5.0)).is_none());
        assert!(map.solid_check(Vec2::new(85.0, 20.0)).is_none()); // decor
    }

    #[test]
    fn test_physics_rects_around_row_major() {
        let mut map = Tilemap::new(16);
        // Fill the whole 3x3 block around cell (1,1)
        for y in 0..3 {
            for x in 0..3 {
                map.place(Tile::new(TileKind::Stone, 0, Vec2::new(x as f32, y as f32)));
            }
        }

        let rects: Vec<Rect> = map.physics_rects_around(Vec2::new(20.0, 20.0)).collect();
        assert_eq!(rects.len(), 9);
        assert_eq!(rects[0], Rect::new(0.0, 0.0, 16.0, 16.0));
        assert_eq!(rects[1], Rect::new(16.0, 0.0, 16.0, 16.0));
        assert_eq!(rects[3], Rect::new(0.0, 16.0, 16.0, 16.0));
        assert_eq!(rects[8], Rect::new(32.0, 32.0, 16.0, 16.0));
    }

    #[test]
    fn test_physics_rects_around_skips_empty_and_decor() {
        let mut map = floor_map();
        map.place(Tile::new(TileKind::LargeDecor, 0, Vec2::new(1.0, 0.0)));

        let rects: Vec<Rect> = map.physics_rects_around(Vec2::new(18.0, 2.0)).collect();
        assert_eq!(
            rects,
            vec![
                Rect::new(0.0, 16.0, 16.0, 16.0),
                Rect::new(16.0, 16.0, 16.0, 16.0),
                Rect::new(32.0, 16.0, 16.0, 16.0),
            ]
        );
    }

    #[test]
    fn test_auto_tile_assigns_edge_variants() {
        let mut map = Tilemap::new(16);
        // 3x2 block of grass:
        //   (0,0) (1,0) (2,0)
        //   (0,1) (1,1) (2,1)
        for y in 0..2 {
            for x in 0..3 {
                map.place(Tile::new(TileKind::Grass, 0, Vec2::new(x as f32, y as f32)));
            }
        }
        map.auto_tile();

        let variant = |x, y| map.get(GridKey::new(x, y)).unwrap().variant;
        assert_eq!(variant(0, 0), 0); // right + down
        assert_eq!(variant(1, 0), 1); // right + down + left
        assert_eq!(variant(2, 0), 2); // left + down
        assert_eq!(variant(0, 1), 6); // right + up
        assert_eq!(variant(1, 1), 5); // left + up + right
        assert_eq!(variant(2, 1), 4); // left + up
    }

    #[test]
    fn test_auto_tile_ignores_other_kinds_and_unmatched_patterns() {
        let mut map = Tilemap::new(16);
        map.place(Tile::new(TileKind::Grass, 3, Vec2::new(0.0, 0.0)));
        map.place(Tile::new(TileKind::Stone, 7, Vec2::new(1.0, 0.0)));
        map.place(Tile::new(TileKind::Decor, 2, Vec2::new(0.0, 1.0)));
        map.auto_tile();

        // No same-kind neighbours anywhere: every variant is untouched
        assert_eq!(map.get(GridKey::new(0, 0)).unwrap().variant, 3);
        assert_eq!(map.get(GridKey::new(1, 0)).unwrap().variant, 7);
        assert_eq!(map.get(GridKey::new(0, 1)).unwrap().variant, 2);
    }

    #[test]
    fn test_autotile_variant_table() {
        assert_eq!(autotile_variant(RIGHT | UP | DOWN | LEFT), Some(8));
        assert_eq!(autotile_variant(LEFT | UP | DOWN), Some(3));
        assert_eq!(autotile_variant(RIGHT | UP | DOWN), Some(7));
        assert_eq!(autotile_variant(0), None);
        assert_eq!(autotile_variant(LEFT | RIGHT), None);
    }

    #[test]
    fn test_extract_spawners() {
        let mut map = floor_map();
        map.place(Tile::new(TileKind::Spawners, 0, Vec2::new(1.0, 0.0)));
        map.place(Tile::new(TileKind::Spawners, 1, Vec2::new(2.0, 0.0)));
        map.push_offgrid(Tile::new(TileKind::Spawners, 1, Vec2::new(40.5, 3.0)));

        let kept = map.extract(&[(TileKind::Spawners, 1)], true);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].position, Vec2::new(40.5, 3.0));
        assert_eq!(kept[1].position, Vec2::new(32.0, 0.0));
        assert_eq!(map.offgrid().len(), 1);

        let taken = map.extract(&[(TileKind::Spawners, 0), (TileKind::Spawners, 1)], false);
        assert_eq!(taken.len(), 3);
        assert!(map.offgrid().is_empty());
        assert_eq!(map.grid_len(), 3);
    }

    #[test]
    fn test_remove_offgrid_at_uses_extent() {
        let mut map = Tilemap::new(16);
        map.push_offgrid(Tile::new(TileKind::Decor, 0, Vec2::new(10.0, 10.0)));
        map.push_offgrid(Tile::new(TileKind::Decor, 1, Vec2::new(100.0, 10.0)));

        let removed = map.remove_offgrid_at(Vec2::new(20.0, 12.0), |_| Vec2::new(16.0, 16.0));
        assert_eq!(removed, 1);
        assert_eq!(map.offgrid()[0].variant, 1);
    }

    #[test]
    fn test_visible_tiles_window_and_offgrid() {
        let mut map = floor_map();
        map.place(Tile::new(TileKind::Stone, 0, Vec2::new(40.0, 1.0)));
        map.push_offgrid(Tile::new(TileKind::Decor, 0, Vec2::new(5000.0, 5000.0)));

        let visible = map.visible_tiles(Vec2::ZERO, Vec2::new(320.0, 180.0));
        assert_eq!(visible.len(), 4);
        // Off-grid tiles are never culled
        assert_eq!(visible[0].pixel, Vec2::new(5000.0, 5000.0));
        assert!(visible.iter().all(|t| t.tile.kind != TileKind::Stone));
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.json");

        let mut map = Tilemap::with_physics_tiles(16, [TileKind::Stone]);
        map.place_at_pixel(TileKind::Stone, 2, Vec2::new(34.0, 10.0));
        map.place_at_pixel(TileKind::Grass, 1, Vec2::new(-20.0, 64.0));
        map.push_offgrid(Tile::new(TileKind::Decor, 3, Vec2::new(7.25, 9.5)));
        map.push_offgrid(Tile::new(TileKind::LargeDecor, 0, Vec2::new(1.0, 2.0)));

        map.save(&path).unwrap();
        let loaded = Tilemap::load(&path).unwrap();

        assert_eq!(loaded, map);
        assert_eq!(loaded.offgrid()[0].kind, TileKind::Decor);
        assert_eq!(loaded.offgrid()[1].kind, TileKind::LargeDecor);
    }

    #[test]
    fn test_save_format_fields() {
        let mut map = Tilemap::new(16);
        map.place_at_pixel(TileKind::Grass, 1, Vec2::new(34.0, 10.0));

        let json = serde_json::to_value(map.to_save_data()).unwrap();
        assert_eq!(json["tile_size"], 16);
        assert_eq!(json["physics_tile_types"], serde_json::json!(["grass", "stone"]));
        assert_eq!(json["tilemap"]["2;0"]["type"], "grass");
        assert_eq!(json["tilemap"]["2;0"]["position"], serde_json::json!([2.0, 0.0]));
        assert_eq!(json["offgrid"], serde_json::json!([]));
    }

    #[test]
    fn test_load_accepts_integer_positions() {
        let json = r#"{
            "tile_size": 16,
            "physics_tile_types": ["grass"],
            "tilemap": { "-1;3": { "type": "grass", "variant": 4, "position": [-1, 3] } },
            "offgrid": []
        }"#;
        let data: TilemapSaveData = serde_json::from_str(json).unwrap();
        let map = Tilemap::from_save_data(data).unwrap();

        assert_eq!(map.get(GridKey::new(-1, 3)).unwrap().variant, 4);
        assert!(!map.is_physics(TileKind::Stone));
    }

    #[test]
    fn test_load_rejects_mismatched_position() {
        let mut data = Tilemap::new(16).to_save_data();
        data.tilemap.insert(
            "1;1".to_string(),
            Tile::new(TileKind::Grass, 0, Vec2::new(2.0, 1.0)),
        );

        let result = Tilemap::from_save_data(data);
        assert!(matches!(result, Err(SaveError::CorruptedData(_))));
    }

    #[test]
    fn test_load_rejects_bad_key_and_zero_tile_size() {
        let mut data = Tilemap::new(16).to_save_data();
        data.tilemap.insert(
            "one;two".to_string(),
            Tile::new(TileKind::Grass, 0, Vec2::ZERO),
        );
        assert!(matches!(Tilemap::from_save_data(data), Err(SaveError::CorruptedData(_))));

        let mut data = Tilemap::new(16).to_save_data();
        data.tile_size = 0;
        assert!(matches!(Tilemap::from_save_data(data), Err(SaveError::CorruptedData(_))));
    }
}
