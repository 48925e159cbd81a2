//! Level editor state
//!
//! The editor works on the same `Tilemap` the game plays. It is driven by
//! `EditorAction`s (produced by whatever front-end owns the window) plus one
//! `update` call per frame, which scrolls the camera and applies held mouse
//! buttons.
//!
//! # Controls (as mapped by the SDL front-end)
//!
//! | Input              | Action                                   |
//! |--------------------|------------------------------------------|
//! | WASD / arrows      | scroll while held                        |
//! | G                  | toggle grid / off-grid placement         |
//! | T                  | auto-tile                                |
//! | O                  | save the map                             |
//! | TAB                | next tile kind                           |
//! | mouse wheel        | previous / next variant                  |
//! | left button        | place (grid: while held, off-grid: once) |
//! | right button       | remove under cursor while held           |

use crate::save::{SaveError, SaveManager};
use crate::tile::{DEFAULT_TILE_SIZE, GridKey, Tile, TileKind, Tilemap};
use crate::vector::{DirectionFlags, IVec2, Vec2, Vec2Ext};
use std::path::{Path, PathBuf};

/// Camera pixels moved per frame per held direction
pub const SCROLL_SPEED: f32 = 5.0;

/// Window pixels per render pixel for the stock 320x180 view
pub const DEFAULT_RENDER_SCALE: f32 = 3.0;

/// Backups of the edited map kept next to it
pub const KEEP_BACKUPS: usize = 5;

/// What the editor needs to know about tile images without owning them
pub trait TileAssets {
    /// Number of variants available for `kind` (at least 1)
    fn variant_count(&self, kind: TileKind) -> u32;

    /// Drawn size of a tile, used to hit-test off-grid tiles
    fn tile_extent(&self, kind: TileKind, variant: u32) -> Vec2;
}

/// Stock tile set: every image is one tile in size
#[derive(Debug, Clone, Copy)]
pub struct UniformTileAssets {
    pub tile_size: u32,
}

impl Default for UniformTileAssets {
    fn default() -> Self {
        UniformTileAssets {
            tile_size: DEFAULT_TILE_SIZE,
        }
    }
}

impl TileAssets for UniformTileAssets {
    fn variant_count(&self, kind: TileKind) -> u32 {
        match kind {
            TileKind::Grass | TileKind::Stone => 9,
            TileKind::Decor => 4,
            TileKind::LargeDecor => 3,
            TileKind::Spawners => 2,
        }
    }

    fn tile_extent(&self, _kind: TileKind, _variant: u32) -> Vec2 {
        Vec2::splat(self.tile_size as f32)
    }
}

/// High-level editor commands
///
/// Direction and mouse button actions come in press/release pairs; the
/// direction ones toggle, so a front-end sends the same action for both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorAction {
    // === Camera ===
    ToggleScrollLeft,
    ToggleScrollRight,
    ToggleScrollUp,
    ToggleScrollDown,

    // === Palette ===
    ToggleGrid,
    NextTileKind,
    ScrollVariant(i32),

    // === Map ===
    AutoTile,
    Save,

    // === Mouse ===
    MouseMove(Vec2), // window pixels
    LeftButton(bool),
    RightButton(bool),
}

pub struct EditorState {
    pub tilemap: Tilemap,
    pub map_path: PathBuf,
    /// Camera top-left in world pixels
    pub scroll: Vec2,
    pub directions: DirectionFlags,
    pub ongrid: bool,
    /// Cursor in render pixels
    pub mouse: Vec2,
    kind_index: usize,
    variant: u32,
    clicking: bool,
    right_clicking: bool,
    render_scale: f32,
}

impl EditorState {
    pub fn new(tilemap: Tilemap, map_path: impl Into<PathBuf>, render_scale: f32) -> Self {
        EditorState {
            tilemap,
            map_path: map_path.into(),
            scroll: Vec2::ZERO,
            directions: DirectionFlags::new(),
            ongrid: true,
            mouse: Vec2::ZERO,
            kind_index: 0,
            variant: 0,
            clicking: false,
            right_clicking: false,
            render_scale: if render_scale > 0.0 { render_scale } else { 1.0 },
        }
    }

    /// Opens `map_path` for editing, or starts an empty map if it doesn't exist.
    pub fn open(map_path: impl AsRef<Path>, tile_size: u32, render_scale: f32) -> Result<Self, SaveError> {
        let map_path = map_path.as_ref();
        let tilemap = match Tilemap::load(map_path) {
            Ok(map) => {
                log::info!("Editing {} ({} grid tiles)", map_path.display(), map.grid_len());
                map
            }
            Err(e) if e.is_not_found() => {
                log::info!("{} does not exist yet, starting a new map", map_path.display());
                Tilemap::new(tile_size)
            }
            Err(e) => return Err(e),
        };
        Ok(EditorState::new(tilemap, map_path, render_scale))
    }

    pub fn tile_kind(&self) -> TileKind {
        TileKind::ALL[self.kind_index]
    }

    pub fn variant(&self) -> u32 {
        self.variant
    }

    /// Camera offset rounded the way it is drawn
    pub fn render_scroll(&self) -> IVec2 {
        self.scroll.trunc_i32()
    }

    /// Grid cell under the cursor
    pub fn tile_pos(&self) -> GridKey {
        GridKey::from_pixel(self.mouse + self.scroll, self.tilemap.tile_size())
    }

    /// The tile that would be placed right now and where to draw its preview
    /// (in render pixels).
    pub fn preview(&self) -> (Tile, Vec2) {
        let tile = Tile::new(self.tile_kind(), self.variant, self.mouse + self.scroll);
        let at = if self.ongrid {
            self.tile_pos().origin(self.tilemap.tile_size()) - self.scroll
        } else {
            self.mouse
        };
        (tile, at)
    }

    pub fn handle(&mut self, action: EditorAction, assets: &impl TileAssets) -> Result<(), SaveError> {
        match action {
            EditorAction::ToggleScrollLeft => self.directions.toggle_left(),
            EditorAction::ToggleScrollRight => self.directions.toggle_right(),
            EditorAction::ToggleScrollUp => self.directions.toggle_up(),
            EditorAction::ToggleScrollDown => self.directions.toggle_down(),
            EditorAction::ToggleGrid => self.ongrid = !self.ongrid,
            EditorAction::NextTileKind => {
                self.kind_index = (self.kind_index + 1) % TileKind::ALL.len();
                self.variant = 0;
            }
            EditorAction::ScrollVariant(amount) => {
                let count = assets.variant_count(self.tile_kind()).max(1) as i64;
                self.variant = (self.variant as i64 + amount as i64).rem_euclid(count) as u32;
            }
            EditorAction::AutoTile => self.tilemap.auto_tile(),
            EditorAction::Save => self.save()?,
            EditorAction::MouseMove(window) => self.mouse = window / self.render_scale,
            EditorAction::LeftButton(pressed) => {
                // Off-grid tiles go down once per press so a held button
                // doesn't stack copies.
                if pressed && !self.clicking && !self.ongrid {
                    self.tilemap
                        .push_offgrid(Tile::new(self.tile_kind(), self.variant, self.mouse + self.scroll));
                }
                self.clicking = pressed;
            }
            EditorAction::RightButton(pressed) => self.right_clicking = pressed,
        }
        Ok(())
    }

    /// Saves through a `SaveManager` rooted at the map's directory, so the
    /// previous version is kept as a timestamped backup.
    fn save(&mut self) -> Result<(), SaveError> {
        let directory = match self.map_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let name = self
            .map_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("map")
            .to_string();

        let manager = SaveManager::new(directory)?;
        self.map_path = manager.save_map(&name, &self.tilemap)?;
        let removed = manager.cleanup_backups(&name, KEEP_BACKUPS)?;
        if removed > 0 {
            log::debug!("Removed {} old backups of {}", removed, name);
        }
        Ok(())
    }

    /// Per-frame work: scroll, then held-button placement and removal
    pub fn update(&mut self, assets: &impl TileAssets) {
        self.scroll += self.directions.axis() * SCROLL_SPEED;

        if self.clicking && self.ongrid {
            self.tilemap.place_at_pixel(self.tile_kind(), self.variant, self.mouse + self.scroll);
        }

        if self.right_clicking {
            self.tilemap.remove(self.tile_pos());
            self.tilemap.remove_offgrid_at(self.mouse + self.scroll, |tile| {
                assets.tile_extent(tile.kind, tile.variant)
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> EditorState {
        EditorState::new(Tilemap::new(16), "map.json", 3.0)
    }

    #[test]
    fn test_scroll_while_direction_held() {
        let assets = UniformTileAssets::default();
        let mut ed = editor();

        ed.handle(EditorAction::ToggleScrollRight, &assets).unwrap();
        ed.handle(EditorAction::ToggleScrollUp, &assets).unwrap();
        ed.update(&assets);
        ed.update(&assets);
        assert_eq!(ed.scroll, Vec2::new(10.0, -10.0));

        // Release
        ed.handle(EditorAction::ToggleScrollRight, &assets).unwrap();
        ed.handle(EditorAction::ToggleScrollUp, &assets).unwrap();
        ed.update(&assets);
        assert_eq!(ed.scroll, Vec2::new(10.0, -10.0));
    }

    #[test]
    fn test_tile_kind_and_variant_cycling() {
        let assets = UniformTileAssets::default();
        let mut ed = editor();
        assert_eq!(ed.tile_kind(), TileKind::Grass);

        ed.handle(EditorAction::ScrollVariant(-1), &assets).unwrap();
        assert_eq!(ed.variant(), 8);
        ed.handle(EditorAction::ScrollVariant(1), &assets).unwrap();
        assert_eq!(ed.variant(), 0);
        ed.handle(EditorAction::ScrollVariant(1), &assets).unwrap();

        ed.handle(EditorAction::NextTileKind, &assets).unwrap();
        assert_eq!(ed.tile_kind(), TileKind::Stone);
        assert_eq!(ed.variant(), 0);

        for _ in 0..4 {
            ed.handle(EditorAction::NextTileKind, &assets).unwrap();
        }
        assert_eq!(ed.tile_kind(), TileKind::Grass);
    }

    #[test]
    fn test_grid_placement_while_held() {
        let assets = UniformTileAssets::default();
        let mut ed = editor();

        ed.handle(EditorAction::MouseMove(Vec2::new(150.0, 30.0)), &assets).unwrap();
        assert_eq!(ed.mouse, Vec2::new(50.0, 10.0));
        assert_eq!(ed.tile_pos(), GridKey::new(3, 0));

        ed.handle(EditorAction::LeftButton(true), &assets).unwrap();
        ed.update(&assets);
        ed.handle(EditorAction::MouseMove(Vec2::new(150.0, 80.0)), &assets).unwrap();
        ed.update(&assets);
        ed.handle(EditorAction::LeftButton(false), &assets).unwrap();
        ed.handle(EditorAction::MouseMove(Vec2::new(300.0, 80.0)), &assets).unwrap();
        ed.update(&assets);

        assert_eq!(ed.tilemap.grid_len(), 2);
        assert_eq!(ed.tilemap.get(GridKey::new(3, 1)).map(|t| t.kind), Some(TileKind::Grass));
        assert!(ed.tilemap.offgrid().is_empty());
    }

    #[test]
    fn test_offgrid_placement_once_per_press() {
        let assets = UniformTileAssets::default();
        let mut ed = editor();
        ed.handle(EditorAction::ToggleGrid, &assets).unwrap();
        ed.scroll = Vec2::new(100.0, 0.0);
        ed.handle(EditorAction::MouseMove(Vec2::new(30.0, 45.0)), &assets).unwrap();

        ed.handle(EditorAction::LeftButton(true), &assets).unwrap();
        ed.update(&assets);
        ed.update(&assets);
        assert_eq!(ed.tilemap.offgrid().len(), 1);
        assert_eq!(ed.tilemap.offgrid()[0].position, Vec2::new(110.0, 15.0));

        ed.handle(EditorAction::LeftButton(false), &assets).unwrap();
        ed.handle(EditorAction::LeftButton(true), &assets).unwrap();
        assert_eq!(ed.tilemap.offgrid().len(), 2);
        assert_eq!(ed.tilemap.grid_len(), 0);
    }

    #[test]
    fn test_right_click_removes_under_cursor() {
        let assets = UniformTileAssets::default();
        let mut ed = editor();
        ed.tilemap.place(Tile::new(TileKind::Stone, 0, Vec2::new(1.0, 1.0)));
        ed.tilemap.place(Tile::new(TileKind::Stone, 0, Vec2::new(2.0, 1.0)));
        ed.tilemap.push_offgrid(Tile::new(TileKind::Decor, 0, Vec2::new(20.0, 20.0)));
        ed.tilemap.push_offgrid(Tile::new(TileKind::Decor, 1, Vec2::new(60.0, 0.0)));

        ed.handle(EditorAction::MouseMove(Vec2::new(75.0, 75.0)), &assets).unwrap();
        ed.handle(EditorAction::RightButton(true), &assets).unwrap();
        ed.update(&assets);

        assert!(ed.tilemap.get(GridKey::new(1, 1)).is_none());
        assert!(ed.tilemap.get(GridKey::new(2, 1)).is_some());
        assert_eq!(ed.tilemap.offgrid().len(), 1);
        assert_eq!(ed.tilemap.offgrid()[0].variant, 1);
    }

    #[test]
    fn test_cursor_left_of_origin_floors() {
        let assets = UniformTileAssets::default();
        let mut ed = editor();
        ed.scroll = Vec2::new(-20.0, -1.0);

        assert_eq!(ed.tile_pos(), GridKey::new(-2, -1));

        ed.handle(EditorAction::LeftButton(true), &assets).unwrap();
        ed.update(&assets);
        assert!(ed.tilemap.get(GridKey::new(-2, -1)).is_some());
    }

    #[test]
    fn test_preview_position() {
        let mut ed = editor();
        ed.scroll = Vec2::new(4.0, 0.0);
        ed.mouse = Vec2::new(20.0, 3.0);

        // Cell (1, 0) starts at world x=16, which is x=12 on screen
        assert_eq!(ed.preview().1, Vec2::new(12.0, 0.0));

        ed.ongrid = false;
        assert_eq!(ed.preview().1, Vec2::new(20.0, 3.0));
    }

    #[test]
    fn test_save_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("level.json");
        let assets = UniformTileAssets::default();

        let mut ed = EditorState::open(&path, 16, 3.0).unwrap();
        assert_eq!(ed.tilemap.grid_len(), 0);

        ed.tilemap.place(Tile::new(TileKind::Grass, 0, Vec2::new(0.0, 0.0)));
        ed.tilemap.place(Tile::new(TileKind::Grass, 0, Vec2::new(1.0, 0.0)));
        ed.handle(EditorAction::AutoTile, &assets).unwrap();
        ed.handle(EditorAction::Save, &assets).unwrap();

        let reopened = EditorState::open(&path, 16, 3.0).unwrap();
        assert_eq!(reopened.tilemap, ed.tilemap);
    }

    fn backups_in(dir: &Path) -> usize {
        std::fs::read_dir(dir)
            .unwrap()
            .filter(|entry| entry.as_ref().unwrap().file_name().to_string_lossy().contains("_backup_"))
            .count()
    }

    #[test]
    fn test_save_backs_up_previous_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("level.json");
        let assets = UniformTileAssets::default();
        let manager = SaveManager::new(dir.path()).unwrap();

        let mut ed = EditorState::open(&path, 16, 3.0).unwrap();
        ed.handle(EditorAction::Save, &assets).unwrap();
        assert_eq!(ed.map_path, path);
        assert_eq!(backups_in(dir.path()), 0);

        ed.tilemap.place(Tile::new(TileKind::Stone, 0, Vec2::new(2.0, 3.0)));
        ed.handle(EditorAction::Save, &assets).unwrap();
        assert_eq!(backups_in(dir.path()), 1);
        assert_eq!(manager.list_maps().unwrap(), vec!["level".to_string()]);

        let saved: Tilemap = manager.load_map("level").unwrap();
        assert_eq!(saved, ed.tilemap);
    }
}
