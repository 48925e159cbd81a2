//! editor - SDL2 front-end for the level editor
//!
//! USAGE:
//! ```bash
//! cargo run --features sdl --bin editor -- --map map.json
//! ```
//!
//! Tiles are drawn as flat colored squares; no image assets are needed.

use clap::Parser;
use platformer::editor::{DEFAULT_RENDER_SCALE, EditorAction, EditorState, TileAssets, UniformTileAssets};
use platformer::tile::{DEFAULT_TILE_SIZE, TileKind};
use platformer::vector::Vec2;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::{BlendMode, Canvas};
use sdl2::video::Window;
use std::path::PathBuf;
use std::time::Duration;

const VIEW_WIDTH: u32 = 320;
const VIEW_HEIGHT: u32 = 180;
const FRAME_TIME: Duration = Duration::from_millis(16);

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Map file to edit (created on first save)
    #[arg(long, value_name = "FILE", default_value = "map.json")]
    map: PathBuf,

    /// Tile size for a new map
    #[arg(long, default_value_t = DEFAULT_TILE_SIZE)]
    tile_size: u32,

    /// Window pixels per render pixel
    #[arg(long, default_value_t = DEFAULT_RENDER_SCALE)]
    scale: f32,
}

/// Keys that toggle on both press and release
fn held_key_action(key: Keycode) -> Option<EditorAction> {
    match key {
        Keycode::A | Keycode::Left => Some(EditorAction::ToggleScrollLeft),
        Keycode::D | Keycode::Right => Some(EditorAction::ToggleScrollRight),
        Keycode::W | Keycode::Up => Some(EditorAction::ToggleScrollUp),
        Keycode::S | Keycode::Down => Some(EditorAction::ToggleScrollDown),
        _ => None,
    }
}

fn pressed_key_action(key: Keycode) -> Option<EditorAction> {
    match key {
        Keycode::G => Some(EditorAction::ToggleGrid),
        Keycode::T => Some(EditorAction::AutoTile),
        Keycode::O => Some(EditorAction::Save),
        Keycode::Tab => Some(EditorAction::NextTileKind),
        _ => None,
    }
}

/// Translates one SDL event. Returns `false` when the editor should close.
fn translate(event: &Event, actions: &mut Vec<EditorAction>) -> bool {
    match *event {
        Event::Quit { .. } => return false,
        Event::KeyDown {
            keycode: Some(Keycode::Escape),
            ..
        } => return false,
        Event::KeyDown {
            keycode: Some(key),
            repeat: false,
            ..
        } => {
            actions.extend(held_key_action(key));
            actions.extend(pressed_key_action(key));
        }
        Event::KeyUp {
            keycode: Some(key), ..
        } => actions.extend(held_key_action(key)),
        Event::MouseMotion { x, y, .. } => actions.push(EditorAction::MouseMove(Vec2::new(x as f32, y as f32))),
        Event::MouseButtonDown { mouse_btn, .. } | Event::MouseButtonUp { mouse_btn, .. } => {
            let pressed = matches!(event, Event::MouseButtonDown { .. });
            match mouse_btn {
                MouseButton::Left => actions.push(EditorAction::LeftButton(pressed)),
                MouseButton::Right => actions.push(EditorAction::RightButton(pressed)),
                _ => {}
            }
        }
        Event::MouseWheel { y, .. } if y != 0 => actions.push(EditorAction::ScrollVariant(y.signum())),
        _ => {}
    }
    true
}

fn tile_color(kind: TileKind, variant: u32) -> Color {
    let shade = (variant * 8).min(64) as u8;
    match kind {
        TileKind::Grass => Color::RGB(60 + shade, 150, 60),
        TileKind::Stone => Color::RGB(110 + shade, 110 + shade, 120),
        TileKind::Decor => Color::RGB(200, 120 + shade, 160),
        TileKind::LargeDecor => Color::RGB(170, 90 + shade, 40),
        TileKind::Spawners => Color::RGB(230, 220, 60 + shade),
    }
}

/// Draws a square at `pos` (render pixels), scaled up to window pixels
fn fill(canvas: &mut Canvas<Window>, pos: Vec2, size: Vec2, scale: f32, color: Color) -> Result<(), String> {
    canvas.set_draw_color(color);
    canvas.fill_rect(Rect::new(
        (pos.x * scale) as i32,
        (pos.y * scale) as i32,
        (size.x * scale).max(1.0) as u32,
        (size.y * scale).max(1.0) as u32,
    ))
}

fn render(
    canvas: &mut Canvas<Window>,
    editor: &EditorState,
    assets: &UniformTileAssets,
    scale: f32,
) -> Result<(), String> {
    canvas.set_draw_color(Color::RGB(20, 20, 30));
    canvas.clear();

    let scroll = editor.render_scroll().as_vec2();
    let view = Vec2::new(VIEW_WIDTH as f32, VIEW_HEIGHT as f32);
    for visible in editor.tilemap.visible_tiles(scroll, view) {
        let size = assets.tile_extent(visible.tile.kind, visible.tile.variant);
        let color = tile_color(visible.tile.kind, visible.tile.variant);
        fill(canvas, visible.pixel - scroll, size, scale, color)?;
    }

    // Placement preview, plus a swatch in the corner
    let (tile, at) = editor.preview();
    let size = assets.tile_extent(tile.kind, tile.variant);
    let mut color = tile_color(tile.kind, tile.variant);
    color.a = 155;
    fill(canvas, at, size, scale, color)?;
    fill(canvas, Vec2::splat(5.0), size, scale, color)?;

    canvas.present();
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opts = Opts::parse();
    let scale = if opts.scale > 0.0 { opts.scale } else { DEFAULT_RENDER_SCALE };

    let mut editor = EditorState::open(&opts.map, opts.tile_size, scale)?;
    let assets = UniformTileAssets {
        tile_size: editor.tilemap.tile_size(),
    };

    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;
    let window = video_subsystem
        .window(
            "editor",
            (VIEW_WIDTH as f32 * scale) as u32,
            (VIEW_HEIGHT as f32 * scale) as u32,
        )
        .position_centered()
        .build()
        .map_err(|e| e.to_string())?;
    let mut canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
    canvas.set_blend_mode(BlendMode::Blend);
    let mut event_pump = sdl_context.event_pump()?;

    let mut actions = Vec::new();
    'running: loop {
        editor.update(&assets);
        render(&mut canvas, &editor, &assets, scale)?;

        for event in event_pump.poll_iter() {
            if !translate(&event, &mut actions) {
                break 'running;
            }
        }
        for action in actions.drain(..) {
            if let Err(e) = editor.handle(action, &assets) {
                log::error!("{:?} failed: {}", action, e);
            } else if action == EditorAction::Save {
                log::info!("Saved {}", editor.map_path.display());
            }
        }

        std::thread::sleep(FRAME_TIME);
    }

    Ok(())
}
