/// Axis-aligned rectangles and overlap tests for entities and tiles
///
/// This module provides a float AABB (Axis-Aligned Bounding Box) type shared by the
/// physics step, the tilemap's collision queries and the entity-vs-entity checks
/// (dash hits, projectile hits).
///
/// # Architecture
///
/// - `Rect`: Position is the top-left corner, with edge setters that move the
///   rectangle without resizing it (`set_right(x)` snaps the right edge to `x`)
/// - `aabb_intersect`: Pure overlap test
/// - `Collidable` trait: Implemented by anything that exposes a bounding box
use crate::vector::Vec2;

/// An axis-aligned rectangle in world pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    /// Builds a rectangle from a top-left position and a size.
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Rect::new(pos.x, pos.y, size.x, size.y)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn set_left(&mut self, left: f32) {
        self.x = left;
    }

    pub fn set_right(&mut self, right: f32) {
        self.x = right - self.w;
    }

    pub fn set_top(&mut self, top: f32) {
        self.y = top;
    }

    pub fn set_bottom(&mut self, bottom: f32) {
        self.y = bottom - self.h;
    }

    /// Checks whether `point` lies inside the rectangle.
    ///
    /// The left/top edges are inclusive and the right/bottom edges exclusive, so
    /// two rectangles that share an edge never both claim a point on it.
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }
}

/// Checks if two axis-aligned bounding boxes intersect.
///
/// Two rectangles intersect if they overlap on both the X and Y axes.
/// Rectangles that merely touch along an edge do NOT intersect - an entity
/// resting exactly on top of a tile is touching it, not colliding with it.
///
/// # Example
///
/// ```rust
/// use platformer::collision::{aabb_intersect, Rect};
///
/// let player = Rect::new(10.0, 10.0, 8.0, 15.0);
/// let tile = Rect::new(16.0, 16.0, 16.0, 16.0);
/// assert!(aabb_intersect(&player, &tile));
/// ```
pub fn aabb_intersect(a: &Rect, b: &Rect) -> bool {
    let x_overlap = a.left() < b.right() && a.right() > b.left();
    let y_overlap = a.top() < b.bottom() && a.bottom() > b.top();

    x_overlap && y_overlap
}

/// Trait for anything that occupies a box in the world.
///
/// # Example
///
/// ```rust,ignore
/// impl Collidable for Enemy {
///     fn bounds(&self) -> Rect {
///         self.body.rect()
///     }
/// }
/// ```
pub trait Collidable {
    /// Returns the axis-aligned bounding box for this object.
    fn bounds(&self) -> Rect;

    fn collides_with(&self, other: &impl Collidable) -> bool
    where
        Self: Sized,
    {
        aabb_intersect(&self.bounds(), &other.bounds())
    }
}

impl Collidable for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}
