//! Hitpoints for entities
//!
//! # Example
//!
//! ```rust
//! use platformer::health::Health;
//!
//! let mut health = Health::new(3);
//! health.reduce(1);
//! assert_eq!(health.current(), 2);
//! assert!(health.is_alive());
//! ```

/// Represents an entity's hitpoints
///
/// Damage never drives the value below zero; an entity is dead exactly when its
/// current hitpoints reach 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    current: i32,
    max: i32,
}

impl Health {
    /// Creates a new Health instance with full hitpoints
    pub fn new(max: i32) -> Self {
        let max = max.max(0);
        Health { current: max, max }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    /// Removes `amount` hitpoints and returns how many were actually lost
    pub fn reduce(&mut self, amount: i32) -> i32 {
        let old = self.current;
        self.current = (self.current - amount.max(0)).max(0);
        old - self.current
    }

    /// Drops hitpoints straight to zero
    pub fn kill(&mut self) {
        self.current = 0;
    }

    /// Restores full hitpoints
    pub fn restore(&mut self) {
        self.current = self.max;
    }
}

impl Default for Health {
    fn default() -> Self {
        Health::new(1)
    }
}
