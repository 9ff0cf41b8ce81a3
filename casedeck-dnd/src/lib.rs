//! Drop-target geometry and collision resolution for the task board
//!
//! This crate provides the pure spatial layer used while a card is being
//! dragged: axis-aligned rectangles, pointer math, and a resolver that turns a
//! pointer position plus a set of registered drop regions into the single
//! region the drop would land on.
//!
//! ## Overview
//!
//! - **Pure functions** - No interior state, no I/O, no async
//! - **Generic keys** - Regions carry an arbitrary key type, so callers attach
//!   their own drop-target identifiers
//! - **Two-phase resolution** - Exact regions (pointer must be inside) are
//!   checked before proximity regions (nearest corner wins)
//!
//! ## Basic Usage
//!
//! ```rust
//! use casedeck_dnd::{resolve, Point, Rect, Region};
//!
//! let regions = vec![
//!     Region::new("todo-column", Rect::new(0.0, 0.0, 300.0, 800.0)),
//!     Region::new("done-column", Rect::new(320.0, 0.0, 300.0, 800.0)),
//!     Region::exact("archive", Rect::new(640.0, 0.0, 120.0, 120.0)),
//! ];
//!
//! // Pointer inside the first column resolves to it.
//! let hit = resolve(Point::new(150.0, 400.0), &regions);
//! assert_eq!(hit, Some(&"todo-column"));
//!
//! // The archive region only matches when the pointer is inside it.
//! let hit = resolve(Point::new(700.0, 60.0), &regions);
//! assert_eq!(hit, Some(&"archive"));
//! ```

mod collision;
mod geometry;

pub use collision::{resolve, Region};
pub use geometry::{Point, Rect};
