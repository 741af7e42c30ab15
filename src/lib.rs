//! Grid/cell engine for the SkyLink real-time dashboard.
//!
//! This library contains the platform-agnostic core shared by the desktop
//! simulator and any embedded front-end:
//!
//! - [`observer`]: one-to-many notification channel with weak registrations
//! - [`provider`]: the live data feed subject cells attach to
//! - [`cell`]: a single addressable grid cell
//! - [`strategy`]: swappable per-cell update/draw behavior
//! - [`grid`]: the row-major composite owning all cells
//! - [`input`]: key and mouse dispatch against a grid
//! - [`surface`]: the drawing surface contract and its adapters
//! - [`feed`]: data sources that drive the provider
//! - [`session`]: one logical frame (input, data, update, draw)
//! - [`config`]: layout constants and the validated grid configuration
//!
//! # no_std Compatibility
//!
//! Outside of tests the crate is `no_std` and only needs `alloc` (cell handles
//! are `Rc<RefCell<_>>`, strategies and callbacks are boxed).
//!
//! # Testing
//!
//! ```bash
//! cargo test --lib
//! ```

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

extern crate alloc;

pub mod cell;
pub mod colors;
pub mod config;
pub mod error;
pub mod feed;
pub mod grid;
pub mod input;
pub mod observer;
pub mod provider;
pub mod session;
pub mod strategy;
pub mod surface;

// Re-export commonly used items
pub use cell::{Callback, GridCell};
pub use config::GridConfig;
pub use error::GridError;
pub use feed::{DataFeed, SineFeed, UniformFeed};
pub use grid::{CellHandle, GridSystem};
pub use input::{DispatchOutcome, InputDispatcher, InputEvent, KeyAction, KeyCode, MouseButton};
pub use observer::{Observer, Subject};
pub use provider::DataProvider;
pub use session::DashboardSession;
pub use strategy::{BlueTriangleStrategy, CellStrategy, TriangleStrategy};
pub use surface::{DisplaySurface, DrawCommand, RecordingSurface, Surface};
