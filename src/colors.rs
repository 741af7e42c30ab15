//! Color constants for the dashboard grid.
//!
//! The core works in [`Rgb888`]; surfaces convert to whatever their draw target
//! uses (e.g. `Rgb565` on SPI panels) through `From<Rgb888>`.

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

/// Color type used by strategies and the [`Surface`](crate::surface::Surface) contract.
pub type Color = Rgb888;

// =============================================================================
// Standard Colors (from RgbColor trait)
// =============================================================================

/// Pure black. Canvas background.
pub const BLACK: Color = Rgb888::BLACK;

/// Pure white. Cell label text.
pub const WHITE: Color = Rgb888::WHITE;

/// Pure red. Accent of the baseline triangle strategy.
pub const RED: Color = Rgb888::RED;

/// Pure blue. Accent of the alternate triangle strategy.
pub const BLUE: Color = Rgb888::BLUE;

// =============================================================================
// Role Aliases
// =============================================================================

/// Color the canvas is cleared to before each frame.
pub const BACKGROUND: Color = BLACK;

/// Color of the `Data: N` label drawn inside each cell.
pub const LABEL: Color = WHITE;
