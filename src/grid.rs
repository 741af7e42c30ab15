//! Row-major composite of grid cells.
//!
//! [`GridSystem`] eagerly builds `rows x cols` cells that tile the canvas and
//! drives them in bulk: [`update`](GridSystem::update) and
//! [`draw`](GridSystem::draw) visit every cell in stored order.
//!
//! # Layout
//!
//! Cell `(row, col)` lives at index `row * cols + col`. Row 0 is the bottom row
//! (grid space is bottom-up), column 0 the leftmost. For the default 4x4 grid on
//! an 800x600 canvas:
//!
//! ```text
//!   row 3:  12 | 13 | 14 | 15     y = 450..600
//!   row 2:   8 |  9 | 10 | 11     y = 300..450
//!   row 1:   4 |  5 |  6 |  7     y = 150..300
//!   row 0:   0 |  1 |  2 |  3     y =   0..150
//! ```
//!
//! # Structural Mutation
//!
//! [`add_cell`](GridSystem::add_cell) and [`remove_cell`](GridSystem::remove_cell)
//! edit the backing sequence directly and can break the dense layout above.
//! [`get_cell`](GridSystem::get_cell) keeps addressing positionally
//! (`row * cols + col` into whatever the sequence holds now) and returns `None`
//! instead of indexing past its end.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use tracing::{debug, warn};

use crate::cell::GridCell;
use crate::config::GridConfig;
use crate::error::GridError;
use crate::input::StrategyFactory;
use crate::provider::DataProvider;
use crate::surface::Surface;

/// Shared handle to a cell owned by a grid.
pub type CellHandle = Rc<RefCell<GridCell>>;

/// Rectangular owner of all dashboard cells.
pub struct GridSystem {
    cells: Vec<CellHandle>,
    rows: usize,
    cols: usize,
    cell_width: f32,
    cell_height: f32,
}

impl GridSystem {
    /// Build a `rows x cols` grid on the default canvas.
    pub fn new(
        rows: usize,
        cols: usize,
    ) -> Result<Self, GridError> {
        Self::with_config(GridConfig::new(rows, cols))
    }

    /// Build a grid from a full configuration.
    pub fn with_config(config: GridConfig) -> Result<Self, GridError> {
        config.validate()?;
        let mut grid = Self {
            cells: Vec::with_capacity(config.rows * config.cols),
            rows: config.rows,
            cols: config.cols,
            cell_width: config.cell_width(),
            cell_height: config.cell_height(),
        };
        grid.create_cells();
        debug!(rows = grid.rows, cols = grid.cols, "grid created");
        Ok(grid)
    }

    fn create_cells(&mut self) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let x = col as f32 * self.cell_width;
                let y = row as f32 * self.cell_height;
                let cell = GridCell::with_default_strategy(x, y, self.cell_width, self.cell_height);
                self.cells.push(Rc::new(RefCell::new(cell)));
            }
        }
    }

    // =========================================================================
    // Bulk Operations
    // =========================================================================

    /// Run every cell's strategy update, in stored order.
    pub fn update(&self) {
        for (index, cell) in self.cells.iter().enumerate() {
            match cell.try_borrow_mut() {
                Ok(mut cell) => cell.update(),
                Err(_) => warn!(index, "cell busy during update, skipped"),
            }
        }
    }

    /// Draw every cell onto `surface`, in stored order.
    pub fn draw(
        &self,
        surface: &mut dyn Surface,
    ) {
        for (index, cell) in self.cells.iter().enumerate() {
            match cell.try_borrow() {
                Ok(cell) => cell.draw(surface),
                Err(_) => warn!(index, "cell busy during draw, skipped"),
            }
        }
    }

    /// Attach every cell to `provider`.
    pub fn attach_all(
        &self,
        provider: &mut DataProvider,
    ) {
        for cell in &self.cells {
            provider.attach(cell);
        }
    }

    /// Give every cell in `row` a fresh strategy from `factory`.
    ///
    /// Returns how many cells were restyled (0 for an out-of-range row).
    pub fn set_row_strategy(
        &self,
        row: usize,
        factory: StrategyFactory,
    ) -> usize {
        let mut restyled = 0;
        for col in 0..self.cols {
            let Some(cell) = self.get_cell(row, col) else { continue };
            match cell.try_borrow_mut() {
                Ok(mut cell) => {
                    cell.set_strategy(factory());
                    restyled += 1;
                }
                Err(_) => warn!(row, col, "cell busy during restyle, skipped"),
            }
        }
        restyled
    }

    // =========================================================================
    // Structural Mutation
    // =========================================================================

    /// Append `cell` to the backing sequence.
    pub fn add_cell(
        &mut self,
        cell: CellHandle,
    ) {
        self.cells.push(cell);
        debug!(len = self.cells.len(), "cell added");
    }

    /// Remove every reference to `cell` (compared by identity).
    ///
    /// Returns how many entries were removed.
    pub fn remove_cell(
        &mut self,
        cell: &CellHandle,
    ) -> usize {
        let before = self.cells.len();
        self.cells.retain(|c| !Rc::ptr_eq(c, cell));
        let removed = before - self.cells.len();
        debug!(removed, len = self.cells.len(), "cell removed");
        removed
    }

    // =========================================================================
    // Addressing
    // =========================================================================

    /// Cell at `(row, col)`, or `None` when out of range.
    pub fn get_cell(
        &self,
        row: usize,
        col: usize,
    ) -> Option<CellHandle> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col).cloned()
    }

    /// All cells in stored order.
    #[inline]
    pub fn cells(&self) -> &[CellHandle] { &self.cells }

    /// Number of cells currently stored.
    #[inline]
    pub fn len(&self) -> usize { self.cells.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.cells.is_empty() }

    #[inline]
    pub const fn rows(&self) -> usize { self.rows }

    #[inline]
    pub const fn cols(&self) -> usize { self.cols }

    #[inline]
    pub const fn cell_width(&self) -> f32 { self.cell_width }

    #[inline]
    pub const fn cell_height(&self) -> f32 { self.cell_height }
}

// =============================================================================
// Unit Tests
// =============================================================================
