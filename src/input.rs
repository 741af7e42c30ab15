//! Input dispatch from device events to grid cells.
//!
//! Converts raw platform events into callback invocations on the matching
//! cells of a [`GridSystem`]:
//!
//! - **Key press** (not repeat, not release): row shortcuts registered on the
//!   dispatcher run first, then every cell bound to that key fires, in grid
//!   order.
//! - **Primary mouse press**: the device point is flipped into bottom-up grid
//!   space and every cell containing it (edges included) with a mouse callback
//!   fires, in grid order.
//!
//! The dispatcher holds no reference to a global grid; callers pass the grid
//! they want events applied to.
//!
//! # Key Codes
//!
//! [`KeyCode`] uses GLFW numbering: printable keys are their uppercase ASCII
//! code (`A` = 65), special keys start at 256.

use alloc::boxed::Box;
use alloc::vec::Vec;

use tracing::{debug, trace, warn};

use crate::cell::GridCell;
use crate::grid::{CellHandle, GridSystem};
use crate::strategy::CellStrategy;

// =============================================================================
// Event Types
// =============================================================================

/// Platform-independent key identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const SPACE: Self = Self(32);
    pub const A: Self = Self::from_ascii(b'A');
    pub const B: Self = Self::from_ascii(b'B');
    pub const ESCAPE: Self = Self(256);
    pub const ENTER: Self = Self(257);

    /// Key for a printable ASCII character (letters are case-insensitive).
    #[inline]
    pub const fn from_ascii(byte: u8) -> Self { Self(byte.to_ascii_uppercase() as u32) }
}

/// Key transition reported by the platform.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum KeyAction {
    /// Key went down.
    Press,
    /// Key is held and the platform auto-repeated it.
    Repeat,
    /// Key went up.
    Release,
}

/// Mouse button identifier.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MouseButton {
    /// Primary (usually left) button. The only one that triggers cell callbacks.
    Primary,
    Secondary,
    Middle,
}

/// Raw device event.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum InputEvent {
    /// Keyboard transition.
    Key { key: KeyCode, action: KeyAction },
    /// Mouse button transition at a device-space (top-down) position.
    Mouse {
        button: MouseButton,
        pressed: bool,
        x: f32,
        y: f32,
    },
}

/// What a single dispatch did.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct DispatchOutcome {
    /// Cell callbacks invoked.
    pub callbacks_fired: usize,
    /// Cells whose strategy a row shortcut replaced.
    pub cells_restyled: usize,
}

impl DispatchOutcome {
    /// Whether the event had any effect.
    #[inline]
    pub const fn is_empty(&self) -> bool { self.callbacks_fired == 0 && self.cells_restyled == 0 }

    fn merge(
        &mut self,
        other: Self,
    ) {
        self.callbacks_fired += other.callbacks_fired;
        self.cells_restyled += other.cells_restyled;
    }
}

// =============================================================================
// Row Shortcuts
// =============================================================================

/// Builds a fresh strategy for each restyled cell.
pub type StrategyFactory = fn() -> Box<dyn CellStrategy>;

/// Key that restyles a whole row.
#[derive(Clone, Copy)]
struct RowShortcut {
    key: KeyCode,
    row: usize,
    factory: StrategyFactory,
}

// =============================================================================
// Dispatcher
// =============================================================================

/// Routes device events to grid cells.
pub struct InputDispatcher {
    canvas_height: f32,
    shortcuts: Vec<RowShortcut>,
}

impl InputDispatcher {
    /// Create a dispatcher for a canvas of the given height (used to flip y).
    pub const fn new(canvas_height: f32) -> Self {
        Self {
            canvas_height,
            shortcuts: Vec::new(),
        }
    }

    /// Make `key` replace the strategy of every cell in `row`.
    ///
    /// Shortcuts run before per-cell key callbacks, in registration order.
    pub fn bind_row_strategy(
        &mut self,
        key: KeyCode,
        row: usize,
        factory: StrategyFactory,
    ) {
        self.shortcuts.push(RowShortcut { key, row, factory });
    }

    /// Canvas height used for the axis flip.
    #[inline]
    pub const fn canvas_height(&self) -> f32 { self.canvas_height }

    /// Convert a top-down device point into bottom-up grid space.
    #[inline]
    pub fn to_grid_space(
        &self,
        x: f32,
        y: f32,
    ) -> (f32, f32) {
        (x, self.canvas_height - y)
    }

    /// Apply one event to `grid`.
    pub fn dispatch(
        &self,
        grid: &GridSystem,
        event: InputEvent,
    ) -> DispatchOutcome {
        match event {
            InputEvent::Key {
                key,
                action: KeyAction::Press,
            } => self.dispatch_key(grid, key),
            InputEvent::Mouse {
                button: MouseButton::Primary,
                pressed: true,
                x,
                y,
            } => {
                let (gx, gy) = self.to_grid_space(x, y);
                Self::dispatch_click(grid, gx, gy)
            }
            _ => DispatchOutcome::default(),
        }
    }

    /// Apply a batch of events in order.
    pub fn dispatch_all(
        &self,
        grid: &GridSystem,
        events: impl IntoIterator<Item = InputEvent>,
    ) -> DispatchOutcome {
        let mut total = DispatchOutcome::default();
        for event in events {
            total.merge(self.dispatch(grid, event));
        }
        total
    }

    fn dispatch_key(
        &self,
        grid: &GridSystem,
        key: KeyCode,
    ) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();

        for shortcut in self.shortcuts.iter().filter(|s| s.key == key) {
            let restyled = grid.set_row_strategy(shortcut.row, shortcut.factory);
            debug!(key = key.0, row = shortcut.row, restyled, "row shortcut");
            outcome.cells_restyled += restyled;
        }

        for (index, cell) in grid.cells().iter().enumerate() {
            let lent = match cell.try_borrow_mut() {
                Ok(mut c) if c.responds_to_key(key) => c.take_key_callback(),
                Ok(_) => None,
                Err(_) => {
                    warn!(index, "cell busy during key dispatch, skipped");
                    None
                }
            };
            if let Some(mut lent) = lent {
                trace!(index, key = key.0, "key callback");
                (lent.callback)();
                restore(cell, |c| c.restore_key_callback(lent));
                outcome.callbacks_fired += 1;
            }
        }
        outcome
    }

    fn dispatch_click(
        grid: &GridSystem,
        x: f32,
        y: f32,
    ) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();

        for (index, cell) in grid.cells().iter().enumerate() {
            let lent = match cell.try_borrow_mut() {
                Ok(mut c) if c.has_mouse_callback() && c.contains_point(x, y) => c.take_mouse_callback(),
                Ok(_) => None,
                Err(_) => {
                    warn!(index, "cell busy during mouse dispatch, skipped");
                    None
                }
            };
            if let Some(mut lent) = lent {
                trace!(index, x, y, "mouse callback");
                (lent.callback)();
                restore(cell, |c| c.restore_mouse_callback(lent));
                outcome.callbacks_fired += 1;
            }
        }
        outcome
    }
}

/// Hand a lent callback back to its cell.
fn restore(
    cell: &CellHandle,
    put_back: impl FnOnce(&mut GridCell),
) {
    if let Ok(mut c) = cell.try_borrow_mut() {
        put_back(&mut c);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use core::cell::{Cell, RefCell};

    use super::*;
    use crate::colors::{BLUE, RED};
    use crate::config::{CANVAS_HEIGHT, GridConfig};
    use crate::strategy::BlueTriangleStrategy;
    use crate::surface::RecordingSurface;

    fn grid_4x4() -> GridSystem { GridSystem::with_config(GridConfig::default()).unwrap() }

    fn counter() -> (Rc<Cell<u32>>, impl FnMut() + 'static) {
        let hits = Rc::new(Cell::new(0));
        let inner = Rc::clone(&hits);
        (hits, move || inner.set(inner.get() + 1))
    }

    fn press(key: KeyCode) -> InputEvent {
        InputEvent::Key {
            key,
            action: KeyAction::Press,
        }
    }

    fn click(
        x: f32,
        y: f32,
    ) -> InputEvent {
        InputEvent::Mouse {
            button: MouseButton::Primary,
            pressed: true,
            x,
            y,
        }
    }

    fn blue() -> Box<dyn CellStrategy> { Box::new(BlueTriangleStrategy) }

    #[test]
    fn test_key_code_from_ascii() {
        assert_eq!(KeyCode::from_ascii(b'a'), KeyCode(65));
        assert_eq!(KeyCode::from_ascii(b'A'), KeyCode::A);
        assert_eq!(KeyCode::from_ascii(b'7'), KeyCode(55));
    }

    #[test]
    fn test_to_grid_space_flips_y() {
        let dispatcher = InputDispatcher::new(CANVAS_HEIGHT);
        assert_eq!(dispatcher.to_grid_space(150.0, 450.0), (150.0, 150.0));
        assert_eq!(dispatcher.to_grid_space(0.0, 0.0), (0.0, 600.0));
    }

    #[test]
    fn test_key_press_fires_all_matching_cells_in_order() {
        let grid = grid_4x4();
        let order = Rc::new(RefCell::new(Vec::new()));
        for (row, col) in [(2, 3), (0, 1)] {
            let order = Rc::clone(&order);
            grid.get_cell(row, col)
                .unwrap()
                .borrow_mut()
                .set_key_callback(KeyCode::A, move || order.borrow_mut().push((row, col)));
        }
        let (other_hits, other) = counter();
        grid.get_cell(1, 1).unwrap().borrow_mut().set_key_callback(KeyCode::B, other);

        let dispatcher = InputDispatcher::new(CANVAS_HEIGHT);
        let outcome = dispatcher.dispatch(&grid, press(KeyCode::A));

        assert_eq!(outcome.callbacks_fired, 2);
        assert_eq!(*order.borrow(), vec![(0, 1), (2, 3)]);
        assert_eq!(other_hits.get(), 0);
    }

    #[test]
    fn test_repeat_and_release_do_nothing() {
        let grid = grid_4x4();
        let (hits, callback) = counter();
        grid.get_cell(0, 0).unwrap().borrow_mut().set_key_callback(KeyCode::A, callback);
        let mut dispatcher = InputDispatcher::new(CANVAS_HEIGHT);
        dispatcher.bind_row_strategy(KeyCode::A, 1, blue);

        for action in [KeyAction::Repeat, KeyAction::Release] {
            let outcome = dispatcher.dispatch(&grid, InputEvent::Key { key: KeyCode::A, action });
            assert!(outcome.is_empty());
        }
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_callback_survives_dispatch() {
        let grid = grid_4x4();
        let (hits, callback) = counter();
        grid.get_cell(0, 0).unwrap().borrow_mut().set_key_callback(KeyCode::A, callback);
        let dispatcher = InputDispatcher::new(CANVAS_HEIGHT);

        dispatcher.dispatch(&grid, press(KeyCode::A));
        dispatcher.dispatch(&grid, press(KeyCode::A));
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn test_callback_may_borrow_its_own_cell() {
        let grid = grid_4x4();
        let cell = grid.get_cell(3, 3).unwrap();
        let handle = Rc::clone(&cell);
        cell.borrow_mut().set_mouse_callback(move || {
            let mut c = handle.borrow_mut();
            let active = !c.is_active();
            c.set_active(active);
        });
        let dispatcher = InputDispatcher::new(CANVAS_HEIGHT);

        // Device (700, 10) is grid (700, 590): top-right cell
        let outcome = dispatcher.dispatch(&grid, click(700.0, 10.0));
        assert_eq!(outcome.callbacks_fired, 1);
        assert!(cell.borrow().is_active());
        assert!(cell.borrow().has_mouse_callback());
    }

    #[test]
    fn test_mouse_callback_clearing_itself_stays_cleared() {
        let grid = grid_4x4();
        let cell = grid.get_cell(3, 0).unwrap();
        let hits = Rc::new(Cell::new(0));
        let (counter, handle) = (Rc::clone(&hits), Rc::clone(&cell));
        cell.borrow_mut().set_mouse_callback(move || {
            counter.set(counter.get() + 1);
            handle.borrow_mut().clear_mouse_callback();
        });
        let dispatcher = InputDispatcher::new(CANVAS_HEIGHT);

        // Device (10, 10) is grid (10, 590): cell (3, 0)
        dispatcher.dispatch(&grid, click(10.0, 10.0));
        dispatcher.dispatch(&grid, click(10.0, 10.0));
        assert_eq!(hits.get(), 1);
        assert!(!cell.borrow().has_mouse_callback());
    }

    #[test]
    fn test_key_callback_clearing_itself_stays_cleared() {
        let grid = grid_4x4();
        let cell = grid.get_cell(0, 0).unwrap();
        let hits = Rc::new(Cell::new(0));
        let (counter, handle) = (Rc::clone(&hits), Rc::clone(&cell));
        cell.borrow_mut().set_key_callback(KeyCode::A, move || {
            counter.set(counter.get() + 1);
            handle.borrow_mut().clear_key_callback();
        });
        let dispatcher = InputDispatcher::new(CANVAS_HEIGHT);

        dispatcher.dispatch(&grid, press(KeyCode::A));
        dispatcher.dispatch(&grid, press(KeyCode::A));
        assert_eq!(hits.get(), 1);
        assert!(cell.borrow().key().is_none());
        assert!(format!("{:?}", cell.borrow()).contains("has_key_callback: false"));
    }

    #[test]
    fn test_callback_rebinding_itself_keeps_replacement() {
        let grid = grid_4x4();
        let cell = grid.get_cell(0, 0).unwrap();
        let (hits, replacement) = counter();
        let handle = Rc::clone(&cell);
        let mut replacement = Some(replacement);
        cell.borrow_mut().set_mouse_callback(move || {
            if let Some(next) = replacement.take() {
                handle.borrow_mut().set_mouse_callback(next);
            }
        });
        let dispatcher = InputDispatcher::new(CANVAS_HEIGHT);

        dispatcher.dispatch(&grid, click(10.0, 590.0));
        dispatcher.dispatch(&grid, click(10.0, 590.0));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_click_on_shared_edge_fires_only_bound_cell() {
        let grid = grid_4x4();
        let (hits, callback) = counter();
        grid.get_cell(1, 0).unwrap().borrow_mut().set_mouse_callback(callback);
        let dispatcher = InputDispatcher::new(CANVAS_HEIGHT);

        // Device (150, 450) flips to grid (150, 150): edge of (0,0) and (1,0)
        let outcome = dispatcher.dispatch(&grid, click(150.0, 450.0));
        assert_eq!(outcome.callbacks_fired, 1);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_click_on_shared_edge_fires_both_when_both_bound() {
        let grid = grid_4x4();
        let (low_hits, low) = counter();
        let (high_hits, high) = counter();
        grid.get_cell(0, 0).unwrap().borrow_mut().set_mouse_callback(low);
        grid.get_cell(1, 0).unwrap().borrow_mut().set_mouse_callback(high);
        let dispatcher = InputDispatcher::new(CANVAS_HEIGHT);

        let outcome = dispatcher.dispatch(&grid, click(150.0, 450.0));
        assert_eq!(outcome.callbacks_fired, 2);
        assert_eq!((low_hits.get(), high_hits.get()), (1, 1));
    }

    #[test]
    fn test_interior_click_hits_single_cell() {
        let grid = grid_4x4();
        let mut hits = Vec::new();
        for index in 0..grid.len() {
            let (h, callback) = counter();
            grid.cells()[index].borrow_mut().set_mouse_callback(callback);
            hits.push(h);
        }
        let dispatcher = InputDispatcher::new(CANVAS_HEIGHT);

        // Device (100, 375) is grid (100, 225): center of cell (1, 0)
        dispatcher.dispatch(&grid, click(100.0, 375.0));
        let fired: Vec<usize> = hits.iter().enumerate().filter(|(_, h)| h.get() > 0).map(|(i, _)| i).collect();
        assert_eq!(fired, vec![4]);
    }

    #[test]
    fn test_non_primary_and_release_clicks_ignored() {
        let grid = grid_4x4();
        let (hits, callback) = counter();
        grid.get_cell(0, 0).unwrap().borrow_mut().set_mouse_callback(callback);
        let dispatcher = InputDispatcher::new(CANVAS_HEIGHT);

        let events = [
            InputEvent::Mouse {
                button: MouseButton::Secondary,
                pressed: true,
                x: 10.0,
                y: 590.0,
            },
            InputEvent::Mouse {
                button: MouseButton::Primary,
                pressed: false,
                x: 10.0,
                y: 590.0,
            },
        ];
        assert!(dispatcher.dispatch_all(&grid, events).is_empty());
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_row_shortcut_restyles_row_then_fires_callbacks() {
        let grid = grid_4x4();
        let mut provider = crate::provider::DataProvider::new();
        grid.attach_all(&mut provider);
        provider.set_data(8);

        let (hits, callback) = counter();
        grid.get_cell(0, 0).unwrap().borrow_mut().set_key_callback(KeyCode::A, callback);
        let mut dispatcher = InputDispatcher::new(CANVAS_HEIGHT);
        dispatcher.bind_row_strategy(KeyCode::A, 1, blue);

        let outcome = dispatcher.dispatch(&grid, press(KeyCode::A));
        assert_eq!(
            outcome,
            DispatchOutcome {
                callbacks_fired: 1,
                cells_restyled: 4,
            }
        );
        assert_eq!(hits.get(), 1);

        let mut surface = RecordingSurface::new();
        grid.draw(&mut surface);
        let colors = surface.triangle_colors();
        assert_eq!(&colors[0..4], &[RED; 4]);
        assert_eq!(&colors[4..8], &[BLUE; 4]);
        assert_eq!(&colors[8..16], &[RED; 8]);
        // Text untouched by the restyle
        assert_eq!(grid.get_cell(1, 2).unwrap().borrow().text(), "Data: 8");
    }

    #[test]
    fn test_busy_cell_is_skipped() {
        let grid = grid_4x4();
        let (hits, callback) = counter();
        let (other_hits, other) = counter();
        grid.get_cell(0, 0).unwrap().borrow_mut().set_key_callback(KeyCode::A, callback);
        grid.get_cell(0, 1).unwrap().borrow_mut().set_key_callback(KeyCode::A, other);
        let dispatcher = InputDispatcher::new(CANVAS_HEIGHT);

        let busy = grid.get_cell(0, 0).unwrap();
        let _held = busy.borrow_mut();
        let outcome = dispatcher.dispatch(&grid, press(KeyCode::A));
        assert_eq!(outcome.callbacks_fired, 1);
        assert_eq!((hits.get(), other_hits.get()), (0, 1));
    }
}
