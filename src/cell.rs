//! A single addressable grid cell.
//!
//! A [`GridCell`] carries:
//! - immutable geometry (origin and size in bottom-up grid space)
//! - display state: a text label, an `active` flag and the last data value
//! - an owned [`CellStrategy`] that updates and draws it
//! - optional input bindings: one key code with a callback, one mouse callback
//!
//! Cells observe the [`DataProvider`](crate::provider::DataProvider): every
//! delivered value is stored and rendered into the label as `Data: <value>`.
//!
//! # Heapless Label
//!
//! The label is a `heapless::String<CELL_TEXT_LEN>` written with
//! `core::fmt::Write`, so the label itself never allocates.

use alloc::boxed::Box;
use core::fmt::Write;

use heapless::String;
use tracing::debug;

use crate::config::CELL_TEXT_LEN;
use crate::input::KeyCode;
use crate::observer::Observer;
use crate::strategy::{CellStrategy, TriangleStrategy};
use crate::surface::Surface;

/// Zero-argument input callback.
pub type Callback = Box<dyn FnMut()>;

/// A callback lent out of its cell, tagged with the binding generation it was
/// taken under.
pub(crate) struct Lent {
    pub(crate) callback: Callback,
    generation: u32,
}

/// One rectangular region of the grid with its own state and behavior.
pub struct GridCell {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    active: bool,
    text: String<CELL_TEXT_LEN>,
    data: i32,
    strategy: Option<Box<dyn CellStrategy>>,
    key: Option<KeyCode>,
    on_key: Option<Callback>,
    on_mouse: Option<Callback>,
    // Bumped by every set/clear so a lent callback is only restored if its
    // binding was left alone while it ran
    key_generation: u32,
    mouse_generation: u32,
}

impl GridCell {
    /// Create a cell with no strategy, empty text and no bindings.
    pub fn new(
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Self {
        Self {
            x,
            y,
            width,
            height,
            active: false,
            text: String::new(),
            data: 0,
            strategy: None,
            key: None,
            on_key: None,
            on_mouse: None,
            key_generation: 0,
            mouse_generation: 0,
        }
    }

    /// Create a cell already using the baseline [`TriangleStrategy`].
    pub fn with_default_strategy(
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Self {
        let mut cell = Self::new(x, y, width, height);
        cell.strategy = Some(Box::new(TriangleStrategy));
        cell
    }

    // =========================================================================
    // Geometry (immutable)
    // =========================================================================

    #[inline]
    pub const fn x(&self) -> f32 { self.x }

    #[inline]
    pub const fn y(&self) -> f32 { self.y }

    #[inline]
    pub const fn width(&self) -> f32 { self.width }

    #[inline]
    pub const fn height(&self) -> f32 { self.height }

    /// Whether `(px, py)` lies inside the cell, edges included.
    pub fn contains_point(
        &self,
        px: f32,
        py: f32,
    ) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }

    // =========================================================================
    // Display State
    // =========================================================================

    /// Current label.
    #[inline]
    pub fn text(&self) -> &str { self.text.as_str() }

    /// Replace the label, truncating to [`CELL_TEXT_LEN`] characters.
    pub fn set_text(
        &mut self,
        text: &str,
    ) {
        self.text.clear();
        for c in text.chars() {
            if self.text.push(c).is_err() {
                break;
            }
        }
    }

    /// Last value received from the data feed.
    #[inline]
    pub const fn data(&self) -> i32 { self.data }

    #[inline]
    pub const fn is_active(&self) -> bool { self.active }

    #[inline]
    pub fn set_active(
        &mut self,
        active: bool,
    ) {
        self.active = active;
    }

    // =========================================================================
    // Strategy
    // =========================================================================

    /// Replace the owned strategy; the previous one is dropped.
    pub fn set_strategy(
        &mut self,
        strategy: Box<dyn CellStrategy>,
    ) {
        debug!(strategy = strategy.name(), "cell strategy replaced");
        self.strategy = Some(strategy);
    }

    /// Drop the owned strategy; update and draw become no-ops.
    pub fn clear_strategy(&mut self) { self.strategy = None; }

    /// Strategy currently owned, if any.
    pub fn strategy(&self) -> Option<&dyn CellStrategy> { self.strategy.as_deref() }

    /// Run the strategy's update hook.
    ///
    /// The strategy is moved out for the duration of the call so it can receive
    /// the cell mutably. If it installs a replacement meanwhile, the
    /// replacement is kept.
    pub fn update(&mut self) {
        if let Some(strategy) = self.strategy.take() {
            strategy.update(self);
            if self.strategy.is_none() {
                self.strategy = Some(strategy);
            }
        }
    }

    /// Draw the cell through its strategy.
    pub fn draw(
        &self,
        surface: &mut dyn Surface,
    ) {
        if let Some(strategy) = &self.strategy {
            strategy.draw(self, surface);
        }
    }

    // =========================================================================
    // Input Bindings
    // =========================================================================

    /// Bind `callback` to `key`, replacing any previous key binding.
    pub fn set_key_callback(
        &mut self,
        key: KeyCode,
        callback: impl FnMut() + 'static,
    ) {
        self.key = Some(key);
        self.on_key = Some(Box::new(callback));
        self.key_generation = self.key_generation.wrapping_add(1);
    }

    /// Bind `callback` to primary mouse clicks, replacing any previous one.
    pub fn set_mouse_callback(
        &mut self,
        callback: impl FnMut() + 'static,
    ) {
        self.on_mouse = Some(Box::new(callback));
        self.mouse_generation = self.mouse_generation.wrapping_add(1);
    }

    pub fn clear_key_callback(&mut self) {
        self.key = None;
        self.on_key = None;
        self.key_generation = self.key_generation.wrapping_add(1);
    }

    pub fn clear_mouse_callback(&mut self) {
        self.on_mouse = None;
        self.mouse_generation = self.mouse_generation.wrapping_add(1);
    }

    /// Key code the key callback is bound to.
    #[inline]
    pub const fn key(&self) -> Option<KeyCode> { self.key }

    /// Whether a key callback for `key` is bound.
    pub fn responds_to_key(
        &self,
        key: KeyCode,
    ) -> bool {
        self.key == Some(key) && self.on_key.is_some()
    }

    #[inline]
    pub const fn has_mouse_callback(&self) -> bool { self.on_mouse.is_some() }

    // Callbacks are lent out while they run so they may borrow their own cell.
    // A set or clear issued meanwhile wins over the lent callback.

    pub(crate) fn take_key_callback(&mut self) -> Option<Lent> {
        let callback = self.on_key.take()?;
        Some(Lent {
            callback,
            generation: self.key_generation,
        })
    }

    pub(crate) fn restore_key_callback(
        &mut self,
        lent: Lent,
    ) {
        if lent.generation == self.key_generation {
            self.on_key = Some(lent.callback);
        }
    }

    pub(crate) fn take_mouse_callback(&mut self) -> Option<Lent> {
        let callback = self.on_mouse.take()?;
        Some(Lent {
            callback,
            generation: self.mouse_generation,
        })
    }

    pub(crate) fn restore_mouse_callback(
        &mut self,
        lent: Lent,
    ) {
        if lent.generation == self.mouse_generation {
            self.on_mouse = Some(lent.callback);
        }
    }
}

impl Observer for GridCell {
    fn on_data_updated(
        &mut self,
        value: i32,
    ) {
        self.data = value;
        self.text.clear();
        // Cannot overflow: the longest i32 label is 17 characters
        write!(self.text, "Data: {value}").ok();
    }
}

impl core::fmt::Debug for GridCell {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("GridCell")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("active", &self.active)
            .field("text", &self.text.as_str())
            .field("data", &self.data)
            .field("strategy", &self.strategy.as_ref().map(|s| s.name()))
            .field("key", &self.key)
            .field("has_key_callback", &self.on_key.is_some())
            .field("has_mouse_callback", &self.on_mouse.is_some())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
