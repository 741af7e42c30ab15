//! One dashboard: grid, provider and dispatcher driven frame by frame.

use tracing::trace;

use crate::config::GridConfig;
use crate::error::GridError;
use crate::grid::GridSystem;
use crate::input::{DispatchOutcome, InputDispatcher, InputEvent};
use crate::provider::DataProvider;
use crate::surface::Surface;

/// Owns the parts of a running dashboard and fixes their per-frame order.
pub struct DashboardSession {
    grid: GridSystem,
    provider: DataProvider,
    dispatcher: InputDispatcher,
}

impl DashboardSession {
    /// Build the grid and attach every cell to the provider.
    pub fn new(config: GridConfig) -> Result<Self, GridError> {
        let grid = GridSystem::with_config(config)?;
        let mut provider = DataProvider::new();
        grid.attach_all(&mut provider);
        Ok(Self {
            grid,
            provider,
            dispatcher: InputDispatcher::new(config.canvas_height),
        })
    }

    /// Run one frame: input, then data, then update, then clear and draw.
    pub fn frame(
        &mut self,
        events: impl IntoIterator<Item = InputEvent>,
        value: Option<i32>,
        surface: &mut dyn Surface,
    ) -> DispatchOutcome {
        let outcome = self.dispatcher.dispatch_all(&self.grid, events);
        if let Some(value) = value {
            let notified = self.provider.set_data(value);
            trace!(value, notified, "frame data");
        }
        self.grid.update();
        surface.clear();
        self.grid.draw(surface);
        outcome
    }

    #[inline]
    pub const fn grid(&self) -> &GridSystem { &self.grid }

    #[inline]
    pub fn grid_mut(&mut self) -> &mut GridSystem { &mut self.grid }

    #[inline]
    pub const fn provider(&self) -> &DataProvider { &self.provider }

    #[inline]
    pub fn provider_mut(&mut self) -> &mut DataProvider { &mut self.provider }

    #[inline]
    pub const fn dispatcher(&self) -> &InputDispatcher { &self.dispatcher }

    #[inline]
    pub fn dispatcher_mut(&mut self) -> &mut InputDispatcher { &mut self.dispatcher }
}

// =============================================================================
// Unit Tests
// =============================================================================
