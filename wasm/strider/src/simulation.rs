//! Simulation step for the strider walker.

use bevy::prelude::*;

use crate::web_bevy::StriderState;

/// Fixed tick, matching the display rate the walker is tuned for.
pub const DT: f32 = 1.0 / 60.0;

/// Tick the walker once per frame unless paused.
pub fn walker_step(mut state: ResMut<StriderState>) {
    if state.paused {
        return;
    }
    state.step(DT);

    let report = state.last_report;
    if report.flipped {
        log::debug!(
            "flip #{}: {} feet moving",
            state.walker.flips(),
            state.walker.active_count()
        );
    }
}
