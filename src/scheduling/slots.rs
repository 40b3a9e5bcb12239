use time::{Duration, OffsetDateTime};

use crate::db::models::Booking;

use super::window::Window;

/// Fixed candidate cadence: slots start every 30 minutes from window open.
pub const SLOT_CADENCE_MINUTES: i64 = 30;

/// Half-open interval overlap: `[a1, a2)` and `[b1, b2)` intersect iff
/// `a1 < b2 && b1 < a2`. Touching endpoints do not conflict.
pub fn overlaps(
    a1: OffsetDateTime,
    a2: OffsetDateTime,
    b1: OffsetDateTime,
    b2: OffsetDateTime,
) -> bool {
    a1 < b2 && b1 < a2
}

/// Enumerates bookable start instants inside `window`: ticks every
/// `SLOT_CADENCE_MINUTES` from `window.start`, keeping a tick only when the
/// full service duration fits before `window.end` and the resulting
/// interval overlaps no existing booking. Each tick is tested for fit on
/// its own; the loop always runs to the end of the window.
///
/// Pure function of its inputs: ascending, duplicate-free, deterministic.
pub fn candidate_slots(
    window: &Window,
    duration_minutes: i32,
    existing: &[Booking],
) -> Vec<OffsetDateTime> {
    let cadence = Duration::minutes(SLOT_CADENCE_MINUTES);
    let duration = Duration::minutes(i64::from(duration_minutes));

    let mut slots = Vec::new();
    let mut tick = window.start;
    while tick < window.end {
        let slot_end = tick + duration;
        let fits = slot_end <= window.end;
        let taken = existing
            .iter()
            .any(|booking| overlaps(tick, slot_end, booking.start_time, booking.end_time));
        if fits && !taken {
            slots.push(tick);
        }
        tick += cadence;
    }

    slots
}
