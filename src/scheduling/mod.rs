mod scheduler;
mod slots;
mod store;
mod window;

pub use scheduler::{SchedulingError, SlotScheduler};
pub use slots::{candidate_slots, overlaps, SLOT_CADENCE_MINUTES};
pub use store::{PgSchedulerStore, SchedulerStore};
pub use window::{day_bounds, resolve_window, weekday, Window};
