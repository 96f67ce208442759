//! Schedule domain module

mod time_of_day;
mod weekly;

pub use time_of_day::TimeOfDay;
pub use weekly::{
    weekday_name, TriggerKind, WeeklySchedule, WeeklyTrigger, DEFAULT_TIMEZONE, DEFAULT_WEEKDAY,
};
