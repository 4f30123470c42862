// Module exports for models

pub mod color;
pub mod error;
pub mod lane;
pub mod participant;
pub mod settings;
pub mod timed_item;
pub mod window;
pub mod working_hours;

pub use error::CalendarError;
