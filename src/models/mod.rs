pub mod actor;
pub mod availability;
pub mod booking;
pub mod resource;
pub mod slot;

pub use actor::Actor;
pub use availability::{DayAvailability, DayStatus};
pub use booking::{Booking, BookingStatus};
pub use resource::Resource;
pub use slot::TimeSlot;
