pub mod booking;
pub mod event;
pub mod schedule;
pub mod show;
pub mod status;
pub mod user;
pub mod venue;

pub use booking::{Booking, SeatSelection, ZoneCounts, ZoneSelection};
pub use event::{Event, EventConfig, ZoneConfig};
pub use schedule::MovieSchedule;
pub use show::{NewShow, Show};
pub use status::{BookingKind, BookingStatus, ListingStatus, PaymentStatus};
pub use user::User;
pub use venue::Venue;
