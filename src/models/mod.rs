pub mod booking;
pub mod category;
pub mod event;
pub mod stall;
pub mod user;

pub use booking::{BookedStall, Booking, BookingStatus, EventRef, InvoiceRef, PaymentInfo};
pub use category::{Category, CategoryField};
pub use event::{Address, Event, EventDates, EventStatus, StallLayout, Venue};
pub use stall::{Layout, Stall, StallRecord, StallStatus};
pub use user::{BusinessDetails, User, UserRole};
