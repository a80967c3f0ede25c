//! The hotel booking dialogs.

mod booking;
mod breakfast;
mod date_resolver;

pub use booking::BookingDialog;
pub use breakfast::BreakfastDialog;
pub use date_resolver::DateResolverDialog;
