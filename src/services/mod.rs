pub mod countdown;
pub mod effects;
pub mod rsvp;
pub mod surface;
