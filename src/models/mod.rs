pub mod countdown;
pub mod feedback;
pub mod form;
pub mod gallery;
pub mod guests;
pub mod payload;
