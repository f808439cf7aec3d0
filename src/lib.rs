pub mod calendar;
pub mod catalog;
pub mod limits;
pub mod model;
pub mod notify;
pub mod observability;
pub mod presets;
pub mod store;
