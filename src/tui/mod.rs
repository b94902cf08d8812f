pub mod events;
pub mod theme;
