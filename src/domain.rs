pub mod activities;
pub mod advice;
pub mod alerts;
pub mod details;
pub mod events;
pub mod geo;
pub mod sun;
pub mod timefmt;
pub mod weather;
