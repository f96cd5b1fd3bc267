// Dragboard Core Library
// Transform & constraint engine for draggable widgets

pub mod board;
pub mod config;
pub mod constraint;
pub mod events;
pub mod geometry;
pub mod gesture;
pub mod pose;
pub mod watch;
pub mod widget;
