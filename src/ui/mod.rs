//! Terminal front-end and the swipe state machines it drives.

pub mod driver;
pub mod events;
pub mod footer;
pub mod gesture;
pub mod header;
pub mod input;
pub mod layout;
pub mod mvi;
pub mod render;
pub mod runtime;
pub mod terminal;
pub mod theme;
pub mod view;

pub use runtime::run;
