//! # trellis
//!
//! A retained-mode widget toolkit: widgets styled by a small CSS subset,
//! laid out by proportional box layouts, and driven by a frame loop.
//!
//! Each frame the [`app::WindowManager`] clears its surface, fetches one event
//! batch, paints every visible top-level widget and hands it the batch, then
//! paints the menu bar, presents and polls its timers. Drawing goes through
//! the [`render::Surface`] capability; a crossterm terminal backend and a
//! headless recorder are included.
//!
//! ## Core Systems
//!
//! - **[`css`]**: colors, style records, the stylesheet tokenizer and parser, selector overlays
//! - **[`image`]**: decoded bitmaps and pluggable image sources for `url(...)`
//! - **[`layout`]**: horizontal, vertical and form layouts over a pure `distribute` function
//! - **[`widget`]**: the `Widget` trait, shared base state, the `Element` sum type
//! - **[`widgets`]**: Label, TextBox, Button, Slider, List, ProgressBar, ImageBox
//! - **[`menu`]**: menu bar, drop-down menus, actions and separators
//! - **[`event`]**: pointer, key, resize and quit events; the event source trait
//! - **[`render`]**: the `Surface` trait and the crossterm backend
//! - **[`timer`]**: interval timers in a slotmap registry
//! - **[`app`]**: window configuration and the frame loop
//! - **[`testing`]**: recording surface, scripted events, Pilot
//! - **[`geometry`]**: Point, Size, Rect, BoundingBox

// Foundation
pub mod geometry;

// Styling
pub mod css;
pub mod image;

// Widget system
pub mod widget;
pub mod widgets;
pub mod layout;
pub mod menu;

// Events and rendering
pub mod event;
pub mod render;

// Application
pub mod timer;
pub mod app;

// Headless harness
pub mod testing;

pub use app::{QuitHandle, WindowConfig, WindowManager};
pub use widget::{Element, Widget};
