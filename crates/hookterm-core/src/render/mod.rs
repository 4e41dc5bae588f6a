//! Update, layout, and paint passes over the instance tree.
//!
//! [`Tree`] owns the root instance. Each render runs an update pass that
//! reconciles declared children against live instances, then a draw pass
//! that lays out and paints the tree into one terminal frame.
//! [`render_loop`] repeats that whenever a hook, a component, or terminal
//! input reports a change.

mod drawer;
mod layout_style;
mod tree;
mod updater;

pub use drawer::ComponentDrawer;
pub use layout_style::LayoutStyle;
pub use tree::{render_loop, Tree};
pub use updater::ComponentUpdater;
