//! Built-in components.

mod adapter;
pub use adapter::*;

mod context_provider;
pub use context_provider::*;

mod fragment;
pub use fragment::*;

mod view;
pub use view::*;
