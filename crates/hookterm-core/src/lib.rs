#![doc = r"Core runtime pieces for hook-driven terminal user interfaces."]

extern crate self as hookterm_core;

pub mod component;
pub mod components;
pub mod context;
pub mod element;
pub mod error;
mod handler;
pub mod hash;
pub mod hooks;
mod multimap;
pub mod props;
pub mod render;
pub mod terminal;

pub use component::{AnyComponent, Component, Components, InstantiatedComponent};
pub use context::{Context, ContextStack, SystemContext};
pub use element::{
    extend_with_elements, AnyElement, Element, ElementExt, ElementKey, ExtendWithElements,
};
pub use error::{ContextError, Error, Result};
pub use handler::Handler;
pub use hooks::{
    ExitHandle, Hook, Hooks, InsertBeforeHandler, State, StateMutRef, StateRef, UseContext,
    UseEffect, UseEvents, UseExit, UseFuture, UseInsertBefore, UseMemo, UseState,
};
pub use props::{AnyProps, NoProps, Props};
pub use render::{render_loop, ComponentDrawer, ComponentUpdater, LayoutStyle, Tree};
pub use terminal::{Terminal, TerminalEvents, TerminalImpl};

pub use crossterm;
pub use ratatui;

pub mod prelude {
    pub use crate::components::*;
    pub use crate::hooks::{
        UseContext, UseEffect, UseEvents, UseExit, UseFuture, UseInsertBefore, UseMemo, UseState,
    };
    pub use crate::{
        AnyElement, Component, ComponentDrawer, ComponentUpdater, Context, Element, ElementExt,
        ElementKey, ExitHandle, Handler, Hooks, InsertBeforeHandler, LayoutStyle, NoProps, Props,
        State, SystemContext,
    };
}
