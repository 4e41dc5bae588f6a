use std::any::Any;
use std::cell::{Ref, RefMut};
use std::mem;

use crate::component::{Components, InstantiatedComponent};
use crate::context::{Context, ContextStack};
use crate::element::{ElementExt, ElementKey};
use crate::error::{ContextError, Result};
use crate::multimap::AppendOnlyMultimap;
use crate::render::LayoutStyle;
use crate::terminal::Terminal;

/// Handle given to a component during its update: access to the context
/// chain, the terminal, its own layout, and the reconciliation of its
/// children.
pub struct ComponentUpdater<'a, 'c> {
    key: ElementKey,
    context_stack: &'a ContextStack<'c>,
    terminal: &'a mut Terminal,
    children: &'a mut Components,
    layout_style: &'a mut LayoutStyle,
    transparent_layout: bool,
}

impl<'a, 'c> ComponentUpdater<'a, 'c> {
    pub(crate) fn new(
        key: ElementKey,
        context_stack: &'a ContextStack<'c>,
        terminal: &'a mut Terminal,
        children: &'a mut Components,
        layout_style: &'a mut LayoutStyle,
    ) -> Self {
        Self {
            key,
            context_stack,
            terminal,
            children,
            layout_style,
            transparent_layout: false,
        }
    }

    pub fn key(&self) -> &ElementKey {
        &self.key
    }

    pub fn context_stack(&self) -> &'a ContextStack<'c> {
        self.context_stack
    }

    pub fn get_context<T: Any>(&self) -> Result<Ref<'c, T>, ContextError> {
        self.context_stack.get_context()
    }

    pub fn get_context_mut<T: Any>(&self) -> Result<RefMut<'c, T>, ContextError> {
        self.context_stack.get_context_mut()
    }

    pub fn terminal(&mut self) -> &mut Terminal {
        self.terminal
    }

    /// Marks this component as not taking part in layout: it passes its
    /// whole area through to its children.
    pub fn set_transparent_layout(&mut self, transparent: bool) {
        self.transparent_layout = transparent;
    }

    pub(crate) fn has_transparent_layout(&self) -> bool {
        self.transparent_layout
    }

    pub fn set_layout_style(&mut self, layout_style: LayoutStyle) {
        *self.layout_style = layout_style;
    }

    /// Reconciles `elements` against the current children.
    ///
    /// Each element reuses the oldest live child with the same key and
    /// component type, or mounts a new instance. Children not claimed by any
    /// element are dropped once every element has been updated, which
    /// cancels their hooks. When `context` is given it is visible to the
    /// whole subtree for the duration of this call.
    pub fn update_children<I, E>(&mut self, elements: I, context: Option<Context<'_>>) -> Result<()>
    where
        I: IntoIterator<Item = E>,
        E: ElementExt,
    {
        let terminal = &mut *self.terminal;
        let children = &mut *self.children;
        self.context_stack
            .with_context(context, move |context_stack| -> Result<()> {
                let mut used = AppendOnlyMultimap::default();
                for mut element in elements {
                    let key = element.key().clone();
                    let type_id = element.component_type_id();
                    let mut component = match children
                        .components
                        .pop_first_match(&key, |child| child.component_type_id() == type_id)
                    {
                        Some(component) => component,
                        None => {
                            let helper = element.helper();
                            InstantiatedComponent::new(key.clone(), element.props_mut(), helper)?
                        }
                    };
                    component.update(terminal, context_stack, element.props_mut())?;
                    used.push_back(key, component);
                }
                let retired = mem::replace(&mut children.components, used.into());
                if !retired.is_empty() {
                    log::trace!("retiring {} children", retired.len());
                }
                Ok(())
            })
    }
}
