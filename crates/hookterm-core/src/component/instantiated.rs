use std::any::TypeId;
use std::future::poll_fn;
use std::pin::Pin;
use std::task::{Context, Poll};

use ratatui::layout::Constraint;

use super::{AnyComponent, ComponentHelperExt};
use crate::context::ContextStack;
use crate::element::ElementKey;
use crate::error::Result;
use crate::hooks::{AnyHook, Hook, Hooks};
use crate::multimap::RemoveOnlyMultimap;
use crate::props::AnyProps;
use crate::render::{ComponentDrawer, ComponentUpdater, LayoutStyle};
use crate::terminal::Terminal;

/// The children of one instance, keyed for reconciliation.
#[derive(Default)]
pub struct Components {
    pub(crate) components: RemoveOnlyMultimap<ElementKey, InstantiatedComponent>,
}

impl Components {
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InstantiatedComponent> {
        self.components.iter()
    }

    /// Width and height constraint of every child, in declaration order.
    pub fn size_constraints(&self) -> Vec<(Constraint, Constraint)> {
        self.iter()
            .map(|child| {
                let style = child.layout_style();
                (style.width, style.height)
            })
            .collect()
    }

    fn poll_change(&mut self, cx: &mut Context<'_>) -> Poll<()> {
        let mut is_ready = false;
        for component in self.components.iter_mut() {
            if Pin::new(component).poll_change(cx).is_ready() {
                is_ready = true;
            }
        }
        if is_ready {
            Poll::Ready(())
        } else {
            Poll::Pending
        }
    }
}

/// A live node of the instance tree: one component value, its hook slots,
/// and its reconciled children.
pub struct InstantiatedComponent {
    key: ElementKey,
    component_type: TypeId,
    hooks: Vec<Box<dyn AnyHook>>,
    component: Box<dyn AnyComponent>,
    helper: Box<dyn ComponentHelperExt>,
    children: Components,
    first_update: bool,
    hooks_used: usize,
    layout_style: LayoutStyle,
    has_transparent_layout: bool,
}

impl InstantiatedComponent {
    pub(crate) fn new(
        key: ElementKey,
        props: AnyProps<'_>,
        helper: Box<dyn ComponentHelperExt>,
    ) -> Result<Self> {
        let component = helper.new_component(props)?;
        log::debug!("mounted {} at {:?}", helper.component_name(), key);
        Ok(Self {
            key,
            component_type: helper.component_type_id(),
            hooks: Vec::new(),
            component,
            helper,
            children: Components::default(),
            first_update: true,
            hooks_used: 0,
            layout_style: LayoutStyle::default(),
            has_transparent_layout: false,
        })
    }

    pub fn key(&self) -> &ElementKey {
        &self.key
    }

    pub fn component_type_id(&self) -> TypeId {
        self.component_type
    }

    pub fn component_name(&self) -> &'static str {
        self.helper.component_name()
    }

    pub fn children(&self) -> &Components {
        &self.children
    }

    pub fn layout_style(&self) -> &LayoutStyle {
        &self.layout_style
    }

    pub(crate) fn update(
        &mut self,
        terminal: &mut Terminal,
        context_stack: &ContextStack<'_>,
        props: AnyProps<'_>,
    ) -> Result<()> {
        let mut updater = ComponentUpdater::new(
            self.key.clone(),
            context_stack,
            terminal,
            &mut self.children,
            &mut self.layout_style,
        );
        self.hooks.pre_component_update(&mut updater);
        let result = self.component.update(
            props,
            Hooks::new(&mut self.hooks, self.first_update, context_stack)
                .count_into(&mut self.hooks_used),
            &mut updater,
        );
        result?;
        self.first_update = false;
        debug_assert!(
            self.hooks_used == self.hooks.len(),
            "{} used {} of its {} hook slots; hooks must be called in the same order on every update",
            self.helper.component_name(),
            self.hooks_used,
            self.hooks.len()
        );
        self.hooks.post_component_update(&mut updater);
        self.has_transparent_layout = updater.has_transparent_layout();
        Ok(())
    }

    pub(crate) fn draw(&mut self, drawer: &mut ComponentDrawer<'_, '_>) -> Result<()> {
        let area = if self.has_transparent_layout {
            drawer.area
        } else {
            self.layout_style.inner_area(drawer.area)
        };
        drawer.area = area;

        self.hooks.pre_component_draw(drawer);
        self.component.draw(drawer)?;

        let child_areas =
            self.component
                .calc_children_areas(&self.children, &self.layout_style, area);
        for (child, child_area) in self.children.components.iter_mut().zip(child_areas) {
            drawer.area = child_area;
            child.draw(drawer)?;
        }

        drawer.area = area;
        self.hooks.post_component_draw(drawer);
        Ok(())
    }

    /// Polls the component, every child, and every hook. All of them are
    /// polled even after one reports a change so each registers its waker.
    pub fn poll_change(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let component_status = Pin::new(&mut *self.component).poll_change(cx);
        let children_status = self.children.poll_change(cx);
        let hooks_status = Pin::new(&mut self.hooks).poll_change(cx);
        if component_status.is_ready() || children_status.is_ready() || hooks_status.is_ready() {
            Poll::Ready(())
        } else {
            Poll::Pending
        }
    }

    /// Resolves once anything in this subtree reports a change.
    pub async fn wait(&mut self) {
        let mut this = Pin::new(self);
        poll_fn(|cx| this.as_mut().poll_change(cx)).await
    }
}

impl Drop for InstantiatedComponent {
    fn drop(&mut self) {
        log::debug!("unmounted {} at {:?}", self.helper.component_name(), self.key);
    }
}
