use super::{AnyElement, Element};
use crate::component::Component;

/// Anything that can be appended to a list of children: one element, or an
/// iterable of them (`Option`, `Vec`, iterators).
pub trait ExtendWithElements<T> {
    fn extend_with_elements<E: Extend<T>>(self, dest: &mut E);
}

impl<C, T> ExtendWithElements<T> for Element<C>
where
    C: Component,
    T: From<Element<C>>,
{
    fn extend_with_elements<E: Extend<T>>(self, dest: &mut E) {
        dest.extend([self.into()]);
    }
}

impl ExtendWithElements<AnyElement> for AnyElement {
    fn extend_with_elements<E: Extend<AnyElement>>(self, dest: &mut E) {
        dest.extend([self]);
    }
}

impl<T, U, I> ExtendWithElements<T> for I
where
    T: From<U>,
    I: IntoIterator<Item = U>,
{
    fn extend_with_elements<E: Extend<T>>(self, dest: &mut E) {
        dest.extend(self.into_iter().map(T::from));
    }
}

/// Appends `elements` to `dest`, converting each one on the way.
pub fn extend_with_elements<D, U, T>(dest: &mut D, elements: U)
where
    D: Extend<T>,
    U: ExtendWithElements<T>,
{
    elements.extend_with_elements(dest);
}
