use allocator_api2::alloc::Allocator;
use allocator_api2::alloc::Global;
use allocator_api2::vec::Vec;
use core::fmt;
use core::iter::FusedIterator;
use crate::Chain;

/// An iterator over the nodes of a chain, outermost first.
///
/// The last item is always the core node.

pub struct Layers<'a, T>(Option<&'a Chain<T>>);

impl<'a, T> Iterator for Layers<'a, T> {
  type Item = &'a Chain<T>;

  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    let layer = self.0?;
    self.0 = layer.inner();
    Some(layer)
  }
}

impl<'a, T> FusedIterator for Layers<'a, T> { }

impl<'a, T> Clone for Layers<'a, T> {
  fn clone(&self) -> Self {
    Layers(self.0)
  }
}

impl<'a, T> fmt::Debug for Layers<'a, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("Layers").finish()
  }
}

impl<'a, T> IntoIterator for &'a Chain<T> {
  type Item = &'a Chain<T>;
  type IntoIter = Layers<'a, T>;

  fn into_iter(self) -> Self::IntoIter {
    self.layers()
  }
}

impl<T> Chain<T> {
  /// An iterator over the nodes of this chain, starting with this node and
  /// ending with the core node.

  pub fn layers(&self) -> Layers<'_, T> {
    Layers(Some(self))
  }

  /// The number of nodes in this chain. A core node alone has depth one.

  pub fn depth(&self) -> usize {
    self.layers().count()
  }

  /// Collects handles to the nodes of this chain, outermost first, into a
  /// vector backed by the given allocator.
  ///
  /// # Panics
  ///
  /// Panics on failure to allocate memory.

  pub fn layers_in<A: Allocator>(&self, allocator: A) -> Vec<Chain<T>, A> {
    let mut layers = Vec::with_capacity_in(self.depth(), allocator);
    layers.extend(self.layers().cloned());
    layers
  }

  /// Collects handles to the nodes of this chain, outermost first, into a
  /// vector backed by the global allocator.
  ///
  /// # Panics
  ///
  /// Panics on failure to allocate memory.

  pub fn collect_layers(&self) -> Vec<Chain<T>> {
    self.layers_in(Global)
  }
}
