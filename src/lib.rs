#![doc = include_str!("../README.md")]
#![no_std]
#![cfg_attr(feature = "allocator_api", feature(allocator_api))]

extern crate alloc;

use alloc::sync::Arc;
use core::fmt;
use core::mem::ManuallyDrop;

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// SUBMODULES                                                                 //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

pub mod probe;

mod layers;

pub use layers::Layers;
pub use probe::Probe;

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// PUBLIC TYPE AND TRAIT DEFINITIONS                                          //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

/// A handle to one node of a wrapper chain.
///
/// A node is either a core node, which holds the payload, or a nested node,
/// which holds exactly one inner node. Every chain ends in a core node.
///
/// Nodes are immutable. Cloning a `Chain` clones the handle, not the node, so
/// the clone is the same node as far as [`Chain::ptr_eq`] and
/// [`Chain::remove`] are concerned. `Chain` intentionally does not implement
/// `PartialEq`; two nodes around the same payload are still different nodes.

pub struct Chain<T>(ManuallyDrop<Arc<Node<T>>>);

/// The error returned when a required argument is absent.
///
/// Use [`parameter`](Self::parameter) to find out which one.

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct InvalidArgument(&'static str);

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// PRIVATE TYPE AND TRAIT DEFINITIONS                                         //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

enum Node<T> {
  Core(Arc<T>),
  Nested(Chain<T>),
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// InvalidArgument                                                            //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl InvalidArgument {
  #[inline(always)]
  pub(crate) const fn new(parameter: &'static str) -> Self {
    Self(parameter)
  }

  /// The name of the parameter that was absent.

  pub fn parameter(&self) -> &'static str {
    self.0
  }
}

impl fmt::Debug for InvalidArgument {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("InvalidArgument").field(&self.0).finish()
  }
}

impl fmt::Display for InvalidArgument {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "invalid argument: {}", self.0)
  }
}

impl core::error::Error for InvalidArgument { }

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Chain                                                                      //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl<T> Chain<T> {
  /// Creates a one-node chain holding the given payload.

  pub fn new(payload: T) -> Self {
    Self::from_shared(Arc::new(payload))
  }

  /// Creates a one-node chain holding an already shared payload.
  ///
  /// The payload is not copied; [`shared_payload`](Self::shared_payload) on the
  /// result is pointer-equal to `payload`.

  pub fn from_shared(payload: Arc<T>) -> Self {
    Self::from_node(Node::Core(payload))
  }

  /// Creates a new outermost node around `inner`.

  pub fn wrap(inner: Chain<T>) -> Self {
    Self::from_node(Node::Nested(inner))
  }

  /// Creates a one-node chain holding the given payload.
  ///
  /// # Errors
  ///
  /// An error naming `payload` is returned if `payload` is `None`.

  pub fn try_new(payload: Option<T>) -> Result<Self, InvalidArgument> {
    let Some(payload) = payload else {
      return Err(InvalidArgument::new("payload"));
    };

    Ok(Self::new(payload))
  }

  /// Creates a new outermost node around `inner`.
  ///
  /// # Errors
  ///
  /// An error naming `inner` is returned if `inner` is `None`.

  pub fn try_wrap(inner: Option<Chain<T>>) -> Result<Self, InvalidArgument> {
    let Some(inner) = inner else {
      return Err(InvalidArgument::new("inner"));
    };

    Ok(Self::wrap(inner))
  }

  /// Creates a new outermost node around this chain.

  pub fn wrapped(&self) -> Self {
    Self::wrap(self.clone())
  }

  /// Returns `true` if both handles refer to the same node.

  #[inline(always)]
  pub fn ptr_eq(this: &Self, other: &Self) -> bool {
    Arc::ptr_eq(&*this.0, &*other.0)
  }

  /// The payload held by the core node at the bottom of the chain.
  ///
  /// This walks the chain, so it takes time proportional to the depth. It
  /// never allocates.

  pub fn payload(&self) -> &T {
    &**self.shared_payload()
  }

  /// The shared pointer to the payload held by the core node at the bottom of
  /// the chain.

  pub fn shared_payload(&self) -> &Arc<T> {
    let mut node = self;

    loop {
      match node.node() {
        Node::Core(payload) => return payload,
        Node::Nested(inner) => node = inner,
      }
    }
  }

  /// The node directly below this one, or `None` for a core node.

  pub fn inner(&self) -> Option<&Chain<T>> {
    match self.node() {
      Node::Core(_) => None,
      Node::Nested(inner) => Some(inner),
    }
  }

  /// Returns `true` for a core node.

  pub fn is_core(&self) -> bool {
    matches!(self.node(), Node::Core(_))
  }

  /// Returns `true` if `target` is one of the nodes of this chain, including
  /// this node itself.

  pub fn contains(&self, target: &Chain<T>) -> bool {
    self.layers().any(|layer| Self::ptr_eq(layer, target))
  }

  /// The outermost node of this chain satisfying `predicate`.

  pub fn find<P>(&self, mut predicate: P) -> Option<&Chain<T>>
  where
    P: FnMut(&Chain<T>) -> bool
  {
    self.layers().find(|layer| predicate(*layer))
  }

  /// Returns this chain with the node `target` spliced out.
  ///
  /// Nodes are matched by identity. The nodes below `target` are kept as they
  /// are; the nodes above it are rebuilt, since nodes are immutable. The
  /// relative order of all remaining nodes is preserved.
  ///
  /// - If `target` is not part of the chain, the chain itself is returned.
  ///
  /// - If `target` is a core node, it is replaced by a fresh core node holding
  ///   the same payload. In particular, removing the only node of a chain
  ///   yields a new one-node chain rather than nothing.

  pub fn remove(&self, target: &Chain<T>) -> Self {
    if Self::ptr_eq(self, target) {
      return self.excise();
    }

    match self.node() {
      Node::Core(_) => self.clone(),
      Node::Nested(inner) => {
        let spliced =
          if Self::ptr_eq(inner, target) {
            inner.excise()
          } else {
            inner.remove(target)
          };

        if Self::ptr_eq(&spliced, inner) {
          self.clone()
        } else {
          Self::wrap(spliced)
        }
      }
    }
  }

  /// Returns this chain with the node `target` spliced out.
  ///
  /// See [`remove`](Self::remove).
  ///
  /// # Errors
  ///
  /// An error naming `target` is returned if `target` is `None`.

  pub fn try_remove(&self, target: Option<&Chain<T>>) -> Result<Self, InvalidArgument> {
    let Some(target) = target else {
      return Err(InvalidArgument::new("target"));
    };

    Ok(self.remove(target))
  }

  #[inline(always)]
  fn from_node(node: Node<T>) -> Self {
    Self(ManuallyDrop::new(Arc::new(node)))
  }

  #[inline(always)]
  fn node(&self) -> &Node<T> {
    &self.0
  }

  #[inline(always)]
  fn into_arc(self) -> Arc<Node<T>> {
    let mut this = ManuallyDrop::new(self);

    // SAFETY: `this` is never dropped, so the `Arc` is moved out exactly once.

    unsafe { ManuallyDrop::take(&mut this.0) }
  }

  // What takes the place of this node once it is removed.

  fn excise(&self) -> Self {
    match self.node() {
      Node::Core(payload) => Self::from_shared(Arc::clone(payload)),
      Node::Nested(inner) => inner.clone(),
    }
  }
}

impl<T> Clone for Chain<T> {
  #[inline(always)]
  fn clone(&self) -> Self {
    Self(ManuallyDrop::new(Arc::clone(&*self.0)))
  }
}

impl<T> Drop for Chain<T> {
  fn drop(&mut self) {
    // NB: Dropping a long chain node by node through the destructors of `Arc`
    // and `Node` would recurse once per layer. Instead, unlink the nodes we
    // own one at a time and stop at the first node that is still shared.

    // SAFETY: `self.0` is not used again after this point.

    let mut next = unsafe { ManuallyDrop::take(&mut self.0) };

    loop {
      let Some(node) = Arc::into_inner(next) else { return };

      match node {
        Node::Core(_) => return,
        Node::Nested(inner) => next = inner.into_arc(),
      }
    }
  }
}

impl<T> AsRef<T> for Chain<T> {
  fn as_ref(&self) -> &T {
    self.payload()
  }
}

impl<T: fmt::Debug> fmt::Debug for Chain<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Chain")
      .field("depth", &self.depth())
      .field("payload", self.payload())
      .finish()
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// TESTS                                                                      //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////
