//! Asking a value whether it is itself a [`Chain`].
//!
//! A payload may happen to be a chain too, as in `Chain<Chain<T>>`. The
//! [`Probe`] trait lets generic code treat both cases uniformly without
//! knowing the concrete payload type.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use crate::Chain;
use crate::InvalidArgument;

/// The capability of being viewed as a `Chain<T>`.
///
/// [`Chain<T>`] answers with itself. Every other type answers `None`, which is
/// the default, so a payload type opts in with an empty impl:
///
/// ```
/// use wrapchain::Probe;
///
/// struct Subject;
///
/// impl Probe<Subject> for Subject { }
///
/// assert!(<Subject as Probe<Subject>>::as_chain(&Subject).is_none());
/// ```

pub trait Probe<T> {
  /// This value as a chain, if it is one.

  fn as_chain(&self) -> Option<&Chain<T>> {
    None
  }
}

impl<T> Probe<T> for Chain<T> {
  #[inline(always)]
  fn as_chain(&self) -> Option<&Chain<T>> {
    Some(self)
  }
}

impl<T, V: Probe<T> + ?Sized> Probe<T> for &V {
  #[inline(always)]
  fn as_chain(&self) -> Option<&Chain<T>> {
    (**self).as_chain()
  }
}

impl<T, V: Probe<T> + ?Sized> Probe<T> for Box<V> {
  #[inline(always)]
  fn as_chain(&self) -> Option<&Chain<T>> {
    (**self).as_chain()
  }
}

impl<T, V: Probe<T> + ?Sized> Probe<T> for Rc<V> {
  #[inline(always)]
  fn as_chain(&self) -> Option<&Chain<T>> {
    (**self).as_chain()
  }
}

impl<T, V: Probe<T> + ?Sized> Probe<T> for Arc<V> {
  #[inline(always)]
  fn as_chain(&self) -> Option<&Chain<T>> {
    (**self).as_chain()
  }
}

macro_rules! never_a_chain {
  ($($ty:ty),* $(,)?) => {
    $( impl<T> Probe<T> for $ty { } )*
  };
}

never_a_chain!(
  (), bool, char, str, String,
  u8, u16, u32, u64, u128, usize,
  i8, i16, i32, i64, i128, isize,
  f32, f64,
);

impl<T, U> Probe<T> for [U] { }

impl<T, U> Probe<T> for Vec<U> { }

/// Views `value` as a chain if it is one.
///
/// # Errors
///
/// An error naming `value` is returned if `value` is `None`.

pub fn as_chain<T, V>(value: Option<&V>) -> Result<Option<&Chain<T>>, InvalidArgument>
where
  V: Probe<T> + ?Sized
{
  let Some(value) = value else {
    return Err(InvalidArgument::new("value"));
  };

  Ok(value.as_chain())
}

impl<C> Chain<C> {
  /// The payload of this chain viewed as a chain, if it is one.

  pub fn payload_chain<T>(&self) -> Option<&Chain<T>>
  where
    C: Probe<T>
  {
    <C as Probe<T>>::as_chain(self.payload())
  }
}
