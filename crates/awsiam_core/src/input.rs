//! Values accepted where a resource expects an input.
//!
//! Anything implementing [`Input`] can be converted into an [`Output`] of its
//! element type. Plain values become already-resolved outputs; outputs pass
//! through unchanged; collections of inputs become outputs of collections.
//!
//! Trait objects work too, which is how heterogeneous collections are built:
//!
//! ```
//! use awsiam_core::input::Input;
//! use awsiam_core::output::Output;
//! use std::sync::Arc;
//!
//! let names: Vec<Arc<dyn Input<Element = String>>> = vec![
//!     Arc::new("literal"),
//!     Arc::new(Output::resolved("deferred".to_string())),
//! ];
//!
//! let joined = names.to_output();
//! # assert_eq!(
//! #     futures::executor::block_on(joined.into_future()),
//! #     Ok(vec!["literal".to_string(), "deferred".to_string()])
//! # );
//! ```

use crate::output::{Output, Value};
use core::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

/// Runtime identity of the value an input or output carries.
///
/// Used by the [`TypeRegistry`](crate::registry::TypeRegistry) to find
/// conversions by type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementType {
    type_id: TypeId,
    type_name: &'static str,
}

impl ElementType {
    /// Returns the element type for `T`.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: core::any::type_name::<T>(),
        }
    }

    /// Returns the underlying `TypeId`.
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the type name for debugging.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl core::fmt::Display for ElementType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.type_name)
    }
}

/// A value that can be supplied as a resource input.
///
/// This trait is object safe for a fixed `Element`, so
/// `Arc<dyn Input<Element = T>>` can hold either a plain value or an
/// [`Output`].
///
/// Inputs are `'static`: string literals work directly, but a borrowed
/// `&str` has to be turned into a `String` first.
///
/// ```
/// use awsiam_core::input::Input;
///
/// fn describe(name: &str) -> impl Input<Element = String> + use<> {
///     name.to_string()
/// }
///
/// assert_eq!(describe("ops").element_type(), "literal".element_type());
/// ```
pub trait Input: Send + Sync + 'static {
    /// The type of the resolved value.
    type Element: Value;

    /// Returns the runtime type of the resolved value.
    fn element_type(&self) -> ElementType {
        ElementType::of::<Self::Element>()
    }

    /// Converts this input into a deferred value.
    ///
    /// The conversion itself never blocks; the returned output resolves lazily.
    fn to_output(&self) -> Output<Self::Element>;
}

impl<T: Value> Input for Output<T> {
    type Element = T;

    fn to_output(&self) -> Output<T> {
        self.clone()
    }
}

macro_rules! plain_inputs {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Input for $ty {
                type Element = $ty;

                fn to_output(&self) -> Output<$ty> {
                    Output::resolved(self.clone())
                }
            }
        )*
    };
}

plain_inputs!(String, bool, i64, usize, serde_json::Value);

impl Input for &'static str {
    type Element = String;

    fn to_output(&self) -> Output<String> {
        Output::resolved((*self).to_owned())
    }
}

impl<I: Input> Input for Option<I> {
    type Element = Option<I::Element>;

    fn to_output(&self) -> Output<Self::Element> {
        match self {
            Some(input) => input.to_output().map(Some),
            None => Output::resolved(None),
        }
    }
}

impl<I: Input> Input for Vec<I> {
    type Element = Vec<I::Element>;

    fn to_output(&self) -> Output<Self::Element> {
        Output::all(self.iter().map(Input::to_output))
    }
}

impl<I: Input> Input for HashMap<String, I> {
    type Element = HashMap<String, I::Element>;

    fn to_output(&self) -> Output<Self::Element> {
        let (keys, values): (Vec<String>, Vec<_>) = self
            .iter()
            .map(|(key, input)| (key.clone(), input.to_output()))
            .unzip();
        Output::all(values).map(move |values| keys.into_iter().zip(values).collect())
    }
}

impl<I: Input + ?Sized> Input for Arc<I> {
    type Element = I::Element;

    fn element_type(&self) -> ElementType {
        (**self).element_type()
    }

    fn to_output(&self) -> Output<Self::Element> {
        (**self).to_output()
    }
}
