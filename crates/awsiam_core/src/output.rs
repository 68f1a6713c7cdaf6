//! Deferred values.
//!
//! An [`Output`] is a value the engine produces asynchronously, typically a
//! property of a resource that has been registered but not yet provisioned.
//! Outputs can be passed as inputs to other resources before they resolve,
//! and they remember which resources they depend on so the engine can order
//! its work.
//!
//! Outputs are lazy: nothing is computed until the output (or an output
//! derived from it) is awaited. Once resolved, every clone observes the same
//! result.
//!
//! # Example
//!
//! ```
//! use awsiam_core::output::Output;
//!
//! # futures::executor::block_on(async {
//! let name = Output::resolved("ops".to_string());
//! let arn = name.map(|name| format!("arn:aws:iam::123456789012:policy/{name}"));
//!
//! assert_eq!(arn.await.unwrap(), "arn:aws:iam::123456789012:policy/ops");
//! # });
//! ```

use crate::input::Input;
use crate::urn::ResourceRef;
use core::future::{Future, IntoFuture};
use futures::channel::oneshot;
use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::sync::Arc;

// ─────────────────────────────────────────────────────────────────────────────
// Value
// ─────────────────────────────────────────────────────────────────────────────

/// Marker trait for types that can flow through an [`Output`].
///
/// Any type that is `Clone + Send + Sync + 'static` automatically implements
/// `Value`. Cloning is required because a resolved output is read by every
/// holder of the output.
pub trait Value: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> Value for T {}

// ─────────────────────────────────────────────────────────────────────────────
// OutputError
// ─────────────────────────────────────────────────────────────────────────────

/// Errors observed when an output resolves.
///
/// Resolution errors are shared by every reader of the failed output, so
/// the type is cheap to clone and carries rendered messages instead of
/// source errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OutputError {
    /// A sequence was indexed past its end.
    #[error("index {index} out of range for sequence of length {len}")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The length of the resolved sequence.
        len: usize,
    },

    /// The producer of a pending output went away without resolving it.
    #[error("output was dropped before it resolved")]
    Abandoned,

    /// A resolved value could not be marshalled into its wire form.
    #[error("failed to marshal value: {0}")]
    Marshal(String),

    /// A type-erased output held a value of an unexpected type.
    #[error("type mismatch: expected {expected}")]
    TypeMismatch {
        /// Name of the expected type.
        expected: &'static str,
    },

    /// The engine failed to produce the value.
    #[error("{0}")]
    Failed(String),
}

// ─────────────────────────────────────────────────────────────────────────────
// Output
// ─────────────────────────────────────────────────────────────────────────────

type SharedResult<T> = Shared<BoxFuture<'static, Result<T, OutputError>>>;

/// A value that resolves asynchronously, exactly once.
///
/// See the [module documentation](self) for an overview.
pub struct Output<T: Value> {
    future: SharedResult<T>,
    dependencies: Arc<[ResourceRef]>,
}

impl<T: Value> Clone for Output<T> {
    fn clone(&self) -> Self {
        Self {
            future: self.future.clone(),
            dependencies: Arc::clone(&self.dependencies),
        }
    }
}

impl<T: Value> core::fmt::Debug for Output<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Output")
            .field("element", &core::any::type_name::<T>())
            .field("resolved", &self.future.peek().is_some())
            .field("dependencies", &self.dependencies)
            .finish()
    }
}

impl<T: Value> Output<T> {
    /// Creates an output driven by `future`.
    ///
    /// The future is not polled until the output is awaited.
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = Result<T, OutputError>> + Send + 'static,
    {
        Self::from_parts(future.boxed(), Arc::from([]))
    }

    fn from_parts(
        future: BoxFuture<'static, Result<T, OutputError>>,
        dependencies: Arc<[ResourceRef]>,
    ) -> Self {
        Self {
            future: future.shared(),
            dependencies,
        }
    }

    /// Creates an output that is already known.
    #[must_use]
    pub fn resolved(value: T) -> Self {
        Self::new(futures::future::ready(Ok(value)))
    }

    /// Creates an output that resolves to `error`.
    #[must_use]
    pub fn failed(error: OutputError) -> Self {
        Self::new(futures::future::ready(Err(error)))
    }

    /// Creates an output that resolves when the returned [`Resolver`] is used.
    ///
    /// If the resolver is dropped unused, the output resolves to
    /// [`OutputError::Abandoned`].
    #[must_use]
    pub fn pending() -> (Self, Resolver<T>) {
        let (sender, receiver) = oneshot::channel();
        let output = Self::new(async move {
            receiver
                .await
                .unwrap_or_else(|_canceled| Err(OutputError::Abandoned))
        });
        (output, Resolver { sender })
    }

    /// Records that this output depends on `resource`.
    #[must_use]
    pub fn with_dependency(self, resource: ResourceRef) -> Self {
        if self.dependencies.contains(&resource) {
            return self;
        }
        let mut dependencies = self.dependencies.to_vec();
        dependencies.push(resource);
        Self {
            future: self.future,
            dependencies: dependencies.into(),
        }
    }

    /// Returns the resources this output depends on.
    #[must_use]
    pub fn dependencies(&self) -> &[ResourceRef] {
        &self.dependencies
    }

    /// Returns the result if the output has already been resolved.
    ///
    /// This never drives resolution; it only observes it.
    #[must_use]
    pub fn peek(&self) -> Option<&Result<T, OutputError>> {
        self.future.peek()
    }

    /// Transforms the resolved value.
    #[must_use]
    pub fn map<U, F>(&self, f: F) -> Output<U>
    where
        U: Value,
        F: FnOnce(T) -> U + Send + 'static,
    {
        let future = self.future.clone();
        Output::from_parts(
            async move { future.await.map(f) }.boxed(),
            Arc::clone(&self.dependencies),
        )
    }

    /// Transforms the resolved value with a function that may fail.
    #[must_use]
    pub fn apply<U, F>(&self, f: F) -> Output<U>
    where
        U: Value,
        F: FnOnce(T) -> Result<U, OutputError> + Send + 'static,
    {
        let future = self.future.clone();
        Output::from_parts(
            async move { future.await.and_then(f) }.boxed(),
            Arc::clone(&self.dependencies),
        )
    }

    /// Joins two outputs into an output of both values.
    ///
    /// Fails with the first error observed. Dependencies of both sides are kept.
    #[must_use]
    pub fn zip<U: Value>(&self, other: &Output<U>) -> Output<(T, U)> {
        let (left, right) = (self.future.clone(), other.future.clone());
        Output::from_parts(
            futures::future::try_join(left, right).boxed(),
            merge_dependencies(&self.dependencies, &other.dependencies),
        )
    }

    /// Joins a sequence of outputs into an output of the resolved sequence.
    ///
    /// Element order is preserved.
    #[must_use]
    pub fn all<I>(outputs: I) -> Output<Vec<T>>
    where
        I: IntoIterator<Item = Output<T>>,
    {
        let mut dependencies: Arc<[ResourceRef]> = Arc::from([]);
        let mut parts = Vec::new();
        for output in outputs {
            dependencies = merge_dependencies(&dependencies, &output.dependencies);
            parts.push(output.future);
        }
        Output::from_parts(futures::future::try_join_all(parts).boxed(), dependencies)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Collection access
// ─────────────────────────────────────────────────────────────────────────────

impl<T: Value> Output<Vec<T>> {
    /// Selects the element at `index` once both the sequence and the index resolve.
    ///
    /// An out-of-range index resolves to [`OutputError::IndexOutOfRange`].
    #[must_use]
    pub fn index(&self, index: impl Input<Element = usize>) -> Output<T> {
        self.zip(&index.to_output()).apply(|(items, index)| {
            let len = items.len();
            items
                .into_iter()
                .nth(index)
                .ok_or(OutputError::IndexOutOfRange { index, len })
        })
    }
}

impl<T: Value> Output<HashMap<String, T>> {
    /// Looks up `key` once both the mapping and the key resolve.
    ///
    /// A missing key resolves to `None`.
    #[must_use]
    pub fn map_index(&self, key: impl Input<Element = String>) -> Output<Option<T>> {
        self.zip(&key.to_output())
            .map(|(mut entries, key)| entries.remove(&key))
    }
}

impl<T: Value> IntoFuture for Output<T> {
    type Output = Result<T, OutputError>;
    type IntoFuture = SharedResult<T>;

    fn into_future(self) -> Self::IntoFuture {
        self.future
    }
}

fn merge_dependencies(left: &Arc<[ResourceRef]>, right: &[ResourceRef]) -> Arc<[ResourceRef]> {
    if right.iter().all(|dep| left.contains(dep)) {
        return Arc::clone(left);
    }
    let mut merged = left.to_vec();
    for dep in right {
        if !merged.contains(dep) {
            merged.push(dep.clone());
        }
    }
    merged.into()
}

// ─────────────────────────────────────────────────────────────────────────────
// Resolver
// ─────────────────────────────────────────────────────────────────────────────

/// Completes an output created with [`Output::pending`].
pub struct Resolver<T> {
    sender: oneshot::Sender<Result<T, OutputError>>,
}

impl<T> core::fmt::Debug for Resolver<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Resolver")
            .field("element", &core::any::type_name::<T>())
            .field("canceled", &self.sender.is_canceled())
            .finish()
    }
}

impl<T> Resolver<T> {
    /// Resolves the output with `value`.
    ///
    /// Resolving an output nobody holds any more is a no-op.
    pub fn resolve(self, value: T) {
        let _ = self.sender.send(Ok(value));
    }

    /// Resolves the output with `error`.
    pub fn reject(self, error: OutputError) {
        let _ = self.sender.send(Err(error));
    }
}
