//! Adapter type registry.
//!
//! Generic marshalling code that only holds a `&dyn Any` needs a way to
//! turn it into a deferred value. The [`TypeRegistry`] records, per input
//! type, how to do that, and which output element types exist.
//!
//! The registry is an ordinary value. Applications create one and populate
//! it explicitly during initialization, usually through
//! [`add_plugin`](TypeRegistry::add_plugin):
//!
//! ```
//! use awsiam_core::plugin::Plugin;
//! use awsiam_core::registry::TypeRegistry;
//!
//! struct StringsPlugin;
//!
//! impl Plugin for StringsPlugin {
//!     fn build(&self, registry: &mut TypeRegistry) {
//!         registry.register_input_type::<String>();
//!         registry.register_output_type::<String>();
//!     }
//! }
//!
//! let mut registry = TypeRegistry::new();
//! registry.add_plugin(StringsPlugin);
//! registry.add_plugin(StringsPlugin); // no-op
//!
//! assert_eq!(registry.input_type_count(), 1);
//! ```

use crate::input::{ElementType, Input};
use crate::output::{Output, OutputError, Value};
use crate::plugin::{Plugin, PluginId};
use core::any::{Any, TypeId};
use hashbrown::{HashMap, HashSet};
use std::sync::Arc;

// ─────────────────────────────────────────────────────────────────────────────
// AnyOutput
// ─────────────────────────────────────────────────────────────────────────────

/// A type-erased resolved value.
pub type AnyValue = Arc<dyn Any + Send + Sync>;

type ConvertFn = fn(&(dyn Any + Send + Sync)) -> Option<AnyOutput>;

/// An [`Output`] whose element type is only known at runtime.
#[derive(Debug, Clone)]
pub struct AnyOutput {
    element_type: ElementType,
    output: Output<AnyValue>,
}

impl AnyOutput {
    /// Erases the element type of `output`.
    #[must_use]
    pub fn new<T: Value>(output: &Output<T>) -> Self {
        Self {
            element_type: ElementType::of::<T>(),
            output: output.map(|value| Arc::new(value) as AnyValue),
        }
    }

    /// Returns the runtime element type.
    #[must_use]
    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    /// Returns the erased output.
    #[must_use]
    pub fn as_output(&self) -> &Output<AnyValue> {
        &self.output
    }

    /// Recovers a typed output.
    ///
    /// If `T` is not the element type, the returned output resolves to
    /// [`OutputError::TypeMismatch`].
    #[must_use]
    pub fn downcast<T: Value>(&self) -> Output<T> {
        self.output.apply(|value| {
            (*value)
                .downcast_ref::<T>()
                .cloned()
                .ok_or(OutputError::TypeMismatch {
                    expected: core::any::type_name::<T>(),
                })
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Registry entries
// ─────────────────────────────────────────────────────────────────────────────

/// A registered input type.
#[derive(Debug, Clone, Copy)]
pub struct InputTypeEntry {
    input_type: ElementType,
    element_type: ElementType,
    convert: ConvertFn,
}

impl InputTypeEntry {
    /// Returns the runtime type of the input itself.
    #[must_use]
    pub fn input_type(&self) -> ElementType {
        self.input_type
    }

    /// Returns the element type the input resolves to.
    #[must_use]
    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    /// Converts `value` if it is of this entry's input type.
    #[must_use]
    pub fn convert(&self, value: &(dyn Any + Send + Sync)) -> Option<AnyOutput> {
        (self.convert)(value)
    }
}

/// A registered output type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputTypeEntry {
    output_type: ElementType,
    element_type: ElementType,
}

impl OutputTypeEntry {
    /// Returns the runtime type of the output wrapper.
    #[must_use]
    pub fn output_type(&self) -> ElementType {
        self.output_type
    }

    /// Returns the element type the output resolves to.
    #[must_use]
    pub fn element_type(&self) -> ElementType {
        self.element_type
    }
}

fn convert_input<I: Input>(value: &(dyn Any + Send + Sync)) -> Option<AnyOutput> {
    value
        .downcast_ref::<I>()
        .map(|input| AnyOutput::new(&input.to_output()))
}

// ─────────────────────────────────────────────────────────────────────────────
// TypeRegistry
// ─────────────────────────────────────────────────────────────────────────────

/// Registry of input and output adapter types.
///
/// Registration is idempotent: registering a type or adding a plugin a
/// second time changes nothing.
#[derive(Default)]
pub struct TypeRegistry {
    inputs: HashMap<TypeId, InputTypeEntry>,
    inputs_by_element: HashMap<TypeId, TypeId>,
    outputs: HashMap<TypeId, OutputTypeEntry>,
    plugins: HashSet<PluginId>,
}

impl core::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let inputs: Vec<_> = self.inputs.values().map(|e| e.input_type.type_name()).collect();
        let outputs: Vec<_> = self
            .outputs
            .values()
            .map(|e| e.output_type.type_name())
            .collect();
        let plugins: Vec<_> = self.plugins.iter().map(PluginId::type_name).collect();
        f.debug_struct("TypeRegistry")
            .field("inputs", &inputs)
            .field("outputs", &outputs)
            .field("plugins", &plugins)
            .finish()
    }
}

impl TypeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inputs: HashMap::new(),
            inputs_by_element: HashMap::new(),
            outputs: HashMap::new(),
            plugins: HashSet::new(),
        }
    }

    /// Runs `plugin`'s registrations unless a plugin of the same type was already added.
    ///
    /// Returns `true` if the plugin ran.
    pub fn add_plugin<P: Plugin>(&mut self, plugin: P) -> bool {
        let id = PluginId::of::<P>();
        if !self.plugins.insert(id) {
            tracing::debug!(plugin = plugin.name(), "plugin already added, skipping");
            return false;
        }
        plugin.build(self);
        tracing::debug!(plugin = plugin.name(), "plugin added");
        true
    }

    /// Returns `true` if a plugin of type `P` has been added.
    #[must_use]
    pub fn has_plugin<P: Plugin>(&self) -> bool {
        self.plugins.contains(&PluginId::of::<P>())
    }

    /// Registers the input type `I`.
    ///
    /// Returns `true` if `I` was not registered before.
    pub fn register_input_type<I: Input>(&mut self) -> bool {
        let input_type = ElementType::of::<I>();
        if self.inputs.contains_key(&input_type.type_id()) {
            return false;
        }

        let element_type = ElementType::of::<I::Element>();
        tracing::trace!(input = %input_type, element = %element_type, "registering input type");

        self.inputs.insert(
            input_type.type_id(),
            InputTypeEntry {
                input_type,
                element_type,
                convert: convert_input::<I>,
            },
        );
        self.inputs_by_element
            .entry(element_type.type_id())
            .or_insert(input_type.type_id());
        true
    }

    /// Registers `Output<T>` as an output type.
    ///
    /// Returns `true` if it was not registered before.
    pub fn register_output_type<T: Value>(&mut self) -> bool {
        let element_type = ElementType::of::<T>();
        if self.outputs.contains_key(&element_type.type_id()) {
            return false;
        }

        let output_type = ElementType::of::<Output<T>>();
        tracing::trace!(output = %output_type, "registering output type");

        self.outputs.insert(
            element_type.type_id(),
            OutputTypeEntry {
                output_type,
                element_type,
            },
        );
        true
    }

    /// Returns the entry for the input type with id `type_id`.
    #[must_use]
    pub fn input_type(&self, type_id: TypeId) -> Option<&InputTypeEntry> {
        self.inputs.get(&type_id)
    }

    /// Returns the first input type registered for `element`.
    #[must_use]
    pub fn input_for_element(&self, element: ElementType) -> Option<&InputTypeEntry> {
        self.inputs_by_element
            .get(&element.type_id())
            .and_then(|id| self.inputs.get(id))
    }

    /// Returns the output type resolving to `element`.
    #[must_use]
    pub fn output_type(&self, element: ElementType) -> Option<&OutputTypeEntry> {
        self.outputs.get(&element.type_id())
    }

    /// Converts a value of a registered input type into an erased output.
    ///
    /// Returns `None` if the value's type is not registered.
    #[must_use]
    pub fn to_output(&self, value: &(dyn Any + Send + Sync)) -> Option<AnyOutput> {
        let type_id = (*value).type_id();
        self.inputs.get(&type_id)?.convert(value)
    }

    /// Returns the number of registered input types.
    #[must_use]
    pub fn input_type_count(&self) -> usize {
        self.inputs.len()
    }

    /// Returns the number of registered output types.
    #[must_use]
    pub fn output_type_count(&self) -> usize {
        self.outputs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_registration_is_a_no_op() {
        let mut registry = TypeRegistry::new();

        assert!(registry.register_input_type::<String>());
        assert!(!registry.register_input_type::<String>());
        assert!(registry.register_output_type::<String>());
        assert!(!registry.register_output_type::<String>());

        assert_eq!(registry.input_type_count(), 1);
        assert_eq!(registry.output_type_count(), 1);
    }

    #[test]
    fn lookup_by_element_prefers_first_registration() {
        let mut registry = TypeRegistry::new();
        registry.register_input_type::<String>();
        registry.register_input_type::<&'static str>();

        let entry = registry
            .input_for_element(ElementType::of::<String>())
            .unwrap();
        assert_eq!(entry.input_type(), ElementType::of::<String>());
        assert_eq!(
            registry
                .input_type(TypeId::of::<&'static str>())
                .unwrap()
                .element_type(),
            ElementType::of::<String>()
        );
    }

    #[tokio::test]
    async fn converts_registered_values() {
        let mut registry = TypeRegistry::new();
        registry.register_input_type::<Vec<i64>>();

        let value: Box<dyn Any + Send + Sync> = Box::new(vec![1_i64, 2]);
        let erased = registry.to_output(value.as_ref()).unwrap();

        assert_eq!(erased.element_type(), ElementType::of::<Vec<i64>>());
        assert_eq!(erased.downcast::<Vec<i64>>().await, Ok(vec![1, 2]));
    }

    #[test]
    fn unregistered_values_are_not_converted() {
        let registry = TypeRegistry::new();
        let value: Box<dyn Any + Send + Sync> = Box::new(5_usize);
        assert!(registry.to_output(value.as_ref()).is_none());
    }

    #[tokio::test]
    async fn downcast_to_wrong_type_fails_on_resolution() {
        let erased = AnyOutput::new(&Output::resolved(true));
        assert_eq!(
            erased.downcast::<String>().await,
            Err(OutputError::TypeMismatch {
                expected: core::any::type_name::<String>(),
            })
        );
    }

    #[test]
    fn output_entry_names_wrapper() {
        let mut registry = TypeRegistry::new();
        registry.register_output_type::<bool>();

        let entry = registry.output_type(ElementType::of::<bool>()).unwrap();
        assert_eq!(entry.output_type(), ElementType::of::<Output<bool>>());
        assert_eq!(entry.element_type(), ElementType::of::<bool>());
    }
}
