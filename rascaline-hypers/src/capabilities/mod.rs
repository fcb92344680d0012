//! The capability model: the different families of functions (smoothing,
//! density scaling, atomic density, expansion basis and radial basis) that
//! can be used to configure a calculator.
//!
//! Each family comes in two flavors:
//!
//! - a closed enum of variants (`SmoothingVariant`, `AtomicDensityVariant`,
//!   ...), with one `Custom` catch-all. These enums can be parsed from plain
//!   JSON mappings with a `"type"` tag;
//! - a trait (`SmoothingFunction`, `AtomicDensity`, ...) implemented by the
//!   corresponding native structs, and which users can implement for their
//!   own types. Trait objects are classified into the enum variants by
//!   comparing their concrete type with the native structs.

use std::any::Any;

pub mod cutoff;
pub mod density;
pub mod basis;

/// Super-trait of all capability traits, giving access to the concrete type
/// of a capability trait object. This is implemented for all `'static`
/// types, and should not be implemented manually.
pub trait CapabilityObject: Any {
    /// Get `self` as `Any`, to be able to downcast to concrete types
    fn as_any(&self) -> &dyn Any;

    /// Get the full name of the concrete type of `self`
    fn type_name(&self) -> &'static str;
}

impl<T: Any> CapabilityObject for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Remove the module path from a type name, i.e. transform
/// `my_crate::module::MyType<other::Type>` into `MyType`.
pub(crate) fn short_type_name(name: &str) -> &str {
    let name = match name.find('<') {
        Some(generic_start) => &name[..generic_start],
        None => name,
    };

    match name.rfind("::") {
        Some(separator) => &name[separator + 2..],
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names() {
        assert_eq!(short_type_name("MyType"), "MyType");
        assert_eq!(short_type_name("my_crate::module::MyType"), "MyType");
        assert_eq!(short_type_name("my_crate::MyType<other::Type>"), "MyType");
    }

    #[derive(Debug)]
    struct Local;

    #[test]
    fn capability_object() {
        let boxed: Box<dyn CapabilityObject> = Box::new(Local);
        assert!((*boxed).as_any().is::<Local>());
        assert_eq!(short_type_name((*boxed).type_name()), "Local");
    }
}
