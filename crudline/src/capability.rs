//! Capability probe.
//!
//! Capabilities are read off the resource's `as_*` accessors every time they
//! are asked for; nothing is cached.

use crate::resource::Resource;
use bitflags::bitflags;

bitflags! {
    /// The optional capabilities a resource exposes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// Abilities are checked against a gate.
        const AUTHORIZABLE = 1;
        /// A form builder is populated on `edit`.
        const FORMERABLE = 1 << 1;
        /// Input is validated before filling.
        const VALIDATABLE = 1 << 2;
    }
}

/// The capabilities a resource currently exposes.
pub fn probe<R: Resource>(resource: &R) -> Capabilities {
    let mut capabilities = Capabilities::empty();
    capabilities.set(
        Capabilities::AUTHORIZABLE,
        resource.as_authorizable().is_some(),
    );
    capabilities.set(Capabilities::FORMERABLE, resource.as_formerable().is_some());
    capabilities.set(
        Capabilities::VALIDATABLE,
        resource.as_validatable().is_some(),
    );
    capabilities
}

/// Check if a resource exposes every capability in `capability`.
pub fn has_capability<R: Resource>(resource: &R, capability: Capabilities) -> bool {
    probe(resource).contains(capability)
}

/// Expose capability traits from inside a `Resource` impl.
///
/// Expands to the matching `as_*` accessors returning `Some(self)`, so the
/// resource fails to compile unless it also implements each named trait.
///
/// ```rust,ignore
/// impl Resource for ArticlesController {
///     type Record = Article;
///
///     fn collection_name(&self) -> &str {
///         "articles"
///     }
///
///     crudline::capabilities!(Authorizable, Validatable);
/// }
/// ```
#[macro_export]
macro_rules! capabilities {
    ($($capability:ident),+ $(,)?) => {
        $( $crate::__capability_accessor!($capability); )+
    };
}

/// One accessor for [`capabilities!`].
#[doc(hidden)]
#[macro_export]
macro_rules! __capability_accessor {
    (Authorizable) => {
        fn as_authorizable(
            &self,
        ) -> ::core::option::Option<&dyn $crate::Authorizable<Self::Record>> {
            ::core::option::Option::Some(self)
        }
    };
    (Formerable) => {
        fn as_formerable(&self) -> ::core::option::Option<&dyn $crate::Formerable<Self::Record>> {
            ::core::option::Option::Some(self)
        }
    };
    (Validatable) => {
        fn as_validatable(
            &self,
        ) -> ::core::option::Option<&dyn $crate::Validatable<Self::Record>> {
            ::core::option::Option::Some(self)
        }
    };
}
