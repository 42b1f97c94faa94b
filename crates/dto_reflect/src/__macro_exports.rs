//! Items used by the code that `dto_reflect_derive` generates.

#[cfg(feature = "auto_register")]
pub mod auto_register {
    use crate::info::{TypeInfo, TypeInfoCell, TypePath, Typed};
    use crate::registry::{GetTypeMeta, TypeMeta, TypeRegistry};

    pub use inventory;

    /// A registration function collected by `inventory`.
    pub struct __AutoRegisterFunc(pub fn(&mut TypeRegistry));

    inventory::collect!(__AutoRegisterFunc);

    /// Provides the registration function of a type.
    pub trait __RegisterType {
        fn __register(registry: &mut TypeRegistry);
    }

    impl<T: GetTypeMeta> __RegisterType for T {
        #[inline]
        fn __register(registry: &mut TypeRegistry) {
            registry.register::<T>();
        }
    }

    /// Submitted along with the user types; if it is registered after
    /// [`__register_types`], static registration works on this platform.
    pub struct __AvailFlag;

    impl TypePath for __AvailFlag {
        fn type_path() -> &'static str {
            "dto_reflect::__macro_exports::auto_register::__AvailFlag"
        }

        fn type_name() -> &'static str {
            "__AvailFlag"
        }
    }

    impl Typed for __AvailFlag {
        fn type_info() -> &'static TypeInfo {
            static CELL: TypeInfoCell = TypeInfoCell::new();
            CELL.get_or_init(|| TypeInfo::new::<Self>(Vec::new()))
        }
    }

    impl GetTypeMeta for __AvailFlag {
        fn get_type_meta() -> TypeMeta {
            TypeMeta::of::<Self>()
        }
    }

    inventory::submit! {
        __AutoRegisterFunc(<__AvailFlag as __RegisterType>::__register)
    }

    /// Runs every collected registration function.
    pub fn __register_types(registry: &mut TypeRegistry) {
        for func in inventory::iter::<__AutoRegisterFunc> {
            (func.0)(registry);
        }
    }
}
