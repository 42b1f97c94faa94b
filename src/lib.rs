#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use dto_reflect as reflect;
pub use dto_utils as utils;

pub use dto_reflect::derive::{Mappable, impl_auto_register};
pub use dto_reflect::{IntrospectionError, MappableExt, Mapper, Mapping};
