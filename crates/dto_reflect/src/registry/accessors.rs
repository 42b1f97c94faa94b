use alloc::boxed::Box;

use dto_utils::hash::HashMap;

use crate::Mappable;
use crate::naming;
use crate::value::{CoerceError, FieldRef, FieldValue};

/// Reads a field of a type-erased instance.
///
/// Returns `None` if the instance is not of the expected type.
pub type Getter = for<'a> fn(&'a dyn Mappable) -> Option<FieldRef<'a>>;

/// Writes a field of a type-erased instance.
pub type Setter = fn(&mut dyn Mappable, FieldValue) -> Result<(), CoerceError>;

/// The accessor table of a type.
///
/// Getters and setters are stored under their conventional names
/// (`getFooBar`, `setFooBar`, see [`naming`]); a field has an accessor only if
/// one was inserted under the name derived from it.
///
/// # Examples
///
/// ```
/// use dto_reflect::registry::Accessors;
/// use dto_reflect::value::FieldRef;
///
/// let mut accessors = Accessors::new();
/// accessors.insert_getter("getFooBar", |_| Some(FieldRef::Null));
///
/// assert!(accessors.getter_for("foo_bar").is_some());
/// assert!(accessors.setter_for("foo_bar").is_none());
/// ```
#[derive(Clone, Default)]
pub struct Accessors {
    getters: HashMap<Box<str>, Getter>,
    setters: HashMap<Box<str>, Setter>,
}

impl Accessors {
    /// Creates an empty table.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a getter under `name`, replacing any previous one.
    pub fn insert_getter(&mut self, name: impl Into<Box<str>>, getter: Getter) {
        self.getters.insert(name.into(), getter);
    }

    /// Inserts a setter under `name`, replacing any previous one.
    pub fn insert_setter(&mut self, name: impl Into<Box<str>>, setter: Setter) {
        self.setters.insert(name.into(), setter);
    }

    /// Removes the getter with the given accessor name.
    pub fn remove_getter(&mut self, name: &str) -> Option<Getter> {
        self.getters.remove(name)
    }

    /// Removes the setter with the given accessor name.
    pub fn remove_setter(&mut self, name: &str) -> Option<Setter> {
        self.setters.remove(name)
    }

    /// Inserts the accessors of `field` under their conventional names.
    pub fn with_field(mut self, field: &str, getter: Option<Getter>, setter: Option<Setter>) -> Self {
        if let Some(getter) = getter {
            self.insert_getter(naming::getter_name(field), getter);
        }
        if let Some(setter) = setter {
            self.insert_setter(naming::setter_name(field), setter);
        }
        self
    }

    /// Returns the getter with the given accessor name.
    #[inline]
    pub fn getter(&self, name: &str) -> Option<Getter> {
        self.getters.get(name).copied()
    }

    /// Returns the setter with the given accessor name.
    #[inline]
    pub fn setter(&self, name: &str) -> Option<Setter> {
        self.setters.get(name).copied()
    }

    /// Returns the getter of `field`, looked up as `get` + suffix.
    pub fn getter_for(&self, field: &str) -> Option<Getter> {
        self.getter(&naming::getter_name(field))
    }

    /// Returns the setter of `field`, looked up as `set` + suffix.
    pub fn setter_for(&self, field: &str) -> Option<Setter> {
        self.setter(&naming::setter_name(field))
    }

    /// Returns the number of getters and setters.
    pub fn len(&self) -> usize {
        self.getters.len() + self.setters.len()
    }
}

impl core::fmt::Debug for Accessors {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Accessors")
            .field("getters", &self.getters.keys())
            .field("setters", &self.setters.keys())
            .finish()
    }
}
