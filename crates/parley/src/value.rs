//! Type-erased argument values and declared parameter types.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// The declared type of a parameter, used to look up converters.
///
/// Equality compares the underlying [`TypeId`]; the name is kept for
/// diagnostics.
///
/// # Example
///
/// ```
/// use parley::ValueType;
///
/// assert_eq!(ValueType::of::<i32>(), ValueType::of::<i32>());
/// assert_ne!(ValueType::of::<i32>(), ValueType::of::<i64>());
/// assert_eq!(ValueType::of::<u8>().name(), "u8");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ValueType {
    id: TypeId,
    name: &'static str,
}

impl ValueType {
    /// Returns the value type for `T`.
    #[must_use]
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Returns the underlying type identifier.
    #[must_use]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the Rust type name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ValueType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ValueType {}

impl std::hash::Hash for ValueType {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A converted argument or default value of any thread-safe type.
///
/// Cloning is cheap: the payload is shared.
///
/// # Example
///
/// ```
/// use parley::Value;
///
/// let value = Value::new(42_i64);
/// assert_eq!(value.downcast_ref::<i64>(), Some(&42));
/// assert!(value.downcast_ref::<i32>().is_none());
/// ```
#[derive(Clone)]
pub struct Value {
    inner: Arc<dyn Any + Send + Sync>,
    value_type: ValueType,
}

impl Value {
    /// Wraps `value`.
    #[must_use]
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
            value_type: ValueType::of::<T>(),
        }
    }

    /// Returns the type of the wrapped value.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Returns `true` when the wrapped value is a `T`.
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// Returns a reference to the wrapped value if it is a `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Value").field(&self.value_type.name).finish()
    }
}

/// A value bound to one formal parameter.
#[derive(Debug, Clone)]
pub enum Argument {
    /// A fixed, optional or remainder parameter.
    Single(Value),
    /// A variadic parameter; possibly empty.
    Variadic(Vec<Value>),
}

impl Argument {
    /// Returns the bound value of a non-variadic parameter.
    #[must_use]
    pub const fn as_single(&self) -> Option<&Value> {
        match self {
            Self::Single(value) => Some(value),
            Self::Variadic(_) => None,
        }
    }

    /// Returns the bound values of a variadic parameter.
    #[must_use]
    pub fn as_variadic(&self) -> Option<&[Value]> {
        match self {
            Self::Variadic(values) => Some(values),
            Self::Single(_) => None,
        }
    }

    /// Returns the bound value of a non-variadic parameter if it is a `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_single().and_then(Value::downcast_ref)
    }

    /// Collects the values of a variadic parameter if every element is a
    /// `T`.
    #[must_use]
    pub fn collect_variadic<T: Any + Clone>(&self) -> Option<Vec<T>> {
        self.as_variadic()?
            .iter()
            .map(|value| value.downcast_ref::<T>().cloned())
            .collect()
    }
}
