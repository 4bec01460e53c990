//! Conversion of argument text into typed values.
//!
//! Binding looks a parameter's [`ValueType`] up in a caller-supplied
//! [`ConverterRegistry`] first and falls back to the built-in converters for
//! the primitive integer types and `String`.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use std::sync::Arc;

use crate::value::{Value, ValueType};

/// Converts the text of one argument into a value.
///
/// Closures of the form `Fn(&str) -> Option<Value>` implement this trait.
pub trait ValueConverter: Send + Sync {
    /// Converts `text`, returning `None` when it is not a valid value.
    fn try_convert(&self, text: &str) -> Option<Value>;
}

impl<F> ValueConverter for F
where
    F: Fn(&str) -> Option<Value> + Send + Sync,
{
    fn try_convert(&self, text: &str) -> Option<Value> {
        self(text)
    }
}

/// Looks up converters by declared parameter type.
pub trait ConverterRegistry {
    /// Returns the converter for `value_type`, if one is registered.
    fn converter_for(&self, value_type: ValueType) -> Option<&dyn ValueConverter>;
}

impl<R: ConverterRegistry + ?Sized> ConverterRegistry for &R {
    fn converter_for(&self, value_type: ValueType) -> Option<&dyn ValueConverter> {
        (**self).converter_for(value_type)
    }
}

impl<R: ConverterRegistry + ?Sized> ConverterRegistry for Arc<R> {
    fn converter_for(&self, value_type: ValueType) -> Option<&dyn ValueConverter> {
        (**self).converter_for(value_type)
    }
}

/// A registry with no converters; only the built-ins apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmptyRegistry;

impl ConverterRegistry for EmptyRegistry {
    fn converter_for(&self, _value_type: ValueType) -> Option<&dyn ValueConverter> {
        None
    }
}

/// A converter backed by a type's [`FromStr`] implementation.
pub struct FromStrConverter<T>(PhantomData<fn() -> T>);

impl<T> FromStrConverter<T> {
    /// The converter value.
    pub const NEW: Self = Self(PhantomData);
}

impl<T> Default for FromStrConverter<T> {
    fn default() -> Self {
        Self::NEW
    }
}

impl<T> fmt::Debug for FromStrConverter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FromStrConverter<{}>", std::any::type_name::<T>())
    }
}

impl<T> ValueConverter for FromStrConverter<T>
where
    T: FromStr + Any + Send + Sync,
{
    fn try_convert(&self, text: &str) -> Option<Value> {
        text.parse::<T>().ok().map(Value::new)
    }
}

/// A type-keyed registry of converters.
///
/// # Example
///
/// ```
/// use parley::{ConverterRegistry, TypeConverterRegistry, ValueType};
///
/// #[derive(Debug, PartialEq)]
/// struct Mention(u64);
///
/// let mut registry = TypeConverterRegistry::new();
/// registry.register(|text: &str| {
///     text.strip_prefix('@')?.parse().ok().map(Mention)
/// });
///
/// let converter = registry
///     .converter_for(ValueType::of::<Mention>())
///     .expect("converter registered");
/// let value = converter.try_convert("@42").expect("valid mention");
/// assert_eq!(value.downcast_ref::<Mention>(), Some(&Mention(42)));
/// ```
#[derive(Default)]
pub struct TypeConverterRegistry {
    converters: HashMap<TypeId, Box<dyn ValueConverter>>,
}

impl TypeConverterRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a typed conversion function for `T`, replacing any earlier
    /// converter for the same type.
    pub fn register<T, F>(&mut self, convert: F) -> &mut Self
    where
        T: Any + Send + Sync,
        F: Fn(&str) -> Option<T> + Send + Sync + 'static,
    {
        self.register_converter(ValueType::of::<T>(), move |text: &str| {
            convert(text).map(Value::new)
        })
    }

    /// Registers `T`'s [`FromStr`] implementation as its converter.
    pub fn register_from_str<T>(&mut self) -> &mut Self
    where
        T: FromStr + Any + Send + Sync,
    {
        self.register_converter(ValueType::of::<T>(), FromStrConverter::<T>::NEW)
    }

    /// Registers an arbitrary converter for `value_type`.
    ///
    /// Binding rejects any value the converter produces that is not of
    /// `value_type`.
    pub fn register_converter(
        &mut self,
        value_type: ValueType,
        converter: impl ValueConverter + 'static,
    ) -> &mut Self {
        self.converters
            .insert(value_type.id(), Box::new(converter));
        self
    }

    /// Returns `true` when a converter is registered for `value_type`.
    #[must_use]
    pub fn contains(&self, value_type: ValueType) -> bool {
        self.converters.contains_key(&value_type.id())
    }

    /// Returns the number of registered converters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.converters.len()
    }

    /// Returns `true` when no converters are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }
}

impl fmt::Debug for TypeConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeConverterRegistry")
            .field("converters", &self.converters.len())
            .finish()
    }
}

impl ConverterRegistry for TypeConverterRegistry {
    fn converter_for(&self, value_type: ValueType) -> Option<&dyn ValueConverter> {
        self.converters
            .get(&value_type.id())
            .map(|converter| converter.as_ref())
    }
}

/// Passes argument text through as an owned `String`.
struct Verbatim;

impl ValueConverter for Verbatim {
    fn try_convert(&self, text: &str) -> Option<Value> {
        Some(Value::new(text.to_owned()))
    }
}

type BuiltinEntry = (fn() -> ValueType, &'static dyn ValueConverter);

const BUILTINS: &[BuiltinEntry] = &[
    (ValueType::of::<String>, &Verbatim),
    (ValueType::of::<i8>, &FromStrConverter::<i8>::NEW),
    (ValueType::of::<i16>, &FromStrConverter::<i16>::NEW),
    (ValueType::of::<i32>, &FromStrConverter::<i32>::NEW),
    (ValueType::of::<i64>, &FromStrConverter::<i64>::NEW),
    (ValueType::of::<i128>, &FromStrConverter::<i128>::NEW),
    (ValueType::of::<isize>, &FromStrConverter::<isize>::NEW),
    (ValueType::of::<u8>, &FromStrConverter::<u8>::NEW),
    (ValueType::of::<u16>, &FromStrConverter::<u16>::NEW),
    (ValueType::of::<u32>, &FromStrConverter::<u32>::NEW),
    (ValueType::of::<u64>, &FromStrConverter::<u64>::NEW),
    (ValueType::of::<u128>, &FromStrConverter::<u128>::NEW),
    (ValueType::of::<usize>, &FromStrConverter::<usize>::NEW),
];

/// Returns the built-in converter for `value_type`, if there is one.
#[must_use]
pub fn builtin_converter(value_type: ValueType) -> Option<&'static dyn ValueConverter> {
    BUILTINS
        .iter()
        .find(|(of, _)| of() == value_type)
        .map(|&(_, converter)| converter)
}
