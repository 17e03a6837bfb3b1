//! Type descriptors for the declarative repository model.
//!
//! Each model type describes its own shape (field names, kinds, enum values,
//! numeric bounds, required-ness) through the [`Describe`] trait. The schema
//! builder walks these descriptors; it never inspects the Rust types directly.
//!
//! Enum-like settings implement [`SettingEnum`], which exposes the exact wire
//! values. The same value list feeds both the schema and the importer's
//! coercion of raw API strings, so the two cannot drift apart.

#[cfg(test)]
#[path = "descriptor_tests.rs"]
mod tests;

/// Describes the shape of a model type.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    /// Type name, used as the `$defs` key in the schema
    pub name: &'static str,

    /// Human-readable description of the type
    pub description: Option<&'static str>,

    /// Fields in declaration order
    pub fields: Vec<FieldDescriptor>,
}

impl TypeDescriptor {
    /// Creates a descriptor with the given fields.
    pub fn new(name: &'static str, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name,
            description: None,
            fields,
        }
    }

    /// Attaches a description to the type.
    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    /// Looks up a field by its serialized name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the names of the required fields, in declaration order.
    pub fn required_fields(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name)
            .collect()
    }
}

/// Describes a single field of a model type.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// Serialized field name
    pub name: &'static str,

    /// Shape of the field value
    pub kind: FieldKind,

    /// Whether the field must be present
    pub required: bool,

    /// Human-readable description of the field
    pub description: Option<&'static str>,
}

impl FieldDescriptor {
    /// Creates a field that must be present.
    pub fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            description: None,
        }
    }

    /// Creates a field that may be absent.
    pub fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            description: None,
        }
    }

    /// Attaches a description to the field.
    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }
}

/// The shape of a field value.
#[derive(Debug, Clone)]
pub enum FieldKind {
    String,
    Boolean,
    Integer {
        min: Option<i64>,
        max: Option<i64>,
    },
    /// A string restricted to a fixed set of values.
    Enum(&'static [&'static str]),
    StringList {
        min_items: Option<u64>,
    },
    /// A nested model type, emitted once under `$defs`.
    Object(fn() -> TypeDescriptor),
    ObjectList {
        item: fn() -> TypeDescriptor,
        min_items: Option<u64>,
    },
}

impl FieldKind {
    /// A field holding a nested model type.
    pub fn object<T: Describe>() -> Self {
        FieldKind::Object(T::describe)
    }

    /// A field holding a list of a nested model type.
    pub fn object_list<T: Describe>(min_items: Option<u64>) -> Self {
        FieldKind::ObjectList {
            item: T::describe,
            min_items,
        }
    }

    /// A field holding one of the values of a setting enum.
    pub fn enumeration<E: SettingEnum>() -> Self {
        FieldKind::Enum(E::VALUES)
    }

    /// An integer field bounded on both ends.
    pub fn bounded_integer(min: i64, max: i64) -> Self {
        FieldKind::Integer {
            min: Some(min),
            max: Some(max),
        }
    }

    /// A list of strings with no size constraint.
    pub fn strings() -> Self {
        FieldKind::StringList { min_items: None }
    }
}

/// A model type that can describe its own shape.
pub trait Describe {
    fn describe() -> TypeDescriptor;
}

/// An enum-like setting with a fixed set of wire values.
pub trait SettingEnum: Sized + Copy + 'static {
    /// All wire values, in declaration order.
    const VALUES: &'static [&'static str];

    /// Returns the wire value of this variant.
    fn as_str(&self) -> &'static str;

    /// Parses a wire value. Matching is exact.
    fn from_wire(value: &str) -> Option<Self>;
}

/// Declares an enum-like setting.
///
/// Generates the enum with serde support under the given wire names, a
/// [`SettingEnum`] implementation and a `Display` implementation.
macro_rules! setting_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $value:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $crate::descriptor::SettingEnum for $name {
            const VALUES: &'static [&'static str] = &[$($value),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $value, )+
                }
            }

            fn from_wire(value: &str) -> Option<Self> {
                match value {
                    $( $value => Some(Self::$variant), )+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::descriptor::SettingEnum::as_str(self))
            }
        }
    };
}

pub(crate) use setting_enum;
