//! Declarative generation of reflection tables.

/// Define a struct together with its [`Describe`](crate::reflect::Describe)
/// and [`Reflect`](crate::reflect::Reflect) impls.
///
/// Each field is annotated with its kind:
/// - `scalar`: any `serde::de::DeserializeOwned` type, assigned unconverted
/// - `nested`: a described type stored inline
/// - `optional`: `Option<T>` of a described type
/// - `list`: `Vec<T>` of deserializable scalars
/// - `list_of`: `Vec<T>` of a described type
///
/// The struct must implement `Default` and `Debug`.
///
/// # Example
/// ```
/// structmap::describe! {
///     #[derive(Debug, Default)]
///     pub struct Item {
///         pub v: i64 => scalar,
///     }
/// }
///
/// structmap::describe! {
///     #[derive(Debug, Default)]
///     pub struct Basket {
///         pub owner: String => scalar,
///         pub items: Vec<Item> => list_of,
///     }
/// }
///
/// let basket: Basket = structmap::from_json_str(r#"{"owner": "ann", "items": [{"v": 1}]}"#)
///     .unwrap()
///     .unwrap();
/// assert_eq!(basket.items[0].v, 1);
/// ```
#[macro_export]
macro_rules! describe {
    (@field_type scalar $ty:ty) => {
        $crate::reflect::FieldType::Scalar { type_name: stringify!($ty) }
    };
    (@field_type nested $ty:ty) => {
        $crate::reflect::FieldType::Struct($crate::reflect::TypeRef(
            <$ty as $crate::reflect::Describe>::describe,
        ))
    };
    (@field_type optional $ty:ty) => {
        $crate::reflect::FieldType::Optional($crate::reflect::TypeRef(
            <$ty as $crate::reflect::OptionalSlot>::element,
        ))
    };
    (@field_type list $ty:ty) => {
        $crate::reflect::FieldType::Sequence($crate::reflect::ElementType::Scalar)
    };
    (@field_type list_of $ty:ty) => {
        $crate::reflect::FieldType::Sequence($crate::reflect::ElementType::Struct(
            $crate::reflect::TypeRef(<$ty as $crate::reflect::StructListSlot>::element),
        ))
    };

    (@assign scalar $ty:ty, $value:expr) => {
        $crate::reflect::assign_scalar::<$ty>($value)
    };
    (@assign nested $ty:ty, $value:expr) => {
        $crate::reflect::assign_struct::<$ty>($value)
    };
    (@assign optional $ty:ty, $value:expr) => {
        <$ty as $crate::reflect::OptionalSlot>::assign($value)
    };
    (@assign list $ty:ty, $value:expr) => {
        <$ty as $crate::reflect::ScalarListSlot>::assign($value)
    };
    (@assign list_of $ty:ty, $value:expr) => {
        <$ty as $crate::reflect::StructListSlot>::assign($value)
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty => $kind:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::reflect::Describe for $name {
            fn describe() -> &'static $crate::reflect::TypeInfo {
                static INFO: $crate::reflect::TypeInfo = $crate::reflect::TypeInfo {
                    name: stringify!($name),
                    construct: Some($crate::reflect::construct_default::<$name>),
                    fields: &[
                        $(
                            $crate::reflect::FieldInfo {
                                name: stringify!($field),
                                ty: $crate::describe!(@field_type $kind $ty),
                            },
                        )*
                    ],
                };
                &INFO
            }
        }

        impl $crate::reflect::Reflect for $name {
            fn type_info(&self) -> &'static $crate::reflect::TypeInfo {
                <Self as $crate::reflect::Describe>::describe()
            }

            fn field_ref(&self, name: &str) -> ::std::option::Option<&dyn ::std::any::Any> {
                match name {
                    $( stringify!($field) => ::std::option::Option::Some(&self.$field as &dyn ::std::any::Any), )*
                    _ => ::std::option::Option::None,
                }
            }

            fn set_field(
                &mut self,
                name: &str,
                value: $crate::reflect::FieldValue,
            ) -> ::std::result::Result<(), $crate::reflect::SetFieldError> {
                match (name, value) {
                    $(
                        (stringify!($field), value) => {
                            self.$field = $crate::describe!(@assign $kind $ty, value)?;
                            ::std::result::Result::Ok(())
                        }
                    )*
                    (_, _) => ::std::result::Result::Err($crate::reflect::SetFieldError::NoSuchField),
                }
            }

            fn into_any(self: ::std::boxed::Box<Self>) -> ::std::boxed::Box<dyn ::std::any::Any> {
                self
            }
        }
    };
}
