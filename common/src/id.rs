//! Macros for defining identifier newtypes.

/// Macro for defining an opaque entity identifier.
///
/// An identifier is a non-empty string of at most
/// 64 visible characters, unique within its collection. [`random()`] yields a
/// collision-resistant token (a UUIDv4) suitable for client-side assignment,
/// which also acts as the idempotency key of create operations.
///
/// The invoking crate must depend on [`serde`] (and enable the `serde`
/// feature of this crate): identifiers always cross the wire.
///
/// [`random()`]: uuid::Uuid::new_v4
///
/// # Example
///
/// ```ignore
/// define_id! {
///     #[doc = "ID of a [`Unit`]."]
///     pub struct Id;
/// }
/// ```
#[macro_export]
macro_rules! define_id {
    (
        #[doc = $doc:literal]
        pub struct $name:ident;
    ) => {
        #[derive(
            $crate::private::derive_more::AsRef,
            Clone,
            Debug,
            $crate::private::derive_more::Display,
            Eq,
            Hash,
            PartialEq,
            $crate::private::serde::Deserialize,
            $crate::private::serde::Serialize,
        )]
        #[as_ref(str, String)]
        #[cfg_attr(
            feature = "postgres",
            derive(
                $crate::private::postgres_types::ToSql,
                $crate::private::postgres_types::FromSql,
            ),
            postgres(transparent)
        )]
        #[doc = $doc]
        pub struct $name(String);

        impl $name {
            /// Maximum length of this identifier, in bytes.
            pub const MAX_LEN: usize = 64;

            /// Creates a new random collision-resistant identifier.
            #[must_use]
            pub fn random() -> Self {
                Self($crate::private::uuid::Uuid::new_v4().to_string())
            }

            /// Creates a new identifier without performing any validation.
            ///
            /// # Safety
            ///
            /// The caller must ensure that the given `value` matches the
            /// format.
            #[expect(unsafe_code, reason = "bypass")]
            #[must_use]
            pub unsafe fn new_unchecked(
                value: impl ::core::convert::Into<String>,
            ) -> Self {
                Self(value.into())
            }

            /// Creates a new identifier if the given `value` is valid.
            #[must_use]
            pub fn new(
                value: impl ::core::convert::Into<String>,
            ) -> ::core::option::Option<Self> {
                let value = value.into();
                Self::check(&value).then_some(Self(value))
            }

            /// Checks whether the given `value` is a valid identifier.
            fn check(value: impl ::core::convert::AsRef<str>) -> bool {
                let value = value.as_ref();
                !value.is_empty()
                    && value.len() <= Self::MAX_LEN
                    && !value
                        .chars()
                        .any(|c| c.is_whitespace() || c.is_control())
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s).ok_or(::core::concat!(
                    "invalid `",
                    ::core::stringify!($name),
                    "`",
                ))
            }
        }
    };
}
