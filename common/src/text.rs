//! Macros for defining bounded text newtypes.

/// Macro for defining a bounded free-text newtype.
///
/// The value must be non-empty, must not be surrounded by whitespace, and
/// must not exceed the declared maximum length in bytes.
///
/// The invoking crate must depend on [`serde`] (and enable the `serde`
/// feature of this crate): such texts always cross the wire.
///
/// # Example
///
/// ```ignore
/// define_text! {
///     #[doc = "Name of a [`Vendor`] contact person."]
///     pub struct ContactPerson(max = 128);
/// }
/// ```
#[macro_export]
macro_rules! define_text {
    (
        #[doc = $doc:literal]
        pub struct $name:ident(max = $max:literal);
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
            /// Maximum length of this text, in bytes.
            pub const MAX_LEN: usize = $max;

            /// Creates a new text without performing any validation.
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

            /// Creates a new text if the given `value` is valid.
            #[must_use]
            pub fn new(
                value: impl ::core::convert::Into<String>,
            ) -> ::core::option::Option<Self> {
                let value = value.into();
                Self::check(&value).then_some(Self(value))
            }

            /// Checks whether the given `value` is valid.
            fn check(value: impl ::core::convert::AsRef<str>) -> bool {
                let value = value.as_ref();
                value.trim() == value
                    && !value.is_empty()
                    && value.len() <= Self::MAX_LEN
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
