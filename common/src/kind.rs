//! Macros for defining kind enums.

/// Macro for defining a kind enum.
///
/// The `rename` attribute picks the casing of the wire representation (both
/// [`serde`] and [`strum`] honor it), since the remote persistence service
/// mixes `SCREAMING_SNAKE_CASE`, `PascalCase` and `lowercase` labels across
/// tables. Irregular labels are declared per-variant.
///
/// On the wire and in a database a kind is always its textual label, so the
/// invoking crate must depend on [`serde`] (and enable the `serde` feature of
/// this crate).
///
/// # Example
///
/// ```ignore
/// define_kind! {
///     #[doc = "Status of a payment attestation."]
///     #[rename = "lowercase"]
///     enum Status {
///         #[doc = "Awaiting verification."]
///         Pending,
///
///         #[doc = "Confirmed by an admin."]
///         Verified,
///     }
/// }
/// ```
#[macro_export]
macro_rules! define_kind {
    (
        #[doc = $doc:literal]
        #[rename = $case:literal]
        enum $name:ident {
            $(
                #[doc = $variant_doc:literal]
                $(#[rename = $variant_rename:literal])?
                $variant:ident
            ),* $(,)?
        }
    ) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            $crate::private::strum::Display,
            $crate::private::strum::EnumString,
            Eq,
            Hash,
            PartialEq,
            $crate::private::serde::Deserialize,
            $crate::private::serde::Serialize,
        )]
        #[doc = $doc]
        #[serde(rename_all = $case)]
        #[strum(serialize_all = $case)]
        pub enum $name {
            $(
                #[doc = $variant_doc]
                $(
                    #[serde(rename = $variant_rename)]
                    #[strum(serialize = $variant_rename)]
                )?
                $variant,
            )*
        }

        #[cfg(feature = "postgres")]
        impl<'a> $crate::private::postgres_types::FromSql<'a> for $name {
            $crate::private::postgres_types::accepts!(TEXT, VARCHAR);

            fn from_sql(
                ty: &$crate::private::postgres_types::Type,
                raw: &'a [u8],
            ) -> Result<
                $name,
                Box<dyn ::std::error::Error
                    + ::core::marker::Sync
                    + ::core::marker::Send>,
            > {
                let label = <&str as $crate::private::postgres_types::FromSql<
                    'a,
                >>::from_sql(ty, raw)?;
                <$name as ::core::str::FromStr>::from_str(label).map_err(|_| {
                    ::std::format!(
                        "invalid `{}` value: {label}",
                        ::core::stringify!($name),
                    )
                    .into()
                })
            }
        }

        #[cfg(feature = "postgres")]
        impl $crate::private::postgres_types::ToSql for $name {
            $crate::private::postgres_types::accepts!(TEXT, VARCHAR);
            $crate::private::postgres_types::to_sql_checked!();

            fn to_sql(
                &self,
                ty: &$crate::private::postgres_types::Type,
                w: &mut $crate::private::postgres_types::private::BytesMut,
            ) -> Result<
                $crate::private::postgres_types::IsNull,
                ::std::boxed::Box<
                    dyn ::std::error::Error
                        + ::core::marker::Sync
                        + ::core::marker::Send
                >,
            > {
                $crate::private::postgres_types::ToSql::to_sql(
                    &::std::string::ToString::to_string(self),
                    ty,
                    w,
                )
            }
        }
    };
}
