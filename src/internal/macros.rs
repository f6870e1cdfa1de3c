//! A set of macros for easily working with internals.

macro_rules! api {
    ($e:expr) => {
        concat!("https://discord.com/api/v10", $e)
    };
    ($e:expr, $($rest:tt)*) => {
        format!(api!($e), $($rest)*)
    };
}

macro_rules! cdn {
    ($e:expr) => {
        concat!("https://cdn.discordapp.com", $e)
    };
    ($e:expr, $($rest:tt)*) => {
        format!(cdn!($e), $($rest)*)
    };
}

/// The macro forwards the generation to the `bitflags::bitflags!` macro and implements the
/// default (de)serialization for Discord's bitmask values.
///
/// Discord sends most of its bitmasks as plain integers. Bits the library does not know about yet
/// are dropped on decode instead of failing the whole payload.
macro_rules! bitflags_int {
    (
        $(#[$outer:meta])*
        $vis:vis struct $BitFlags:ident: $T:ty {
            $(
                $(#[$inner:ident $($args:tt)*])*
                const $Flag:ident = $value:expr;
            )*
        }
    ) => {
        bitflags::bitflags! {
            $(#[$outer])*
            $vis struct $BitFlags: $T {
                $(
                    $(#[$inner $($args)*])*
                    const $Flag = $value;
                )*
            }
        }

        impl<'de> serde::de::Deserialize<'de> for $BitFlags {
            fn deserialize<D: serde::de::Deserializer<'de>>(
                deserializer: D,
            ) -> std::result::Result<Self, D::Error> {
                let bits = <$T as serde::de::Deserialize>::deserialize(deserializer)?;
                Ok(Self::from_bits_truncate(bits))
            }
        }

        impl serde::ser::Serialize for $BitFlags {
            fn serialize<S: serde::ser::Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                serde::ser::Serialize::serialize(&self.bits(), serializer)
            }
        }
    };
}

/// The macro creates an enum backed by a number, with an `Unknown` variant for values the library
/// has not seen yet, and conversions to and from the number.
///
/// Pair it with `#[serde(from = "u8", into = "u8")]` to (de)serialize as the number.
macro_rules! enum_number {
    (
        $(#[$outer:meta])*
        $vis:vis enum $Enum:ident {
            $(
                $(#[doc = $doc:literal])*
                $Variant:ident = $value:literal,
            )*
            _ => Unknown($T:ty),
        }
    ) => {
        $(#[$outer])*
        $vis enum $Enum {
            $(
                $(#[doc = $doc])*
                $Variant,
            )*
            /// Variant value is unknown.
            Unknown($T),
        }

        impl From<$T> for $Enum {
            fn from(value: $T) -> Self {
                match value {
                    $($value => Self::$Variant,)*
                    unknown => Self::Unknown(unknown),
                }
            }
        }

        impl From<$Enum> for $T {
            fn from(value: $Enum) -> Self {
                match value {
                    $($Enum::$Variant => $value,)*
                    $Enum::Unknown(unknown) => unknown,
                }
            }
        }
    };
}

/// Implements [`Update`] for a model by listing the JSON keys a gateway fragment may carry and
/// the field each one is written to.
///
/// A key can name a custom decoder with `with path::to::fn`, which must have the signature
/// `fn(&Value) -> Result<T, serde_json::Error>`. A leading `..field;` first merges the fragment
/// into a flattened inner model.
///
/// [`Update`]: crate::model::update::Update
macro_rules! impl_update {
    (@decoder) => {
        $crate::model::update::decode
    };
    (@decoder $decode:path) => {
        $decode
    };
    (@applied $fragment:ident) => {
        $crate::model::update::UpdatedFields::new()
    };
    (@applied $fragment:ident $inner:expr) => {
        $crate::model::update::Update::update(&mut $inner, $fragment)
    };
    (
        $Type:ty {
            $(..$inner:ident;)?
            $($key:literal => $field:ident $(with $decode:path)?),* $(,)?
        }
    ) => {
        impl $crate::model::update::Update for $Type {
            fn update(
                &mut self,
                fragment: &$crate::json::JsonMap,
            ) -> $crate::model::update::UpdatedFields {
                #[allow(unused_mut)]
                let mut applied = impl_update!(@applied fragment $(self.$inner)?);

                $(
                    if let Some(value) = fragment.get($key) {
                        let decoded = $crate::model::update::merge_field(
                            &mut self.$field,
                            $key,
                            value,
                            impl_update!(@decoder $($decode)?),
                        );

                        if decoded {
                            applied.push($key);
                        }
                    }
                )*

                applied
            }
        }
    };
}
