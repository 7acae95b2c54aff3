//! Generates the persistence error enums shared by the repository ports.
//!
//! Every repository can lose its connection or fail a statement, so the
//! macro always emits `Connection` and `Query` variants whose messages name
//! the repository. Ports list only the failures specific to their records.

macro_rules! define_port_error {
    (@ctor $variant:ident { $($field:ident : $ty:ty),* }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            #[doc = concat!("Build [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident($subject:literal) {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident {
                    $( $(#[$field_meta:meta])* $field:ident : $ty:ty ),* $(,)?
                } => $message:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            /// The store could not be reached or dropped the connection.
            #[error("{subject} connection failed: {message}", subject = $subject)]
            Connection {
                /// Adapter-supplied detail, never shown to clients.
                message: String,
            },
            /// A statement failed during execution.
            #[error("{subject} query failed: {message}", subject = $subject)]
            Query {
                /// Adapter-supplied detail, never shown to clients.
                message: String,
            },
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $( $(#[$field_meta])* $field : $ty ),* },
            )*
        }

        impl $name {
            define_port_error!(@ctor Connection { message: String });
            define_port_error!(@ctor Query { message: String });
            $(
                define_port_error!(@ctor $variant { $($field : $ty),* });
            )*
        }
    };
}

pub(crate) use define_port_error;
