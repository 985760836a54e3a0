//! Macros for ergonomic status declarations.

/// Declare a domain enum whose variants map to fixed status codes.
///
/// The generated enum converts into [`StatusCode`](crate::core::StatusCode)
/// and back; converting an unknown code fails with
/// [`TriggerError::IllegalStateCode`](crate::engine::TriggerError::IllegalStateCode).
/// Codes must not be `0`, which is reserved for the nil status.
///
/// # Example
///
/// ```
/// use hookfsm::core::StatusCode;
/// use hookfsm::status_enum;
///
/// status_enum! {
///     pub enum OrderStatus {
///         Draft = 1,
///         Paid = 2,
///         Shipped = 3,
///     }
/// }
///
/// let code = StatusCode::from(OrderStatus::Paid);
/// assert_eq!(code, StatusCode::new(2));
/// assert_eq!(OrderStatus::try_from(code).unwrap(), OrderStatus::Paid);
/// assert_eq!(OrderStatus::display_name(StatusCode::new(3)), "Shipped");
///
/// let err = OrderStatus::try_from(StatusCode::new(9)).unwrap_err();
/// assert_eq!(err.to_string(), "illegal state code: 9");
/// ```
#[macro_export]
macro_rules! status_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $code:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            pub const fn code(self) -> $crate::core::StatusCode {
                match self {
                    $(Self::$variant => $crate::core::StatusCode::new($code)),*
                }
            }

            /// Variant name for a known code, the raw number otherwise.
            pub fn display_name(code: $crate::core::StatusCode) -> ::std::string::String {
                match <Self as ::std::convert::TryFrom<$crate::core::StatusCode>>::try_from(code) {
                    Ok(status) => status.name().to_string(),
                    Err(_) => code.to_string(),
                }
            }
        }

        impl ::std::convert::From<$name> for $crate::core::StatusCode {
            fn from(status: $name) -> Self {
                status.code()
            }
        }

        impl ::std::convert::TryFrom<$crate::core::StatusCode> for $name {
            type Error = $crate::engine::TriggerError;

            fn try_from(code: $crate::core::StatusCode) -> ::std::result::Result<Self, Self::Error> {
                match code.get() {
                    $($code => Ok(Self::$variant),)*
                    _ => Err($crate::engine::TriggerError::IllegalStateCode(code)),
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}
