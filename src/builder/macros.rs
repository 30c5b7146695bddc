//! Macros for declaring numbered states and events.

/// Declare an enum of state or event numbers with their names.
///
/// Generates the enum (`#[repr(u16)]`), `ALL`, `name()`, `id()`,
/// conversions to and from the id type, and `labels()`, which returns the
/// label descriptors for every variant so a description does not have to
/// repeat the names.
///
/// # Example
///
/// ```
/// use fc_fsm::core::{EventId, StateId};
/// use fc_fsm::numbered_enum;
///
/// numbered_enum! {
///     pub enum SessionState: StateId {
///         Init = 1 => "init",
///         Ready = 2 => "ready",
///     }
/// }
///
/// numbered_enum! {
///     enum SessionEvent: EventId {
///         Login = 1 => "login",
///     }
/// }
///
/// assert_eq!(StateId::from(SessionState::Ready), StateId::new(2));
/// assert_eq!(SessionState::try_from(StateId::new(1)), Ok(SessionState::Init));
/// assert_eq!(SessionEvent::Login.name(), "login");
/// assert_eq!(SessionState::labels::<()>().len(), 2);
/// ```
#[macro_export]
macro_rules! numbered_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $kind:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $number:literal => $label:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[repr(u16)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant = $number
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),*
                }
            }

            pub const fn id(self) -> $crate::core::$kind {
                $crate::core::$kind::new(self as u16)
            }

            /// Label descriptors for every variant.
            pub fn labels<C>() -> ::std::vec::Vec<$crate::core::DescriptorEntry<C>> {
                Self::ALL
                    .iter()
                    .map(|variant| $crate::core::Label::label(variant.id(), variant.name()))
                    .collect()
            }
        }

        impl ::std::convert::From<$name> for $crate::core::$kind {
            fn from(variant: $name) -> Self {
                variant.id()
            }
        }

        impl ::std::convert::TryFrom<$crate::core::$kind> for $name {
            type Error = $crate::core::$kind;

            fn try_from(id: $crate::core::$kind) -> ::std::result::Result<Self, Self::Error> {
                match id.get() {
                    $($number => Ok(Self::$variant),)*
                    _ => Err(id),
                }
            }
        }
    };
}
