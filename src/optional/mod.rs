// https://en.cppreference.com/w/cpp/utility/optional.html
// Two interchangeable containers: `inline` keeps the value in its own storage and tracks its
// lifetime by hand, `native` wraps core::option::Option. The `native-option` feature decides
// which one `Optional` names for the whole build.

pub mod inline;
pub mod native;

use crate::utility::IN_PLACE;
use thiserror::Error;

#[cfg(not(feature = "native-option"))]
pub use inline::Optional;
#[cfg(feature = "native-option")]
pub use native::Optional;

/// Returned by the checked accessors (`value`, `value_mut`, `into_value`) when the optional
/// holds nothing.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
#[error("bad optional access")]
pub struct BadOptionalAccess;

// std::nullopt_t
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NullOpt {
    _private: ()
}

pub const NULLOPT: NullOpt = NullOpt { _private: () };

pub(crate) fn bad_access<T>() -> BadOptionalAccess {
    log::trace!("checked access on empty Optional<{}>", std::any::type_name::<T>());
    BadOptionalAccess
}

/// Wrap `value` in an engaged [`Optional`].
pub fn make_optional<T>(value: T) -> Optional<T> { Optional::new(value) }

/// Build an engaged [`Optional`] whose value is produced by `f` directly in its storage.
pub fn make_optional_in_place<T, F>(f: F) -> Optional<T>
where F: FnOnce() -> T
{
    Optional::in_place(IN_PLACE, f)
}
