// https://en.cppreference.com/w/cpp/utility/in_place.html
// Selects "build the value right here" over the converting constructors.

/// Marker passed to [`Optional::in_place`](crate::Optional::in_place). Carries no data and
/// can only be obtained through [`IN_PLACE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InPlace {
    _private: ()
}

pub const IN_PLACE: InPlace = InPlace { _private: () };
