pub mod optional;
pub mod utility;

pub use optional::{
    make_optional,
    make_optional_in_place,
    BadOptionalAccess,
    NullOpt,
    Optional,
    NULLOPT
};
pub use utility::{ InPlace, IN_PLACE };
