// Optional<T> on top of core::option::Option. Same surface as `inline::Optional`, selected with
// the `native-option` feature.

use super::{ bad_access, inline, BadOptionalAccess, NullOpt };
use crate::utility::InPlace;
use std::{
    fmt::{ Debug, Display },
    mem
};

#[repr(transparent)]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Optional<T>(Option<T>);

impl<T> Optional<T> {
    pub const fn none() -> Self { Self(None) }
    pub const fn new(value: T) -> Self { Self(Some(value)) }

    pub fn from_value<U>(value: U) -> Self
    where U: Into<T>
    {
        Self::new(value.into())
    }

    pub fn in_place<F>(_tag: InPlace, f: F) -> Self
    where F: FnOnce() -> T
    {
        Self(Some(f()))
    }

    pub fn move_from(src: &mut Self) -> Self
    where T: Default
    {
        Self(src.0.as_mut().map(mem::take))
    }
}

impl<T> Optional<T> {
    pub fn has_value(&self) -> bool { self.0.is_some() }
    pub fn is_none(&self) -> bool { self.0.is_none() }

    /// # Safety
    /// The optional must be engaged.
    pub unsafe fn get_unchecked(&self) -> &T {
        debug_assert!(self.0.is_some(), "get_unchecked on an empty Optional");
        unsafe { self.0.as_ref().unwrap_unchecked() }
    }

    /// # Safety
    /// The optional must be engaged.
    pub unsafe fn get_unchecked_mut(&mut self) -> &mut T {
        debug_assert!(self.0.is_some(), "get_unchecked_mut on an empty Optional");
        unsafe { self.0.as_mut().unwrap_unchecked() }
    }

    /// # Safety
    /// The optional must be engaged.
    pub unsafe fn into_inner_unchecked(self) -> T {
        debug_assert!(self.0.is_some(), "into_inner_unchecked on an empty Optional");
        unsafe { self.0.unwrap_unchecked() }
    }

    pub fn value(&self) -> Result<&T, BadOptionalAccess> {
        self.0.as_ref().ok_or_else(bad_access::<T>)
    }

    pub fn value_mut(&mut self) -> Result<&mut T, BadOptionalAccess> {
        self.0.as_mut().ok_or_else(bad_access::<T>)
    }

    pub fn into_value(self) -> Result<T, BadOptionalAccess> {
        self.0.ok_or_else(bad_access::<T>)
    }

    pub fn value_or<U>(&self, default: U) -> T
    where T: Clone,
          U: Into<T>
    {
        self.0.as_ref().cloned().unwrap_or_else(|| default.into())
    }

    pub fn into_value_or<U>(self, default: U) -> T
    where U: Into<T>
    {
        self.0.unwrap_or_else(|| default.into())
    }

    pub fn as_option(&self) -> Option<&T> { self.0.as_ref() }
    pub fn as_option_mut(&mut self) -> Option<&mut T> { self.0.as_mut() }
    pub fn into_option(self) -> Option<T> { self.0 }
}

impl<T> Optional<T> {
    pub fn reset(&mut self) { self.0 = None }

    pub fn emplace(&mut self, value: T) -> &mut T {
        self.emplace_with(move || value)
    }

    pub fn emplace_with<F>(&mut self, f: F) -> &mut T
    where F: FnOnce() -> T
    {
        self.reset();
        self.0.insert(f())
    }

    pub fn set<U>(&mut self, value: U) -> &mut T
    where U: Into<T>
    {
        // Option::insert drops a live value in place before writing, same as `*slot = value`.
        self.0.insert(value.into())
    }

    pub fn assign_none(&mut self) { self.reset() }

    pub fn assign(&mut self, other: &Self)
    where T: Clone
    {
        match &other.0 {
            Some(v) => match self.0.as_mut() {
                Some(slot) => slot.clone_from(v),
                None => self.0 = Some(v.clone())
            },
            None => self.reset()
        }
    }

    pub fn assign_from(&mut self, other: Self) {
        match other.0 {
            Some(v) => { self.set(v); },
            None => self.reset()
        }
    }

    pub fn assign_move_from(&mut self, other: &mut Self)
    where T: Default
    {
        match other.0.as_mut() {
            Some(v) => { self.set(mem::take(v)); },
            None => self.reset()
        }
    }

    pub fn swap(&mut self, other: &mut Self) {
        match (self.has_value(), other.has_value()) {
            (true, true) => mem::swap(&mut self.0, &mut other.0),
            (true, false) => other.0 = self.0.take(),
            (false, true) => self.0 = other.0.take(),
            (false, false) => ()
        }
    }

    pub fn take(&mut self) -> Self { Self(self.0.take()) }
}

impl<T> Default for Optional<T> {
    fn default() -> Self { Self::none() }
}

impl<T> Clone for Optional<T>
where T: Clone
{
    fn clone(&self) -> Self { Self(self.0.clone()) }
    fn clone_from(&mut self, source: &Self) { self.assign(source) }
}

impl<T> From<NullOpt> for Optional<T> {
    fn from(_: NullOpt) -> Self { Self::none() }
}

impl<T> From<Option<T>> for Optional<T> {
    fn from(value: Option<T>) -> Self { Self(value) }
}

impl<T> From<Optional<T>> for Option<T> {
    fn from(value: Optional<T>) -> Self { value.0 }
}

impl<T> From<&Optional<T>> for bool {
    fn from(value: &Optional<T>) -> Self { value.has_value() }
}

impl<T> From<inline::Optional<T>> for Optional<T> {
    fn from(value: inline::Optional<T>) -> Self { Self(value.into_option()) }
}

impl<T> From<Optional<T>> for inline::Optional<T> {
    fn from(value: Optional<T>) -> Self { value.0.into() }
}

impl<T> Debug for Optional<T>
where T: Debug
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Some(v) => write!(f, "Some({:?})", v),
            None => write!(f, "None")
        }
    }
}

impl<T> Display for Optional<T>
where T: Display
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Some(v) => write!(f, "Some({})", v),
            None => write!(f, "None")
        }
    }
}
