// Optional<T> built from its own storage: the value lives in a MaybeUninit<T> next to a flag,
// and every construct/destroy of the slot is gated on that flag by hand.

use super::{ bad_access, BadOptionalAccess, NullOpt };
use crate::utility::InPlace;
use std::{
    cmp::Ordering,
    fmt::{ Debug, Display },
    hash::{ Hash, Hasher },
    mem::{ self, ManuallyDrop, MaybeUninit }
};

/// Holds zero or one `T` inline. `value` is initialized if and only if `engaged` is set.
#[repr(C)]
pub struct Optional<T> {
    value: MaybeUninit<T>,
    engaged: bool
}

impl<T> Optional<T> {
    pub const fn none() -> Self {
        Self { value: MaybeUninit::uninit(), engaged: false }
    }

    pub const fn new(value: T) -> Self {
        Self { value: MaybeUninit::new(value), engaged: true }
    }

    /// Converting constructor: engage with anything `T` can be built from.
    pub fn from_value<U>(value: U) -> Self
    where U: Into<T>
    {
        Self::new(value.into())
    }

    /// Construct the value with `f` straight into this optional's storage.
    pub fn in_place<F>(_tag: InPlace, f: F) -> Self
    where F: FnOnce() -> T
    {
        let mut out = Self::none();
        out.emplace_with(f);
        out
    }

    /// Move the value out of `src`, C++ style: `src` stays engaged and is left holding
    /// `T::default()`. An empty `src` gives an empty result.
    pub fn move_from(src: &mut Self) -> Self
    where T: Default
    {
        match src.as_option_mut() {
            Some(v) => Self::new(mem::take(v)),
            None => Self::none()
        }
    }
}

impl<T> Optional<T> {
    pub fn has_value(&self) -> bool { self.engaged }
    pub fn is_none(&self) -> bool { !self.engaged }

    /// # Safety
    /// The optional must be engaged.
    pub unsafe fn get_unchecked(&self) -> &T {
        debug_assert!(self.engaged, "get_unchecked on an empty Optional");
        unsafe { self.value.assume_init_ref() }
    }

    /// # Safety
    /// The optional must be engaged.
    pub unsafe fn get_unchecked_mut(&mut self) -> &mut T {
        debug_assert!(self.engaged, "get_unchecked_mut on an empty Optional");
        unsafe { self.value.assume_init_mut() }
    }

    /// # Safety
    /// The optional must be engaged.
    pub unsafe fn into_inner_unchecked(self) -> T {
        debug_assert!(self.engaged, "into_inner_unchecked on an empty Optional");
        let this = ManuallyDrop::new(self);
        unsafe { this.value.assume_init_read() }
    }

    pub fn value(&self) -> Result<&T, BadOptionalAccess> {
        self.as_option().ok_or_else(bad_access::<T>)
    }

    pub fn value_mut(&mut self) -> Result<&mut T, BadOptionalAccess> {
        self.as_option_mut().ok_or_else(bad_access::<T>)
    }

    pub fn into_value(self) -> Result<T, BadOptionalAccess> {
        self.into_option().ok_or_else(bad_access::<T>)
    }

    pub fn value_or<U>(&self, default: U) -> T
    where T: Clone,
          U: Into<T>
    {
        match self.as_option() {
            Some(v) => v.clone(),
            None => default.into()
        }
    }

    pub fn into_value_or<U>(self, default: U) -> T
    where U: Into<T>
    {
        match self.into_option() {
            Some(v) => v,
            None => default.into()
        }
    }

    pub fn as_option(&self) -> Option<&T> {
        match self.engaged {
            true => Some(unsafe { self.value.assume_init_ref() }),
            false => None
        }
    }

    pub fn as_option_mut(&mut self) -> Option<&mut T> {
        match self.engaged {
            true => Some(unsafe { self.value.assume_init_mut() }),
            false => None
        }
    }

    pub fn into_option(self) -> Option<T> {
        let mut this = ManuallyDrop::new(self);
        match this.engaged {
            true => Some(unsafe { this.take_unchecked() }),
            false => None
        }
    }
}

impl<T> Optional<T> {
    // Moves the value out and marks the slot empty. Caller checks `engaged`.
    unsafe fn take_unchecked(&mut self) -> T {
        self.engaged = false;
        unsafe { self.value.assume_init_read() }
    }

    /// Destroy the held value, if any. The flag is cleared first so a panicking `Drop` can't
    /// lead to a second drop of the same value.
    pub fn reset(&mut self) {
        if self.engaged {
            self.engaged = false;
            unsafe { self.value.assume_init_drop() };
        }
    }

    pub fn emplace(&mut self, value: T) -> &mut T {
        self.emplace_with(move || value)
    }

    /// Drop the current value, then build a new one with `f` in the same storage. `f` never
    /// runs while the old value is still alive.
    pub fn emplace_with<F>(&mut self, f: F) -> &mut T
    where F: FnOnce() -> T
    {
        self.reset();
        let slot = self.value.write(f());
        self.engaged = true;
        slot
    }

    /// Converting assignment: assign into the live value, or emplace when empty.
    pub fn set<U>(&mut self, value: U) -> &mut T
    where U: Into<T>
    {
        let value = value.into();
        if self.engaged {
            let slot = unsafe { self.value.assume_init_mut() };
            *slot = value;
            slot
        } else {
            self.emplace(value)
        }
    }

    pub fn assign_none(&mut self) { self.reset() }

    /// Copy assignment. Two engaged optionals go through `T::clone_from`, so the existing value
    /// is reused rather than destroyed and rebuilt.
    pub fn assign(&mut self, other: &Self)
    where T: Clone
    {
        match (self.engaged, other.as_option()) {
            (true, Some(v)) => {
                let slot = unsafe { self.value.assume_init_mut() };
                slot.clone_from(v)
            },
            (false, Some(v)) => { self.emplace(v.clone()); },
            (_, None) => self.reset()
        }
    }

    /// Move assignment from an optional passed by value.
    pub fn assign_from(&mut self, other: Self) {
        match other.into_option() {
            Some(v) => { self.set(v); },
            None => self.reset()
        }
    }

    /// Move assignment that leaves `other` engaged with `T::default()`, see [`Self::move_from`].
    pub fn assign_move_from(&mut self, other: &mut Self)
    where T: Default
    {
        match other.as_option_mut() {
            Some(v) => { self.set(mem::take(v)); },
            None => self.reset()
        }
    }

    pub fn swap(&mut self, other: &mut Self) {
        match (self.engaged, other.engaged) {
            (true, true) => unsafe {
                mem::swap(self.value.assume_init_mut(), other.value.assume_init_mut())
            },
            (true, false) => { other.emplace(unsafe { self.take_unchecked() }); },
            (false, true) => { self.emplace(unsafe { other.take_unchecked() }); },
            (false, false) => ()
        }
    }

    /// Move the whole value out, leaving `self` empty.
    pub fn take(&mut self) -> Self {
        match self.engaged {
            true => Self::new(unsafe { self.take_unchecked() }),
            false => Self::none()
        }
    }
}

impl<T> Drop for Optional<T> {
    fn drop(&mut self) { self.reset() }
}

impl<T> Default for Optional<T> {
    fn default() -> Self { Self::none() }
}

impl<T> Clone for Optional<T>
where T: Clone
{
    fn clone(&self) -> Self {
        match self.as_option() {
            Some(v) => Self::new(v.clone()),
            None => Self::none()
        }
    }

    fn clone_from(&mut self, source: &Self) { self.assign(source) }
}

impl<T> From<NullOpt> for Optional<T> {
    fn from(_: NullOpt) -> Self { Self::none() }
}

impl<T> From<Option<T>> for Optional<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(p) => Self::new(p),
            None => Self::none()
        }
    }
}

impl<T> From<Optional<T>> for Option<T> {
    fn from(value: Optional<T>) -> Self { value.into_option() }
}

impl<T> From<&Optional<T>> for bool {
    fn from(value: &Optional<T>) -> Self { value.has_value() }
}

impl<T> PartialEq for Optional<T>
where T: PartialEq
{
    fn eq(&self, other: &Self) -> bool { self.as_option() == other.as_option() }
}

impl<T> Eq for Optional<T> where T: Eq {}

// An empty optional orders before every engaged one.
impl<T> PartialOrd for Optional<T>
where T: PartialOrd
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_option().partial_cmp(&other.as_option())
    }
}

impl<T> Ord for Optional<T>
where T: Ord
{
    fn cmp(&self, other: &Self) -> Ordering { self.as_option().cmp(&other.as_option()) }
}

impl<T> Hash for Optional<T>
where T: Hash
{
    fn hash<H: Hasher>(&self, state: &mut H) { self.as_option().hash(state) }
}

impl<T> Debug for Optional<T>
where T: Debug
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.as_option() {
            Some(v) => write!(f, "Some({:?})", v),
            None => write!(f, "None")
        }
    }
}

impl<T> Display for Optional<T>
where T: Display
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.as_option() {
            Some(v) => write!(f, "Some({})", v),
            None => write!(f, "None")
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::Optional;
    use crate::{ optional::BadOptionalAccess, utility::IN_PLACE };
    use std::{ cell::Cell, error::Error, rc::Rc };
    type TestReturn = Result<(), Box<dyn Error>>;

    // Counts live instances so leaks and double drops show up as a nonzero balance.
    struct Tracked {
        live: Rc<Cell<isize>>,
        id: u32
    }

    impl Tracked {
        fn new(live: &Rc<Cell<isize>>, id: u32) -> Self {
            live.set(live.get() + 1);
            Self { live: live.clone(), id }
        }
    }

    impl Clone for Tracked {
        fn clone(&self) -> Self { Self::new(&self.live, self.id) }
    }

    impl Drop for Tracked {
        fn drop(&mut self) { self.live.set(self.live.get() - 1) }
    }

    #[test]
    pub fn empty_by_default() -> TestReturn {
        let o: Optional<u32> = Optional::default();
        assert!(!o.has_value(), "Default optional should be empty");
        assert!(o.value() == Err(BadOptionalAccess), "value() on an empty optional should fail");
        assert!(!bool::from(&o), "Empty optional should convert to false");
        Ok(())
    }

    #[test]
    pub fn emplace_then_value() -> TestReturn {
        let mut o = Optional::none();
        *o.emplace(10u32) += 1;
        assert!(*o.value()? == 11, "Emplaced value should be 11");
        assert!(unsafe { *o.get_unchecked() } == 11, "Unchecked access should see the same value");
        o.reset();
        o.reset();
        assert!(o.is_none(), "Optional should be empty after reset");
        Ok(())
    }

    #[test]
    pub fn in_place_runs_constructor_once() -> TestReturn {
        let calls = Cell::new(0);
        let o = Optional::in_place(IN_PLACE, || { calls.set(calls.get() + 1); (1, "two", 3.0) });
        assert!(calls.get() == 1, "Constructor closure should run exactly once");
        assert!(o.value()?.1 == "two", "Tuple should be built in place");
        Ok(())
    }

    #[test]
    pub fn no_leaks_or_double_drops() -> TestReturn {
        let live = Rc::new(Cell::new(0));
        {
            let mut a = Optional::new(Tracked::new(&live, 1));
            let mut b = a.clone();
            assert!(live.get() == 2, "Clone should create a second instance");
            a.emplace(Tracked::new(&live, 2));
            assert!(live.get() == 2, "Emplace should drop the old value");
            b.assign(&Optional::none());
            assert!(live.get() == 1, "Assigning an empty optional should drop the value");
            a.swap(&mut b);
            assert!(a.is_none() && b.value()?.id == 2, "Swap should move the value across");
            let c = b.take();
            assert!(b.is_none() && live.get() == 1, "Take should move without copying");
            let _ = c.into_option();
            assert!(live.get() == 0, "Dropping the taken value should free it");
            a.set(Tracked::new(&live, 3));
            a.set(Tracked::new(&live, 4));
            assert!(live.get() == 1 && a.value()?.id == 4, "set should replace the live value");
        }
        assert!(live.get() == 0, "Every instance should be dropped with its optional");
        Ok(())
    }

    #[test]
    pub fn formatting() -> TestReturn {
        assert!(format!("{}", Optional::new(5)) == "Some(5)", "Display should wrap the value");
        assert!(format!("{:?}", Optional::<u8>::none()) == "None", "Empty optional should print None");
        Ok(())
    }
}
