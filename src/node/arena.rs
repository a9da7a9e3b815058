use std::num::NonZeroU32;

/// The address of a node slot in an [`Arena`].
///
/// Handles are only meaningful for the arena that issued them, and only until the slot is
/// freed. `Option<Handle>` is the same size as `Handle`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[repr(transparent)]
pub struct Handle(NonZeroU32);

impl Handle {
    pub const MAX: usize = (u32::MAX - 1) as usize;

    #[inline]
    fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "`Handle::from_index()` - `index` > `Handle::MAX`!");
        match NonZeroU32::new(index as u32 + 1) {
            Some(raw) => Handle(raw),
            None => unreachable!(),
        }
    }

    #[inline]
    fn to_index(self) -> usize { (self.0.get() - 1) as usize }
}

/// Slot storage for tree nodes; freed slots are reused before the storage grows.
#[derive(Clone)]
pub struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    pub fn new() -> Self { Arena { slots: Vec::new(), free: Vec::new() } }

    pub fn len(&self) -> usize { self.slots.len() - self.free.len() }

    pub fn alloc(&mut self, element: T) -> Handle {
        match self.free.pop() {
            Some(h) => {
                self.slots[h.to_index()] = Some(element);
                h
            }
            None => {
                assert!(self.slots.len() <= Handle::MAX,
                        "`Arena::alloc()` - arena is at maximum capacity ({})", Handle::MAX);
                self.slots.push(Some(element));
                Handle::from_index(self.slots.len() - 1)
            }
        }
    }

    #[inline]
    pub fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    pub fn take(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.to_index()].take()
            .expect("`Arena::take()` - `handle` is invalid!");
        self.free.push(handle);
        element
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}
