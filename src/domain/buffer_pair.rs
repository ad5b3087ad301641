//! Ping-pong pair of grids.

/// Role a buffer plays during the current generation
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Role {
    /// Last completed generation, sampled by the kernel and the presenter
    Front,
    /// Render target of the next generation
    Back,
}

/// Two equally sized grids with exactly one in each role.
///
/// Roles are decided by a single slot index, so the pair can never hold
/// two fronts or two backs.
#[derive(Clone, Debug)]
pub struct BufferPair<G> {
    slots: [G; 2],
    front: usize,
}

impl<G: Copy> BufferPair<G> {
    /// `first` starts out as the front buffer
    pub fn new(first: G, second: G) -> Self {
        Self {
            slots: [first, second],
            front: 0,
        }
    }

    pub fn front(&self) -> G {
        self.slots[self.front]
    }

    pub fn back(&self) -> G {
        self.slots[1 - self.front]
    }

    /// Exchange the roles. No texel data moves.
    ///
    /// The caller must have finished (or sequenced) every write to the
    /// back buffer, since it is sampled as the front from now on.
    pub fn swap(&mut self) {
        self.front = 1 - self.front;
    }

    /// Role of slot 0 or 1
    pub fn role_of(&self, slot: usize) -> Role {
        debug_assert!(slot < 2);
        if slot == self.front { Role::Front } else { Role::Back }
    }

    /// Both handles in slot order
    pub fn slots(&self) -> [G; 2] {
        self.slots
    }
}
