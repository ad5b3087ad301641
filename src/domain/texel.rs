/// One grid cell: four 8-bit channels.
/// Channel 0 holds the cell state, the other channels belong to the rule kernel.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
pub struct Texel(pub [u8; 4]);

impl Texel {
    /// Pattern written by a Paint edit
    pub const ALIVE: Texel = Texel([0xFF, 0x00, 0x00, 0x00]);

    /// Pattern written by an Erase edit
    pub const DEAD: Texel = Texel([0x00, 0x00, 0x00, 0x00]);

    /// Channel 0 value at or above which a cell counts as alive
    pub const ALIVE_THRESHOLD: u8 = 0x80;

    /// Check if the cell is currently alive
    pub const fn is_alive(self) -> bool {
        self.0[0] >= Self::ALIVE_THRESHOLD
    }

    /// Texel emitted by a rule kernel for the given state
    pub const fn from_state(alive: bool) -> Self {
        if alive {
            Texel([0xFF, 0x00, 0x00, 0xFF])
        } else {
            Texel([0x00, 0x00, 0x00, 0xFF])
        }
    }

    pub const fn bytes(self) -> [u8; 4] {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_patterns() {
        assert!(Texel::ALIVE.is_alive());
        assert!(!Texel::DEAD.is_alive());
        assert_eq!(Texel::ALIVE.bytes(), [0xFF, 0, 0, 0]);
        assert_eq!(Texel::DEAD.bytes(), [0, 0, 0, 0]);
    }

    #[test]
    fn test_threshold_on_channel_zero_only() {
        assert!(Texel([0x80, 0, 0, 0]).is_alive());
        assert!(!Texel([0x7F, 0xFF, 0xFF, 0xFF]).is_alive());
    }

    #[test]
    fn test_kernel_output_is_opaque() {
        assert_eq!(Texel::from_state(true).bytes()[3], 0xFF);
        assert_eq!(Texel::from_state(false).bytes()[3], 0xFF);
        assert!(Texel::from_state(true).is_alive());
        assert!(!Texel::from_state(false).is_alive());
    }
}
