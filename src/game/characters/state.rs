// Player action state

/// What the player is doing with their hands
///
/// Orthogonal to the hit flag: a player can be attacking and hit at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActionState {
    /// Standing or walking
    #[default]
    Normal,
    /// Mid-swing; movement is suspended until the weapon finishes
    Attack,
}

impl ActionState {
    /// Position of this state in the animation table
    pub fn index(self) -> usize {
        match self {
            Self::Normal => 0,
            Self::Attack => 1,
        }
    }

    pub fn is_attacking(self) -> bool {
        matches!(self, Self::Attack)
    }

    /// Check if the player walks this tick
    pub fn can_move(self) -> bool {
        !self.is_attacking()
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Attack => "attack",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        assert_eq!(ActionState::default(), ActionState::Normal);
    }

    #[test]
    fn test_attack_blocks_movement() {
        assert!(ActionState::Normal.can_move());
        assert!(!ActionState::Attack.can_move());
        assert!(ActionState::Attack.is_attacking());
    }

    #[test]
    fn test_table_indices() {
        assert_eq!(ActionState::Normal.index(), 0);
        assert_eq!(ActionState::Attack.index(), 1);
        assert_eq!(ActionState::Attack.name(), "attack");
    }
}
