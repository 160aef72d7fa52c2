//! Keyboard controls
//!
//! Held keys resolve to a set of [`Action`]s, and the actions fold into the
//! per-frame [`InputVector`]. Both AZERTY letters (Q/D/Z/S) and arrows steer.

use bitflags::bitflags;
use skyrun_engine::foundation::math::Pose;
use skyrun_engine::input::{KeyCode, KeyState};

/// Per-frame steering input, every axis in [-1, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputVector {
    /// Sideways: -1 left, +1 right
    pub strafe: f32,
    /// Vertical: -1 down, +1 up
    pub lift: f32,
    /// Forward speed modifier: -1 brake, +1 accelerate
    pub throttle: f32,
}

impl InputVector {
    /// No input on any axis
    pub const NEUTRAL: Self = Self {
        strafe: 0.0,
        lift: 0.0,
        throttle: 0.0,
    };

    /// Create an input vector, clamping every axis to [-1, 1]
    ///
    /// NaN axes become 0.
    pub fn new(strafe: f32, lift: f32, throttle: f32) -> Self {
        let axis = |v: f32| if v.is_nan() { 0.0 } else { v.clamp(-1.0, 1.0) };
        Self {
            strafe: axis(strafe),
            lift: axis(lift),
            throttle: axis(throttle),
        }
    }
}

/// Source of one input sample per frame
pub trait InputSource {
    /// See the ship's pose right before sampling
    ///
    /// Keyboard input ignores it; computer-driven sources steer from it.
    fn observe(&mut self, _ship: &Pose) {}

    /// Sample the current input
    fn sample(&mut self) -> InputVector;
}

bitflags! {
    /// Steering actions a held key can trigger
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Action: u8 {
        /// Strafe left
        const LEFT = 1 << 0;
        /// Strafe right
        const RIGHT = 1 << 1;
        /// Climb
        const UP = 1 << 2;
        /// Descend
        const DOWN = 1 << 3;
        /// Accelerate
        const ACCELERATE = 1 << 4;
        /// Brake
        const BRAKE = 1 << 5;
    }
}

impl Action {
    /// Action bound to a key, if any
    pub const fn for_key(key: KeyCode) -> Self {
        match key {
            KeyCode::Q | KeyCode::Left => Self::LEFT,
            KeyCode::D | KeyCode::Right => Self::RIGHT,
            KeyCode::Z | KeyCode::Up => Self::UP,
            KeyCode::S | KeyCode::Down => Self::DOWN,
            KeyCode::Space => Self::ACCELERATE,
            KeyCode::ShiftLeft | KeyCode::ShiftRight => Self::BRAKE,
            _ => Self::empty(),
        }
    }

    fn axis(self, positive: Self, negative: Self) -> f32 {
        let mut value = 0.0;
        if self.contains(positive) {
            value += 1.0;
        }
        if self.contains(negative) {
            value -= 1.0;
        }
        value
    }

    /// Fold the action set into an input vector
    pub fn to_input(self) -> InputVector {
        InputVector {
            strafe: self.axis(Self::RIGHT, Self::LEFT),
            lift: self.axis(Self::UP, Self::DOWN),
            throttle: self.axis(Self::ACCELERATE, Self::BRAKE),
        }
    }
}

/// Keyboard-driven input source
#[derive(Debug, Default)]
pub struct Controls {
    keys: KeyState,
}

impl Controls {
    /// Create controls with nothing held
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward a key event
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        self.keys.handle_key(key, pressed);
    }

    /// Release every key (window lost focus)
    pub fn release_all(&mut self) {
        self.keys.release_all();
    }

    /// Actions triggered by the currently held keys
    pub fn actions(&self) -> Action {
        self.keys.held().fold(Action::empty(), |actions, key| actions | Action::for_key(key))
    }
}

impl InputSource for Controls {
    fn sample(&mut self) -> InputVector {
        self.actions().to_input()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_when_nothing_held() {
        let mut controls = Controls::new();
        assert_eq!(controls.sample(), InputVector::NEUTRAL);
    }

    #[test]
    fn test_keymap_axes() {
        let mut controls = Controls::new();
        controls.handle_key(KeyCode::D, true);
        controls.handle_key(KeyCode::Z, true);
        controls.handle_key(KeyCode::ShiftRight, true);

        assert_eq!(controls.sample(), InputVector::new(1.0, 1.0, -1.0));
    }

    #[test]
    fn test_arrows_match_letters() {
        let mut controls = Controls::new();
        controls.handle_key(KeyCode::Left, true);
        controls.handle_key(KeyCode::Down, true);
        controls.handle_key(KeyCode::Space, true);

        assert_eq!(controls.sample(), InputVector::new(-1.0, -1.0, 1.0));
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut controls = Controls::new();
        controls.handle_key(KeyCode::Q, true);
        controls.handle_key(KeyCode::Right, true);

        assert_eq!(controls.sample().strafe, 0.0);
    }

    #[test]
    fn test_two_keys_same_action_need_both_released() {
        let mut controls = Controls::new();
        controls.handle_key(KeyCode::Q, true);
        controls.handle_key(KeyCode::Left, true);
        controls.handle_key(KeyCode::Q, false);
        assert_eq!(controls.sample().strafe, -1.0);

        controls.handle_key(KeyCode::Left, false);
        assert_eq!(controls.sample().strafe, 0.0);
    }

    #[test]
    fn test_unbound_keys_are_ignored() {
        let mut controls = Controls::new();
        controls.handle_key(KeyCode::Escape, true);
        controls.handle_key(KeyCode::W, true);

        assert!(controls.actions().is_empty());
    }

    #[test]
    fn test_input_vector_clamps() {
        let input = InputVector::new(3.0, -2.0, f32::NAN);
        assert_eq!(input, InputVector::new(1.0, -1.0, 0.0));
    }
}
