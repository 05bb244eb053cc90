// Input handling for a top-down character
//
// - `direction`: the four facing/movement directions and per-direction tables
// - `stack`: held direction keys in press order (key rollover)
// - `bindings`: keyboard key to direction mapping, remappable
//
// ## Usage Example
//
// ```rust
// use engine::input::{DirectionStack, KeyBindings};
//
// let bindings = KeyBindings::default();
// let mut held = DirectionStack::new();
//
// // On key press / release
// if let Some(direction) = bindings.direction_for(key_code) {
//     held.push(direction);
// }
//
// // Each frame, the most recent still-held key wins
// if let Some(direction) = held.top() {
//     // Face and move that way
// }
// ```

pub mod bindings;
pub mod direction;
pub mod stack;

// Re-export commonly used types
pub use bindings::KeyBindings;
pub use direction::{Direction, DirectionMap};
pub use stack::DirectionStack;
