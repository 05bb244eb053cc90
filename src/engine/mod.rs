// Engine modules: frame timing, input, software rendering

pub mod game_loop;
pub mod input;
pub mod renderer;
