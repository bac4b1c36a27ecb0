pub mod guess;
pub mod letter;
pub mod marks;
pub mod score;
