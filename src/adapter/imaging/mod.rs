//! Animation Assemblers

pub mod gif_assembler;

pub use gif_assembler::GifAssembler;
