pub mod codegen;
pub mod compile;
pub mod error;
pub mod ir;
pub mod lower;
pub mod parse;
pub mod runtime;
pub mod validate;
pub mod wasm;

pub use compile::{CompileOptions, CompiledProgram, Compiler};
pub use error::{CompilerError, Phase};
