/*!
  A minimal bytecode virtual machine.

  A [`Chunk`] holds a compiled unit: the code stream, its constant pool and a line map.
  A [`Vm`] borrows a chunk for one call to [`Vm::interpret`] and walks its code with a
  fetch-decode-execute loop over a value stack.
*/

#[macro_use] extern crate prettytable;
#[macro_use] extern crate lazy_static;
extern crate strum;

pub mod bytecode;
pub mod chunk;
pub mod error;
pub mod value;
pub mod vm;

pub use chunk::{Chunk, MAX_CONSTANTS};
pub use error::{ChunkError, DecodeError, FaultKind, InterpretError, InterpretResult, RuntimeError};
pub use value::Value;
pub use vm::{Vm, DEFAULT_STACK_LIMIT};
