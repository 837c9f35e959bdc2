/*!
  A `Chunk` is one compiled unit: the code stream, the constants it refers to, and the source
  line of every code byte.

  Chunks are append-only. A producer grows one with `write` and `add_constant` (or the
  checked helpers built on them) and then lends it to the VM, which only reads it.
*/

use crate::bytecode::{encode_instruction, EncodedInstruction, Instruction, Operation};
use crate::error::ChunkError;
use crate::value::Value;

/// A constant is referenced by a one byte operand, so a chunk can address this many.
pub const MAX_CONSTANTS: usize = 256;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Chunk {
  code      : Vec<u8>,
  constants : Vec<Value>,
  // Invariant: `lines.len() == code.len()`.
  lines     : Vec<usize>,
}

impl Chunk {

  pub fn new() -> Chunk {
    Chunk {
      code      : Vec::new(),
      constants : Vec::new(),
      lines     : Vec::new(),
    }
  }

  /// Appends a byte of code and the source line it came from.
  pub fn write(&mut self, byte: u8, line: usize) {
    self.code.push(byte);
    self.lines.push(line);
  }

  pub fn write_operation(&mut self, operation: Operation, line: usize) {
    self.write(operation.code(), line);
  }

  /// Appends every byte of `instruction`, all attributed to `line`.
  pub fn write_instruction(&mut self, instruction: Instruction, line: usize) {
    match encode_instruction(instruction) {
      EncodedInstruction::Byte(byte) => {
        self.write(byte, line);
      }
      EncodedInstruction::TwoBytes(bytes) => {
        self.write(bytes.opcode, line);
        self.write(bytes.operand, line);
      }
    }
  }

  /**
    Appends `value` to the constant pool and returns its index.

    The index is not checked against the one byte operand encoding. Producers that emit
    `Constant` instructions should prefer `write_constant`.
  */
  pub fn add_constant(&mut self, value: Value) -> usize {
    self.constants.push(value);
    self.constants.len() - 1
  }

  /// Adds `value` to the pool and emits the `Constant` instruction that loads it.
  pub fn write_constant(&mut self, value: Value, line: usize) -> Result<u8, ChunkError> {
    if self.constants.len() >= MAX_CONSTANTS {
      return Err(ChunkError::TooManyConstants);
    }
    let index = self.add_constant(value) as u8;
    self.write_instruction(Instruction::Constant { index }, line);
    Ok(index)
  }

  /// Releases all storage. The chunk is left empty.
  pub fn free(&mut self) {
    self.code      = Vec::new();
    self.constants = Vec::new();
    self.lines     = Vec::new();
  }

  // region Accessors

  pub fn code(&self) -> &[u8] {
    &self.code
  }

  pub fn constants(&self) -> &[Value] {
    &self.constants
  }

  pub fn lines(&self) -> &[usize] {
    &self.lines
  }

  pub fn constant(&self, index: u8) -> Option<&Value> {
    self.constants.get(index as usize)
  }

  /// The source line of the code byte at `offset`.
  pub fn line(&self, offset: usize) -> Option<usize> {
    self.lines.get(offset).copied()
  }

  pub fn len(&self) -> usize {
    self.code.len()
  }

  pub fn is_empty(&self) -> bool {
    self.code.is_empty()
  }

  // endregion
}
