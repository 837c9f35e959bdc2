/*!
  This module is responsible for the encoding and decoding of binary instructions.

*/
use std::convert::TryFrom;

use super::{Operation, Instruction};
use crate::error::DecodeError;

// Convenience for decomposing a two byte instruction into its opcode and operand:
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TwoBytes {
  pub opcode: u8,
  pub operand: u8
}

/// An `Either` type for an encoded instruction, allowing the instruction to be
/// either one byte or two.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EncodedInstruction{
  Byte(u8),
  TwoBytes(TwoBytes)
}

impl EncodedInstruction {
  /// The number of bytes this instruction occupies in the code stream.
  pub fn size(&self) -> usize {
    match self {
      EncodedInstruction::Byte(_)     => 1,
      EncodedInstruction::TwoBytes(_) => 2
    }
  }
}

/**
  Builds the instruction for `opcode`, pulling each operand byte from `next_operand` in
  stream order. This is the only place that knows which operands an opcode takes; the
  VM feeds it from its instruction pointer and the disassembler from a slice.
*/
pub fn decode_operands<E, F>(opcode: Operation, mut next_operand: F) -> Result<Instruction, E>
  where F: FnMut() -> Result<u8, E>
{
  let instruction =
    match opcode {
      // [OpCode:8][Index:8]
      Operation::Constant => Instruction::Constant { index: next_operand()? },
      // [OpCode:8]
      Operation::Negate => Instruction::Negate,
      Operation::Return => Instruction::Return,
    };

  Ok(instruction)
}

/**
  Decodes the instruction starting at `offset` in `code`. Decoding is read-only, so the
  disassembler can list a chunk without disturbing it.
*/
pub fn try_decode_instruction(code: &[u8], offset: usize) -> Result<Instruction, DecodeError> {
  let byte = *code.get(offset).ok_or(DecodeError::EndOfCode { offset })?;
  let opcode =
    Operation::try_from(byte)
      .map_err(|_| DecodeError::UnknownOpcode { offset, byte })?;

  let mut operand_offset = offset;
  decode_operands(opcode, || {
    operand_offset += 1;
    code.get(operand_offset)
        .copied()
        .ok_or(DecodeError::MissingOperand { offset, operation: opcode })
  })
}

/// Encodes the instruction into bytecode.
pub fn encode_instruction(instruction: Instruction) -> EncodedInstruction{
  match instruction{

    Instruction::Constant { index } => {
      // [OpCode:8][Index:8]
      EncodedInstruction::TwoBytes(TwoBytes {
        opcode: Operation::Constant.code(),
        operand: index
      })
    },

    nullary => {
      // [OpCode:8]
      EncodedInstruction::Byte(nullary.operation().code())
    },
  }
}


/// Returns the size in bytes of an instruction for the corresponding opcode.
pub fn instruction_size(opcode: Operation) -> usize{
  1 + opcode.arity()
}
