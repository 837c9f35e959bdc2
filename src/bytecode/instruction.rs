use std::fmt::{Display, Formatter};

use strum_macros::{Display as StrumDisplay, EnumString, IntoStaticStr};
use num_enum::{TryFromPrimitive, IntoPrimitive};

/**
  Opcodes of the virtual machine.

  Each opcode is a single byte in the code stream. The discriminants are the encoding, so
  they are listed explicitly and must never be reordered or reused: a chunk written with
  one numbering cannot be read with another.
*/
#[derive(
  StrumDisplay, IntoStaticStr, EnumString, TryFromPrimitive, IntoPrimitive,
  Clone,        Copy,          Eq,         PartialEq,        Debug,         Hash
)]
#[repr(u8)]
pub enum Operation {
  Constant = 0,      // constant( index )
  Negate   = 1,      // negate
  Return   = 2,      // return
}

/// Holds the unencoded components of an instruction. As such, it enumerates the possible
/// instruction argument combinations.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Instruction {
  /// [OpCode:8][Index:8]
  Constant {
    index: u8
  },
  /// [OpCode:8]
  Negate,
  /// [OpCode:8]
  Return,
}

impl Instruction {
  pub fn operation(&self) -> Operation {
    match self {
      Instruction::Constant { .. } => Operation::Constant,
      Instruction::Negate          => Operation::Negate,
      Instruction::Return          => Operation::Return,
    }
  }
}

impl Display for Instruction {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self{

      Instruction::Constant { index } => {
        write!(f, "{}({})", self.operation(), index)
      }

      _ => {
        write!(f, "{}", self.operation())
      }

    }
  }
}

impl Operation{
  pub fn code(&self) -> u8 {
    Into::<u8>::into(*self)
  }

  /// The number of operand bytes that follow the opcode byte.
  pub fn arity(&self) -> usize {
    match self {
      Operation::Constant => 1,
      Operation::Negate
      | Operation::Return => 0
    }
  }
}
