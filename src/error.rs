//! Error types for producing and running chunks.

use thiserror::Error;

use crate::bytecode::Operation;
use crate::chunk::MAX_CONSTANTS;

/// Why the bytes at some offset are not an instruction.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum DecodeError {
  #[error("no instruction at offset {offset}: end of code")]
  EndOfCode { offset: usize },
  #[error("unknown opcode {byte} at offset {offset}")]
  UnknownOpcode { offset: usize, byte: u8 },
  #[error("{operation} at offset {offset} is missing its operand")]
  MissingOperand { offset: usize, operation: Operation },
}

/// Errors a producer can hit while appending to a chunk.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum ChunkError {
  #[error("too many constants in one chunk (limit {})", MAX_CONSTANTS)]
  TooManyConstants,
}

/// The specific fault that stopped the dispatch loop.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum FaultKind {
  #[error("unknown opcode {0}")]
  UnknownOpcode(u8),
  #[error("unexpected end of code")]
  UnexpectedEnd,
  #[error("stack underflow")]
  StackUnderflow,
  #[error("stack overflow (limit {limit})")]
  StackOverflow { limit: usize },
  #[error("operand of {operation} must be a number, found {found}")]
  OperandType { operation: Operation, found: &'static str },
  #[error("constant index {index} out of range for a pool of {pool_size}")]
  ConstantIndex { index: u8, pool_size: usize },
}

/// A fault detected during dispatch, located at the instruction that raised it.
#[derive(Clone, Debug, PartialEq, Error)]
#[error(
  "{}{kind} at offset {offset}",
  .line.map(|line| format!("[line {}] ", line)).unwrap_or_default()
)]
pub struct RuntimeError {
  pub kind: FaultKind,
  /// Offset of the first byte of the faulting instruction.
  pub offset: usize,
  /// Source line of that instruction, if the chunk has one recorded for it.
  pub line: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum InterpretError {
  /// Reserved for a front end that validates source before execution. The VM never
  /// produces it.
  #[error("compile error: {0}")]
  Compile(String),
  #[error("runtime error: {0}")]
  Runtime(#[from] RuntimeError),
}

impl InterpretError {
  /// The conventional process exit code for this error (`sysexits.h`).
  pub fn exit_code(&self) -> i32 {
    match self {
      InterpretError::Compile(_) => 65,
      InterpretError::Runtime(_) => 70,
    }
  }
}

/// `Ok(())` is normal termination via `Return`.
pub type InterpretResult = Result<(), InterpretError>;
