//! The virtual machine: a cursor into a borrowed chunk's code and a value stack, driven by a
//! fetch-decode-execute loop.

use std::convert::TryFrom;
use std::fmt::{Display, Formatter};

use prettytable::Table;

use crate::bytecode::{decode_operands, Instruction, Operation, TABLE_DISPLAY_FORMAT};
#[cfg(feature = "trace_computation")]
use crate::bytecode::disassemble_instruction;
use crate::chunk::Chunk;
use crate::error::{FaultKind, InterpretError, InterpretResult, RuntimeError};
use crate::value::Value;

/// Stack depth of a `Vm::new()` machine.
pub const DEFAULT_STACK_LIMIT: usize = 256;

/// What the dispatch loop does after an instruction.
enum Flow {
  Continue,
  Return
}

#[derive(Clone, Debug)]
pub struct Vm {
  // Registers //
  ip          : usize,      // Instruction pointer, offset of the next byte to fetch

  // Memory Stores
  stack       : Vec<Value>, // Operands awaiting consumption; the top is the last element
  stack_limit : usize,

  // Values discarded by the most recent `Return`.
  residue     : Vec<Value>,
}

impl Vm {

  // region Display methods

  fn make_stack_table(stack: &[Value]) -> Table {
    let mut table = Table::new();

    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->"Slot", ubl->"Value"]);

    let top = stack.len().wrapping_sub(1);
    for (i, value) in stack.iter().enumerate() {
      match i == top {

        true  => {
          table.add_row(row![r->format!("* --> [{}] =", i), value.to_string()]);
        }

        false => {
          table.add_row(row![r->format!("[{}] =", i), value.to_string()]);
        }

      }
    }
    table
  }

  // endregion

  // region Low-level utility methods

  pub fn new() -> Vm {
    Vm::with_stack_limit(DEFAULT_STACK_LIMIT)
  }

  /// A machine whose stack holds at most `stack_limit` values.
  pub fn with_stack_limit(stack_limit: usize) -> Vm {
    Vm {
      ip          : 0,
      stack       : Vec::new(),
      stack_limit,
      residue     : Vec::new(),
    }
  }

  pub fn stack(&self) -> &[Value] {
    &self.stack
  }

  pub fn stack_limit(&self) -> usize {
    self.stack_limit
  }

  /**
    The values left on the stack when the last interpretation reached `Return`, bottom
    first. `Return` discards them; they are kept here only for inspection and are cleared
    by the next `interpret`.
  */
  pub fn residue(&self) -> &[Value] {
    &self.residue
  }

  fn push(&mut self, value: Value) -> Result<(), FaultKind> {
    if self.stack.len() >= self.stack_limit {
      return Err(FaultKind::StackOverflow { limit: self.stack_limit });
    }
    self.stack.push(value);
    Ok(())
  }

  fn pop(&mut self) -> Result<Value, FaultKind> {
    self.stack.pop().ok_or(FaultKind::StackUnderflow)
  }

  /// The value `distance` slots below the top of the stack.
  fn peek(&self, distance: usize) -> Result<&Value, FaultKind> {
    self.stack
        .len()
        .checked_sub(distance + 1)
        .and_then(|i| self.stack.get(i))
        .ok_or(FaultKind::StackUnderflow)
  }

  /// Fetches the byte at `ip` and advances past it. Fetching at the end of code is a fault.
  fn read_byte(&mut self, chunk: &Chunk) -> Result<u8, FaultKind> {
    let byte = *chunk.code().get(self.ip).ok_or(FaultKind::UnexpectedEnd)?;
    self.ip += 1;
    Ok(byte)
  }

  fn fault(chunk: &Chunk, offset: usize, kind: FaultKind) -> RuntimeError {
    // A fetch past the end is blamed on the last line that exists.
    let line = chunk.line(offset).or_else(|| chunk.lines().last().copied());
    RuntimeError { kind, offset, line }
  }

  // endregion

  // region Interpretation

  /**
    Runs `chunk` from its first byte until `Return` or a fault.

    The chunk is only borrowed for this call. The stack is empty when this returns,
    whatever the outcome.
  */
  pub fn interpret(&mut self, chunk: &Chunk) -> InterpretResult {
    self.ip = 0;
    self.stack.clear();
    self.residue.clear();

    #[cfg(feature = "trace_computation")]
      println!("Interpreting {} bytes of bytecode.", chunk.len());

    let result = self.run(chunk);
    // No resynchronization after a fault; whatever was pushed is abandoned.
    self.stack.clear();
    result.map_err(InterpretError::from)
  }

  fn run(&mut self, chunk: &Chunk) -> Result<(), RuntimeError> {
    loop {
      let offset = self.ip;

      #[cfg(feature = "trace_computation")]
        {
          println!("{}", self);
          if offset < chunk.len() {
            println!("{}", disassemble_instruction(chunk, offset).0);
          }
        }

      let flow =
        self.decode(chunk)
            .and_then(|instruction| self.execute(chunk, instruction))
            .map_err(|kind| Vm::fault(chunk, offset, kind))?;

      if let Flow::Return = flow {
        return Ok(());
      }
    }
  }

  /// Fetches one opcode and whatever operand bytes it takes.
  fn decode(&mut self, chunk: &Chunk) -> Result<Instruction, FaultKind> {
    let byte      = self.read_byte(chunk)?;
    let operation = Operation::try_from(byte).map_err(|_| FaultKind::UnknownOpcode(byte))?;

    decode_operands(operation, || self.read_byte(chunk))
  }

  fn execute(&mut self, chunk: &Chunk, instruction: Instruction) -> Result<Flow, FaultKind> {
    match instruction {

      Instruction::Constant { index } => {
        let value =
          *chunk.constant(index)
                .ok_or(FaultKind::ConstantIndex { index, pool_size: chunk.constants().len() })?;
        self.push(value)?;
      }

      Instruction::Negate => {
        let operand = self.peek(0)?;
        if !operand.is_number() {
          return Err(FaultKind::OperandType {
            operation: Operation::Negate,
            found: operand.type_name()
          });
        }
        if let Value::Number(n) = self.pop()? {
          self.push(Value::Number(-n))?;
        }
      }

      Instruction::Return => {
        self.residue = std::mem::take(&mut self.stack);
        return Ok(Flow::Return);
      }

    }
    Ok(Flow::Continue)
  }

  // endregion
}

impl Default for Vm {
  fn default() -> Vm {
    Vm::new()
  }
}

impl Display for Vm {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let stack_table = Vm::make_stack_table(&self.stack);
    write!(f, "IP: {:04}\tStack depth: {}\n{}", self.ip, self.stack.len(), stack_table)
  }
}
