use pretty_assertions::assert_eq;

use clox::bytecode::{Instruction, Operation};
use clox::{Chunk, FaultKind, InterpretError, RuntimeError, Value, Vm, DEFAULT_STACK_LIMIT};

/// Builds a chunk with the given constant pool, writing every code byte on line 123.
fn build_chunk(constants: &[f64], code: &[u8]) -> Chunk {
  let mut chunk = Chunk::new();
  for constant in constants {
    chunk.add_constant(Value::Number(*constant));
  }
  for byte in code {
    chunk.write(*byte, 123);
  }
  chunk
}

fn runtime_fault(kind: FaultKind, offset: usize, line: Option<usize>) -> InterpretError {
  InterpretError::Runtime(RuntimeError { kind, offset, line })
}

const CONSTANT: u8 = 0;
const NEGATE: u8 = 1;
const RETURN: u8 = 2;

macro_rules! test_interpret {
  ($name:ident, $constants:expr, $code:expr, $expected:expr, $residue:expr) => {
    #[test]
    fn $name() {
      let chunk  = build_chunk(&$constants, &$code);
      let residue: &[Value] = &$residue;
      let mut vm = Vm::new();
      let result = vm.interpret(&chunk);
      assert_eq!(result, $expected);
      assert_eq!(vm.residue(), residue);
      assert!(vm.stack().is_empty());
    }
  };
}

test_interpret!(
  constant_then_return,
  [1.2], [CONSTANT, 0, RETURN],
  Ok(()), [Value::Number(1.2)]
);
test_interpret!(
  negate_then_return,
  [1.2], [CONSTANT, 0, NEGATE, RETURN],
  Ok(()), [Value::Number(-1.2)]
);
test_interpret!(
  double_negation,
  [3.0], [CONSTANT, 0, NEGATE, NEGATE, RETURN],
  Ok(()), [Value::Number(3.0)]
);
test_interpret!(
  several_values_left_behind,
  [1.0, 2.0], [CONSTANT, 0, CONSTANT, 1, RETURN],
  Ok(()), [Value::Number(1.0), Value::Number(2.0)]
);
test_interpret!(
  bare_return,
  [], [RETURN],
  Ok(()), []
);
test_interpret!(
  negate_on_empty_stack,
  [], [NEGATE, RETURN],
  Err(runtime_fault(FaultKind::StackUnderflow, 0, Some(123))), []
);
test_interpret!(
  unknown_opcode,
  [1.0], [CONSTANT, 0, 0xEE, RETURN],
  Err(runtime_fault(FaultKind::UnknownOpcode(0xEE), 2, Some(123))), []
);
test_interpret!(
  empty_chunk,
  [], [],
  Err(runtime_fault(FaultKind::UnexpectedEnd, 0, None)), []
);
test_interpret!(
  missing_return,
  [1.0], [CONSTANT, 0],
  Err(runtime_fault(FaultKind::UnexpectedEnd, 2, Some(123))), []
);
test_interpret!(
  truncated_constant,
  [1.0], [CONSTANT],
  Err(runtime_fault(FaultKind::UnexpectedEnd, 0, Some(123))), []
);
test_interpret!(
  constant_index_out_of_range,
  [1.0], [CONSTANT, 5, RETURN],
  Err(runtime_fault(FaultKind::ConstantIndex { index: 5, pool_size: 1 }, 0, Some(123))), []
);

#[test]
fn negate_rejects_non_numbers() {
  let mut chunk = Chunk::new();
  let index = chunk.add_constant(Value::Bool(true));
  chunk.write_instruction(Instruction::Constant { index: index as u8 }, 1);
  chunk.write_operation(Operation::Negate, 2);
  chunk.write_operation(Operation::Return, 3);

  let mut vm = Vm::new();
  assert_eq!(
    vm.interpret(&chunk),
    Err(runtime_fault(
      FaultKind::OperandType { operation: Operation::Negate, found: "bool" },
      2,
      Some(2)
    ))
  );
  assert!(vm.stack().is_empty());
}

#[test]
fn stack_overflow_is_a_runtime_error() {
  let mut chunk = Chunk::new();
  chunk.add_constant(Value::Number(0.0));
  for _ in 0..3 {
    chunk.write_instruction(Instruction::Constant { index: 0 }, 7);
  }
  chunk.write_operation(Operation::Return, 8);

  let mut vm = Vm::with_stack_limit(2);
  assert_eq!(
    vm.interpret(&chunk),
    Err(runtime_fault(FaultKind::StackOverflow { limit: 2 }, 4, Some(7)))
  );
  assert_eq!(Vm::new().stack_limit(), DEFAULT_STACK_LIMIT);
}

#[test]
fn no_state_leaks_between_calls() {
  let mut vm = Vm::new();

  let first = build_chunk(&[1.2], &[CONSTANT, 0, CONSTANT, 0, RETURN]);
  assert_eq!(vm.interpret(&first), Ok(()));
  assert_eq!(vm.residue().len(), 2);

  let second = build_chunk(&[], &[NEGATE, RETURN]);
  assert!(vm.interpret(&second).is_err());
  assert!(vm.residue().is_empty());
  assert!(vm.stack().is_empty());

  let third = build_chunk(&[5.0], &[CONSTANT, 0, NEGATE, RETURN]);
  assert_eq!(vm.interpret(&third), Ok(()));
  assert_eq!(vm.residue(), &[Value::Number(-5.0)]);
}

#[test]
fn independent_machines() {
  let chunk = build_chunk(&[2.0], &[CONSTANT, 0, NEGATE, RETURN]);
  let mut a = Vm::new();
  let mut b = Vm::default();
  assert_eq!(a.interpret(&chunk), Ok(()));
  assert!(b.residue().is_empty());
  assert_eq!(b.interpret(&chunk), Ok(()));
  assert_eq!(a.residue(), b.residue());
}

#[test]
fn interpreting_does_not_change_the_chunk() {
  let chunk  = build_chunk(&[1.2], &[CONSTANT, 0, NEGATE, RETURN]);
  let before = chunk.clone();
  let mut vm = Vm::new();
  vm.interpret(&chunk).unwrap();
  assert_eq!(chunk, before);
}

#[test]
fn opcode_numbering_is_stable() {
  assert_eq!(Operation::Constant.code(), CONSTANT);
  assert_eq!(Operation::Negate.code(), NEGATE);
  assert_eq!(Operation::Return.code(), RETURN);
}
