use clox::bytecode::Operation;
use clox::{Chunk, Value, Vm};

fn main() {

  #[cfg(feature = "trace_computation")]
  println!("Computation Tracing ENABLED");

  let mut vm = Vm::new();

  let mut chunk = Chunk::new();
  let constant = chunk.add_constant(Value::Number(1.2));
  chunk.write_operation(Operation::Constant, 123);
  chunk.write(constant as u8, 123);
  chunk.write_operation(Operation::Negate, 123);

  chunk.write_operation(Operation::Return, 123);

  #[cfg(feature = "trace_computation")]
  println!("{}", clox::bytecode::disassemble_chunk(&chunk, "test chunk"));

  let result = vm.interpret(&chunk);
  chunk.free();

  if let Err(e) = result {
    eprintln!("{}", e);
    std::process::exit(e.exit_code());
  }
}
