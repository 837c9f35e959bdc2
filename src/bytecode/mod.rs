/*!

  Bytecode is a stream of bytes. Every instruction starts with a one byte opcode, which may
  be followed by operand bytes. The sizes of instruction components are as follows:

    Opcode:          8 bits
    Constant index:  8 bits

  so a chunk can refer to at most 256 constants, and no instruction is longer than two
  bytes. There is no alignment or padding; instructions are decoded bytewise.

  An enum is used only for the opcode itself, not the entire instruction, and inhabits a
  single byte. `Instruction` is the decoded form, used for emitting, dispatching and
  listing, but never stored in a chunk.

*/

mod binary;
mod instruction;
mod disassembly;

pub use binary::{decode_operands, encode_instruction, try_decode_instruction, instruction_size,
                 EncodedInstruction, TwoBytes};
pub use instruction::{Instruction, Operation};
pub use disassembly::{disassemble_chunk, disassemble_instruction, Disassembly,
                      InstructionListing};
pub(crate) use disassembly::TABLE_DISPLAY_FORMAT;
