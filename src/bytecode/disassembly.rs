/*!
  The human readable listing of a chunk. This module leverages the `strum` derives of
  `Operation` for instruction names and renders the listing as a `prettytable` table.

  Disassembly only reads the chunk. Bytes that do not decode are listed rather than
  rejected, so a corrupt chunk can still be inspected.
*/

use std::fmt::{Display, Formatter};

use prettytable::{format as TableFormat, Table};

use super::{try_decode_instruction, Instruction};
use crate::chunk::Chunk;
use crate::error::DecodeError;
use crate::value::Value;

/// One row of a listing.
#[derive(Clone, Debug, PartialEq)]
pub struct InstructionListing {
  pub offset    : usize,
  pub line      : Option<usize>,
  /// True when this instruction came from the same source line as the byte before it.
  pub same_line : bool,
  pub decoded   : Result<Instruction, DecodeError>,
  /// The pool entry a `Constant` instruction refers to, if it exists.
  pub constant  : Option<Value>,
}

impl InstructionListing {
  fn line_text(&self) -> String {
    match (self.same_line, self.line) {
      (true, _)           => "|".to_string(),
      (false, Some(line)) => line.to_string(),
      (false, None)       => "?".to_string()
    }
  }

  fn instruction_text(&self) -> String {
    match &self.decoded {
      Ok(instruction) => instruction.to_string(),
      Err(DecodeError::UnknownOpcode { byte, .. }) => format!("Unknown opcode {}", byte),
      Err(DecodeError::MissingOperand { operation, .. }) => format!("{}(<missing>)", operation),
      Err(DecodeError::EndOfCode { .. }) => "<end of code>".to_string(),
    }
  }

  fn constant_text(&self) -> String {
    match (&self.decoded, &self.constant) {
      (Ok(Instruction::Constant { .. }), Some(value)) => format!("'{}'", value),
      (Ok(Instruction::Constant { .. }), None)        => "<out of range>".to_string(),
      _                                               => String::new()
    }
  }
}

impl Display for InstructionListing {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{:04} {:>4} {} {}",
      self.offset,
      self.line_text(),
      self.instruction_text(),
      self.constant_text()
    )
  }
}

/// Lists the instruction at `offset`. Also returns the offset of the next instruction.
pub fn disassemble_instruction(chunk: &Chunk, offset: usize) -> (InstructionListing, usize) {
  let decoded = try_decode_instruction(chunk.code(), offset);

  let next_offset =
    match &decoded {
      Ok(instruction) => offset + super::instruction_size(instruction.operation()),
      // Skip the single undecodable byte.
      Err(DecodeError::UnknownOpcode { .. }) => offset + 1,
      Err(_) => chunk.len(),
    };

  let constant =
    match decoded {
      Ok(Instruction::Constant { index }) => chunk.constant(index).copied(),
      _ => None
    };

  let line      = chunk.line(offset);
  let same_line = offset > 0 && line == chunk.line(offset - 1);

  (InstructionListing { offset, line, same_line, decoded, constant }, next_offset)
}

/// A full listing of a chunk under a name.
#[derive(Clone, Debug, PartialEq)]
pub struct Disassembly {
  pub name     : String,
  pub listings : Vec<InstructionListing>,
}

pub fn disassemble_chunk(chunk: &Chunk, name: &str) -> Disassembly {
  let mut listings = Vec::new();
  let mut offset   = 0;

  while offset < chunk.len() {
    let (listing, next_offset) = disassemble_instruction(chunk, offset);
    listings.push(listing);
    offset = next_offset;
  }

  Disassembly { name: name.to_string(), listings }
}

impl Disassembly {
  pub fn to_table(&self) -> Table {
    let mut table = Table::new();

    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->"Offset", ubr->"Line", ubl->"Instruction", ubl->"Constant"]);

    for listing in &self.listings {
      table.add_row(
        row![
          r->format!("{:04}", listing.offset),
          r->listing.line_text(),
          listing.instruction_text(),
          listing.constant_text()
        ]
      );
    }
    table
  }
}

impl Display for Disassembly {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "== {} ==\n{}", self.name, self.to_table())
  }
}


lazy_static! {
  pub(crate) static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .separator(
        TableFormat::LinePosition::Bottom,
        TableFormat::LineSeparator::new('─', '┴', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}
