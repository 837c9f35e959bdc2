//! Values live on the VM's stack and in a chunk's constant pool. There is no heap: every
//! value is a plain, `Copy`-able datum.

use std::fmt::{Display, Formatter};

#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Value {
  Number(f64),
  Bool(bool),
  Nil
}

impl Value {
  /// The name of the variant, for diagnostics.
  pub fn type_name(&self) -> &'static str {
    match self {
      Value::Number(_) => "number",
      Value::Bool(_)   => "bool",
      Value::Nil       => "nil"
    }
  }

  pub fn as_number(&self) -> Option<f64> {
    match self {
      Value::Number(n) => Some(*n),
      _                => None
    }
  }

  pub fn is_number(&self) -> bool {
    self.as_number().is_some()
  }
}

impl Display for Value {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Value::Number(n) => write!(f, "{}", format_general(*n)),
      Value::Bool(b)   => write!(f, "{}", b),
      Value::Nil       => write!(f, "nil")
    }
  }
}

/// Significant digits of the `%g` style number format.
const GENERAL_PRECISION: i32 = 6;

/**
  Formats `n` like C's `%g`: six significant digits, trailing zeros dropped, and exponent
  notation when the decimal exponent is below -4 or at least six.
*/
fn format_general(n: f64) -> String {
  if n.is_nan() {
    return "nan".to_string();
  }
  if n.is_infinite() {
    return if n < 0.0 { "-inf".to_string() } else { "inf".to_string() };
  }

  // Rounding to the precision first settles the exponent, e.g. 999999.5 becomes 1e+06.
  let scientific = format!("{:.*e}", (GENERAL_PRECISION - 1) as usize, n);
  let (mantissa, exponent) =
    match scientific.split_once('e') {
      Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
      None                       => (scientific.as_str(), 0)
    };

  if exponent < -4 || exponent >= GENERAL_PRECISION {
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
  } else {
    let decimals = (GENERAL_PRECISION - 1 - exponent) as usize;
    trim_fraction(&format!("{:.*}", decimals, n)).to_string()
  }
}

/// Drops trailing fractional zeros, and the point itself if nothing is left after it.
fn trim_fraction(digits: &str) -> &str {
  match digits.contains('.') {
    true  => digits.trim_end_matches('0').trim_end_matches('.'),
    false => digits
  }
}

impl From<f64> for Value {
  fn from(n: f64) -> Value {
    Value::Number(n)
  }
}

impl From<bool> for Value {
  fn from(b: bool) -> Value {
    Value::Bool(b)
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn display_numbers(){
    assert_eq!(Value::Number(1.2).to_string(), "1.2");
    assert_eq!(Value::Number(-1.2).to_string(), "-1.2");
    assert_eq!(Value::Number(3.0).to_string(), "3");
  }

  #[test]
  fn display_numbers_like_printf_general(){
    assert_eq!(Value::Number(1e21).to_string(), "1e+21");
    assert_eq!(Value::Number(123456789.0).to_string(), "1.23457e+08");
    assert_eq!(Value::Number(999999.5).to_string(), "1e+06");
    assert_eq!(Value::Number(100000.0).to_string(), "100000");
    assert_eq!(Value::Number(0.0001).to_string(), "0.0001");
    assert_eq!(Value::Number(0.00001234).to_string(), "1.234e-05");
    assert_eq!(Value::Number(1.0 / 3.0).to_string(), "0.333333");
    assert_eq!(Value::Number(0.0).to_string(), "0");
    assert_eq!(Value::Number(-0.0).to_string(), "-0");
  }

  #[test]
  fn display_non_finite_numbers(){
    assert_eq!(Value::Number(f64::NAN).to_string(), "nan");
    assert_eq!(Value::Number(f64::INFINITY).to_string(), "inf");
    assert_eq!(Value::Number(f64::NEG_INFINITY).to_string(), "-inf");
  }

  #[test]
  fn display_others(){
    assert_eq!(Value::Bool(true).to_string(), "true");
    assert_eq!(Value::Nil.to_string(), "nil");
  }

  #[test]
  fn numeric_view(){
    assert_eq!(Value::from(2.5).as_number(), Some(2.5));
    assert_eq!(Value::from(false).as_number(), None);
    assert!(!Value::Nil.is_number());
    assert_eq!(Value::Nil.type_name(), "nil");
  }
}
