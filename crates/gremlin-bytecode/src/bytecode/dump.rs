//! Human-readable bytecode rendering.
//!
//! Format: `[[source...], [step...]]` where each instruction prints as
//! `name(arg, ...)`, e.g. `[[], [V(), out(created)]]`.

use std::fmt;

use crate::value::write_joined;

use super::{Bytecode, Instruction};

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        write_joined(f, &self.args)?;
        f.write_str(")")
    }
}

impl fmt::Display for Bytecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        write_list(f, &self.source_instructions)?;
        f.write_str(", ")?;
        write_list(f, &self.step_instructions)?;
        f.write_str("]")
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, instructions: &[Instruction]) -> fmt::Result {
    f.write_str("[")?;
    for (i, instruction) in instructions.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{instruction}")?;
    }
    f.write_str("]")
}
