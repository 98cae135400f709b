//! Serialization into the shape external serializers consume.
//!
//! ```text
//! { "sourceInstructions": [[name, arg...], ...],
//!   "stepInstructions":   [[name, arg...], ...] }
//! ```

use serde::ser::{SerializeSeq, SerializeStruct};
use serde::{Serialize, Serializer};

use super::{Bytecode, Instruction};

impl Serialize for Instruction {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(1 + self.args.len()))?;
        seq.serialize_element(&self.name)?;
        for arg in &self.args {
            seq.serialize_element(arg)?;
        }
        seq.end()
    }
}

impl Serialize for Bytecode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("Bytecode", 2)?;
        s.serialize_field("sourceInstructions", &self.source_instructions)?;
        s.serialize_field("stepInstructions", &self.step_instructions)?;
        s.end()
    }
}
