//! Traversal bytecode: the portable instruction list.
//!
//! A [`Bytecode`] holds two ordered instruction lists. Source instructions
//! configure the traversal source (`withBulk`, `withSack`, ...); step
//! instructions are the traversal steps in call order. Arguments are bound
//! when an instruction is appended, see [`argument`].

mod argument;
mod dump;
mod wire;


pub use argument::{Argument, Arguments, IntoArgument, Values};

pub(crate) use argument::impl_value_arguments;

use crate::value::Value;

/// Construction error raised while appending an instruction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BytecodeError {
    #[error(
        "argument {position} of step `{step}` is a bound traversal; only anonymous traversals can be nested"
    )]
    BoundTraversal { step: String, position: usize },
}

/// A single `(name, args...)` instruction.
#[derive(Clone, Debug, PartialEq)]
pub struct Instruction {
    name: String,
    args: Vec<Value>,
}

impl Instruction {
    pub fn new(name: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }
}

/// Ordered, append-only instruction lists of a traversal.
///
/// Equality is structural: two programs are equal when both instruction
/// lists are equal element-wise, nested bytecode compared recursively.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bytecode {
    source_instructions: Vec<Instruction>,
    step_instructions: Vec<Instruction>,
}

impl Bytecode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source_instructions(&self) -> &[Instruction] {
        &self.source_instructions
    }

    pub fn step_instructions(&self) -> &[Instruction] {
        &self.step_instructions
    }

    /// True when neither list has instructions.
    pub fn is_empty(&self) -> bool {
        self.source_instructions.is_empty() && self.step_instructions.is_empty()
    }

    /// Step names in call order.
    pub fn step_names(&self) -> impl Iterator<Item = &str> {
        self.step_instructions.iter().map(Instruction::name)
    }

    /// Append a step instruction.
    ///
    /// Every argument is checked before anything is appended: a bound child
    /// traversal fails the call and leaves the bytecode untouched.
    pub fn add_step(
        &mut self,
        name: impl Into<String>,
        args: impl Arguments,
    ) -> Result<&mut Self, BytecodeError> {
        let name = name.into();
        let args = Self::bind_arguments(&name, args)?;
        self.step_instructions.push(Instruction { name, args });
        Ok(self)
    }

    /// Append a source instruction. Same binding rules as [`add_step`](Self::add_step).
    pub fn add_source(
        &mut self,
        name: impl Into<String>,
        args: impl Arguments,
    ) -> Result<&mut Self, BytecodeError> {
        let name = name.into();
        let args = Self::bind_arguments(&name, args)?;
        self.source_instructions.push(Instruction { name, args });
        Ok(self)
    }

    /// Append a step instruction whose arguments are plain values.
    pub fn push_step(&mut self, name: impl Into<String>, args: impl Values) -> &mut Self {
        self.step_instructions
            .push(Instruction::new(name, args.into_values()));
        self
    }

    /// Append a source instruction whose arguments are plain values.
    pub fn push_source(&mut self, name: impl Into<String>, args: impl Values) -> &mut Self {
        self.source_instructions
            .push(Instruction::new(name, args.into_values()));
        self
    }

    /// Check and translate the arguments of `step` without appending.
    ///
    /// Fails on the first bound child traversal. Anonymous children become
    /// nested bytecode values.
    pub fn bind_arguments(step: &str, args: impl Arguments) -> Result<Vec<Value>, BytecodeError> {
        let args = args.into_arguments();
        if let Some(position) = args.iter().position(Argument::is_bound_traversal) {
            return Err(BytecodeError::BoundTraversal {
                step: step.to_owned(),
                position,
            });
        }
        Ok(args.into_iter().map(Argument::into_value).collect())
    }

    /// A copy holding only the source instructions.
    ///
    /// Traversal sources use this to seed each spawned traversal.
    pub fn source_only(&self) -> Self {
        Self {
            source_instructions: self.source_instructions.clone(),
            step_instructions: Vec::new(),
        }
    }
}
