//! Fenced code block tracking
//!
//! Lines inside a fenced code block are never scanned for tags or links.
//! Fences do not nest: a file with an odd number of fence lines keeps
//! everything after the last one excluded.

use crate::constants::CODE_FENCE;

/// Line classifier for one note, fed lines in order
#[derive(Debug, Default, Clone)]
pub struct CodeFence {
    in_code_block: bool,
}

impl CodeFence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next line and report whether it may be scanned.
    ///
    /// A fence line toggles the state and is itself never admitted.
    pub fn admits(&mut self, line: &str) -> bool {
        if line.starts_with(CODE_FENCE) {
            self.in_code_block = !self.in_code_block;
            return false;
        }
        !self.in_code_block
    }

    pub fn in_code_block(&self) -> bool {
        self.in_code_block
    }
}
