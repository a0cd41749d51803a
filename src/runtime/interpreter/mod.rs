use rustc_hash::FxHashMap;

pub mod chorth_interpreter;

/// The data stack of 32-bit signed values used for operands and results.  The top of the stack is
/// the high end of the vector.
pub type DataStack = Vec<i32>;

/// The return stack of program counter values used for subroutine linkage by `:` definitions and
/// `;`.
pub type ReturnStack = Vec<i32>;

/// The jump map built during the compile pass.  Maps the source offset of a jump-producing token
/// to the offset it jumps to, so the run pass branches with a single lookup.  Read-only once the
/// compile pass finishes.
pub type JumpMap = FxHashMap<usize, usize>;
