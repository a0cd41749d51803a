/// Module for managing the program source and the token scanning that is shared by the compile
/// and run passes.
pub mod lang;

/// Module for the runtime and the data structures used by the interpreter.  As well as the
/// interpreter itself.
pub mod runtime;
