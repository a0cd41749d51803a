/// A buffer for processing program source.  It owns the source bytes and the program cursor that
/// the compile and run passes share.  The compile pass only ever moves the cursor forward, while
/// the run pass also jumps it around for branches, calls and returns.
///
/// The source bytes are never modified once loaded.
pub struct ProgramBuffer
{
    /// The bytes of the program being processed.
    program: Vec<u8>,

    /// The program cursor.  An index into the source bytes.
    pc: usize
}


impl ProgramBuffer
{
    /// Create a new ProgramBuffer for a program's source bytes, with the cursor at the beginning.
    pub fn new(program: Vec<u8>) -> ProgramBuffer
    {
        ProgramBuffer { program, pc: 0 }
    }

    /// The current position of the program cursor.
    pub fn pc(&self) -> usize
    {
        self.pc
    }

    /// Move the program cursor to a new position.  Used for pre-resolved jumps, calls, and
    /// returns, and to position the cursor at the start address for the run pass.
    pub fn set_pc(&mut self, pc: usize)
    {
        self.pc = pc;
    }

    /// The length of the program source in bytes.
    pub fn len(&self) -> usize
    {
        self.program.len()
    }

    /// Has the cursor moved past the last byte of the source?
    pub fn at_end(&self) -> bool
    {
        self.pc >= self.program.len()
    }

    /// Take a peek at the byte under the cursor without consuming it.  None when the cursor is
    /// past the end of the source.
    pub fn current_byte(&self) -> Option<u8>
    {
        self.program.get(self.pc).copied()
    }

    /// Get and consume the byte under the cursor, advancing the cursor by one.
    pub fn eat_byte(&mut self) -> Option<u8>
    {
        let byte = self.current_byte();

        if byte.is_some()
        {
            self.pc += 1;
        }

        byte
    }
}
