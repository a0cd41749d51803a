use crate::{ lang::{ source_buffer::ProgramBuffer,
                     tokenizing::{ self, Token } },
             runtime::{ data_structures::{ data_space::DataSpace,
                                           dictionary::{ Dictionary, WordAction } },
                        error::{ self, ScriptError },
                        interpreter::{ DataStack, JumpMap, ReturnStack } } };
use std::io::{ Read, Write };



/// The core implementation of the chorth language processor.  A single interpreter value owns the
/// program source, the data space, both stacks, and the side tables built by the compile pass.
///
/// Processing a program is two passes over the same source bytes.  The compile pass walks the
/// whole source once, laying out the data space, registering user definitions in the dispatch
/// table, and pre-resolving comment, conditional and loop jumps into the jump map.  The run pass
/// then walks the source again from the recorded start address, dispatching each token against
/// the built-in set or the dispatch table.
///
/// The input and output channels are borrowed so that the binary can hand in locked stdio while
/// tests drive the interpreter with in-memory buffers.
pub struct ChorthInterpreter<'a>
{
    /// The program source and the cursor both passes drive over it.
    program: ProgramBuffer,

    /// The byte-addressable data space.
    memory: DataSpace,

    /// The data stack.  Also used by the compile pass to match `[`/`{` markers with their
    /// closers.
    stack: DataStack,

    /// The return stack used for subroutine linkage.
    rstack: ReturnStack,

    /// Pre-resolved jump targets keyed by source offset.
    jumps: JumpMap,

    /// The dispatch table of user-defined tokens.
    dictionary: Dictionary,

    /// The offset the run pass starts executing from.  Zero unless the program sets it with `^`.
    start_address: usize,

    /// Set by `Q` to end the run loop.
    finished: bool,

    /// The byte channel `G` reads from.
    input: &'a mut dyn Read,

    /// The byte channel `W` writes to.
    output: &'a mut dyn Write
}


impl<'a> ChorthInterpreter<'a>
{
    /// Create a new interpreter for a program's source bytes and a pair of standard I/O byte
    /// channels.
    pub fn new(program: Vec<u8>,
               input: &'a mut dyn Read,
               output: &'a mut dyn Write) -> ChorthInterpreter<'a>
    {
        ChorthInterpreter
            {
                program: ProgramBuffer::new(program),
                memory: DataSpace::new(),
                stack: DataStack::new(),
                rstack: ReturnStack::new(),
                jumps: JumpMap::default(),
                dictionary: Dictionary::new(),
                start_address: 0,
                finished: false,
                input,
                output
            }
    }

    /// The program source and its cursor.
    pub fn program(&self) -> &ProgramBuffer
    {
        &self.program
    }

    /// The data space as laid out by the compile pass and mutated by the run pass.
    pub fn memory(&self) -> &DataSpace
    {
        &self.memory
    }

    /// Use to examine the full data stack when required.  The top of the stack is the last
    /// element.
    pub fn stack(&self) -> &DataStack
    {
        &self.stack
    }

    /// The jump map built by the compile pass.
    pub fn jumps(&self) -> &JumpMap
    {
        &self.jumps
    }

    /// The offset the run pass will start executing from.
    pub fn start_address(&self) -> usize
    {
        self.start_address
    }

    /// Push a value onto the data stack.
    pub fn push_data(&mut self, value: i32)
    {
        self.stack.push(value);
    }

    /// Pop a value from the data stack.  If the stack is empty a stack underflow error is
    /// returned.
    pub fn pop_data(&mut self) -> error::Result<i32>
    {
        match self.stack.pop()
        {
            Some(value) => Ok(value),
            None => self.script_error_str("Data stack underflow.")
        }
    }

    /// Pop a value from the data stack and convert it to a memory or source address.
    fn pop_data_address(&mut self) -> error::Result<usize>
    {
        let value = self.pop_data()?;
        self.as_address(value)
    }

    /// Push a program counter value onto the return stack.
    fn push_return(&mut self, value: i32)
    {
        self.rstack.push(value);
    }

    /// Pop a program counter value from the return stack.  If the stack is empty a stack
    /// underflow error is returned.
    fn pop_return(&mut self) -> error::Result<i32>
    {
        match self.rstack.pop()
        {
            Some(value) => Ok(value),
            None => self.script_error_str("Return stack underflow.")
        }
    }

    /// Convert a stack value to an address, rejecting negatives.
    fn as_address(&self, value: i32) -> error::Result<usize>
    {
        if value < 0
        {
            self.script_error(format!("Negative address {} on the stack.", value))
        }
        else
        {
            Ok(value as usize)
        }
    }

    /// Create a ScriptError wrapped in a Result::Err using the interpreter's current cursor
    /// offset and a snapshot of the data stack.
    fn script_error<T>(&self, message: String) -> error::Result<T>
    {
        ScriptError::new_as_result(Some(self.program.pc()), message, Some(self.stack.clone()))
    }

    fn script_error_str<T>(&self, message: &str) -> error::Result<T>
    {
        self.script_error(message.to_string())
    }
}


// The compile pass.  One walk over the whole source, reacting only to the compile-time tokens.
impl ChorthInterpreter<'_>
{
    /// Walk the source from the beginning to the end, laying out the data space, registering
    /// user definitions, recording the start address and pre-resolving jump targets.
    pub fn compile(&mut self) -> error::Result<()>
    {
        while !self.program.at_end()
        {
            let token = tokenizing::next_token(&mut self.program)?;

            self.compile_token(&token)?;
            tokenizing::advance_past_whitespace(&mut self.program);
        }

        Ok(())
    }

    /// React to a single compile-time token.  Tokens that only have run-time meaning are ignored
    /// here.
    fn compile_token(&mut self, token: &Token) -> error::Result<()>
    {
        match token.byte
        {
            b'(' => self.eat_comment(token.start),
            b'v' => self.data_space_label(),
            b':' => self.define_function(),

            b'b' =>
                {
                    let number = self.read_payload_number();

                    self.memory.append_byte(number as u8);
                    Ok(())
                }

            b'#' =>
                {
                    let number = self.read_payload_number();

                    self.memory.append_word(number as i32);
                    Ok(())
                }

            b'*' =>
                {
                    let number = self.read_payload_number();

                    self.memory.allot(number as usize);
                    Ok(())
                }

            b'^' =>
                {
                    self.start_address = self.program.pc();
                    Ok(())
                }

            // The markers for conditionals and loops live on the data stack until their closers
            // consume them.  Compile-time tokens cannot otherwise push, so the markers are safe
            // in well-formed programs.
            b'[' | b'{' =>
                {
                    self.push_data(self.program.pc() as i32);
                    Ok(())
                }

            b']' =>
                {
                    let marker = self.pop_data_address()?;

                    self.jumps.insert(marker, self.program.pc());
                    Ok(())
                }

            b'}' =>
                {
                    let marker = self.pop_data_address()?;

                    self.jumps.insert(self.program.pc(), marker);
                    Ok(())
                }

            b'\'' => self.skip_literal_byte(),

            b'0'..=b'9' =>
                {
                    let _ = tokenizing::read_number(&mut self.program);
                    Ok(())
                }

            b' ' | b'\n' =>
                {
                    let _ = self.program.eat_byte();
                    Ok(())
                }

            _ => Ok(())
        }
    }

    /// Skip the whitespace between an emission token and its decimal payload, then read the
    /// payload.
    fn read_payload_number(&mut self) -> u32
    {
        tokenizing::advance_past_whitespace(&mut self.program);
        tokenizing::read_number(&mut self.program)
    }

    /// Consume a comment through its closing `)` and record the skip for the run pass, keyed by
    /// the offset of the `(` itself.
    fn eat_comment(&mut self, start: usize) -> error::Result<()>
    {
        loop
        {
            match self.program.eat_byte()
            {
                Some(b')') => break,
                Some(_) => {}
                None => return self.script_error_str("Unterminated comment.")
            }
        }

        self.jumps.insert(start, self.program.pc());
        Ok(())
    }

    /// Register a data-space label.  The next token names it, and the action captures the data
    /// space length as it is right now.
    fn data_space_label(&mut self) -> error::Result<()>
    {
        let name = tokenizing::next_token(&mut self.program)?;
        let address = self.memory.len() as i32;

        self.dictionary.insert(name.byte, WordAction::PushAddress(address));
        Ok(())
    }

    /// Register a function definition.  The next token names it, and the body starts at the
    /// cursor position just past the name.
    fn define_function(&mut self) -> error::Result<()>
    {
        let name = tokenizing::next_token(&mut self.program)?;
        let body = self.program.pc();

        self.dictionary.insert(name.byte, WordAction::Call(body));
        Ok(())
    }

    /// Step over an apostrophe and the raw byte following it.  The pair only has run-time
    /// meaning.
    fn skip_literal_byte(&mut self) -> error::Result<()>
    {
        let _ = self.program.eat_byte();

        match self.program.eat_byte()
        {
            Some(_) => Ok(()),
            None => self.script_error_str("Unexpected end of program in byte literal.")
        }
    }
}


// The run pass.  Walks the source from the start address, dispatching tokens until `Q`.
impl ChorthInterpreter<'_>
{
    /// Execute the compiled program from its start address.  Returns cleanly only when the
    /// program executes `Q`; running past the end of the source surfaces as an error.
    pub fn run(&mut self) -> error::Result<()>
    {
        self.program.set_pc(self.start_address);
        self.finished = false;

        while !self.finished
        {
            let token = tokenizing::next_token(&mut self.program)?;
            self.run_token(&token)?;
        }

        Ok(())
    }

    /// Dispatch a single run-time token.  Built-ins are matched first; anything else is looked
    /// up in the dispatch table.
    fn run_token(&mut self, token: &Token) -> error::Result<()>
    {
        match token.byte
        {
            b'(' => self.jump_from(token.start),
            b'W' => self.write_out(),
            b'G' => self.read_byte(),

            b'Q' =>
                {
                    self.finished = true;
                    Ok(())
                }

            b'-' => self.subtract(),
            b'<' => self.less_than(),
            b'@' => self.fetch(),
            b'!' => self.store(),
            b's' => self.store_byte(),
            b';' => self.return_from_function(),
            b'[' => self.conditional(),
            b']' | b'{' | b' ' | b'\n' => Ok(()),
            b'}' => self.loop_back(),
            b'\'' => self.literal_byte(),

            b'0'..=b'9' =>
                {
                    let number = tokenizing::read_number(&mut self.program);

                    self.push_data(number as i32);
                    Ok(())
                }

            _ => self.execute_word(token)
        }
    }

    /// Move the cursor to the jump target recorded for the given source offset.
    fn jump_from(&mut self, site: usize) -> error::Result<()>
    {
        match self.jumps.get(&site)
        {
            Some(&target) =>
                {
                    self.program.set_pc(target);
                    Ok(())
                }

            None => self.script_error(format!("No jump recorded for offset {}.", site))
        }
    }

    /// `W`: pop a count, then an address, and write that range of the data space to the output
    /// channel.
    fn write_out(&mut self) -> error::Result<()>
    {
        let count = self.pop_data_address()?;
        let address = self.pop_data_address()?;

        match self.memory.bytes(address, count)
        {
            Some(bytes) =>
                {
                    self.output.write_all(bytes)?;
                    self.output.flush()?;
                    Ok(())
                }

            None =>
                {
                    self.script_error(format!("Write of {} bytes at address {} is out of range.",
                                              count,
                                              address))
                }
        }
    }

    /// `G`: read one byte from the input channel.  Pushes the byte zero-extended, or -1 on end
    /// of input or error.
    fn read_byte(&mut self) -> error::Result<()>
    {
        let mut byte = [0u8; 1];

        match self.input.read_exact(&mut byte)
        {
            Ok(()) => self.push_data(byte[0] as i32),
            Err(_) => self.push_data(-1)
        }

        Ok(())
    }

    /// `-`: pop x, pop y, push y - x with 32-bit wrap-around.
    fn subtract(&mut self) -> error::Result<()>
    {
        let x = self.pop_data()?;
        let y = self.pop_data()?;

        self.push_data(y.wrapping_sub(x));
        Ok(())
    }

    /// `<`: pop b, pop a, push 1 when a < b as signed values, 0 otherwise.
    fn less_than(&mut self) -> error::Result<()>
    {
        let b = self.pop_data()?;
        let a = self.pop_data()?;

        self.push_data(if a < b { 1 } else { 0 });
        Ok(())
    }

    /// `@`: pop an address and push the word stored there.
    fn fetch(&mut self) -> error::Result<()>
    {
        let address = self.pop_data_address()?;

        match self.memory.fetch_word(address)
        {
            Some(value) =>
                {
                    self.push_data(value);
                    Ok(())
                }

            None =>
                {
                    self.script_error(format!("Word read at address {} is out of range.",
                                              address))
                }
        }
    }

    /// `!`: pop an address, then a value, and store the value there as a word.
    fn store(&mut self) -> error::Result<()>
    {
        let address = self.pop_data_address()?;
        let value = self.pop_data()?;

        self.memory.store_word(address, value);
        Ok(())
    }

    /// `s`: pop an address, then a value, and store the value's low byte there.
    fn store_byte(&mut self) -> error::Result<()>
    {
        let address = self.pop_data_address()?;
        let value = self.pop_data()?;

        self.memory.store_byte(address, value);
        Ok(())
    }

    /// `;`: pop the caller's cursor position from the return stack and resume there.
    fn return_from_function(&mut self) -> error::Result<()>
    {
        let address = self.pop_return()?;
        let address = self.as_address(address)?;

        self.program.set_pc(address);
        Ok(())
    }

    /// `[`: pop a flag and skip to just past the matching `]` when it is zero.
    fn conditional(&mut self) -> error::Result<()>
    {
        let flag = self.pop_data()?;

        if flag != 0
        {
            return Ok(());
        }

        self.jump_from(self.program.pc())
    }

    /// `}`: pop a flag and jump back to just past the matching `{` when it is nonzero.
    fn loop_back(&mut self) -> error::Result<()>
    {
        let flag = self.pop_data()?;

        if flag == 0
        {
            return Ok(());
        }

        self.jump_from(self.program.pc())
    }

    /// `'`: consume the apostrophe and push the raw byte that follows it, zero-extended.
    fn literal_byte(&mut self) -> error::Result<()>
    {
        let _ = self.program.eat_byte();

        match self.program.eat_byte()
        {
            Some(byte) =>
                {
                    self.push_data(byte as i32);
                    Ok(())
                }

            None => self.script_error_str("Unexpected end of program in byte literal.")
        }
    }

    /// Dispatch a token with no built-in meaning through the dispatch table.
    fn execute_word(&mut self, token: &Token) -> error::Result<()>
    {
        let action = self.dictionary.try_get(token.byte).copied();

        match action
        {
            Some(WordAction::PushAddress(address)) =>
                {
                    self.push_data(address);
                    Ok(())
                }

            Some(WordAction::Call(body)) =>
                {
                    self.push_return(self.program.pc() as i32);
                    self.program.set_pc(body);
                    Ok(())
                }

            None => self.script_error(format!("Token '{}' is not defined.", token.byte as char))
        }
    }
}
