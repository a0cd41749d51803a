use crate::{ lang::source_buffer::ProgramBuffer,
             runtime::error::{ self, ScriptError } };


/// A token is a single byte of the program that names an operation, along with the offset it was
/// found at.  Most tokens consume the remainder of their whitespace-delimited word when scanned;
/// digits and the apostrophe do not, because their handlers consume the body themselves.
///
/// The start offset is what keys comment entries in the jump map and what error reporting points
/// at.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Token
{
    /// The offset in the source where the token byte was found.
    pub start: usize,

    /// The token byte itself.
    pub byte: u8
}


/// Check if the given byte is considered whitespace.
pub fn is_whitespace(byte: u8) -> bool
{
    byte == b' ' || byte == b'\n' || byte == b'\t'
}


/// Skip over whitespace in the source.  Stopping only at either the end of the source or the next
/// non-whitespace byte.
pub fn advance_past_whitespace(buffer: &mut ProgramBuffer)
{
    while let Some(next) = buffer.current_byte()
    {
        if !is_whitespace(next)
        {
            break;
        }

        let _ = buffer.eat_byte();
    }
}


/// Skip to the next whitespace byte in the source.  This is how a token consumes the rest of its
/// word.
pub fn advance_to_whitespace(buffer: &mut ProgramBuffer)
{
    while let Some(next) = buffer.current_byte()
    {
        if is_whitespace(next)
        {
            break;
        }

        let _ = buffer.eat_byte();
    }
}


/// Extract the next token from the source.  Whitespace is skipped, the byte under the cursor
/// becomes the token, and unless that byte is a digit or an apostrophe the rest of the word is
/// consumed.
///
/// Needing a token where the source has already ended is an error.
pub fn next_token(buffer: &mut ProgramBuffer) -> error::Result<Token>
{
    advance_past_whitespace(buffer);

    let start = buffer.pc();
    let byte = match buffer.current_byte()
        {
            Some(byte) => byte,
            None =>
                {
                    return ScriptError::new_as_result(Some(start),
                                                      "Unexpected end of program.".to_string(),
                                                      None);
                }
        };

    if !byte.is_ascii_digit() && byte != b'\''
    {
        advance_to_whitespace(buffer);
    }

    Ok(Token { start, byte })
}


/// Read a decimal number starting at the cursor, accumulating with wrapping arithmetic.  The
/// digit run and the single byte terminating it are both consumed, so that the cursor lands in
/// the same place in both passes.
pub fn read_number(buffer: &mut ProgramBuffer) -> u32
{
    let mut value: u32 = 0;

    while let Some(byte) = buffer.eat_byte()
    {
        if !byte.is_ascii_digit()
        {
            break;
        }

        value = value.wrapping_mul(10).wrapping_add((byte - b'0') as u32);
    }

    value
}
