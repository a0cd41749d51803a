
use std::{ error::Error,
           fmt::{ self, Debug, Display, Formatter } };



pub type Result<T> = std::result::Result<T, ScriptError>;



/// Any error that occurs while compiling or running a chorth program.
#[derive(Clone)]
pub struct ScriptError
{
    /// The byte offset in the source where the error was noticed, if available.
    offset: Option<usize>,

    /// The description of the error.
    error: String,

    /// A snapshot of the data stack at the time of the error, if available.  The top of the
    /// stack is printed first.
    stack: Option<Vec<i32>>
}


impl Error for ScriptError
{
}


/// Pretty print the ScriptError for debugging the error that occurred within the chorth program.
impl Display for ScriptError
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        match self.offset
        {
            Some(offset) => write!(f, "offset {}: {}", offset, self.error)?,
            None => write!(f, "{}", self.error)?
        }

        if let Some(stack) = &self.stack
        {
            write!(f, "\n\nData stack")?;

            for value in stack.iter().rev()
            {
                write!(f, "\n  {}", value)?;
            }
        }

        Ok(())
    }
}


/// Pretty print the ScriptError for debugging the error that occurred within the chorth program.
impl Debug for ScriptError
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        write!(f, "{}", self)
    }
}


impl ScriptError
{
    /// Create a new ScriptError.
    pub fn new(offset: Option<usize>,
               error: String,
               stack: Option<Vec<i32>>) -> ScriptError
    {
        ScriptError
            {
                offset,
                error,
                stack
            }
    }

    /// Create a new ScriptError and wrap it in a Result::Err.
    pub fn new_as_result<T>(offset: Option<usize>,
                            error: String,
                            stack: Option<Vec<i32>>) -> Result<T>
    {
        Err(ScriptError::new(offset, error, stack))
    }

    /// If available, the byte offset in the source where the error was noticed.
    pub fn offset(&self) -> &Option<usize>
    {
        &self.offset
    }

    /// The description of the error.
    pub fn error(&self) -> &String
    {
        &self.error
    }

    /// If available, the data stack snapshot taken when the error occurred.
    pub fn stack(&self) -> &Option<Vec<i32>>
    {
        &self.stack
    }
}


/// Allow for the conversion of a std::io::Error into a ScriptError.
impl From<std::io::Error> for ScriptError
{
    fn from(error: std::io::Error) -> ScriptError
    {
        ScriptError::new(None, format!("I/O error: {}", error), None)
    }
}
