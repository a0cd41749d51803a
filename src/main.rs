use chorth::runtime::{error, interpreter::chorth_interpreter::ChorthInterpreter};
use std::{env, fs, io, process};

/// Compile the program's data layout, definitions and jump targets, then execute it from its
/// recorded start address.  The run pass only returns cleanly when the program executes `Q`.
fn execute(interpreter: &mut ChorthInterpreter<'_>) -> error::Result<()> {
    interpreter.compile()?;
    interpreter.run()
}

fn main() {
    // Gather the arguments passed to the interpreter.  The only accepted invocation is the path
    // to a single source file.
    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        eprintln!("wrong number of arguments");
        process::exit(1);
    }

    // Load the program as raw bytes.  No encoding is assumed beyond the ASCII classification
    // performed by the scanner.
    let program = match fs::read(&args[1]) {
        Ok(program) => program,
        Err(err) => {
            eprintln!("could not read file: {}", err);
            process::exit(1);
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();

    let mut input = stdin.lock();
    let mut output = stdout.lock();

    let mut interpreter = ChorthInterpreter::new(program, &mut input, &mut output);

    if let Err(err) = execute(&mut interpreter) {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}
