// Parameterized tests for the built-in tokens and the user-defined dispatch.  Each case runs a
// complete program against in-memory byte channels and checks the data stack it leaves behind.

use chorth::runtime::error::Result;
use chorth::runtime::interpreter::chorth_interpreter::ChorthInterpreter;
use test_case::test_case;

fn eval_and_stack(source: &str, mut input: &[u8]) -> Result<Vec<i32>> {
    let mut output = Vec::new();
    let mut interpreter =
        ChorthInterpreter::new(source.as_bytes().to_vec(), &mut input, &mut output);

    interpreter.compile()?;
    interpreter.run()?;

    Ok(interpreter.stack().to_vec())
}

#[test_case("^ 5 Q", &[5]; "number literal")]
#[test_case("^ 0 Q", &[0]; "zero literal")]
#[test_case("^ 1 2 3 Q", &[1, 2, 3]; "literals stack up in order")]
#[test_case("^ '* Q", &[42]; "byte literal")]
#[test_case("^ '  Q", &[32]; "byte literal of a space")]
#[test_case("^ 3 4 - Q", &[-1]; "subtract top from second")]
#[test_case("^ 10 4 - Q", &[6]; "simple subtract")]
#[test_case("^ 0 1 - Q", &[-1]; "negative result")]
#[test_case("^ 2147483647 0 1 - - Q", &[i32::MIN]; "subtract wraps around")]
#[test_case("^ 1 2 < Q", &[1]; "less is true")]
#[test_case("^ 2 1 < Q", &[0]; "less is false")]
#[test_case("^ 2 2 < Q", &[0]; "less for equal")]
#[test_case("^ 0 5 - 3 < Q", &[1]; "less is signed")]
#[test_case("* 4 ^ 65 0 s 0 @ Q", &[65]; "byte store then word fetch")]
#[test_case("* 4 ^ 0 200 - 0 s 0 @ Q", &[56]; "byte store keeps the low eight bits")]
#[test_case("^ 305419896 0 ! 0 @ Q", &[305419896]; "word store round trips")]
#[test_case("^ 305419896 0 ! 255 0 s 0 @ Q", &[305420031]; "byte store preserves upper bytes")]
#[test_case("^ 0 5 - 4 ! 4 @ Q", &[-5]; "negative word round trips")]
#[test_case("# 305419896 ^ 0 @ Q", &[305419896]; "compiled word literal")]
#[test_case("b 72 b 73 * 2 ^ 0 @ Q", &[18760]; "compiled byte literals are little endian")]
#[test_case("* 8 v B * 4 ^ B Q", &[8]; "label captures the data space length")]
#[test_case("v A * 3 v B ^ A B Q", &[0, 3]; "labels capture successive regions")]
#[test_case(": F 42 ; ^ F Q", &[42]; "trivial function")]
#[test_case(": D 0 1 - - ; ^ 4 D D Q", &[6]; "function runs twice")]
#[test_case("^ 1 [ 5 ] 9 Q", &[5, 9]; "conditional true branch")]
#[test_case("^ 0 [ 5 ] 9 Q", &[9]; "conditional false branch")]
#[test_case("^ 1 [ 0 [ 7 ] 8 ] 9 Q", &[8, 9]; "nested conditionals")]
#[test_case("^ 5 { 1 - 0 ! 0 @ 0 0 @ < } 0 @ Q", &[0, 0]; "loop runs until the flag clears")]
#[test_case("^ ( ignored words ) '! Q", &[33]; "comment is skipped")]
#[test_case("( before the start ) ^ 7 Q", &[7]; "comment before the start address")]
fn program_leaves_expected_stack(source: &str, expected: &[i32]) {
    let result = eval_and_stack(source, &[]).unwrap();
    assert_eq!(result, expected);
}

#[test_case("^ G Q", b"A", &[65]; "read one byte")]
#[test_case("^ G G G Q", b"hi", &[104, 105, -1]; "reads then end of input")]
#[test_case("^ G Q", b"", &[-1]; "end of input pushes minus one")]
fn program_reads_input(source: &str, input: &[u8], expected: &[i32]) {
    let result = eval_and_stack(source, input).unwrap();
    assert_eq!(result, expected);
}

#[test_case("^ - Q"; "subtract underflows")]
#[test_case("^ 1 < Q"; "compare underflows")]
#[test_case("^ ; Q"; "return stack underflows")]
#[test_case("^ X Q"; "undefined token")]
#[test_case("^ 0 @ Q"; "word fetch out of range")]
#[test_case("^ 5 0 1 - s Q"; "negative store address")]
#[test_case("( never closed"; "unterminated comment")]
#[test_case("] Q"; "unmatched close conditional")]
#[test_case("^ 1"; "running past the end of the program")]
fn program_reports_an_error(source: &str) {
    assert!(eval_and_stack(source, &[]).is_err());
}
