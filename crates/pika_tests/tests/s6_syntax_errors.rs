//! S6 (spec.md §8): syntax-error span reporting on an arithmetic grammar
//! with a genuinely broken statement in the middle of otherwise-valid
//! input — exercises the interval-union complement without replicating
//! the reference implementation's inverted-condition bug (spec §9).

use pika::{ClauseTable, Grammar, LabeledSub, ParseOptions, Rule};

fn lowercase() -> pika::CharClass {
    pika::CharClass::single_set(pika::CharSet::new(vec![pika::CharRange { lo: 'a', hi: 'z' }]))
}

fn digits() -> pika::CharClass {
    pika::CharClass::single_set(pika::CharSet::new(vec![pika::CharRange { lo: '0', hi: '9' }]))
}

/// `Program <- Statement+`, `Statement <- var:[a-z]+ ' = ' num:[0-9]+ ' ; '`.
fn assignment_grammar() -> Grammar {
    let mut clauses = ClauseTable::new();
    let var_letter = clauses.char_class(lowercase());
    let var = clauses.one_or_more(LabeledSub::unlabeled(var_letter));
    let eq = clauses.char_seq(" = ", false);
    let digit = clauses.char_class(digits());
    let num = clauses.one_or_more(LabeledSub::unlabeled(digit));
    let semi = clauses.char_seq(" ; ", false);
    let statement_top = clauses.seq(vec![
        LabeledSub::labeled("var", var),
        LabeledSub::unlabeled(eq),
        LabeledSub::labeled("num", num),
        LabeledSub::unlabeled(semi),
    ]);
    let statement = Rule::new("Statement", LabeledSub::unlabeled(statement_top));

    let statement_ref = clauses.rule_ref("Statement");
    let program_top = clauses.one_or_more(LabeledSub::unlabeled(statement_ref));
    let program = Rule::new("Program", LabeledSub::unlabeled(program_top));

    Grammar::new(clauses, vec![statement, program]).unwrap()
}

#[test]
fn a_garbled_middle_statement_is_reported_as_a_single_gap() {
    let _ = env_logger::try_init();
    let grammar = assignment_grammar();
    let input: Vec<char> = "a = 1 ; ??? b = 2 ; ".chars().collect();
    let memo = grammar.parse(&input, ParseOptions::default());

    let errors = grammar.syntax_errors(&memo, &input, &["Statement"]).unwrap();
    assert_eq!(errors.len(), 1);
    let (start, end, text) = &errors[0];
    assert_eq!(input[*start..*end].iter().collect::<String>(), *text);
    assert!(text.contains("???"));
}

#[test]
fn fully_valid_input_reports_no_errors() {
    let _ = env_logger::try_init();
    let grammar = assignment_grammar();
    let input: Vec<char> = "a = 1 ; b = 2 ; ".chars().collect();
    let memo = grammar.parse(&input, ParseOptions::default());
    let errors = grammar.syntax_errors(&memo, &input, &["Statement"]).unwrap();
    assert!(errors.is_empty());
}
