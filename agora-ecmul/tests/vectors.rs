use agora_ecmul::parse::{parse_vectors, TestVector};

const TESTCASES: &str = include_str!("testcases.csv");

#[test]
fn testcases_file() {
    let vectors = parse_vectors(TESTCASES).unwrap();
    assert_eq!(vectors.len(), 17);
    for (i, vector) in vectors.iter().enumerate() {
        if let Err(msg) = vector.check() {
            panic!("vector {} ({:?}) failed: {}", i, vector.args, msg);
        }
    }
}

#[test]
fn error_rows_are_marked() {
    let vectors = parse_vectors(TESTCASES).unwrap();
    let errors = vectors.iter().filter(|v| v.is_error).count();
    assert_eq!(errors, 6);
    assert!(vectors
        .iter()
        .filter(|v| v.is_error)
        .all(|v| agora_ecmul::combine_flat(&v.args).is_err()));
}

#[test]
fn tampered_expectation_fails() {
    let first = TESTCASES.lines().nth(1).unwrap();
    let mut vector: TestVector = first.parse().unwrap();
    assert!(vector.check().is_ok());
    vector.expected.1 += 1u32;
    assert!(vector.check().is_err());
}
