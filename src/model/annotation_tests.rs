use super::*;

fn block(file: &str, line: usize, lines: usize) -> DuplicateCode {
    DuplicateCode::new(CodeLocation::new(file, line), lines, Priority::Normal)
}

#[test]
fn priority_from_line_count() {
    assert_eq!(Priority::from_line_count(50, 25, 50), Priority::High);
    assert_eq!(Priority::from_line_count(49, 25, 50), Priority::Normal);
    assert_eq!(Priority::from_line_count(25, 25, 50), Priority::Normal);
    assert_eq!(Priority::from_line_count(24, 25, 50), Priority::Low);
}

#[test]
fn priority_ordering_by_severity() {
    assert!(Priority::High > Priority::Normal);
    assert!(Priority::Normal > Priority::Low);
}

#[test]
fn priority_parses_case_insensitive() {
    assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
    assert_eq!(" normal ".parse::<Priority>().unwrap(), Priority::Normal);
    assert_eq!("low".parse::<Priority>().unwrap(), Priority::Low);
    assert!("urgent".parse::<Priority>().is_err());
}

#[test]
fn end_line_is_inclusive() {
    assert_eq!(block("a.rs", 10, 5).end_line(), 14);
    assert_eq!(block("a.rs", 10, 0).end_line(), 10);
}

#[test]
fn blank_fragment_is_dropped() {
    let code = block("a.rs", 1, 3).with_fragment(Some("   \n".to_string()));
    assert!(code.code_fragment.is_none());
}

#[test]
fn end_line_saturates_on_huge_values() {
    assert_eq!(block("a.rs", usize::MAX - 1, 10).end_line(), usize::MAX);
}

#[test]
fn tracking_key_ignores_line_shift_when_fragment_known() {
    let a = block("a.rs", 10, 5).with_fragment(Some("fn dup() {}".to_string()));
    let b = block("a.rs", 42, 5).with_fragment(Some("fn dup() {}".to_string()));
    assert_eq!(a.tracking_key(), b.tracking_key());
}

#[test]
fn fingerprint_keeps_blocks_of_same_file_apart() {
    let a = block("a.rs", 10, 5).with_fragment(Some("fn dup() {}".to_string()));
    let b = block("a.rs", 42, 5).with_fragment(Some("fn dup() {}".to_string()));
    assert_ne!(a.fingerprint(), b.fingerprint());
}

#[test]
fn tracking_key_uses_start_line_without_fragment() {
    assert_ne!(
        block("a.rs", 10, 5).tracking_key(),
        block("a.rs", 11, 5).tracking_key()
    );
}

#[test]
fn fingerprint_uses_start_line_without_fragment() {
    assert_ne!(
        block("a.rs", 10, 5).fingerprint(),
        block("a.rs", 11, 5).fingerprint()
    );
}

#[test]
fn fingerprint_ignores_link_order_and_priority() {
    let mut a = block("a.rs", 1, 5).with_links(vec![
        CodeLocation::new("b.rs", 1),
        CodeLocation::new("c.rs", 1),
    ]);
    let b = block("a.rs", 1, 5).with_links(vec![
        CodeLocation::new("c.rs", 7),
        CodeLocation::new("b.rs", 9),
    ]);
    a.priority = Priority::High;
    assert_eq!(a.fingerprint(), b.fingerprint());
}

#[test]
fn fingerprint_differs_per_file() {
    assert_ne!(
        block("a.rs", 1, 5).fingerprint(),
        block("b.rs", 1, 5).fingerprint()
    );
}
