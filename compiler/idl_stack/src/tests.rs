use super::*;

/// A linked chain of class names, walked the way a superclass chain is.
fn chain_depth(names: &[String], index: usize) -> usize {
    ensure_sufficient_stack(|| {
        if index + 1 >= names.len() {
            index
        } else {
            chain_depth(names, index + 1)
        }
    })
}

#[test]
fn shallow_chain_returns_last_index() {
    let names: Vec<String> = (0..8).map(|i| format!("com.acme.C{i}")).collect();
    assert_eq!(chain_depth(&names, 0), 7);
}

#[test]
fn deep_chain_does_not_overflow() {
    let names: Vec<String> = (0..100_000).map(|i| format!("C{i}")).collect();
    assert_eq!(chain_depth(&names, 0), 99_999);
}

#[test]
fn passes_results_through() {
    let result: Result<u32, &str> = ensure_sufficient_stack(|| Ok(7));
    assert_eq!(result, Ok(7));
}
