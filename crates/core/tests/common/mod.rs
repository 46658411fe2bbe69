use txsched_core::Operation;

/// DSL macro for building test schedules in the usual notation.
///
/// Produces `Vec<Operation<&'static str>>`.
///
/// # Syntax
///
/// ```ignore
/// schedule![r1(x), w2(x), c1, a2]
/// ```
///
/// - `rN(var)` → `Operation::read(N, "var")`
/// - `wN(var)` → `Operation::write(N, "var")`
/// - `aN`      → `Operation::abort(N)`
/// - `cN`      → `Operation::commit(N)`
#[macro_export]
macro_rules! schedule {
    ($($op:ident $(($var:ident))?),* $(,)?) => {
        vec![$($crate::common::operation(stringify!($op), &[$(stringify!($var)),*])),*]
    };
}

/// Build one operation from its notation token, e.g. `("w2", ["x"])`.
pub fn operation(token: &str, variable: &[&'static str]) -> Operation<&'static str> {
    let (symbol, id) = token.split_at(1);
    let transaction: u64 = id
        .parse()
        .unwrap_or_else(|_| panic!("bad transaction id in {token}"));
    match (symbol, variable) {
        ("r", [variable]) => Operation::read(transaction, *variable),
        ("w", [variable]) => Operation::write(transaction, *variable),
        ("a", []) => Operation::abort(transaction),
        ("c", []) => Operation::commit(transaction),
        _ => panic!("malformed operation {token}"),
    }
}
