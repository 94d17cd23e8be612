use crate::counter::Token;

/// A source of unique [`Token`]s.
///
/// Every token returned by one counter is distinct from every token it has
/// returned before. That is the only ordering contract; concurrent callers
/// may observe tokens in any order.
pub trait CounterSource {
    /// Creates a counter whose first token is [`Token::ZERO`].
    fn new() -> Self;

    /// Issues the next unique token.
    fn next_token(&self) -> Token;
}
