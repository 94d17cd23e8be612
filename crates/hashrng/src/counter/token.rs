/// A unique 128-bit value issued once per read.
///
/// The counter is handled as two 64-bit words. Field order makes the derived
/// [`Ord`] agree with the numeric order of [`Token::to_raw`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token {
    high: u64,
    low: u64,
}

impl Token {
    /// Length of [`Token::to_le_bytes`].
    pub const LEN: usize = 16;

    /// The first token every counter issues.
    pub const ZERO: Self = Self { high: 0, low: 0 };

    /// Builds a token from its two words.
    #[must_use]
    pub const fn from_words(low: u64, high: u64) -> Self {
        Self { high, low }
    }

    /// Splits a raw 128-bit counter value into its words.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_raw(raw: u128) -> Self {
        Self {
            high: (raw >> 64) as u64,
            low: raw as u64,
        }
    }

    /// Joins the two words back into one 128-bit value.
    #[must_use]
    pub const fn to_raw(self) -> u128 {
        ((self.high as u128) << 64) | self.low as u128
    }

    /// The low 64-bit word.
    #[must_use]
    pub const fn low(self) -> u64 {
        self.low
    }

    /// The high 64-bit word.
    #[must_use]
    pub const fn high(self) -> u64 {
        self.high
    }

    /// Encodes the token as `low ‖ high`, each word little-endian.
    #[must_use]
    pub fn to_le_bytes(self) -> [u8; Self::LEN] {
        let mut out = [0_u8; Self::LEN];
        out[..8].copy_from_slice(&self.low.to_le_bytes());
        out[8..].copy_from_slice(&self.high.to_le_bytes());
        out
    }
}

impl From<u128> for Token {
    fn from(raw: u128) -> Self {
        Self::from_raw(raw)
    }
}

impl From<Token> for u128 {
    fn from(token: Token) -> Self {
        token.to_raw()
    }
}
