//! Lenient token conventions for sequence lines.

/// Integer value of a single token, following the C `atoi` convention.
///
/// An optional sign is followed by the longest run of ASCII digits; anything
/// after that run is ignored. A token with no leading digits reads as `None`
/// so callers can count it as non-numeric. Out-of-range values saturate.
pub(crate) fn read_token(token: &str) -> Option<i32> {
    let bytes = token.as_bytes();
    let (negative, digits) = match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        Some(b'+') => (false, &bytes[1..]),
        _ => (false, bytes),
    };

    let run = digits.iter().take_while(|b| b.is_ascii_digit()).count();
    if run == 0 {
        return None;
    }

    let mut value: i64 = 0;
    for digit in &digits[..run] {
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(digit - b'0'));
    }
    if negative {
        value = -value;
    }
    Some(value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
}

/// Whitespace-separated tokens of one line.
pub(crate) struct TokenReader<'a> {
    tokens: std::str::SplitWhitespace<'a>,
}

impl<'a> TokenReader<'a> {
    pub(crate) fn new(line: &'a str) -> Self {
        Self {
            tokens: line.split_whitespace(),
        }
    }
}

impl Iterator for TokenReader<'_> {
    type Item = Option<i32>;

    fn next(&mut self) -> Option<Self::Item> {
        self.tokens.next().map(read_token)
    }
}
