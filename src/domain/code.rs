use rand::Rng;

const CODE_PREFIX: &str = "BK";
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const CODE_LEN: usize = 12;

/// How many candidate codes the booking service tries before giving up.
/// With a 36^12 collision space a single attempt virtually always succeeds;
/// the bound keeps worst-case latency finite.
pub const MAX_CODE_ATTEMPTS: usize = 10;

/// Produce a candidate public booking code: "BK" followed by 12 characters
/// drawn uniformly from [A-Z0-9]. `ThreadRng` is cryptographically secure,
/// so codes cannot be predicted from previously issued ones.
///
/// Uniqueness is the caller's responsibility: check the candidate against
/// the booking store and retry, up to [`MAX_CODE_ATTEMPTS`] times.
pub fn generate_booking_code() -> String {
    let mut rng = rand::thread_rng();
    let mut code = String::with_capacity(CODE_PREFIX.len() + CODE_LEN);
    code.push_str(CODE_PREFIX);
    for _ in 0..CODE_LEN {
        let idx = rng.gen_range(0..CODE_ALPHABET.len());
        code.push(CODE_ALPHABET[idx] as char);
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_is_fourteen_chars_with_bk_prefix() {
        for _ in 0..100 {
            let code = generate_booking_code();
            assert_eq!(code.len(), 14);
            assert!(code.starts_with("BK"));
        }
    }

    #[test]
    fn code_body_is_drawn_from_uppercase_alphanumerics() {
        for _ in 0..100 {
            let code = generate_booking_code();
            assert!(code[2..]
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn codes_do_not_repeat_in_a_small_sample() {
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(generate_booking_code()));
        }
    }
}
