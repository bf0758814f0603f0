use rand::Rng;

/// `BK-` followed by the last six digits of `epoch_millis`.
///
/// If that id is already taken, the numeric part is bumped (wrapping at one
/// million) until it is free.
pub fn generate_booking_id<'a, I>(epoch_millis: i64, existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let taken: Vec<&str> = existing.into_iter().collect();
    let mut suffix = epoch_millis.rem_euclid(1_000_000);
    for _ in 0..1_000_000 {
        let candidate = format!("BK-{:06}", suffix);
        if !taken.iter().any(|id| *id == candidate) {
            return candidate;
        }
        suffix = (suffix + 1) % 1_000_000;
    }
    format!("BK-{:06}", epoch_millis.rem_euclid(1_000_000))
}

/// Four-digit code drawn uniformly from `1000..=9999`.
pub fn generate_otp<R: Rng + ?Sized>(rng: &mut R) -> String {
    rng.random_range(1000..=9999u16).to_string()
}

pub fn is_valid_otp(code: &str) -> bool {
    code.len() == 4 && code.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_booking_id_uses_last_six_digits() {
        let id = generate_booking_id(1_760_000_123_456, std::iter::empty());
        assert_eq!(id, "BK-123456");
    }

    #[test]
    fn test_booking_id_pads_small_suffix() {
        let id = generate_booking_id(1_000_000_000_042, std::iter::empty());
        assert_eq!(id, "BK-000042");
    }

    #[test]
    fn test_booking_id_skips_taken() {
        let id = generate_booking_id(5_999_999, ["BK-999999", "BK-000000"]);
        assert_eq!(id, "BK-000001");
    }

    #[test]
    fn test_otp_is_four_digits() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let otp = generate_otp(&mut rng);
            assert!(is_valid_otp(&otp), "bad otp {}", otp);
            let n: u16 = otp.parse().unwrap();
            assert!((1000..=9999).contains(&n));
        }
    }
}
