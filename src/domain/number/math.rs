//! Arithmetic helpers shared by number service implementations

use crate::domain::DomainError;

/// Trial division using the 6k ± 1 wheel
pub fn is_prime(k: u64) -> bool {
    match k {
        0 | 1 => return false,
        2 | 3 => return true,
        _ => {}
    }

    if k % 2 == 0 || k % 3 == 0 {
        return false;
    }

    let mut i: u64 = 5;
    while i.saturating_mul(i) <= k {
        if k % i == 0 || k % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }

    true
}

/// Walks candidates upwards until `n` primes have been seen
///
/// `n == 0` yields 1, the value the scan stops at before counting anything.
pub fn nth_prime(n: u32) -> u64 {
    let mut remaining = n;
    let mut candidate: u64 = 2;

    while remaining > 0 {
        if is_prime(candidate) {
            remaining -= 1;
        }
        candidate += 1;
    }

    candidate - 1
}

/// Adds two Fibonacci terms, failing on `u64` overflow
pub fn add_terms(n: u32, a: u64, b: u64) -> Result<u64, DomainError> {
    a.checked_add(b)
        .ok_or_else(|| DomainError::overflow(format!("fibonacci({})", n)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_prime() {
        let primes: Vec<u64> = (0..30).filter(|k| is_prime(*k)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
        assert!(!is_prime(25));
        assert!(!is_prime(49));
        assert!(is_prime(7919));
    }

    #[test]
    fn test_nth_prime() {
        assert_eq!(nth_prime(0), 1);
        assert_eq!(nth_prime(1), 2);
        assert_eq!(nth_prime(5), 11);
        assert_eq!(nth_prime(50), 229);
    }

    #[test]
    fn test_add_terms_overflow() {
        assert_eq!(add_terms(3, 1, 1).unwrap(), 2);

        let error = add_terms(94, u64::MAX, 1).unwrap_err();
        assert!(matches!(error, DomainError::Arithmetic { .. }));
        assert!(error.to_string().contains("fibonacci(94)"));
    }
}
