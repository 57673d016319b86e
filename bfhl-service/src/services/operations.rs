//! Pure number operations behind the `fibonacci`, `prime`, `hcf` and `lcm` keys.

use num_bigint::BigUint;

/// Upper bound on `n` for `fibonacci`. Terms grow by about 0.2 decimal
/// digits each, so this caps a response at roughly 2.6 MB of JSON.
pub const MAX_FIBONACCI_TERMS: usize = 5_000;

/// Witnesses that make Miller-Rabin deterministic for every 64-bit input.
const WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// First `n` Fibonacci numbers, exact: 0, 1, 1, 2, ...
pub fn fibonacci(n: usize) -> Vec<BigUint> {
    let mut seq = Vec::with_capacity(n);
    let (mut a, mut b) = (BigUint::from(0u8), BigUint::from(1u8));
    for _ in 0..n {
        let next = &a + &b;
        seq.push(std::mem::replace(&mut a, std::mem::replace(&mut b, next)));
    }
    seq
}

/// Deterministic Miller-Rabin; negatives, 0 and 1 are not prime.
pub fn is_prime(n: i64) -> bool {
    let Ok(n) = u64::try_from(n) else {
        return false;
    };
    if n < 2 {
        return false;
    }
    for p in WITNESSES {
        if n % p == 0 {
            return n == p;
        }
    }

    let s = (n - 1).trailing_zeros();
    let d = (n - 1) >> s;
    WITNESSES.iter().all(|&a| passes_round(n, d, s, a))
}

/// One strong-probable-prime round for odd `n = d * 2^s + 1`.
fn passes_round(n: u64, d: u64, s: u32, a: u64) -> bool {
    let mut x = pow_mod(a, d, n);
    if x == 1 || x == n - 1 {
        return true;
    }
    for _ in 1..s {
        x = mul_mod(x, x, n);
        if x == n - 1 {
            return true;
        }
    }
    false
}

fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    // the remainder is below m, so it fits back in u64
    (u128::from(a) * u128::from(b) % u128::from(m)) as u64
}

fn pow_mod(mut base: u64, mut exp: u64, m: u64) -> u64 {
    let mut result = 1;
    base %= m;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base, m);
        }
        base = mul_mod(base, base, m);
        exp >>= 1;
    }
    result
}

/// Keep the prime elements, in input order.
pub fn primes(values: &[i64]) -> Vec<i64> {
    values.iter().copied().filter(|&n| is_prime(n)).collect()
}

/// Euclid's algorithm with truncated remainder, so signs follow the operands.
pub fn gcd(a: i64, b: i64) -> i64 {
    if b == 0 {
        return a;
    }
    gcd(b, a.wrapping_rem(b))
}

/// `a * b / gcd(a, b)`; `None` when the result leaves the `i64` range.
pub fn lcm(a: i64, b: i64) -> Option<i64> {
    let divisor = gcd(a, b);
    if divisor == 0 {
        return Some(0);
    }
    let product = i128::from(a) * i128::from(b);
    i64::try_from(product / i128::from(divisor)).ok()
}

/// Left fold of `gcd`; `None` only for an empty slice.
pub fn hcf_of(values: &[i64]) -> Option<i64> {
    values.iter().copied().reduce(gcd)
}

/// Left fold of `lcm`.
pub fn lcm_of(values: &[i64]) -> Result<i64, LcmError> {
    let (first, rest) = values.split_first().ok_or(LcmError::Empty)?;
    rest.iter()
        .try_fold(*first, |acc, &n| lcm(acc, n).ok_or(LcmError::Overflow { acc, next: n }))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LcmError {
    #[error("lcm of an empty list")]
    Empty,

    #[error("lcm({acc}, {next}) overflows i64")]
    Overflow { acc: i64, next: i64 },
}
