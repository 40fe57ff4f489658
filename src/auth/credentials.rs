//! Temporary credential generation for student onboarding.
//!
//! Every student gets a generated login and a one-time password that is
//! returned to the caller exactly once; only the argon2 hash is persisted.

use rand::{Rng, distr::Alphanumeric, rng};

/// Length of generated temporary passwords.
const TEMP_PASSWORD_LEN: usize = 8;

/// Number of random digits in a generated login.
const LOGIN_DIGITS: usize = 5;

/// Generate a student login of the form `sambokid_48213`.
pub fn generate_login() -> String {
    let mut rng = rng();
    let digits: String = (0..LOGIN_DIGITS).map(|_| char::from(b'0' + rng.random_range(0..10u8))).collect();
    format!("sambokid_{digits}")
}

/// Generate an 8-character alphanumeric temporary password.
pub fn generate_temp_password() -> String {
    rng().sample_iter(Alphanumeric).take(TEMP_PASSWORD_LEN).map(char::from).collect()
}
