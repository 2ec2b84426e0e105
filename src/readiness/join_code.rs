//! Join codes: short human-typeable team enrollment codes.

use rand::Rng;

use crate::errors::AppError;

/// Codes are six characters from the uppercase alphanumeric alphabet.
pub const CODE_LENGTH: usize = 6;
pub const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Attempt budget for unique generation. 36^6 codes make a collision streak
/// this long unreachable in practice, but the exhaustion path is still a
/// defined failure rather than a spin.
pub const MAX_GENERATION_ATTEMPTS: usize = 64;

/// Canonical form of user input: trimmed and uppercased.
pub fn normalize(input: &str) -> String {
    input.trim().to_uppercase()
}

/// Format-check a submitted code, returning its canonical form.
///
/// Malformed input is rejected here, before any storage lookup happens.
pub fn validate(input: &str) -> Result<String, AppError> {
    let code = normalize(input);
    if code.len() != CODE_LENGTH {
        return Err(AppError::MalformedJoinCode(format!(
            "Join code must be exactly {} characters",
            CODE_LENGTH
        )));
    }
    if !code.bytes().all(|b| ALPHABET.contains(&b)) {
        return Err(AppError::MalformedJoinCode(
            "Join code may only contain letters and digits".to_string(),
        ));
    }
    Ok(code)
}

/// Generate one candidate code.
pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..CODE_LENGTH)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Generate a code not matched by `is_taken`, retrying up to the attempt
/// budget. The caller supplies the taken-set predicate (typically backed by
/// the set of existing team codes).
pub fn generate_unique<R, F>(rng: &mut R, mut is_taken: F) -> Result<String, AppError>
where
    R: Rng + ?Sized,
    F: FnMut(&str) -> bool,
{
    for _ in 0..MAX_GENERATION_ATTEMPTS {
        let code = generate(rng);
        if !is_taken(&code) {
            return Ok(code);
        }
    }
    Err(AppError::JoinCodeExhausted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_match_the_format() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let code = generate(&mut rng);
            assert!(validate(&code).is_ok(), "generated invalid code {}", code);
        }
    }

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(validate("  ab12cd ").unwrap(), "AB12CD");
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(matches!(
            validate("ABC12"),
            Err(AppError::MalformedJoinCode(_))
        ));
        assert!(matches!(
            validate("ABC1234"),
            Err(AppError::MalformedJoinCode(_))
        ));
        assert!(matches!(validate(""), Err(AppError::MalformedJoinCode(_))));
    }

    #[test]
    fn rejects_disallowed_characters() {
        assert!(matches!(
            validate("AB-12C"),
            Err(AppError::MalformedJoinCode(_))
        ));
        assert!(matches!(
            validate("ÄB12CD"),
            Err(AppError::MalformedJoinCode(_))
        ));
    }

    #[test]
    fn malformed_code_never_reaches_the_lookup() {
        // Mirrors the handler flow: validate first, look up only on success.
        let mut lookups = 0;
        let result = validate("bad!").map(|code| {
            lookups += 1;
            code
        });
        assert!(result.is_err());
        assert_eq!(lookups, 0);
    }

    #[test]
    fn retries_collisions_until_unique() {
        let mut rng = rand::thread_rng();
        let mut calls = 0;
        let code = generate_unique(&mut rng, |_| {
            calls += 1;
            calls <= 3
        })
        .unwrap();
        assert_eq!(calls, 4);
        assert!(validate(&code).is_ok());
    }

    #[test]
    fn exhausted_code_space_is_a_defined_failure() {
        let mut rng = rand::thread_rng();
        let result = generate_unique(&mut rng, |_| true);
        assert!(matches!(result, Err(AppError::JoinCodeExhausted)));
    }
}
