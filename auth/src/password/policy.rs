/// Strength rules applied to passwords at registration.
///
/// A valid password is not blank, has at least 8 characters, at least one
/// digit and at least one uppercase letter.
pub struct PasswordPolicy;

impl PasswordPolicy {
    pub const MIN_LENGTH: usize = 8;

    /// Human readable description of the rules, suitable for error messages.
    pub const REQUIREMENTS: &'static str = "Password must be at least 8 characters long, contain at least one uppercase letter and at least one digit";

    /// Check a candidate password against the policy.
    pub fn is_valid(password: &str) -> bool {
        if password.trim().is_empty() {
            return false;
        }

        password.chars().count() >= Self::MIN_LENGTH
            && password.chars().any(char::is_numeric)
            && password.chars().any(char::is_uppercase)
    }
}
