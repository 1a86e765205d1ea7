//! Password strength heuristics for the registration form.

#[cfg(test)]
#[path = "password_test.rs"]
mod password_test;

pub const MIN_LENGTH: usize = 8;
pub const SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Strength {
    TooShort,
    Weak,
    Medium,
    Strong,
}

impl Strength {
    pub fn label(self) -> &'static str {
        match self {
            Self::TooShort => "Too Short",
            Self::Weak => "Weak",
            Self::Medium => "Medium",
            Self::Strong => "Strong",
        }
    }

    /// CSS modifier for the strength bar. `TooShort` and `Weak` share `weak`.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::TooShort | Self::Weak => "weak",
            Self::Medium => "medium",
            Self::Strong => "strong",
        }
    }

    /// Weak passwords block registration.
    pub fn is_weak(self) -> bool {
        self <= Self::Weak
    }
}

/// One line of the requirements checklist under the password field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Requirement {
    pub label: &'static str,
    pub met: bool,
}

fn long_enough(password: &str) -> bool {
    password.chars().count() >= MIN_LENGTH
}

fn mixed_case(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_lowercase()) && password.chars().any(|c| c.is_ascii_uppercase())
}

fn has_digit(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_digit())
}

fn has_symbol(password: &str) -> bool {
    password.chars().any(|c| SYMBOLS.contains(c))
}

pub fn strength(password: &str) -> Strength {
    let score = [long_enough, mixed_case, has_digit, has_symbol]
        .iter()
        .filter(|check| check(password))
        .count();
    match score {
        _ if score == 0 || !long_enough(password) => Strength::TooShort,
        1 | 2 => Strength::Weak,
        3 => Strength::Medium,
        _ => Strength::Strong,
    }
}

pub fn requirements(password: &str) -> [Requirement; 4] {
    [
        Requirement { label: "8+ Chars", met: long_enough(password) },
        Requirement { label: "Upper & Lower", met: mixed_case(password) },
        Requirement { label: "Number", met: has_digit(password) },
        Requirement { label: "Symbol", met: has_symbol(password) },
    ]
}
