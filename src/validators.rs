use regex::Regex;
use std::sync::LazyLock;

pub type ValidationError = String;
pub type Validator = Box<dyn Fn(&str) -> Result<(), ValidationError> + Send + Sync>;

pub const PASSWORD_SPECIALS: &str = "!@#$%^&*(),.?\":{}|<>";

pub const STRONG_PASSWORD_MESSAGE: &str = concat!(
    "Password must be at least 8 characters with uppercase, lowercase, ",
    "number, and special character"
);

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));
static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9]\d{0,15}$").expect("phone pattern"));
static LICENSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]{6,12}$").expect("license pattern"));
static ZIP_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}(-\d{4})?$").expect("zip pattern"));

/// Run a list of validators against `value`, returning the first error.
pub fn run_validators(validators: &[Validator], value: &str) -> Result<(), ValidationError> {
    for validator in validators {
        validator(value)?;
    }
    Ok(())
}

pub fn required(message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if value.trim().is_empty() {
            Err(message.clone())
        } else {
            Ok(())
        }
    })
}

pub fn min_length(min_len: usize, message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if value.chars().count() < min_len {
            Err(message.clone())
        } else {
            Ok(())
        }
    })
}

pub fn max_length(max_len: usize, message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if value.chars().count() > max_len {
            Err(message.clone())
        } else {
            Ok(())
        }
    })
}

pub fn pattern(pattern: &str, message: impl Into<String>) -> Result<Validator, regex::Error> {
    let re = Regex::new(pattern)?;
    Ok(matching(re, message))
}

fn matching(re: Regex, message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if re.is_match(value) {
            Ok(())
        } else {
            Err(message.clone())
        }
    })
}

pub fn email(message: impl Into<String>) -> Validator {
    matching(EMAIL.clone(), message)
}

/// Accepts an optional leading `+` and up to 16 digits once spaces, dashes
/// and parentheses are stripped.
pub fn phone(message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        let digits: String = value
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
            .collect();
        if PHONE.is_match(&digits) {
            Ok(())
        } else {
            Err(message.clone())
        }
    })
}

/// 6 to 12 ASCII letters or digits, case-insensitive.
pub fn license_number(message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if LICENSE.is_match(&value.to_ascii_uppercase()) {
            Ok(())
        } else {
            Err(message.clone())
        }
    })
}

pub fn zip_code(message: impl Into<String>) -> Validator {
    matching(ZIP_CODE.clone(), message)
}

pub fn password_strength(message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if is_strong_password(value) {
            Ok(())
        } else {
            Err(message.clone())
        }
    })
}

pub fn is_strong_password(value: &str) -> bool {
    value.chars().count() >= 8
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_digit())
        && value.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

/// Inclusive numeric range, decimals included. Non-numeric input fails with
/// the same message.
pub fn number_range(min: i64, max: i64, message: impl Into<String>) -> Validator {
    let message = message.into();
    let (low, high) = (min as f64, max as f64);
    Box::new(move |value: &str| match value.trim().parse::<f64>() {
        Ok(n) if n.is_finite() && (low..=high).contains(&n) => Ok(()),
        _ => Err(message.clone()),
    })
}

pub fn one_of<I, S>(options: I, message: impl Into<String>) -> Validator
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let options: Vec<String> = options.into_iter().map(Into::into).collect();
    let message = message.into();
    Box::new(move |value: &str| {
        if options.iter().any(|option| option == value) {
            Ok(())
        } else {
            Err(message.clone())
        }
    })
}

pub fn custom<F>(f: F, message: impl Into<String>) -> Validator
where
    F: Fn(&str) -> bool + Send + Sync + 'static,
{
    let message = message.into();
    Box::new(move |value: &str| if f(value) { Ok(()) } else { Err(message.clone()) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape() {
        let v = email("bad email");
        assert!(v("a@b.co").is_ok());
        assert_eq!(v("not-an-email"), Err("bad email".to_string()));
        assert!(v("a b@c.io").is_err());
        assert!(v("a@b").is_err());
    }

    #[test]
    fn phone_ignores_formatting() {
        let v = phone("bad phone");
        assert!(v("(555) 123-4567").is_ok());
        assert!(v("+15551234567").is_ok());
        assert!(v("0123").is_err());
        assert!(v("12345678901234567").is_err());
        assert!(v("555-abc").is_err());
    }

    #[test]
    fn license_number_bounds() {
        let v = license_number("bad license");
        assert!(v("ab12cd").is_ok());
        assert!(v("ABCDEF123456").is_ok());
        assert!(v("ab12c").is_err());
        assert!(v("ABCDEF1234567").is_err());
        assert!(v("AB-12CD").is_err());
    }

    #[test]
    fn password_composition() {
        assert!(!is_strong_password("abc"));
        assert!(!is_strong_password("abcdefg1!"));
        assert!(!is_strong_password("ABCDEFG1!"));
        assert!(!is_strong_password("Abcdefgh!"));
        assert!(!is_strong_password("Abcdefg12"));
        assert!(is_strong_password("Abcdef1!"));
    }

    #[test]
    fn number_range_is_inclusive() {
        let v = number_range(0, 50, "out of range");
        assert!(v("0").is_ok());
        assert!(v("50").is_ok());
        assert!(v("51").is_err());
        assert!(v("-1").is_err());
        assert!(v("ten").is_err());
    }

    #[test]
    fn number_range_accepts_decimals() {
        let v = number_range(0, 50, "out of range");
        assert!(v("2.5").is_ok());
        assert!(v(" 49.9 ").is_ok());
        assert!(v("50.5").is_err());
        assert!(v("-0.5").is_err());
        assert!(v("NaN").is_err());
        assert!(v("inf").is_err());
    }

    #[test]
    fn length_bounds_count_chars() {
        assert!(min_length(2, "short")("é").is_err());
        assert!(min_length(2, "short")("éé").is_ok());
        assert!(max_length(3, "long")("abcd").is_err());
    }

    #[test]
    fn first_failure_wins() {
        let validators = vec![required("required"), min_length(3, "too short")];
        assert_eq!(run_validators(&validators, " "), Err("required".to_string()));
        assert_eq!(run_validators(&validators, "ab"), Err("too short".to_string()));
        assert_eq!(run_validators(&validators, "abc"), Ok(()));
    }

    #[test]
    fn invalid_pattern_is_reported() {
        assert!(pattern("(", "never").is_err());
        let v = pattern(r"^\d+$", "digits only").expect("pattern");
        assert!(v("123").is_ok());
    }

    #[test]
    fn zip_code_forms() {
        let v = zip_code("bad zip");
        assert!(v("12345").is_ok());
        assert!(v("12345-6789").is_ok());
        assert!(v("1234").is_err());
    }
}
