//! Duration input parsing.
//!
//! Accepted forms:
//! - `25` (bare number, minutes)
//! - `90s`, `25m`, `1m30s`
//! - a leading `-` negates the value; the scheduler rejects it later

/// Parses user input into signed seconds.
///
/// # Errors
///
/// Returns a message if the input is empty, contains anything other than
/// digits and `m`/`s` units, or overflows.
pub fn parse_duration_input(input: &str) -> Result<i64, String> {
    let input = input.trim().to_lowercase();
    let (negative, body) = match input.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, input.as_str()),
    };

    if body.is_empty() {
        return Err("値が入力されていません".to_string());
    }

    let seconds = parse_unsigned(body)?;
    let seconds = i64::try_from(seconds).map_err(|_| "値が大きすぎます".to_string())?;
    Ok(if negative { -seconds } else { seconds })
}

/// Parses a duration for a command-line option; must be positive.
///
/// # Errors
///
/// Returns a message if the value is malformed, not positive, or does not
/// fit in 32 bits.
pub fn parse_duration_arg(input: &str) -> Result<u32, String> {
    let seconds = parse_duration_input(input)?;
    if seconds <= 0 {
        return Err("1秒以上の値を指定してください".to_string());
    }
    u32::try_from(seconds).map_err(|_| "値が大きすぎます".to_string())
}

fn parse_unsigned(body: &str) -> Result<u64, String> {
    // A bare number means minutes
    if let Ok(minutes) = body.parse::<u64>() {
        return minutes
            .checked_mul(60)
            .ok_or_else(|| "値が大きすぎます".to_string());
    }

    let mut total: u64 = 0;
    let mut digits = String::new();

    for ch in body.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            continue;
        }

        let unit = match ch {
            'm' => 60,
            's' => 1,
            c if c.is_whitespace() => continue,
            _ => {
                return Err(format!(
                    "無効な文字 '{}' が含まれています（例: 25, 25m, 90s, 1m30s）",
                    ch
                ))
            }
        };

        if digits.is_empty() {
            return Err("単位の前に数値が必要です（例: 25m, 90s）".to_string());
        }
        let value: u64 = digits.parse().map_err(|_| "数値が不正です".to_string())?;
        total = value
            .checked_mul(unit)
            .and_then(|v| total.checked_add(v))
            .ok_or_else(|| "値が大きすぎます".to_string())?;
        digits.clear();
    }

    if !digits.is_empty() {
        return Err("数値の後に 'm' か 's' を付けてください（例: 1m30s）".to_string());
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    mod input_tests {
        use super::*;

        #[test]
        fn test_bare_number_is_minutes() {
            assert_eq!(parse_duration_input("25"), Ok(1500));
            assert_eq!(parse_duration_input(" 1 "), Ok(60));
        }

        #[test]
        fn test_units() {
            assert_eq!(parse_duration_input("90s"), Ok(90));
            assert_eq!(parse_duration_input("2m"), Ok(120));
            assert_eq!(parse_duration_input("1m30s"), Ok(90));
            assert_eq!(parse_duration_input("1M 5S"), Ok(65));
        }

        #[test]
        fn test_negative_values_pass_through() {
            assert_eq!(parse_duration_input("-5"), Ok(-300));
            assert_eq!(parse_duration_input("-10s"), Ok(-10));
        }

        #[test]
        fn test_zero_passes_through() {
            assert_eq!(parse_duration_input("0"), Ok(0));
        }

        #[test]
        fn test_non_numeric_is_rejected() {
            assert!(parse_duration_input("abc").is_err());
            assert!(parse_duration_input("5h").is_err());
            assert!(parse_duration_input("m").is_err());
            assert!(parse_duration_input("1m30").is_err());
        }

        #[test]
        fn test_empty_is_rejected() {
            assert!(parse_duration_input("").is_err());
            assert!(parse_duration_input("-").is_err());
        }

        #[test]
        fn test_overflow_is_rejected() {
            assert!(parse_duration_input("18446744073709551615").is_err());
            assert!(parse_duration_input("18446744073709551615m").is_err());
        }
    }

    mod arg_tests {
        use super::*;

        #[test]
        fn test_positive_arg() {
            assert_eq!(parse_duration_arg("25m"), Ok(1500));
            assert_eq!(parse_duration_arg("2s"), Ok(2));
        }

        #[test]
        fn test_non_positive_arg_is_rejected() {
            assert!(parse_duration_arg("0").is_err());
            assert!(parse_duration_arg("-1").is_err());
        }

        #[test]
        fn test_arg_too_large() {
            assert!(parse_duration_arg("99999999999s").is_err());
        }
    }
}
