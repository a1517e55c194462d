//! Number display helpers.

use std::fmt::Display;
use std::time::Instant;

/// Zero-pad a single digit, e.g. `7` -> `"07"`. Handy for dates.
pub fn two_digits(n: i64) -> String {
  if (0..10).contains(&n) { format!("0{}", n) } else { n.to_string() }
}

/// Insert thousands separators into the integer part of a number,
/// keeping any sign and decimal part: `1234567.89` -> `"1,234,567.89"`.
pub fn add_commas<N: Display>(num: N) -> String {
  let text = num.to_string();
  let (int_part, frac_part) = match text.split_once('.') {
    Some((i, f)) => (i, Some(f)),
    None => (text.as_str(), None),
  };

  // Group only the run of digits; a leading sign or other prefix is kept as-is.
  let digits_at = int_part.find(|c: char| c.is_ascii_digit()).unwrap_or(int_part.len());
  let digits_end = int_part[digits_at..]
    .find(|c: char| !c.is_ascii_digit())
    .map_or(int_part.len(), |i| digits_at + i);
  let (prefix, rest) = int_part.split_at(digits_at);
  let (digits, suffix) = rest.split_at(digits_end - digits_at);

  let mut out = String::with_capacity(text.len() + digits.len() / 3);
  out.push_str(prefix);
  for (i, ch) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      out.push(',');
    }
    out.push(ch);
  }
  out.push_str(suffix);
  if let Some(f) = frac_part {
    out.push('.');
    out.push_str(f);
  }
  out
}

/// True when `text` holds a finite number (surrounding whitespace allowed).
pub fn is_number(text: &str) -> bool {
  text.trim().parse::<f64>().map(f64::is_finite).unwrap_or(false)
}

/// Seconds elapsed between `start` and `end`, negative if `end` comes first.
pub fn response_time_secs(start: Instant, end: Instant) -> f64 {
  match end.checked_duration_since(start) {
    Some(d) => d.as_secs_f64(),
    None => -start.duration_since(end).as_secs_f64(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::time::Duration;

  #[test]
  fn test_two_digits() {
    assert_eq!(two_digits(0), "00");
    assert_eq!(two_digits(7), "07");
    assert_eq!(two_digits(10), "10");
    assert_eq!(two_digits(123), "123");
    assert_eq!(two_digits(-3), "-3");
  }

  #[test]
  fn test_add_commas() {
    assert_eq!(add_commas(1234567), "1,234,567");
    assert_eq!(add_commas(1234567.89), "1,234,567.89");
    assert_eq!(add_commas(999), "999");
    assert_eq!(add_commas(1000), "1,000");
    assert_eq!(add_commas(-9876543), "-9,876,543");
    assert_eq!(add_commas("12345.6789"), "12,345.6789");
    assert_eq!(add_commas(""), "");
  }

  #[test]
  fn test_is_number() {
    assert!(is_number("42"));
    assert!(is_number(" -3.5 "));
    assert!(is_number("1e3"));
    assert!(!is_number("abc"));
    assert!(!is_number(""));
    assert!(!is_number("inf"));
    assert!(!is_number("NaN"));
  }

  #[test]
  fn test_response_time_secs() {
    let start = Instant::now();
    let end = start + Duration::from_millis(1500);
    assert!((response_time_secs(start, end) - 1.5).abs() < 1e-9);
    assert!((response_time_secs(end, start) + 1.5).abs() < 1e-9);
  }
}
