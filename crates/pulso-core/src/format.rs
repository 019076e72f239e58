//! pt-BR number conventions
//!
//! Figures are typed with `,` as the decimal separator and `.` for
//! thousands, and displayed as Brazilian reais.

/// Round to the nearest whole percent, halves away from zero
pub fn whole_percent(value: f64) -> i64 {
    value.round() as i64
}

/// Format a percentage as "12%"
pub fn format_pct(value: f64) -> String {
    format!("{}%", whole_percent(value))
}

/// Format a monetary value as "R$ 1.234,56"
pub fn format_brl(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let units = group_thousands(cents / 100);
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}R$ {},{:02}", sign, units, cents % 100)
}

fn group_thousands(mut n: u64) -> String {
    let mut groups = Vec::new();
    loop {
        if n < 1000 {
            groups.push(n.to_string());
            break;
        }
        groups.push(format!("{:03}", n % 1000));
        n /= 1000;
    }
    groups.reverse();
    groups.join(".")
}

/// Format an ISO "YYYY-MM-DD" date as "DD/MM/YYYY"
pub fn format_date_br(iso: &str) -> String {
    let parts: Vec<&str> = iso.split('-').collect();
    match parts.as_slice() {
        [y, m, d] => format!("{}/{}/{}", d, m, y),
        _ => iso.to_string(),
    }
}

/// Parse a number typed the pt-BR way
///
/// With both `.` and `,` present, `.` groups thousands and `,` is the
/// decimal mark ("1.234,50"). A lone `,` is the decimal mark ("3300,50").
/// Returns `None` for blank or unparseable input.
pub fn parse_number_pt_br(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    let compact: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
    let normalized = if compact.contains('.') && compact.contains(',') {
        compact.replace('.', "").replacen(',', ".", 1)
    } else {
        compact.replacen(',', ".", 1)
    };

    normalized.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_percent_rounds_half_away_from_zero() {
        assert_eq!(whole_percent(2.5), 3);
        assert_eq!(whole_percent(12.49), 12);
        assert_eq!(whole_percent(-2.5), -3);
        assert_eq!(whole_percent(-0.2), 0);
    }

    #[test]
    fn test_format_pct() {
        assert_eq!(format_pct(-49.09), "-49%");
        assert_eq!(format_pct(0.0), "0%");
        assert_eq!(format_pct(20.5), "21%");
    }

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(3300.5), "R$ 3.300,50");
        assert_eq!(format_brl(1234567.891), "R$ 1.234.567,89");
        assert_eq!(format_brl(999.999), "R$ 1.000,00");
        assert_eq!(format_brl(-42.1), "-R$ 42,10");
        assert_eq!(format_brl(-0.001), "R$ 0,00");
    }

    #[test]
    fn test_format_date_br() {
        assert_eq!(format_date_br("2025-01-05"), "05/01/2025");
        assert_eq!(format_date_br("garbage"), "garbage");
    }

    #[test]
    fn test_parse_plain_and_comma_decimal() {
        assert_eq!(parse_number_pt_br("3300"), Some(3300.0));
        assert_eq!(parse_number_pt_br("3300,50"), Some(3300.5));
        assert_eq!(parse_number_pt_br(" 3 300,5 "), Some(3300.5));
    }

    #[test]
    fn test_parse_thousands_and_decimal() {
        assert_eq!(parse_number_pt_br("1.234,56"), Some(1234.56));
        assert_eq!(parse_number_pt_br("1.234.567,8"), Some(1234567.8));
    }

    #[test]
    fn test_parse_lone_dot_is_decimal() {
        assert_eq!(parse_number_pt_br("12.5"), Some(12.5));
    }

    #[test]
    fn test_parse_rejects_blank_and_garbage() {
        assert_eq!(parse_number_pt_br(""), None);
        assert_eq!(parse_number_pt_br("   "), None);
        assert_eq!(parse_number_pt_br("abc"), None);
        assert_eq!(parse_number_pt_br("1,2,3"), None);
        assert_eq!(parse_number_pt_br("inf"), None);
    }
}
