use serde_json::Number;

/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use stride_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5,  1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let negative = value < 0.0;
    let abs_value = value.abs();

    // Nudge by a scaled epsilon so exact binary midpoints round up.
    let factor = 10_f64.powi(decimals as i32);
    let epsilon = f64::EPSILON * abs_value * factor;
    let rounded = ((abs_value * factor) + epsilon).round() / factor;

    let integer_part = rounded.trunc() as u64;
    let frac_part = rounded - rounded.trunc();

    let grouped = group_thousands(&integer_part.to_string());

    let result = if decimals == 0 {
        grouped
    } else {
        // `frac_str` starts with "0.", e.g. "0.50".
        let frac_str = format!("{:.prec$}", frac_part, prec = decimals as usize);
        format!("{}{}", grouped, &frac_str[1..])
    };

    if negative && rounded != 0.0 {
        format!("-{}", result)
    } else {
        result
    }
}

/// Render a float the way a plain repr would: shortest round-trip digits and
/// always a fractional part for integral values.
///
/// # Examples
///
/// ```
/// use stride_core::formatting::format_float;
///
/// assert_eq!(format_float(90.0), "90.0");
/// assert_eq!(format_float(12.345), "12.345");
/// assert_eq!(format_float(0.0), "0.0");
/// ```
pub fn format_float(value: f64) -> String {
    format!("{:?}", value)
}

/// `"Total Steps: N"` with the step count exactly as stored in the document.
///
/// # Examples
///
/// ```
/// use serde_json::Number;
/// use stride_core::formatting::format_steps_line;
///
/// assert_eq!(format_steps_line(&Number::from(120)), "Total Steps: 120");
/// ```
pub fn format_steps_line(total_steps: &Number) -> String {
    format!("Total Steps: {}", total_steps)
}

/// `"Total Distance: D meters"` where `D = distance_cm / 100`.
///
/// # Examples
///
/// ```
/// use stride_core::formatting::format_distance_line;
///
/// assert_eq!(format_distance_line(9000.0), "Total Distance: 90.0 meters");
/// assert_eq!(format_distance_line(12345.0), "Total Distance: 123.45 meters");
/// ```
pub fn format_distance_line(distance_cm: f64) -> String {
    format!("Total Distance: {} meters", format_float(distance_cm / 100.0))
}

/// Format a duration in minutes as a human-readable string.
///
/// * `< 60` minutes → `"45m"`
/// * `≥ 60` minutes, no remainder → `"3h"`
/// * `≥ 60` minutes, with remainder → `"3h 45m"`
///
/// # Examples
///
/// ```
/// use stride_core::formatting::format_time;
///
/// assert_eq!(format_time(45.0),  "45m");
/// assert_eq!(format_time(60.0),  "1h");
/// assert_eq!(format_time(225.0), "3h 45m");
/// ```
pub fn format_time(minutes: f64) -> String {
    let total_mins = minutes.round() as i64;
    if total_mins < 60 {
        format!("{}m", total_mins)
    } else {
        let hours = total_mins / 60;
        let mins = total_mins % 60;
        if mins == 0 {
            format!("{}h", hours)
        } else {
            format!("{}h {}m", hours, mins)
        }
    }
}

/// Format a run duration given in milliseconds.
///
/// Runs shorter than a minute are shown in seconds so they don't collapse
/// to `"0m"`.
pub fn format_duration_ms(duration_ms: f64) -> String {
    let seconds = duration_ms / 1000.0;
    if seconds < 59.5 {
        format!("{}s", seconds.max(0.0).round() as i64)
    } else {
        format_time(seconds / 60.0)
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────
