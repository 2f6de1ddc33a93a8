//! Cell mappings applied by the report join.
//!
//! Each function takes the looked-up value, `None` when the joined table has
//! no row for the URL, and returns the text written to the report.

/// Written when a measurement recorded no failure.
pub const NO_ERROR: &str = "NOERROR";

/// Written when classification deduced nothing.
pub const NO_DEDUCTION: &str = "SIN DEDUCCION";

/// Web-probe reachability: `SI` when reachable or unknown, `NO` when the probe
/// reported it inaccessible. Other values (the sentinel) pass through.
#[must_use]
pub fn http_accessible(value: Option<&str>) -> String {
    let value = value.map_or("", str::trim);
    if value.is_empty() || value.eq_ignore_ascii_case("true") {
        "SI".to_string()
    } else if value.eq_ignore_ascii_case("false") {
        "NO".to_string()
    } else {
        value.to_string()
    }
}

/// DNS reachability. The DNS table records whether the domain was *blocked*,
/// so the answer is inverted. Unknown stays empty.
#[must_use]
pub fn dns_accessible(value: Option<&str>) -> String {
    let value = value.map_or("", str::trim);
    match value {
        "Sí" | "Si" | "SI" => "NO".to_string(),
        "No" | "NO" => "SI".to_string(),
        other => other.to_string(),
    }
}

#[must_use]
pub fn failure_or_default(value: Option<&str>) -> String {
    match value.map(str::trim) {
        None | Some("") => NO_ERROR.to_string(),
        Some(failure) => failure.to_string(),
    }
}

#[must_use]
pub fn or_no_deduction(value: Option<&str>) -> String {
    match value.map(str::trim) {
        None | Some("") => NO_DEDUCTION.to_string(),
        Some(deduction) => deduction.to_string(),
    }
}
