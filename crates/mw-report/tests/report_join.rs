//! Joining classification output with DNS and web-probe measurements.

use mw_core::SourceTable;
use mw_report::{ReportColumns, ReportRow, build_report};
use pretty_assertions::assert_eq;

fn fixtures() -> (SourceTable, SourceTable, SourceTable) {
    let classification = SourceTable::from_rows(
        "lista_global_categorizada",
        &["url", "matched_keywords", "deduction"],
        "url",
        "deduction",
        [
            ["https://casino.example/", "casino", "gmb"],
            ["http://diario.example", "diario", "news, polr"],
            ["https://quiet.example", "", ""],
        ],
    )
    .expect("classification");

    let dns = SourceTable::from_rows(
        "uruguay_dig",
        &["Dominio", "Status", "Bloqueado"],
        "Dominio",
        "Bloqueado",
        [
            ["casino.example", "NXDOMAIN", "Sí"],
            ["diario.example", "NOERROR", "No"],
            ["casino.example", "NOERROR", "No"],
        ],
    )
    .expect("dns");

    let http = SourceTable::from_rows(
        "uruguay_ooni",
        &["input", "accessible", "dns_experiment_failure", "http_experiment_failure"],
        "input",
        "accessible",
        [
            ["https://casino.example/", "False", "dns_nxdomain_error", ""],
            ["http://diario.example/", "NOACCESIBLEPORMETODO", "", "generic_timeout_error"],
        ],
    )
    .expect("http");

    (classification, dns, http)
}

#[test]
fn full_join() {
    let (classification, dns, http) = fixtures();
    let rows = build_report(&classification, Some(&dns), Some(&http), &ReportColumns::default())
        .expect("report");

    assert_eq!(
        rows,
        vec![
            ReportRow {
                url: "casino.example".into(),
                accessible_http: "NO".into(),
                accessible_dns: "NO".into(),
                dns_failure: "dns_nxdomain_error".into(),
                http_failure: "NOERROR".into(),
                dns_status: "NXDOMAIN".into(),
                deduction: "gmb".into(),
            },
            ReportRow {
                url: "diario.example".into(),
                accessible_http: "NOACCESIBLEPORMETODO".into(),
                accessible_dns: "SI".into(),
                dns_failure: "NOERROR".into(),
                http_failure: "generic_timeout_error".into(),
                dns_status: "NOERROR".into(),
                deduction: "news, polr".into(),
            },
            ReportRow {
                url: "quiet.example".into(),
                accessible_http: "SI".into(),
                accessible_dns: String::new(),
                dns_failure: "NOERROR".into(),
                http_failure: "NOERROR".into(),
                dns_status: String::new(),
                deduction: "SIN DEDUCCION".into(),
            },
        ]
    );
}

#[test]
fn joined_table_without_key_column_contributes_nothing() {
    let (classification, _, _) = fixtures();
    let headless = SourceTable::from_rows(
        "odd",
        &["domain", "Bloqueado"],
        "domain",
        "Bloqueado",
        [["casino.example", "Sí"]],
    )
    .expect("odd");

    let rows = build_report(&classification, Some(&headless), None, &ReportColumns::default())
        .expect("report");
    assert!(rows.iter().all(|row| row.accessible_dns.is_empty()));
}

#[test]
fn header_matches_row_cells() {
    let (classification, dns, http) = fixtures();
    let rows = build_report(&classification, Some(&dns), Some(&http), &ReportColumns::default())
        .expect("report");
    assert_eq!(ReportRow::HEADER.len(), rows[0].cells().len());
    assert_eq!(rows[0].cells()[0], "casino.example");
}
