//! End-to-end consensus behaviour over small measurement batches.

use mw_consensus::{BlockedPredicate, Consensus, ConsensusOutcome, ConsensusSet, SummaryStatus};
use mw_core::{BlockedPolicy, CellValue, NormalizedKey, SENTINEL_STATUS, SourceTable};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn dig(name: &str, rows: &[(&str, &str)]) -> SourceTable {
    SourceTable::from_rows(
        name,
        &["Dominio", "Status", "Bloqueado"],
        "Dominio",
        "Bloqueado",
        rows.iter().map(|(domain, blocked)| [*domain, "NOERROR", *blocked]),
    )
    .expect("fixture should build")
}

fn si(n: usize) -> Vec<BlockedPredicate> {
    vec![BlockedPolicy::equals("Sí").into(); n]
}

fn status_of(table: &SourceTable, domain: &str) -> CellValue {
    let key = NormalizedKey::new(domain);
    table
        .first(&key)
        .and_then(|record| table.status_of(record))
        .cloned()
        .unwrap_or_default()
}

fn scenario_a() -> Vec<SourceTable> {
    vec![
        dig("t1", &[("example.com", "Sí"), ("other.com", "Sí")]),
        dig("t2", &[("example.com", "Sí")]),
        dig("t3", &[("example.com", "Sí")]),
    ]
}

#[test]
fn scenario_three_dig_tables() {
    let mut tables = scenario_a();
    let consensus = Consensus::default();

    let outcome = consensus.evaluate(&tables, &si(3)).expect("evaluate");
    assert_eq!(
        outcome.set(),
        ConsensusSet::from([NormalizedKey::new("example.com")])
    );

    let reports = consensus
        .rewrite(&mut tables, &outcome.set(), &si(3))
        .expect("rewrite");
    assert_eq!(
        reports.iter().map(|r| r.changed).collect::<Vec<_>>(),
        vec![1, 1, 1]
    );

    for table in &tables {
        assert_eq!(
            status_of(table, "example.com"),
            CellValue::from(SENTINEL_STATUS)
        );
    }
    assert_eq!(status_of(&tables[0], "other.com"), CellValue::from("Sí"));
}

#[test]
fn rewrite_is_idempotent() {
    let mut tables = scenario_a();
    let consensus = Consensus::default();
    let set = consensus.evaluate(&tables, &si(3)).expect("evaluate").set();

    let first = consensus.rewrite(&mut tables, &set, &si(3)).expect("first");
    let second = consensus.rewrite(&mut tables, &set, &si(3)).expect("second");

    assert_eq!(first.iter().map(|r| r.changed).sum::<usize>(), 3);
    assert_eq!(second.iter().map(|r| r.changed).sum::<usize>(), 0);
}

#[test]
fn marked_keys_never_reenter_consensus() {
    let mut tables = scenario_a();
    let consensus = Consensus::default();

    let first = consensus.mark(&mut tables, &si(3)).expect("first mark");
    assert_eq!(first.status, SummaryStatus::Marked);

    let outcome = consensus.evaluate(&tables, &si(3)).expect("re-evaluate");
    assert!(outcome.set().is_empty());

    let second = consensus.mark(&mut tables, &si(3)).expect("second mark");
    assert_eq!(second.status, SummaryStatus::NoConsensus);
    assert_eq!(second.total_changed(), 0);
}

#[rstest]
#[case(&[0, 1, 2])]
#[case(&[2, 1, 0])]
#[case(&[1, 2, 0])]
fn evaluate_ignores_table_order(#[case] order: &[usize]) {
    let base = vec![
        dig("t1", &[("a.com", "Sí"), ("b.com", "Sí"), ("c.com", "No")]),
        dig("t2", &[("b.com", "Sí"), ("a.com", "Sí"), ("c.com", "Sí")]),
        dig("t3", &[("c.com", "Sí"), ("a.com", "Sí"), ("b.com", "No")]),
    ];
    let reordered: Vec<SourceTable> = order.iter().map(|i| base[*i].clone()).collect();

    let consensus = Consensus::default();
    let expected = consensus.evaluate(&base, &si(3)).expect("base").set();
    let actual = consensus.evaluate(&reordered, &si(3)).expect("reordered").set();

    assert_eq!(actual, expected);
    assert_eq!(expected, ConsensusSet::from([NormalizedKey::new("a.com")]));
}

#[test]
fn mixed_sources_with_custom_predicate() {
    let web = SourceTable::from_rows(
        "ooni",
        &["input", "accessible"],
        "input",
        "accessible",
        [
            vec![CellValue::from("https://example.com/"), CellValue::Bool(false)],
            vec![CellValue::from("https://ok.com/"), CellValue::Bool(true)],
        ],
    )
    .expect("fixture should build");
    let mut tables = vec![dig("dig", &[("example.com", "Sí"), ("ok.com", "Sí")]), web];
    let predicates: Vec<BlockedPredicate> = vec![
        BlockedPolicy::equals("Sí").into(),
        BlockedPredicate::custom(|value| matches!(value, CellValue::Bool(false))),
    ];

    let summary = Consensus::default()
        .mark(&mut tables, &predicates)
        .expect("mark");

    assert_eq!(summary.consensus, vec!["example.com".to_string()]);
    assert_eq!(
        tables[1].rows()[0].get(1),
        Some(&CellValue::from(SENTINEL_STATUS))
    );
    assert_eq!(tables[1].rows()[1].get(1), Some(&CellValue::Bool(true)));
}

#[test]
fn unrecognized_status_is_not_blocked() {
    let tables = vec![
        dig("t1", &[("x.com", "Sí")]),
        dig("t2", &[("x.com", "???")]),
    ];
    let outcome = Consensus::default().evaluate(&tables, &si(2)).expect("evaluate");
    assert!(matches!(outcome, ConsensusOutcome::Found { ref set, .. } if set.is_empty()));
}
