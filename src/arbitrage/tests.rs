//! Tests for the arbitrage module.

use super::enumerator::cycles_per_start;
use super::*;
use crate::domain::{Balance, Currency, Cycle, Fee, TradeOutcome};

const EPS: f64 = 1e-9;

fn c(symbol: &str) -> Currency {
    Currency::from(symbol)
}

fn balance(amount: f64) -> Balance {
    Balance::new(amount).unwrap()
}

/// Directed triangle A -> B -> C -> A with no reverse edges.
fn triangle(ab: f64, bc: f64, ca: f64) -> RateGraph {
    RateGraph::from_effective_rates(vec![
        (c("A"), c("B"), ab),
        (c("B"), c("C"), bc),
        (c("C"), c("A"), ca),
    ])
    .unwrap()
}

/// Every cycle the enumerator yields, start currency by start currency.
fn all_cycles(enumerator: &CycleEnumerator) -> Vec<Cycle> {
    enumerator
        .currencies()
        .iter()
        .flat_map(|start| enumerator.cycles_from(start))
        .collect()
}

/// Graph where every pair of the given currencies is quoted at 1.0.
fn complete_graph(symbols: &[&str], fee: Fee) -> RateGraph {
    let mut graph = RateGraph::new();
    for (i, base) in symbols.iter().enumerate() {
        for quote in &symbols[i + 1..] {
            graph.add_edge(&c(base), &c(quote), 1.0, fee).unwrap();
        }
    }
    graph
}

// ==================== RateGraph ====================

#[test]
fn test_add_edge_applies_fee_both_directions() {
    let mut graph = RateGraph::new();
    let fee = Fee::new(0.001).unwrap();
    graph.add_edge(&c("BTC"), &c("ETH"), 20.0, fee).unwrap();

    assert!((graph.rate(&c("BTC"), &c("ETH")).unwrap() - 20.0 * 0.999).abs() < EPS);
    assert!((graph.rate(&c("ETH"), &c("BTC")).unwrap() - 0.05 * 0.999).abs() < EPS);
    assert_eq!(graph.edge_count(), 2);
}

#[test]
fn test_add_edge_overwrites_previous_rate() {
    let mut graph = RateGraph::new();
    graph.add_edge(&c("A"), &c("B"), 2.0, Fee::ZERO).unwrap();
    graph.add_edge(&c("A"), &c("B"), 4.0, Fee::ZERO).unwrap();

    assert!((graph.rate(&c("A"), &c("B")).unwrap() - 4.0).abs() < EPS);
    assert!((graph.rate(&c("B"), &c("A")).unwrap() - 0.25).abs() < EPS);
    assert_eq!(graph.edge_count(), 2);
}

#[test]
fn test_add_edge_rejects_invalid_rate() {
    let mut graph = RateGraph::new();
    for rate in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let err = graph.add_edge(&c("A"), &c("B"), rate, Fee::ZERO).unwrap_err();
        assert!(matches!(err, ArbitrageError::InvalidRate { .. }));
    }
    assert!(graph.is_empty());
}

#[test]
fn test_rate_missing_edge() {
    let graph = triangle(2.0, 2.0, 0.3);
    let err = graph.rate(&c("A"), &c("C")).unwrap_err();
    assert_eq!(
        err,
        ArbitrageError::EdgeNotFound {
            from: c("A"),
            to: c("C")
        }
    );
    assert!(graph.rate(&c("X"), &c("A")).is_err());
}

#[test]
fn test_currencies_in_insertion_order() {
    let mut graph = RateGraph::new();
    graph.add_edge(&c("ETH"), &c("BTC"), 0.05, Fee::ZERO).unwrap();
    graph.add_edge(&c("USDT"), &c("ETH"), 0.0005, Fee::ZERO).unwrap();

    let currencies: Vec<_> = graph.currencies().cloned().collect();
    assert_eq!(currencies, vec![c("ETH"), c("BTC"), c("USDT")]);
}

#[test]
fn test_neighbors() {
    let mut graph = RateGraph::new();
    graph.add_edge(&c("A"), &c("B"), 2.0, Fee::ZERO).unwrap();
    graph.add_edge(&c("A"), &c("C"), 3.0, Fee::ZERO).unwrap();

    let from_a: Vec<_> = graph.neighbors(&c("A")).cloned().collect();
    assert_eq!(from_a, vec![c("B"), c("C")]);

    let from_b: Vec<_> = graph.neighbors(&c("B")).cloned().collect();
    assert_eq!(from_b, vec![c("A")]);

    assert_eq!(graph.neighbors(&c("Z")).count(), 0);
}

#[test]
fn test_insert_rate_registers_target_node() {
    let mut graph = RateGraph::new();
    graph.insert_rate(&c("A"), &c("B"), 1.5).unwrap();

    assert!(graph.contains(&c("B")));
    assert_eq!(graph.len(), 2);
    assert_eq!(graph.neighbors(&c("B")).count(), 0);
}

// ==================== CycleEnumerator ====================

#[test]
fn test_cycles_per_start_formula() {
    assert_eq!(cycles_per_start(5, 2), 4);
    assert_eq!(cycles_per_start(5, 3), 12);
    assert_eq!(cycles_per_start(5, 4), 24);
    assert_eq!(cycles_per_start(3, 4), 0);
    assert_eq!(cycles_per_start(1, 2), 0);
}

#[test]
fn test_enumerator_permutation_counts() {
    let symbols = ["A", "B", "C", "D", "E", "F"];
    let graph = complete_graph(&symbols, Fee::ZERO);
    let n = symbols.len();

    for start in graph.currencies() {
        let cycles: Vec<_> = enumerate(&graph, start, 4).collect();
        for len in 2..=4 {
            let count = cycles.iter().filter(|cy| cy.hop_count() == len).count();
            assert_eq!(count, cycles_per_start(n, len), "start {} len {}", start, len);
        }
        assert_eq!(cycles.len(), 5 + 20 + 60);
    }
}

#[test]
fn test_engine_evaluates_every_permutation() {
    let symbols = ["A", "B", "C", "D", "E", "F"];
    let graph = complete_graph(&symbols, Fee::ZERO);
    let n = symbols.len();

    let report = ArbitrageEngine::new(4).unwrap().run_pass(&graph, balance(100.0));

    assert_eq!(report.unreachable, 0);
    assert_eq!(report.records.len(), n * (5 + 20 + 60));
    for start in graph.currencies() {
        for len in 2..=4 {
            let count = report
                .records
                .iter()
                .filter(|r| r.cycle.start() == start && r.cycle.hop_count() == len)
                .count();
            assert_eq!(count, cycles_per_start(n, len), "start {} len {}", start, len);
        }
    }
}

#[test]
fn test_enumerate_matches_snapshot_enumerator() {
    let graph = complete_graph(&["A", "B", "C", "D"], Fee::ZERO);
    let enumerator = CycleEnumerator::from_graph(&graph, 3);

    for start in graph.currencies() {
        let direct: Vec<Cycle> = enumerate(&graph, start, 3).collect();
        let snapshot: Vec<Cycle> = enumerator.cycles_from(start).collect();
        assert_eq!(direct, snapshot);
    }
}

#[test]
fn test_enumerator_candidate_count() {
    let enumerator = CycleEnumerator::new(vec![c("A"), c("B"), c("C"), c("D")], 4);
    assert_eq!(enumerator.candidate_count(), 4 * (3 + 6 + 6));
    assert_eq!(all_cycles(&enumerator).len(), enumerator.candidate_count());
}

#[test]
fn test_enumerator_order_and_shape() {
    let enumerator = CycleEnumerator::new(vec![c("A"), c("B"), c("C")], 3);
    let a = c("A");
    let cycles: Vec<String> = enumerator.cycles_from(&a).map(|cy| cy.to_string()).collect();

    assert_eq!(
        cycles,
        vec![
            "A -> B -> A",
            "A -> C -> A",
            "A -> B -> C -> A",
            "A -> C -> B -> A",
        ]
    );
}

#[test]
fn test_enumerator_cycles_are_simple() {
    let enumerator = CycleEnumerator::new(vec![c("A"), c("B"), c("C"), c("D")], 4);
    for cycle in all_cycles(&enumerator) {
        // Re-validating through the public constructor must succeed.
        assert!(Cycle::from_path(cycle.path().to_vec()).is_ok(), "{}", cycle);
    }
}

#[test]
fn test_enumerator_keeps_rotations() {
    let enumerator = CycleEnumerator::new(vec![c("A"), c("B"), c("C")], 3);
    let all: Vec<String> = all_cycles(&enumerator).iter().map(|cy| cy.to_string()).collect();

    assert!(all.contains(&"A -> B -> C -> A".to_string()));
    assert!(all.contains(&"B -> C -> A -> B".to_string()));
    assert!(all.contains(&"C -> A -> B -> C".to_string()));
}

#[test]
fn test_enumerator_max_len_below_two_is_empty() {
    let enumerator = CycleEnumerator::new(vec![c("A"), c("B")], 1);
    assert!(all_cycles(&enumerator).is_empty());
}

// ==================== PathSimulator ====================

#[test]
fn test_two_cycle_fee_erosion_per_hop() {
    let fee = Fee::new(0.001).unwrap();
    let mut graph = RateGraph::new();
    graph.add_edge(&c("BTC"), &c("ETH"), 20.0, fee).unwrap();

    let cycle = Cycle::new(c("BTC"), vec![c("ETH")]).unwrap();
    let multiplier = simulate(&graph, &cycle, 1.0).unwrap();

    let expected = graph.rate(&c("BTC"), &c("ETH")).unwrap() * graph.rate(&c("ETH"), &c("BTC")).unwrap();
    assert!((multiplier - expected).abs() < EPS);
    assert!((multiplier - 0.999 * 0.999).abs() < EPS);
    assert!(multiplier < 1.0);
}

#[test]
fn test_two_cycle_without_fee_is_neutral() {
    let mut graph = RateGraph::new();
    graph.add_edge(&c("A"), &c("B"), 2.0, Fee::ZERO).unwrap();

    let cycle = Cycle::new(c("A"), vec![c("B")]).unwrap();
    assert!((simulate(&graph, &cycle, 100.0).unwrap() - 100.0).abs() < EPS);
}

#[test]
fn test_simulate_compounds_rates() {
    let graph = triangle(2.0, 2.0, 0.3);
    let cycle = Cycle::new(c("A"), vec![c("B"), c("C")]).unwrap();

    assert!((simulate(&graph, &cycle, 100.0).unwrap() - 120.0).abs() < EPS);
}

#[test]
fn test_simulate_unreachable() {
    let graph = triangle(2.0, 2.0, 0.3);
    let cycle = Cycle::new(c("A"), vec![c("C"), c("B")]).unwrap();

    let err = simulate(&graph, &cycle, 100.0).unwrap_err();
    assert_eq!(
        err,
        ArbitrageError::PathUnreachable {
            hop: 0,
            from: c("A"),
            to: c("C")
        }
    );
}

#[test]
fn test_simulate_unreachable_on_last_hop() {
    let graph = RateGraph::from_effective_rates(vec![(c("A"), c("B"), 2.0)]).unwrap();
    let cycle = Cycle::new(c("A"), vec![c("B")]).unwrap();

    let err = simulate(&graph, &cycle, 100.0).unwrap_err();
    assert!(matches!(err, ArbitrageError::PathUnreachable { hop: 1, .. }));
}

// ==================== ArbitrageEngine ====================

#[test]
fn test_engine_rejects_short_max_len() {
    let err = ArbitrageEngine::new(1).unwrap_err();
    assert!(matches!(err, ArbitrageError::InvalidConfiguration(_)));
    assert!(ArbitrageEngine::new(2).is_ok());
}

#[test]
fn test_engine_default_max_len() {
    assert_eq!(ArbitrageEngine::default().max_cycle_length(), DEFAULT_MAX_CYCLE_LENGTH);
}

#[test]
fn test_profitable_triangle_commits_balance() {
    let graph = triangle(2.0, 2.0, 0.3);
    let engine = ArbitrageEngine::new(3).unwrap();
    let report = engine.run_pass(&graph, balance(100.0));

    let first = &report.profitable[0];
    assert_eq!(first.cycle.to_string(), "A -> B -> C -> A");
    assert_eq!(first.outcome, TradeOutcome::Profit);
    assert!((first.balance_before - 100.0).abs() < EPS);
    assert!((first.balance_after - 120.0).abs() < EPS);
    assert!((first.change_pct - 20.0).abs() < 1e-6);
}

#[test]
fn test_sequential_commit_within_pass() {
    let graph = triangle(2.0, 2.0, 0.3);
    let engine = ArbitrageEngine::new(3).unwrap();
    let report = engine.run_pass(&graph, balance(100.0));

    // The same loop is found once per start currency, each time on top of the
    // balance left by the previous one.
    let cycles: Vec<String> = report.profitable.iter().map(|r| r.cycle.to_string()).collect();
    assert_eq!(
        cycles,
        vec!["A -> B -> C -> A", "B -> C -> A -> B", "C -> A -> B -> C"]
    );

    let second = &report.profitable[1];
    assert!((second.balance_before - 120.0).abs() < EPS);
    assert!((second.balance_after - 144.0).abs() < EPS);
    assert!((second.change_pct - 20.0).abs() < 1e-6);

    assert!((report.balance.amount() - 172.8).abs() < 1e-6);
    assert!((report.starting_balance.amount() - 100.0).abs() < EPS);
}

#[test]
fn test_losing_triangle_leaves_balance() {
    let graph = triangle(0.5, 0.5, 1.0);
    let engine = ArbitrageEngine::new(3).unwrap();
    let report = engine.run_pass(&graph, balance(100.0));

    assert!(report.profitable.is_empty());
    assert_eq!(report.records.len(), 3);

    let first = &report.records[0];
    assert_eq!(first.cycle.to_string(), "A -> B -> C -> A");
    assert_eq!(first.outcome, TradeOutcome::Loss);
    assert!((first.balance_after - 25.0).abs() < EPS);
    assert!((first.change_pct + 75.0).abs() < 1e-6);

    assert_eq!(report.balance.amount(), 100.0);
}

#[test]
fn test_unreachable_cycles_are_skipped() {
    let fee = Fee::new(0.001).unwrap();
    let mut graph = RateGraph::new();
    graph.add_edge(&c("A"), &c("B"), 2.0, fee).unwrap();
    graph.add_edge(&c("B"), &c("C"), 3.0, fee).unwrap();

    let engine = ArbitrageEngine::new(3).unwrap();
    let report = engine.run_pass(&graph, balance(100.0));

    // Only A<->B and B<->C round trips are reachable.
    let cycles: Vec<String> = report.records.iter().map(|r| r.cycle.to_string()).collect();
    assert_eq!(
        cycles,
        vec!["A -> B -> A", "B -> A -> B", "B -> C -> B", "C -> B -> C"]
    );
    for record in &report.records {
        let touches_missing = record.cycle.hops().any(|(from, to)| {
            (from == &c("A") && to == &c("C")) || (from == &c("C") && to == &c("A"))
        });
        assert!(!touches_missing, "{}", record.cycle);
    }

    assert_eq!(report.unreachable, 12 - 4);
    assert!(report.profitable.is_empty());
    assert_eq!(report.balance.amount(), 100.0);
}

#[test]
fn test_pass_without_profit_is_idempotent() {
    let fee = Fee::new(0.001).unwrap();
    let graph = complete_graph(&["A", "B", "C", "D"], fee);
    let engine = ArbitrageEngine::new(4).unwrap();

    let first = engine.run_pass(&graph, balance(10_000.0));
    let second = engine.run_pass(&graph, first.balance);

    assert!(first.profitable.is_empty());
    assert_eq!(first.status, PassStatus::Completed);
    assert_eq!(first.balance.amount(), 10_000.0);
    assert_eq!(second.balance.amount(), 10_000.0);
    assert_eq!(first.records.len(), second.records.len());
    assert_eq!(first.records.len(), 4 * (3 + 6 + 6));
    assert!(first.records.iter().all(|r| r.outcome == TradeOutcome::Loss));
}

#[test]
fn test_empty_graph_pass() {
    let engine = ArbitrageEngine::default();
    let report = engine.run_pass(&RateGraph::new(), balance(50.0));

    assert_eq!(report.status, PassStatus::EmptyGraph);
    assert!(report.records.is_empty());
    assert!(report.profitable.is_empty());
    assert_eq!(report.unreachable, 0);
    assert_eq!(report.balance.amount(), 50.0);
    assert_eq!(report.best_change_pct(), None);
}

#[test]
fn test_best_change_pct() {
    let graph = triangle(0.5, 0.5, 1.0);
    let report = ArbitrageEngine::new(3).unwrap().run_pass(&graph, balance(100.0));
    assert!((report.best_change_pct().unwrap() + 75.0).abs() < 1e-6);
}
