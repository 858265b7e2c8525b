use anyhow::Result;
use ironfold::combiners::{AverageF64, Count, Sum, ToVec, TopK};
use ironfold::metrics::ReduceMetrics;
use ironfold::runner::{ExecMode, Reducer};
use ironfold::testing::*;
use ironfold::{FnCombiner, ReduceConfig};
use std::collections::HashSet;
use std::convert::Infallible;
use std::sync::{Arc, Mutex};
use std::thread::{self, ThreadId};

#[test]
fn default_reducer_is_parallel_on_global_pool() {
    let r = Reducer::default();
    assert_eq!(
        r.mode(),
        ExecMode::Parallel {
            threads: None,
            partitions: None
        }
    );
    // Small inputs are not worth splitting.
    assert_eq!(r.plan(100).len(), 1);
}

#[test]
fn plan_is_contiguous_and_ordered() {
    let r = Reducer::parallel(7).with_min_chunk_len(1);
    let plan = r.plan(100);
    assert_eq!(plan.len(), 7);
    assert_eq!(plan.first().map(|p| p.start), Some(0));
    assert_eq!(plan.last().map(|p| p.end), Some(100));
    for pair in plan.windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }
}

#[test]
fn chunk_interiors_are_processed_in_order() {
    let input: Vec<u32> = (0..5_000).collect();
    let out = assert_modes_agree(&input, &ToVec::new());
    assert_collections_equal(&out, &input);
}

#[test]
fn float_results_are_bit_identical_across_runs() {
    let r = Reducer::parallel(8).with_min_chunk_len(1);
    let input: Vec<f64> = (1..=10_000).map(|i| 1.0 / f64::from(i)).collect();
    let first = r.combine(input.clone(), &AverageF64);
    for _ in 0..20 {
        let again = r.combine(input.clone(), &AverageF64);
        assert_eq!(first.to_bits(), again.to_bits());
    }
}

#[test]
fn each_chunk_gets_its_own_state() {
    let creates = Arc::new(Mutex::new(0usize));
    let comb = {
        let creates = Arc::clone(&creates);
        FnCombiner::new(
            move || {
                *creates.lock().unwrap() += 1;
                Ok::<_, Infallible>(Vec::<u32>::new())
            },
            |acc: &mut Vec<u32>, x: u32| {
                acc.push(x);
                Ok(())
            },
            |mut a: Vec<u32>, mut b: Vec<u32>| {
                a.append(&mut b);
                Ok(a)
            },
            Ok,
        )
    };
    let r = Reducer::parallel(5).with_min_chunk_len(1);
    let out = r.try_combine((0..50).collect(), &comb);
    assert_eq!(out, Ok((0..50).collect::<Vec<u32>>()));
    assert_eq!(*creates.lock().unwrap(), 5);
}

#[test]
fn dedicated_pool_runs_chunks_off_the_calling_thread() -> Result<()> {
    let r = Reducer::new(ReduceConfig {
        threads: Some(2),
        partitions: Some(4),
        min_chunk_len: 1,
        ..ReduceConfig::default()
    })?;
    let caller = thread::current().id();
    let threads = FnCombiner::new(
        || Ok::<_, Infallible>(HashSet::<ThreadId>::new()),
        |acc: &mut HashSet<ThreadId>, _x: u32| {
            acc.insert(thread::current().id());
            Ok(())
        },
        |mut a: HashSet<ThreadId>, b: HashSet<ThreadId>| {
            a.extend(b);
            Ok(a)
        },
        Ok,
    );
    let seen = match r.try_combine((0..1_000).collect(), &threads) {
        Ok(seen) => seen,
        Err(never) => match never {},
    };
    assert!(!seen.is_empty());
    assert!(seen.len() <= 2);
    assert!(!seen.contains(&caller));
    Ok(())
}

#[test]
fn sequential_mode_stays_on_calling_thread() {
    let caller = thread::current().id();
    let same_thread = FnCombiner::new(
        || Ok::<_, Infallible>(true),
        move |acc: &mut bool, _x: u8| {
            *acc &= thread::current().id() == caller;
            Ok(())
        },
        |a: bool, b: bool| Ok(a && b),
        Ok,
    );
    let out = Reducer::sequential().try_combine(vec![0u8; 10_000], &same_thread);
    assert_eq!(out, Ok(true));
}

#[test]
fn fanout_merges_in_rounds() {
    let metrics = Arc::new(ReduceMetrics::new());
    let r = Reducer::parallel(16)
        .with_min_chunk_len(1)
        .with_fanout(2)
        .with_metrics(Arc::clone(&metrics));
    let input: Vec<u64> = (0..1_600).collect();
    assert_eq!(r.combine(input.clone(), &Sum::<u64>::new()), 1_279_200);
    // 16 -> 8 -> 4 -> 2 -> 1
    assert_eq!(metrics.snapshot().merge_rounds, 4);

    let wide_metrics = Arc::new(ReduceMetrics::new());
    let wide = Reducer::parallel(16)
        .with_min_chunk_len(1)
        .with_fanout(4)
        .with_metrics(Arc::clone(&wide_metrics));
    assert_eq!(wide.combine(input, &Sum::<u64>::new()), 1_279_200);
    // 16 -> 4 -> 1
    assert_eq!(wide_metrics.snapshot().merge_rounds, 2);
}

#[test]
fn fanout_below_two_is_clamped() {
    let r = Reducer::parallel(9).with_min_chunk_len(1).with_fanout(0);
    let out = r.combine((0..90).collect::<Vec<u32>>(), &ToVec::new());
    assert_eq!(out, (0..90).collect::<Vec<u32>>());
}

#[test]
fn lifted_path_matches_element_path() {
    let input: Vec<u32> = (0..10_000).map(|i| (i * 7919) % 1_000).collect();
    for r in [Reducer::sequential(), Reducer::parallel(6).with_min_chunk_len(1)] {
        assert_eq!(
            r.combine_lifted(input.clone(), &Count),
            r.combine(input.clone(), &Count)
        );
        assert_eq!(
            r.combine_lifted(input.clone(), &TopK::new(3)),
            r.combine(input.clone(), &TopK::new(3))
        );
        assert_eq!(r.combine_lifted(input.clone(), &ToVec::new()), input);
    }
}

#[test]
fn sequential_config_builds_sequential_reducer() -> Result<()> {
    let cfg: ReduceConfig = serde_json::from_str(r#"{ "parallel": false }"#)?;
    let r = Reducer::new(cfg)?;
    assert_eq!(r.mode(), ExecMode::Sequential);
    assert_eq!(r.plan(10_000).len(), 1);
    Ok(())
}
