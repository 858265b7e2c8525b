use ironfold::Reducer;
use ironfold::combiners::*;
use ironfold::testing::*;
use std::collections::BTreeMap;

fn words() -> Vec<&'static str> {
    vec!["apple", "banana", "orange", "kiwi", "grape"]
}

fn numbers() -> Vec<i32> {
    vec![1, 2, 3, 4, 5, 1, 3, 5]
}

/// Large enough that every parallel layout actually splits the input.
fn spread() -> Vec<u32> {
    (0..2_000).map(|i| (i * 7919) % 503).collect()
}

#[test]
fn arithmetic_terminals() {
    let nums = numbers();
    assert_eq!(assert_modes_agree(&nums, &Count), 8);
    assert_eq!(assert_modes_agree(&nums, &Sum::<i32>::new()), 24);
    assert_eq!(assert_modes_agree(&nums, &Min::new()), Some(1));
    assert_eq!(assert_modes_agree(&nums, &Max::new()), Some(5));
    assert!((assert_modes_agree(&nums, &AverageF64) - 3.0).abs() < f64::EPSILON);
    assert_eq!(assert_modes_agree(&nums, &DistinctCount::new()), 5);
}

#[test]
fn arithmetic_on_empty_input() {
    let empty: Vec<i32> = Vec::new();
    assert_eq!(assert_modes_agree(&empty, &Count), 0);
    assert_eq!(assert_modes_agree(&empty, &Sum::<i32>::new()), 0);
    assert_eq!(assert_modes_agree(&empty, &Min::new()), None);
    assert_eq!(assert_modes_agree(&empty, &Max::new()), None);
    assert!(assert_modes_agree(&empty, &AverageF64).abs() < f64::EPSILON);
    assert_eq!(assert_modes_agree(&empty, &DistinctCount::new()), 0);
}

#[test]
fn extremes_over_split_input() {
    let input = spread();
    let expected_min = input.iter().copied().min();
    let expected_max = input.iter().copied().max();
    assert_eq!(assert_modes_agree(&input, &Min::new()), expected_min);
    assert_eq!(assert_modes_agree(&input, &Max::new()), expected_max);
    assert_eq!(assert_modes_agree(&input, &DistinctCount::new()), 503);
}

#[test]
fn top_k_is_descending_and_bounded() {
    assert_eq!(assert_modes_agree(&numbers(), &TopK::new(3)), vec![5, 5, 4]);
    assert_eq!(assert_modes_agree(&numbers(), &TopK::new(0)), Vec::<i32>::new());
    assert_eq!(
        assert_modes_agree(&numbers(), &TopK::new(100)),
        vec![5, 5, 4, 3, 3, 2, 1, 1]
    );

    let input = spread();
    let mut sorted = input.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted.truncate(10);
    assert_eq!(assert_modes_agree(&input, &TopK::new(10)), sorted);
}

#[test]
fn collecting_keeps_input_order() {
    let input = spread();
    let out = assert_modes_agree(&input, &ToVec::new());
    assert_collections_equal(&out, &input);

    let short = assert_modes_agree(&words(), &Filtering::new(|w: &&str| w.len() <= 5));
    assert_collections_equal(&short, &["apple", "kiwi", "grape"]);

    let evens = assert_modes_agree(&input, &Filtering::new(|n: &u32| n % 2 == 0));
    let expected: Vec<u32> = input.iter().copied().filter(|n| n % 2 == 0).collect();
    assert_collections_equal(&evens, &expected);
}

#[test]
fn joining_with_separator_and_affixes() {
    let plain = assert_modes_agree(&words(), &Joining::new(", "));
    assert_eq!(plain, "apple, banana, orange, kiwi, grape");

    let wrapped = assert_modes_agree(&words(), &Joining::new("|").with_affixes("<", ">"));
    assert_eq!(wrapped, "<apple|banana|orange|kiwi|grape>");

    let empty: Vec<&str> = Vec::new();
    assert_eq!(
        assert_modes_agree(&empty, &Joining::new(", ").with_affixes("[", "]")),
        "[]"
    );

    let owned: Vec<String> = (0..200).map(|i| i.to_string()).collect();
    assert_eq!(assert_modes_agree(&owned, &Joining::new(",")), owned.join(","));
}

#[test]
fn partition_by_predicate() {
    let parts = assert_modes_agree(&numbers(), &PartitionBy::new(|n: &i32| n % 2 == 0));
    assert_collections_equal(parts.matching(), &[2, 4]);
    assert_collections_equal(parts.rest(), &[1, 3, 5, 1, 3, 5]);

    let by_length = assert_modes_agree(&words(), &PartitionBy::new(|w: &&str| w.len() > 5));
    let (long, short) = by_length.into_parts();
    assert_collections_equal(&long, &["banana", "orange"]);
    assert_collections_equal(&short, &["apple", "kiwi", "grape"]);
}

#[test]
fn group_by_key_keeps_order_in_buckets() {
    let by_parity = assert_modes_agree(&numbers(), &GroupBy::new(|n: &i32| n % 2 == 0));
    let mut expected = BTreeMap::new();
    expected.insert(false, vec![1, 3, 5, 1, 3, 5]);
    expected.insert(true, vec![2, 4]);
    assert_eq!(by_parity, expected);

    let by_len = assert_modes_agree(&words(), &GroupBy::new(|w: &&str| w.len()));
    assert_eq!(by_len.keys().copied().collect::<Vec<_>>(), vec![4, 5, 6]);
    assert_eq!(by_len[&5], vec!["apple", "grape"]);
    assert_eq!(by_len[&6], vec!["banana", "orange"]);

    let input = spread();
    let by_bucket = assert_modes_agree(&input, &GroupBy::new(|n: &u32| n % 7));
    assert_eq!(by_bucket.len(), 7);
    for (k, bucket) in &by_bucket {
        let expected: Vec<u32> = input.iter().copied().filter(|n| n % 7 == *k).collect();
        assert_collections_equal(bucket, &expected);
    }
}

#[test]
fn match_queries() {
    let nums = numbers();
    assert!(assert_modes_agree(&nums, &AnyMatch::new(|n: &i32| *n > 4)));
    assert!(!assert_modes_agree(&nums, &AnyMatch::new(|n: &i32| *n > 5)));
    assert!(assert_modes_agree(&nums, &AllMatch::new(|n: &i32| *n > 0)));
    assert!(!assert_modes_agree(&nums, &AllMatch::new(|n: &i32| *n > 1)));
    assert!(assert_modes_agree(&nums, &NoneMatch::new(|n: &i32| *n > 5)));
    assert!(!assert_modes_agree(&nums, &NoneMatch::new(|n: &i32| *n == 3)));

    let empty: Vec<i32> = Vec::new();
    assert!(!assert_modes_agree(&empty, &AnyMatch::new(|_: &i32| true)));
    assert!(assert_modes_agree(&empty, &AllMatch::new(|_: &i32| false)));
    assert!(assert_modes_agree(&empty, &NoneMatch::new(|_: &i32| true)));
}

#[test]
fn find_first_is_leftmost_match() {
    assert_eq!(assert_modes_agree(&numbers(), &FindFirst::new(|n: &i32| *n > 3)), Some(4));
    assert_eq!(assert_modes_agree(&numbers(), &FindFirst::new(|n: &i32| *n > 9)), None);
    assert_eq!(
        assert_modes_agree(&words(), &FindFirst::new(|w: &&str| w.starts_with('o'))),
        Some("orange")
    );

    // Every chunk has matches; only the leftmost may win.
    let tagged: Vec<(u32, usize)> = (0..1_000).map(|i| (i % 10, i as usize)).collect();
    assert_eq!(
        assert_modes_agree(&tagged, &FindFirst::new(|t: &(u32, usize)| t.0 == 9)),
        Some((9, 9))
    );
}

#[test]
fn comparator_extremes_keep_earliest_on_ties() {
    let by_len = |a: &&str, b: &&str| a.len().cmp(&b.len());
    assert_eq!(assert_modes_agree(&words(), &MinBy::new(by_len)), Some("kiwi"));
    // banana and orange tie; the earlier one wins.
    assert_eq!(assert_modes_agree(&words(), &MaxBy::new(by_len)), Some("banana"));
    assert_eq!(
        Reducer::sequential().combine(words(), &MaxBy::new(by_len)),
        Some("banana")
    );

    let tagged: Vec<(u32, usize)> = (0..1_000).map(|i| (i % 10, i as usize)).collect();
    let by_tag = |a: &(u32, usize), b: &(u32, usize)| a.0.cmp(&b.0);
    assert_eq!(
        assert_modes_agree(&tagged, &MinBy::new(by_tag)),
        tagged.iter().copied().min_by(by_tag)
    );
    assert_eq!(assert_modes_agree(&tagged, &MinBy::new(by_tag)), Some((0, 0)));
    // Every chunk holds a 9; only the leftmost may win.
    assert_eq!(assert_modes_agree(&tagged, &MaxBy::new(by_tag)), Some((9, 9)));
}
