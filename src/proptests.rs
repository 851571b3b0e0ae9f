use super::ctrie::{build_map, build_map_with_default, ArrayMap, BuildError, MapBuilder};

use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

fn key_strategy() -> impl Strategy<Value = String> + Clone {
    // A small alphabet makes shared prefixes, and keys that are prefixes of other keys, common.
    "[abc]{0,5}"
}

fn table_strategy() -> impl Strategy<Value = BTreeMap<String, u32>> {
    prop::collection::btree_map(key_strategy(), any::<u32>(), 0..=40)
}

fn validate_map(map: &ArrayMap<u32>, table: &BTreeMap<String, u32>, default: Option<u32>) {
    assert_eq!(map.size(), table.len());
    assert_eq!(map.capacity(), table.len() + usize::from(default.is_some()));
    assert_eq!(map.has_default(), default.is_some());
    assert_eq!(map.get_default().copied(), default);
    assert_eq!(map.iter().count(), map.size());

    let mut seen = BTreeSet::new();
    for (key, &value) in table {
        let pos = map.index_of(key);
        assert!(pos < map.size(), "{key:?} resolved to {pos}");
        assert!(seen.insert(pos), "{key:?} shares slot {pos}");
        assert_eq!(map[pos], value);
        assert_eq!(map[key.as_str()], value);
        assert!(map.contains(key));
    }

    let keys: BTreeSet<String> = map
        .entries()
        .map(|(key, _)| key.into_iter().collect())
        .collect();
    assert_eq!(keys.len(), map.size());
    assert!(keys.iter().eq(table.keys()));
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_lookup_matches_table(table in table_strategy(), queries in prop::collection::vec(key_strategy(), 0..=40)) {
        let map = build_map(table.iter().map(|(k, &v)| (k.as_str(), v))).unwrap();
        validate_map(&map, &table, None);

        for query in &queries {
            let present = table.contains_key(query);
            prop_assert_eq!(map.contains(query), present);
            prop_assert_eq!(map.contains(query), map.index_of(query) != map.end());
            prop_assert_eq!(map.trie().contains(query), map.trie().find(query) != map.trie().end());
            prop_assert_eq!(map.find(query), table.get(query));
        }
    }

    #[test]
    fn prop_absent_keys_fall_back_to_default(
        table in table_strategy(),
        default in any::<u32>(),
        queries in prop::collection::vec(key_strategy(), 0..=40),
    ) {
        let map = build_map_with_default(table.iter().map(|(k, &v)| (k.as_str(), v)), default).unwrap();
        validate_map(&map, &table, Some(default));

        for query in queries.iter().filter(|query| !table.contains_key(*query)) {
            prop_assert!(!map.contains(query));
            prop_assert_eq!(map[query.as_str()], default);
            prop_assert_eq!(map.get_or_default(query), Some(&default));
        }
    }

    #[test]
    fn prop_declaration_order_does_not_change_values(table in table_strategy(), seed in any::<u64>()) {
        let mut pairs: Vec<(&str, u32)> = table.iter().map(|(k, &v)| (k.as_str(), v)).collect();
        // rotate by a random amount and reverse half the time
        if !pairs.is_empty() {
            let by = (seed as usize) % pairs.len();
            pairs.rotate_left(by);
        }
        if seed & 1 == 1 {
            pairs.reverse();
        }
        let map = build_map(pairs).unwrap();
        validate_map(&map, &table, None);
    }

    #[test]
    fn prop_duplicate_key_fails(table in table_strategy(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!table.is_empty());
        let dup = pick.get(&table.keys().collect::<Vec<_>>()).to_string();
        let mut builder = MapBuilder::new();
        for (key, &value) in &table {
            builder.insert(key, value).unwrap();
        }
        prop_assert_eq!(
            builder.insert(&dup, 0),
            Err(BuildError::DuplicateKey(dup.chars().collect()))
        );
        prop_assert_eq!(builder.len(), table.len());
        let map = builder.build();
        validate_map(&map, &table, None);
    }
}
