//! Property tests for hierarchy discovery.

use std::path::PathBuf;

use proptest::prelude::*;

use confstack::domain::services::{CandidateScope, HierarchyResolver};
use confstack::AppProfile;

fn dir_names() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(
        proptest::string::string_regex("[a-z]{1,8}").unwrap(),
        0..8,
    )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: one candidate per ancestor plus the global one, closest first.
    #[test]
    fn property_one_candidate_per_ancestor(names in dir_names()) {
        let mut start = PathBuf::from("/");
        for name in &names {
            start.push(name);
        }
        let resolver = HierarchyResolver::new(start.clone(), AppProfile::cargo())
            .with_global_dir(Some(PathBuf::from("/opt/global-home")));

        let candidates: Vec<_> = resolver.discover().collect();

        prop_assert_eq!(candidates.len(), names.len() + 2);
        prop_assert_eq!(&candidates[0].config_dir, &start.join(".cargo"));
        for (depth, candidate) in candidates[..names.len() + 1].iter().enumerate() {
            prop_assert_eq!(candidate.scope, CandidateScope::Directory { depth });
        }
        prop_assert!(candidates.last().unwrap().is_global());
    }

    /// PROPERTY: the walk never goes above the search stop.
    #[test]
    fn property_search_stop_bounds_walk(names in dir_names(), stop_at in 0usize..8) {
        let stop_at = stop_at.min(names.len());
        let mut stop = PathBuf::from("/");
        for name in &names[..stop_at] {
            stop.push(name);
        }
        let mut start = stop.clone();
        for name in &names[stop_at..] {
            start.push(name);
        }
        let resolver = HierarchyResolver::new(start, AppProfile::cargo())
            .with_search_stop(Some(stop.clone()));

        let candidates: Vec<_> = resolver.discover().collect();

        prop_assert_eq!(candidates.len(), names.len() - stop_at + 1);
        prop_assert!(candidates.iter().all(|c| c.config_dir.starts_with(&stop)));
    }
}
