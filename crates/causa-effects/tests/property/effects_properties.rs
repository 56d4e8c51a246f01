//! Property tests for causa-effects: path products on random chains.

use proptest::prelude::*;

use causa_core::config::EstimationConfig;
use causa_effects::LinearSem;
use test_fixtures::LinearGaussianSem;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn chain_total_effect_is_product(
        coefs in prop::collection::vec(-0.9_f64..0.9_f64, 1..5),
        seed in any::<u64>(),
    ) {
        let names: Vec<String> = (0..=coefs.len()).map(|i| format!("v{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut gen = LinearGaussianSem::new(&refs);
        for (i, &c) in coefs.iter().enumerate() {
            gen = gen.edge(&names[i], &names[i + 1], c);
        }
        let data = gen.sample(120, seed);
        let edges: Vec<(String, String)> =
            gen.edges().into_iter().map(|(a, b, _)| (a, b)).collect();
        let sem = LinearSem::fit(&data, &edges, &EstimationConfig::default()).unwrap();

        let expected: f64 = coefs.iter().product();
        let total = sem.total_effect(&names[0], names.last().unwrap()).unwrap();
        prop_assert!((total - expected).abs() < 1e-8, "{} vs {}", total, expected);

        let reverse = sem.total_effect(names.last().unwrap(), &names[0]).unwrap();
        prop_assert_eq!(reverse, 0.0);
    }

    #[test]
    fn direct_effects_match_generating_edges(
        coefs in prop::collection::vec(-0.9_f64..0.9_f64, 3),
        seed in any::<u64>(),
    ) {
        // a -> b, a -> c, b -> c
        let gen = LinearGaussianSem::new(&["a", "b", "c"])
            .edge("a", "b", coefs[0])
            .edge("a", "c", coefs[1])
            .edge("b", "c", coefs[2]);
        let data = gen.sample(150, seed);
        let edges: Vec<(String, String)> =
            gen.edges().into_iter().map(|(a, b, _)| (a, b)).collect();
        let sem = LinearSem::fit(&data, &edges, &EstimationConfig::default()).unwrap();

        for (from, to, beta) in gen.edges() {
            let fitted = sem.direct_effect(&from, &to).unwrap();
            prop_assert!((fitted - beta).abs() < 1e-8);
        }
    }
}
