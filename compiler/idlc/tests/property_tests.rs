//! Property tests for generation: sequence depths collapse onto the
//! deepest one, and output does not depend on declaration order.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use idl_ir::{known, ClassDef, ClassTable, JavaType, MemberDef};
use idl_types::Classifier;
use idlc::{Generator, GeneratorConfig, IdlContext};
use proptest::prelude::*;

fn grid(fields: &[(String, u32)]) -> ClassTable {
    let mut grid = ClassDef::class("com.acme.Grid").implements(known::SERIALIZABLE);
    for (name, dimension) in fields {
        grid = grid.member(MemberDef::field(name.as_str(), JavaType::array(JavaType::INT, *dimension)));
    }
    ClassTable::with_platform_classes().with(grid)
}

fn named(dimensions: &[u32]) -> Vec<(String, u32)> {
    dimensions
        .iter()
        .enumerate()
        .map(|(index, &dimension)| (format!("cells{index}"), dimension))
        .collect()
}

proptest! {
    #[test]
    fn only_the_deepest_sequence_survives(dimensions in prop::collection::vec(1u32..6, 1..6)) {
        let table = grid(&named(&dimensions));
        let config = GeneratorConfig::default();
        let mut classifier = Classifier::new(&table, config.mapping_options());
        let root = classifier.classify_class("com.acme.Grid").unwrap();
        let ctx = IdlContext::new(&table, classifier.pool(), &config);

        let references = ctx.collect_references(root);
        let deepest = dimensions.iter().copied().max().unwrap();
        prop_assert_eq!(references.arrays.len(), 1);
        let sequence = references.arrays["int"];
        prop_assert_eq!(ctx.get(sequence).array().map(|(_, dimension)| dimension), Some(deepest));

        let mut generator = Generator::new(&table, config.clone());
        let files = generator.generate(&["com.acme.Grid"]).unwrap();
        let mut expected = vec!["com/acme/Grid.idl".to_owned()];
        expected.extend((1..=deepest).map(|depth| format!("org/omg/boxedRMI/seq{depth}_long.idl")));
        let paths: Vec<String> = files.into_iter().map(|file| file.path).collect();
        prop_assert_eq!(paths, expected);
    }

    #[test]
    fn field_order_does_not_change_the_output(
        shuffled in Just(named(&[1, 2, 3, 1, 2])).prop_shuffle(),
    ) {
        let render = |fields: &[(String, u32)]| {
            let table = grid(fields);
            let mut generator = Generator::new(&table, GeneratorConfig::default());
            generator
                .generate(&["com.acme.Grid"])
                .unwrap()
                .into_iter()
                .map(|file| (file.path, file.contents))
                .collect::<Vec<_>>()
        };
        prop_assert_eq!(render(&shuffled), render(&named(&[1, 2, 3, 1, 2])));
    }
}
