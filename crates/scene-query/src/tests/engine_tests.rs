//! Tests for the [`SceneQuery`] facade.

use std::cell::Cell;

use rstest::rstest;
use scene_graph::{Scene, SceneGraph, SceneNode};

use super::support::{find, labels, sample_scene};
use crate::{
    DefaultCompiler, Query, QueryConfig, QueryError, SceneQuery, SelectorCompiler, SelectorError,
};

/// A compiler that ignores its input and counts invocations.
struct FixedCompiler {
    query: Query,
    calls: Cell<usize>,
}

impl FixedCompiler {
    fn new(query: Query) -> Self {
        Self {
            query,
            calls: Cell::new(0),
        }
    }
}

impl SelectorCompiler for FixedCompiler {
    fn compile(&self, _selector: &str) -> Result<Query, SelectorError> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.query.clone())
    }
}

#[rstest]
fn select_all_filters_pre_order_with_compiled_query(sample_scene: SceneGraph) {
    let compiler = FixedCompiler::new(Query::name("cube").expect("name"));
    let query = SceneQuery::with_compiler(&sample_scene, compiler);

    let found = labels(query.select_all("anything").expect("select"));

    assert_eq!(found, ["Cube#5", "Cube#6"]);
    assert_eq!(query.compiler().calls.get(), 1);
}

#[rstest]
fn select_all_equals_filtered_pre_order(sample_scene: SceneGraph) {
    let query = SceneQuery::new(&sample_scene);
    let compiled = query.compile("?s").expect("compile");
    let expected: Vec<_> = sample_scene
        .pre_order()
        .filter(|&node| compiled.matches(node))
        .collect();
    let actual: Vec<_> = query.select_all("?s").expect("select").collect();
    assert_eq!(actual, expected);
}

#[rstest]
#[case::exact_name("Cube", &["Cube#5", "Cube#6"])]
#[case::case_insensitive("cUbE", &["Cube#5", "Cube#6"])]
#[case::partial_name("?sphere", &["Sphere1#2", "Sphere2#3", "Sphere3#4", "MySphere#8"])]
#[case::layer(".MyTestLayer", &["Sphere1#2", "Cube#5"])]
#[case::tag(".MyTestTag", &["Sphere2#3"])]
#[case::partial_layer(".?test", &["Sphere1#2", "Sphere2#3", "Cube#5"])]
#[case::exact_path("/Parent/Sphere3/Cube", &["Cube#5"])]
#[case::parent("Parent/Cube", &["Cube#6"])]
#[case::ancestor("Parent>Cube", &["Cube#5", "Cube#6"])]
#[case::descendant_whitespace("Parent Cube", &["Cube#5", "Cube#6"])]
#[case::compound("Cube.MyTestLayer", &["Cube#5"])]
#[case::negation("!?r", &["Cube#5", "Cube#6", "Something with a space#9"])]
#[case::unique_id("#7", &["Other#7"])]
#[case::quoted(r#""Something with a space""#, &["Something with a space#9"])]
#[case::rooted_negation("/!Parent", &["Other#7"])]
#[case::no_match("Nothing", &[])]
fn selectors_select_expected_nodes(
    sample_scene: SceneGraph,
    #[case] selector: &str,
    #[case] expected: &[&str],
) {
    let query = SceneQuery::new(&sample_scene);
    let found = labels(query.select_all(selector).expect("select"));
    assert_eq!(found, expected);
}

#[rstest]
fn select_all_in_includes_scope(sample_scene: SceneGraph) {
    let query = SceneQuery::new(&sample_scene);
    let sphere3 = find(&sample_scene, "Sphere3");
    let scoped = labels(query.select_all_in(sphere3, "?3|cube").expect("select"));
    assert_eq!(scoped, ["Sphere3#4", "Cube#5"]);
}

#[rstest]
fn select_one_returns_first_match(sample_scene: SceneGraph) {
    let query = SceneQuery::new(&sample_scene);
    let first = query.select_one("Cube").expect("select");
    assert_eq!(first.map(|node| node.identity()), Some(5));
}

#[rstest]
fn select_one_returns_none_without_matches(sample_scene: SceneGraph) {
    let query = SceneQuery::new(&sample_scene);
    assert_eq!(query.select_one("Nothing").expect("select"), None);
}

#[rstest]
fn select_one_in_stays_within_scope(sample_scene: SceneGraph) {
    let query = SceneQuery::new(&sample_scene);
    let other = find(&sample_scene, "Other");
    assert_eq!(query.select_one_in(other, "Cube").expect("select"), None);
    let sphere = query.select_one_in(other, "?sphere").expect("select");
    assert_eq!(sphere.map(|node| node.name().to_owned()), Some("MySphere".to_owned()));
}

#[rstest]
fn expect_one_returns_single_match(sample_scene: SceneGraph) {
    let query = SceneQuery::new(&sample_scene);
    let cube = query.expect_one("/Parent/Sphere3/Cube").expect("one match");
    assert_eq!(cube.identity(), 5);
}

#[rstest]
fn expect_one_without_match_is_not_found(sample_scene: SceneGraph) {
    let query = SceneQuery::new(&sample_scene);
    assert_eq!(
        query.expect_one("Nothing"),
        Err(QueryError::not_found("Nothing", None))
    );
}

#[rstest]
fn expect_one_in_without_match_names_scope(sample_scene: SceneGraph) {
    let query = SceneQuery::new(&sample_scene);
    let other = find(&sample_scene, "Other");
    let error = query.expect_one_in(other, "Cube").expect_err("no match");
    assert_eq!(error, QueryError::not_found("Cube", Some("Other".to_owned())));
    assert_eq!(error.to_string(), "no node matches 'Cube' under 'Other'");
}

#[rstest]
fn expect_one_with_many_matches_is_ambiguous(sample_scene: SceneGraph) {
    let query = SceneQuery::new(&sample_scene);
    assert_eq!(
        query.expect_one("Cube"),
        Err(QueryError::ambiguous_match("Cube"))
    );
}

#[rstest]
fn expect_one_in_with_many_matches_is_ambiguous(sample_scene: SceneGraph) {
    let query = SceneQuery::new(&sample_scene);
    let parent = find(&sample_scene, "Parent");
    assert_eq!(
        query.expect_one_in(parent, "?sphere"),
        Err(QueryError::ambiguous_match("?sphere"))
    );
}

#[rstest]
#[case::empty("   ")]
#[case::unterminated("\"open")]
#[case::bad_pattern("?(")]
#[case::unexpected("Parent/")]
fn compile_failures_are_wrapped(sample_scene: SceneGraph, #[case] selector: &str) {
    let query = SceneQuery::new(&sample_scene);
    let error = query.select_all(selector).map(|_| ()).expect_err("should fail");
    assert!(matches!(error, QueryError::QueryFailed { .. }), "{error:?}");
    assert_eq!(error.selector(), selector);
    assert!(std::error::Error::source(&error).is_some());
}

#[rstest]
fn overlong_selector_is_rejected(sample_scene: SceneGraph) {
    let query = SceneQuery::with_config(&sample_scene, QueryConfig::new(8, 1_048_576));
    let result = query.select_one("Parent/Sphere3");
    assert!(matches!(
        result,
        Err(QueryError::QueryFailed {
            source: SelectorError::InvalidSelector { .. },
            ..
        })
    ));
    assert!(query.select_one("Parent").is_ok());
}

#[rstest]
fn evaluate_reuses_a_compiled_query(sample_scene: SceneGraph) {
    let query = SceneQuery::new(&sample_scene);
    let compiled = query.compile("?sphere").expect("compile");
    let all = query.evaluate(&compiled).count();
    let other = find(&sample_scene, "Other");
    let scoped = labels(query.evaluate_in(other, &compiled));
    assert_eq!(all, 4);
    assert_eq!(scoped, ["MySphere#8"]);
    assert_eq!(query.evaluate(&compiled).query(), &compiled);
}

#[rstest]
fn repeated_selection_walks_afresh(sample_scene: SceneGraph) {
    let query = SceneQuery::new(&sample_scene);
    let first = labels(query.select_all("?sphere").expect("select"));
    let second = labels(query.select_all("?sphere").expect("select"));
    assert_eq!(first, second);
}

#[test]
fn default_compiler_uses_default_config() {
    let compiler = DefaultCompiler::default();
    assert_eq!(compiler.config(), &QueryConfig::default());
    assert_eq!(
        compiler.compile("Cube").map(|query| query.to_string()),
        Ok(r#"name("cube")"#.to_owned())
    );
}

#[test]
fn empty_scene_yields_nothing() {
    let graph = SceneGraph::new();
    let query = SceneQuery::new(&graph);
    assert_eq!(query.select_all("?a").expect("select").count(), 0);
    assert_eq!(graph.roots().count(), 0);
}
