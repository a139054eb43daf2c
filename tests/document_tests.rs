//! Tests for parsing YAML into position-tracked documents and mapping
//! character offsets back to paths.

use yamlnav::document::node::{ScalarStyle, YamlValue};
use yamlnav::document::parser::{parse_yaml, parse_yaml_named};
use yamlnav::document::tree::NodeRef;
use yamlnav::yamlpath::YamlPath;

const DEPLOYMENT: &str = r#"apiVersion: apps/v1
kind: Deployment
metadata:
  name: web
spec:
  replicas: 3
  template:
    spec:
      containers:
      - name: app
        image: "nginx:1.25"
        ports:
        - containerPort: 80
---
apiVersion: v1
kind: Service
metadata:
  name: web-svc
"#;

#[test]
fn test_multi_document_positions() {
    let file = parse_yaml(DEPLOYMENT).unwrap();
    assert_eq!(file.documents().len(), 2);

    let service = file.document(1).unwrap();
    assert_eq!(service.scalar_property("kind"), Some("Service"));
    let kind = service.entry("kind").unwrap();
    assert_eq!(kind.key.line(), 16);
    assert_eq!(kind.key.col(), 1);
}

#[test]
fn test_quoted_scalar_style_and_span() {
    let file = parse_yaml(DEPLOYMENT).unwrap();
    let path = YamlPath::decode([
        "[0", ".spec", ".template", ".spec", ".containers", "[0", ".image",
    ])
    .unwrap();
    let image = file.traverse_to_node(&path).unwrap();
    match image.value() {
        YamlValue::Scalar(scalar) => {
            assert_eq!(scalar.text, "nginx:1.25");
            assert_eq!(scalar.style, ScalarStyle::DoubleQuoted);
        }
        other => panic!("expected scalar, got {}", other.kind()),
    }
    let span = image.span();
    let quoted: String = DEPLOYMENT.chars().skip(span.start).take(span.len()).collect();
    assert_eq!(quoted, "\"nginx:1.25\"");
}

#[test]
fn test_ast_path_round_trips_through_traversal() {
    let file = parse_yaml(DEPLOYMENT).unwrap();
    for needle in ["web", "3", "Deployment", "80", "web-svc", "containerPort", "replicas"] {
        let offset = DEPLOYMENT.find(needle).unwrap();
        let refs = file.ast_path_at(offset);
        let path = YamlPath::from_ast_path(&refs).unwrap();
        let node = file.traverse_to_node(&path).unwrap();
        assert_eq!(node.as_scalar(), Some(needle), "path {}", path);
        assert!(node.span().contains(offset));
    }
}

#[test]
fn test_ast_path_shape() {
    let file = parse_yaml(DEPLOYMENT).unwrap();
    let offset = DEPLOYMENT.find("containerPort").unwrap();
    let path = YamlPath::from_ast_path(&file.ast_path_at(offset)).unwrap();
    assert_eq!(
        path.tail().to_prop_string(),
        "spec.template.spec.containers[0].ports[0]&containerPort"
    );
    assert!(path.points_at_key());
}

#[test]
fn test_ast_path_outside_documents() {
    let file = parse_yaml("a: 1\n").unwrap();
    assert!(file.ast_path_at(500).is_empty());
    let empty = parse_yaml("").unwrap();
    assert!(empty.ast_path_at(0).is_empty());
}

#[test]
fn test_ast_path_stops_at_complex_key() {
    let yaml = "? [a, b]\n: value\n";
    let file = parse_yaml(yaml).unwrap();
    let refs = file.ast_path_at(yaml.find("value").unwrap());
    assert!(matches!(refs.last(), Some(NodeRef::Value(key)) if key.is_sequence()));
    assert!(YamlPath::from_ast_path(&refs).is_none());
}

#[test]
fn test_anchor_alias_reads_as_copy() {
    let yaml = "base: &base\n  image: alpine\nderived: *base\n";
    let file = parse_yaml(yaml).unwrap();
    let path = YamlPath::decode(["[0", ".derived", ".image"]).unwrap();
    assert_eq!(
        file.traverse_to_node(&path).and_then(|n| n.as_scalar()),
        Some("alpine")
    );
}

#[test]
fn test_invalid_yaml_names_the_file() {
    let err = parse_yaml_named("key: [unclosed", "broken.yaml").unwrap_err();
    assert!(err.to_string().contains("broken.yaml"));
}

#[test]
fn test_ast_path_on_first_keys() {
    let file = parse_yaml(DEPLOYMENT).unwrap();
    let first_key = YamlPath::from_ast_path(&file.ast_path_at(0)).unwrap();
    assert_eq!(first_key.encode(), vec!["[0", "&apiVersion"]);

    let second_doc = DEPLOYMENT.find("apiVersion: v1").unwrap();
    let path = YamlPath::from_ast_path(&file.ast_path_at(second_doc)).unwrap();
    assert_eq!(path.encode(), vec!["[1", "&apiVersion"]);

    let name = DEPLOYMENT.find("name: app").unwrap();
    let path = YamlPath::from_ast_path(&file.ast_path_at(name)).unwrap();
    assert_eq!(
        path.tail().to_prop_string(),
        "spec.template.spec.containers[0]&name"
    );
}

#[test]
fn test_ast_path_inside_multi_line_scalars() {
    let yaml = "notes: first line\n  second line\nquote: \"say \\\"hi\\\"\"\nafter: 1\n";
    let file = parse_yaml(yaml).unwrap();

    let refs = file.ast_path_at(yaml.find("second").unwrap());
    let path = YamlPath::from_ast_path(&refs).unwrap();
    assert_eq!(path.encode(), vec!["[0", ".notes"]);

    // the closing quote still belongs to the scalar
    let closing = yaml.find("\nafter").unwrap() - 1;
    let refs = file.ast_path_at(closing);
    let path = YamlPath::from_ast_path(&refs).unwrap();
    assert_eq!(path.encode(), vec!["[0", ".quote"]);
}
