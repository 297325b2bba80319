//! Generation-time failures surface with the offending shape and member.

#[cfg(test)]
mod tests {
    use awsgen_model::ModelError;
    use awsgen_restxml::CompileError;

    use crate::{compile, load_fixture, parse_model};

    fn model_with_member(member: &str, extra_shapes: &str) -> String {
        format!(
            r#"{{
                "metadata": {{"protocol": "rest-xml"}},
                "operations": {{"Put": {{"input": {{"shape": "Input"}}}}}},
                "shapes": {{
                    "Input": {{"type": "structure", "members": {{{member}}}}},
                    "Text": {{"type": "string"}}{extra_shapes}
                }}
            }}"#
        )
    }

    #[test]
    fn test_should_reject_map_members() {
        let json = model_with_member(
            r#""Metadata": {"shape": "Metadata"}"#,
            r#", "Metadata": {"type": "map", "key": {"shape": "Text"}, "value": {"shape": "Text"}}"#,
        );
        let graph = parse_model(&json).expect("model parses");

        let err = compile(&graph, "Put").expect_err("maps are unsupported");
        assert!(matches!(err.root_cause(), CompileError::UnsupportedMap { .. }));
        assert!(err.to_string().starts_with("Input.Metadata: "));
    }

    #[test]
    fn test_should_reject_numeric_members() {
        let json = model_with_member(
            r#""Count": {"shape": "Count"}"#,
            r#", "Count": {"type": "integer"}"#,
        );
        let graph = parse_model(&json).expect("model parses");

        let err = compile(&graph, "Put").expect_err("integers are unsupported");
        assert_eq!(
            err.to_string(),
            "Input.Count: type integer is not yet implemented (shape `Count`)"
        );
    }

    #[test]
    fn test_should_reject_timestamp_inside_nested_structure() {
        let json = model_with_member(
            r#""Rule": {"shape": "Rule"}"#,
            r#", "Rule": {"type": "structure", "members": {"Date": {"shape": "Date"}}},
                "Date": {"type": "timestamp"}"#,
        );
        let graph = parse_model(&json).expect("model parses");

        let err = compile(&graph, "Put").expect_err("timestamps are unsupported");
        assert_eq!(
            err.to_string(),
            "Rule.Date: type timestamp is not yet implemented (shape `Date`)"
        );
    }

    #[test]
    fn test_should_reject_boolean_attribute() {
        let json = model_with_member(
            r#""Config": {"shape": "Config"}"#,
            r#", "Config": {"type": "structure", "members": {
                    "Enabled": {"shape": "Flag", "xmlAttribute": true}
                }},
                "Flag": {"type": "boolean"}"#,
        );
        let graph = parse_model(&json).expect("model parses");

        let err = compile(&graph, "Put").expect_err("boolean attributes are unsupported");
        assert!(matches!(
            err.root_cause(),
            CompileError::BooleanAttribute { member } if member == "Enabled"
        ));
    }

    #[test]
    fn test_should_reject_attribute_on_document_root() {
        let json = model_with_member(
            r#""Id": {"shape": "Text", "locationName": "id", "xmlAttribute": true}"#,
            "",
        );
        let graph = parse_model(&json).expect("model parses");

        let err = compile(&graph, "Put").expect_err("root cannot hold attributes");
        assert!(matches!(err, CompileError::AttributeOnDocument { .. }));
    }

    #[test]
    fn test_should_reject_dangling_references_at_load_time() {
        let json = model_with_member(r#""Owner": {"shape": "Missing"}"#, "");
        let err = parse_model(&json).expect_err("dangling reference");
        assert!(matches!(
            err,
            ModelError::DanglingReference { ref owner, ref target, .. }
                if owner == "Input" && target == "Missing"
        ));
    }

    #[test]
    fn test_should_reject_self_nested_list_at_load_time() {
        let json = model_with_member(
            r#""Rows": {"shape": "Rows"}"#,
            r#", "Rows": {"type": "list", "member": {"shape": "Rows"}}"#,
        );
        let err = parse_model(&json).expect_err("list contains itself");
        assert_eq!(err.to_string(), "list `Rows` contains itself");
    }

    #[test]
    fn test_should_report_unknown_operation() {
        let graph = load_fixture("s3.json");
        let err = graph.operation("GetObject").expect_err("not in fixture");
        assert!(matches!(err, ModelError::UnknownOperation(_)));
    }

    #[test]
    fn test_should_compile_every_fixture_operation() {
        for fixture in ["s3.json", "route53.json"] {
            let graph = load_fixture(fixture);
            for operation in graph.operations() {
                compile(&graph, &operation.name).unwrap_or_else(|e| {
                    panic!("{fixture}: {} failed to compile: {e}", operation.name)
                });
            }
        }
    }
}
