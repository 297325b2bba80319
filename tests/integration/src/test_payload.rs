//! Body entry point: empty, raw and payload-rooted bodies.

#[cfg(test)]
mod tests {
    use awsgen_restxml::BodyPlan;
    use serde_json::json;

    use crate::{compile, load_fixture, serialize, try_serialize};

    #[test]
    fn test_should_send_empty_body_without_input() {
        let graph = load_fixture("s3.json");
        let body = compile(&graph, "ListBuckets").expect("compiles");
        assert_eq!(body.plan, BodyPlan::Empty);
        assert_eq!(serialize(&graph, "ListBuckets", json!(null)), "");
    }

    #[test]
    fn test_should_send_empty_body_when_members_are_uri_bound() {
        let graph = load_fixture("s3.json");
        let body = compile(&graph, "DeleteBucket").expect("compiles");
        assert_eq!(body.plan, BodyPlan::Empty);
        assert!(body.routines.is_empty());
        assert_eq!(
            serialize(&graph, "DeleteBucket", json!({"Bucket": "photos"})),
            ""
        );
    }

    #[test]
    fn test_should_pass_streaming_payload_through() {
        let graph = load_fixture("s3.json");
        let body = compile(&graph, "PutObject").expect("compiles");
        assert_eq!(
            body.plan,
            BodyPlan::Raw {
                field: "Body".to_owned()
            }
        );

        let bytes = try_serialize(
            &graph,
            "PutObject",
            json!({"Bucket": "photos", "Key": "cat.jpg", "Body": "<not xml>"}),
        )
        .expect("raw body");
        assert_eq!(&bytes[..], b"<not xml>");
    }

    #[test]
    fn test_should_send_empty_body_for_absent_streaming_payload() {
        let graph = load_fixture("s3.json");
        assert_eq!(
            serialize(&graph, "PutObject", json!({"Bucket": "photos", "Key": "cat.jpg"})),
            ""
        );
    }

    #[test]
    fn test_should_pass_string_payload_through() {
        let graph = load_fixture("s3.json");
        let policy = r#"{"Version":"2012-10-17","Statement":[]}"#;
        assert_eq!(
            serialize(
                &graph,
                "PutBucketPolicy",
                json!({"Bucket": "photos", "Policy": policy})
            ),
            policy
        );
    }

    #[test]
    fn test_should_root_document_at_payload_structure() {
        let graph = load_fixture("s3.json");
        let body = compile(&graph, "PutBucketTagging").expect("compiles");
        assert!(matches!(
            &body.plan,
            BodyPlan::Document { root, payload: Some(field) }
                if root.as_str() == "Tagging" && field == "Tagging"
        ));

        let xml = serialize(
            &graph,
            "PutBucketTagging",
            json!({
                "Bucket": "photos",
                "ContentMD5": "abc",
                "Tagging": {"TagSet": [
                    {"Key": "env", "Value": "prod"},
                    {"Key": "team", "Value": "storage"}
                ]}
            }),
        );
        assert_eq!(
            xml,
            "<TagSet>\
             <Tag><Key>env</Key><Value>prod</Value></Tag>\
             <Tag><Key>team</Key><Value>storage</Value></Tag>\
             </TagSet>"
        );
        assert!(!xml.contains("<Tagging"));
        assert!(!xml.contains("photos"));
    }

    #[test]
    fn test_should_send_empty_body_for_absent_optional_payload() {
        let graph = load_fixture("s3.json");
        assert_eq!(
            serialize(&graph, "CreateBucket", json!({"Bucket": "photos"})),
            ""
        );
        assert_eq!(
            serialize(
                &graph,
                "CreateBucket",
                json!({"Bucket": "photos", "CreateBucketConfiguration": {}})
            ),
            ""
        );
        assert_eq!(
            serialize(
                &graph,
                "CreateBucket",
                json!({
                    "Bucket": "photos",
                    "CreateBucketConfiguration": {"LocationConstraint": "eu-west-1"}
                })
            ),
            "<LocationConstraint>eu-west-1</LocationConstraint>"
        );
    }

    #[test]
    fn test_should_start_documents_with_declaration_by_default() {
        use awsgen_model::Value;
        use awsgen_restxml::RestXmlSerializer;

        let graph = load_fixture("s3.json");
        let body = compile(&graph, "PutBucketVersioning").expect("compiles");
        let input = Value::from_json(json!({
            "Bucket": "photos",
            "VersioningConfiguration": {"Status": "Enabled"}
        }));

        let bytes = RestXmlSerializer::default()
            .serialize(&body, input.as_ref())
            .expect("serializes");
        assert_eq!(
            std::str::from_utf8(&bytes).expect("valid UTF-8"),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Status>Enabled</Status>"
        );
    }
}
