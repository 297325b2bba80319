//! Nested structures, attributes, namespaces and booleans.

#[cfg(test)]
mod tests {
    use awsgen_model::ShapeId;
    use awsgen_restxml::SerializeError;
    use serde_json::json;

    use crate::{compile, load_fixture, serialize, try_serialize};

    #[test]
    fn test_should_write_grantee_namespace_and_type_attribute() {
        let graph = load_fixture("s3.json");
        let xml = serialize(
            &graph,
            "PutBucketAcl",
            json!({
                "Bucket": "photos",
                "AccessControlPolicy": {
                    "Grants": [{
                        "Grantee": {"ID": "abc", "Type": "CanonicalUser"},
                        "Permission": "FULL_CONTROL"
                    }],
                    "Owner": {"ID": "abc", "DisplayName": "owner"}
                }
            }),
        );
        assert_eq!(
            xml,
            "<AccessControlList><Grant>\
             <Grantee xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" xsi:type=\"CanonicalUser\">\
             <ID>abc</ID></Grantee>\
             <Permission>FULL_CONTROL</Permission>\
             </Grant></AccessControlList>\
             <Owner><DisplayName>owner</DisplayName><ID>abc</ID></Owner>"
        );
        assert_eq!(xml.matches("xmlns:xsi=").count(), 1);
    }

    #[test]
    fn test_should_escape_attribute_and_text_values() {
        let graph = load_fixture("s3.json");
        let xml = serialize(
            &graph,
            "PutBucketAcl",
            json!({
                "Bucket": "photos",
                "AccessControlPolicy": {
                    "Grants": [{
                        "Grantee": {"Type": "Group", "URI": "http://acs/?a=1&b=<2>"}
                    }]
                }
            }),
        );
        assert!(xml.contains("xsi:type=\"Group\""));
        assert!(xml.contains("<URI>http://acs/?a=1&amp;b=&lt;2&gt;</URI>"));
    }

    #[test]
    fn test_should_share_one_routine_per_structure() {
        let graph = load_fixture("s3.json");
        let body = compile(&graph, "PutBucketAcl").expect("compiles");
        let shapes: Vec<&str> = body.routines.keys().map(ShapeId::as_str).collect();
        assert_eq!(shapes, ["AccessControlPolicy", "Grant", "Grantee", "Owner"]);
    }

    #[test]
    fn test_should_fail_when_required_attribute_is_missing() {
        let graph = load_fixture("s3.json");
        let err = try_serialize(
            &graph,
            "PutBucketAcl",
            json!({
                "Bucket": "photos",
                "AccessControlPolicy": {"Grants": [{"Grantee": {"ID": "abc"}}]}
            }),
        )
        .expect_err("missing grantee type");
        assert!(matches!(err, SerializeError::MissingValue(ref name) if name == "xsi:type"));
    }

    #[test]
    fn test_should_write_booleans_as_lowercase_literals() {
        let graph = load_fixture("s3.json");
        let xml = serialize(
            &graph,
            "PutPublicAccessBlock",
            json!({
                "Bucket": "photos",
                "PublicAccessBlockConfiguration": {
                    "RestrictPublicBuckets": false,
                    "BlockPublicAcls": true
                }
            }),
        );
        assert_eq!(
            xml,
            "<BlockPublicAcls>true</BlockPublicAcls>\
             <RestrictPublicBuckets>false</RestrictPublicBuckets>"
        );
    }

    #[test]
    fn test_should_use_location_name_for_elements() {
        let graph = load_fixture("s3.json");
        let xml = serialize(
            &graph,
            "PutBucketVersioning",
            json!({
                "Bucket": "photos",
                "MFA": "123456",
                "VersioningConfiguration": {"MFADelete": "Disabled", "Status": "Suspended"}
            }),
        );
        assert_eq!(xml, "<MfaDelete>Disabled</MfaDelete><Status>Suspended</Status>");
    }

    #[test]
    fn test_should_reject_value_of_wrong_kind() {
        let graph = load_fixture("s3.json");
        let err = try_serialize(
            &graph,
            "PutBucketTagging",
            json!({"Bucket": "photos", "Tagging": {"TagSet": "env=prod"}}),
        )
        .expect_err("tag set must be a list");
        assert!(matches!(
            err,
            SerializeError::TypeMismatch { expected: "list", found: "string", .. }
        ));
    }
}
