// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

#[cfg(test)]
mod tests {
    use catsrs::application::dto::cats_request::{
        CatsCreateInput, CatsDeleteInput, CatsListInput, CatsUpdateInput,
    };
    use catsrs::utils::validators::{validate_schema, ValidationIssue};
    use serde_json::json;

    #[test]
    fn test_create_input_type_mismatch() {
        let err = validate_schema::<CatsCreateInput>(&json!({
            "name": 1,
            "breed": "persian",
            "age": 2.5,
        }))
        .unwrap_err();

        assert_eq!(
            err.issues,
            vec![
                ValidationIssue::new("Expected string, received number", "name"),
                ValidationIssue::new("Expected integer, received float", "age"),
            ]
        );
    }

    #[test]
    fn test_create_input_range() {
        let err = validate_schema::<CatsCreateInput>(&json!({
            "name": "",
            "breed": "persian",
            "age": -1,
        }))
        .unwrap_err();

        let paths: Vec<_> = err.issues.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["name", "age"]);
    }

    #[test]
    fn test_delete_input_requires_uuid() {
        let err = validate_schema::<CatsDeleteInput>(&json!({})).unwrap_err();
        assert_eq!(err.issues, vec![ValidationIssue::new("Required", "id")]);

        let err = validate_schema::<CatsDeleteInput>(&json!({ "id": "abc" })).unwrap_err();
        assert_eq!(err.issues, vec![ValidationIssue::new("Invalid uuid", "id")]);
    }

    #[test]
    fn test_update_input_optional_fields() {
        let id = uuid::Uuid::new_v4();
        let input: CatsUpdateInput =
            validate_schema(&json!({ "id": id.to_string(), "name": "jerry" })).unwrap();
        assert_eq!(input.id, id);
        assert_eq!(input.name.as_deref(), Some("jerry"));
        assert!(input.age.is_none());
    }

    #[test]
    fn test_list_input_defaults_and_bounds() {
        let input: CatsListInput = validate_schema(&json!({})).unwrap();
        assert!(input.page.is_none());
        assert!(input.sort.is_none());

        let err = validate_schema::<CatsListInput>(&json!({ "page": 0 })).unwrap_err();
        assert_eq!(err.issues[0].path, "page");
    }
}
