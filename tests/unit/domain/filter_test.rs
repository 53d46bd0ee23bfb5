// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

#[cfg(test)]
mod tests {
    use catsrs::domain::repositories::repository::{
        Filter, FilterOperator, PaginateQuery, RepositoryOptions, Sort, SortOrder,
    };
    use serde_json::json;

    #[test]
    fn test_filter_builders() {
        let filter = Filter::new()
            .like("name", "to")
            .eq("age", 3)
            .is_in("breed", vec![json!("persian"), json!("siamese")]);

        let operators: Vec<_> = filter.conditions().iter().map(|c| c.operator).collect();
        assert_eq!(
            operators,
            vec![FilterOperator::Like, FilterOperator::Eq, FilterOperator::In]
        );
        assert!(!filter.is_empty());
        assert!(Filter::new().is_empty());
    }

    #[test]
    fn test_paginate_options_carry_partition_and_sort() {
        let query = PaginateQuery {
            page: 2,
            limit: 5,
            sort: vec![Sort {
                field: "name".to_string(),
                order: SortOrder::Asc,
            }],
            filter: Filter::new(),
            partition: Some("schema2".to_string()),
        };

        let options = query.options();
        assert_eq!(
            options,
            RepositoryOptions {
                partition: Some("schema2".to_string()),
                sort: query.sort.clone(),
                skip: Some(5),
                limit: Some(5),
            }
        );
    }

    #[test]
    fn test_sort_order_parses_lowercase() {
        let order: SortOrder = serde_json::from_value(json!("desc")).unwrap();
        assert_eq!(order, SortOrder::Desc);
        assert!(serde_json::from_value::<SortOrder>(json!("DESC")).is_err());
    }
}
