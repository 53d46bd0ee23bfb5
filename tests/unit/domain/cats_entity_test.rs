// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

#[cfg(test)]
mod tests {
    use catsrs::domain::models::cats::CatsEntity;
    use catsrs::domain::models::repository::{PersistedEntity, RemovedModel, UpdatedModel};
    use serde_json::json;

    #[test]
    fn test_roundtrip_keeps_soft_delete_marker() {
        let mut cat = CatsEntity::new("tom", "persian", 3);
        cat.set_delete();

        let restored: CatsEntity = serde_json::from_value(serde_json::to_value(&cat).unwrap()).unwrap();
        assert_eq!(restored, cat);
        assert!(restored.is_deleted());
        assert_eq!(restored.id(), cat.id);
    }

    #[test]
    fn test_touch_moves_updated_at_forward() {
        let mut cat = CatsEntity::new("tom", "persian", 3);
        let before = cat.updated_at;
        cat.touch();
        assert!(cat.updated_at >= before);
        assert!(cat.created_at.is_some());
    }

    #[test]
    fn test_result_models_use_camel_case() {
        let updated = UpdatedModel {
            matched_count: 1,
            modified_count: 1,
            acknowledged: true,
        };
        assert_eq!(
            serde_json::to_value(&updated).unwrap(),
            json!({ "matchedCount": 1, "modifiedCount": 1, "acknowledged": true })
        );

        let removed = RemovedModel::from_count(0);
        assert_eq!(removed.deleted_count, 0);
        assert!(!removed.deleted);
    }
}
