//! Property tests over randomly shaped entities

use entity_scaffold::prelude::*;
use entity_scaffold::scaffold::build_queries;
use proptest::prelude::*;

fn field_type() -> impl Strategy<Value = FieldType> {
    prop::sample::select(FieldType::KNOWN.to_vec())
}

fn field() -> impl Strategy<Value = Field> {
    ("[a-z]{1,8}", field_type(), any::<bool>(), any::<bool>()).prop_map(
        |(stem, field_type, required, unique)| {
            let mut field = Field::new(format!("f_{stem}"), field_type);
            field.is_required = required;
            field.is_unique = unique;
            field
        },
    )
}

prop_compose! {
    fn entity()(
        fields in prop::collection::vec(field(), 0..6),
        time_stamps in any::<bool>(),
        is_soft_delete in any::<bool>(),
        audited in any::<bool>(),
    ) -> Entity {
        let mut entity = Entity::new("Item", "items")
            .with_timestamps(time_stamps)
            .with_soft_delete(is_soft_delete)
            .with_audit(audited);
        for field in fields {
            if !entity.fields.iter().any(|f| f.name == field.name) {
                entity = entity.with_field(field);
            }
        }
        entity
    }
}

proptest! {
    #[test]
    fn generated_entities_validate(entity in entity()) {
        let options = GenerationOptions { strict_types: true };
        prop_assert!(ScaffoldGenerator::new(entity, options).is_ok());
    }

    #[test]
    fn generation_is_deterministic(entity in entity()) {
        let generator = ScaffoldGenerator::new(entity, GenerationOptions::default()).unwrap();
        prop_assert_eq!(generator.generate(), generator.generate());
    }

    #[test]
    fn schema_column_count_and_termination(entity in entity()) {
        let schema = generate_schema(&entity);
        let lines: Vec<&str> = schema.lines().collect();
        let close = lines.iter().position(|l| *l == ");").unwrap();
        let columns = &lines[1..close];

        let expected = 1 + entity.fields.len() + entity.implicit_columns().len();
        prop_assert_eq!(columns.len(), expected);
        prop_assert!(!columns[columns.len() - 1].ends_with(','));
        prop_assert!(columns[..columns.len() - 1].iter().all(|l| l.ends_with(',')));
    }

    #[test]
    fn placeholders_follow_declaration_order(entity in entity()) {
        let queries = build_queries(&entity);
        let n = entity.fields.len();

        let create = &queries[0];
        for i in 1..=n {
            let placeholder = format!("${i}");
            prop_assert!(create.sql.contains(&placeholder));
        }
        let next = format!("${}", n + 1);
        prop_assert!(!create.sql.contains(&next));

        let update = &queries[3];
        for (i, field) in entity.fields.iter().enumerate() {
            let assignment = format!("{name} = COALESCE(${n}, {name})", name = field.name, n = i + 2);
            prop_assert!(update.sql.contains(&assignment));
        }
    }

    #[test]
    fn soft_delete_gates_delete_query(entity in entity()) {
        let text = generate_queries(&entity);
        let has_delete = text.contains("-- name: DeleteItem :exec");
        prop_assert_eq!(has_delete, entity.is_soft_delete);
        prop_assert_eq!(text.contains("deleted_at IS NULL"), entity.is_soft_delete);
    }

    #[test]
    fn one_lookup_per_unique_field(entity in entity()) {
        let text = generate_queries(&entity);
        let lookups = text.matches("-- name: GetItemBy").count();
        // GetItemByID is always present
        prop_assert_eq!(lookups, 1 + entity.unique_fields().count());
    }

    #[test]
    fn audit_columns_follow_flags(entity in entity()) {
        let schema = generate_schema(&entity);
        prop_assert_eq!(schema.contains("created_by"), entity.audited);
        prop_assert_eq!(
            schema.contains("deleted_by"),
            entity.audited && entity.is_soft_delete
        );
    }
}
