#[cfg(test)]
mod tests {
    use crate::builder::StatementBuilder;
    use crate::field_mapper::{set_default_field_mapper_scoped, snake_case_mapper};
    use crate::flavor::Flavor;
    use crate::struct_value::StructValue;
    use crate::value::SqlValue;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[derive(Clone, Default)]
    struct Customer {
        id: i64,
        name: String,
        status: i64,
        email: String,
        address: Option<String>,
    }

    crate::record! {
        impl Customer as "customer" {
            id:      { name: "ID",      tag: "", kind: value },
            name:    { name: "Name",    tag: "", kind: value },
            status:  { name: "Status",  tag: "", kind: value },
            email:   { name: "Email",   tag: "", kind: value },
            address: { name: "Address", tag: "", kind: value },
        }
    }

    fn customer() -> Customer {
        Customer {
            id: 1,
            name: "abc".to_string(),
            status: 2,
            email: "abc@example.com".to_string(),
            address: None,
        }
    }

    fn row(pairs: &[(&str, SqlValue)]) -> HashMap<String, SqlValue> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn columns_without_filters_include_zero_values() {
        let mut c = customer();
        let mapper = snake_case_mapper();
        let mut sv = StructValue::new(&mut c, Some(&mapper));
        assert_eq!(
            sv.columns(&[], &[]),
            row(&[
                ("id", SqlValue::from(1)),
                ("name", SqlValue::from("abc")),
                ("status", SqlValue::from(2)),
                ("email", SqlValue::from("abc@example.com")),
                ("address", SqlValue::Null),
            ])
        );
    }

    #[test]
    fn include_matches_declared_names_not_columns() {
        let mut c = customer();
        let mapper = snake_case_mapper();
        let mut sv = StructValue::new(&mut c, Some(&mapper));
        // "name" 是列名而不是声明名，不会命中
        assert_eq!(
            sv.columns(&["ID", "name"], &[]),
            row(&[("id", SqlValue::from(1))])
        );
    }

    #[test]
    fn exclude_applies_after_include() {
        let mut c = customer();
        let mapper = snake_case_mapper();
        let mut sv = StructValue::new(&mut c, Some(&mapper));
        assert_eq!(
            sv.columns(&["ID", "Name"], &["ID"]),
            row(&[("name", SqlValue::from("abc"))])
        );
        assert_eq!(
            sv.columns(&[], &["ID", "Address"]),
            row(&[
                ("name", SqlValue::from("abc")),
                ("status", SqlValue::from(2)),
                ("email", SqlValue::from("abc@example.com")),
            ])
        );
    }

    #[test]
    fn without_mapper_keys_are_declared_names() {
        let mut c = customer();
        let mut sv = StructValue::new(&mut c, None);
        assert_eq!(
            sv.columns(&["ID", "Name"], &["ID"]),
            row(&[("Name", SqlValue::from("abc"))])
        );
    }

    #[test]
    fn columns_reflect_live_values() {
        let b = StatementBuilder::for_flavor(Flavor::SQLite)
            .with_field_mapper(Some(snake_case_mapper()));
        let mut c = customer();
        c.address = Some("street".to_string());
        let mut sv = b.struct_value(&mut c);
        assert_eq!(
            sv.columns(&["Address"], &[]),
            row(&[("address", SqlValue::from("street"))])
        );
        assert_eq!(sv.table_name(), "customer");
    }

    #[test]
    fn pk_uses_id_fallback() {
        let mut c = customer();
        let mapper = snake_case_mapper();
        let mut sv = StructValue::new(&mut c, Some(&mapper));
        assert_eq!(sv.pk(), row(&[("id", SqlValue::from(1))]));
    }

    #[derive(Clone, Default)]
    struct Profile {
        bio: String,
        age: u32,
    }

    crate::record! {
        impl Profile {
            bio: { name: "Bio", tag: "", kind: value },
            age: { name: "Age", tag: "", kind: value },
        }
    }

    #[derive(Clone, Default)]
    struct Audit {
        created_by: String,
    }

    crate::record! {
        impl Audit {
            created_by: { name: "CreatedBy", tag: "", kind: value },
        }
    }

    #[derive(Default)]
    struct Member {
        id: i64,
        profile: Option<Box<Profile>>,
        audit: Option<Box<Audit>>,
    }

    crate::record! {
        impl Member {
            id:      { name: "ID",      tag: "pk", kind: value },
            profile: { name: "Profile", tag: "",   kind: nested_ptr(Profile) },
            audit:   { name: "Audit",   tag: "",   kind: embed_ptr(Audit) },
        }
    }

    #[test]
    fn nil_pointers_are_allocated_while_reading() {
        let mut m = Member {
            id: 7,
            ..Default::default()
        };
        let mapper = snake_case_mapper();
        {
            let mut sv = StructValue::new(&mut m, Some(&mapper));
            assert_eq!(
                sv.columns(&[], &[]),
                row(&[
                    ("id", SqlValue::from(7)),
                    ("profile.bio", SqlValue::from("")),
                    ("profile.age", SqlValue::from(0_u32)),
                    ("created_by", SqlValue::from("")),
                ])
            );
        }
        assert!(m.profile.is_some());
        assert!(m.audit.is_some());
    }

    #[test]
    fn filters_use_prefixed_declared_names_for_nested_fields() {
        let mut m = Member {
            id: 7,
            profile: Some(Box::new(Profile {
                bio: "hi".to_string(),
                age: 30,
            })),
            audit: None,
        };
        let mapper = snake_case_mapper();
        let mut sv = StructValue::new(&mut m, Some(&mapper));
        assert_eq!(
            sv.columns(&["Profile.Bio", "CreatedBy"], &[]),
            row(&[
                ("profile.bio", SqlValue::from("hi")),
                ("created_by", SqlValue::from("")),
            ])
        );
        assert_eq!(sv.pk(), row(&[("id", SqlValue::from(7))]));
        drop(sv);
        assert!(m.audit.is_some());
    }

    #[test]
    fn builder_uses_default_field_mapper() {
        let _g = set_default_field_mapper_scoped(None);
        let b = StatementBuilder::for_flavor(Flavor::MySQL);
        let mut c = customer();
        let mut sv = b.struct_value(&mut c);
        assert_eq!(
            sv.columns(&["Email"], &[]),
            row(&[("Email", SqlValue::from("abc@example.com"))])
        );
    }
}
