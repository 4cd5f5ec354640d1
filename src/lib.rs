//! halo-dbx：方言感知的 SQL 语句构建与 struct 字段映射库。

pub mod builder;
#[cfg(test)]
mod builder_tests;
pub mod dialect;
pub mod field_mapper;
pub mod flavor;
pub mod query;
pub mod query_builder;
pub mod record;
pub(crate) mod string_builder;
pub mod struct_info;
pub mod struct_value;
#[cfg(test)]
mod struct_value_tests;
pub mod tag;
pub mod value;

pub use crate::builder::StatementBuilder;
pub use crate::dialect::{
    AlterColumnSyntax, Capabilities, Dialect, DropConstraintSyntax, LimitSyntax,
    RenameColumnSyntax, RenameTableSyntax,
};
pub use crate::field_mapper::{
    FieldMapperFunc, default_field_map_func, default_field_mapper, set_default_field_mapper,
    set_default_field_mapper_scoped, snake_case_mapper,
};
pub use crate::flavor::{Flavor, default_flavor, set_default_flavor, set_default_flavor_scoped};
pub use crate::query::{BuildError, Params, Query, UnionInfo};
pub use crate::query_builder::QueryBuilder;
pub use crate::record::{FieldDesc, FieldKind, FieldMut, Record, RecordType, ensure_boxed};
pub use crate::struct_info::{FieldInfo, FieldPath, MappingError, StructInfo, StructInfoCache};
pub use crate::struct_value::StructValue;
pub use crate::tag::parse_tag;
pub use crate::value::SqlValue;

/// 便捷命名空间：允许 `use halo_dbx::dbx::{...}` 形式导入。
pub mod dbx {
    pub use crate::*;
}
