//! StatementBuilder：按方言能力表生成 DDL 语句，并作为字段映射与查询构建的入口。

use crate::dialect::{
    AlterColumnSyntax, Dialect, DropConstraintSyntax, RenameColumnSyntax, RenameTableSyntax,
};
use crate::field_mapper::{FieldMapperFunc, default_field_mapper};
use crate::flavor::{Flavor, default_flavor};
use crate::query::{BuildError, Query};
use crate::query_builder::QueryBuilder;
use crate::record::RecordType;
use crate::struct_info::{StructInfo, StructInfoCache};
use crate::struct_value::StructValue;
use std::sync::Arc;

pub struct StatementBuilder {
    dialect: Dialect,
    structs: StructInfoCache,
}

impl std::fmt::Debug for StatementBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatementBuilder")
            .field("dialect", &self.dialect.name)
            .field("structs", &self.structs)
            .finish()
    }
}

impl Default for StatementBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementBuilder {
    /// 使用全局默认 Flavor 与 FieldMapper。
    pub fn new() -> Self {
        Self::with_dialect(default_flavor().dialect())
    }

    pub fn for_flavor(flavor: Flavor) -> Self {
        Self::with_dialect(flavor.dialect())
    }

    /// 使用任意方言（包括自定义方言）与全局默认 FieldMapper。
    pub fn with_dialect(dialect: Dialect) -> Self {
        Self {
            dialect,
            structs: StructInfoCache::new(default_field_mapper()),
        }
    }

    /// 返回使用新 FieldMapper 的副本；`None` 表示直接使用字段声明名。
    pub fn with_field_mapper(&self, mapper: Option<FieldMapperFunc>) -> Self {
        Self {
            dialect: self.dialect,
            structs: StructInfoCache::new(mapper),
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn query_builder(&self) -> QueryBuilder {
        QueryBuilder::new(self.dialect)
    }

    pub fn new_query(&self, sql: impl Into<String>) -> Query {
        Query::new(sql)
    }

    pub fn quote_table_name(&self, name: &str) -> String {
        self.dialect.quote_table_name(name)
    }

    pub fn quote_column_name(&self, name: &str) -> String {
        self.dialect.quote_column_name(name)
    }

    /// `T` 的列映射（按类型缓存）。
    pub fn struct_info<T: RecordType>(&self) -> Arc<StructInfo> {
        self.structs.get::<T>()
    }

    /// 绑定记录实例，用于取出列值。
    pub fn struct_value<'a, T: RecordType>(&self, value: &'a mut T) -> StructValue<'a> {
        StructValue::with_info(value, self.structs.get::<T>())
    }

    /// `CREATE TABLE t (c1 type1, c2 type2) options`，列按名字排序。
    pub fn create_table(&self, table: &str, cols: &[(&str, &str)], options: &[&str]) -> Query {
        let mut sorted = cols.to_vec();
        sorted.sort_by(|a, b| a.0.cmp(b.0));
        let defs: Vec<String> = sorted
            .iter()
            .map(|(name, ty)| format!("{} {ty}", self.quote_column_name(name)))
            .collect();

        let mut sql = format!(
            "CREATE TABLE {} ({})",
            self.quote_table_name(table),
            defs.join(", ")
        );
        for opt in options {
            sql.push(' ');
            sql.push_str(opt);
        }
        Query::new(sql)
    }

    pub fn rename_table(&self, old_name: &str, new_name: &str) -> Query {
        let sql = match self.dialect.capabilities.rename_table {
            RenameTableSyntax::AlterTableRenameTo => format!(
                "ALTER TABLE {} RENAME TO {}",
                self.quote_table_name(old_name),
                self.quote_table_name(new_name)
            ),
            RenameTableSyntax::RenameTable => format!(
                "RENAME TABLE {} TO {}",
                self.quote_table_name(old_name),
                self.quote_table_name(new_name)
            ),
            RenameTableSyntax::SpRename => format!(
                "EXEC sp_rename {}, {}",
                string_literal(old_name),
                string_literal(new_name)
            ),
        };
        Query::new(sql)
    }

    pub fn drop_table(&self, table: &str) -> Query {
        Query::new(format!("DROP TABLE {}", self.quote_table_name(table)))
    }

    /// 没有 TRUNCATE 的方言退化为 `DELETE FROM`。
    pub fn truncate_table(&self, table: &str) -> Query {
        let table = self.quote_table_name(table);
        if self.dialect.capabilities.truncate {
            Query::new(format!("TRUNCATE TABLE {table}"))
        } else {
            Query::new(format!("DELETE FROM {table}"))
        }
    }

    pub fn add_column(&self, table: &str, col: &str, ty: &str) -> Query {
        Query::new(format!(
            "ALTER TABLE {} ADD {} {ty}",
            self.quote_table_name(table),
            self.quote_column_name(col)
        ))
    }

    pub fn drop_column(&self, table: &str, col: &str) -> Query {
        if !self.dialect.capabilities.drop_column {
            return self.unsupported("DropColumn");
        }
        Query::new(format!(
            "ALTER TABLE {} DROP COLUMN {}",
            self.quote_table_name(table),
            self.quote_column_name(col)
        ))
    }

    pub fn rename_column(&self, table: &str, old_name: &str, new_name: &str) -> Query {
        let Some(syntax) = self.dialect.capabilities.rename_column else {
            return self.unsupported("RenameColumn");
        };
        let sql = match syntax {
            RenameColumnSyntax::RenameColumn => format!(
                "ALTER TABLE {} RENAME COLUMN {} TO {}",
                self.quote_table_name(table),
                self.quote_column_name(old_name),
                self.quote_column_name(new_name)
            ),
            RenameColumnSyntax::SpRename => {
                format!(
                    "EXEC sp_rename {}, {}, 'COLUMN'",
                    string_literal(&format!("{table}.{old_name}")),
                    string_literal(new_name)
                )
            }
        };
        Query::new(sql)
    }

    /// 修改列类型。
    pub fn alter_column(&self, table: &str, col: &str, ty: &str) -> Query {
        let Some(syntax) = self.dialect.capabilities.alter_column else {
            return self.unsupported("AlterColumn");
        };
        let table = self.quote_table_name(table);
        let col = self.quote_column_name(col);
        let sql = match syntax {
            AlterColumnSyntax::AlterColumn => format!("ALTER TABLE {table} ALTER COLUMN {col} {ty}"),
            AlterColumnSyntax::AlterColumnType => {
                format!("ALTER TABLE {table} ALTER COLUMN {col} TYPE {ty}")
            }
            AlterColumnSyntax::Change => format!("ALTER TABLE {table} CHANGE {col} {col} {ty}"),
            AlterColumnSyntax::Modify => format!("ALTER TABLE {table} MODIFY {col} {ty}"),
        };
        Query::new(sql)
    }

    pub fn add_primary_key(&self, table: &str, name: &str, cols: &[&str]) -> Query {
        if !self.dialect.capabilities.primary_key_ddl {
            return self.unsupported("AddPrimaryKey");
        }
        Query::new(format!(
            "ALTER TABLE {} ADD CONSTRAINT {} PRIMARY KEY ({})",
            self.quote_table_name(table),
            self.quote_column_name(name),
            self.quote_columns(cols)
        ))
    }

    pub fn drop_primary_key(&self, table: &str, name: &str) -> Query {
        if !self.dialect.capabilities.primary_key_ddl {
            return self.unsupported("DropPrimaryKey");
        }
        let table = self.quote_table_name(table);
        let sql = match self.dialect.capabilities.drop_constraint {
            DropConstraintSyntax::DropConstraint => format!(
                "ALTER TABLE {table} DROP CONSTRAINT {}",
                self.quote_column_name(name)
            ),
            DropConstraintSyntax::DropKeyKind => format!("ALTER TABLE {table} DROP PRIMARY KEY"),
        };
        Query::new(sql)
    }

    /// `options` 原样拼在 REFERENCES 之后，例如 `ON DELETE CASCADE`。
    pub fn add_foreign_key(
        &self,
        table: &str,
        name: &str,
        cols: &[&str],
        ref_cols: &[&str],
        ref_table: &str,
        options: &[&str],
    ) -> Query {
        if !self.dialect.capabilities.foreign_key_ddl {
            return self.unsupported("AddForeignKey");
        }
        let mut sql = format!(
            "ALTER TABLE {} ADD CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
            self.quote_table_name(table),
            self.quote_column_name(name),
            self.quote_columns(cols),
            self.quote_table_name(ref_table),
            self.quote_columns(ref_cols)
        );
        for opt in options {
            sql.push(' ');
            sql.push_str(opt);
        }
        Query::new(sql)
    }

    pub fn drop_foreign_key(&self, table: &str, name: &str) -> Query {
        if !self.dialect.capabilities.foreign_key_ddl {
            return self.unsupported("DropForeignKey");
        }
        let table = self.quote_table_name(table);
        let name = self.quote_column_name(name);
        let sql = match self.dialect.capabilities.drop_constraint {
            DropConstraintSyntax::DropConstraint => {
                format!("ALTER TABLE {table} DROP CONSTRAINT {name}")
            }
            DropConstraintSyntax::DropKeyKind => {
                format!("ALTER TABLE {table} DROP FOREIGN KEY {name}")
            }
        };
        Query::new(sql)
    }

    pub fn create_index(&self, table: &str, name: &str, cols: &[&str]) -> Query {
        self.create_index_impl("CREATE INDEX", table, name, cols)
    }

    pub fn create_unique_index(&self, table: &str, name: &str, cols: &[&str]) -> Query {
        self.create_index_impl("CREATE UNIQUE INDEX", table, name, cols)
    }

    fn create_index_impl(&self, verb: &str, table: &str, name: &str, cols: &[&str]) -> Query {
        Query::new(format!(
            "{verb} {} ON {} ({})",
            self.quote_column_name(name),
            self.quote_table_name(table),
            self.quote_columns(cols)
        ))
    }

    pub fn drop_index(&self, table: &str, name: &str) -> Query {
        let name = self.quote_column_name(name);
        if self.dialect.capabilities.drop_index_requires_table {
            Query::new(format!(
                "DROP INDEX {name} ON {}",
                self.quote_table_name(table)
            ))
        } else {
            Query::new(format!("DROP INDEX {name}"))
        }
    }

    fn quote_columns(&self, cols: &[&str]) -> String {
        cols.iter()
            .map(|c| self.quote_column_name(c))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn unsupported(&self, operation: &'static str) -> Query {
        tracing::warn!(
            operation,
            dialect = self.dialect.name,
            "operation not supported by dialect"
        );
        Query::failed(BuildError::Unsupported {
            operation,
            dialect: self.dialect.name,
        })
    }
}

/// 渲染为单引号字符串字面量，内部的 `'` 写成 `''`。
fn string_literal(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}
