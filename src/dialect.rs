//! 方言描述：标识符引号规则 + DDL 能力表。
//!
//! 语句构建代码只读取这里的数据，不按方言名分支；新增方言只需要构造一个新的 [`Dialect`]。

/// `RENAME TABLE` 的写法。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameTableSyntax {
    /// `ALTER TABLE old RENAME TO new`
    AlterTableRenameTo,
    /// `RENAME TABLE old TO new`
    RenameTable,
    /// `EXEC sp_rename 'old', 'new'`
    SpRename,
}

/// `RENAME COLUMN` 的写法。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameColumnSyntax {
    /// `ALTER TABLE t RENAME COLUMN old TO new`
    RenameColumn,
    /// `EXEC sp_rename 't.old', 'new', 'COLUMN'`
    SpRename,
}

/// 修改列类型的写法。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlterColumnSyntax {
    /// `ALTER TABLE t ALTER COLUMN c type`
    AlterColumn,
    /// `ALTER TABLE t ALTER COLUMN c TYPE type`
    AlterColumnType,
    /// `ALTER TABLE t CHANGE c c type`
    Change,
    /// `ALTER TABLE t MODIFY c type`
    Modify,
}

/// 删除主键/外键约束的写法。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropConstraintSyntax {
    /// `ALTER TABLE t DROP CONSTRAINT name`
    DropConstraint,
    /// `ALTER TABLE t DROP PRIMARY KEY` / `ALTER TABLE t DROP FOREIGN KEY name`
    DropKeyKind,
}

/// 分页子句的写法。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitSyntax {
    /// `LIMIT n OFFSET m`
    LimitOffset,
    /// `OFFSET m ROWS FETCH NEXT n ROWS ONLY`（要求有 ORDER BY）
    OffsetFetch,
}

/// 方言的 DDL 能力表。`None`/`false` 表示该方言无法表达对应操作。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub truncate: bool,
    pub rename_table: RenameTableSyntax,
    pub rename_column: Option<RenameColumnSyntax>,
    pub alter_column: Option<AlterColumnSyntax>,
    pub drop_column: bool,
    pub primary_key_ddl: bool,
    pub foreign_key_ddl: bool,
    pub drop_constraint: DropConstraintSyntax,
    /// `DROP INDEX name ON table`
    pub drop_index_requires_table: bool,
    pub limit: LimitSyntax,
}

/// 一个 SQL 方言：名字、引号字符与能力表。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    pub name: &'static str,
    pub quote_open: char,
    pub quote_close: char,
    pub capabilities: Capabilities,
}

impl Dialect {
    /// 没有原生 ALTER 约束支持的最小方言。
    pub const SQLITE: Dialect = Dialect {
        name: "SQLite",
        quote_open: '`',
        quote_close: '`',
        capabilities: Capabilities {
            truncate: false,
            rename_table: RenameTableSyntax::AlterTableRenameTo,
            rename_column: None,
            alter_column: None,
            drop_column: false,
            primary_key_ddl: false,
            foreign_key_ddl: false,
            drop_constraint: DropConstraintSyntax::DropConstraint,
            drop_index_requires_table: false,
            limit: LimitSyntax::LimitOffset,
        },
    };

    pub const MYSQL: Dialect = Dialect {
        name: "MySQL",
        quote_open: '`',
        quote_close: '`',
        capabilities: Capabilities {
            truncate: true,
            rename_table: RenameTableSyntax::RenameTable,
            rename_column: Some(RenameColumnSyntax::RenameColumn),
            alter_column: Some(AlterColumnSyntax::Change),
            drop_column: true,
            primary_key_ddl: true,
            foreign_key_ddl: true,
            drop_constraint: DropConstraintSyntax::DropKeyKind,
            drop_index_requires_table: true,
            limit: LimitSyntax::LimitOffset,
        },
    };

    pub const POSTGRESQL: Dialect = Dialect {
        name: "PostgreSQL",
        quote_open: '"',
        quote_close: '"',
        capabilities: Capabilities {
            truncate: true,
            rename_table: RenameTableSyntax::AlterTableRenameTo,
            rename_column: Some(RenameColumnSyntax::RenameColumn),
            alter_column: Some(AlterColumnSyntax::AlterColumnType),
            drop_column: true,
            primary_key_ddl: true,
            foreign_key_ddl: true,
            drop_constraint: DropConstraintSyntax::DropConstraint,
            drop_index_requires_table: false,
            limit: LimitSyntax::LimitOffset,
        },
    };

    pub const SQLSERVER: Dialect = Dialect {
        name: "SQLServer",
        quote_open: '[',
        quote_close: ']',
        capabilities: Capabilities {
            truncate: true,
            rename_table: RenameTableSyntax::SpRename,
            rename_column: Some(RenameColumnSyntax::SpRename),
            alter_column: Some(AlterColumnSyntax::AlterColumn),
            drop_column: true,
            primary_key_ddl: true,
            foreign_key_ddl: true,
            drop_constraint: DropConstraintSyntax::DropConstraint,
            drop_index_requires_table: true,
            limit: LimitSyntax::OffsetFetch,
        },
    };

    pub const ORACLE: Dialect = Dialect {
        name: "Oracle",
        quote_open: '"',
        quote_close: '"',
        capabilities: Capabilities {
            truncate: true,
            rename_table: RenameTableSyntax::AlterTableRenameTo,
            rename_column: Some(RenameColumnSyntax::RenameColumn),
            alter_column: Some(AlterColumnSyntax::Modify),
            drop_column: true,
            primary_key_ddl: true,
            foreign_key_ddl: true,
            drop_constraint: DropConstraintSyntax::DropConstraint,
            drop_index_requires_table: false,
            limit: LimitSyntax::OffsetFetch,
        },
    };

    /// 为表名加引号。
    ///
    /// 已被引号包裹、或是 `{{name}}` 模板占位时原样返回；
    /// 含 `.` 的名字整体加一次引号（不逐段处理）。
    pub fn quote_table_name(&self, name: &str) -> String {
        if self.is_quoted(name) || is_template(name) {
            return name.to_string();
        }
        self.wrap(name)
    }

    /// 为列名加引号；规则同 [`Dialect::quote_table_name`]，另外 `*` 原样返回。
    pub fn quote_column_name(&self, name: &str) -> String {
        if name == "*" {
            return name.to_string();
        }
        self.quote_table_name(name)
    }

    fn is_quoted(&self, name: &str) -> bool {
        name.chars().count() >= 2
            && name.starts_with(self.quote_open)
            && name.ends_with(self.quote_close)
    }

    fn wrap(&self, name: &str) -> String {
        let mut s = String::with_capacity(name.len() + 2);
        s.push(self.quote_open);
        s.push_str(name);
        s.push(self.quote_close);
        s
    }
}

fn is_template(name: &str) -> bool {
    name.len() >= 4 && name.starts_with("{{") && name.ends_with("}}")
}
